//! Resize and crop operations on [`Bitmap`].

use image::{RgbaImage, imageops};

use crate::{
    foundation::core::{Rect, ResizeFilter, Size},
    foundation::error::{SourceError, SourceResult},
    geometry::orientation::Orientation,
    geometry::size::{max_size_inside, min_size_covering, shrink_to_fit},
    raster::bitmap::Bitmap,
};

/// Policy for placing a bitmap into a canvas of a different size.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ContentMode {
    /// Stretch to the canvas, ignoring aspect ratio.
    ScaleToFill,
    /// Letterbox: fit inside, centered, transparent padding.
    ScaleAspectFit,
    /// Crop: cover the canvas, centered, overflow clipped.
    ScaleAspectFill,
    /// No scaling: native size centered, overflow clipped.
    #[default]
    ScaleToCenter,
}

fn pixel_dims(size: Size) -> SourceResult<(u32, u32)> {
    let (w, h) = (size.width.round(), size.height.round());
    if !(w >= 1.0 && h >= 1.0) || !w.is_finite() || !h.is_finite() {
        return Err(SourceError::validation(format!(
            "target size {}x{} has no pixels",
            size.width, size.height
        )));
    }
    Ok((w as u32, h as u32))
}

fn scaled_pixels(src: &RgbaImage, w: u32, h: u32, filter: ResizeFilter) -> RgbaImage {
    if src.dimensions() == (w, h) {
        return src.clone();
    }
    imageops::resize(src, w, h, filter.to_image_filter())
}

impl Bitmap {
    /// Shrink to fit within `max_size`, keeping the aspect ratio.
    ///
    /// Never upscales; a bitmap already within bounds is returned as-is.
    pub fn resize_within(&self, max_size: Size) -> SourceResult<Bitmap> {
        let size = self.size();
        let new_size = shrink_to_fit(size, max_size);
        if new_size == size {
            return Ok(self.clone());
        }
        let (w, h) = pixel_dims(new_size)?;
        let upright = self.upright();
        let pixels = scaled_pixels(upright.pixels(), w, h, ResizeFilter::default());
        Ok(Bitmap::from_parts(pixels, 1.0, Orientation::Up))
    }

    /// Resize to exactly `size` under `mode`, with the default filter.
    pub fn resize_to(&self, size: Size, mode: ContentMode) -> SourceResult<Bitmap> {
        self.resize_to_with_filter(size, mode, ResizeFilter::default())
    }

    /// Resize to exactly `size` under `mode`.
    ///
    /// The output is upright at scale 1. A bitmap whose logical size already equals `size`
    /// is returned as-is.
    pub fn resize_to_with_filter(
        &self,
        size: Size,
        mode: ContentMode,
        filter: ResizeFilter,
    ) -> SourceResult<Bitmap> {
        let native = self.size();
        if native == size {
            return Ok(self.clone());
        }
        let (canvas_w, canvas_h) = pixel_dims(size)?;

        let placed = match mode {
            ContentMode::ScaleToFill => Rect::from_origin_size((0.0, 0.0), size),
            ContentMode::ScaleAspectFit => {
                centered(max_size_inside(shrink_to_fit(native, size), size), size)
            }
            ContentMode::ScaleAspectFill => {
                centered(min_size_covering(shrink_to_fit(native, size), size), size)
            }
            ContentMode::ScaleToCenter => centered(native, size),
        };

        let upright = self.upright();
        let mut canvas = RgbaImage::new(canvas_w, canvas_h);
        if let Ok((w, h)) = pixel_dims(placed.size()) {
            let scaled = scaled_pixels(upright.pixels(), w, h, filter);
            imageops::replace(
                &mut canvas,
                &scaled,
                placed.x0.round() as i64,
                placed.y0.round() as i64,
            );
        }
        Ok(Bitmap::from_parts(canvas, 1.0, Orientation::Up))
    }

    /// Extract the sub-region `rect` (logical units).
    ///
    /// The rect is multiplied by the bitmap scale and intersected with the stored pixel
    /// bounds. Origin and size are rounded separately, so the output keeps the rounded
    /// size of the scaled rect. Scale and orientation carry over to the output.
    pub fn crop(&self, rect: Rect) -> SourceResult<Bitmap> {
        let s = self.scale();
        let px = Rect::from_origin_size(
            ((rect.x0 * s).round(), (rect.y0 * s).round()),
            Size::new((rect.width() * s).round(), (rect.height() * s).round()),
        );
        let bounds = Rect::new(
            0.0,
            0.0,
            f64::from(self.pixel_width()),
            f64::from(self.pixel_height()),
        );
        let clipped = px.intersect(bounds);
        if clipped.width() < 1.0 || clipped.height() < 1.0 {
            return Err(SourceError::validation(format!(
                "crop rect {rect:?} does not intersect the bitmap"
            )));
        }
        let pixels = imageops::crop_imm(
            self.pixels(),
            clipped.x0 as u32,
            clipped.y0 as u32,
            clipped.width() as u32,
            clipped.height() as u32,
        )
        .to_image();
        Ok(Bitmap::from_parts(pixels, s, self.orientation()))
    }
}

fn centered(inner: Size, outer: Size) -> Rect {
    Rect::from_origin_size(
        (
            (outer.width - inner.width) / 2.0,
            (outer.height - inner.height) / 2.0,
        ),
        inner,
    )
}

#[cfg(test)]
#[path = "../../tests/unit/raster/resize.rs"]
mod tests;
