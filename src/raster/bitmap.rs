use std::{path::Path, sync::Arc};

use image::{RgbaImage, imageops};

use crate::{
    foundation::core::Size,
    foundation::error::{SourceError, SourceResult},
    geometry::orientation::Orientation,
};

/// Decoded RGBA8 bitmap with a device-pixel ratio and an orientation tag.
///
/// Pixel data is shared, so clones are cheap and [`Bitmap::ptr_eq`] can tell whether an
/// operation returned its input untouched.
#[derive(Clone, Debug)]
pub struct Bitmap {
    pixels: Arc<RgbaImage>,
    scale: f64,
    orientation: Orientation,
}

impl Bitmap {
    /// Wrap straight-alpha RGBA8 pixels (scale 1, upright).
    pub fn from_rgba(pixels: RgbaImage) -> Self {
        Self {
            pixels: Arc::new(pixels),
            scale: 1.0,
            orientation: Orientation::Up,
        }
    }

    /// Decode an encoded image (PNG, JPEG, ...) from memory.
    pub fn decode(bytes: &[u8]) -> SourceResult<Self> {
        let img = image::load_from_memory(bytes)
            .map_err(|e| SourceError::decode(format!("decode image from memory: {e}")))?;
        Ok(Self::from_rgba(img.to_rgba8()))
    }

    /// Read and decode an image file.
    pub fn open(path: &Path) -> SourceResult<Self> {
        let bytes = std::fs::read(path).map_err(|e| {
            SourceError::decode(format!("read image '{}': {e}", path.display()))
        })?;
        Self::decode(&bytes)
    }

    /// Set the device-pixel ratio. Non-finite or non-positive values reset it to 1.
    pub fn with_scale(mut self, scale: f64) -> Self {
        self.scale = if scale.is_finite() && scale > 0.0 {
            scale
        } else {
            1.0
        };
        self
    }

    /// Tag the stored pixels with an orientation.
    pub fn with_orientation(mut self, orientation: Orientation) -> Self {
        self.orientation = orientation;
        self
    }

    /// Stored pixels (not orientation-corrected).
    pub fn pixels(&self) -> &RgbaImage {
        &self.pixels
    }

    /// Stored pixel width.
    pub fn pixel_width(&self) -> u32 {
        self.pixels.width()
    }

    /// Stored pixel height.
    pub fn pixel_height(&self) -> u32 {
        self.pixels.height()
    }

    /// Device-pixel ratio.
    pub fn scale(&self) -> f64 {
        self.scale
    }

    /// Orientation tag.
    pub fn orientation(&self) -> Orientation {
        self.orientation
    }

    /// Logical size: upright pixel dimensions divided by the scale.
    pub fn size(&self) -> Size {
        let (w, h) = (
            f64::from(self.pixel_width()),
            f64::from(self.pixel_height()),
        );
        let (w, h) = if self.orientation.swaps_axes() {
            (h, w)
        } else {
            (w, h)
        };
        Size::new(w / self.scale, h / self.scale)
    }

    /// Whether both bitmaps share the same pixel buffer.
    pub fn ptr_eq(a: &Self, b: &Self) -> bool {
        Arc::ptr_eq(&a.pixels, &b.pixels)
    }

    /// Pixel data rotated/mirrored to upright, tagged [`Orientation::Up`].
    ///
    /// Upright bitmaps are returned as-is without copying.
    pub fn upright(&self) -> Self {
        let p = self.pixels.as_ref();
        let pixels = match self.orientation {
            Orientation::Up => return self.clone(),
            Orientation::Down => imageops::rotate180(p),
            Orientation::Left => imageops::rotate270(p),
            Orientation::Right => imageops::rotate90(p),
            Orientation::UpMirrored => imageops::flip_horizontal(p),
            Orientation::DownMirrored => imageops::flip_vertical(p),
            Orientation::LeftMirrored => imageops::flip_horizontal(&imageops::rotate90(p)),
            Orientation::RightMirrored => imageops::flip_horizontal(&imageops::rotate270(p)),
        };
        Self {
            pixels: Arc::new(pixels),
            scale: self.scale,
            orientation: Orientation::Up,
        }
    }

    pub(crate) fn from_parts(pixels: RgbaImage, scale: f64, orientation: Orientation) -> Self {
        Self {
            pixels: Arc::new(pixels),
            scale,
            orientation,
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/raster/bitmap.rs"]
mod tests;
