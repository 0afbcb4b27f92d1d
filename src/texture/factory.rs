use std::sync::Arc;

use crate::{foundation::error::SourceResult, raster::bitmap::Bitmap};

/// GPU-sampleable texture contents, premultiplied RGBA8, upright.
///
/// Sources hand textures out as `Arc<Texture>`; identity (`Arc::ptr_eq`) tells whether a
/// cached texture was reused.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Texture {
    /// Width in pixels.
    pub width: u32,
    /// Height in pixels.
    pub height: u32,
    /// Pixel bytes in row-major premultiplied RGBA8.
    pub rgba8_premul: Arc<Vec<u8>>,
}

/// Turns bitmaps into textures for a renderer.
pub trait TextureFactory: Send + Sync {
    /// Build a texture from `bitmap`.
    fn make_texture(&self, bitmap: &Bitmap) -> SourceResult<Arc<Texture>>;
}

/// Texture factory that keeps texture contents in CPU memory.
#[derive(Clone, Copy, Debug, Default)]
pub struct CpuTextureFactory;

impl TextureFactory for CpuTextureFactory {
    fn make_texture(&self, bitmap: &Bitmap) -> SourceResult<Arc<Texture>> {
        let upright = bitmap.upright();
        let mut rgba = upright.pixels().as_raw().clone();
        premultiply_rgba8_in_place(&mut rgba);
        Ok(Arc::new(Texture {
            width: upright.pixel_width(),
            height: upright.pixel_height(),
            rgba8_premul: Arc::new(rgba),
        }))
    }
}

fn premultiply_rgba8_in_place(rgba: &mut [u8]) {
    for px in rgba.chunks_exact_mut(4) {
        let a = px[3] as u16;
        if a == 0 {
            px[0] = 0;
            px[1] = 0;
            px[2] = 0;
            continue;
        }
        px[0] = ((px[0] as u16 * a + 127) / 255) as u8;
        px[1] = ((px[1] as u16 * a + 127) / 255) as u8;
        px[2] = ((px[2] as u16 * a + 127) / 255) as u8;
    }
}

#[cfg(test)]
#[path = "../../tests/unit/texture/factory.rs"]
mod tests;
