use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use crate::{
    foundation::core::{ResizeFilter, Size, SourceSettings},
    foundation::error::{ResourceKind, SourceError, SourceResult},
    foundation::time::{MediaTime, TimeRange},
    media::model::{MediaType, Track},
    raster::bitmap::Bitmap,
    raster::resize::ContentMode,
    source::contract::{LoadCompletion, LoadStatus, Source},
    source::dispatch::Dispatcher,
    source::scale::{ScaleTransform, ScaleTransformable},
    texture::factory::{CpuTextureFactory, Texture, TextureFactory},
};

#[derive(Debug, Default)]
struct TextureCache {
    status: LoadStatus,
    texture: Option<Arc<Texture>>,
    // Bumped on every invalidation; results of older loads are discarded.
    generation: u64,
}

fn lock(cache: &Mutex<TextureCache>) -> MutexGuard<'_, TextureCache> {
    cache.lock().unwrap_or_else(PoisonError::into_inner)
}

/// Everything needed to render the projection, detached from the source.
struct Projection {
    bitmap: Bitmap,
    render_size: Size,
    transform: Option<ScaleTransform>,
    filter: ResizeFilter,
}

impl Projection {
    /// Upright, scale-1 bitmap covering the render size.
    fn render(&self) -> SourceResult<Bitmap> {
        // The transform is expressed in upright coordinates; crop works on stored pixels.
        let bitmap = self.bitmap.upright();
        let Some(t) = self.transform else {
            let positive = self.render_size.width > 0.0 && self.render_size.height > 0.0;
            if bitmap.scale() == 1.0 || !positive {
                return Ok(bitmap.with_scale(1.0));
            }
            // Same logical size, but one texel per render point.
            return bitmap.with_scale(1.0).resize_to_with_filter(
                self.render_size,
                ContentMode::ScaleToFill,
                self.filter,
            );
        };
        let scaled = bitmap.resize_to_with_filter(
            t.scaled_size(bitmap.size()),
            ContentMode::ScaleToFill,
            self.filter,
        )?;
        scaled.crop(t.window(self.render_size))
    }

    fn texture(&self, factory: &dyn TextureFactory) -> SourceResult<Arc<Texture>> {
        factory.make_texture(&self.render()?)
    }
}

/// [`Source`] over a still bitmap, projected to cover a render size.
///
/// The image is time-invariant: it has a synthesized duration and yields the same texture
/// at every time. `load` renders and uploads on the rayon pool.
pub struct ImageSource {
    bitmap: Option<Bitmap>,
    render_size: Size,
    scale_transform: Option<ScaleTransform>,
    duration: MediaTime,
    selected_time_range: TimeRange,
    cache: Arc<Mutex<TextureCache>>,
    factory: Arc<dyn TextureFactory>,
    filter: ResizeFilter,
}

impl std::fmt::Debug for ImageSource {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let cache = lock(&self.cache);
        f.debug_struct("ImageSource")
            .field("bitmap_size", &self.bitmap.as_ref().map(Bitmap::size))
            .field("render_size", &self.render_size)
            .field("scale_transform", &self.scale_transform)
            .field("duration", &self.duration)
            .field("status", &cache.status)
            .field("has_texture", &cache.texture.is_some())
            .finish()
    }
}

impl Default for ImageSource {
    fn default() -> Self {
        Self::new()
    }
}

impl ImageSource {
    /// Source without an image; loading it fails with [`SourceError::ResourceMissing`].
    pub fn new() -> Self {
        Self::with_settings(SourceSettings::default(), None)
    }

    /// Source over `bitmap`, rendered at its native size.
    pub fn with_bitmap(bitmap: Bitmap) -> Self {
        Self::with_settings(SourceSettings::default(), Some(bitmap))
    }

    /// Source using `settings` for its duration and resampling.
    pub fn with_settings(settings: SourceSettings, bitmap: Option<Bitmap>) -> Self {
        let duration = settings.image_duration();
        let render_size = bitmap.as_ref().map(Bitmap::size).unwrap_or(Size::ZERO);
        Self {
            bitmap,
            render_size,
            scale_transform: None,
            duration,
            selected_time_range: TimeRange::from_zero(duration),
            cache: Arc::new(Mutex::new(TextureCache::default())),
            factory: Arc::new(CpuTextureFactory),
            filter: settings.resize_filter,
        }
    }

    /// Use `factory` to build textures.
    pub fn with_texture_factory(mut self, factory: Arc<dyn TextureFactory>) -> Self {
        self.factory = factory;
        self.invalidate();
        self
    }

    /// Backing bitmap.
    pub fn bitmap(&self) -> Option<&Bitmap> {
        self.bitmap.as_ref()
    }

    /// Replace the bitmap; cached texture and readiness are reset.
    pub fn set_bitmap(&mut self, bitmap: Option<Bitmap>) {
        self.bitmap = bitmap;
        self.invalidate();
        self.update_scale_transform();
    }

    /// Target canvas size.
    pub fn render_size(&self) -> Size {
        self.render_size
    }

    /// Change the target canvas; cached texture and readiness are reset.
    pub fn set_render_size(&mut self, render_size: Size) {
        self.render_size = render_size;
        self.invalidate();
        self.update_scale_transform();
    }

    /// The bitmap projected onto the render size: scaled by the transform, then cropped to
    /// the render window. The result is upright at scale 1.
    pub fn render_image(&self) -> SourceResult<Option<Bitmap>> {
        self.projection().map(|p| p.render()).transpose()
    }

    fn projection(&self) -> Option<Projection> {
        Some(Projection {
            bitmap: self.bitmap.clone()?,
            render_size: self.render_size,
            transform: self.scale_transform,
            filter: self.filter,
        })
    }

    fn invalidate(&mut self) {
        let mut cache = lock(&self.cache);
        cache.status = LoadStatus::Unloaded;
        cache.texture = None;
        cache.generation += 1;
    }

    fn update_scale_transform(&mut self) {
        self.scale_transform = self
            .bitmap
            .as_ref()
            .and_then(|b| ScaleTransform::aspect_fill(b.size(), self.render_size));
    }
}

impl Source for ImageSource {
    fn selected_time_range(&self) -> TimeRange {
        self.selected_time_range
    }

    fn set_selected_time_range(&mut self, range: TimeRange) {
        self.selected_time_range = range;
    }

    fn duration(&self) -> MediaTime {
        self.duration
    }

    fn set_duration(&mut self, duration: MediaTime) {
        self.duration = duration;
        self.selected_time_range = self.selected_time_range.clamp_to(duration);
    }

    fn status(&self) -> LoadStatus {
        lock(&self.cache).status.clone()
    }

    #[tracing::instrument(skip_all)]
    fn load(&mut self, dispatcher: Arc<dyn Dispatcher>, completion: LoadCompletion) {
        let Some(projection) = self.projection() else {
            let err = SourceError::resource_missing(ResourceKind::Image);
            tracing::warn!(error = %err, "image source load failed");
            lock(&self.cache).status = LoadStatus::Failed(err.clone());
            dispatcher.dispatch(Box::new(move || completion(Err(err))));
            return;
        };

        let generation = {
            let mut cache = lock(&self.cache);
            cache.status = LoadStatus::Loading;
            cache.generation
        };

        let cache = Arc::clone(&self.cache);
        let factory = Arc::clone(&self.factory);
        rayon::spawn(move || {
            let outcome = projection.texture(factory.as_ref());
            let result = {
                let mut st = lock(&cache);
                if st.generation != generation {
                    tracing::debug!("image source changed during load; result discarded");
                    outcome.map(|_| ())
                } else {
                    match outcome {
                        Ok(tex) => {
                            st.texture = Some(tex);
                            st.status = LoadStatus::Loaded;
                            tracing::debug!(
                                width = projection.render_size.width,
                                height = projection.render_size.height,
                                "image source loaded"
                            );
                            Ok(())
                        }
                        Err(err) => {
                            tracing::warn!(error = %err, "image source load failed");
                            st.status = LoadStatus::Failed(err.clone());
                            Err(err)
                        }
                    }
                }
            };
            dispatcher.dispatch(Box::new(move || completion(result)));
        });
    }

    fn tracks(&self, _media_type: MediaType) -> Vec<Track> {
        Vec::new()
    }

    /// Compute-or-fetch. A finished source (loaded or failed) only returns what is cached; an
    /// unloaded one renders and uploads on the calling thread once, then caches the result.
    /// `None` while a load is in flight. `time` is ignored.
    fn texture(&mut self, _time: MediaTime) -> Option<Arc<Texture>> {
        {
            let cache = lock(&self.cache);
            if !matches!(cache.status, LoadStatus::Unloaded) {
                return cache.texture.clone();
            }
        }
        let projection = self.projection()?;
        let outcome = projection.texture(self.factory.as_ref());
        let mut cache = lock(&self.cache);
        match outcome {
            Ok(tex) => {
                cache.texture = Some(Arc::clone(&tex));
                cache.status = LoadStatus::Loaded;
                Some(tex)
            }
            Err(err) => {
                tracing::warn!(error = %err, "image source texture derivation failed");
                cache.status = LoadStatus::Failed(err);
                None
            }
        }
    }

    fn as_scale_transformable(&self) -> Option<&dyn ScaleTransformable> {
        Some(self)
    }
}

impl ScaleTransformable for ImageSource {
    fn scale_transform(&self) -> Option<ScaleTransform> {
        self.scale_transform
    }
}

#[cfg(test)]
#[path = "../../tests/unit/source/image_source.rs"]
mod tests;
