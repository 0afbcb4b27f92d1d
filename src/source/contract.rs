use std::sync::Arc;

use crate::{
    foundation::error::{SourceError, SourceResult},
    foundation::time::{MediaTime, TimeRange},
    media::model::{MediaType, Track},
    source::dispatch::Dispatcher,
    source::rate::Rateable,
    source::scale::ScaleTransformable,
    texture::factory::Texture,
};

/// Callback receiving the single terminal outcome of [`Source::load`].
pub type LoadCompletion = Box<dyn FnOnce(SourceResult<()>) + Send + 'static>;

/// Readiness of a source.
#[derive(Clone, Debug, Default)]
pub enum LoadStatus {
    /// `load` has not been called (or cached state was invalidated).
    #[default]
    Unloaded,
    /// Resolution in flight.
    Loading,
    /// Resolved and usable.
    Loaded,
    /// Resolution attempted and failed.
    Failed(SourceError),
}

impl LoadStatus {
    /// Whether a load attempt has finished, successfully or not.
    pub fn is_finished(&self) -> bool {
        matches!(self, Self::Loaded | Self::Failed(_))
    }

    /// Whether the source resolved successfully.
    pub fn is_usable(&self) -> bool {
        matches!(self, Self::Loaded)
    }

    /// Failure reason, if the attempt failed.
    pub fn error(&self) -> Option<&SourceError> {
        match self {
            Self::Failed(e) => Some(e),
            _ => None,
        }
    }
}

/// A timed media input for a compositor: decoded tracks and/or textures over a timeline.
///
/// Instances are owned by a single compositor; they are `Send` so ownership can move, but
/// mutation is not synchronized across threads.
pub trait Source: Send {
    /// Portion of the source's timeline in use.
    fn selected_time_range(&self) -> TimeRange;

    /// Replace the selected range. Callers keep it within [`Source::duration`].
    fn set_selected_time_range(&mut self, range: TimeRange);

    /// Total length of the underlying media.
    fn duration(&self) -> MediaTime;

    /// Replace the duration; derived values follow.
    fn set_duration(&mut self, duration: MediaTime);

    /// Current readiness.
    fn status(&self) -> LoadStatus;

    /// Whether a load attempt has finished. Check [`Source::status`] to tell success from
    /// failure.
    fn is_loaded(&self) -> bool {
        self.status().is_finished()
    }

    /// Resolve the source. `completion` runs exactly once, through `dispatcher`, after the
    /// status has left [`LoadStatus::Loading`].
    fn load(&mut self, dispatcher: Arc<dyn Dispatcher>, completion: LoadCompletion);

    /// Tracks of `media_type` currently exposed.
    fn tracks(&self, media_type: MediaType) -> Vec<Track>;

    /// Visual content at `time`. Sources without texture support return `None`.
    fn texture(&mut self, time: MediaTime) -> Option<Arc<Texture>> {
        let _ = time;
        None
    }

    /// Whether this source can be rendered out as a video.
    fn can_be_converted_to_video(&self) -> bool {
        false
    }

    /// Playback-rate capability.
    fn as_rateable(&self) -> Option<&dyn Rateable> {
        None
    }

    /// Mutable playback-rate capability.
    fn as_rateable_mut(&mut self) -> Option<&mut dyn Rateable> {
        None
    }

    /// Scale-transform capability.
    fn as_scale_transformable(&self) -> Option<&dyn ScaleTransformable> {
        None
    }
}
