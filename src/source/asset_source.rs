use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use crate::{
    foundation::core::Size,
    foundation::error::{MetadataKey, ResourceKind, SourceError, SourceResult},
    foundation::time::{MediaTime, TimeRange},
    media::model::{MediaAsset, MediaType, Track},
    source::contract::{LoadCompletion, LoadStatus, Source},
    source::dispatch::Dispatcher,
    source::rate::{RateControl, Rateable},
};

#[derive(Debug)]
struct AssetState {
    duration: MediaTime,
    selected_time_range: TimeRange,
    status: LoadStatus,
    rate: RateControl,
    muted: bool,
}

impl AssetState {
    fn set_duration(&mut self, duration: MediaTime) {
        self.duration = duration;
        self.selected_time_range = self.selected_time_range.clamp_to(duration);
    }
}

/// [`Source`] over a decoded media container.
///
/// Metadata resolution runs on the rayon pool, so state lives behind a mutex shared with the
/// in-flight load.
#[derive(Debug)]
pub struct AssetSource {
    asset: Option<Arc<dyn MediaAsset>>,
    state: Arc<Mutex<AssetState>>,
}

fn lock(state: &Mutex<AssetState>) -> MutexGuard<'_, AssetState> {
    state.lock().unwrap_or_else(PoisonError::into_inner)
}

impl AssetSource {
    /// Wrap `asset`. Duration and selected range are seeded from the container's nominal
    /// duration until `load` corrects them.
    pub fn new(asset: Arc<dyn MediaAsset>) -> Self {
        let duration = asset.duration();
        Self::with_parts(Some(asset), duration)
    }

    /// Source with no backing asset; loading it fails with
    /// [`SourceError::ResourceMissing`].
    pub fn empty() -> Self {
        Self::with_parts(None, MediaTime::ZERO)
    }

    fn with_parts(asset: Option<Arc<dyn MediaAsset>>, duration: MediaTime) -> Self {
        Self {
            asset,
            state: Arc::new(Mutex::new(AssetState {
                duration,
                selected_time_range: TimeRange::from_zero(duration),
                status: LoadStatus::Unloaded,
                rate: RateControl::default(),
                muted: false,
            })),
        }
    }

    /// Backing asset, if any.
    pub fn asset(&self) -> Option<&Arc<dyn MediaAsset>> {
        self.asset.as_ref()
    }

    /// Hide (or re-expose) audio tracks. The asset itself is untouched.
    pub fn set_muted(&mut self, muted: bool) {
        lock(&self.state).muted = muted;
    }

    /// Whether audio tracks are hidden.
    pub fn is_muted(&self) -> bool {
        lock(&self.state).muted
    }

    /// Display size of the first video track (natural size under its preferred transform).
    pub fn presentation_size(&self) -> Option<Size> {
        self.tracks(MediaType::Video)
            .first()
            .map(Track::presentation_size)
    }
}

fn resolve_duration(asset: &dyn MediaAsset) -> SourceResult<MediaTime> {
    // First failure wins; later keys are not queried.
    for key in [MetadataKey::Tracks, MetadataKey::Duration] {
        asset
            .resolve(key)
            .map_err(|cause| SourceError::metadata(key, cause))?;
    }
    // Never let the source run past its decodable video.
    Ok(asset
        .tracks(MediaType::Video)
        .first()
        .map(|t| t.time_range.duration)
        .unwrap_or_else(|| asset.duration()))
}

impl Source for AssetSource {
    fn selected_time_range(&self) -> TimeRange {
        lock(&self.state).selected_time_range
    }

    fn set_selected_time_range(&mut self, range: TimeRange) {
        lock(&self.state).selected_time_range = range;
    }

    fn duration(&self) -> MediaTime {
        lock(&self.state).duration
    }

    fn set_duration(&mut self, duration: MediaTime) {
        lock(&self.state).set_duration(duration);
    }

    fn status(&self) -> LoadStatus {
        lock(&self.state).status.clone()
    }

    #[tracing::instrument(skip_all)]
    fn load(&mut self, dispatcher: Arc<dyn Dispatcher>, completion: LoadCompletion) {
        let Some(asset) = self.asset.clone() else {
            let err = SourceError::resource_missing(ResourceKind::Asset);
            tracing::warn!(error = %err, "asset source load failed");
            lock(&self.state).status = LoadStatus::Failed(err.clone());
            dispatcher.dispatch(Box::new(move || completion(Err(err))));
            return;
        };

        {
            let mut st = lock(&self.state);
            if matches!(st.status, LoadStatus::Loading) {
                tracing::debug!("load requested while another load is in flight");
            }
            st.status = LoadStatus::Loading;
        }

        let state = Arc::clone(&self.state);
        rayon::spawn(move || {
            let outcome = resolve_duration(asset.as_ref());
            let result = {
                let mut st = lock(&state);
                match outcome {
                    Ok(duration) => {
                        st.duration = duration;
                        st.selected_time_range = TimeRange::from_zero(duration);
                        st.status = LoadStatus::Loaded;
                        tracing::debug!(secs = duration.seconds(), "asset source loaded");
                        Ok(())
                    }
                    Err(err) => {
                        tracing::warn!(error = %err, "asset source load failed");
                        st.status = LoadStatus::Failed(err.clone());
                        Err(err)
                    }
                }
            };
            dispatcher.dispatch(Box::new(move || completion(result)));
        });
    }

    fn tracks(&self, media_type: MediaType) -> Vec<Track> {
        let Some(asset) = &self.asset else {
            return Vec::new();
        };
        if media_type == MediaType::Audio && self.is_muted() {
            return Vec::new();
        }
        asset.tracks(media_type)
    }

    fn can_be_converted_to_video(&self) -> bool {
        !self.tracks(MediaType::Video).is_empty()
    }

    fn as_rateable(&self) -> Option<&dyn Rateable> {
        Some(self)
    }

    fn as_rateable_mut(&mut self) -> Option<&mut dyn Rateable> {
        Some(self)
    }
}

impl Rateable for AssetSource {
    fn rate(&self) -> f64 {
        lock(&self.state).rate.rate()
    }

    fn rated_duration(&self) -> MediaTime {
        let st = lock(&self.state);
        st.rate.rated(st.duration)
    }

    fn set_rate(&mut self, rate: f64) {
        lock(&self.state).rate.set(rate);
    }
}

#[cfg(test)]
#[path = "../../tests/unit/source/asset_source.rs"]
mod tests;
