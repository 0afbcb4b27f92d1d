use std::{collections::HashMap, fmt};

use crate::{
    foundation::core::{Affine, Size},
    foundation::error::MetadataKey,
    foundation::time::{MediaTime, TimeRange},
};

/// Kind of media carried by a track.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MediaType {
    /// Picture track.
    Video,
    /// Sound track.
    Audio,
    /// Subtitles / captions.
    Text,
    /// Timed metadata.
    Metadata,
}

/// One decodable track of a media asset.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct Track {
    /// Track identifier, unique within its asset.
    pub id: u32,
    /// Media kind.
    pub media_type: MediaType,
    /// Span of the track on the asset timeline.
    pub time_range: TimeRange,
    /// Encoded frame size (zero for non-visual tracks).
    pub natural_size: Size,
    /// Transform to apply to frames for display.
    pub preferred_transform: Affine,
    /// Frames per second (zero when unknown or non-visual).
    pub nominal_frame_rate: f64,
}

impl Track {
    /// Video track starting at zero.
    pub fn video(id: u32, duration: MediaTime, natural_size: Size) -> Self {
        Self {
            id,
            media_type: MediaType::Video,
            time_range: TimeRange::from_zero(duration),
            natural_size,
            preferred_transform: Affine::IDENTITY,
            nominal_frame_rate: 0.0,
        }
    }

    /// Audio track starting at zero.
    pub fn audio(id: u32, duration: MediaTime) -> Self {
        Self {
            id,
            media_type: MediaType::Audio,
            time_range: TimeRange::from_zero(duration),
            natural_size: Size::ZERO,
            preferred_transform: Affine::IDENTITY,
            nominal_frame_rate: 0.0,
        }
    }

    /// Replace the display transform.
    pub fn with_preferred_transform(mut self, transform: Affine) -> Self {
        self.preferred_transform = transform;
        self
    }

    /// Natural size with the linear part of the preferred transform applied, as absolute
    /// values.
    pub fn presentation_size(&self) -> Size {
        let [a, b, c, d, _, _] = self.preferred_transform.as_coeffs();
        let (w, h) = (self.natural_size.width, self.natural_size.height);
        Size::new((a * w + c * h).abs(), (b * w + d * h).abs())
    }
}

/// Opaque handle to a decoded media container.
///
/// Metadata may be lazy: [`MediaAsset::resolve`] blocks until `key` is available and is
/// called off the owning thread.
pub trait MediaAsset: Send + Sync + fmt::Debug {
    /// Nominal container duration.
    fn duration(&self) -> MediaTime;

    /// Tracks of `media_type`, in container order.
    fn tracks(&self, media_type: MediaType) -> Vec<Track>;

    /// Make `key` available, or report why it cannot be.
    fn resolve(&self, key: MetadataKey) -> anyhow::Result<()>;
}

/// In-memory [`MediaAsset`] with fully known metadata.
#[derive(Clone, Debug, Default)]
pub struct StaticAsset {
    duration: MediaTime,
    tracks: Vec<Track>,
    failures: HashMap<MetadataKey, String>,
}

impl StaticAsset {
    /// Start describing an asset.
    pub fn builder() -> StaticAssetBuilder {
        StaticAssetBuilder::default()
    }
}

impl MediaAsset for StaticAsset {
    fn duration(&self) -> MediaTime {
        self.duration
    }

    fn tracks(&self, media_type: MediaType) -> Vec<Track> {
        self.tracks
            .iter()
            .filter(|t| t.media_type == media_type)
            .cloned()
            .collect()
    }

    fn resolve(&self, key: MetadataKey) -> anyhow::Result<()> {
        match self.failures.get(&key) {
            Some(msg) => Err(anyhow::anyhow!("{msg}")),
            None => Ok(()),
        }
    }
}

/// Builder for [`StaticAsset`].
#[derive(Clone, Debug, Default)]
pub struct StaticAssetBuilder {
    inner: StaticAsset,
}

impl StaticAssetBuilder {
    /// Container duration.
    pub fn duration(mut self, duration: MediaTime) -> Self {
        self.inner.duration = duration;
        self
    }

    /// Append a track.
    pub fn track(mut self, track: Track) -> Self {
        self.inner.tracks.push(track);
        self
    }

    /// Make resolution of `key` fail with `msg`.
    pub fn fail(mut self, key: MetadataKey, msg: impl Into<String>) -> Self {
        self.inner.failures.insert(key, msg.into());
        self
    }

    /// Finish.
    pub fn build(self) -> StaticAsset {
        self.inner
    }
}

#[cfg(test)]
#[path = "../../tests/unit/media/model.rs"]
mod tests;
