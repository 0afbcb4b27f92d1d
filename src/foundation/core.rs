use crate::foundation::{
    error::{SourceError, SourceResult},
    time::{DEFAULT_TIMESCALE, MediaTime},
};

pub use kurbo::{Affine, Point, Rect, Size, Vec2};

/// Resampling filter used when bitmaps are resized.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ResizeFilter {
    /// Nearest neighbour.
    Nearest,
    /// Bilinear.
    #[default]
    Triangle,
    /// Bicubic (Catmull-Rom).
    CatmullRom,
    /// Lanczos with window 3.
    Lanczos3,
}

impl ResizeFilter {
    pub(crate) fn to_image_filter(self) -> image::imageops::FilterType {
        use image::imageops::FilterType;
        match self {
            Self::Nearest => FilterType::Nearest,
            Self::Triangle => FilterType::Triangle,
            Self::CatmullRom => FilterType::CatmullRom,
            Self::Lanczos3 => FilterType::Lanczos3,
        }
    }
}

/// Tunables shared by sources.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct SourceSettings {
    /// Duration synthesized for still images, in seconds.
    pub image_duration_secs: f64,
    /// Timescale used for synthesized durations.
    pub timescale: i32,
    /// Filter used by resize operations.
    pub resize_filter: ResizeFilter,
}

impl Default for SourceSettings {
    fn default() -> Self {
        Self {
            image_duration_secs: 3.0,
            timescale: DEFAULT_TIMESCALE,
            resize_filter: ResizeFilter::default(),
        }
    }
}

impl SourceSettings {
    /// Parse settings from JSON; missing fields take their defaults.
    pub fn from_json_str(json: &str) -> SourceResult<Self> {
        let settings: Self = serde_json::from_str(json)
            .map_err(|e| SourceError::validation(format!("invalid settings json: {e}")))?;
        settings.validate()?;
        Ok(settings)
    }

    /// Reject settings that cannot produce a usable timeline.
    pub fn validate(&self) -> SourceResult<()> {
        if self.timescale <= 0 {
            return Err(SourceError::validation("timescale must be > 0"));
        }
        if !self.image_duration_secs.is_finite() || self.image_duration_secs <= 0.0 {
            return Err(SourceError::validation(
                "image_duration_secs must be finite and > 0",
            ));
        }
        Ok(())
    }

    /// Still-image duration as a [`MediaTime`].
    pub fn image_duration(&self) -> MediaTime {
        MediaTime::from_seconds(self.image_duration_secs, self.timescale)
    }
}
