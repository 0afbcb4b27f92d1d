//! [`MediaAsset`] backed by `ffprobe` output.

use std::{
    path::{Path, PathBuf},
    sync::OnceLock,
};

use crate::{
    foundation::core::{Affine, Size},
    foundation::error::{MetadataKey, SourceError, SourceResult},
    foundation::time::{MediaTime, TimeRange},
    media::model::{MediaAsset, MediaType, Track},
};

/// Timescale used for times read from ffprobe.
const PROBE_TIMESCALE: i32 = 600;

#[derive(serde::Deserialize)]
struct ProbeStream {
    index: Option<u32>,
    codec_type: Option<String>,
    width: Option<u32>,
    height: Option<u32>,
    r_frame_rate: Option<String>,
    duration: Option<String>,
    #[serde(default)]
    side_data_list: Vec<ProbeSideData>,
}

#[derive(serde::Deserialize)]
struct ProbeSideData {
    rotation: Option<f64>,
}

#[derive(serde::Deserialize)]
struct ProbeFormat {
    duration: Option<String>,
}

#[derive(serde::Deserialize)]
struct ProbeOut {
    #[serde(default)]
    streams: Vec<ProbeStream>,
    format: Option<ProbeFormat>,
}

#[derive(Clone, Debug)]
struct ProbeInfo {
    duration: MediaTime,
    tracks: Vec<Track>,
}

/// Media file whose metadata is read with the system `ffprobe` binary on first resolve.
#[derive(Debug)]
pub struct FfprobeAsset {
    source_path: PathBuf,
    probe: OnceLock<Result<ProbeInfo, String>>,
}

impl FfprobeAsset {
    /// Refer to a media file; nothing is read until resolution.
    pub fn open(source_path: impl Into<PathBuf>) -> Self {
        Self {
            source_path: source_path.into(),
            probe: OnceLock::new(),
        }
    }

    /// Build an already-resolved asset from ffprobe JSON (`-show_streams -show_format`).
    pub fn from_probe_json(source_path: impl Into<PathBuf>, json: &[u8]) -> SourceResult<Self> {
        let info = parse_probe_json(json)?;
        let asset = Self::open(source_path);
        let _ = asset.probe.set(Ok(info));
        Ok(asset)
    }

    /// Path of the media file.
    pub fn source_path(&self) -> &Path {
        &self.source_path
    }

    fn info(&self) -> &Result<ProbeInfo, String> {
        self.probe.get_or_init(|| {
            tracing::debug!(path = %self.source_path.display(), "probing media");
            run_ffprobe(&self.source_path)
                .and_then(|bytes| parse_probe_json(&bytes))
                .map_err(|e| e.to_string())
        })
    }
}

impl MediaAsset for FfprobeAsset {
    fn duration(&self) -> MediaTime {
        match self.probe.get() {
            Some(Ok(info)) => info.duration,
            _ => MediaTime::ZERO,
        }
    }

    fn tracks(&self, media_type: MediaType) -> Vec<Track> {
        match self.probe.get() {
            Some(Ok(info)) => info
                .tracks
                .iter()
                .filter(|t| t.media_type == media_type)
                .cloned()
                .collect(),
            _ => Vec::new(),
        }
    }

    fn resolve(&self, key: MetadataKey) -> anyhow::Result<()> {
        match self.info() {
            Ok(_) => Ok(()),
            Err(msg) => Err(anyhow::anyhow!(
                "probe '{}' for {key}: {msg}",
                self.source_path.display()
            )),
        }
    }
}

#[cfg(feature = "media-ffmpeg")]
fn run_ffprobe(source_path: &Path) -> SourceResult<Vec<u8>> {
    let out = std::process::Command::new("ffprobe")
        .args([
            "-v",
            "error",
            "-print_format",
            "json",
            "-show_streams",
            "-show_format",
        ])
        .arg(source_path)
        .output()
        .map_err(|e| SourceError::decode(format!("failed to run ffprobe: {e}")))?;
    if !out.status.success() {
        return Err(SourceError::decode(format!(
            "ffprobe failed for '{}': {}",
            source_path.display(),
            String::from_utf8_lossy(&out.stderr).trim()
        )));
    }
    Ok(out.stdout)
}

#[cfg(not(feature = "media-ffmpeg"))]
fn run_ffprobe(_source_path: &Path) -> SourceResult<Vec<u8>> {
    Err(SourceError::decode(
        "media probing requires the 'media-ffmpeg' feature",
    ))
}

fn parse_probe_json(json: &[u8]) -> SourceResult<ProbeInfo> {
    let parsed: ProbeOut = serde_json::from_slice(json)
        .map_err(|e| SourceError::decode(format!("ffprobe json parse failed: {e}")))?;

    let container_secs = parsed
        .format
        .as_ref()
        .and_then(|f| parse_secs(f.duration.as_deref()))
        .unwrap_or(0.0);

    let mut tracks = Vec::new();
    for (i, s) in parsed.streams.iter().enumerate() {
        let media_type = match s.codec_type.as_deref() {
            Some("video") => MediaType::Video,
            Some("audio") => MediaType::Audio,
            Some("subtitle") => MediaType::Text,
            Some("data") => MediaType::Metadata,
            _ => continue,
        };
        let secs = parse_secs(s.duration.as_deref()).unwrap_or(container_secs);
        let natural_size = match (s.width, s.height) {
            (Some(w), Some(h)) => Size::new(f64::from(w), f64::from(h)),
            _ => Size::ZERO,
        };
        let rotation_deg = s
            .side_data_list
            .iter()
            .find_map(|d| d.rotation)
            .unwrap_or(0.0);
        let nominal_frame_rate = s
            .r_frame_rate
            .as_deref()
            .and_then(parse_ff_ratio)
            .map(|(num, den)| f64::from(num) / f64::from(den))
            .unwrap_or(0.0);

        tracks.push(Track {
            id: s.index.unwrap_or(i as u32),
            media_type,
            time_range: TimeRange::from_zero(MediaTime::from_seconds(secs, PROBE_TIMESCALE)),
            natural_size,
            preferred_transform: if rotation_deg == 0.0 {
                Affine::IDENTITY
            } else {
                Affine::rotate(rotation_deg.to_radians())
            },
            nominal_frame_rate,
        });
    }

    Ok(ProbeInfo {
        duration: MediaTime::from_seconds(container_secs, PROBE_TIMESCALE),
        tracks,
    })
}

fn parse_secs(s: Option<&str>) -> Option<f64> {
    s.and_then(|s| s.parse::<f64>().ok())
        .filter(|v| v.is_finite() && *v >= 0.0)
}

fn parse_ff_ratio(s: &str) -> Option<(u32, u32)> {
    let (num, den) = s.split_once('/')?;
    let num = num.trim().parse::<u32>().ok()?;
    let den = den.trim().parse::<u32>().ok()?;
    if den == 0 {
        return None;
    }
    Some((num, den))
}

#[cfg(test)]
#[path = "../../tests/unit/media/ffprobe.rs"]
mod tests;
