use super::*;

const PROBE: &str = r#"{
  "streams": [
    {
      "index": 0,
      "codec_type": "video",
      "width": 1920,
      "height": 1080,
      "r_frame_rate": "30000/1001",
      "duration": "8.000000",
      "side_data_list": [{ "rotation": -90 }]
    },
    { "index": 1, "codec_type": "audio", "duration": "10.000000" },
    { "index": 2, "codec_type": "attachment" }
  ],
  "format": { "duration": "10.000000" }
}"#;

#[test]
fn probe_json_maps_streams_to_tracks() {
    let asset = FfprobeAsset::from_probe_json("clip.mp4", PROBE.as_bytes()).unwrap();
    assert!(asset.resolve(MetadataKey::Tracks).is_ok());
    assert_eq!(asset.duration(), MediaTime::new(10, 1));

    let video = asset.tracks(MediaType::Video);
    assert_eq!(video.len(), 1);
    assert_eq!(video[0].time_range.duration, MediaTime::new(8, 1));
    assert_eq!(video[0].natural_size, Size::new(1920.0, 1080.0));
    assert!((video[0].nominal_frame_rate - 29.97).abs() < 0.01);
    let shown = video[0].presentation_size();
    assert!((shown.width - 1080.0).abs() < 1e-6);
    assert!((shown.height - 1920.0).abs() < 1e-6);

    assert_eq!(asset.tracks(MediaType::Audio).len(), 1);
    assert_eq!(asset.source_path(), Path::new("clip.mp4"));
}

#[test]
fn probe_json_rejects_garbage() {
    let err = FfprobeAsset::from_probe_json("x", b"{").unwrap_err();
    assert!(matches!(err, SourceError::Decode(_)), "{err:?}");
}

#[test]
fn unresolved_asset_exposes_nothing() {
    let asset = FfprobeAsset::open("missing.mp4");
    assert_eq!(asset.duration(), MediaTime::ZERO);
    assert!(asset.tracks(MediaType::Video).is_empty());
}

#[cfg(not(feature = "media-ffmpeg"))]
#[test]
fn resolve_without_feature_fails() {
    let asset = FfprobeAsset::open("missing.mp4");
    let err = asset.resolve(MetadataKey::Tracks).unwrap_err();
    assert!(err.to_string().contains("media-ffmpeg"));
    assert!(err.to_string().contains("decode error"));
}

#[test]
fn ff_ratio_parsing() {
    assert_eq!(parse_ff_ratio("30/1"), Some((30, 1)));
    assert_eq!(parse_ff_ratio("0/0"), None);
    assert_eq!(parse_ff_ratio("abc"), None);
}
