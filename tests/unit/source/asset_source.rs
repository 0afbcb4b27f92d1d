use std::{
    sync::atomic::{AtomicUsize, Ordering},
    time::Duration,
};

use super::*;
use crate::{media::model::StaticAsset, source::dispatch::CompletionQueue};

fn secs(s: i64) -> MediaTime {
    MediaTime::new(s * 600, 600)
}

fn clip_asset() -> Arc<StaticAsset> {
    Arc::new(
        StaticAsset::builder()
            .duration(secs(10))
            .track(Track::video(1, secs(8), Size::new(1280.0, 720.0)))
            .track(Track::audio(2, secs(10)))
            .build(),
    )
}

/// Load `source` and block until its completion has run on the calling thread.
fn load_blocking(source: &mut AssetSource) -> (SourceResult<()>, usize) {
    let queue = Arc::new(CompletionQueue::new());
    let calls = Arc::new(AtomicUsize::new(0));
    let out = Arc::new(Mutex::new(None));

    let (c, o) = (Arc::clone(&calls), Arc::clone(&out));
    source.load(
        queue.clone(),
        Box::new(move |res| {
            c.fetch_add(1, Ordering::SeqCst);
            *o.lock().unwrap() = Some(res);
        }),
    );
    assert!(queue.run_next(Duration::from_secs(10)), "completion never arrived");
    // Nothing else may follow the terminal completion.
    assert!(!queue.run_next(Duration::from_millis(50)));

    let res = out.lock().unwrap().take().unwrap();
    (res, calls.load(Ordering::SeqCst))
}

#[test]
fn construction_seeds_nominal_duration() {
    let source = AssetSource::new(clip_asset());
    assert_eq!(source.duration(), secs(10));
    assert_eq!(source.selected_time_range(), TimeRange::from_zero(secs(10)));
    assert!(matches!(source.status(), LoadStatus::Unloaded));
    assert!(!source.is_loaded());
}

#[test]
fn load_corrects_duration_to_video_track() {
    let mut source = AssetSource::new(clip_asset());
    let (res, calls) = load_blocking(&mut source);
    assert!(res.is_ok());
    assert_eq!(calls, 1);
    assert_eq!(source.duration(), secs(8));
    assert_eq!(source.selected_time_range(), TimeRange::from_zero(secs(8)));
    assert!(source.status().is_usable());
    assert!(source.is_loaded());
}

#[test]
fn load_without_video_keeps_container_duration() {
    let asset = StaticAsset::builder()
        .duration(secs(4))
        .track(Track::audio(1, secs(4)))
        .build();
    let mut source = AssetSource::new(Arc::new(asset));
    let (res, _) = load_blocking(&mut source);
    assert!(res.is_ok());
    assert_eq!(source.duration(), secs(4));
    assert!(!source.can_be_converted_to_video());
}

#[test]
fn missing_asset_fails_and_marks_finished() {
    let mut source = AssetSource::empty();
    let (res, calls) = load_blocking(&mut source);
    assert!(matches!(
        res,
        Err(SourceError::ResourceMissing(ResourceKind::Asset))
    ));
    assert_eq!(calls, 1);
    assert!(source.is_loaded());
    assert!(!source.status().is_usable());
    assert!(source.status().error().is_some());
    assert!(source.tracks(MediaType::Video).is_empty());
}

#[test]
fn both_metadata_failures_yield_one_completion() {
    let asset = StaticAsset::builder()
        .duration(secs(10))
        .fail(MetadataKey::Tracks, "no moov atom")
        .fail(MetadataKey::Duration, "no duration")
        .build();
    let mut source = AssetSource::new(Arc::new(asset));
    let (res, calls) = load_blocking(&mut source);
    assert_eq!(calls, 1);
    match res {
        Err(SourceError::MetadataResolutionFailed { key, cause }) => {
            assert_eq!(key, MetadataKey::Tracks);
            assert!(cause.to_string().contains("no moov atom"));
        }
        other => panic!("unexpected result: {other:?}"),
    }
    assert!(matches!(source.status(), LoadStatus::Failed(_)));
    // The tentative duration survives a failed load.
    assert_eq!(source.duration(), secs(10));
}

#[test]
fn mute_hides_audio_only() {
    let mut source = AssetSource::new(clip_asset());
    assert_eq!(source.tracks(MediaType::Audio).len(), 1);

    source.set_muted(true);
    assert!(source.is_muted());
    assert!(source.tracks(MediaType::Audio).is_empty());
    assert_eq!(source.tracks(MediaType::Video).len(), 1);
    // The asset still reports its audio.
    assert_eq!(
        source.asset().unwrap().tracks(MediaType::Audio).len(),
        1
    );

    source.set_muted(false);
    assert_eq!(source.tracks(MediaType::Audio).len(), 1);
}

#[test]
fn rate_scales_duration_and_follows_duration_changes() {
    let mut source = AssetSource::new(clip_asset());
    assert_eq!(source.rate(), 1.0);
    assert_eq!(source.rated_duration(), secs(10));

    source.set_rate(2.0);
    assert_eq!(source.rated_duration(), secs(5));

    source.set_rate(0.0);
    source.set_rate(-3.0);
    assert_eq!(source.rate(), 2.0);
    assert_eq!(source.rated_duration(), secs(5));

    source.set_duration(secs(8));
    assert_eq!(source.rated_duration(), secs(4));

    let rateable = source.as_rateable_mut().unwrap();
    rateable.set_rate(4.0);
    assert_eq!(source.as_rateable().unwrap().rated_duration(), secs(2));
}

#[test]
fn shrinking_duration_clamps_selection() {
    let mut source = AssetSource::new(clip_asset());
    source.set_selected_time_range(TimeRange::new(secs(2), secs(6)));
    source.set_duration(secs(5));
    assert_eq!(
        source.selected_time_range(),
        TimeRange::new(secs(2), secs(3))
    );
}

#[test]
fn presentation_size_uses_first_video_track() {
    let source = AssetSource::new(clip_asset());
    assert_eq!(source.presentation_size(), Some(Size::new(1280.0, 720.0)));
    assert!(source.can_be_converted_to_video());
    assert_eq!(AssetSource::empty().presentation_size(), None);
}

#[test]
fn default_texture_is_none() {
    let mut source = AssetSource::new(clip_asset());
    assert!(source.texture(MediaTime::ZERO).is_none());
    assert!(source.as_scale_transformable().is_none());
}
