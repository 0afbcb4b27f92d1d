use super::*;

#[test]
fn equality_compares_rational_value() {
    assert_eq!(MediaTime::new(1, 2), MediaTime::new(300, 600));
    assert!(MediaTime::new(1, 3) < MediaTime::new(201, 600));
    assert_eq!(
        MediaTime::new(8, 1).min(MediaTime::new(6000, 600)),
        MediaTime::new(8, 1)
    );
}

#[test]
fn from_seconds_rounds_to_tick() {
    let t = MediaTime::from_seconds(3.0, 600);
    assert_eq!(t.value, 1800);
    let t = MediaTime::from_seconds(0.0017, 600);
    assert_eq!(t.value, 1);
}

#[test]
fn mul_f64_keeps_timescale() {
    let t = MediaTime::new(1800, 600).mul_f64(0.5);
    assert_eq!(t.value, 900);
    assert_eq!(t.timescale, 600);
}

#[test]
fn invalid_timescale_reads_as_zero_seconds() {
    assert_eq!(MediaTime::new(10, 0).seconds(), 0.0);
    assert!(!MediaTime::new(10, 0).is_valid());
}

#[test]
fn range_contains_is_half_open() {
    let r = TimeRange::new(MediaTime::new(1, 1), MediaTime::new(2, 1));
    assert!(!r.contains(MediaTime::new(0, 1)));
    assert!(r.contains(MediaTime::new(1, 1)));
    assert!(r.contains(MediaTime::new(1799, 600)));
    assert!(!r.contains(MediaTime::new(3, 1)));
    assert_eq!(r.end(), MediaTime::new(3, 1));
}

#[test]
fn clamp_to_trims_overhang() {
    let r = TimeRange::from_zero(MediaTime::new(10, 1));
    let clamped = r.clamp_to(MediaTime::new(8, 1));
    assert_eq!(clamped.start, MediaTime::ZERO);
    assert_eq!(clamped.duration, MediaTime::new(8, 1));

    let inside = TimeRange::new(MediaTime::new(1, 1), MediaTime::new(2, 1));
    assert_eq!(inside.clamp_to(MediaTime::new(8, 1)), inside);

    let past = TimeRange::new(MediaTime::new(9, 1), MediaTime::new(1, 1));
    let clamped = past.clamp_to(MediaTime::new(8, 1));
    assert_eq!(clamped.start, MediaTime::new(8, 1));
    assert_eq!(clamped.duration, MediaTime::ZERO);
}
