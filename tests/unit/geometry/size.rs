use super::*;

fn assert_close(a: f64, b: f64) {
    assert!((a - b).abs() < 1e-9, "{a} != {b}");
}

#[test]
fn max_size_inside_fits_and_keeps_aspect() {
    let cases = [
        (Size::new(1000.0, 500.0), Size::new(200.0, 200.0)),
        (Size::new(300.0, 900.0), Size::new(1920.0, 1080.0)),
        (Size::new(640.0, 480.0), Size::new(640.0, 480.0)),
        (Size::new(7.0, 3.0), Size::new(11.0, 13.0)),
    ];
    for (s, t) in cases {
        let r = max_size_inside(s, t);
        assert_close(s.width / s.height, r.width / r.height);
        assert!(r.width <= t.width + 1e-9 && r.height <= t.height + 1e-9);
        assert!((r.width - t.width).abs() < 1e-9 || (r.height - t.height).abs() < 1e-9);
    }
}

#[test]
fn min_size_covering_covers_and_keeps_aspect() {
    let cases = [
        (Size::new(1000.0, 500.0), Size::new(200.0, 200.0)),
        (Size::new(300.0, 900.0), Size::new(1920.0, 1080.0)),
        (Size::new(7.0, 3.0), Size::new(11.0, 13.0)),
    ];
    for (s, t) in cases {
        let r = min_size_covering(s, t);
        assert_close(s.width / s.height, r.width / r.height);
        assert!(r.width >= t.width - 1e-9 && r.height >= t.height - 1e-9);
        assert!((r.width - t.width).abs() < 1e-9 || (r.height - t.height).abs() < 1e-9);
    }
}

#[test]
fn aspect_fill_example() {
    let r = min_size_covering(Size::new(1000.0, 500.0), Size::new(200.0, 200.0));
    assert_close(r.width, 400.0);
    assert_close(r.height, 200.0);
}

#[test]
fn degenerate_sizes_pass_through() {
    let t = Size::new(100.0, 100.0);
    for s in [Size::new(0.0, 10.0), Size::new(10.0, 0.0), Size::ZERO] {
        assert_eq!(max_size_inside(s, t), s);
        assert_eq!(min_size_covering(s, t), s);
    }
}

#[test]
fn shrink_to_fit_never_grows() {
    assert_eq!(
        shrink_to_fit(Size::new(10.0, 10.0), Size::new(100.0, 100.0)),
        Size::new(10.0, 10.0)
    );
    let r = shrink_to_fit(Size::new(400.0, 100.0), Size::new(200.0, 200.0));
    assert_close(r.width, 200.0);
    assert_close(r.height, 50.0);
    let r = shrink_to_fit(Size::new(100.0, 400.0), Size::new(200.0, 200.0));
    assert_close(r.width, 50.0);
    assert_close(r.height, 200.0);
}
