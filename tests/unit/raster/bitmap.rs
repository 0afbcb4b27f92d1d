use std::io::Cursor;

use super::*;
use crate::{foundation::core::Point, geometry::orientation::orientation_transform};

fn numbered(w: u32, h: u32) -> RgbaImage {
    RgbaImage::from_fn(w, h, |x, y| image::Rgba([x as u8, y as u8, (x * 10 + y) as u8, 255]))
}

#[test]
fn decode_png_round_trips_dimensions() {
    let mut buf = Vec::new();
    image::DynamicImage::ImageRgba8(numbered(3, 2))
        .write_to(&mut Cursor::new(&mut buf), image::ImageFormat::Png)
        .unwrap();

    let bmp = Bitmap::decode(&buf).unwrap();
    assert_eq!((bmp.pixel_width(), bmp.pixel_height()), (3, 2));
    assert_eq!(bmp.scale(), 1.0);
    assert_eq!(bmp.orientation(), Orientation::Up);
    assert!(Bitmap::decode(b"not an image").is_err());
}

#[test]
fn size_accounts_for_scale_and_orientation() {
    let bmp = Bitmap::from_rgba(numbered(40, 20)).with_scale(2.0);
    assert_eq!(bmp.size(), Size::new(20.0, 10.0));

    let turned = bmp.with_orientation(Orientation::Right);
    assert_eq!(turned.size(), Size::new(10.0, 20.0));

    let bad_scale = Bitmap::from_rgba(numbered(4, 4)).with_scale(0.0);
    assert_eq!(bad_scale.scale(), 1.0);
}

#[test]
fn upright_is_noop_for_up() {
    let bmp = Bitmap::from_rgba(numbered(3, 2));
    let up = bmp.upright();
    assert!(Bitmap::ptr_eq(&bmp, &up));
}

#[test]
fn upright_pixels_agree_with_orientation_transform() {
    let src = numbered(3, 2);
    for o in [
        Orientation::Down,
        Orientation::Left,
        Orientation::Right,
        Orientation::UpMirrored,
        Orientation::DownMirrored,
        Orientation::LeftMirrored,
        Orientation::RightMirrored,
    ] {
        let bmp = Bitmap::from_rgba(src.clone()).with_orientation(o);
        let up = bmp.upright();
        let (t, out) = orientation_transform(o, Size::new(3.0, 2.0));
        assert_eq!(up.orientation(), Orientation::Up);
        assert_eq!(
            (up.pixel_width(), up.pixel_height()),
            (out.width as u32, out.height as u32),
            "{o:?}"
        );
        assert_eq!(up.size(), bmp.size(), "{o:?}");

        for (x, y, px) in src.enumerate_pixels() {
            let p = t * Point::new(f64::from(x) + 0.5, f64::from(y) + 0.5);
            let (ux, uy) = (p.x.floor() as u32, p.y.floor() as u32);
            assert_eq!(up.pixels().get_pixel(ux, uy), px, "{o:?} at ({x},{y})");
        }
    }
}
