//! Orientation tags and the transforms that normalize them to upright pixels.

use crate::foundation::core::{Affine, Size};

/// How stored pixels must be transformed to display upright.
///
/// Four rotations, each optionally mirrored. Names describe the stored image relative to
/// an upright one; `Right` means the stored pixels need a 90 degree clockwise turn.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Orientation {
    /// Already upright.
    #[default]
    Up,
    /// Rotated 180 degrees.
    Down,
    /// Needs a 90 degree counter-clockwise turn.
    Left,
    /// Needs a 90 degree clockwise turn.
    Right,
    /// Mirrored horizontally.
    UpMirrored,
    /// Mirrored vertically.
    DownMirrored,
    /// Transposed (mirrored across the main diagonal).
    LeftMirrored,
    /// Transversed (mirrored across the anti-diagonal).
    RightMirrored,
}

impl Orientation {
    /// Map an EXIF orientation tag (1..=8) to an [`Orientation`].
    pub fn from_exif(tag: u8) -> Option<Self> {
        Some(match tag {
            1 => Self::Up,
            2 => Self::UpMirrored,
            3 => Self::Down,
            4 => Self::DownMirrored,
            5 => Self::LeftMirrored,
            6 => Self::Right,
            7 => Self::RightMirrored,
            8 => Self::Left,
            _ => return None,
        })
    }

    /// Whether the orientation includes a mirror.
    pub fn is_mirrored(self) -> bool {
        matches!(
            self,
            Self::UpMirrored | Self::DownMirrored | Self::LeftMirrored | Self::RightMirrored
        )
    }

    /// Whether the upright image swaps width and height.
    pub fn swaps_axes(self) -> bool {
        matches!(
            self,
            Self::Left | Self::Right | Self::LeftMirrored | Self::RightMirrored
        )
    }
}

/// Affine transform mapping stored pixel coordinates (y-down) to upright coordinates, and the
/// upright canvas size, for a stored bitmap of `pixel_size`.
pub fn orientation_transform(orientation: Orientation, pixel_size: Size) -> (Affine, Size) {
    let (w, h) = (pixel_size.width, pixel_size.height);
    let coeffs = match orientation {
        Orientation::Up => return (Affine::IDENTITY, pixel_size),
        Orientation::Down => [-1.0, 0.0, 0.0, -1.0, w, h],
        Orientation::Right => [0.0, 1.0, -1.0, 0.0, h, 0.0],
        Orientation::Left => [0.0, -1.0, 1.0, 0.0, 0.0, w],
        Orientation::UpMirrored => [-1.0, 0.0, 0.0, 1.0, w, 0.0],
        Orientation::DownMirrored => [1.0, 0.0, 0.0, -1.0, 0.0, h],
        Orientation::LeftMirrored => [0.0, 1.0, 1.0, 0.0, 0.0, 0.0],
        Orientation::RightMirrored => [0.0, -1.0, -1.0, 0.0, h, w],
    };
    let out = if orientation.swaps_axes() {
        Size::new(h, w)
    } else {
        pixel_size
    };
    (Affine::new(coeffs), out)
}

#[cfg(test)]
#[path = "../../tests/unit/geometry/orientation.rs"]
mod tests;
