//! Aspect-ratio preserving size fitting.

use crate::foundation::core::Size;

fn is_degenerate(size: Size) -> bool {
    !(size.width > 0.0 && size.height > 0.0)
}

/// Largest size with the aspect ratio of `size` that fits entirely inside `target`
/// (aspect-fit). Degenerate input is returned unchanged.
pub fn max_size_inside(size: Size, target: Size) -> Size {
    if is_degenerate(size) {
        return size;
    }
    let rate = (target.width / size.width).min(target.height / size.height);
    Size::new(size.width * rate, size.height * rate)
}

/// Smallest size with the aspect ratio of `size` that fully covers `target`
/// (aspect-fill). Degenerate input is returned unchanged.
pub fn min_size_covering(size: Size, target: Size) -> Size {
    if is_degenerate(size) {
        return size;
    }
    let rate = (target.width / size.width).max(target.height / size.height);
    Size::new(size.width * rate, size.height * rate)
}

/// Shrink `size` so it fits inside `bounds`, keeping its aspect ratio. Never grows.
pub(crate) fn shrink_to_fit(size: Size, bounds: Size) -> Size {
    let mut out = size;
    if out.width > bounds.width {
        out = Size::new(bounds.width, out.height / out.width * bounds.width);
    }
    if out.height > bounds.height {
        out = Size::new(out.width / out.height * bounds.height, bounds.height);
    }
    out
}

#[cfg(test)]
#[path = "../../tests/unit/geometry/size.rs"]
mod tests;
