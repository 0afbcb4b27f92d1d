use crate::foundation::core::{Affine, Rect, Size};

/// Scale followed by a translation, applied to a source's native content before sampling.
///
/// Content is scaled by `(scale_x, scale_y)`; the render window then starts at
/// `(translate_x, translate_y)` in the scaled content.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct ScaleTransform {
    /// Horizontal scale.
    pub scale_x: f64,
    /// Vertical scale.
    pub scale_y: f64,
    /// Left edge of the render window in scaled content.
    pub translate_x: f64,
    /// Top edge of the render window in scaled content.
    pub translate_y: f64,
}

impl ScaleTransform {
    /// Uniform scale so `content` covers `render`, with the window centered.
    ///
    /// `None` when either size is degenerate or they are already equal.
    pub fn aspect_fill(content: Size, render: Size) -> Option<Self> {
        let positive = |s: Size| s.width > 0.0 && s.height > 0.0;
        if !positive(content) || !positive(render) || content == render {
            return None;
        }
        let scale = (render.width / content.width).max(render.height / content.height);
        Some(Self {
            scale_x: scale,
            scale_y: scale,
            translate_x: (content.width * scale - render.width) / 2.0,
            translate_y: (content.height * scale - render.height) / 2.0,
        })
    }

    /// `content` after scaling.
    pub fn scaled_size(self, content: Size) -> Size {
        Size::new(content.width * self.scale_x, content.height * self.scale_y)
    }

    /// Render window of size `render` in scaled content coordinates.
    pub fn window(self, render: Size) -> Rect {
        Rect::from_origin_size((self.translate_x, self.translate_y), render)
    }

    /// Map from native content coordinates to render coordinates.
    pub fn to_affine(self) -> Affine {
        Affine::new([
            self.scale_x,
            0.0,
            0.0,
            self.scale_y,
            -self.translate_x,
            -self.translate_y,
        ])
    }
}

/// Capability of sources that project their content through a [`ScaleTransform`].
pub trait ScaleTransformable {
    /// Active transform, if any.
    fn scale_transform(&self) -> Option<ScaleTransform>;
}
