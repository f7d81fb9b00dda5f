mod color;
mod geom;

pub use color::Color;
pub(crate) use color::blend_rgb;
pub use geom::Rect;
