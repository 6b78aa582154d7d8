//! Paint types.
//!
//! Pen colors are straight alpha in `f64`; the render layer converts to
//! premultiplied `f32` at upload time.

mod color;

pub use color::Color;
