//! Quill engine crate.
//!
//! A pen-driven 2D vector drawing engine: application code moves a pen, the
//! moves are recorded into a compact command buffer, and once per frame the
//! buffer is tessellated into filled polygons (only when it changed).

pub mod list;
pub mod pen;
pub mod change;
pub mod tess;
pub mod canvas;

pub mod device;
pub mod window;
pub mod input;
pub mod time;
pub mod core;

pub mod logging;
pub mod coords;
pub mod render;
pub mod paint;

pub use canvas::{Canvas, CanvasConfig, FrameOutcome};
pub use coords::Vec2;
pub use paint::Color;
pub use pen::PenShape;
