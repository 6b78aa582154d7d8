//! Window + runtime loop.
//!
//! Owns the `winit` EventLoop and the single window, and wires them to the
//! canvas and GPU layer.

mod runtime;

pub use runtime::{Runtime, RuntimeConfig};
pub use winit::keyboard::KeyCode;
