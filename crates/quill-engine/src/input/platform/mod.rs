//! Platform event translation.

mod winit;

pub use self::winit::{key_id, translate_window_event};
