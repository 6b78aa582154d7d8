//! Input subsystem.
//!
//! Public API is platform-agnostic. The winit backend in `platform` translates
//! window events into `InputEvent`s.

mod platform;
mod state;
mod types;

pub use state::InputState;
pub use platform::{key_id, translate_window_event};
pub use types::{ButtonState, InputEvent, KeyId, MouseButton};
