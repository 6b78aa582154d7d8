use winit::event::{ElementState, MouseButton as WinitMouseButton, MouseScrollDelta, WindowEvent};
use winit::keyboard::{KeyCode, PhysicalKey};

use crate::input::{ButtonState, InputEvent, InputState, KeyId, MouseButton};

/// Pixel scroll distance treated as one wheel line.
const PIXELS_PER_LINE: f64 = 40.0;

/// Translates a winit `WindowEvent` into an engine `InputEvent`.
///
/// Returns `None` for events not represented by the input subsystem.
pub fn translate_window_event(event: &WindowEvent) -> Option<InputEvent> {
    match event {
        WindowEvent::Focused(f) => Some(InputEvent::Focused(*f)),

        WindowEvent::CursorLeft { .. } => Some(InputEvent::PointerLeft),

        WindowEvent::CursorMoved { position, .. } => Some(InputEvent::PointerMoved {
            x: position.x,
            y: position.y,
        }),

        WindowEvent::MouseInput { state, button, .. } => Some(InputEvent::PointerButton {
            button: map_mouse_button(*button),
            state: map_state(*state),
        }),

        WindowEvent::MouseWheel { delta, .. } => {
            let lines = match delta {
                MouseScrollDelta::LineDelta(_, y) => *y as f64,
                MouseScrollDelta::PixelDelta(p) => p.y / PIXELS_PER_LINE,
            };
            Some(InputEvent::MouseWheel { lines })
        }

        WindowEvent::KeyboardInput { event, .. } => {
            // NativeKeyCode has no stable numeric form; unidentified keys are dropped.
            let PhysicalKey::Code(code) = event.physical_key else {
                return None;
            };
            Some(InputEvent::Key {
                key: key_id(code),
                state: map_state(event.state),
                repeat: event.repeat,
            })
        }

        _ => None,
    }
}

/// Pressed-set code for a winit key.
#[inline]
pub fn key_id(code: KeyCode) -> KeyId {
    code as u32 as KeyId
}

impl InputState {
    /// `key_down` for a winit `KeyCode`.
    pub fn is_key_down(&self, code: KeyCode) -> bool {
        self.key_down(key_id(code))
    }
}

fn map_state(s: ElementState) -> ButtonState {
    match s {
        ElementState::Pressed => ButtonState::Pressed,
        ElementState::Released => ButtonState::Released,
    }
}

fn map_mouse_button(b: WinitMouseButton) -> MouseButton {
    match b {
        WinitMouseButton::Left => MouseButton::Left,
        WinitMouseButton::Right => MouseButton::Right,
        WinitMouseButton::Middle => MouseButton::Middle,
        WinitMouseButton::Back => MouseButton::Other(3),
        WinitMouseButton::Forward => MouseButton::Other(4),
        WinitMouseButton::Other(v) => MouseButton::Other(v),
    }
}
