/// Platform key code as stored in the pressed set.
///
/// On the winit backend this is the `KeyCode` discriminant.
pub type KeyId = i32;

#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum ButtonState {
    Pressed,
    Released,
}

/// Mouse button identifier.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
pub enum MouseButton {
    Left,
    Right,
    Middle,
    Other(u16),
}

impl MouseButton {
    /// Name stored in the pressed set (`m1`, `m2`, `m3`); other buttons are not tracked.
    pub const fn tag(self) -> Option<&'static str> {
        match self {
            MouseButton::Left => Some("m1"),
            MouseButton::Right => Some("m2"),
            MouseButton::Middle => Some("m3"),
            MouseButton::Other(_) => None,
        }
    }
}

/// Platform-agnostic input event.
#[derive(Debug, Clone, PartialEq)]
pub enum InputEvent {
    Focused(bool),

    /// Cursor position in physical pixels, origin top-left.
    PointerMoved { x: f64, y: f64 },

    PointerLeft,

    PointerButton { button: MouseButton, state: ButtonState },

    Key { key: KeyId, state: ButtonState, repeat: bool },

    /// Vertical scroll in lines; positive is away from the user.
    MouseWheel { lines: f64 },
}
