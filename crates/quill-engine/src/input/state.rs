use crate::coords::Vec2;
use crate::list::{TaggedList, TaggedValue};
use crate::tess::WorldBounds;

use super::types::{ButtonState, InputEvent, KeyId, MouseButton};

/// Current input state for the window.
///
/// Held keys (`I32` code) and mouse buttons (`Str` tag) share one
/// [`TaggedList`]. Events are applied at a single point per frame, before the
/// application runs.
#[derive(Debug, Default)]
pub struct InputState {
    pressed: TaggedList,

    /// Whether the window is focused.
    pub focused: bool,

    /// Pointer position in physical pixels.
    pointer: Option<Vec2>,

    wheel: f64,
}

impl InputState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn apply_event(&mut self, ev: &InputEvent) {
        match *ev {
            InputEvent::Focused(f) => {
                self.focused = f;
                if !f {
                    // Avoids stuck keys/buttons when focus changes mid-press.
                    self.pressed.clear();
                }
            }

            InputEvent::PointerMoved { x, y } => {
                self.pointer = Some(Vec2::new(x, y));
            }

            InputEvent::PointerLeft => {
                self.pointer = None;
            }

            InputEvent::Key { key, state, .. } => self.set_held(TaggedValue::I32(key), state),

            InputEvent::PointerButton { button, state } => {
                if let Some(tag) = button.tag() {
                    self.set_held(TaggedValue::from(tag), state);
                }
            }

            InputEvent::MouseWheel { lines } => {
                self.wheel += lines;
            }
        }
    }

    fn set_held(&mut self, value: TaggedValue, state: ButtonState) {
        match state {
            ButtonState::Pressed if !self.pressed.contains(&value) => self.pressed.push(value),
            ButtonState::Pressed => {}
            ButtonState::Released => {
                self.pressed.remove(&value);
            }
        }
    }

    /// Held keys and buttons, in press order.
    pub fn pressed(&self) -> &TaggedList {
        &self.pressed
    }

    pub fn key_down(&self, key: KeyId) -> bool {
        self.pressed.contains(&TaggedValue::I32(key))
    }

    pub fn button_down(&self, button: MouseButton) -> bool {
        button
            .tag()
            .is_some_and(|tag| self.pressed.contains(&TaggedValue::from(tag)))
    }

    /// Left button held.
    pub fn mouse_down(&self) -> bool {
        self.button_down(MouseButton::Left)
    }

    pub fn mouse_right(&self) -> bool {
        self.button_down(MouseButton::Right)
    }

    pub fn mouse_middle(&self) -> bool {
        self.button_down(MouseButton::Middle)
    }

    /// Scroll accumulated since the last call, then resets it to zero.
    pub fn mouse_wheel(&mut self) -> f64 {
        std::mem::take(&mut self.wheel)
    }

    pub fn pointer(&self) -> Option<Vec2> {
        self.pointer
    }

    /// Pointer in world coordinates for a window of `window` physical pixels.
    pub fn pointer_world(&self, bounds: &WorldBounds, window: (u32, u32)) -> Option<Vec2> {
        self.pointer.map(|p| bounds.screen_to_world(p, window))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn key(key: KeyId, state: ButtonState) -> InputEvent {
        InputEvent::Key { key, state, repeat: false }
    }

    fn button(button: MouseButton, state: ButtonState) -> InputEvent {
        InputEvent::PointerButton { button, state }
    }

    // ── keys and buttons ──────────────────────────────────────────────────

    #[test]
    fn key_press_and_release() {
        let mut input = InputState::new();
        input.apply_event(&key(32, ButtonState::Pressed));
        assert!(input.key_down(32));
        input.apply_event(&key(32, ButtonState::Released));
        assert!(!input.key_down(32));
    }

    #[test]
    fn repeated_press_is_stored_once() {
        let mut input = InputState::new();
        input.apply_event(&key(65, ButtonState::Pressed));
        input.apply_event(&key(65, ButtonState::Pressed));
        assert_eq!(input.pressed().count(&TaggedValue::I32(65)), 1);
    }

    #[test]
    fn buttons_are_stored_by_name() {
        let mut input = InputState::new();
        input.apply_event(&button(MouseButton::Left, ButtonState::Pressed));
        input.apply_event(&button(MouseButton::Middle, ButtonState::Pressed));

        assert!(input.mouse_down());
        assert!(input.mouse_middle());
        assert!(!input.mouse_right());
        assert_eq!(input.pressed().to_string(), "[m1, m3]");
    }

    #[test]
    fn key_codes_and_button_names_do_not_collide() {
        let mut input = InputState::new();
        input.apply_event(&key(1, ButtonState::Pressed));
        input.apply_event(&button(MouseButton::Left, ButtonState::Released));
        assert!(input.key_down(1));
        assert!(!input.mouse_down());
    }

    #[test]
    fn untracked_buttons_are_ignored() {
        let mut input = InputState::new();
        input.apply_event(&button(MouseButton::Other(7), ButtonState::Pressed));
        assert!(input.pressed().is_empty());
    }

    #[test]
    fn focus_loss_releases_everything() {
        let mut input = InputState::new();
        input.apply_event(&key(10, ButtonState::Pressed));
        input.apply_event(&button(MouseButton::Right, ButtonState::Pressed));
        input.apply_event(&InputEvent::Focused(false));
        assert!(input.pressed().is_empty());
        assert!(!input.focused);
    }

    // ── wheel and pointer ─────────────────────────────────────────────────

    #[test]
    fn wheel_is_read_and_reset() {
        let mut input = InputState::new();
        input.apply_event(&InputEvent::MouseWheel { lines: 1.0 });
        input.apply_event(&InputEvent::MouseWheel { lines: 2.0 });
        assert_eq!(input.mouse_wheel(), 3.0);
        assert_eq!(input.mouse_wheel(), 0.0);
    }

    #[test]
    fn pointer_maps_into_world() {
        let mut input = InputState::new();
        assert_eq!(input.pointer_world(&WorldBounds::default(), (640, 360)), None);

        input.apply_event(&InputEvent::PointerMoved { x: 320.0, y: 0.0 });
        assert_eq!(
            input.pointer_world(&WorldBounds::default(), (640, 360)),
            Some(Vec2::new(0.0, 180.0))
        );

        input.apply_event(&InputEvent::PointerLeft);
        assert_eq!(input.pointer(), None);
    }
}
