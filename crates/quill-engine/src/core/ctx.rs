use crate::canvas::Canvas;
use crate::coords::Vec2;
use crate::input::InputState;
use crate::time::FrameTime;

/// Per-frame context passed to `core::App::on_frame`.
pub struct FrameCtx<'a> {
    pub canvas: &'a mut Canvas,
    /// Mutable so `mouse_wheel` can consume the accumulated scroll.
    pub input: &'a mut InputState,
    pub time: FrameTime,
    /// Drawable size in physical pixels.
    pub window_size: (u32, u32),
}

impl FrameCtx<'_> {
    /// Cursor position in world coordinates, if the cursor is over the window.
    pub fn pointer_world(&self) -> Option<Vec2> {
        self.input
            .pointer_world(&self.canvas.bounds(), self.window_size)
    }
}

#[cfg(test)]
mod tests {
    use std::time::Instant;

    use super::*;
    use crate::input::InputEvent;
    use crate::time::FrameClock;

    #[test]
    fn pointer_world_follows_canvas_bounds() {
        let mut canvas = Canvas::default();
        let mut input = InputState::new();
        input.apply_event(&InputEvent::PointerMoved { x: 640.0, y: 360.0 });

        let ctx = FrameCtx {
            canvas: &mut canvas,
            input: &mut input,
            time: FrameClock::starting_at(Instant::now()).tick(),
            window_size: (1280, 720),
        };
        assert_eq!(ctx.pointer_world(), Some(Vec2::zero()));
    }
}
