use winit::event::WindowEvent;

use super::ctx::FrameCtx;

/// Control directive returned by app callbacks.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum AppControl {
    Continue,
    Exit,
}

/// Application contract implemented by drawing programs.
pub trait App {
    /// Called for every window event, after input state has been updated.
    fn on_window_event(&mut self, event: &WindowEvent) -> AppControl {
        let _ = event;
        AppControl::Continue
    }

    /// Called once per frame tick. Draw into `ctx.canvas`; the runtime presents
    /// it afterwards, redrawing only if the command buffer changed.
    fn on_frame(&mut self, ctx: &mut FrameCtx<'_>) -> AppControl;
}
