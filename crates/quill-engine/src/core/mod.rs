//! Core engine-facing contracts.
//!
//! The interface between the runtime loop and drawing programs.

mod app;
mod ctx;

pub use app::{App, AppControl};
pub use ctx::FrameCtx;
