//! Time subsystem.
//!
//! - one `FrameClock` per render loop; `tick()` once per presented frame
//! - `FramePacer` decides when the next frame may start

mod frame_clock;
mod pacer;

pub use frame_clock::{FrameClock, FrameTime};
pub use pacer::{FramePacer, DEFAULT_TICK_RATE};
