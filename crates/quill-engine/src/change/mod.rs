//! Redraw-if-dirty policy for the command buffer.

mod detector;

pub use detector::{ChangeDetector, Fingerprint};
