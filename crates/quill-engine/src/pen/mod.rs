//! Pen state and the command buffer it writes.
//!
//! Encoding (one stride = 9 tagged slots):
//! - pen record: `[x, y, size, r, g, b, a, shape, precision]`, shape as `I16`, the rest `F64`
//! - lift marker: nine `Char(0)` slots
//! - batched triangle/quad: two strides with shape code 66/67 (see [`BatchedPrimitive`])

mod buffer;
mod decode;
mod error;
mod record;
mod shape;
mod state;

pub use buffer::CommandBuffer;
pub use decode::{Command, Commands};
pub use error::{DecodeError, ShapeParseError};
pub use record::{BatchedPrimitive, PenRecord, STRIDE};
pub use shape::{PenShape, BATCH_QUAD_CODE, BATCH_TRIANGLE_CODE};
pub use state::{PenState, DEFAULT_PRECISION};
