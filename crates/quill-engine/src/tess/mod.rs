//! Command buffer replay into filled polygons.

mod sink;
mod tessellator;
mod transform;

pub use sink::{PrimitiveKind, PrimitiveSink, RecordedPolygon, RecordingSink};
pub use tessellator::{circle_sides, ReplayStats, Tessellator, NEAR_EPSILON};
pub use transform::WorldBounds;
