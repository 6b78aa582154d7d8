//! GPU rendering.
//!
//! The tessellator hands over polygons already in NDC, so the single
//! renderer needs no viewport uniform.

mod ctx;
mod polygon;

pub use ctx::{RenderCtx, RenderTarget};
pub use polygon::{PolygonBatch, PolygonRenderer, PolygonVertex};
