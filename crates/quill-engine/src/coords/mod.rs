//! Coordinate types shared by the pen, the tessellator and the renderer.
//!
//! Canonical CPU space:
//! - world units as configured by `tess::WorldBounds`
//! - +X right, +Y up
//!
//! The tessellator maps world points into NDC before they reach a `PrimitiveSink`.

mod vec2;

pub use vec2::Vec2;
