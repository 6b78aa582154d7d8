use crate::coords::Vec2;
use crate::paint::Color;

/// What a submitted polygon represents.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
pub enum PrimitiveKind {
    /// Circle pen dot, stroke cap, or isolated stroke point.
    Circle,
    Square,
    Triangle,
    /// Batched quad.
    Quad,
    /// Thick-line quad between two stroke points.
    Segment,
    /// Fill between two segments (bevel triangle or collapsed-run circle).
    Joint,
}

/// Receives filled polygons from the tessellator.
///
/// Points are already in normalised device coordinates. Each polygon is convex
/// and uses the colour of the most recent `set_color` call.
pub trait PrimitiveSink {
    fn begin_frame(&mut self, clear: Color);

    fn set_color(&mut self, color: Color);

    fn fill_polygon(&mut self, kind: PrimitiveKind, points: &[Vec2]);

    fn end_frame(&mut self) {}
}

/// One polygon captured by [`RecordingSink`].
#[derive(Debug, Clone, PartialEq)]
pub struct RecordedPolygon {
    pub kind: PrimitiveKind,
    pub color: Color,
    pub points: Vec<Vec2>,
}

/// Headless sink that keeps the last frame in memory.
#[derive(Debug, Default, Clone)]
pub struct RecordingSink {
    /// Number of `begin_frame` calls since construction.
    pub frames: usize,
    pub clear_color: Option<Color>,
    /// Every `set_color` call of the current frame, in order.
    pub color_changes: Vec<Color>,
    pub polygons: Vec<RecordedPolygon>,
    current: Color,
}

impl RecordingSink {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn count(&self, kind: PrimitiveKind) -> usize {
        self.polygons.iter().filter(|p| p.kind == kind).count()
    }

    pub fn of_kind(&self, kind: PrimitiveKind) -> impl Iterator<Item = &RecordedPolygon> {
        self.polygons.iter().filter(move |p| p.kind == kind)
    }
}

impl PrimitiveSink for RecordingSink {
    fn begin_frame(&mut self, clear: Color) {
        self.frames += 1;
        self.clear_color = Some(clear);
        self.color_changes.clear();
        self.polygons.clear();
    }

    fn set_color(&mut self, color: Color) {
        self.current = color;
        self.color_changes.push(color);
    }

    fn fill_polygon(&mut self, kind: PrimitiveKind, points: &[Vec2]) {
        self.polygons.push(RecordedPolygon {
            kind,
            color: self.current,
            points: points.to_vec(),
        });
    }
}
