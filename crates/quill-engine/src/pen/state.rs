use crate::coords::Vec2;
use crate::paint::Color;

use super::buffer::CommandBuffer;
use super::record::PenRecord;
use super::shape::PenShape;

/// Default circle precision (sides ≈ precision · ln(e + radius)).
pub const DEFAULT_PRECISION: f64 = 9.0;

/// Current pen: position, look, and up/down.
///
/// Setters only change state; nothing reaches the [`CommandBuffer`] until the
/// next `move_to`, `stamp`, or `pen_up`.
#[derive(Debug, Clone)]
pub struct PenState {
    pos: Vec2,
    size: f64,
    color: Color,
    shape: PenShape,
    precision: f64,
    down: bool,
}

impl Default for PenState {
    fn default() -> Self {
        Self {
            pos: Vec2::zero(),
            size: 1.0,
            color: Color::BLACK,
            shape: PenShape::Circle,
            precision: DEFAULT_PRECISION,
            down: false,
        }
    }
}

impl PenState {
    pub fn new() -> Self {
        Self::default()
    }

    #[inline]
    pub fn pos(&self) -> Vec2 {
        self.pos
    }

    #[inline]
    pub fn is_down(&self) -> bool {
        self.down
    }

    #[inline]
    pub fn color(&self) -> Color {
        self.color
    }

    #[inline]
    pub fn shape(&self) -> PenShape {
        self.shape
    }

    #[inline]
    pub fn precision(&self) -> f64 {
        self.precision
    }

    /// Stored half-width.
    #[inline]
    pub fn size(&self) -> f64 {
        self.size
    }

    /// Full stroke width as passed to [`set_stroke_width`](Self::set_stroke_width).
    #[inline]
    pub fn stroke_width(&self) -> f64 {
        self.size * 2.0
    }

    pub fn set_color(&mut self, color: Color) {
        self.color = color;
    }

    pub fn set_stroke_width(&mut self, width: f64) {
        self.size = width * 0.5;
    }

    pub fn set_shape(&mut self, shape: PenShape) {
        self.shape = shape;
    }

    pub fn set_precision(&mut self, precision: f64) {
        self.precision = precision;
    }

    /// The record `move_to` would write at the current position.
    pub fn record(&self) -> PenRecord {
        PenRecord {
            pos: self.pos,
            size: self.size,
            color: self.color,
            shape: self.shape,
            precision: self.precision,
        }
    }

    /// Moves to `pos`; while down, records the new point (deduplicated).
    pub fn move_to(&mut self, pos: Vec2, buffer: &mut CommandBuffer) -> bool {
        self.pos = pos;
        self.stamp(buffer)
    }

    /// Records the current point without moving, if the pen is down.
    pub fn stamp(&self, buffer: &mut CommandBuffer) -> bool {
        self.down && buffer.push_record(&self.record())
    }

    /// Up→Down. Writes nothing; the next `move_to` starts the path.
    pub fn pen_down(&mut self) {
        self.down = true;
    }

    /// Down→Up. Terminates the current path with a lift marker when needed.
    pub fn pen_up(&mut self, buffer: &mut CommandBuffer) -> bool {
        if !self.down {
            return false;
        }
        self.down = false;
        buffer.push_lift()
    }
}
