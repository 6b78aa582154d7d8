//! Drawing context.
//!
//! `Canvas` owns the pen, the frame's command buffer, the change detector and
//! the tessellator. Application code draws through it; the runtime calls
//! [`Canvas::present`] once per frame.

use log::{trace, warn};

use crate::change::ChangeDetector;
use crate::coords::Vec2;
use crate::paint::Color;
use crate::pen::{BatchedPrimitive, CommandBuffer, PenShape, PenState, ShapeParseError, DEFAULT_PRECISION};
use crate::tess::{PrimitiveSink, ReplayStats, Tessellator, WorldBounds};

/// Canvas configuration.
#[derive(Debug, Clone)]
pub struct CanvasConfig {
    pub bounds: WorldBounds,
    pub clear_color: Color,
    pub precision: f64,
    /// Full stroke width; the pen stores half of it.
    pub stroke_width: f64,
    pub color: Color,
    pub shape: PenShape,
}

impl Default for CanvasConfig {
    fn default() -> Self {
        Self {
            bounds: WorldBounds::default(),
            clear_color: Color::WHITE,
            precision: DEFAULT_PRECISION,
            stroke_width: 2.0,
            color: Color::BLACK,
            shape: PenShape::Circle,
        }
    }
}

impl CanvasConfig {
    pub fn with_bounds(mut self, min: Vec2, max: Vec2) -> Self {
        self.bounds = WorldBounds::new(min, max);
        self
    }

    pub fn with_clear_color(mut self, color: Color) -> Self {
        self.clear_color = color;
        self
    }

    pub fn with_precision(mut self, precision: f64) -> Self {
        self.precision = precision;
        self
    }

    pub fn with_stroke_width(mut self, width: f64) -> Self {
        self.stroke_width = width;
        self
    }

    pub fn with_color(mut self, color: Color) -> Self {
        self.color = color;
        self
    }

    pub fn with_shape(mut self, shape: PenShape) -> Self {
        self.shape = shape;
        self
    }
}

/// Result of [`Canvas::present`].
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum FrameOutcome {
    /// The buffer changed and was replayed into the sink.
    Redrawn(ReplayStats),
    /// Nothing changed; the previous frame stays on screen.
    Retained,
}

#[derive(Debug)]
pub struct Canvas {
    pen: PenState,
    buffer: CommandBuffer,
    detector: ChangeDetector,
    tess: Tessellator,
    clear_color: Color,
}

impl Default for Canvas {
    fn default() -> Self {
        Self::new(CanvasConfig::default())
    }
}

impl Canvas {
    pub fn new(config: CanvasConfig) -> Self {
        if !config.bounds.is_valid() {
            warn!("canvas: degenerate world bounds {:?}", config.bounds);
        }

        let mut pen = PenState::new();
        pen.set_color(config.color);
        pen.set_stroke_width(config.stroke_width);
        pen.set_shape(config.shape);
        pen.set_precision(config.precision);

        Self {
            pen,
            buffer: CommandBuffer::new(),
            detector: ChangeDetector::new(),
            tess: Tessellator::new(config.bounds),
            clear_color: config.clear_color,
        }
    }

    // ── pen ───────────────────────────────────────────────────────────────

    /// Moves the pen; while down, records the point unless nothing changed.
    pub fn move_to(&mut self, x: f64, y: f64) -> bool {
        self.pen.move_to(Vec2::new(x, y), &mut self.buffer)
    }

    pub fn pen_down(&mut self) {
        self.pen.pen_down();
    }

    pub fn pen_up(&mut self) -> bool {
        self.pen.pen_up(&mut self.buffer)
    }

    /// Records a dot at the current position (pen must be down).
    pub fn stamp(&mut self) -> bool {
        self.pen.stamp(&mut self.buffer)
    }

    pub fn set_color(&mut self, color: Color) {
        self.pen.set_color(color);
    }

    pub fn set_stroke_width(&mut self, width: f64) {
        self.pen.set_stroke_width(width);
    }

    pub fn set_shape(&mut self, shape: PenShape) {
        self.pen.set_shape(shape);
    }

    /// Sets the shape by name; an unknown name leaves the pen untouched.
    pub fn set_shape_named(&mut self, name: &str) -> Result<(), ShapeParseError> {
        match name.parse::<PenShape>() {
            Ok(shape) => {
                self.pen.set_shape(shape);
                Ok(())
            }
            Err(e) => {
                warn!("canvas: {e}");
                Err(e)
            }
        }
    }

    pub fn set_precision(&mut self, precision: f64) {
        self.pen.set_precision(precision);
    }

    pub fn pen(&self) -> &PenState {
        &self.pen
    }

    // ── batched primitives ────────────────────────────────────────────────

    pub fn triangle(&mut self, a: Vec2, b: Vec2, c: Vec2, color: Color) {
        self.buffer.push_batch(&BatchedPrimitive::Triangle { points: [a, b, c], color });
    }

    pub fn quad(&mut self, a: Vec2, b: Vec2, c: Vec2, d: Vec2, color: Color) {
        self.buffer.push_batch(&BatchedPrimitive::Quad { points: [a, b, c, d], color });
    }

    /// Axis-aligned rectangle between opposite corners `a` and `b`.
    pub fn rect(&mut self, a: Vec2, b: Vec2, color: Color) {
        self.buffer.push_batch(&BatchedPrimitive::rect(a, b, color));
    }

    // ── frame ─────────────────────────────────────────────────────────────

    /// Empties the command buffer. Call at the start of each frame.
    pub fn clear(&mut self) {
        self.buffer.clear();
    }

    pub fn buffer(&self) -> &CommandBuffer {
        &self.buffer
    }

    /// Replays the buffer into `sink` if it changed since the last present.
    pub fn present(&mut self, sink: &mut dyn PrimitiveSink) -> FrameOutcome {
        if !self.detector.check(self.buffer.as_list()) {
            trace!("canvas: buffer unchanged; frame retained");
            return FrameOutcome::Retained;
        }

        sink.begin_frame(self.clear_color);
        let stats = self.tess.replay(&self.buffer, sink);
        sink.end_frame();
        FrameOutcome::Redrawn(stats)
    }

    /// Forces the next [`present`](Self::present) to redraw.
    pub fn invalidate(&mut self) {
        self.detector.invalidate();
    }

    // ── view ──────────────────────────────────────────────────────────────

    pub fn bounds(&self) -> WorldBounds {
        self.tess.bounds()
    }

    pub fn set_bounds(&mut self, min: Vec2, max: Vec2) {
        self.tess.set_bounds(WorldBounds::new(min, max));
        self.invalidate();
    }

    pub fn clear_color(&self) -> Color {
        self.clear_color
    }

    pub fn set_clear_color(&mut self, color: Color) {
        if self.clear_color != color {
            self.clear_color = color;
            self.invalidate();
        }
    }

    /// Window pixel position to world coordinates.
    pub fn screen_to_world(&self, screen: Vec2, window: (u32, u32)) -> Vec2 {
        self.bounds().screen_to_world(screen, window)
    }
}
