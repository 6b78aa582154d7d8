use std::f64::consts::{E, TAU};

use log::{trace, warn};

use crate::coords::Vec2;
use crate::paint::Color;
use crate::pen::{BatchedPrimitive, Command, CommandBuffer, PenRecord, PenShape};

use super::sink::{PrimitiveKind, PrimitiveSink};
use super::transform::WorldBounds;

/// Consecutive stroke points closer than this on both axes collapse into one joint.
pub const NEAR_EPSILON: f64 = 0.01;

const MAX_CIRCLE_SIDES: usize = 1024;

/// Side count of the polygon approximating a circle: `⌈precision · ln(e + radius)⌉`, at least 3.
pub fn circle_sides(radius: f64, precision: f64) -> usize {
    let n = (precision * (E + radius.abs()).ln()).ceil();
    if !n.is_finite() || n < 3.0 {
        return 3;
    }
    (n as usize).min(MAX_CIRCLE_SIDES)
}

/// Counters for one replay.
#[derive(Debug, Copy, Clone, Default, Eq, PartialEq)]
pub struct ReplayStats {
    pub commands: usize,
    pub skipped: usize,
    pub polygons: usize,
}

#[derive(Debug, Copy, Clone)]
struct SidesCache {
    radius: f64,
    precision: f64,
    sides: usize,
}

/// Replays a [`CommandBuffer`] into filled polygons.
///
/// Per pen record:
/// - the dot for its shape (circle, square, triangle; text draws a start cap)
/// - a segment quad towards the next record when the shape strokes, or when the
///   next point is farther than half the pen size on either axis
/// - for stroke shapes, one bevel triangle on the outer side of each bend
#[derive(Debug)]
pub struct Tessellator {
    bounds: WorldBounds,
    last_color: Option<Color>,
    sides: Option<SidesCache>,
    commands: Vec<Command>,
    scratch: Vec<Vec2>,
    stats: ReplayStats,
}

impl Tessellator {
    pub fn new(bounds: WorldBounds) -> Self {
        Self {
            bounds,
            last_color: None,
            sides: None,
            commands: Vec::new(),
            scratch: Vec::with_capacity(64),
            stats: ReplayStats::default(),
        }
    }

    #[inline]
    pub fn bounds(&self) -> WorldBounds {
        self.bounds
    }

    pub fn set_bounds(&mut self, bounds: WorldBounds) {
        self.bounds = bounds;
    }

    /// Emits every primitive of `buffer` into `sink`.
    ///
    /// Does not call `begin_frame`/`end_frame`; the caller brackets the replay.
    pub fn replay(&mut self, buffer: &CommandBuffer, sink: &mut dyn PrimitiveSink) -> ReplayStats {
        self.stats = ReplayStats::default();
        self.last_color = None;

        if !self.bounds.is_valid() {
            warn!("tess: degenerate world bounds {:?}; nothing drawn", self.bounds);
            return self.stats;
        }

        let mut commands = std::mem::take(&mut self.commands);
        commands.clear();
        for decoded in buffer.commands() {
            match decoded {
                Ok(cmd) => commands.push(cmd),
                Err(e) => {
                    warn!("tess: skipping stride: {e}");
                    self.stats.skipped += 1;
                    // A skipped stride breaks the path like a lift.
                    commands.push(Command::Lift);
                }
            }
        }
        self.stats.commands = commands.len();

        let pen_at = |i: usize| match commands.get(i) {
            Some(Command::Pen(rec)) => Some(*rec),
            _ => None,
        };

        for (i, cmd) in commands.iter().enumerate() {
            match cmd {
                Command::Lift => {}
                Command::Batch(batch) => self.batch(batch, sink),
                Command::Pen(rec) => {
                    let prev = i.checked_sub(1).and_then(pen_at);
                    self.pen_point(rec, prev, pen_at(i + 1), pen_at(i + 2), sink);
                }
            }
        }

        self.commands = commands;
        trace!(
            "tess: {} commands, {} skipped, {} polygons",
            self.stats.commands, self.stats.skipped, self.stats.polygons
        );
        self.stats
    }

    fn pen_point(
        &mut self,
        rec: &PenRecord,
        prev: Option<PenRecord>,
        next: Option<PenRecord>,
        after: Option<PenRecord>,
        sink: &mut dyn PrimitiveSink,
    ) {
        match rec.shape {
            PenShape::Circle => self.circle(PrimitiveKind::Circle, rec, sink),
            PenShape::Square => self.square(rec, sink),
            PenShape::Triangle => self.triangle(rec, sink),
            PenShape::Text if prev.is_none() => self.circle(PrimitiveKind::Circle, rec, sink),
            PenShape::Text | PenShape::Connected | PenShape::None => {}
        }

        let stroke = rec.shape.is_stroke();
        let bridged = next.filter(|n| stroke || rec.pos.max_axis_distance(n.pos) > rec.size * 0.5);

        match bridged {
            Some(n) if stroke && is_near(rec.pos, n.pos) => {
                // First point of a near-identical run draws the run's only joint.
                let in_run = prev.is_some_and(|p| p.shape.is_stroke() && is_near(p.pos, rec.pos));
                if !in_run {
                    self.circle(PrimitiveKind::Joint, rec, sink);
                }
            }
            Some(n) => {
                self.segment(rec, n.pos, sink);
                if let Some(a) = after.filter(|a| stroke && !is_near(n.pos, a.pos)) {
                    self.joint(rec, &n, a.pos, sink);
                }
            }
            None => {
                let isolated = rec.shape == PenShape::Connected && prev.is_none() && next.is_none();
                let end_cap = rec.shape == PenShape::Text && prev.is_some() && next.is_none();
                if isolated || end_cap {
                    self.circle(PrimitiveKind::Circle, rec, sink);
                }
            }
        }
    }

    fn batch(&mut self, batch: &BatchedPrimitive, sink: &mut dyn PrimitiveSink) {
        let kind = match batch {
            BatchedPrimitive::Triangle { .. } => PrimitiveKind::Triangle,
            BatchedPrimitive::Quad { .. } => PrimitiveKind::Quad,
        };
        self.scratch.clear();
        self.scratch.extend_from_slice(batch.points());
        self.submit(kind, batch.color(), sink);
    }

    fn circle(&mut self, kind: PrimitiveKind, rec: &PenRecord, sink: &mut dyn PrimitiveSink) {
        let sides = self.sides_for(rec.size, rec.precision);
        let r = rec.size;
        self.scratch.clear();
        self.scratch.extend((0..sides).map(|k| {
            let a = TAU * k as f64 / sides as f64;
            rec.pos + Vec2::new(r * a.sin(), r * a.cos())
        }));
        self.submit(kind, rec.color, sink);
    }

    fn square(&mut self, rec: &PenRecord, sink: &mut dyn PrimitiveSink) {
        let (p, s) = (rec.pos, rec.size);
        self.scratch.clear();
        self.scratch.extend([
            Vec2::new(p.x - s, p.y - s),
            Vec2::new(p.x + s, p.y - s),
            Vec2::new(p.x + s, p.y + s),
            Vec2::new(p.x - s, p.y + s),
        ]);
        self.submit(PrimitiveKind::Square, rec.color, sink);
    }

    fn triangle(&mut self, rec: &PenRecord, sink: &mut dyn PrimitiveSink) {
        let (p, s) = (rec.pos, rec.size);
        self.scratch.clear();
        self.scratch.extend([
            Vec2::new(p.x - s, p.y - s),
            Vec2::new(p.x + s, p.y - s),
            Vec2::new(p.x, p.y + s),
        ]);
        self.submit(PrimitiveKind::Triangle, rec.color, sink);
    }

    fn segment(&mut self, from: &PenRecord, to: Vec2, sink: &mut dyn PrimitiveSink) {
        let n = normal(to - from.pos) * from.size;
        let p = from.pos;
        self.scratch.clear();
        self.scratch.extend([p + n, to + n, to - n, p - n]);
        self.submit(PrimitiveKind::Segment, from.color, sink);
    }

    /// Bevel at `mid.pos` between `from → mid` and `mid → to`, on the outside of the turn.
    fn joint(&mut self, from: &PenRecord, mid: &PenRecord, to: Vec2, sink: &mut dyn PrimitiveSink) {
        let d1 = mid.pos - from.pos;
        let d2 = to - mid.pos;
        let n1 = normal(d1) * from.size;
        let n2 = normal(d2) * mid.size;
        let p = mid.pos;

        // Left turn opens the gap on the right (negative normal) side.
        let outer = if d1.cross(d2) > 0.0 { p - n2 } else { p + n2 };

        self.scratch.clear();
        self.scratch.extend([p + n1, p - n1, outer]);
        self.submit(PrimitiveKind::Joint, from.color, sink);
    }

    fn sides_for(&mut self, radius: f64, precision: f64) -> usize {
        if let Some(c) = self.sides {
            if c.radius == radius && c.precision == precision {
                return c.sides;
            }
        }
        let sides = circle_sides(radius, precision);
        self.sides = Some(SidesCache { radius, precision, sides });
        sides
    }

    fn submit(&mut self, kind: PrimitiveKind, color: Color, sink: &mut dyn PrimitiveSink) {
        if self.last_color != Some(color) {
            sink.set_color(color);
            self.last_color = Some(color);
        }
        for p in &mut self.scratch {
            *p = self.bounds.to_ndc(*p);
        }
        sink.fill_polygon(kind, &self.scratch);
        self.stats.polygons += 1;
    }
}

/// Left-hand unit perpendicular of `d`.
#[inline]
fn normal(d: Vec2) -> Vec2 {
    let theta = d.y.atan2(d.x);
    Vec2::new(-theta.sin(), theta.cos())
}

#[inline]
fn is_near(a: Vec2, b: Vec2) -> bool {
    a.max_axis_distance(b) < NEAR_EPSILON
}
