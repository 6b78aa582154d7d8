use crate::coords::Vec2;
use crate::list::{TaggedList, TaggedValue};
use crate::paint::Color;

use super::shape::{BATCH_QUAD_CODE, BATCH_TRIANGLE_CODE, PenShape};

/// Slots per record.
pub const STRIDE: usize = 9;

/// Slot offsets inside one stride.
pub(crate) mod slot {
    pub const X: usize = 0;
    pub const Y: usize = 1;
    pub const SIZE: usize = 2;
    pub const R: usize = 3;
    pub const SHAPE: usize = 7;
    pub const AUX: usize = 8;
}

/// One drawn point: `[x, y, size, r, g, b, a, shape, precision]`.
///
/// `size` is the half-width of the pen (the radius for circle pens).
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct PenRecord {
    pub pos: Vec2,
    pub size: f64,
    pub color: Color,
    pub shape: PenShape,
    pub precision: f64,
}

impl PenRecord {
    pub(crate) fn encode(&self, out: &mut TaggedList) {
        let [r, g, b, a] = self.color.channels();
        out.push(self.pos.x);
        out.push(self.pos.y);
        out.push(self.size);
        out.push(r);
        out.push(g);
        out.push(b);
        out.push(a);
        out.push(self.shape.code());
        out.push(self.precision);
    }
}

/// Pre-tessellated primitive written straight into the buffer.
#[derive(Debug, Copy, Clone, PartialEq)]
pub enum BatchedPrimitive {
    Triangle { points: [Vec2; 3], color: Color },
    Quad { points: [Vec2; 4], color: Color },
}

impl BatchedPrimitive {
    /// Axis-aligned rectangle spanned by two opposite corners.
    pub fn rect(a: Vec2, b: Vec2, color: Color) -> Self {
        BatchedPrimitive::Quad {
            points: [a, Vec2::new(b.x, a.y), b, Vec2::new(a.x, b.y)],
            color,
        }
    }

    pub fn color(&self) -> Color {
        match self {
            BatchedPrimitive::Triangle { color, .. } | BatchedPrimitive::Quad { color, .. } => *color,
        }
    }

    pub fn points(&self) -> &[Vec2] {
        match self {
            BatchedPrimitive::Triangle { points, .. } => points,
            BatchedPrimitive::Quad { points, .. } => points,
        }
    }

    pub(crate) fn code(&self) -> i16 {
        match self {
            BatchedPrimitive::Triangle { .. } => BATCH_TRIANGLE_CODE,
            BatchedPrimitive::Quad { .. } => BATCH_QUAD_CODE,
        }
    }

    /// Two strides. The size and aux slots carry the extra vertices:
    ///
    /// ```text
    /// [x1, y1, x2, r, g, b, a, code, y2]
    /// [x3, y3, x4, r, g, b, a, code, y4]   (x4/y4 are 0 for triangles)
    /// ```
    pub(crate) fn encode(&self, out: &mut TaggedList) {
        let (p, fourth) = match *self {
            BatchedPrimitive::Triangle { points, .. } => (points, Vec2::zero()),
            BatchedPrimitive::Quad { points, .. } => ([points[0], points[1], points[2]], points[3]),
        };
        let [r, g, b, a] = self.color().channels();
        let code = self.code();

        for (first, second) in [(p[0], p[1]), (p[2], fourth)] {
            out.push(first.x);
            out.push(first.y);
            out.push(second.x);
            out.push(r);
            out.push(g);
            out.push(b);
            out.push(a);
            out.push(code);
            out.push(second.y);
        }
    }
}

/// Lift marker: one stride of zero bytes.
pub(crate) fn encode_lift(out: &mut TaggedList) {
    for _ in 0..STRIDE {
        out.push(0u8);
    }
}

#[inline]
pub(crate) fn is_lift_slot(value: &TaggedValue) -> bool {
    matches!(value, TaggedValue::Char(0))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::list::Tag;

    #[test]
    fn pen_record_layout() {
        let rec = PenRecord {
            pos: Vec2::new(1.0, 2.0),
            size: 3.0,
            color: Color::rgba(0.1, 0.2, 0.3, 0.4),
            shape: PenShape::Connected,
            precision: 9.0,
        };
        let mut list = TaggedList::new();
        rec.encode(&mut list);

        assert_eq!(list.len(), STRIDE);
        assert_eq!(list.type_signature(), "[d, d, d, d, d, d, d, h, d]");
        assert_eq!(list.get_i16(slot::SHAPE), Ok(4));
        assert_eq!(list.get_f64(slot::AUX), Ok(9.0));
    }

    #[test]
    fn batched_triangle_layout() {
        let tri = BatchedPrimitive::Triangle {
            points: [Vec2::new(1.0, 2.0), Vec2::new(3.0, 4.0), Vec2::new(5.0, 6.0)],
            color: Color::BLACK,
        };
        let mut list = TaggedList::new();
        tri.encode(&mut list);

        assert_eq!(list.len(), 2 * STRIDE);
        assert_eq!(list.get_f64(0), Ok(1.0));
        assert_eq!(list.get_f64(1), Ok(2.0));
        assert_eq!(list.get_f64(2), Ok(3.0));
        assert_eq!(list.get_f64(8), Ok(4.0));
        assert_eq!(list.get_f64(9), Ok(5.0));
        assert_eq!(list.get_f64(10), Ok(6.0));
        assert_eq!(list.get_i16(16), Ok(BATCH_TRIANGLE_CODE));
    }

    #[test]
    fn rect_walks_corners_in_order() {
        let q = BatchedPrimitive::rect(Vec2::new(0.0, 0.0), Vec2::new(2.0, 1.0), Color::WHITE);
        assert_eq!(
            q.points(),
            &[Vec2::new(0.0, 0.0), Vec2::new(2.0, 0.0), Vec2::new(2.0, 1.0), Vec2::new(0.0, 1.0)]
        );
    }

    #[test]
    fn lift_marker_is_zero_bytes() {
        let mut list = TaggedList::new();
        encode_lift(&mut list);
        assert_eq!(list.len(), STRIDE);
        assert!(list.iter().all(|v| v.tag() == Tag::Char && is_lift_slot(v)));
    }
}
