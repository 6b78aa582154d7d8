use crate::coords::Vec2;
use crate::list::{Tag, TaggedValue};
use crate::paint::Color;

use super::record::{is_lift_slot, slot, BatchedPrimitive, PenRecord, STRIDE};
use super::shape::{BATCH_QUAD_CODE, BATCH_TRIANGLE_CODE, PenShape};
use super::DecodeError;

/// One decoded entry of the command buffer.
#[derive(Debug, Copy, Clone, PartialEq)]
pub enum Command {
    Pen(PenRecord),
    Lift,
    Batch(BatchedPrimitive),
}

/// Stride walker over raw buffer slots.
///
/// A malformed stride yields one `Err` and is skipped; decoding resumes at the
/// next stride. A trailing partial stride yields `Truncated` and ends the walk.
pub struct Commands<'a> {
    slots: &'a [TaggedValue],
    offset: usize,
}

impl<'a> Commands<'a> {
    pub fn new(slots: &'a [TaggedValue]) -> Self {
        Self { slots, offset: 0 }
    }

    fn decode_at(&self, at: usize) -> Result<(Command, usize), DecodeError> {
        let stride = &self.slots[at..at + STRIDE];

        if is_lift_slot(&stride[0]) {
            return match stride.iter().position(|v| !is_lift_slot(v)) {
                None => Ok((Command::Lift, STRIDE)),
                Some(i) => Err(DecodeError::UnexpectedTag {
                    offset: at + i,
                    expected: Tag::Char,
                    found: stride[i].tag(),
                }),
            };
        }

        let code = shape_code(stride, at)?;
        if code == BATCH_TRIANGLE_CODE || code == BATCH_QUAD_CODE {
            let batch = self.decode_batch(at, code)?;
            return Ok((Command::Batch(batch), 2 * STRIDE));
        }

        let shape = PenShape::from_code(code)
            .ok_or(DecodeError::UnknownShape { offset: at + slot::SHAPE, code })?;

        let record = PenRecord {
            pos: Vec2::new(float(stride, at, slot::X)?, float(stride, at, slot::Y)?),
            size: float(stride, at, slot::SIZE)?,
            color: color(stride, at)?,
            shape,
            precision: float(stride, at, slot::AUX)?,
        };
        Ok((Command::Pen(record), STRIDE))
    }

    fn decode_batch(&self, at: usize, code: i16) -> Result<BatchedPrimitive, DecodeError> {
        let first = &self.slots[at..at + STRIDE];
        let next = at + STRIDE;
        let second = self
            .slots
            .get(next..next + STRIDE)
            .filter(|s| shape_code(s, next).ok() == Some(code))
            .ok_or(DecodeError::UnpairedBatch { offset: at })?;

        let p1 = Vec2::new(float(first, at, slot::X)?, float(first, at, slot::Y)?);
        let p2 = Vec2::new(float(first, at, slot::SIZE)?, float(first, at, slot::AUX)?);
        let p3 = Vec2::new(float(second, next, slot::X)?, float(second, next, slot::Y)?);
        let color = color(first, at)?;

        if code == BATCH_TRIANGLE_CODE {
            return Ok(BatchedPrimitive::Triangle { points: [p1, p2, p3], color });
        }
        let p4 = Vec2::new(float(second, next, slot::SIZE)?, float(second, next, slot::AUX)?);
        Ok(BatchedPrimitive::Quad { points: [p1, p2, p3, p4], color })
    }
}

impl Iterator for Commands<'_> {
    type Item = Result<Command, DecodeError>;

    fn next(&mut self) -> Option<Self::Item> {
        let at = self.offset;
        let remaining = self.slots.len().saturating_sub(at);
        if remaining == 0 {
            return None;
        }
        if remaining < STRIDE {
            self.offset = self.slots.len();
            return Some(Err(DecodeError::Truncated { offset: at, len: remaining }));
        }

        match self.decode_at(at) {
            Ok((cmd, consumed)) => {
                self.offset += consumed;
                Some(Ok(cmd))
            }
            Err(e) => {
                self.offset += STRIDE;
                Some(Err(e))
            }
        }
    }
}

fn shape_code(stride: &[TaggedValue], at: usize) -> Result<i16, DecodeError> {
    let v = &stride[slot::SHAPE];
    v.as_i16().ok_or(DecodeError::UnexpectedTag {
        offset: at + slot::SHAPE,
        expected: Tag::I16,
        found: v.tag(),
    })
}

fn float(stride: &[TaggedValue], at: usize, i: usize) -> Result<f64, DecodeError> {
    let v = &stride[i];
    v.as_f64().ok_or(DecodeError::UnexpectedTag {
        offset: at + i,
        expected: Tag::F64,
        found: v.tag(),
    })
}

fn color(stride: &[TaggedValue], at: usize) -> Result<Color, DecodeError> {
    let c = |i| float(stride, at, slot::R + i);
    Ok(Color::rgba(c(0)?, c(1)?, c(2)?, c(3)?))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::list::TaggedList;
    use crate::pen::record::encode_lift;

    fn record(x: f64, y: f64) -> PenRecord {
        PenRecord {
            pos: Vec2::new(x, y),
            size: 1.0,
            color: Color::BLACK,
            shape: PenShape::Connected,
            precision: 9.0,
        }
    }

    fn decode(list: &TaggedList) -> Vec<Result<Command, DecodeError>> {
        Commands::new(list.as_slice()).collect()
    }

    // ── well-formed ───────────────────────────────────────────────────────

    #[test]
    fn decodes_mixed_stream() {
        let tri = BatchedPrimitive::Triangle {
            points: [Vec2::new(0.0, 0.0), Vec2::new(1.0, 0.0), Vec2::new(0.0, 1.0)],
            color: Color::WHITE,
        };
        let quad = BatchedPrimitive::rect(Vec2::new(-1.0, -1.0), Vec2::new(1.0, 1.0), Color::BLACK);

        let mut list = TaggedList::new();
        record(1.0, 2.0).encode(&mut list);
        encode_lift(&mut list);
        tri.encode(&mut list);
        quad.encode(&mut list);

        assert_eq!(
            decode(&list),
            vec![
                Ok(Command::Pen(record(1.0, 2.0))),
                Ok(Command::Lift),
                Ok(Command::Batch(tri)),
                Ok(Command::Batch(quad)),
            ]
        );
    }

    #[test]
    fn empty_buffer_yields_nothing() {
        assert!(decode(&TaggedList::new()).is_empty());
    }

    // ── malformed ─────────────────────────────────────────────────────────

    #[test]
    fn trailing_partial_stride_is_truncated() {
        let mut list = TaggedList::new();
        record(0.0, 0.0).encode(&mut list);
        list.push(1.0);
        list.push(2.0);

        let out = decode(&list);
        assert_eq!(out.len(), 2);
        assert_eq!(out[1], Err(DecodeError::Truncated { offset: 9, len: 2 }));
    }

    #[test]
    fn wrong_tag_skips_one_stride() {
        let mut list = TaggedList::new();
        for _ in 0..STRIDE {
            list.push(7i32);
        }
        record(3.0, 4.0).encode(&mut list);

        let out = decode(&list);
        assert!(matches!(
            out[0],
            Err(DecodeError::UnexpectedTag { offset: 7, expected: Tag::I16, found: Tag::I32 })
        ));
        assert_eq!(out[1], Ok(Command::Pen(record(3.0, 4.0))));
    }

    #[test]
    fn unknown_shape_code_is_reported() {
        let mut list = TaggedList::new();
        record(0.0, 0.0).encode(&mut list);
        let mut bad = TaggedList::new();
        for (i, v) in list.iter().enumerate() {
            if i == slot::SHAPE {
                bad.push(42i16);
            } else {
                bad.push(v.clone());
            }
        }
        assert_eq!(decode(&bad), vec![Err(DecodeError::UnknownShape { offset: 7, code: 42 })]);
    }

    #[test]
    fn half_batch_is_unpaired() {
        let mut list = TaggedList::new();
        BatchedPrimitive::rect(Vec2::zero(), Vec2::new(1.0, 1.0), Color::BLACK).encode(&mut list);
        list.delete_range(STRIDE, 2 * STRIDE);
        record(5.0, 5.0).encode(&mut list);

        let out = decode(&list);
        assert_eq!(out[0], Err(DecodeError::UnpairedBatch { offset: 0 }));
        assert_eq!(out[1], Ok(Command::Pen(record(5.0, 5.0))));
    }

    #[test]
    fn partial_lift_marker_is_rejected() {
        let mut list = TaggedList::new();
        for _ in 0..STRIDE - 1 {
            list.push(0u8);
        }
        list.push(1.0);
        assert!(matches!(
            decode(&list)[0],
            Err(DecodeError::UnexpectedTag { offset: 8, expected: Tag::Char, found: Tag::F64 })
        ));
    }
}
