use std::fmt;
use std::str::FromStr;

use super::ShapeParseError;

/// Shape code of a batched triangle record pair.
pub const BATCH_TRIANGLE_CODE: i16 = 66;

/// Shape code of a batched quad record pair.
pub const BATCH_QUAD_CODE: i16 = 67;

/// Pen tip shape.
///
/// `Circle`, `Square` and `Triangle` stamp a filled shape at every recorded
/// point. `Connected` and `Text` are stroke modes: consecutive points are
/// bridged by segment quads with joints at direction changes. `Text` also caps
/// both path ends with a circle.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash, Default)]
pub enum PenShape {
    #[default]
    Circle,
    Square,
    Triangle,
    None,
    Connected,
    Text,
}

impl PenShape {
    /// Code stored in the shape slot of a pen record.
    #[inline]
    pub const fn code(self) -> i16 {
        match self {
            PenShape::Circle => 0,
            PenShape::Square => 1,
            PenShape::Triangle => 2,
            PenShape::None => 3,
            PenShape::Connected => 4,
            PenShape::Text => 5,
        }
    }

    #[inline]
    pub const fn from_code(code: i16) -> Option<Self> {
        Some(match code {
            0 => PenShape::Circle,
            1 => PenShape::Square,
            2 => PenShape::Triangle,
            3 => PenShape::None,
            4 => PenShape::Connected,
            5 => PenShape::Text,
            _ => return None,
        })
    }

    /// `true` for the stroke modes (`Connected`, `Text`).
    #[inline]
    pub const fn is_stroke(self) -> bool {
        matches!(self, PenShape::Connected | PenShape::Text)
    }

    pub const fn name(self) -> &'static str {
        match self {
            PenShape::Circle => "circle",
            PenShape::Square => "square",
            PenShape::Triangle => "triangle",
            PenShape::None => "none",
            PenShape::Connected => "connected",
            PenShape::Text => "text",
        }
    }
}

impl fmt::Display for PenShape {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Accepts the lowercase name or its capitalised form (`"circle"`, `"Circle"`).
impl FromStr for PenShape {
    type Err = ShapeParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        const ALL: [PenShape; 6] = [
            PenShape::Circle,
            PenShape::Square,
            PenShape::Triangle,
            PenShape::None,
            PenShape::Connected,
            PenShape::Text,
        ];

        ALL.into_iter()
            .find(|shape| s == shape.name() || s == capitalised(shape.name()))
            .ok_or_else(|| ShapeParseError::new(s))
    }
}

fn capitalised(name: &str) -> String {
    let mut out = name[..1].to_ascii_uppercase();
    out.push_str(&name[1..]);
    out
}
