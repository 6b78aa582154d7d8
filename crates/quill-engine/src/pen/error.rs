use std::fmt;

use crate::list::Tag;

/// Problems found while decoding the command buffer.
///
/// Offsets are slot indices into the buffer. The replayer logs these and skips
/// the offending stride.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DecodeError {
    /// A slot holds a tag the stride layout does not allow there.
    UnexpectedTag { offset: usize, expected: Tag, found: Tag },
    /// The shape slot carries a code that is neither a pen shape nor a batch code.
    UnknownShape { offset: usize, code: i16 },
    /// First half of a batched primitive without a matching second half.
    UnpairedBatch { offset: usize },
    /// Fewer than a full stride of slots remain at the end of the buffer.
    Truncated { offset: usize, len: usize },
}

impl fmt::Display for DecodeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DecodeError::UnexpectedTag { offset, expected, found } => {
                write!(f, "slot {offset}: unexpected tag '{found}' (expected '{expected}')")
            }
            DecodeError::UnknownShape { offset, code } => {
                write!(f, "slot {offset}: unknown shape code {code}")
            }
            DecodeError::UnpairedBatch { offset } => {
                write!(f, "slot {offset}: batched primitive is missing its second stride")
            }
            DecodeError::Truncated { offset, len } => {
                write!(f, "slot {offset}: trailing partial stride of {len} slots")
            }
        }
    }
}

impl std::error::Error for DecodeError {}

/// Unsupported pen shape name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ShapeParseError {
    pub name: String,
}

impl ShapeParseError {
    pub(crate) fn new(name: impl Into<String>) -> Self {
        Self { name: name.into() }
    }
}

impl fmt::Display for ShapeParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "unsupported pen shape \"{}\"", self.name)
    }
}

impl std::error::Error for ShapeParseError {}
