use std::fmt;

use super::Tag;

/// Errors reported by [`TaggedList`](super::TaggedList) accessors.
///
/// All of them leave the list unchanged.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ListError {
    /// Index outside `0..len` (after negative-index wrapping, where supported).
    IndexOutOfRange { index: isize, len: usize },
    /// Removal requested on an empty list.
    Empty,
    /// The slot holds a different tag than the typed accessor decodes.
    TagMismatch { index: usize, expected: Tag, found: Tag },
}

impl fmt::Display for ListError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ListError::IndexOutOfRange { index, len } => {
                write!(f, "index {index} out of range for list of length {len}")
            }
            ListError::Empty => write!(f, "list is empty"),
            ListError::TagMismatch { index, expected, found } => {
                write!(f, "slot {index} holds tag '{found}', expected '{expected}'")
            }
        }
    }
}

impl std::error::Error for ListError {}
