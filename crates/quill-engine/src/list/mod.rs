//! Tagged container.
//!
//! `TaggedList` is the storage format shared by the engine: the pen command
//! stream and the pressed-input set are both tagged lists.
//!
//! Ownership:
//! - `Str` and `List` slots own their payload; removal, overwrite, or drop releases it
//! - `Handle` slots are non-owning identity tokens and are never freed by the list

mod container;
mod error;
mod value;

pub use container::TaggedList;
pub use error::ListError;
pub use value::{Handle, Tag, TaggedValue};
