use std::fmt;

use super::TaggedList;

/// Type tag of a [`TaggedValue`].
///
/// Each tag has a stable single-character code (`i`, `u`, `f`, `d`, `c`, `b`,
/// `h`, `l`, `s`, `p`, `r`) used by [`TaggedList::type_signature`] and diagnostics.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
pub enum Tag {
    I32,
    U32,
    F32,
    F64,
    Char,
    Bool,
    I16,
    I64,
    Str,
    Handle,
    List,
}

impl Tag {
    #[inline]
    pub const fn code(self) -> char {
        match self {
            Tag::I32 => 'i',
            Tag::U32 => 'u',
            Tag::F32 => 'f',
            Tag::F64 => 'd',
            Tag::Char => 'c',
            Tag::Bool => 'b',
            Tag::I16 => 'h',
            Tag::I64 => 'l',
            Tag::Str => 's',
            Tag::Handle => 'p',
            Tag::List => 'r',
        }
    }

    pub fn from_code(code: char) -> Option<Self> {
        Some(match code {
            'i' => Tag::I32,
            'u' => Tag::U32,
            'f' => Tag::F32,
            'd' => Tag::F64,
            'c' => Tag::Char,
            'b' => Tag::Bool,
            'h' => Tag::I16,
            'l' => Tag::I64,
            's' => Tag::Str,
            'p' => Tag::Handle,
            'r' => Tag::List,
            _ => return None,
        })
    }
}

impl fmt::Display for Tag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.code())
    }
}

/// Opaque, non-owning reference stored in a [`TaggedValue::Handle`] slot.
///
/// A handle is an identity token only. The container never dereferences or
/// frees it; anything that must be owned goes into a `Str` or `List` slot.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
pub struct Handle(pub usize);

impl Handle {
    /// Builds a handle from the address of `target`.
    #[inline]
    pub fn of<T>(target: &T) -> Self {
        Self(target as *const T as usize)
    }
}

/// One slot of a [`TaggedList`].
///
/// `Str` and `List` payloads are owned by the slot and released with it.
/// Cloning is a deep copy except for `Handle`, which is copied as a raw reference.
#[derive(Debug, Clone)]
pub enum TaggedValue {
    I32(i32),
    U32(u32),
    F32(f32),
    F64(f64),
    Char(u8),
    Bool(bool),
    I16(i16),
    I64(i64),
    Str(String),
    Handle(Handle),
    List(Box<TaggedList>),
}

impl TaggedValue {
    #[inline]
    pub fn tag(&self) -> Tag {
        match self {
            TaggedValue::I32(_) => Tag::I32,
            TaggedValue::U32(_) => Tag::U32,
            TaggedValue::F32(_) => Tag::F32,
            TaggedValue::F64(_) => Tag::F64,
            TaggedValue::Char(_) => Tag::Char,
            TaggedValue::Bool(_) => Tag::Bool,
            TaggedValue::I16(_) => Tag::I16,
            TaggedValue::I64(_) => Tag::I64,
            TaggedValue::Str(_) => Tag::Str,
            TaggedValue::Handle(_) => Tag::Handle,
            TaggedValue::List(_) => Tag::List,
        }
    }

    /// Raw 64-bit view of the payload.
    ///
    /// Scalars are zero-extended from their native width, so `I32(-1)` and
    /// `U32(u32::MAX)` share the same bits. Strings fold their bytes; nested
    /// lists sum their children. Used for cross-tag equality and fingerprints.
    pub fn raw_bits(&self) -> u64 {
        match self {
            TaggedValue::I32(v) => *v as u32 as u64,
            TaggedValue::U32(v) => *v as u64,
            TaggedValue::F32(v) => v.to_bits() as u64,
            TaggedValue::F64(v) => v.to_bits(),
            TaggedValue::Char(v) => *v as u64,
            TaggedValue::Bool(v) => *v as u64,
            TaggedValue::I16(v) => *v as u16 as u64,
            TaggedValue::I64(v) => *v as u64,
            TaggedValue::Str(s) => s
                .bytes()
                .fold(s.len() as u64, |acc, b| acc.wrapping_mul(31).wrapping_add(b as u64)),
            TaggedValue::Handle(h) => h.0 as u64,
            TaggedValue::List(l) => l
                .iter()
                .fold(l.len() as u64, |acc, v| acc.wrapping_add(v.raw_bits())),
        }
    }

    #[inline]
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            TaggedValue::F64(v) => Some(*v),
            _ => None,
        }
    }

    #[inline]
    pub fn as_i16(&self) -> Option<i16> {
        match self {
            TaggedValue::I16(v) => Some(*v),
            _ => None,
        }
    }

    #[inline]
    pub fn as_i32(&self) -> Option<i32> {
        match self {
            TaggedValue::I32(v) => Some(*v),
            _ => None,
        }
    }

    #[inline]
    pub fn as_str(&self) -> Option<&str> {
        match self {
            TaggedValue::Str(s) => Some(s),
            _ => None,
        }
    }

    #[inline]
    pub fn as_list(&self) -> Option<&TaggedList> {
        match self {
            TaggedValue::List(l) => Some(l),
            _ => None,
        }
    }
}

/// Tagged equality.
///
/// - a string only equals a string, by content
/// - floats of the same width compare numerically
/// - lists and handles compare by identity, never structurally
/// - any other pairing compares the raw scalar bits, so `I32(5) == I16(5)`
impl PartialEq for TaggedValue {
    fn eq(&self, other: &Self) -> bool {
        use TaggedValue::*;
        match (self, other) {
            (Str(a), Str(b)) => a == b,
            (Str(_), _) | (_, Str(_)) => false,
            (F32(a), F32(b)) => a == b,
            (F64(a), F64(b)) => a == b,
            (List(a), List(b)) => std::ptr::eq(a.as_ref(), b.as_ref()),
            (List(_), _) | (_, List(_)) => false,
            _ => self.raw_bits() == other.raw_bits(),
        }
    }
}

impl fmt::Display for TaggedValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TaggedValue::I32(v) => write!(f, "{v}"),
            TaggedValue::U32(v) => write!(f, "{v}"),
            TaggedValue::F32(v) => write!(f, "{v}"),
            TaggedValue::F64(v) => write!(f, "{v}"),
            TaggedValue::Char(v) => write!(f, "{}", *v as char),
            TaggedValue::Bool(v) => write!(f, "{}", *v as u8),
            TaggedValue::I16(v) => write!(f, "{v}"),
            TaggedValue::I64(v) => write!(f, "{v}"),
            TaggedValue::Str(s) => write!(f, "{s}"),
            TaggedValue::Handle(h) => write!(f, "{:#x}", h.0),
            TaggedValue::List(l) => write!(f, "{l}"),
        }
    }
}

macro_rules! impl_from_scalar {
    ($($ty:ty => $variant:ident),* $(,)?) => {
        $(
            impl From<$ty> for TaggedValue {
                #[inline]
                fn from(v: $ty) -> Self {
                    TaggedValue::$variant(v)
                }
            }
        )*
    };
}

impl_from_scalar! {
    i32 => I32,
    u32 => U32,
    f32 => F32,
    f64 => F64,
    u8 => Char,
    bool => Bool,
    i16 => I16,
    i64 => I64,
    String => Str,
    Handle => Handle,
}

impl From<&str> for TaggedValue {
    #[inline]
    fn from(s: &str) -> Self {
        TaggedValue::Str(s.to_owned())
    }
}

impl From<TaggedList> for TaggedValue {
    #[inline]
    fn from(list: TaggedList) -> Self {
        TaggedValue::List(Box::new(list))
    }
}
