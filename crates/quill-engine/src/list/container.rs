use std::fmt;

use super::{Handle, ListError, Tag, TaggedValue};

/// Growable ordered sequence of tagged values.
///
/// Capacity policy (observable through [`capacity`](Self::capacity)):
/// - starts at 1
/// - doubles when an insertion finds `len == capacity`
/// - halves once per single-slot removal when `len <= capacity / 2`, never below 1
/// - [`delete_range`](Self::delete_range) resizes to the exact new length
///
/// Every slot carries its own tag, so the tag sequence and the value sequence
/// can never drift apart.
#[derive(Debug)]
pub struct TaggedList {
    items: Vec<TaggedValue>,
    capacity: usize,
}

impl TaggedList {
    pub fn new() -> Self {
        Self {
            items: Vec::with_capacity(1),
            capacity: 1,
        }
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.items.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Logical allocated size.
    #[inline]
    pub fn capacity(&self) -> usize {
        self.capacity
    }

    #[inline]
    pub fn as_slice(&self) -> &[TaggedValue] {
        &self.items
    }

    #[inline]
    pub fn iter(&self) -> std::slice::Iter<'_, TaggedValue> {
        self.items.iter()
    }

    #[inline]
    pub fn last(&self) -> Option<&TaggedValue> {
        self.items.last()
    }

    /// Appends a value. String payloads are owned copies, never aliases.
    pub fn push(&mut self, value: impl Into<TaggedValue>) {
        self.grow_if_full();
        self.items.push(value.into());
    }

    /// Inserts a value before `index` (`index == len` appends).
    pub fn insert(&mut self, index: usize, value: impl Into<TaggedValue>) -> Result<(), ListError> {
        if index > self.items.len() {
            return Err(ListError::IndexOutOfRange {
                index: index as isize,
                len: self.items.len(),
            });
        }
        self.grow_if_full();
        self.items.insert(index, value.into());
        Ok(())
    }

    #[inline]
    pub fn get(&self, index: usize) -> Option<&TaggedValue> {
        self.items.get(index)
    }

    #[inline]
    pub fn tag_at(&self, index: usize) -> Option<Tag> {
        self.items.get(index).map(TaggedValue::tag)
    }

    pub fn get_i32(&self, index: usize) -> Result<i32, ListError> {
        self.read(index, Tag::I32, TaggedValue::as_i32)
    }

    pub fn get_i16(&self, index: usize) -> Result<i16, ListError> {
        self.read(index, Tag::I16, TaggedValue::as_i16)
    }

    pub fn get_f64(&self, index: usize) -> Result<f64, ListError> {
        self.read(index, Tag::F64, TaggedValue::as_f64)
    }

    pub fn get_bool(&self, index: usize) -> Result<bool, ListError> {
        self.read(index, Tag::Bool, |v| match v {
            TaggedValue::Bool(b) => Some(*b),
            _ => None,
        })
    }

    pub fn get_handle(&self, index: usize) -> Result<Handle, ListError> {
        self.read(index, Tag::Handle, |v| match v {
            TaggedValue::Handle(h) => Some(*h),
            _ => None,
        })
    }

    pub fn get_str(&self, index: usize) -> Result<&str, ListError> {
        self.read(index, Tag::Str, TaggedValue::as_str)
    }

    pub fn get_list(&self, index: usize) -> Result<&TaggedList, ListError> {
        self.read(index, Tag::List, TaggedValue::as_list)
    }

    /// Removes and returns the last slot.
    pub fn pop(&mut self) -> Option<TaggedValue> {
        let value = self.items.pop()?;
        self.shrink_if_sparse();
        Some(value)
    }

    /// Removes the slot at `index` and shifts later slots left.
    ///
    /// Negative indices count from the end (`-1` is the last slot) and wrap
    /// modulo the length, so any index is valid on a non-empty list.
    pub fn delete(&mut self, index: isize) -> Result<TaggedValue, ListError> {
        if self.items.is_empty() {
            return Err(ListError::Empty);
        }
        let at = index.rem_euclid(self.items.len() as isize) as usize;
        let value = self.items.remove(at);
        self.shrink_if_sparse();
        Ok(value)
    }

    /// Removes the half-open range `[lo, hi)`; bounds are swapped if reversed
    /// and clamped to the length.
    ///
    /// Storage is resized to exactly the remaining length. When one slot or
    /// fewer would remain, the list is cleared entirely.
    pub fn delete_range(&mut self, lo: usize, hi: usize) {
        let (lo, hi) = if lo > hi { (hi, lo) } else { (lo, hi) };
        let len = self.items.len();
        let (lo, hi) = (lo.min(len), hi.min(len));

        let remaining = len - (hi - lo);
        if remaining <= 1 {
            self.clear();
            return;
        }

        self.items.drain(lo..hi);
        self.capacity = remaining;
        self.items.shrink_to(remaining);
    }

    /// Index of the first slot equal to `value`.
    pub fn find(&self, value: &TaggedValue) -> Option<usize> {
        self.items.iter().position(|v| v == value)
    }

    pub fn count(&self, value: &TaggedValue) -> usize {
        self.items.iter().filter(|v| *v == value).count()
    }

    #[inline]
    pub fn contains(&self, value: &TaggedValue) -> bool {
        self.find(value).is_some()
    }

    /// Deletes the first slot equal to `value` and returns where it was.
    /// The list is untouched when nothing matches.
    pub fn remove(&mut self, value: &TaggedValue) -> Option<usize> {
        let at = self.find(value)?;
        self.items.remove(at);
        self.shrink_if_sparse();
        Some(at)
    }

    /// Replaces the contents of `dest` with a deep copy of `self`.
    ///
    /// Nested lists are copied recursively and strings duplicated; handles
    /// are copied as raw references. `dest` takes over this list's capacity.
    pub fn copy_into(&self, dest: &mut TaggedList) {
        let mut items = Vec::with_capacity(self.capacity);
        items.extend(self.items.iter().cloned());
        dest.items = items;
        dest.capacity = self.capacity;
    }

    /// Releases every slot and returns to the empty, capacity-1 state.
    pub fn clear(&mut self) {
        self.items = Vec::with_capacity(1);
        self.capacity = 1;
    }

    /// Tag listing in display form, e.g. `[i, s, f]`.
    pub fn type_signature(&self) -> String {
        let tags: Vec<String> = self.items.iter().map(|v| v.tag().code().to_string()).collect();
        format!("[{}]", tags.join(", "))
    }

    // ── private helpers ────────────────────────────────────────────────────

    fn read<'a, T>(
        &'a self,
        index: usize,
        expected: Tag,
        decode: impl FnOnce(&'a TaggedValue) -> Option<T>,
    ) -> Result<T, ListError> {
        let value = self.items.get(index).ok_or(ListError::IndexOutOfRange {
            index: index as isize,
            len: self.items.len(),
        })?;
        decode(value).ok_or_else(|| {
            log::debug!("tagged read at {index}: expected '{expected}', found '{}'", value.tag());
            ListError::TagMismatch {
                index,
                expected,
                found: value.tag(),
            }
        })
    }

    fn grow_if_full(&mut self) {
        if self.items.len() >= self.capacity {
            self.capacity *= 2;
            self.items.reserve_exact(self.capacity - self.items.len());
        }
    }

    fn shrink_if_sparse(&mut self) {
        if self.capacity > 1 && self.items.len() <= self.capacity / 2 {
            self.capacity /= 2;
            self.items.shrink_to(self.capacity);
        }
    }
}

impl Default for TaggedList {
    fn default() -> Self {
        Self::new()
    }
}

impl Clone for TaggedList {
    fn clone(&self) -> Self {
        let mut out = TaggedList::new();
        self.copy_into(&mut out);
        out
    }
}

impl fmt::Display for TaggedList {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[")?;
        for (i, v) in self.items.iter().enumerate() {
            if i > 0 {
                write!(f, ", ")?;
            }
            write!(f, "{v}")?;
        }
        write!(f, "]")
    }
}

impl<V: Into<TaggedValue>> Extend<V> for TaggedList {
    fn extend<I: IntoIterator<Item = V>>(&mut self, iter: I) {
        for v in iter {
            self.push(v);
        }
    }
}

impl<'a> IntoIterator for &'a TaggedList {
    type Item = &'a TaggedValue;
    type IntoIter = std::slice::Iter<'a, TaggedValue>;

    fn into_iter(self) -> Self::IntoIter {
        self.items.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> TaggedList {
        let mut list = TaggedList::new();
        list.push(5i32);
        list.push("ab");
        list.push(2.5f64);
        list
    }

    // ── growth / shrink policy ────────────────────────────────────────────

    #[test]
    fn new_list_is_empty_with_capacity_one() {
        let list = TaggedList::new();
        assert_eq!(list.len(), 0);
        assert_eq!(list.capacity(), 1);
    }

    #[test]
    fn capacity_doubles_on_overflow() {
        let mut list = TaggedList::new();
        let mut seen = Vec::new();
        for i in 0..9 {
            list.push(i);
            seen.push(list.capacity());
        }
        assert_eq!(seen, vec![1, 2, 4, 4, 8, 8, 8, 8, 16]);
    }

    #[test]
    fn length_tracks_appends_minus_removals() {
        let mut list = TaggedList::new();
        for i in 0..20 {
            list.push(i);
            if i % 3 == 0 {
                list.pop();
            }
            assert!(list.capacity() >= list.len());
            assert!(list.capacity() >= 1);
        }
        assert_eq!(list.len(), 20 - 7);
    }

    #[test]
    fn pop_halves_capacity_at_half_full() {
        let mut list = TaggedList::new();
        for i in 0..5 {
            list.push(i);
        }
        assert_eq!(list.capacity(), 8);
        list.pop();
        assert_eq!((list.len(), list.capacity()), (4, 4));
        list.pop();
        assert_eq!((list.len(), list.capacity()), (3, 4));
        list.pop();
        assert_eq!((list.len(), list.capacity()), (2, 2));
    }

    #[test]
    fn capacity_never_drops_below_one() {
        let mut list = TaggedList::new();
        list.push(1);
        list.pop();
        assert!(list.pop().is_none());
        assert_eq!(list.capacity(), 1);
    }

    #[test]
    fn popped_string_matches_and_capacity_returns_to_tier() {
        let mut list = TaggedList::new();
        list.push(1);
        list.push(2);
        let tier = list.capacity();
        list.push(String::from("hello"));
        assert_eq!(list.capacity(), 4);

        let popped = list.pop().unwrap();
        assert_eq!(popped, TaggedValue::from("hello"));
        assert_eq!(list.capacity(), tier);
    }

    // ── indexing ──────────────────────────────────────────────────────────

    #[test]
    fn typed_reads_check_the_tag() {
        let list = sample();
        assert_eq!(list.get_i32(0), Ok(5));
        assert_eq!(list.get_str(1), Ok("ab"));
        assert_eq!(list.get_f64(2), Ok(2.5));
        assert_eq!(
            list.get_f64(1),
            Err(ListError::TagMismatch { index: 1, expected: Tag::F64, found: Tag::Str })
        );
        assert!(matches!(list.get_i32(7), Err(ListError::IndexOutOfRange { .. })));
    }

    #[test]
    fn insert_shifts_and_grows() {
        let mut list = sample();
        list.insert(1, 'x' as u8).unwrap();
        assert_eq!(list.to_string(), "[5, x, ab, 2.5]");
        assert_eq!(list.capacity(), 4);
        list.insert(4, true).unwrap();
        assert_eq!(list.capacity(), 8);
        assert!(list.insert(9, 1).is_err());
    }

    // ── deletion ──────────────────────────────────────────────────────────

    #[test]
    fn delete_supports_negative_indices() {
        let mut list = sample();
        let last = list.delete(-1).unwrap();
        assert_eq!(last, TaggedValue::F64(2.5));
        assert_eq!(list.to_string(), "[5, ab]");

        let wrapped = list.delete(-3).unwrap();
        assert_eq!(wrapped, TaggedValue::from("ab"));
    }

    #[test]
    fn delete_on_empty_is_reported() {
        let mut list = TaggedList::new();
        assert_eq!(list.delete(0), Err(ListError::Empty));
    }

    #[test]
    fn delete_range_resizes_exactly() {
        let mut list = TaggedList::new();
        list.extend(0..10);
        list.delete_range(2, 5);
        assert_eq!(list.len(), 7);
        assert_eq!(list.capacity(), 7);
        assert_eq!(list.to_string(), "[0, 1, 5, 6, 7, 8, 9]");
    }

    #[test]
    fn delete_range_accepts_reversed_bounds() {
        let mut list = TaggedList::new();
        list.extend(0..6);
        list.delete_range(4, 1);
        assert_eq!(list.to_string(), "[0, 4, 5]");
    }

    #[test]
    fn delete_range_leaving_one_slot_clears_everything() {
        let mut list = TaggedList::new();
        list.extend(0..4);
        list.delete_range(0, 3);
        assert!(list.is_empty());
        assert_eq!(list.capacity(), 1);
    }

    // ── search ────────────────────────────────────────────────────────────

    #[test]
    fn find_and_remove_string() {
        let mut list = sample();
        let needle = TaggedValue::from("ab");
        assert_eq!(list.find(&needle), Some(1));
        assert_eq!(list.remove(&needle), Some(1));
        assert_eq!(list.len(), 2);
        assert_eq!(list.get(0), Some(&TaggedValue::I32(5)));
        assert_eq!(list.get(1), Some(&TaggedValue::F64(2.5)));
    }

    #[test]
    fn remove_missing_leaves_list_untouched() {
        let mut list = sample();
        assert_eq!(list.remove(&TaggedValue::from("zz")), None);
        assert_eq!(list.to_string(), "[5, ab, 2.5]");
        assert_eq!(list.capacity(), 4);
    }

    #[test]
    fn count_matches_every_occurrence() {
        let mut list = TaggedList::new();
        list.extend(["m1", "m2", "m1"]);
        assert_eq!(list.count(&TaggedValue::from("m1")), 2);
        assert_eq!(list.count(&TaggedValue::from("m3")), 0);
    }

    // ── copy ──────────────────────────────────────────────────────────────

    #[test]
    fn copy_is_deep_for_scalars_strings_and_lists() {
        let mut inner = TaggedList::new();
        inner.push(1);
        let mut src = sample();
        src.push(inner);

        let mut dest = TaggedList::new();
        src.copy_into(&mut dest);
        assert_eq!(dest.capacity(), src.capacity());

        src.delete(0).unwrap();
        src.clear();

        assert_eq!(dest.to_string(), "[5, ab, 2.5, [1]]");
        assert_eq!(dest.get_list(3).map(TaggedList::len), Ok(1));
    }

    #[test]
    fn copy_nested_list_is_independent() {
        let mut inner = TaggedList::new();
        inner.push("x");
        let mut src = TaggedList::new();
        src.push(inner);

        let dest = src.clone();
        if let Some(TaggedValue::List(l)) = src.items.get_mut(0) {
            l.push("y");
        }
        assert_eq!(src.to_string(), "[[x, y]]");
        assert_eq!(dest.to_string(), "[[x]]");
    }

    #[test]
    fn copy_keeps_handles_as_raw_references() {
        let target = 42u64;
        let mut src = TaggedList::new();
        src.push(Handle::of(&target));
        let dest = src.clone();
        assert_eq!(dest.get_handle(0), Ok(Handle::of(&target)));
    }

    // ── clear / display ───────────────────────────────────────────────────

    #[test]
    fn clear_resets_to_initial_state() {
        let mut list = TaggedList::new();
        list.extend(0..7);
        list.clear();
        assert_eq!((list.len(), list.capacity()), (0, 1));
    }

    #[test]
    fn display_and_type_signature() {
        let list = sample();
        assert_eq!(list.to_string(), "[5, ab, 2.5]");
        assert_eq!(list.type_signature(), "[i, s, d]");
        assert_eq!(TaggedList::new().to_string(), "[]");
    }
}
