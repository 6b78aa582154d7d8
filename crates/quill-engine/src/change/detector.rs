use log::trace;

use crate::list::TaggedList;

/// Length plus wrapping sum of every slot's raw bits.
///
/// Non-cryptographic and best-effort: reordering slots, or two edits whose
/// bit deltas cancel, leave the fingerprint unchanged.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Default)]
pub struct Fingerprint {
    pub len: usize,
    pub sum: u64,
}

impl Fingerprint {
    pub fn of(list: &TaggedList) -> Self {
        Self {
            len: list.len(),
            sum: list.iter().fold(0u64, |acc, v| acc.wrapping_add(v.raw_bits())),
        }
    }
}

/// Decides once per frame whether the buffer needs to be replayed.
#[derive(Debug, Default)]
pub struct ChangeDetector {
    last: Option<Fingerprint>,
}

impl ChangeDetector {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns `true` when `list` differs from what the previous call saw.
    ///
    /// The first call after construction or [`invalidate`](Self::invalidate)
    /// always reports dirty.
    pub fn check(&mut self, list: &TaggedList) -> bool {
        let now = Fingerprint::of(list);
        let dirty = self.last != Some(now);
        trace!(
            "change: len={} sum={:#018x} dirty={dirty}",
            now.len, now.sum
        );
        self.last = Some(now);
        dirty
    }

    /// Forces the next [`check`](Self::check) to report dirty.
    pub fn invalidate(&mut self) {
        self.last = None;
    }

    pub fn last(&self) -> Option<Fingerprint> {
        self.last
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn list_of(values: &[f64]) -> TaggedList {
        let mut list = TaggedList::new();
        list.extend(values.iter().copied());
        list
    }

    #[test]
    fn first_check_is_dirty() {
        let mut det = ChangeDetector::new();
        assert!(det.check(&TaggedList::new()));
        assert!(!det.check(&TaggedList::new()));
    }

    #[test]
    fn unchanged_list_is_clean() {
        let mut det = ChangeDetector::new();
        let list = list_of(&[1.0, 2.0, 3.0]);
        det.check(&list);
        assert!(!det.check(&list));
    }

    #[test]
    fn single_value_change_is_dirty() {
        let mut det = ChangeDetector::new();
        det.check(&list_of(&[1.0, 2.0, 3.0]));
        assert!(det.check(&list_of(&[1.0, 2.5, 3.0])));
    }

    #[test]
    fn length_change_is_dirty() {
        let mut det = ChangeDetector::new();
        det.check(&list_of(&[1.0]));
        let mut longer = list_of(&[1.0]);
        longer.push(0u8);
        assert!(det.check(&longer));
    }

    #[test]
    fn invalidate_forces_dirty() {
        let mut det = ChangeDetector::new();
        let list = list_of(&[4.0]);
        det.check(&list);
        det.invalidate();
        assert!(det.check(&list));
    }

    // ── known blind spots ─────────────────────────────────────────────────

    #[test]
    fn swapped_slots_go_unnoticed() {
        let mut det = ChangeDetector::new();
        det.check(&list_of(&[1.0, 2.0]));
        assert!(!det.check(&list_of(&[2.0, 1.0])));
    }
}
