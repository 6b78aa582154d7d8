use crate::list::TaggedList;

use super::decode::{Command, Commands};
use super::record::{encode_lift, is_lift_slot, BatchedPrimitive, PenRecord, STRIDE};

/// Append-only command stream for one frame.
///
/// Backed by a [`TaggedList`] of fixed 9-slot strides: pen records, lift
/// markers and two-stride batched primitives.
#[derive(Debug, Default, Clone)]
pub struct CommandBuffer {
    slots: TaggedList,
}

impl CommandBuffer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Wraps an existing slot stream, e.g. one captured from another canvas.
    ///
    /// The slots are not validated here; malformed strides surface as
    /// [`DecodeError`](super::DecodeError)s during replay.
    pub fn from_list(slots: TaggedList) -> Self {
        Self { slots }
    }

    /// Drops every command and resets the backing storage to capacity 1.
    pub fn clear(&mut self) {
        self.slots.clear();
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }

    /// Number of raw slots (not commands).
    #[inline]
    pub fn slot_len(&self) -> usize {
        self.slots.len()
    }

    #[inline]
    pub fn as_list(&self) -> &TaggedList {
        &self.slots
    }

    pub fn commands(&self) -> Commands<'_> {
        Commands::new(self.slots.as_slice())
    }

    /// The final stride, if it is a pen record.
    pub fn last_record(&self) -> Option<PenRecord> {
        let start = self.slots.len().checked_sub(STRIDE)?;
        match Commands::new(&self.slots.as_slice()[start..]).next()? {
            Ok(Command::Pen(rec)) => Some(rec),
            _ => None,
        }
    }

    pub fn ends_with_lift(&self) -> bool {
        let len = self.slots.len();
        len >= STRIDE && self.slots.as_slice()[len - STRIDE..].iter().all(is_lift_slot)
    }

    /// Appends `record` unless it equals the most recent pen record.
    ///
    /// Returns whether anything was written.
    pub fn push_record(&mut self, record: &PenRecord) -> bool {
        if self.last_record().as_ref() == Some(record) {
            return false;
        }
        record.encode(&mut self.slots);
        true
    }

    /// Appends a lift marker unless the buffer is empty or already ends with one.
    pub fn push_lift(&mut self) -> bool {
        if self.slots.is_empty() || self.ends_with_lift() {
            return false;
        }
        encode_lift(&mut self.slots);
        true
    }

    pub fn push_batch(&mut self, primitive: &BatchedPrimitive) {
        primitive.encode(&mut self.slots);
    }
}
