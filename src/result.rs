//! Reconciliation output: statuses, entries, and the result container.

use std::sync::atomic::{AtomicU32, Ordering};

/// Index value meaning "no index" in [`Entry`] fields.
///
/// Removed entries carry it in `new`, Added entries in `old`. Callers must
/// test against it before indexing into their input lists.
pub const NULL_INDEX: u32 = 0xFFFF_FFFF;

/// Classification of one file across the old and current lists.
///
/// The ordinal values are contractual: [`DiffResult`] counts are indexed by
/// them and [`Entry::status`] stores them in its low byte.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[repr(u32)]
pub enum Status {
    /// Byte-identical path present in both lists.
    Unchanged = 0,
    /// Same identity, different bytes (a version change).
    Updated = 1,
    /// Present only in the old list.
    Removed = 2,
    /// Present only in the current list.
    Added = 3,
}

impl Status {
    /// Decodes a raw status word, masking the reserved upper bits.
    ///
    /// Returns `None` for low-byte values outside the four ordinals.
    #[inline]
    pub fn from_raw(raw: u32) -> Option<Status> {
        match raw & 0xFF {
            0 => Some(Status::Unchanged),
            1 => Some(Status::Updated),
            2 => Some(Status::Removed),
            3 => Some(Status::Added),
            _ => None,
        }
    }
}

/// One file reconciliation record.
///
/// Unchanged and Updated entries carry valid indices into both input
/// lists. Removed entries have `new == NULL_INDEX`; Added entries have
/// `old == NULL_INDEX`.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Entry {
    /// Index into the old list, or [`NULL_INDEX`].
    pub old: u32,
    /// Index into the current list, or [`NULL_INDEX`].
    pub new: u32,
    /// Status ordinal in the low byte; upper bits are reserved and must be
    /// masked on read.
    pub status: u32,
}

impl Entry {
    #[inline]
    pub(crate) fn new(old: u32, new: u32, status: Status) -> Self {
        Self {
            old,
            new,
            status: status as u32,
        }
    }

    /// Decoded status of this entry.
    ///
    /// Entries produced by this crate always carry one of the four
    /// ordinals; the reserved upper bits are masked off.
    #[inline]
    pub fn status(&self) -> Status {
        match self.status & 0xFF {
            0 => Status::Unchanged,
            1 => Status::Updated,
            2 => Status::Removed,
            _ => Status::Added,
        }
    }
}

/// Complete output of one reconciliation run.
///
/// Entries are ordered with all Unchanged/Updated/Removed records before
/// all Added records; within each group, ascending worker then ascending
/// input index. Counts are index-parallel with [`Status`] ordinals and
/// always sum to `len()`.
#[derive(Default)]
pub struct DiffResult {
    entries: Vec<Entry>,
    counts: [AtomicU32; 4],
}

impl DiffResult {
    pub(crate) fn from_parts(entries: Vec<Entry>, counts: [u32; 4]) -> Self {
        Self {
            entries,
            counts: counts.map(AtomicU32::new),
        }
    }

    /// Number of entries with the given status.
    ///
    /// Counts are finalized before the result is returned; the atomic load
    /// only makes concurrent reads by observers well-defined.
    #[inline]
    pub fn count(&self, status: Status) -> u32 {
        self.counts[status as usize].load(Ordering::Relaxed)
    }

    /// All entries, in result order.
    #[inline]
    pub fn entries(&self) -> &[Entry] {
        &self.entries
    }

    /// Total number of entries.
    #[inline]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns whether the result holds no entries.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Iterates over all entries with their decoded status.
    ///
    /// The iterator is lazy and restartable; each call starts fresh.
    pub fn all(&self) -> impl Iterator<Item = (Status, Entry)> + '_ {
        self.entries.iter().map(|e| (e.status(), *e))
    }

    /// Iterates over entries whose status equals `status`.
    ///
    /// Lazy and restartable like [`all`](Self::all); consumers may stop
    /// early at no cost.
    pub fn filter(&self, status: Status) -> impl Iterator<Item = Entry> + '_ {
        self.entries
            .iter()
            .copied()
            .filter(move |e| e.status() == status)
    }
}

impl std::fmt::Debug for DiffResult {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DiffResult")
            .field("entries", &self.entries.len())
            .field("unchanged", &self.count(Status::Unchanged))
            .field("updated", &self.count(Status::Updated))
            .field("removed", &self.count(Status::Removed))
            .field("added", &self.count(Status::Added))
            .finish()
    }
}
