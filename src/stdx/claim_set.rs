//! Lock-free [`ClaimSet`]: single-winner bit claiming over an index space.
//!
//! # Invariants
//! - Bits live in `AtomicU64` words; `words.len() == len.div_ceil(64)`.
//! - A bit, once set, is never cleared for the lifetime of the set.
//!
//! # Ordering
//! All operations use `Relaxed` ordering. The `fetch_or` atomicity alone
//! guarantees exactly one caller observes "was-zero" per bit, and no
//! dependent data is published through the set — winners and losers both
//! re-read shared inputs that were frozen before claiming began.

#[cfg(loom)]
use loom::sync::atomic::{AtomicU64, Ordering};
#[cfg(not(loom))]
use std::sync::atomic::{AtomicU64, Ordering};

/// Grow-never bitset where concurrent callers race to claim indices.
///
/// [`try_claim`](Self::try_claim) returns `true` for exactly one of any
/// number of concurrent callers on the same index, which makes the set a
/// wait-free arbiter for "this slot is taken" decisions.
pub struct ClaimSet {
    words: Box<[AtomicU64]>,
    len: usize,
}

impl std::fmt::Debug for ClaimSet {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ClaimSet")
            .field("len", &self.len)
            .field("words", &self.words.len())
            .finish()
    }
}

impl ClaimSet {
    /// Creates a set covering indices `0..len`, all unclaimed.
    ///
    /// `len == 0` is valid and yields a set on which no index can be
    /// claimed.
    pub fn new(len: usize) -> Self {
        let words = (0..len.div_ceil(64)).map(|_| AtomicU64::new(0)).collect();
        Self { words, len }
    }

    /// Atomically claims index `idx`, returning `true` iff this caller won.
    ///
    /// # Panics
    ///
    /// Panics (debug) if `idx >= len`.
    #[inline(always)]
    pub fn try_claim(&self, idx: usize) -> bool {
        debug_assert!(idx < self.len, "claim index out of bounds");
        let mask = 1u64 << (idx & 63);
        let prev = self.words[idx >> 6].fetch_or(mask, Ordering::Relaxed);
        prev & mask == 0
    }

    /// Returns whether index `idx` has been claimed.
    ///
    /// A `false` answer may be stale under concurrent claiming; callers
    /// that need the authoritative answer race through
    /// [`try_claim`](Self::try_claim) instead.
    #[inline(always)]
    pub fn is_claimed(&self, idx: usize) -> bool {
        debug_assert!(idx < self.len, "claim index out of bounds");
        self.words[idx >> 6].load(Ordering::Relaxed) & (1u64 << (idx & 63)) != 0
    }

    /// Number of addressable indices.
    #[inline]
    pub fn len(&self) -> usize {
        self.len
    }

    /// Returns whether the set covers no indices at all.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }
}


#[cfg(loom)]
mod loom_tests {
    use super::*;
    use loom::thread;

    /// Two threads race one index under the model checker; exactly one wins.
    #[test]
    fn one_winner_under_loom() {
        loom::model(|| {
            let set = loom::sync::Arc::new(ClaimSet::new(64));
            let other = set.clone();

            let handle = thread::spawn(move || other.try_claim(0));

            let won_here = set.try_claim(0);
            let won_there = handle.join().unwrap();

            assert!(won_here ^ won_there, "exactly one winner required");
            assert!(set.is_claimed(0));
        });
    }

    /// Distinct bits in the same word survive concurrent claiming.
    #[test]
    fn distinct_bits_both_land() {
        loom::model(|| {
            let set = loom::sync::Arc::new(ClaimSet::new(64));
            let other = set.clone();

            let handle = thread::spawn(move || {
                assert!(other.try_claim(1));
            });

            assert!(set.try_claim(0));
            handle.join().unwrap();

            assert!(set.is_claimed(0));
            assert!(set.is_claimed(1));
        });
    }
}
