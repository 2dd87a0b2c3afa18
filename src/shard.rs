//! Sharded hash → index table pairing current files with old ones.
//!
//! One map per shard holds two kinds of key, told apart by the top bit:
//! identity keys (the identity hash as-is) and exact keys (the exact hash
//! with [`EXACT_FLAG`](crate::identity::EXACT_FLAG) OR-ed in). Hashes clear
//! that bit at the source, so the keyspaces cannot collide. Sharing one map
//! halves the per-shard overhead versus two maps and keeps both probes for
//! a path on the same cache lines.
//!
//! The table has a two-phase life: concurrent population behind per-shard
//! mutexes, then [`ShardTable::freeze`] unwraps the mutexes into a read-only
//! view. Lookups never contend because no writer exists once a
//! [`FrozenShardTable`] exists.

use std::sync::Mutex;

use ahash::AHashMap;

use crate::identity::EXACT_FLAG;

/// Shard count. 256 shards keep mutex contention negligible while the
/// selector stays a single mask of the identity hash's low byte.
const NUM_SHARDS: usize = 1 << SHARD_BITS;
const SHARD_BITS: u32 = 8;
const SHARD_MASK: u64 = (NUM_SHARDS - 1) as u64;

/// Write-phase table: per-shard mutexes around `hash → file index` maps.
pub(crate) struct ShardTable {
    shards: Vec<Mutex<AHashMap<u64, u32>>>,
}

impl ShardTable {
    /// Creates a table sized for `expected_files` current-side entries.
    ///
    /// Each shard preallocates `max(16, expected / 256 * 2)` slots (each
    /// file contributes two keys) to keep rehashing off the population
    /// path.
    pub(crate) fn with_expected(expected_files: usize) -> Self {
        let per_shard = (expected_files / NUM_SHARDS * 2).max(16);
        let shards = (0..NUM_SHARDS)
            .map(|_| Mutex::new(AHashMap::with_capacity(per_shard)))
            .collect();
        Self { shards }
    }

    /// Registers one current file under both of its keys.
    ///
    /// Identity key: insert-if-absent, so the first occurrence of an
    /// identity stays the representative for the whole run. Exact key:
    /// unconditional insert, so an exact duplicate resolves to the latest
    /// writer. The shard mutex is held only for this O(1) pair.
    pub(crate) fn insert_file(&self, identity_hash: u64, exact_hash: u64, index: u32) {
        let shard = &self.shards[(identity_hash & SHARD_MASK) as usize];
        let mut map = shard.lock().expect("shard mutex poisoned");

        map.entry(identity_hash).or_insert(index);
        map.insert(exact_hash | EXACT_FLAG, index);
    }

    /// Consumes the mutexes, yielding the lock-free read view.
    ///
    /// Callers must have joined all populating workers first; taking `self`
    /// by value makes a live writer impossible afterwards.
    pub(crate) fn freeze(self) -> FrozenShardTable {
        let shards = self
            .shards
            .into_iter()
            .map(|m| m.into_inner().expect("shard mutex poisoned"))
            .collect();
        FrozenShardTable { shards }
    }
}

/// Read-phase view: plain maps, no locks.
pub(crate) struct FrozenShardTable {
    shards: Vec<AHashMap<u64, u32>>,
}

impl FrozenShardTable {
    /// Returns the shard holding all keys for `identity_hash`.
    ///
    /// Both probes for a path (exact, then identity) go through the shard
    /// selected by its identity hash, mirroring how the keys were placed.
    #[inline]
    pub(crate) fn shard(&self, identity_hash: u64) -> &AHashMap<u64, u32> {
        &self.shards[(identity_hash & SHARD_MASK) as usize]
    }
}
