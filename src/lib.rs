//! Linear-time reconciliation of file path lists.
//!
//! Given an "old" and a "current" list of path strings, [`diff`] classifies
//! every file as Unchanged, Updated, Removed, or Added. Instead of edit
//! distance, it hashes each path twice — once over the full bytes (exact)
//! and once over the *identity*, the name stripped of version numbers and
//! package-manager revision/checksum noise — so `libfoo.so.1.0.0` pairing
//! with `libfoo.so.2.0.0` is an O(1) table hit, not a string search.
//!
//! High-level flow (one call):
//! 1) Hash both lists in parallel (identity + exact per path).
//! 2) Build a 256-way sharded `hash → index` table from the current list.
//! 3) Probe each old path: exact hit ⇒ Unchanged, identity hit ⇒ Updated,
//!    neither ⇒ Removed; a lock-free claim set keeps every current index
//!    single-use.
//! 4) Sweep unclaimed current indices ⇒ Added.
//! 5) Merge per-worker buffers into a [`DiffResult`].
//!
//! # Module map
//! - [`identity`]: pattern matchers, identity spans and equality, hashing.
//! - [`stdx`]: the lock-free [`stdx::ClaimSet`].
//! - `shard`, `diff`, `result`: table, engine, and output container.
//!
//! # Guarantees
//! - Inputs are arbitrary bytes; nothing here reads the filesystem or
//!   validates UTF-8.
//! - Counts always balance: every old index lands in exactly one
//!   Unchanged/Updated/Removed entry, every current index in at most one
//!   entry.
//! - Hash collisions are screened with byte comparisons before a pairing
//!   is accepted; a collision can cause a fall-through, never a wrong
//!   match.

pub mod identity;
pub mod stdx;

mod diff;
mod result;
mod shard;

pub use diff::{diff, diff_with_workers};
pub use result::{DiffResult, Entry, Status, NULL_INDEX};
