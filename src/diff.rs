//! Phased parallel reconciliation of two file lists.
//!
//! The engine pairs old files with current files by hash, never by edit
//! distance, so a run is expected linear in the combined list length:
//!
//! ```text
//! old ──┐
//!       ├─ hash ─► shard table (from cur) ─► match old ─► merge ─► DiffResult
//! cur ──┘                                    detect adds ─┘
//! ```
//!
//! Phases run under fork-join barriers (`std::thread::scope`); within a
//! phase, workers own disjoint index ranges. Cross-worker state is limited
//! to the shard mutexes while populating, lock-free shard reads after the
//! freeze, and the claim set during matching and addition detection.
//!
//! A worker panic (the only failure mode is allocation) is re-raised after
//! join, so a partially reconciled result can never escape.

use std::panic;
use std::sync::OnceLock;
use std::thread;

use ahash::RandomState;

use crate::identity::{self, hash_all, EXACT_FLAG};
use crate::result::{DiffResult, Entry, Status, NULL_INDEX};
use crate::shard::ShardTable;
use crate::stdx::ClaimSet;

/// Process-wide hashing seed, created on first use.
///
/// Hashing is deterministic within a process; values are not stable across
/// processes.
fn seed() -> &'static RandomState {
    static SEED: OnceLock<RandomState> = OnceLock::new();
    SEED.get_or_init(RandomState::new)
}

/// Reconciles `old` against `cur` using one worker per available core.
///
/// Equivalent to [`diff_with_workers`] with `num_cpus::get().max(1)`.
///
/// # Examples
///
/// ```
/// use reconcile_rs::{diff, Status};
///
/// let old = ["libfoo.so.1.0.0", "README.md", "gone.txt"];
/// let cur = ["libfoo.so.2.0.0", "README.md", "new.txt"];
///
/// let r = diff(&old, &cur);
/// assert_eq!(r.count(Status::Updated), 1);
/// assert_eq!(r.count(Status::Unchanged), 1);
/// assert_eq!(r.count(Status::Removed), 1);
/// assert_eq!(r.count(Status::Added), 1);
/// ```
pub fn diff<S>(old: &[S], cur: &[S]) -> DiffResult
where
    S: AsRef<[u8]> + Sync,
{
    diff_with_workers(old, cur, num_cpus::get().max(1))
}

/// Reconciles `old` against `cur` with an explicit worker count.
///
/// `workers` is clamped to at least 1. Single-worker runs are fully
/// deterministic; multi-worker runs have deterministic counts, and
/// deterministic entries unless the input contains several old files
/// competing for one current file (the claim race picks the winner).
///
/// Lists longer than `u32::MAX - 1` violate the index contract (the top
/// index is reserved for [`NULL_INDEX`]).
pub fn diff_with_workers<S>(old: &[S], cur: &[S], workers: usize) -> DiffResult
where
    S: AsRef<[u8]> + Sync,
{
    let workers = workers.max(1);

    if old.is_empty() && cur.is_empty() {
        return DiffResult::default();
    }

    debug_assert!(
        old.len() < NULL_INDEX as usize && cur.len() < NULL_INDEX as usize,
        "list length exhausts the u32 index space"
    );

    let seed = seed();

    // Phase 1: hash both lists.
    let (old_id, old_ex) = hash_all(old, workers, seed);
    let (cur_id, cur_ex) = hash_all(cur, workers, seed);

    // Phase 2: register every current file in the shard table, then freeze
    // it so the match phase reads without locks.
    let table = ShardTable::with_expected(cur.len());
    if !cur.is_empty() {
        let chunk = cur.len().div_ceil(workers.min(cur.len()));
        thread::scope(|s| {
            for (w, (ids, exs)) in cur_id.chunks(chunk).zip(cur_ex.chunks(chunk)).enumerate() {
                let table = &table;
                s.spawn(move || {
                    let base = w * chunk;
                    for (k, (&id, &ex)) in ids.iter().zip(exs).enumerate() {
                        table.insert_file(id, ex, (base + k) as u32);
                    }
                });
            }
        });
    }
    let table = table.freeze();

    // Phase 3: pair old files with current ones. Workers claim the matched
    // current index so no current file is consumed twice.
    let claims = ClaimSet::new(cur.len());

    let mut matched: Vec<(Vec<Entry>, [u32; 3])> = Vec::new();
    if !old.is_empty() {
        let chunk = old.len().div_ceil(workers.min(old.len()));
        matched = thread::scope(|s| {
            let handles: Vec<_> = (0..old.len())
                .step_by(chunk)
                .map(|low| {
                    let high = (low + chunk).min(old.len());
                    let (table, claims) = (&table, &claims);
                    let (old_id, old_ex) = (&old_id, &old_ex);

                    s.spawn(move || {
                        let mut entries = Vec::with_capacity(high - low);
                        let mut tally = [0u32; 3];

                        for i in low..high {
                            let shard = table.shard(old_id[i]);

                            // Exact match first. The byte compare screens
                            // exact-hash collisions before claiming.
                            if let Some(&m) = shard.get(&(old_ex[i] | EXACT_FLAG)) {
                                if old[i].as_ref() == cur[m as usize].as_ref()
                                    && claims.try_claim(m as usize)
                                {
                                    entries.push(Entry::new(i as u32, m, Status::Unchanged));
                                    tally[Status::Unchanged as usize] += 1;
                                    continue;
                                }
                            }

                            // Identity match second. `is_claimed` is a
                            // fast-path skip; `try_claim` arbitrates races,
                            // and `equal` screens identity-hash collisions.
                            if let Some(&m) = shard.get(&old_id[i]) {
                                if !claims.is_claimed(m as usize)
                                    && identity::equal(old[i].as_ref(), cur[m as usize].as_ref())
                                    && claims.try_claim(m as usize)
                                {
                                    entries.push(Entry::new(i as u32, m, Status::Updated));
                                    tally[Status::Updated as usize] += 1;
                                    continue;
                                }
                            }

                            entries.push(Entry::new(i as u32, NULL_INDEX, Status::Removed));
                            tally[Status::Removed as usize] += 1;
                        }

                        (entries, tally)
                    })
                })
                .collect();

            handles
                .into_iter()
                .map(|h| h.join().unwrap_or_else(|p| panic::resume_unwind(p)))
                .collect()
        });
    }

    // Phase 4: every unclaimed current index is an addition. Read-only on
    // shared state.
    let mut additions: Vec<Vec<Entry>> = Vec::new();
    if !cur.is_empty() {
        let chunk = cur.len().div_ceil(workers.min(cur.len()));
        additions = thread::scope(|s| {
            let handles: Vec<_> = (0..cur.len())
                .step_by(chunk)
                .map(|low| {
                    let high = (low + chunk).min(cur.len());
                    let claims = &claims;

                    s.spawn(move || {
                        let mut entries = Vec::with_capacity((high - low) / 4);
                        for m in low..high {
                            if !claims.is_claimed(m) {
                                entries.push(Entry::new(NULL_INDEX, m as u32, Status::Added));
                            }
                        }
                        entries
                    })
                })
                .collect();

            handles
                .into_iter()
                .map(|h| h.join().unwrap_or_else(|p| panic::resume_unwind(p)))
                .collect()
        });
    }

    // Phase 5: merge per-worker buffers in worker order, matches before
    // additions.
    let total = matched.iter().map(|(e, _)| e.len()).sum::<usize>()
        + additions.iter().map(Vec::len).sum::<usize>();

    let mut entries = Vec::with_capacity(total);
    let mut counts = [0u32; 4];

    for (worker_entries, worker_tally) in matched {
        entries.extend_from_slice(&worker_entries);
        for (count, tally) in counts.iter_mut().zip(worker_tally) {
            *count += tally;
        }
    }

    for worker_entries in additions {
        counts[Status::Added as usize] += worker_entries.len() as u32;
        entries.extend(worker_entries);
    }

    DiffResult::from_parts(entries, counts)
}
