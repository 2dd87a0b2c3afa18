//! Two-level hashing of paths: identity hash + exact hash.
//!
//! Every path gets a pair of 64-bit hashes from one seeded hasher:
//! - the *exact* hash covers the whole byte slice;
//! - the *identity* hash covers only the identity spans, so two versions of
//!   the same file collide on purpose.
//!
//! Both hashes clear the top bit at the source. The reconciler stores both
//! kinds of key in one map per shard, with [`EXACT_FLAG`] OR-ed into exact
//! keys to keep the two keyspaces disjoint.
//!
//! Split-span identities (script, embedded) combine the prefix and suffix
//! hashes with XOR rather than hashing through a joined buffer; the spans
//! come from distinct positions, and any cross-pair collision is screened
//! by [`equal`](super::equal) before a match is accepted.

use std::thread;

use ahash::RandomState;

use super::pattern::{embedded, script, soname, suffix};

/// High bit distinguishing exact keys from identity keys within one map.
pub const EXACT_FLAG: u64 = 1 << 63;

/// Computes the `(identity_hash, exact_hash)` pair for one path.
///
/// The empty slice hashes to the same value on both levels, as does any
/// path with no recognized version shape.
#[inline]
pub fn hash_pair(bs: &[u8], seed: &RandomState) -> (u64, u64) {
    let exact = seed.hash_one(bs) & !EXACT_FLAG;

    if bs.is_empty() {
        return (exact, exact);
    }

    let i = soname(bs);
    if i > 0 {
        return (seed.hash_one(&bs[..i]) & !EXACT_FLAG, exact);
    }

    let (i, j) = script(bs);
    if i > 0 {
        return (
            (seed.hash_one(&bs[..i]) ^ seed.hash_one(&bs[j..])) & !EXACT_FLAG,
            exact,
        );
    }

    let (i, j) = embedded(bs);
    if i > 0 {
        return (
            (seed.hash_one(&bs[..i]) ^ seed.hash_one(&bs[j..])) & !EXACT_FLAG,
            exact,
        );
    }

    let i = suffix(bs);
    if i > 0 {
        return (seed.hash_one(&bs[..i]) & !EXACT_FLAG, exact);
    }

    (exact, exact)
}

/// Hashes every path in `files`, fanning out across `workers` threads.
///
/// Returns `(identity_hashes, exact_hashes)`, index-parallel with the
/// input. The index range is split into contiguous chunks of
/// `ceil(n / workers)`; output is identical for any worker count.
pub fn hash_all<S>(files: &[S], workers: usize, seed: &RandomState) -> (Vec<u64>, Vec<u64>)
where
    S: AsRef<[u8]> + Sync,
{
    let len = files.len();
    if len == 0 {
        return (Vec::new(), Vec::new());
    }

    let mut identity = vec![0u64; len];
    let mut exact = vec![0u64; len];

    let workers = workers.max(1).min(len);
    if workers == 1 {
        for (i, file) in files.iter().enumerate() {
            (identity[i], exact[i]) = hash_pair(file.as_ref(), seed);
        }
        return (identity, exact);
    }

    let chunk = len.div_ceil(workers);

    thread::scope(|s| {
        let work = identity
            .chunks_mut(chunk)
            .zip(exact.chunks_mut(chunk))
            .zip(files.chunks(chunk));

        for ((ids, exs), chunk_files) in work {
            s.spawn(move || {
                for (k, file) in chunk_files.iter().enumerate() {
                    (ids[k], exs[k]) = hash_pair(file.as_ref(), seed);
                }
            });
        }
    });

    (identity, exact)
}
