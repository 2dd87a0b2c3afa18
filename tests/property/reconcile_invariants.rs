//! Property tests for the reconciliation engine.
//!
//! Random path lists (version-shaped and arbitrary, with deliberate
//! duplicates and overlap between the sides) are diffed and the result is
//! checked against the full accounting contract: balanced counts, index
//! bounds, sentinel discipline, single-use of every index, and the
//! byte-level meaning of each status.

use proptest::prelude::*;
use proptest::test_runner::TestCaseError;

use reconcile_rs::{diff_with_workers, identity, DiffResult, Status, NULL_INDEX};

fn path() -> impl Strategy<Value = String> {
    prop_oneof![
        3 => "(lib)?[a-z]{1,6}\\.so\\.[0-9]{1,2}(\\.[0-9]{1,2}){0,2}",
        3 => "[a-z]{1,6}-[0-9]{1,2}\\.[0-9]{1,2}(\\.[0-9]{1,2})?(-r[0-9]{1,2})?",
        2 => "[a-z]{1,5}\\.[0-9]\\.[0-9]\\.[0-9]\\.(so|dylib)",
        2 => "[a-z]{1,8}(\\.[a-z]{1,3})?",
        1 => "[a-z]{1,4}-[0-9]\\.[0-9]\\.Q1[A-Za-z0-9]{3,8}\\.(post-install|trigger)",
    ]
}

fn path_lists() -> impl Strategy<Value = (Vec<String>, Vec<String>)> {
    // Draw one pool and split overlapping slices out of it so the two
    // sides genuinely share files, identities, and duplicates.
    (
        proptest::collection::vec(path(), 0..40),
        0.0f64..1.0,
        0.0f64..1.0,
    )
        .prop_map(|(pool, cut_a, cut_b)| {
            let a = (pool.len() as f64 * cut_a) as usize;
            let b = (pool.len() as f64 * cut_b) as usize;
            let old: Vec<String> = pool[..a.max(b)].to_vec();
            let cur: Vec<String> = pool[a.min(b)..].to_vec();
            (old, cur)
        })
}

fn check_invariants(r: &DiffResult, old: &[String], cur: &[String]) -> Result<(), TestCaseError> {
    // With byte-duplicates on both sides, an exact pairing can consume the
    // duplicate the exact key points at while the identity key still names
    // another byte-equal entry; the leftover then pairs as Updated despite
    // equal bytes. Only duplicate-free inputs pin Updated to "bytes differ".
    let dup_free = {
        use std::collections::HashSet;
        old.iter().collect::<HashSet<_>>().len() == old.len()
            && cur.iter().collect::<HashSet<_>>().len() == cur.len()
    };

    let unchanged = r.count(Status::Unchanged);
    let updated = r.count(Status::Updated);
    let removed = r.count(Status::Removed);
    let added = r.count(Status::Added);

    // Counts balance against entries and both inputs.
    prop_assert_eq!((unchanged + updated + removed + added) as usize, r.len());
    prop_assert_eq!((unchanged + updated + removed) as usize, old.len());
    prop_assert_eq!((unchanged + updated + added) as usize, cur.len());

    let mut old_seen = vec![false; old.len()];
    let mut cur_seen = vec![false; cur.len()];

    for (status, e) in r.all() {
        match status {
            Status::Unchanged | Status::Updated => {
                prop_assert!((e.old as usize) < old.len());
                prop_assert!((e.new as usize) < cur.len());

                let o = old[e.old as usize].as_bytes();
                let c = cur[e.new as usize].as_bytes();
                if status == Status::Unchanged {
                    prop_assert_eq!(o, c, "unchanged entries must be byte-equal");
                } else {
                    prop_assert!(identity::equal(o, c), "updated entries share identity");
                    if dup_free {
                        prop_assert_ne!(o, c, "updated entries must differ in bytes");
                    }
                }
            }
            Status::Removed => {
                prop_assert!((e.old as usize) < old.len());
                prop_assert_eq!(e.new, NULL_INDEX);
            }
            Status::Added => {
                prop_assert!((e.new as usize) < cur.len());
                prop_assert_eq!(e.old, NULL_INDEX);
            }
        }

        // Every old index exactly once; every cur index at most once.
        if e.old != NULL_INDEX {
            prop_assert!(!old_seen[e.old as usize], "old index used twice");
            old_seen[e.old as usize] = true;
        }
        if e.new != NULL_INDEX {
            prop_assert!(!cur_seen[e.new as usize], "cur index used twice");
            cur_seen[e.new as usize] = true;
        }
    }

    prop_assert!(old_seen.iter().all(|&b| b), "old index missing from result");
    Ok(())
}

proptest! {
    #[test]
    fn invariants_hold_single_worker((old, cur) in path_lists()) {
        let r = diff_with_workers(&old, &cur, 1);
        check_invariants(&r, &old, &cur)?;
    }

    #[test]
    fn invariants_hold_multi_worker((old, cur) in path_lists(), workers in 2usize..8) {
        let r = diff_with_workers(&old, &cur, workers);
        check_invariants(&r, &old, &cur)?;
    }

    /// Entries of single-worker runs are reproducible bit for bit.
    #[test]
    fn single_worker_is_deterministic((old, cur) in path_lists()) {
        let first = diff_with_workers(&old, &cur, 1);
        let again = diff_with_workers(&old, &cur, 1);
        prop_assert_eq!(first.entries(), again.entries());
    }

    /// Counts are worker-count-independent even when entry order is not.
    #[test]
    fn counts_ignore_worker_count((old, cur) in path_lists(), workers in 2usize..8) {
        let base = diff_with_workers(&old, &cur, 1);
        let multi = diff_with_workers(&old, &cur, workers);

        // Old entries sharing an identity race for the same current file;
        // the claim winner is scheduling-dependent, so per-status totals
        // are only pinned down when old identities are pairwise distinct.
        let all_unique = old.iter().enumerate().all(|(x, a)| {
            old[x + 1..]
                .iter()
                .all(|b| !identity::equal(a.as_bytes(), b.as_bytes()))
        });

        if all_unique {
            prop_assert_eq!(base.count(Status::Unchanged), multi.count(Status::Unchanged));
            prop_assert_eq!(base.count(Status::Updated), multi.count(Status::Updated));
            prop_assert_eq!(base.count(Status::Removed), multi.count(Status::Removed));
            prop_assert_eq!(base.count(Status::Added), multi.count(Status::Added));
            prop_assert_eq!(base.len(), multi.len());
        }
    }
}
