//! Fuzz target: reconcile two newline-separated path lists.
//!
//! Exercises sharding, claim arbitration, and the merge under arbitrary
//! list contents, including duplicates and empty lines.
//!
//! # Input Format
//!
//! The input is split at the first null byte into two halves; each half is
//! split on `\n`, dropping empty lines.
//!
//! # Running
//!
//! ```bash
//! cargo +nightly fuzz run fuzz_diff_lists
//! ```

#![no_main]

use libfuzzer_sys::fuzz_target;

use reconcile_rs::{diff, Status, NULL_INDEX};

fn split_lines(bs: &[u8]) -> Vec<&[u8]> {
    bs.split(|&c| c == b'\n').filter(|l| !l.is_empty()).collect()
}

fuzz_target!(|data: &[u8]| {
    let (a, b) = match data.iter().position(|&c| c == 0) {
        Some(pos) => (&data[..pos], &data[pos + 1..]),
        None => (data, &[][..]),
    };

    let old = split_lines(a);
    let cur = split_lines(b);

    let r = diff(&old, &cur);

    let unchanged = r.count(Status::Unchanged);
    let updated = r.count(Status::Updated);
    let removed = r.count(Status::Removed);
    let added = r.count(Status::Added);

    assert_eq!((unchanged + updated + removed + added) as usize, r.len());
    assert_eq!((unchanged + updated + removed) as usize, old.len());
    assert_eq!((unchanged + updated + added) as usize, cur.len());

    for (status, e) in r.all() {
        match status {
            Status::Unchanged | Status::Updated => {
                assert!((e.old as usize) < old.len() && (e.new as usize) < cur.len());
            }
            Status::Removed => {
                assert!((e.old as usize) < old.len());
                assert_eq!(e.new, NULL_INDEX);
            }
            Status::Added => {
                assert!((e.new as usize) < cur.len());
                assert_eq!(e.old, NULL_INDEX);
            }
        }
    }
});
