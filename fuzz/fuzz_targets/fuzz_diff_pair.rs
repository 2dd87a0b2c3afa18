//! Fuzz target: reconcile a single old/current path pair.
//!
//! # Input Format
//!
//! The input is split at the first null byte: `[old] 0x00 [cur]`. Without
//! a null byte, the whole input is the old path and the current side gets
//! one empty path.
//!
//! # Running
//!
//! ```bash
//! cargo +nightly fuzz run fuzz_diff_pair
//! ```

#![no_main]

use libfuzzer_sys::fuzz_target;

use reconcile_rs::{diff, Status};

fuzz_target!(|data: &[u8]| {
    let (a, b) = match data.iter().position(|&c| c == 0) {
        Some(pos) => (&data[..pos], &data[pos + 1..]),
        None => (data, &[][..]),
    };

    let r = diff(&[a], &[b]);

    let total = r.count(Status::Unchanged)
        + r.count(Status::Updated)
        + r.count(Status::Removed)
        + r.count(Status::Added);
    assert_eq!(total as usize, r.len());

    // One old file, one current file: each side accounts for exactly one.
    assert_eq!(
        r.count(Status::Unchanged) + r.count(Status::Updated) + r.count(Status::Removed),
        1
    );
    assert_eq!(
        r.count(Status::Unchanged) + r.count(Status::Updated) + r.count(Status::Added),
        1
    );
});
