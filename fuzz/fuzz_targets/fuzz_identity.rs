//! Fuzz target: identity extraction on arbitrary bytes.
//!
//! Checks the matcher bound contract and the equality laws; none of these
//! functions may panic or step outside the slice for any input.
//!
//! # Input Format
//!
//! The input is split at the first null byte into two byte strings.
//!
//! # Running
//!
//! ```bash
//! cargo +nightly fuzz run fuzz_identity
//! ```

#![no_main]

use libfuzzer_sys::fuzz_target;

use reconcile_rs::identity::{embedded, equal, script, soname, spans, suffix};

fuzz_target!(|data: &[u8]| {
    let (a, b) = match data.iter().position(|&c| c == 0) {
        Some(pos) => (&data[..pos], &data[pos + 1..]),
        None => (data, &[][..]),
    };

    for bs in [a, b] {
        let len = bs.len();

        assert!(soname(bs) <= len);
        assert!(suffix(bs) <= len);

        let (s, e) = embedded(bs);
        assert!(s <= len && e <= len);
        assert!(s == 0 || e > s);

        let (s, e) = script(bs);
        assert!(s <= len && e <= len);
        assert!(s == 0 || e > s);

        let (j, s, e) = spans(bs);
        assert!(j <= len && s <= e && e <= len);

        assert!(equal(bs, bs));
    }

    assert_eq!(equal(a, b), equal(b, a));
});
