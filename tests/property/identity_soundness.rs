//! Property tests for the identity layer: matcher bounds, equality laws,
//! and hash consistency.
//!
//! Inputs are raw byte vectors, not strings, because the matchers promise
//! to hold their invariants on any content at all.

use ahash::RandomState;
use proptest::prelude::*;

use reconcile_rs::identity::{embedded, equal, hash_pair, script, soname, spans, suffix};

/// Bytes biased toward version-shaped content so the matchers actually
/// fire, mixed with fully arbitrary bytes.
fn path_bytes() -> impl Strategy<Value = Vec<u8>> {
    prop_oneof![
        3 => "[a-z/]{0,12}(lib)?[a-z]{1,8}(\\.so\\.[0-9]{1,3}(\\.[0-9]{1,3}){0,2})?"
            .prop_map(String::into_bytes),
        3 => "[a-z]{1,10}-[0-9]{1,2}\\.[0-9]{1,2}\\.[0-9]{1,2}(-r[0-9]{1,2})?"
            .prop_map(String::into_bytes),
        2 => "[a-z]{1,8}\\.[0-9]{1,2}\\.[0-9]{1,2}\\.[0-9]{1,2}\\.(so|dylib)"
            .prop_map(String::into_bytes),
        1 => "[a-z]{1,6}-[0-9]\\.[0-9]\\.Q1[A-Za-z0-9]{4,12}\\.(post-install|trigger|pre-upgrade)"
            .prop_map(String::into_bytes),
        3 => proptest::collection::vec(any::<u8>(), 0..64),
    ]
}

proptest! {
    /// Matchers stay within `[0, len]` and keep pair ordering.
    #[test]
    fn matcher_indices_stay_bounded(bs in path_bytes()) {
        let len = bs.len();

        prop_assert!(soname(&bs) <= len);
        prop_assert!(suffix(&bs) <= len);

        let (s, e) = embedded(&bs);
        prop_assert!(s <= len && e <= len);
        if s > 0 {
            prop_assert!(e > s);
        }

        let (s, e) = script(&bs);
        prop_assert!(s <= len && e <= len);
        if s > 0 {
            prop_assert!(e > s);
        }
    }

    /// Span results describe a valid identity decomposition.
    #[test]
    fn spans_describe_valid_ranges(bs in path_bytes()) {
        let (j, s, e) = spans(&bs);
        prop_assert!(j <= bs.len());
        prop_assert!(s <= e && e <= bs.len());
        if s == 0 {
            // Single-span shapes leave the second range empty.
            prop_assert_eq!(e, 0);
        }
    }

    /// Identity equality is reflexive.
    #[test]
    fn equal_is_reflexive(bs in path_bytes()) {
        prop_assert!(equal(&bs, &bs));
    }

    /// Identity equality is symmetric.
    #[test]
    fn equal_is_symmetric(a in path_bytes(), b in path_bytes()) {
        prop_assert_eq!(equal(&a, &b), equal(&b, &a));
    }

    /// Byte-equal inputs always share an identity.
    #[test]
    fn byte_equality_implies_identity(a in path_bytes()) {
        let b = a.clone();
        prop_assert!(equal(&a, &b));
    }

    /// Equal identities must hash identically, for any seed.
    #[test]
    fn equal_implies_same_identity_hash(a in path_bytes(), b in path_bytes(), k in any::<u64>()) {
        let seed = RandomState::with_seeds(k, k.rotate_left(17), !k, k ^ 0x9E37_79B9_7F4A_7C15);
        if equal(&a, &b) {
            let (ha, _) = hash_pair(&a, &seed);
            let (hb, _) = hash_pair(&b, &seed);
            prop_assert_eq!(ha, hb);
        }
    }
}
