//! Semantic identity of versioned filenames.
//!
//! The identity of a path is what remains after stripping version numbers
//! and package-manager revision/checksum noise: `libfoo.so.1.0.0` and
//! `libfoo.so.2.0.0` share the identity `libfoo.so`. Identities drive
//! update detection — two paths with equal identities but unequal bytes
//! name the same file at different versions.
//!
//! An identity is at most two byte ranges of the original slice: a prefix
//! `bs[..j]` and, for shapes with noise in the middle, a suffix `bs[s..e]`.
//! [`spans`] computes the ranges, [`equal`] compares two identities byte
//! for byte, and [`hash`](crate::identity::hash) folds them into 64-bit
//! keys for table lookups.
//!
//! # Matcher cascade
//! The first matching shape wins: [`pattern::soname`] →
//! [`pattern::script`] → [`pattern::embedded`] → [`pattern::suffix`] →
//! no shape (the whole slice is its own identity). Shared-library
//! versioning is the strongest signal and the trailing-version matcher is
//! the most permissive, which fixes the order; reordering the cascade
//! changes identity classes.

pub mod hash;
pub mod pattern;

pub use hash::{hash_all, hash_pair, EXACT_FLAG};
pub use pattern::{embedded, script, soname, suffix};

/// Returns the byte ranges comprising the identity of `bs` as `(j, s, e)`:
/// the identity is `bs[..j]`, joined with `bs[s..e]` when `s > 0`.
///
/// Single-span shapes (soname, trailing version) and unversioned names
/// leave the second range empty (`s == e == 0`).
#[inline]
pub fn spans(bs: &[u8]) -> (usize, usize, usize) {
    let len = bs.len();

    let i = soname(bs);
    if i > 0 {
        return (i, 0, 0);
    }

    let (i, j) = script(bs);
    if i > 0 {
        return (i, j, len);
    }

    let (i, j) = embedded(bs);
    if i > 0 {
        return (i, j, len);
    }

    let i = suffix(bs);
    if i > 0 {
        return (i, 0, 0);
    }

    (len, 0, 0)
}

/// Returns whether two paths share an identity.
///
/// This is the authoritative equivalence: hash lookups are verified with
/// `equal` so a 63-bit collision can never manufacture a match. Reflexive
/// and symmetric; equal identities always produce equal identity hashes.
#[inline]
pub fn equal(old: &[u8], cur: &[u8]) -> bool {
    let (oj, os, oe) = spans(old);
    let (cj, cs, ce) = spans(cur);

    // Different prefix or second-span lengths cannot compare equal.
    if oj != cj || oe - os != ce - cs {
        return false;
    }

    old[..oj] == cur[..cj] && old[os..oe] == cur[cs..ce]
}
