//! Small, self-contained data structures backing the reconciler.
//!
//! # Module map
//! - `claim_set`: lock-free bitset where concurrent workers race to claim
//!   indices, with a guaranteed single winner per index.

pub mod claim_set;

pub use claim_set::ClaimSet;
