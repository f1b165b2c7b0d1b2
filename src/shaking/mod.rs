//! Structural shaking operators.
//!
//! Unlike the swap neighborhoods of the descent, these moves change the
//! number of clusters: [`divide`] splits one cluster's machines and
//! parts into a brand-new cluster, [`merge`] absorbs one cluster into
//! another and renumbers the ids above it. Both come in an exhaustive
//! best-candidate mode and a seeded random mode.
//!
//! The two operators are deliberately not inverses: merge renumbers by
//! shifting ids down, divide appends the new id at the end, so a divide
//! followed by a merge generally lands on a different labeling.

mod divide;
mod merge;

pub use divide::divide;
pub use merge::merge;

/// How a shaking operator picks its structural move.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ShakeMode {
    /// Evaluate every candidate move and return the best-scoring one.
    Exhaustive,
    /// Pick a candidate uniformly at random, ignoring scores.
    Random,
}
