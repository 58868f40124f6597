//! The response hierarchy: validated answers paired with their queries.
//!
//! One concrete type per query kind ([`types::Demonstration`],
//! [`types::Preference`], [`types::WeakComparison`], [`types::FullRanking`]),
//! each enforcing at construction that the answer lies in the query's
//! response set. [`types::QueryWithResponse`] wraps the four for uniform
//! handling, and [`types::RecordedResponse`] stamps an answer for
//! persistence.

pub mod types;

// Re-export the most commonly used items at the module level.
pub use types::{
    Demonstration, FullRanking, Preference, QueryWithResponse, RecordedResponse, WeakComparison,
};
