//! The query hierarchy: questions posed to a human about robot trajectories.
//!
//! Four kinds of query are supported:
//! - [`types::DemonstrationQuery`] -- "show me", answered by an entire
//!   trajectory (collected passively).
//! - [`types::PreferenceQuery`] -- choose the best of a slate of K >= 2.
//! - [`types::WeakComparisonQuery`] -- pairwise comparison with a tie option.
//! - [`types::FullRankingQuery`] -- a total order over a slate of K >= 2.
//!
//! Each query computes its legal answer space ([`response_set::ResponseSet`])
//! at construction time and is immutable afterwards.

pub mod response_set;
pub mod types;

use serde::{Deserialize, Serialize};

use crate::elicit::Prompter;
use crate::error::ElicitError;
use crate::response::{FullRanking, Preference, QueryWithResponse, WeakComparison};
use crate::trajectory::TrajectorySet;

// Re-export the most commonly used items at the module level.
pub use response_set::ResponseSet;
pub use types::{DemonstrationQuery, FullRankingQuery, PreferenceQuery, WeakComparisonQuery};

// ---------------------------------------------------------------------------
// Query: enum dispatch over the concrete query types
// ---------------------------------------------------------------------------

/// The kind of a query or recorded answer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum QueryKind {
    Demonstration,
    Preference,
    WeakComparison,
    FullRanking,
}

impl std::fmt::Display for QueryKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            QueryKind::Demonstration => write!(f, "demonstration"),
            QueryKind::Preference => write!(f, "preference"),
            QueryKind::WeakComparison => write!(f, "weak_comparison"),
            QueryKind::FullRanking => write!(f, "full_ranking"),
        }
    }
}

/// An enum wrapper around all concrete query types.
///
/// This is the polymorphic "query" the rest of the system passes around:
/// there is no abstract base to instantiate, only one of the variants.
/// Cloning yields a deep, independent copy, slate included.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Query {
    Demonstration(DemonstrationQuery),
    Preference(PreferenceQuery),
    WeakComparison(WeakComparisonQuery),
    FullRanking(FullRankingQuery),
}

impl Query {
    /// Which kind of query this is.
    pub fn kind(&self) -> QueryKind {
        match self {
            Self::Demonstration(_) => QueryKind::Demonstration,
            Self::Preference(_) => QueryKind::Preference,
            Self::WeakComparison(_) => QueryKind::WeakComparison,
            Self::FullRanking(_) => QueryKind::FullRanking,
        }
    }

    /// The slate under comparison, for the kinds that carry one.
    pub fn slate(&self) -> Option<&TrajectorySet> {
        match self {
            Self::Demonstration(_) => None,
            Self::Preference(q) => Some(q.slate()),
            Self::WeakComparison(q) => Some(q.slate()),
            Self::FullRanking(q) => Some(q.slate()),
        }
    }

    /// The legal answer space, for the kinds that have an enumerable one.
    pub fn response_set(&self) -> Option<&ResponseSet> {
        match self {
            Self::Demonstration(_) => None,
            Self::Preference(q) => Some(q.response_set()),
            Self::WeakComparison(q) => Some(q.response_set()),
            Self::FullRanking(q) => Some(q.response_set()),
        }
    }

    /// Present the query and collect a validated answer.
    ///
    /// Demonstration queries are collected passively and report
    /// [`ElicitError::Unsupported`].
    pub fn visualize(
        &self,
        prompter: &mut dyn Prompter,
    ) -> Result<QueryWithResponse, ElicitError> {
        match self {
            Self::Demonstration(_) => Err(ElicitError::Unsupported),
            Self::Preference(q) => {
                let choice = q.visualize(prompter)?;
                Ok(QueryWithResponse::Preference(Preference::new(
                    q.clone(),
                    choice,
                )?))
            }
            Self::WeakComparison(q) => {
                let response = q.visualize(prompter)?;
                Ok(QueryWithResponse::WeakComparison(WeakComparison::new(
                    q.clone(),
                    response,
                )?))
            }
            Self::FullRanking(q) => {
                let ranking = q.visualize(prompter)?;
                Ok(QueryWithResponse::FullRanking(FullRanking::new(
                    q.clone(),
                    ranking,
                )?))
            }
        }
    }
}
