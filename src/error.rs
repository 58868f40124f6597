//! Error types for query construction, response validation, and elicitation.

use thiserror::Error;

/// Convenience alias for fallible constructors in this crate.
pub type Result<T> = std::result::Result<T, ValidationError>;

/// A construction-time validation failure.
///
/// Raised when a slate violates a cardinality constraint, when a response
/// falls outside its query's response set, or when a demonstration query
/// disagrees with the trajectory it is paired with. The attempted object is
/// never returned: there is no partially-valid state to observe.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ValidationError {
    /// Preference and ranking queries need at least two trajectories.
    #[error("slate of {got} trajectories is too small, at least 2 are required")]
    SlateTooSmall { got: usize },

    /// Weak comparison queries are strictly pairwise.
    #[error("weak comparison queries must be pairwise, but {got} trajectories were given")]
    NotPairwise { got: usize },

    /// A preference choice outside `[0, k)`.
    #[error("response {response} is out of bounds for a slate size of {k}")]
    ResponseOutOfBounds { response: usize, k: usize },

    /// A weak comparison answer outside `{-1, 0, 1}`.
    #[error("response {response} is not a valid weak comparison answer (-1, 0, or 1)")]
    InvalidComparison { response: i32 },

    /// A ranking that is not a permutation of the slate indices.
    #[error("response {response:?} is not a valid ranking for a slate size of {k}")]
    InvalidRanking { response: Vec<usize>, k: usize },

    /// The supplied demonstration query's initial state does not match the
    /// trajectory's actual first state within floating tolerance.
    #[error("mismatch between the query and the response for the demonstration")]
    InitialStateMismatch,

    /// A demonstration needs a trajectory with at least one step.
    #[error("demonstration trajectories must contain at least one step")]
    EmptyTrajectory,
}

/// A failure while eliciting a response interactively.
#[derive(Debug, Error)]
pub enum ElicitError {
    /// Demonstration queries have no interactive protocol.
    #[error("demonstration queries are collected passively and cannot be elicited")]
    Unsupported,

    /// The prompt channel failed (EOF, closed pipe). Invalid *content* is
    /// never an error -- the loop re-prompts -- but a channel that can no
    /// longer be read has to surface.
    #[error("prompt channel failed")]
    Io(#[from] std::io::Error),

    /// A validation failure while assembling the elicited response.
    #[error(transparent)]
    Validation(#[from] ValidationError),
}
