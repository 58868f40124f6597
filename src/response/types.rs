//! The concrete response types: a query paired with one validated answer.
//!
//! Every constructor re-validates the answer against the query's response
//! set. There is no way to hold a response object whose answer is outside
//! that set, and no way to change the answer afterwards -- a new answer means
//! a new response instance.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::config::Tolerance;
use crate::error::ValidationError;
use crate::query::{
    DemonstrationQuery, FullRankingQuery, PreferenceQuery, QueryKind, WeakComparisonQuery,
};
use crate::trajectory::Trajectory;

// ---------------------------------------------------------------------------
// Demonstration
// ---------------------------------------------------------------------------

/// A passively collected demonstration: the trajectory a human produced when
/// handed a starting state.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(into = "DemonstrationRepr", try_from = "DemonstrationRepr")]
pub struct Demonstration {
    query: DemonstrationQuery,
    trajectory: Trajectory,
    features: Vec<f64>,
}

/// Stored form: query and trajectory. The feature vector is re-taken from the
/// trajectory and the initial-state match is re-checked on deserialization.
#[derive(Debug, Clone, Serialize, Deserialize)]
struct DemonstrationRepr {
    query: DemonstrationQuery,
    trajectory: Trajectory,
}

impl Demonstration {
    /// Record a demonstration, synthesizing the query it implicitly answers
    /// from the trajectory's first state.
    ///
    /// Fails when the trajectory has no steps.
    pub fn new(trajectory: Trajectory) -> Result<Self, ValidationError> {
        let query = DemonstrationQuery::from_trajectory(&trajectory)
            .ok_or(ValidationError::EmptyTrajectory)?;
        let features = trajectory.features().to_vec();
        Ok(Self {
            query,
            trajectory,
            features,
        })
    }

    /// Record a demonstration against an explicitly supplied query, using the
    /// default tolerance.
    pub fn with_query(
        trajectory: Trajectory,
        query: DemonstrationQuery,
    ) -> Result<Self, ValidationError> {
        Self::with_query_and_tolerance(trajectory, query, &Tolerance::default())
    }

    /// Record a demonstration against an explicitly supplied query.
    ///
    /// Fails unless the query's initial state matches the trajectory's actual
    /// first state element-wise within `tolerance`.
    pub fn with_query_and_tolerance(
        trajectory: Trajectory,
        query: DemonstrationQuery,
        tolerance: &Tolerance,
    ) -> Result<Self, ValidationError> {
        let first_state = trajectory
            .first_state()
            .ok_or(ValidationError::EmptyTrajectory)?;
        if !tolerance.all_close(&query.initial_state, first_state) {
            return Err(ValidationError::InitialStateMismatch);
        }
        let features = trajectory.features().to_vec();
        Ok(Self {
            query,
            trajectory,
            features,
        })
    }

    pub fn query(&self) -> &DemonstrationQuery {
        &self.query
    }

    /// The demonstrated trajectory -- the response content.
    pub fn trajectory(&self) -> &Trajectory {
        &self.trajectory
    }

    /// The demonstrated trajectory's precomputed feature vector.
    pub fn features(&self) -> &[f64] {
        &self.features
    }
}

impl From<Demonstration> for DemonstrationRepr {
    fn from(d: Demonstration) -> Self {
        Self {
            query: d.query,
            trajectory: d.trajectory,
        }
    }
}

impl TryFrom<DemonstrationRepr> for Demonstration {
    type Error = ValidationError;

    fn try_from(repr: DemonstrationRepr) -> Result<Self, ValidationError> {
        Self::with_query(repr.trajectory, repr.query)
    }
}

// ---------------------------------------------------------------------------
// Preference
// ---------------------------------------------------------------------------

/// A best-of-slate answer to a [`PreferenceQuery`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(into = "PreferenceRepr", try_from = "PreferenceRepr")]
pub struct Preference {
    query: PreferenceQuery,
    response: usize,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
struct PreferenceRepr {
    query: PreferenceQuery,
    response: usize,
}

impl Preference {
    /// Pair a query with the index of the preferred trajectory.
    ///
    /// Fails unless `response` lies in `[0, K)`.
    pub fn new(query: PreferenceQuery, response: usize) -> Result<Self, ValidationError> {
        if !query.response_set().contains_choice(response) {
            return Err(ValidationError::ResponseOutOfBounds {
                response,
                k: query.k(),
            });
        }
        Ok(Self { query, response })
    }

    pub fn query(&self) -> &PreferenceQuery {
        &self.query
    }

    /// The index of the preferred trajectory.
    pub fn response(&self) -> usize {
        self.response
    }
}

impl From<Preference> for PreferenceRepr {
    fn from(p: Preference) -> Self {
        Self {
            query: p.query,
            response: p.response,
        }
    }
}

impl TryFrom<PreferenceRepr> for Preference {
    type Error = ValidationError;

    fn try_from(repr: PreferenceRepr) -> Result<Self, ValidationError> {
        Self::new(repr.query, repr.response)
    }
}

// ---------------------------------------------------------------------------
// Weak comparison
// ---------------------------------------------------------------------------

/// An answer to a [`WeakComparisonQuery`]: 0 or 1 for the preferred
/// trajectory, -1 for "about equal".
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(into = "WeakComparisonRepr", try_from = "WeakComparisonRepr")]
pub struct WeakComparison {
    query: WeakComparisonQuery,
    response: i32,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
struct WeakComparisonRepr {
    query: WeakComparisonQuery,
    response: i32,
}

impl WeakComparison {
    /// Pair a query with an answer in `{-1, 0, 1}`.
    pub fn new(query: WeakComparisonQuery, response: i32) -> Result<Self, ValidationError> {
        if !query.response_set().contains_comparison(response) {
            return Err(ValidationError::InvalidComparison { response });
        }
        Ok(Self { query, response })
    }

    pub fn query(&self) -> &WeakComparisonQuery {
        &self.query
    }

    /// The recorded answer.
    pub fn response(&self) -> i32 {
        self.response
    }

    /// Whether the human declared the pair about equal.
    pub fn is_tie(&self) -> bool {
        self.response == -1
    }
}

impl From<WeakComparison> for WeakComparisonRepr {
    fn from(w: WeakComparison) -> Self {
        Self {
            query: w.query,
            response: w.response,
        }
    }
}

impl TryFrom<WeakComparisonRepr> for WeakComparison {
    type Error = ValidationError;

    fn try_from(repr: WeakComparisonRepr) -> Result<Self, ValidationError> {
        Self::new(repr.query, repr.response)
    }
}

// ---------------------------------------------------------------------------
// Full ranking
// ---------------------------------------------------------------------------

/// An answer to a [`FullRankingQuery`]: a permutation of the slate indices,
/// most-preferred first.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(into = "FullRankingRepr", try_from = "FullRankingRepr")]
pub struct FullRanking {
    query: FullRankingQuery,
    response: Vec<usize>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
struct FullRankingRepr {
    query: FullRankingQuery,
    response: Vec<usize>,
}

impl FullRanking {
    /// Pair a query with a full ranking.
    ///
    /// Fails unless `response` is exactly one of the query's enumerated
    /// permutations.
    pub fn new(query: FullRankingQuery, response: Vec<usize>) -> Result<Self, ValidationError> {
        if !query.response_set().contains_ranking(&response) {
            return Err(ValidationError::InvalidRanking {
                response,
                k: query.k(),
            });
        }
        Ok(Self { query, response })
    }

    pub fn query(&self) -> &FullRankingQuery {
        &self.query
    }

    /// The recorded ranking, most-preferred first.
    pub fn response(&self) -> &[usize] {
        &self.response
    }
}

impl From<FullRanking> for FullRankingRepr {
    fn from(r: FullRanking) -> Self {
        Self {
            query: r.query,
            response: r.response,
        }
    }
}

impl TryFrom<FullRankingRepr> for FullRanking {
    type Error = ValidationError;

    fn try_from(repr: FullRankingRepr) -> Result<Self, ValidationError> {
        Self::new(repr.query, repr.response)
    }
}

// ---------------------------------------------------------------------------
// QueryWithResponse: enum dispatch over the concrete pairs
// ---------------------------------------------------------------------------

/// An enum wrapper around all concrete query/response pairs, the unit that
/// downstream reward learning consumes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum QueryWithResponse {
    Demonstration(Demonstration),
    Preference(Preference),
    WeakComparison(WeakComparison),
    FullRanking(FullRanking),
}

impl QueryWithResponse {
    /// Which kind of query this answers.
    pub fn kind(&self) -> QueryKind {
        match self {
            Self::Demonstration(_) => QueryKind::Demonstration,
            Self::Preference(_) => QueryKind::Preference,
            Self::WeakComparison(_) => QueryKind::WeakComparison,
            Self::FullRanking(_) => QueryKind::FullRanking,
        }
    }
}

// ---------------------------------------------------------------------------
// Recorded response
// ---------------------------------------------------------------------------

/// A timestamped answer, the unit a collection session persists.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RecordedResponse {
    /// When the answer was recorded.
    pub recorded_at: DateTime<Utc>,
    /// The validated query/response pair.
    pub answer: QueryWithResponse,
}

impl RecordedResponse {
    /// Stamp an answer with the current time.
    pub fn new(answer: QueryWithResponse) -> Self {
        Self {
            recorded_at: Utc::now(),
            answer,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::trajectory::mock::{synthetic_slate, synthetic_trajectory};
    use crate::trajectory::TrajectorySet;

    fn slate(k: usize) -> TrajectorySet {
        synthetic_slate(k, 3, 2, &mut rand::thread_rng())
    }

    #[test]
    fn preference_roundtrips_every_valid_response() {
        let query = PreferenceQuery::new(slate(3)).unwrap();
        for r in 0..3 {
            let pref = Preference::new(query.clone(), r).unwrap();
            assert_eq!(pref.response(), r);
        }
    }

    #[test]
    fn preference_rejects_out_of_set_responses() {
        let query = PreferenceQuery::new(slate(3)).unwrap();
        let err = Preference::new(query, 5).unwrap_err();
        assert_eq!(err, ValidationError::ResponseOutOfBounds { response: 5, k: 3 });
    }

    #[test]
    fn weak_comparison_accepts_the_fixed_set_only() {
        let query = WeakComparisonQuery::new(slate(2)).unwrap();
        for r in [-1, 0, 1] {
            assert!(WeakComparison::new(query.clone(), r).is_ok());
        }
        for r in [-2, 2, 10] {
            let err = WeakComparison::new(query.clone(), r).unwrap_err();
            assert_eq!(err, ValidationError::InvalidComparison { response: r });
        }
        let tie = WeakComparison::new(query, -1).unwrap();
        assert!(tie.is_tie());
    }

    #[test]
    fn every_enumerated_ranking_builds() {
        let query = FullRankingQuery::new(slate(3)).unwrap();
        let rows: Vec<Vec<usize>> = query.response_set().rankings().unwrap().to_vec();
        assert_eq!(rows.len(), 6);
        for row in rows {
            let ranking = FullRanking::new(query.clone(), row.clone()).unwrap();
            assert_eq!(ranking.response(), row.as_slice());
        }
    }

    #[test]
    fn non_permutations_are_rejected() {
        let query = FullRankingQuery::new(slate(2)).unwrap();
        for bad in [vec![1, 1], vec![0], vec![0, 2], vec![0, 1, 2]] {
            assert!(FullRanking::new(query.clone(), bad).is_err());
        }
    }

    #[test]
    fn demonstration_synthesizes_its_query() {
        let trajectory = synthetic_trajectory(4, 2, &mut rand::thread_rng());
        let first = trajectory.first_state().unwrap().to_vec();
        let demo = Demonstration::new(trajectory).unwrap();
        assert_eq!(demo.query().initial_state, first);
        assert_eq!(demo.features(), demo.trajectory().features());
    }

    #[test]
    fn demonstration_rejects_an_empty_trajectory() {
        let empty = Trajectory::new(vec![], vec![]);
        assert_eq!(
            Demonstration::new(empty).unwrap_err(),
            ValidationError::EmptyTrajectory
        );
    }

    #[test]
    fn demonstration_checks_the_supplied_query_within_tolerance() {
        let trajectory = synthetic_trajectory(4, 2, &mut rand::thread_rng());
        let first = trajectory.first_state().unwrap().to_vec();

        // Drift far below tolerance: accepted.
        let close: Vec<f64> = first.iter().map(|x| x + 1e-9).collect();
        let demo =
            Demonstration::with_query(trajectory.clone(), DemonstrationQuery::new(close)).unwrap();
        assert_eq!(demo.trajectory().id, trajectory.id);

        // A clearly different start state: rejected.
        let far: Vec<f64> = first.iter().map(|x| x + 0.5).collect();
        let err =
            Demonstration::with_query(trajectory, DemonstrationQuery::new(far)).unwrap_err();
        assert_eq!(err, ValidationError::InitialStateMismatch);
    }

    #[test]
    fn stored_answers_are_revalidated_on_load() {
        let query = PreferenceQuery::new(slate(3)).unwrap();
        let pref = Preference::new(query, 1).unwrap();
        let recorded = RecordedResponse::new(QueryWithResponse::Preference(pref.clone()));

        let json = serde_json::to_string(&recorded).unwrap();
        let back: RecordedResponse = serde_json::from_str(&json).unwrap();
        assert_eq!(back.answer, QueryWithResponse::Preference(pref));

        // Tampering with the stored response index must fail the load.
        let tampered = json.replace("\"response\":1", "\"response\":9");
        assert!(serde_json::from_str::<RecordedResponse>(&tampered).is_err());
    }
}
