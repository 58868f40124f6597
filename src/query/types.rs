//! The concrete query types.
//!
//! Each query owns its slate and the response set derived from it. The two
//! are computed together, atomically, by the constructor: changing a slate
//! means constructing a new query, so K and the response set can never drift
//! apart. All queries are `Clone`, which yields a deep, independent copy.

use serde::{Deserialize, Serialize};

use crate::elicit::{
    self, parse_choice, parse_comparison, parse_rank, Prompter, RankReply,
};
use crate::error::{ElicitError, ValidationError};
use crate::trajectory::{Trajectory, TrajectorySet};

use super::response_set::ResponseSet;

// ---------------------------------------------------------------------------
// Demonstration query
// ---------------------------------------------------------------------------

/// A query where the human is handed an initial state and asked to control
/// the robot from there.
///
/// Demonstrations are collected passively, so this type carries no response
/// set: the answer is an entire trajectory rather than a choice from an
/// enumerable set.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DemonstrationQuery {
    /// The state the demonstration must start from.
    pub initial_state: Vec<f64>,
}

impl DemonstrationQuery {
    pub fn new(initial_state: Vec<f64>) -> Self {
        Self { initial_state }
    }

    /// Synthesize the query a trajectory implicitly answers, if the
    /// trajectory has a first state.
    pub fn from_trajectory(trajectory: &Trajectory) -> Option<Self> {
        trajectory
            .first_state()
            .map(|state| Self::new(state.to_vec()))
    }
}

// ---------------------------------------------------------------------------
// Serialized form shared by the slate-carrying queries
// ---------------------------------------------------------------------------

/// Stored form of a slate-carrying query: the slate alone. K and the response
/// set are derived, so deserialization re-runs the validating constructor and
/// ranking tables are never written out.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SlateRepr {
    slate: TrajectorySet,
}

// ---------------------------------------------------------------------------
// Preference query
// ---------------------------------------------------------------------------

/// Choose-the-best-of-K: the human picks the single best trajectory from a
/// slate of at least two.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(into = "SlateRepr", try_from = "SlateRepr")]
pub struct PreferenceQuery {
    slate: TrajectorySet,
    response_set: ResponseSet,
}

impl PreferenceQuery {
    /// Build a preference query over `slate`.
    ///
    /// The slate may be a [`TrajectorySet`] or a raw `Vec<Trajectory>`.
    /// Fails when the slate holds fewer than two trajectories.
    pub fn new(slate: impl Into<TrajectorySet>) -> Result<Self, ValidationError> {
        let slate = slate.into();
        let k = slate.size();
        if k < 2 {
            return Err(ValidationError::SlateTooSmall { got: k });
        }
        Ok(Self {
            slate,
            response_set: ResponseSet::choice(k),
        })
    }

    /// Slate size.
    pub fn k(&self) -> usize {
        self.slate.size()
    }

    /// The slate under comparison.
    pub fn slate(&self) -> &TrajectorySet {
        &self.slate
    }

    /// The legal responses: the integers `[0, K)`.
    pub fn response_set(&self) -> &ResponseSet {
        &self.response_set
    }

    /// Present the slate and collect a best-of-slate selection.
    ///
    /// Re-prompts on anything that does not parse as an in-range integer;
    /// only a dead prompt channel aborts.
    pub fn visualize(&self, prompter: &mut dyn Prompter) -> Result<usize, ElicitError> {
        elicit::present_slate(&self.slate, prompter)?;
        let prompt = format!(
            "Which trajectory is the best? Enter a number [0-{}]: ",
            self.k() - 1
        );
        loop {
            let line = prompter.ask(&prompt)?;
            if let Some(choice) = parse_choice(&line, self.k()) {
                return Ok(choice);
            }
        }
    }
}

impl From<PreferenceQuery> for SlateRepr {
    fn from(query: PreferenceQuery) -> Self {
        Self { slate: query.slate }
    }
}

impl TryFrom<SlateRepr> for PreferenceQuery {
    type Error = ValidationError;

    fn try_from(repr: SlateRepr) -> Result<Self, ValidationError> {
        Self::new(repr.slate)
    }
}

// ---------------------------------------------------------------------------
// Weak comparison query
// ---------------------------------------------------------------------------

/// A pairwise comparison that admits a tie: the human answers 0 or 1 for the
/// preferred trajectory, or -1 for "about equal".
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(into = "SlateRepr", try_from = "SlateRepr")]
pub struct WeakComparisonQuery {
    slate: TrajectorySet,
    response_set: ResponseSet,
}

impl WeakComparisonQuery {
    /// Build a weak comparison over `slate`. Fails unless the slate holds
    /// exactly two trajectories.
    pub fn new(slate: impl Into<TrajectorySet>) -> Result<Self, ValidationError> {
        let slate = slate.into();
        let k = slate.size();
        if k != 2 {
            return Err(ValidationError::NotPairwise { got: k });
        }
        Ok(Self {
            slate,
            response_set: ResponseSet::Weak,
        })
    }

    /// Slate size (always 2).
    pub fn k(&self) -> usize {
        self.slate.size()
    }

    /// The pair under comparison.
    pub fn slate(&self) -> &TrajectorySet {
        &self.slate
    }

    /// The legal responses: `{-1, 0, 1}`, independent of the slate.
    pub fn response_set(&self) -> &ResponseSet {
        &self.response_set
    }

    /// Present the pair and collect an answer in `{-1, 0, 1}`.
    pub fn visualize(&self, prompter: &mut dyn Prompter) -> Result<i32, ElicitError> {
        elicit::present_slate(&self.slate, prompter)?;
        let prompt = "Which trajectory is the best? Enter a number (-1 for \"About Equal\"): ";
        loop {
            let line = prompter.ask(prompt)?;
            if let Some(response) = parse_comparison(&line) {
                return Ok(response);
            }
        }
    }
}

impl From<WeakComparisonQuery> for SlateRepr {
    fn from(query: WeakComparisonQuery) -> Self {
        Self { slate: query.slate }
    }
}

impl TryFrom<SlateRepr> for WeakComparisonQuery {
    type Error = ValidationError;

    fn try_from(repr: SlateRepr) -> Result<Self, ValidationError> {
        Self::new(repr.slate)
    }
}

// ---------------------------------------------------------------------------
// Full ranking query
// ---------------------------------------------------------------------------

/// A total order over the slate: the human ranks all K trajectories from
/// most to least preferred.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(into = "SlateRepr", try_from = "SlateRepr")]
pub struct FullRankingQuery {
    slate: TrajectorySet,
    response_set: ResponseSet,
}

impl FullRankingQuery {
    /// Build a ranking query over `slate`. Fails when the slate holds fewer
    /// than two trajectories.
    ///
    /// All K! candidate rankings are enumerated here, once, so slates must
    /// stay small.
    pub fn new(slate: impl Into<TrajectorySet>) -> Result<Self, ValidationError> {
        let slate = slate.into();
        let k = slate.size();
        if k < 2 {
            return Err(ValidationError::SlateTooSmall { got: k });
        }
        Ok(Self {
            slate,
            response_set: ResponseSet::ranking(k),
        })
    }

    /// Slate size.
    pub fn k(&self) -> usize {
        self.slate.size()
    }

    /// The slate under comparison.
    pub fn slate(&self) -> &TrajectorySet {
        &self.slate
    }

    /// The legal responses: every permutation of `[0, K)`.
    pub fn response_set(&self) -> &ResponseSet {
        &self.response_set
    }

    /// Present the slate and collect a full ranking, most-preferred first.
    ///
    /// Ranks are elicited one at a time. A selection already placed at an
    /// earlier rank triggers a warning and a re-prompt; after K-1 selections
    /// the final remaining trajectory is appended without a prompt.
    pub fn visualize(&self, prompter: &mut dyn Prompter) -> Result<Vec<usize>, ElicitError> {
        elicit::present_slate(&self.slate, prompter)?;
        let k = self.k();
        let mut ranking: Vec<usize> = Vec::with_capacity(k);

        for rank in 1..k {
            let prompt = format!(
                "Which trajectory is your #{rank} favorite? Enter a number [0-{}]: ",
                k - 1
            );
            loop {
                let line = prompter.ask(&prompt)?;
                match parse_rank(&line, k, &ranking) {
                    RankReply::Chosen(choice) => {
                        ranking.push(choice);
                        break;
                    }
                    RankReply::AlreadyTaken(choice) => {
                        prompter.say(&format!(
                            "You have already chosen trajectory {choice} before!"
                        ))?;
                    }
                    RankReply::Invalid => {}
                }
            }
        }

        if let Some(last) = (0..k).find(|i| !ranking.contains(i)) {
            ranking.push(last);
        }
        Ok(ranking)
    }
}

impl From<FullRankingQuery> for SlateRepr {
    fn from(query: FullRankingQuery) -> Self {
        Self { slate: query.slate }
    }
}

impl TryFrom<SlateRepr> for FullRankingQuery {
    type Error = ValidationError;

    fn try_from(repr: SlateRepr) -> Result<Self, ValidationError> {
        Self::new(repr.slate)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::elicit::ScriptedPrompter;
    use crate::trajectory::mock::synthetic_slate;

    fn slate(k: usize) -> TrajectorySet {
        synthetic_slate(k, 3, 2, &mut rand::thread_rng())
    }

    #[test]
    fn preference_response_set_is_zero_to_k() {
        for k in 2..=5 {
            let query = PreferenceQuery::new(slate(k)).unwrap();
            assert_eq!(query.k(), k);
            assert_eq!(query.response_set(), &ResponseSet::choice(k));
        }
    }

    #[test]
    fn preference_rejects_undersized_slates() {
        for k in 0..2 {
            let err = PreferenceQuery::new(slate(k)).unwrap_err();
            assert_eq!(err, ValidationError::SlateTooSmall { got: k });
        }
    }

    #[test]
    fn preference_accepts_raw_trajectory_vec() {
        let raw: Vec<Trajectory> = slate(3).iter().cloned().collect();
        let query = PreferenceQuery::new(raw).unwrap();
        assert_eq!(query.k(), 3);
    }

    #[test]
    fn weak_comparison_is_strictly_pairwise() {
        let query = WeakComparisonQuery::new(slate(2)).unwrap();
        assert_eq!(query.response_set(), &ResponseSet::Weak);

        for k in [0, 1, 3, 4] {
            let err = WeakComparisonQuery::new(slate(k)).unwrap_err();
            assert_eq!(err, ValidationError::NotPairwise { got: k });
        }
    }

    #[test]
    fn ranking_query_enumerates_permutations() {
        let query = FullRankingQuery::new(slate(3)).unwrap();
        assert_eq!(query.response_set().len(), 6);

        let pairwise = FullRankingQuery::new(slate(2)).unwrap();
        assert_eq!(
            pairwise.response_set().rankings().unwrap(),
            &[vec![0, 1], vec![1, 0]]
        );

        let err = FullRankingQuery::new(slate(1)).unwrap_err();
        assert_eq!(err, ValidationError::SlateTooSmall { got: 1 });
    }

    #[test]
    fn preference_visualize_reprompts_until_valid() {
        let query = PreferenceQuery::new(slate(3)).unwrap();
        let mut prompter = ScriptedPrompter::new(["nope", "7", "3.0", "1"]);
        let choice = query.visualize(&mut prompter).unwrap();
        assert_eq!(choice, 1);
        assert_eq!(prompter.remaining(), 0);
    }

    #[test]
    fn weak_visualize_accepts_the_tie_answer() {
        let query = WeakComparisonQuery::new(slate(2)).unwrap();
        let mut prompter = ScriptedPrompter::new(["2", "-1"]);
        assert_eq!(query.visualize(&mut prompter).unwrap(), -1);
    }

    #[test]
    fn ranking_visualize_warns_on_duplicates_and_autofills_last() {
        let query = FullRankingQuery::new(slate(3)).unwrap();
        // Picks 2, then repeats 2 (warned), then 0; rank 3 is auto-filled.
        let mut prompter = ScriptedPrompter::new(["2", "2", "0"]);
        let ranking = query.visualize(&mut prompter).unwrap();
        assert_eq!(ranking, vec![2, 0, 1]);
        assert!(prompter
            .transcript()
            .iter()
            .any(|line| line == "You have already chosen trajectory 2 before!"));
    }

    #[test]
    fn visualize_surfaces_a_dead_channel() {
        let query = PreferenceQuery::new(slate(2)).unwrap();
        let mut prompter = ScriptedPrompter::new(["bogus"]);
        let err = query.visualize(&mut prompter).unwrap_err();
        assert!(matches!(err, ElicitError::Io(_)));
    }

    #[test]
    fn deserialization_revalidates_the_slate() {
        let query = PreferenceQuery::new(slate(3)).unwrap();
        let json = serde_json::to_string(&query).unwrap();
        let back: PreferenceQuery = serde_json::from_str(&json).unwrap();
        assert_eq!(back, query);

        // A stored one-item slate must fail to deserialize as a query.
        let undersized = serde_json::to_string(&SlateRepr { slate: slate(1) }).unwrap();
        assert!(serde_json::from_str::<PreferenceQuery>(&undersized).is_err());
    }
}
