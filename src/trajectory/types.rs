//! Core trajectory data types consumed by the query model.
//!
//! These types capture everything a query needs to know about a robot
//! trajectory: the ordered (state, action) steps and the precomputed feature
//! vector that downstream reward learning consumes.

use serde::{Deserialize, Serialize};

// ---------------------------------------------------------------------------
// Single step
// ---------------------------------------------------------------------------

/// A single step within a trajectory.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Step {
    /// The environment state at this step.
    pub state: Vec<f64>,
    /// The action taken from this state. The terminal step of an episode
    /// carries no action.
    pub action: Option<Vec<f64>>,
}

impl Step {
    /// A (state, action) step.
    pub fn new(state: Vec<f64>, action: Vec<f64>) -> Self {
        Self {
            state,
            action: Some(action),
        }
    }

    /// The terminal step of an episode (no action).
    pub fn terminal(state: Vec<f64>) -> Self {
        Self {
            state,
            action: None,
        }
    }
}

// ---------------------------------------------------------------------------
// Full trajectory
// ---------------------------------------------------------------------------

/// A complete trajectory recording one episode of robot behavior.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Trajectory {
    /// Unique identifier (UUID v4).
    pub id: String,
    /// Ordered sequence of steps; index 0 holds the initial state.
    pub steps: Vec<Step>,
    /// Precomputed feature vector for this trajectory.
    pub features: Vec<f64>,
}

impl Trajectory {
    /// Create a new trajectory with a fresh UUID.
    pub fn new(steps: Vec<Step>, features: Vec<f64>) -> Self {
        Self {
            id: uuid::Uuid::new_v4().to_string(),
            steps,
            features,
        }
    }

    /// Number of steps in the trajectory.
    pub fn len(&self) -> usize {
        self.steps.len()
    }

    /// Whether the trajectory has no steps.
    pub fn is_empty(&self) -> bool {
        self.steps.is_empty()
    }

    /// The state the episode started from, if the trajectory is non-empty.
    pub fn first_state(&self) -> Option<&[f64]> {
        self.steps.first().map(|s| s.state.as_slice())
    }

    /// The precomputed feature vector.
    pub fn features(&self) -> &[f64] {
        &self.features
    }

    /// Play the trajectory back for a human observer.
    ///
    /// Graphical rendering is out of scope, so playback emits the step
    /// sequence through structured logging instead.
    pub fn visualize(&self) {
        tracing::info!(id = %self.id, steps = self.len(), "playing trajectory");
        for (idx, step) in self.steps.iter().enumerate() {
            match &step.action {
                Some(action) => {
                    tracing::debug!(step = idx, state = ?step.state, action = ?action)
                }
                None => tracing::debug!(step = idx, state = ?step.state, "terminal"),
            }
        }
    }
}

// ---------------------------------------------------------------------------
// Trajectory set
// ---------------------------------------------------------------------------

/// An ordered collection of trajectories, the unit queries build slates from.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TrajectorySet {
    trajectories: Vec<Trajectory>,
}

impl TrajectorySet {
    /// Create an empty set.
    pub fn new() -> Self {
        Self {
            trajectories: Vec::new(),
        }
    }

    /// Number of trajectories in the set.
    pub fn size(&self) -> usize {
        self.trajectories.len()
    }

    /// Whether the set is empty.
    pub fn is_empty(&self) -> bool {
        self.trajectories.is_empty()
    }

    /// The trajectory at `index`, if present.
    pub fn get(&self, index: usize) -> Option<&Trajectory> {
        self.trajectories.get(index)
    }

    /// Append a trajectory to the end of the set.
    pub fn push(&mut self, trajectory: Trajectory) {
        self.trajectories.push(trajectory);
    }

    /// Iterate over the trajectories in order.
    pub fn iter(&self) -> std::slice::Iter<'_, Trajectory> {
        self.trajectories.iter()
    }

    /// The feature vectors of all trajectories, one row per trajectory.
    pub fn features_matrix(&self) -> Vec<Vec<f64>> {
        self.trajectories
            .iter()
            .map(|t| t.features.clone())
            .collect()
    }
}

impl From<Vec<Trajectory>> for TrajectorySet {
    fn from(trajectories: Vec<Trajectory>) -> Self {
        Self { trajectories }
    }
}

impl std::ops::Index<usize> for TrajectorySet {
    type Output = Trajectory;

    fn index(&self, index: usize) -> &Trajectory {
        &self.trajectories[index]
    }
}

impl<'a> IntoIterator for &'a TrajectorySet {
    type Item = &'a Trajectory;
    type IntoIter = std::slice::Iter<'a, Trajectory>;

    fn into_iter(self) -> Self::IntoIter {
        self.trajectories.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn short_trajectory(start: f64) -> Trajectory {
        Trajectory::new(
            vec![
                Step::new(vec![start, 0.0], vec![1.0]),
                Step::terminal(vec![start + 1.0, 0.0]),
            ],
            vec![start, start * 2.0],
        )
    }

    #[test]
    fn first_state_is_step_zero() {
        let t = short_trajectory(3.0);
        assert_eq!(t.first_state(), Some(&[3.0, 0.0][..]));
        assert_eq!(t.len(), 2);
    }

    #[test]
    fn empty_trajectory_has_no_first_state() {
        let t = Trajectory::new(vec![], vec![]);
        assert!(t.is_empty());
        assert!(t.first_state().is_none());
    }

    #[test]
    fn set_wraps_vec_and_preserves_order() {
        let set = TrajectorySet::from(vec![short_trajectory(0.0), short_trajectory(1.0)]);
        assert_eq!(set.size(), 2);
        assert_eq!(set[1].first_state(), Some(&[1.0, 0.0][..]));
        assert_eq!(set.features_matrix(), vec![vec![0.0, 0.0], vec![1.0, 2.0]]);
    }

    #[test]
    fn serialization_roundtrip() {
        let set = TrajectorySet::from(vec![short_trajectory(2.0)]);
        let json = serde_json::to_string(&set).unwrap();
        let back: TrajectorySet = serde_json::from_str(&json).unwrap();
        assert_eq!(back, set);
    }
}
