//! Synthetic trajectory generation for demos and tests.
//!
//! Real deployments feed trajectories recorded from an environment; the CLI
//! and the test suite instead fabricate random episodes with the right shape.

use rand::Rng;

use super::types::{Step, Trajectory, TrajectorySet};

/// Generate a random trajectory of `num_steps` steps in a `dim`-dimensional
/// state space, with a random `dim`-dimensional feature vector.
///
/// The final step is terminal (no action), matching recorded episodes.
pub fn synthetic_trajectory(num_steps: usize, dim: usize, rng: &mut impl Rng) -> Trajectory {
    let mut steps = Vec::with_capacity(num_steps);
    for i in 0..num_steps {
        let state: Vec<f64> = (0..dim).map(|_| rng.gen_range(-1.0..1.0)).collect();
        if i + 1 == num_steps {
            steps.push(Step::terminal(state));
        } else {
            let action: Vec<f64> = (0..dim).map(|_| rng.gen_range(-1.0..1.0)).collect();
            steps.push(Step::new(state, action));
        }
    }
    let features: Vec<f64> = (0..dim).map(|_| rng.gen_range(-1.0..1.0)).collect();
    Trajectory::new(steps, features)
}

/// Generate a slate of `k` synthetic trajectories.
pub fn synthetic_slate(k: usize, num_steps: usize, dim: usize, rng: &mut impl Rng) -> TrajectorySet {
    (0..k)
        .map(|_| synthetic_trajectory(num_steps, dim, rng))
        .collect::<Vec<_>>()
        .into()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn synthetic_trajectory_has_requested_shape() {
        let mut rng = rand::thread_rng();
        let t = synthetic_trajectory(5, 3, &mut rng);
        assert_eq!(t.len(), 5);
        assert_eq!(t.first_state().map(|s| s.len()), Some(3));
        assert_eq!(t.features().len(), 3);
        assert!(t.steps.last().unwrap().action.is_none());
    }

    #[test]
    fn synthetic_slate_has_requested_size() {
        let mut rng = rand::thread_rng();
        let slate = synthetic_slate(4, 5, 2, &mut rng);
        assert_eq!(slate.size(), 4);
    }
}
