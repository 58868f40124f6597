//! Trajectory storage: the material queries are built from.
//!
//! This module provides:
//! - [`types::Step`], [`types::Trajectory`] -- one recorded episode of robot
//!   behavior with its precomputed feature vector.
//! - [`types::TrajectorySet`] -- an ordered collection of trajectories; query
//!   slates are normalized into this type.
//! - [`mock`] -- synthetic trajectory generation for demos and tests.

pub mod mock;
pub mod types;

// Re-export the most commonly used items at the module level.
pub use types::{Step, Trajectory, TrajectorySet};
