//! Parley: the query/response data model for preference-based reward learning.
//!
//! Defines the questions a robot-learning system can ask a human about
//! trajectories -- demonstrations, pairwise preferences, weak comparisons
//! with ties, and full rankings -- together with each query's legal answer
//! space and the validated response records that downstream learning
//! consumes.

pub mod config;
pub mod elicit;
pub mod error;
pub mod query;
pub mod response;
pub mod trajectory;
