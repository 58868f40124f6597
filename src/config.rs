use serde::{Deserialize, Serialize};

/// Complete configuration for a parley elicitation session.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ParleyConfig {
    pub tolerance: Tolerance,
    pub session: SessionConfig,
}

/// Floating-point closeness used when validating demonstration queries
/// against their trajectories.
///
/// Two values match when `|a - b| <= atol + rtol * |b|`.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct Tolerance {
    /// Relative tolerance (default: 1e-5).
    pub rtol: f64,
    /// Absolute tolerance (default: 1e-8).
    pub atol: f64,
}

impl Default for Tolerance {
    fn default() -> Self {
        Self {
            rtol: 1e-5,
            atol: 1e-8,
        }
    }
}

impl Tolerance {
    /// Whether two scalars are close under this tolerance.
    pub fn is_close(&self, a: f64, b: f64) -> bool {
        (a - b).abs() <= self.atol + self.rtol * b.abs()
    }

    /// Whether two vectors match element-wise. Differing lengths never match.
    pub fn all_close(&self, a: &[f64], b: &[f64]) -> bool {
        a.len() == b.len() && a.iter().zip(b.iter()).all(|(x, y)| self.is_close(*x, *y))
    }
}

/// Shape of the synthetic slates built by the CLI.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SessionConfig {
    /// Number of trajectories per slate (default: 3).
    pub slate_size: usize,
    /// Steps per synthetic trajectory (default: 10).
    pub trajectory_steps: usize,
    /// Dimension of states and feature vectors (default: 4).
    pub feature_dim: usize,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            slate_size: 3,
            trajectory_steps: 10,
            feature_dim: 4,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_tolerance_accepts_tiny_drift() {
        let tol = Tolerance::default();
        assert!(tol.all_close(&[1.0, 2.0], &[1.0 + 1e-9, 2.0]));
        assert!(!tol.all_close(&[1.0, 2.0], &[1.1, 2.0]));
    }

    #[test]
    fn length_mismatch_is_never_close() {
        let tol = Tolerance::default();
        assert!(!tol.all_close(&[1.0], &[1.0, 1.0]));
    }
}
