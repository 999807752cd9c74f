// src/constants_config.rs

use crate::utils::constants::THETA;

/// Runtime-tunable simulation parameters.
///
/// The physical constants of the force law live in [`crate::utils::constants`];
/// this struct carries only the knobs a host is expected to adjust while the
/// simulation runs.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SimConfig {
    /// Barnes-Hut opening threshold. `0.0` disables approximation entirely
    /// and degrades the traversal to exact pairwise sums.
    pub theta: f64,
    /// Scales the integration time step (`DELTA * time_multiplier`).
    pub time_multiplier: f64,
    /// Fraction of the root region size inside which a body is never
    /// considered an outlier.
    pub outlier_threshold: f64,
}

impl Default for SimConfig {
    fn default() -> Self {
        Self {
            theta: THETA,
            time_multiplier: 1.0,
            outlier_threshold: 0.5,
        }
    }
}

impl SimConfig {
    pub fn new(
        theta: Option<f64>,
        time_multiplier: Option<f64>,
        outlier_threshold: Option<f64>,
    ) -> Self {
        let default = SimConfig::default();
        Self {
            theta: theta.unwrap_or(default.theta),
            time_multiplier: time_multiplier.unwrap_or(default.time_multiplier),
            outlier_threshold: outlier_threshold.unwrap_or(default.outlier_threshold),
        }
    }
}
