use crate::constants_config::SimConfig;

/// Gravitational constant of the force law (not the physical value;
/// seeded scenarios assume this exact magnitude).
pub const GEE: f64 = 100.0;

/// Integration time step for one simulation step.
pub const DELTA: f64 = 0.01;

/// Default Barnes-Hut opening threshold (region size / distance).
pub const THETA: f64 = 0.5;

/// Region size below which a leaf stops subdividing and accumulates bodies
/// instead. Bounds recursion depth for coincident or near-coincident
/// positions.
pub const MINIMUM_SIZE: f64 = 0.0001;

/// Separation at or below which a pairwise force is treated as zero, so
/// near-coincident bodies do not produce singular or explosive forces.
pub const FORCE_THRESHOLD: f64 = 1.0;

pub const DEFAULT_SIM_CONFIG: SimConfig = SimConfig {
    theta: THETA,
    time_multiplier: 1.0,
    outlier_threshold: 0.5,
};
