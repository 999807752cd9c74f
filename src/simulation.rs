//! Step-by-step driver for a Barnes-Hut body set.
//!
//! One step rebuilds the quadtree over the current bodies, accumulates the
//! net force on every body against that tree, integrates, drops runaway
//! outliers, and returns the whole tree to the node pool. The pool persists
//! across steps, so after the first step nearly every node acquisition is a
//! reuse instead of an allocation.

use log::debug;
use rayon::prelude::*;

use crate::constants_config::SimConfig;
use crate::errors::SimulationError;
use crate::forces::step_body;
use crate::models::Body;
use crate::outliers::eliminate_outliers;
use crate::quadtree::{build_tree_with_bounds, compute_boundaries, NodeKind, NodePool};

/// Owns a body set, the node pool, and the tunable parameters, and
/// advances the system one synchronous step at a time.
///
/// A step is atomic from the caller's perspective; the external host (an
/// animation loop, typically) only decides whether to invoke the next one.
pub struct Simulation {
    bodies: Vec<Body>,
    pool: NodePool,
    config: SimConfig,
}

impl Simulation {
    pub fn new(bodies: Vec<Body>, config: SimConfig) -> Self {
        Self {
            bodies,
            pool: NodePool::new(),
            config,
        }
    }

    pub fn bodies(&self) -> &[Body] {
        &self.bodies
    }

    /// Pool diagnostics live here: `pool_size` and `stats` per node kind.
    pub fn pool(&self) -> &NodePool {
        &self.pool
    }

    pub fn config(&self) -> &SimConfig {
        &self.config
    }

    /// Hosts adjust theta (and friends) between steps through this.
    pub fn config_mut(&mut self) -> &mut SimConfig {
        &mut self.config
    }

    /// Advances the simulation by one step: bounding square, tree build,
    /// per-body force accumulation and integration, outlier filtering, and
    /// release of the whole tree back to the pool.
    ///
    /// A step over an empty body set is a no-op.
    pub fn step(&mut self) -> Result<(), SimulationError> {
        self.advance(false)
    }

    /// Same step with the per-body force phase fanned out on rayon.
    ///
    /// Results are identical to [`Simulation::step`]: the workers only read
    /// the tree and produce per-body values in order; every pool mutation
    /// happens before or after the parallel phase, on the calling thread.
    pub fn step_parallel(&mut self) -> Result<(), SimulationError> {
        self.advance(true)
    }

    /// Runs `steps` consecutive steps.
    pub fn simulate(&mut self, steps: usize) -> Result<(), SimulationError> {
        for _ in 0..steps {
            self.step()?;
        }
        Ok(())
    }

    fn advance(&mut self, parallel: bool) -> Result<(), SimulationError> {
        if self.bodies.is_empty() {
            return Ok(());
        }

        let boundaries = compute_boundaries(&self.bodies);
        let root = build_tree_with_bounds(
            &mut self.pool,
            boundaries.center_x(),
            boundaries.center_y(),
            boundaries.size(),
            &self.bodies,
        )?;

        let SimConfig { theta, time_multiplier, outlier_threshold } = self.config;
        let pool = &self.pool;
        let bodies = &self.bodies;
        let updated: Vec<Body> = if parallel {
            (0..bodies.len())
                .into_par_iter()
                .map(|index| step_body(pool, root, bodies, index, theta, time_multiplier))
                .collect()
        } else {
            (0..bodies.len())
                .map(|index| step_body(pool, root, bodies, index, theta, time_multiplier))
                .collect()
        };

        let keep = eliminate_outliers(self.pool.node(root), outlier_threshold);
        self.bodies = updated.into_iter().filter(|body| keep(body)).collect();

        self.pool.release(root)?;
        debug!(
            "pool after step: bodies={} empty={:?} leaf={:?} fork={:?}",
            self.bodies.len(),
            self.pool.pool_size(NodeKind::Empty),
            self.pool.pool_size(NodeKind::Leaf),
            self.pool.pool_size(NodeKind::Fork),
        );
        Ok(())
    }
}
