use std::fmt;
use std::error::Error;

use crate::quadtree::NodeKind;

/// Represents errors that can occur while managing the simulation's quadtree.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SimulationError {
    /// A node was released to a pool whose kind has never been acquired from.
    /// This indicates a bug in tree teardown and is not recoverable.
    UnregisteredPool(NodeKind),
}

impl fmt::Display for SimulationError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            SimulationError::UnregisteredPool(kind) => {
                write!(f, "tried to release a {:?} node to a pool that was never created", kind)
            }
        }
    }
}

impl Error for SimulationError {}
