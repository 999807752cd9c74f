use crate::errors::SimulationError;
use crate::models::{Body, Boundaries};
use crate::utils::constants::MINIMUM_SIZE;

use super::node::{quadrant_for, NodeId, QuadNode, Quadrant};
use super::pool::NodePool;

/// Computes the axis-aligned extent of a body set, queried by callers as
/// the bounding square (`size = max(width, height)`) centred on the true
/// range centres, which therefore contains every body.
///
/// An empty slice yields the degenerate sentinel extents
/// (`f64::MAX..f64::MIN`); building a tree over an empty body set is a
/// precondition violation.
pub fn compute_boundaries(bodies: &[Body]) -> Boundaries {
    let mut boundaries = Boundaries {
        x_min: f64::MAX,
        y_min: f64::MAX,
        x_max: f64::MIN,
        y_max: f64::MIN,
    };
    for body in bodies {
        boundaries.x_min = boundaries.x_min.min(body.x);
        boundaries.y_min = boundaries.y_min.min(body.y);
        boundaries.x_max = boundaries.x_max.max(body.x);
        boundaries.y_max = boundaries.y_max.max(body.y);
    }
    boundaries
}

/// Builds a tree over `bodies` with an auto-computed bounding square.
pub fn build_tree(pool: &mut NodePool, bodies: &[Body]) -> Result<NodeId, SimulationError> {
    let boundaries = compute_boundaries(bodies);
    build_tree_with_bounds(
        pool,
        boundaries.center_x(),
        boundaries.center_y(),
        boundaries.size(),
        bodies,
    )
}

/// Builds a tree over `bodies` inside the given square, inserting them one
/// at a time in slice order.
///
/// The intermediate shape depends on that order (a leaf splits on its
/// second body), but the root aggregate is a commutative reduction and
/// comes out the same for any permutation.
pub fn build_tree_with_bounds(
    pool: &mut NodePool,
    center_x: f64,
    center_y: f64,
    size: f64,
    bodies: &[Body],
) -> Result<NodeId, SimulationError> {
    let mut node = pool.acquire_empty(center_x, center_y, size);
    for index in 0..bodies.len() {
        node = insert(pool, node, index, bodies)?;
    }
    Ok(node)
}

/// What the snapshot match decided to do with the inserted body.
enum Placement {
    /// Empty region: replace with a leaf holding just this body.
    NewLeaf { center_x: f64, center_y: f64, size: f64 },
    /// Leaf absorbed the body in place (first body, or region at minimum size).
    Grown,
    /// Leaf exceeded one body above minimum size: re-insert everything it
    /// held into a fresh fork.
    Split { center_x: f64, center_y: f64, size: f64, held: Vec<usize> },
    /// Fork: descend into the resolved quadrant.
    Descend { quadrant: Quadrant, child: NodeId },
}

/// Inserts `body` (an index into `bodies`) into the subtree rooted at
/// `node`, returning the id of the subtree's new root.
///
/// The caller's reference to `node` is consumed: on the Empty and Split
/// paths the old node is released back to the pool and a different id
/// comes back.
pub fn insert(
    pool: &mut NodePool,
    node: NodeId,
    body: usize,
    bodies: &[Body],
) -> Result<NodeId, SimulationError> {
    // Decide on a snapshot first so no borrow into the slab is held across
    // the pool calls below.
    let placement = match pool.node_mut(node) {
        QuadNode::Empty(empty) => Placement::NewLeaf {
            center_x: empty.center_x,
            center_y: empty.center_y,
            size: empty.size,
        },
        QuadNode::Leaf(leaf) => {
            leaf.bodies.push(body);
            if leaf.size > MINIMUM_SIZE && leaf.bodies.len() > 1 {
                Placement::Split {
                    center_x: leaf.center_x,
                    center_y: leaf.center_y,
                    size: leaf.size,
                    held: std::mem::take(&mut leaf.bodies),
                }
            } else {
                leaf.recompute(bodies);
                Placement::Grown
            }
        }
        QuadNode::Fork(fork) => {
            let quadrant = quadrant_for(bodies[body].x, bodies[body].y, fork.center_x, fork.center_y);
            Placement::Descend { quadrant, child: fork.child(quadrant) }
        }
    };

    match placement {
        Placement::NewLeaf { center_x, center_y, size } => {
            pool.release(node)?;
            Ok(pool.acquire_leaf(center_x, center_y, size, &[body], bodies))
        }
        Placement::Grown => Ok(node),
        Placement::Split { center_x, center_y, size, held } => {
            pool.release(node)?;
            create_fork_and_insert_bodies(pool, center_x, center_y, size, &held, bodies)
        }
        Placement::Descend { quadrant, child } => {
            let new_child = insert(pool, child, body, bodies)?;
            if let QuadNode::Fork(fork) = pool.node_mut(node) {
                fork.set_child(quadrant, new_child);
            }
            pool.refresh_fork(node);
            Ok(node)
        }
    }
}

/// Builds a fork of four empty half-size quadrants and re-inserts `held`
/// into it one body at a time.
fn create_fork_and_insert_bodies(
    pool: &mut NodePool,
    center_x: f64,
    center_y: f64,
    size: f64,
    held: &[usize],
    bodies: &[Body],
) -> Result<NodeId, SimulationError> {
    let offset = size / 4.0;
    let half = size / 2.0;
    let nw = pool.acquire_empty(center_x - offset, center_y - offset, half);
    let ne = pool.acquire_empty(center_x + offset, center_y - offset, half);
    let sw = pool.acquire_empty(center_x - offset, center_y + offset, half);
    let se = pool.acquire_empty(center_x + offset, center_y + offset, half);
    let mut fork = pool.acquire_fork(nw, ne, sw, se);
    for &index in held {
        fork = insert(pool, fork, index, bodies)?;
    }
    Ok(fork)
}

/// Locates the leaf holding `body` by descending quadrant by quadrant.
///
/// Returns `None` when the body is not where the tree says it should be —
/// either it is not in this tree at all, or its coordinates are stale
/// relative to the tree (a previous step's positions).
pub fn find_leaf(
    pool: &NodePool,
    node: NodeId,
    body: usize,
    bodies: &[Body],
) -> Option<NodeId> {
    match pool.node(node) {
        QuadNode::Fork(fork) => {
            let quadrant = quadrant_for(bodies[body].x, bodies[body].y, fork.center_x, fork.center_y);
            find_leaf(pool, fork.child(quadrant), body, bodies)
        }
        QuadNode::Leaf(leaf) if leaf.bodies.contains(&body) => Some(node),
        _ => None,
    }
}
