use crate::models::{Body, CentreOfMass};
use crate::quadtree::{NodeId, NodePool, QuadNode};
use crate::utils::constants::{DELTA, FORCE_THRESHOLD, GEE};
use crate::utils::math_helpers::{distance, unit_vector};

/// Magnitude of the gravitational force between two masses at `dist`.
#[inline]
pub fn force(m1: f64, m2: f64, dist: f64) -> f64 {
    GEE * m1 * m2 / (dist * dist)
}

/// Force vector exerted on `body` by `other`.
///
/// Separations at or below `FORCE_THRESHOLD` yield a zero force instead of
/// a singular one; near-coincident bodies simply stop attracting each
/// other.
pub fn pairwise_force(body: &impl CentreOfMass, other: &impl CentreOfMass) -> (f64, f64) {
    let dist = distance(body, other);
    if dist > FORCE_THRESHOLD {
        let magnitude = force(body.mass(), other.mass(), dist);
        let (unit_x, unit_y) = unit_vector(body, other);
        (magnitude * unit_x, magnitude * unit_y)
    } else {
        (0.0, 0.0)
    }
}

/// Whether the traversal treats `node` as a single pseudo-body for `body`
/// at the given `theta`: never for an empty region, always for a leaf, and
/// for a fork only when its size-to-distance ratio drops below `theta`.
///
/// A `theta` of zero therefore never approximates a fork (the ratio is
/// never negative) and the traversal degrades to exact pairwise sums.
/// Exposed so a renderer can highlight the regions a given focus body
/// would see as pseudo-bodies.
pub fn should_approximate(
    pool: &NodePool,
    node: NodeId,
    body: &impl CentreOfMass,
    theta: f64,
) -> bool {
    match pool.node(node) {
        QuadNode::Empty(_) => false,
        QuadNode::Leaf(_) => true,
        QuadNode::Fork(fork) => fork.size / distance(fork, body) < theta,
    }
}

/// Accumulates the net force on `bodies[target]` over the subtree rooted
/// at `node`, depth-first.
///
/// Leaves contribute exact pairwise forces (skipping the target itself);
/// forks either contribute their aggregate as one pseudo-body or recurse
/// into all four children, per the `theta` ratio test.
pub fn compute_net_force(
    pool: &NodePool,
    node: NodeId,
    bodies: &[Body],
    target: usize,
    theta: f64,
) -> (f64, f64) {
    match pool.node(node) {
        QuadNode::Empty(_) => (0.0, 0.0),
        QuadNode::Leaf(leaf) => {
            let body = &bodies[target];
            let mut net_x = 0.0;
            let mut net_y = 0.0;
            for &other in &leaf.bodies {
                if other == target {
                    continue;
                }
                let (fx, fy) = pairwise_force(body, &bodies[other]);
                net_x += fx;
                net_y += fy;
            }
            (net_x, net_y)
        }
        QuadNode::Fork(fork) => {
            let body = &bodies[target];
            if fork.size / distance(fork, body) < theta {
                pairwise_force(body, fork)
            } else {
                let mut net_x = 0.0;
                let mut net_y = 0.0;
                for child in fork.children() {
                    let (fx, fy) = compute_net_force(pool, child, bodies, target, theta);
                    net_x += fx;
                    net_y += fy;
                }
                (net_x, net_y)
            }
        }
    }
}

/// Produces the body after one integration step under the given net force.
///
/// Symplectic-Euler ordering: the position advances with the *old*
/// velocity, then the velocity absorbs the acceleration.
pub fn integrate(body: &Body, net_x: f64, net_y: f64, dt: f64, multiplier: f64) -> Body {
    Body {
        mass: body.mass,
        x: body.x + body.vx * dt * multiplier,
        y: body.y + body.vy * dt * multiplier,
        vx: body.vx + net_x / body.mass * dt * multiplier,
        vy: body.vy + net_y / body.mass * dt * multiplier,
    }
}

/// One full per-body update against the tree: net force, then integration
/// over the default time step.
pub fn step_body(
    pool: &NodePool,
    root: NodeId,
    bodies: &[Body],
    target: usize,
    theta: f64,
    multiplier: f64,
) -> Body {
    let (net_x, net_y) = compute_net_force(pool, root, bodies, target, theta);
    integrate(&bodies[target], net_x, net_y, DELTA, multiplier)
}

/// O(n²) all-pairs update for one body. Reference implementation and the
/// baseline the benchmarks compare the tree against.
pub fn standard_nbody(bodies: &[Body], target: usize, multiplier: f64) -> Body {
    let body = &bodies[target];
    let mut net_x = 0.0;
    let mut net_y = 0.0;
    for (index, other) in bodies.iter().enumerate() {
        if index == target {
            continue;
        }
        let (fx, fy) = pairwise_force(body, other);
        net_x += fx;
        net_y += fy;
    }
    integrate(body, net_x, net_y, DELTA, multiplier)
}
