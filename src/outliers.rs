use crate::models::{Body, CentreOfMass};
use crate::quadtree::QuadNode;
use crate::utils::constants::GEE;

/// Builds the retain/drop predicate that bounds which bodies stay in the
/// simulated set, given the step's aggregate tree.
///
/// A body within `threshold * size` of the tree's centre of mass is always
/// retained. Beyond that, a body moving toward (or tangential to) the
/// centre is retained unconditionally, regardless of distance or speed.
/// Only a body receding faster than twice the local escape speed
/// `sqrt(2 * GEE * mass / d)` is dropped.
pub fn eliminate_outliers(tree: &QuadNode, threshold: f64) -> impl Fn(&Body) -> bool {
    let mass = tree.mass();
    let (mass_x, mass_y) = tree.com();
    let size = tree.size();
    move |body: &Body| {
        let dx = mass_x - body.x;
        let dy = mass_y - body.y;
        let d = (dx * dx + dy * dy).sqrt();
        // body is far away from the centre of the mass
        if d > threshold * size {
            let nx = dx / d;
            let ny = dy / d;
            let relative_speed = body.vx * nx + body.vy * ny;
            // body is moving away from the centre of the mass
            if relative_speed < 0.0 {
                let escape_speed = (2.0 * GEE * mass / d).sqrt();
                // body has the escape velocity
                !(-relative_speed > 2.0 * escape_speed)
            } else {
                true
            }
        } else {
            true
        }
    }
}
