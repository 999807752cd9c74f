// src/forces_tests.rs

use approx::assert_relative_eq;

use crate::assert_float_eq;
use crate::forces::{
    compute_net_force, integrate, pairwise_force, should_approximate, standard_nbody, step_body,
};
use crate::galaxy::two_galaxies;
use crate::models::Body;
use crate::quadtree::{build_tree, build_tree_with_bounds, NodePool, QuadNode};
use crate::utils::constants::{DELTA, GEE, THETA};
use crate::utils::math_helpers::{distance, unit_vector};

#[test]
fn distance_and_unit_vector_basics() {
    let a = Body::new(1.0, 0.0, 0.0, 0.0, 0.0);
    let b = Body::new(1.0, 3.0, 4.0, 0.0, 0.0);
    assert_float_eq(distance(&a, &b), 5.0, 1e-12, None);
    let (unit_x, unit_y) = unit_vector(&a, &b);
    assert_float_eq(unit_x, 0.6, 1e-12, None);
    assert_float_eq(unit_y, 0.8, 1e-12, None);
}

#[test]
fn pairwise_force_points_along_the_separation() {
    let b1 = Body::new(1.0, 5.0, 10.0, 0.0, 0.0);
    let b2 = Body::new(1.0, 15.0, 15.0, 0.0, 0.0);
    let (fx, fy) = pairwise_force(&b1, &b2);
    assert_float_eq(fx, 100.0 * 10.0 / 125f64.powf(1.5), 1e-8, None);
    assert_float_eq(fy, 100.0 * 5.0 / 125f64.powf(1.5), 1e-8, None);
}

#[test]
fn pairwise_force_two_units_due_south() {
    let b1 = Body::new(1.0, 0.0, 0.0, 0.0, 0.0);
    let b2 = Body::new(1.0, 0.0, 2.0, 0.0, 0.0);
    let (fx, fy) = pairwise_force(&b1, &b2);
    assert_float_eq(fx, 0.0, 1e-12, None);
    assert_float_eq(fy, 25.0, 1e-12, None);
}

#[test]
fn pairwise_force_cuts_off_at_the_threshold() {
    let b1 = Body::new(1.0, 0.0, 0.0, 0.0, 0.0);
    let near = Body::new(1e9, 0.5, 0.0, 0.0, 0.0);
    assert_eq!(pairwise_force(&b1, &near), (0.0, 0.0));
    let at_threshold = Body::new(1e9, 1.0, 0.0, 0.0, 0.0);
    assert_eq!(pairwise_force(&b1, &at_threshold), (0.0, 0.0));
}

#[test]
fn pairwise_forces_are_antisymmetric() {
    let a = Body::new(3.7, 12.5, -3.0, 0.0, 0.0);
    let b = Body::new(9.1, -4.0, 7.0, 0.0, 0.0);
    let (fx, fy) = pairwise_force(&a, &b);
    let (gx, gy) = pairwise_force(&b, &a);
    assert_float_eq(fx, -gx, 1e-12, None);
    assert_float_eq(fy, -gy, 1e-12, None);
}

#[test]
fn integrate_turns_force_into_velocity() {
    let body = Body::new(1.0, 0.0, 0.0, 0.0, 0.0);
    let next = integrate(&body, 0.0, 100.0, DELTA, 1.0);
    assert_eq!(next.mass, 1.0);
    assert_eq!(next.x, 0.0);
    assert_eq!(next.y, 0.0);
    assert_eq!(next.vx, 0.0);
    assert_float_eq(next.vy, 1.0, 1e-12, None);
}

#[test]
fn integrate_moves_with_the_old_velocity() {
    let body = Body::new(2.0, 1.0, 1.0, 5.0, -3.0);
    let next = integrate(&body, 4.0, 8.0, DELTA, 1.0);
    assert_float_eq(next.x, 1.0 + 5.0 * DELTA, 1e-12, None);
    assert_float_eq(next.y, 1.0 - 3.0 * DELTA, 1e-12, None);
    assert_float_eq(next.vx, 5.0 + 4.0 / 2.0 * DELTA, 1e-12, None);
    assert_float_eq(next.vy, -3.0 + 8.0 / 2.0 * DELTA, 1e-12, None);
}

#[test]
fn symmetric_neighbours_cancel_out() {
    let bodies = [
        Body::new(1.0, 20.0, 20.0, 0.0, 0.0),
        Body::new(1.0, 15.0, 20.0, 0.0, 0.0),
        Body::new(1.0, 25.0, 20.0, 0.0, 0.0),
        Body::new(1.0, 20.0, 15.0, 0.0, 0.0),
        Body::new(1.0, 20.0, 25.0, 0.0, 0.0),
    ];
    let mut pool = NodePool::new();
    let leaf = pool.acquire_leaf(15.0, 30.0, 20.0, &[1, 2, 3, 4], &bodies);
    let (net_x, net_y) = compute_net_force(&pool, leaf, &bodies, 0, THETA);
    assert_float_eq(net_x, 0.0, 1e-12, None);
    assert_float_eq(net_y, 0.0, 1e-12, None);
}

#[test]
fn leaf_forces_match_direct_pairwise_sums() {
    let bodies = [
        Body::new(123.0, 18.0, 26.0, 0.0, 0.0),
        Body::new(524.5, 24.5, 25.5, 0.0, 0.0),
        Body::new(245.0, 22.4, 41.0, 0.0, 0.0),
    ];
    let mut pool = NodePool::new();
    let leaf = pool.acquire_leaf(15.0, 30.0, 20.0, &[1, 2], &bodies);
    let updated = step_body(&pool, leaf, &bodies, 0, THETA, 1.0);
    assert_float_eq(updated.vx, 12.58703612, 1e-6, None);
    assert_float_eq(updated.vy, 0.015557117, 1e-6, None);

    // Same answer when the leaf sits inside a fork and holds the moving
    // body itself; the traversal skips the body by identity.
    let nw = pool.acquire_leaf(15.0, 30.0, 10.0, &[1, 2, 0], &bodies);
    let ne = pool.acquire_empty(25.0, 30.0, 10.0);
    let sw = pool.acquire_empty(15.0, 40.0, 10.0);
    let se = pool.acquire_empty(25.0, 40.0, 10.0);
    let fork = pool.acquire_fork(nw, ne, sw, se);
    let through_fork = step_body(&pool, fork, &bodies, 0, THETA, 1.0);
    assert_float_eq(through_fork.vx, updated.vx, 1e-9, None);
    assert_float_eq(through_fork.vy, updated.vy, 1e-9, None);
}

#[test]
fn empty_region_exerts_no_force() {
    let bodies = [Body::new(123.0, 18.0, 26.0, 0.0, 0.0)];
    let mut pool = NodePool::new();
    let empty = pool.acquire_empty(50.0, 60.0, 5.0);
    let updated = step_body(&pool, empty, &bodies, 0, THETA, 1.0);
    assert_eq!(updated.vx, 0.0);
    assert_eq!(updated.vy, 0.0);
}

#[test]
fn corner_body_is_pulled_along_the_diagonal() {
    let bodies = [
        Body::new(1.0, 0.0, 0.0, 0.0, 0.0),
        Body::new(1.0, 0.0, 100.0, 0.0, 0.0),
        Body::new(1.0, 100.0, 0.0, 0.0, 0.0),
        Body::new(1.0, 100.0, 100.0, 0.0, 0.0),
    ];
    let mut pool = NodePool::new();
    let root = build_tree_with_bounds(&mut pool, 50.0, 50.0, 100.0, &bodies).unwrap();
    let updated = step_body(&pool, root, &bodies, 0, THETA, 1.0);
    assert_float_eq(updated.vx, updated.vy, 1e-12, None);
    assert!(updated.vy > 0.0);
}

#[test]
fn distant_cluster_collapses_to_its_centre_of_mass() {
    let bodies = [
        Body::new(1.0, 0.0, 0.0, 1.0, 1.0),
        Body::new(1.0, 62.5, 87.5, 0.0, 0.0),
        Body::new(1.0, 87.5, 87.5, 0.0, 0.0),
        Body::new(1.0, 87.5, 62.5, 0.0, 0.0),
    ];
    let mut pool = NodePool::new();
    let root = build_tree_with_bounds(&mut pool, 50.0, 50.0, 100.0, &bodies).unwrap();
    let updated = step_body(&pool, root, &bodies, 0, THETA, 1.0);

    let avg = (62.5 + 87.5 * 2.0) / 3.0;
    let dist = 2f64.sqrt() * avg;
    let expected = 1.0 + GEE * 1.0 * 3.0 * avg / dist.powi(3) * DELTA;
    assert_float_eq(updated.vx, expected, 1e-8, None);
    assert_float_eq(updated.vy, updated.vx, 1e-9, None);
    assert_float_eq(updated.x, DELTA, 1e-12, None);
    assert_float_eq(updated.y, DELTA, 1e-12, None);
}

#[test]
fn traversal_mixes_exact_and_approximated_contributions() {
    let bodies = [
        Body::new(1.0, 25.0, 25.0, 0.0, 0.0),
        Body::new(1.0, 76.0, 3.0, 0.0, 0.0),
        Body::new(1.0, 85.0, 5.0, 0.0, 0.0),
        Body::new(1.0, 87.5, 37.5, 0.0, 0.0),
    ];
    let mut pool = NodePool::new();
    let root = build_tree_with_bounds(&mut pool, 50.0, 50.0, 100.0, &bodies).unwrap();

    // The quadrant fork holding b2 and b3 is small and far enough from b1
    // to be approximated; b4 sits in a leaf of the traversed fork above it
    // and contributes exactly.
    let ne_fork = match pool.node(root) {
        QuadNode::Fork(fork) => fork.ne,
        _ => panic!("expected a fork at the root"),
    };
    let second_deepest = match pool.node(ne_fork) {
        QuadNode::Fork(fork) => fork.ne,
        _ => panic!("expected a fork in the north-east quadrant"),
    };
    assert!(should_approximate(&pool, second_deepest, &bodies[0], THETA));
    assert!(!should_approximate(&pool, ne_fork, &bodies[0], THETA));

    let (fx1, fy1) = pairwise_force(&bodies[0], &bodies[3]);
    let (fx2, fy2) = pairwise_force(&bodies[0], pool.node(second_deepest));
    let updated = step_body(&pool, root, &bodies, 0, THETA, 1.0);
    assert_float_eq(updated.vx, (fx1 + fx2) * DELTA, 1e-8, None);
    assert_float_eq(updated.vy, (fy1 + fy2) * DELTA, 1e-8, None);

    // Stepping the updated body against the same (now slightly stale) tree
    // moves it with the velocity it just picked up.
    let mut moved = bodies;
    moved[0] = updated;
    let again = step_body(&pool, root, &moved, 0, THETA, 1.0);
    assert_float_eq(again.x, 25.0 + updated.vx * DELTA, 1e-8, None);
    assert_float_eq(again.y, 25.0 + updated.vy * DELTA, 1e-8, None);
}

#[test]
fn theta_zero_approximates_only_leaves() {
    let bodies = [
        Body::new(1.0, 0.0, 0.0, 0.0, 0.0),
        Body::new(1.0, 100.0, 100.0, 0.0, 0.0),
    ];
    let mut pool = NodePool::new();
    let root = build_tree_with_bounds(&mut pool, 50.0, 50.0, 100.0, &bodies).unwrap();
    let (nw, ne) = match pool.node(root) {
        QuadNode::Fork(fork) => (fork.nw, fork.ne),
        _ => panic!("expected a fork at the root"),
    };

    let probe = Body::new(1.0, 1e6, 1e6, 0.0, 0.0);
    // However far away the probe is, a fork is never approximated at zero.
    assert!(!should_approximate(&pool, root, &probe, 0.0));
    assert!(should_approximate(&pool, nw, &probe, 0.0));
    assert!(!should_approximate(&pool, ne, &probe, 0.0));

    // At the default theta the same fork collapses for the distant probe.
    assert!(should_approximate(&pool, root, &probe, THETA));
}

#[test]
fn theta_zero_traversal_matches_brute_force() {
    let bodies = two_galaxies(50, 11);
    let mut pool = NodePool::new();
    let root = build_tree(&mut pool, &bodies).unwrap();
    for target in [0usize, 7, 23, 49] {
        let through_tree = step_body(&pool, root, &bodies, target, 0.0, 1.0);
        let brute = standard_nbody(&bodies, target, 1.0);
        assert_eq!(through_tree.x, brute.x);
        assert_eq!(through_tree.y, brute.y);
        assert_relative_eq!(through_tree.vx, brute.vx, max_relative = 1e-9, epsilon = 1e-9);
        assert_relative_eq!(through_tree.vy, brute.vy, max_relative = 1e-9, epsilon = 1e-9);
    }
}
