// src/galaxy_tests.rs

use crate::galaxy::{interweave, two_galaxies, MAX_GALAXY_SIZE};

#[test]
fn seeding_is_deterministic_per_seed() {
    assert_eq!(two_galaxies(200, 42), two_galaxies(200, 42));
}

#[test]
fn different_seeds_give_different_skies() {
    assert_ne!(two_galaxies(200, 1), two_galaxies(200, 2));
}

#[test]
fn galaxies_split_four_to_one() {
    let bodies = two_galaxies(200, 0);
    assert_eq!(bodies.len(), 200);
    // the interleave leads with each galaxy's central body
    assert_eq!(bodies[0].mass, 160.0);
    assert_eq!(bodies[1].mass, 40.0);
    // stars carry masses in [1, 2)
    assert!(bodies[2..].iter().all(|body| body.mass >= 1.0 && body.mass < 2.0));
}

#[test]
fn seeding_caps_at_the_maximum() {
    let bodies = two_galaxies(5000, 0);
    assert_eq!(bodies.len(), MAX_GALAXY_SIZE);
}

#[test]
fn interweave_with_an_empty_list_is_identity() {
    assert_eq!(interweave(vec![1, 2, 3, 4], Vec::new()), vec![1, 2, 3, 4]);
}

#[test]
fn interweave_alternates_equal_lists() {
    assert_eq!(interweave(vec![1, 3], vec![2, 4]), vec![1, 2, 3, 4]);
}

#[test]
fn interweave_appends_the_longer_remainder() {
    assert_eq!(interweave(vec![1, 3, 5, 6], vec![2, 4]), vec![1, 2, 3, 4, 5, 6]);
    assert_eq!(interweave(vec![2, 4], vec![1, 3, 5, 6]), vec![1, 2, 3, 4, 5, 6]);
}
