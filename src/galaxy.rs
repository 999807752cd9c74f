//! Seed generation: two spiral-ish galaxies on a collision course, each a
//! heavy central body orbited by randomly placed stars. Only used to
//! produce initial conditions; the simulation itself never calls back in
//! here.

use std::f64::consts::PI;

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::models::Body;
use crate::utils::constants::GEE;

/// Upper bound on the seeded body count.
pub const MAX_GALAXY_SIZE: usize = 1000;

/// Seeds two galaxies moving toward each other, the larger with 4/5 of the
/// bodies. The two body lists are interleaved so that truncating the
/// result still yields a sample of both galaxies.
///
/// Deterministic for a given `seed`.
pub fn two_galaxies(total_bodies: usize, seed: u64) -> Vec<Body> {
    let total = total_bodies.min(MAX_GALAXY_SIZE);
    let mut rng = StdRng::seed_from_u64(seed);
    let larger = galaxy(total / 5 * 4, 350.0, 400.0, 400.0, 10.0, 12.0, &mut rng);
    let smaller = galaxy(total / 5, 300.0, 2200.0, 1600.0, -10.0, -12.0, &mut rng);
    interweave(larger, smaller)
}

/// One galaxy: a central body carrying most of the mass, plus stars on
/// random annuli with the orbital speed that balances the central pull and
/// the enclosed disk mass.
fn galaxy(
    num: usize,
    max_radius: f64,
    galaxy_x: f64,
    galaxy_y: f64,
    galaxy_vx: f64,
    galaxy_vy: f64,
    rng: &mut StdRng,
) -> Vec<Body> {
    let mut bodies = Vec::with_capacity(num);
    if num == 0 {
        return bodies;
    }
    let total_mass = 1.5 * num as f64;
    let black_hole_mass = 1.0 * num as f64;

    bodies.push(Body {
        mass: black_hole_mass,
        x: galaxy_x,
        y: galaxy_y,
        vx: galaxy_vx,
        vy: galaxy_vy,
    });

    for _ in 1..num {
        let angle = rng.random_range(0.0..(2.0 * PI));
        let radius = 25.0 + rng.random_range(0.0..max_radius);
        let star_x = galaxy_x + radius * angle.sin();
        let star_y = galaxy_y + radius * angle.cos();
        let speed = (GEE * black_hole_mass / radius
            + GEE * total_mass * radius * radius / max_radius.powi(3))
        .sqrt();
        let star_vx = galaxy_vx + speed * (angle + PI / 2.0).sin();
        let star_vy = galaxy_vy + speed * (angle + PI / 2.0).cos();
        let star_mass = 1.0 + rng.random_range(0.0..1.0);

        bodies.push(Body {
            mass: star_mass,
            x: star_x,
            y: star_y,
            vx: star_vx,
            vy: star_vy,
        });
    }
    bodies
}

/// Alternating merge of two lists, longer list leading; the longer list's
/// remainder is appended as-is.
pub fn interweave<T>(a: Vec<T>, b: Vec<T>) -> Vec<T> {
    let (larger, smaller) = if a.len() < b.len() { (b, a) } else { (a, b) };
    let mut merged = Vec::with_capacity(larger.len() + smaller.len());
    let mut larger = larger.into_iter();
    for small in smaller {
        if let Some(big) = larger.next() {
            merged.push(big);
        }
        merged.push(small);
    }
    merged.extend(larger);
    merged
}
