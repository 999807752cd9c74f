// demos/two_galaxies.rs

use quadgrav::constants_config::SimConfig;
use quadgrav::errors::SimulationError;
use quadgrav::galaxy::two_galaxies;
use quadgrav::quadtree::NodeKind;
use quadgrav::simulation::Simulation;

fn main() -> Result<(), SimulationError> {
    env_logger::init();

    let mut sim = Simulation::new(two_galaxies(500, 0), SimConfig::default());
    println!("Seeded {} bodies across two galaxies", sim.bodies().len());

    for step in 1..=100 {
        sim.step()?;
        if step % 25 == 0 {
            let leaf_stats = sim.pool().stats(NodeKind::Leaf).unwrap_or_default();
            println!(
                "step {:3}: {} bodies | leaf pool attempts={} hits={} misses={} frees={}",
                step,
                sim.bodies().len(),
                leaf_stats.attempts,
                leaf_stats.hits,
                leaf_stats.misses,
                leaf_stats.frees,
            );
        }
    }

    let heaviest = sim
        .bodies()
        .iter()
        .copied()
        .reduce(|a, b| if a.mass >= b.mass { a } else { b });
    if let Some(body) = heaviest {
        println!(
            "Heaviest body: mass={:.1} at ({:.1}, {:.1}) moving ({:.2}, {:.2})",
            body.mass, body.x, body.y, body.vx, body.vy
        );
    }

    Ok(())
}
