//! Evolution timing for the serial and parallel strategies

use std::time::Instant;

use decay_life::{Algorithm, Grid, RuleConfig};
use rand::SeedableRng;
use rand::rngs::StdRng;

fn benchmark(algorithm: Algorithm, rule: &RuleConfig, size: usize, iterations: u32) -> Option<f64> {
    let mut grid = Grid::new(size, size).ok()?;
    grid.randomize(&mut StdRng::seed_from_u64(size as u64), 0.3);

    let start = Instant::now();
    for _ in 0..iterations {
        grid = algorithm.evolve(&grid, rule);
    }
    Some(start.elapsed().as_secs_f64() * 1000.0 / iterations as f64)
}

fn main() {
    println!("=== Decay Automaton Benchmark ===\n");

    let sizes = [60, 200, 500, 1000];
    let iterations = 20;

    for (name, rule) in [("Decay", RuleConfig::decay()), ("Conway", RuleConfig::conway())] {
        println!("{name} ({rule})");
        println!("{:>10} {:>12} {:>12} {:>10}", "Size", "Serial", "Parallel", "Speedup");
        println!("{:-<48}", "");

        for size in sizes {
            let serial = benchmark(Algorithm::Serial, &rule, size, iterations);
            let parallel = benchmark(Algorithm::Parallel, &rule, size, iterations);
            let (Some(serial), Some(parallel)) = (serial, parallel) else {
                continue;
            };
            println!(
                "{:>10} {:>12.2} {:>12.2} {:>9.1}x",
                format!("{size}x{size}"),
                serial,
                parallel,
                serial / parallel
            );
        }
        println!();
    }
}
