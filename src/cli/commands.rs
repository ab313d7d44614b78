use rand::prelude::*;
use rand_chacha::ChaCha8Rng;
use tracing::info;

use crate::cli::render::{legend, render_grid};
use crate::config::simulation::SimulationConfig;
use crate::forest::generation::create_forest;
use crate::simulation;
use crate::simulation::statistics::{summarize, BatchSummary, SimulationStats};

/// Output switches for the `run` command.
#[derive(Debug, Clone, Copy, Default)]
pub struct RunOptions {
    /// Print one JSON object per run instead of the text report.
    pub json: bool,
    /// Print the final grid after each run.
    pub show: bool,
}

/// Pick the seed for a batch. 0 means "choose one".
pub fn resolve_seed(seed: u64) -> u64 {
    if seed == 0 {
        rand::thread_rng().r#gen()
    } else {
        seed
    }
}

/// Run `config.runs` independent fires at the configured parameters.
///
/// Every forest and every fire in the batch draws from one generator seeded
/// with the resolved seed, so a batch is reproducible from its seed.
pub fn run(config: &SimulationConfig, options: &RunOptions) -> Result<Vec<SimulationStats>, String> {
    let params = config.forest_params();
    params.validate()?;

    let seed = resolve_seed(config.seed);
    info!(
        seed,
        width = params.width,
        height = params.height,
        density = params.density,
        humidity = params.humidity,
        runs = config.runs,
        mode = config.spread_mode.name(),
        "Starting batch"
    );
    let mut rng = ChaCha8Rng::seed_from_u64(seed);

    let mut all_stats = Vec::with_capacity(config.runs as usize);
    for run in 0..config.runs {
        let forest = create_forest(&params, &mut rng);
        let result = simulation::run_simulation(forest, &mut rng, config.spread_mode);

        if options.json {
            let line = serde_json::to_string(&result.stats)
                .map_err(|e| format!("Cannot encode statistics: {}", e))?;
            println!("{}", line);
        } else {
            println!("{}", format_report(run, &result.stats));
        }

        if options.show {
            print!("{}", render_grid(&result.forest));
            println!("{}\n", legend());
        }

        all_stats.push(result.stats);
    }

    if config.runs > 1 {
        let summary = summarize(&all_stats);
        if options.json {
            let line = serde_json::to_string(&summary)
                .map_err(|e| format!("Cannot encode summary: {}", e))?;
            println!("{}", line);
        } else {
            println!("{}", format_summary(&summary));
        }
    }

    Ok(all_stats)
}

/// Validate a configuration and print the values that would be used.
pub fn check_config(config: &SimulationConfig) -> Result<(), String> {
    config.validate()?;
    config.forest_params().validate()?;

    println!("=== Configuration ===");
    println!("Grid: {} x {}", config.width, config.height);
    println!("Density: {:.3}", config.density);
    println!("Humidity: {:.3}", config.humidity);
    println!("Trees per forest: {}", config.forest_params().target_tree_count());
    println!("Runs: {}", config.runs);
    if config.seed == 0 {
        println!("Seed: random");
    } else {
        println!("Seed: {}", config.seed);
    }
    println!("Spread mode: {}", config.spread_mode.name());
    println!("Log: {} ({})", config.log_level, config.log_format);
    Ok(())
}

pub fn format_report(run: u32, stats: &SimulationStats) -> String {
    let strike = if stats.strike_hit {
        format!("{}", stats.strike)
    } else {
        format!("{} (no tree hit)", stats.strike)
    };
    format!(
        "Completed simulation: density={:.2}, humidity={:.2}, run={}\n\
         Strike location: {}, Simulation steps: {}\n\
         Total trees: {}, Burned: {} ({:.2}%)",
        stats.forest_density(),
        stats.humidity(),
        run,
        strike,
        stats.simulation_steps,
        stats.total_trees,
        stats.burned_trees,
        stats.burn_percentage()
    )
}

pub fn format_summary(summary: &BatchSummary) -> String {
    format!(
        "=== Batch Summary ===\n\
         Runs: {} (missed strikes: {}, failed ignitions: {})\n\
         Burned: mean {:.2}%, max {:.2}%\n\
         Steps: mean {:.1}, max {}",
        summary.runs,
        summary.missed_strikes,
        summary.failed_ignitions,
        summary.mean_burn_percentage,
        summary.max_burn_percentage,
        summary.mean_steps,
        summary.max_steps
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::forest::Coord;
    use std::collections::BTreeMap;

    fn small_config(runs: u32, seed: u64) -> SimulationConfig {
        SimulationConfig {
            width: 20,
            height: 15,
            density: 0.6,
            humidity: 0.2,
            runs,
            seed,
            ..SimulationConfig::default()
        }
    }

    #[test]
    fn run_produces_one_record_per_run() {
        let stats = run(&small_config(3, 17), &RunOptions::default()).unwrap();
        assert_eq!(stats.len(), 3);
        for s in &stats {
            assert_eq!(s.total_trees, 180);
            assert!(s.burned_trees <= s.total_trees);
        }
    }

    #[test]
    fn same_seed_same_batch() {
        let a = run(&small_config(2, 99), &RunOptions::default()).unwrap();
        let b = run(&small_config(2, 99), &RunOptions::default()).unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn run_rejects_invalid_params() {
        let mut config = small_config(1, 1);
        config.density = 1.5;
        let err = run(&config, &RunOptions::default()).unwrap_err();
        assert!(err.contains("density"));
    }

    #[test]
    fn nonzero_seed_is_kept() {
        assert_eq!(resolve_seed(1234), 1234);
    }

    #[test]
    fn report_mentions_missed_strike() {
        let stats = SimulationStats {
            total_trees: 4,
            burned_trees: 1,
            simulation_steps: 3,
            strike: Coord::new(2, 5),
            strike_hit: false,
            ignited: false,
            status_distribution: BTreeMap::new(),
            parameters: BTreeMap::new(),
        };
        let text = format_report(0, &stats);
        assert!(text.contains("(2,5) (no tree hit)"));
        assert!(text.contains("Burned: 1 (25.00%)"));
        assert!(text.contains("Simulation steps: 3"));
    }

    #[test]
    fn check_config_accepts_defaults() {
        assert!(check_config(&SimulationConfig::default()).is_ok());
    }
}
