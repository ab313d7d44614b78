use clap::{Args, Parser, Subcommand};
use std::path::Path;

use forestfire::cli::commands::{self, RunOptions};
use forestfire::cli::init_logging;
use forestfire::config::simulation::SimulationConfig;
use forestfire::simulation::engine::SpreadMode;

#[derive(Parser)]
#[command(name = "forestfire")]
#[command(about = "A stochastic forest fire cellular automaton with per-run burn statistics")]
#[command(version)]
struct Cli {
    /// Path to a TOML configuration file. Defaults apply when omitted.
    #[arg(short, long, global = true)]
    config: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Strike lightning into freshly grown forests and report how much burns
    Run {
        #[command(flatten)]
        overrides: Overrides,

        /// Print statistics as JSON, one object per line
        #[arg(long)]
        json: bool,

        /// Print the final grid after each run
        #[arg(long)]
        show: bool,
    },

    /// Validate the configuration and print the resolved values
    CheckConfig {
        #[command(flatten)]
        overrides: Overrides,
    },
}

/// Command-line values that replace the configuration file's.
#[derive(Args)]
struct Overrides {
    /// Forest width in cells
    #[arg(long)]
    width: Option<usize>,

    /// Forest height in cells
    #[arg(long)]
    height: Option<usize>,

    /// Share of cells holding a tree (0.0-1.0)
    #[arg(short, long)]
    density: Option<f64>,

    /// Ambient humidity (0.0-1.0)
    #[arg(short = 'u', long)]
    humidity: Option<f64>,

    /// Number of independent runs
    #[arg(short, long)]
    runs: Option<u32>,

    /// Random seed; 0 picks one
    #[arg(short, long)]
    seed: Option<u64>,

    /// Evaluate the spread scan on all cores
    #[arg(long)]
    parallel: bool,
}

impl Overrides {
    fn apply(&self, config: &mut SimulationConfig) {
        if let Some(width) = self.width {
            config.width = width;
        }
        if let Some(height) = self.height {
            config.height = height;
        }
        if let Some(density) = self.density {
            config.density = density;
        }
        if let Some(humidity) = self.humidity {
            config.humidity = humidity;
        }
        if let Some(runs) = self.runs {
            config.runs = runs;
        }
        if let Some(seed) = self.seed {
            config.seed = seed;
        }
        if self.parallel {
            config.spread_mode = SpreadMode::Parallel;
        }
    }
}

fn load_config(path: Option<&str>, overrides: &Overrides) -> SimulationConfig {
    let mut config = match path {
        Some(p) => match SimulationConfig::from_file(Path::new(p)) {
            Ok(c) => c,
            Err(e) => {
                eprintln!("Error loading config: {}", e);
                std::process::exit(1);
            }
        },
        None => SimulationConfig::default(),
    };

    overrides.apply(&mut config);
    if let Err(e) = config.validate() {
        eprintln!("Invalid configuration:\n{}", e);
        std::process::exit(1);
    }
    config
}

fn main() {
    let cli = Cli::parse();

    match cli.command {
        Commands::Run {
            overrides,
            json,
            show,
        } => {
            let config = load_config(cli.config.as_deref(), &overrides);
            init_logging(&config.log_level, &config.log_format);

            let options = RunOptions { json, show };
            if let Err(e) = commands::run(&config, &options) {
                eprintln!("Simulation error: {}", e);
                std::process::exit(1);
            }
        }

        Commands::CheckConfig { overrides } => {
            let config = load_config(cli.config.as_deref(), &overrides);
            if let Err(e) = commands::check_config(&config) {
                eprintln!("Error: {}", e);
                std::process::exit(1);
            }
        }
    }
}
