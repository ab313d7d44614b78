use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::forest::{Coord, Forest, TreeStatus};
use crate::simulation::engine::StrikeOutcome;

pub const PARAM_FOREST_DENSITY: &str = "forest_density";
pub const PARAM_HUMIDITY: &str = "humidity";

/// Summary of one finished run, handed to reporting and storage.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SimulationStats {
    pub total_trees: usize,
    pub burned_trees: usize,
    pub simulation_steps: u32,
    pub strike: Coord,
    /// False when lightning found no healthy tree; `strike` is then arbitrary.
    pub strike_hit: bool,
    pub ignited: bool,
    pub status_distribution: BTreeMap<TreeStatus, usize>,
    pub parameters: BTreeMap<String, f64>,
}

impl SimulationStats {
    /// Share of trees that burned, in percent. 0 for a treeless forest.
    pub fn burn_percentage(&self) -> f64 {
        if self.total_trees == 0 {
            0.0
        } else {
            self.burned_trees as f64 / self.total_trees as f64 * 100.0
        }
    }

    pub fn forest_density(&self) -> f64 {
        self.parameters.get(PARAM_FOREST_DENSITY).copied().unwrap_or(0.0)
    }

    pub fn humidity(&self) -> f64 {
        self.parameters.get(PARAM_HUMIDITY).copied().unwrap_or(0.0)
    }
}

/// Compute statistics from the final state of a run.
pub fn compute_statistics(
    forest: &Forest,
    strike: StrikeOutcome,
    ignited: bool,
    steps: u32,
) -> SimulationStats {
    let mut distribution: BTreeMap<TreeStatus, usize> =
        TreeStatus::all().iter().map(|&s| (s, 0)).collect();
    let mut total = 0;

    for (_, tree) in forest.trees() {
        total += 1;
        *distribution.entry(tree.status()).or_insert(0) += 1;
    }

    let cells = forest.cell_count();
    let density = if cells == 0 {
        0.0
    } else {
        total as f64 / cells as f64
    };

    let mut parameters = BTreeMap::new();
    parameters.insert(PARAM_FOREST_DENSITY.to_string(), density);
    parameters.insert(PARAM_HUMIDITY.to_string(), forest.humidity());

    SimulationStats {
        total_trees: total,
        burned_trees: distribution[&TreeStatus::Burned],
        simulation_steps: steps,
        strike: strike.coord(),
        strike_hit: strike.is_struck(),
        ignited,
        status_distribution: distribution,
        parameters,
    }
}

/// Aggregate over several runs at the same parameters.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BatchSummary {
    pub runs: usize,
    pub missed_strikes: usize,
    pub failed_ignitions: usize,
    pub mean_burn_percentage: f64,
    pub max_burn_percentage: f64,
    pub mean_steps: f64,
    pub max_steps: u32,
}

pub fn summarize(stats: &[SimulationStats]) -> BatchSummary {
    let runs = stats.len();
    if runs == 0 {
        return BatchSummary {
            runs: 0,
            missed_strikes: 0,
            failed_ignitions: 0,
            mean_burn_percentage: 0.0,
            max_burn_percentage: 0.0,
            mean_steps: 0.0,
            max_steps: 0,
        };
    }

    let n = runs as f64;
    BatchSummary {
        runs,
        missed_strikes: stats.iter().filter(|s| !s.strike_hit).count(),
        failed_ignitions: stats.iter().filter(|s| s.strike_hit && !s.ignited).count(),
        mean_burn_percentage: stats.iter().map(|s| s.burn_percentage()).sum::<f64>() / n,
        max_burn_percentage: stats
            .iter()
            .map(|s| s.burn_percentage())
            .fold(0.0, f64::max),
        mean_steps: stats.iter().map(|s| s.simulation_steps as f64).sum::<f64>() / n,
        max_steps: stats.iter().map(|s| s.simulation_steps).max().unwrap_or(0),
    }
}
