use std::collections::HashSet;

use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use rayon::prelude::*;
use serde::{Deserialize, Serialize};
use tracing::{debug, trace};

use crate::forest::{Coord, Forest, Tree};
use crate::simulation::probability::{burn_duration, ignition_probability, spread_probability};

/// How the scan phase of a tick evaluates burning cells.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SpreadMode {
    /// Row-major over burning cells, every draw taken from the caller's source.
    #[default]
    Sequential,
    /// Burning cells evaluated on the rayon pool. Each cell draws from its own
    /// generator, seeded from a single per-tick seed taken from the caller's source.
    Parallel,
}

impl SpreadMode {
    pub fn name(&self) -> &str {
        match self {
            SpreadMode::Sequential => "sequential",
            SpreadMode::Parallel => "parallel",
        }
    }
}

/// Where lightning landed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum StrikeOutcome {
    /// A healthy tree at this coordinate was marked struck.
    Struck(Coord),
    /// No healthy tree was found. The coordinate is random and nothing changed.
    Missed(Coord),
}

impl StrikeOutcome {
    pub fn coord(&self) -> Coord {
        match *self {
            StrikeOutcome::Struck(c) | StrikeOutcome::Missed(c) => c,
        }
    }

    pub fn is_struck(&self) -> bool {
        matches!(self, StrikeOutcome::Struck(_))
    }
}

/// What happened during one tick.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct StepReport {
    /// Trees burning when the tick started.
    pub burning_before: usize,
    /// Trees that burned out during the tick.
    pub burned_out: usize,
    /// Distinct cells proposed for ignition by the scan phase.
    pub proposed: usize,
    /// Healthy trees set alight by the apply phase.
    pub ignited: usize,
}

impl StepReport {
    /// Whether the tick saw any fire. The driver loops while this holds.
    pub fn fire_active(&self) -> bool {
        self.burning_before > 0 || self.proposed > 0
    }
}

/// Mark the tree at `coord` struck if it is healthy.
pub fn strike_at(forest: &mut Forest, coord: Coord) -> bool {
    forest.tree_mut(coord).is_some_and(|tree| tree.mark_struck())
}

/// Strike a uniformly chosen healthy tree.
///
/// Samples at most `width * height` random cells. When none of them holds a
/// healthy tree, returns `Missed` with a random coordinate and leaves the
/// forest untouched.
pub fn strike_lightning<R: Rng + ?Sized>(forest: &mut Forest, rng: &mut R) -> StrikeOutcome {
    let (width, height) = (forest.width(), forest.height());
    if forest.cell_count() == 0 {
        return StrikeOutcome::Missed(Coord::new(0, 0));
    }

    for _ in 0..forest.cell_count() {
        let coord = Coord::new(rng.gen_range(0..width), rng.gen_range(0..height));
        if strike_at(forest, coord) {
            return StrikeOutcome::Struck(coord);
        }
    }

    StrikeOutcome::Missed(Coord::new(
        rng.gen_range(0..width),
        rng.gen_range(0..height),
    ))
}

/// Try to set the tree at `coord` on fire.
///
/// Only healthy or struck trees can be ignited; anything else (including an
/// out-of-bounds or empty cell) returns false without touching the forest.
/// Succeeds with [`ignition_probability`].
pub fn ignite<R: Rng + ?Sized>(forest: &mut Forest, coord: Coord, rng: &mut R) -> bool {
    let humidity = forest.humidity();
    let Some(tree) = forest.tree_mut(coord) else {
        return false;
    };
    if !tree.status().is_ignitable() {
        return false;
    }

    let probability = ignition_probability(tree, humidity);
    if probability > rng.r#gen::<f64>() {
        let duration = burn_duration(tree, humidity);
        tree.set_burning(duration);
        true
    } else {
        false
    }
}

/// Advance the fire by one synchronous tick.
///
/// Scan: every burning tree proposes its healthy neighbors for ignition,
/// reading only the state at the start of the tick. Burning trees then lose
/// one tick of fuel. Apply: proposed cells that are still healthy catch fire.
/// A tree lit in this tick does not spread fire until the next one.
pub fn advance<R: Rng + ?Sized>(forest: &mut Forest, rng: &mut R, mode: SpreadMode) -> StepReport {
    let burning: Vec<Coord> = forest
        .trees()
        .filter(|(_, t)| t.is_burning())
        .map(|(c, _)| c)
        .collect();

    let pending = match mode {
        SpreadMode::Sequential => scan_sequential(forest, &burning, rng),
        SpreadMode::Parallel => scan_parallel(forest, &burning, rng.r#gen()),
    };

    let mut burned_out = 0;
    for &coord in &burning {
        if forest.tree_mut(coord).is_some_and(|t| t.burn_tick()) {
            burned_out += 1;
        }
    }

    let humidity = forest.humidity();
    let mut ignited = 0;
    for &coord in &pending {
        if let Some(tree) = forest.tree_mut(coord) {
            if tree.is_healthy() {
                let duration = burn_duration(tree, humidity);
                tree.set_burning(duration);
                ignited += 1;
                trace!(%coord, duration, "Spread ignition");
            }
        }
    }

    let report = StepReport {
        burning_before: burning.len(),
        burned_out,
        proposed: pending.len(),
        ignited,
    };
    debug!(
        burning = report.burning_before,
        burned_out = report.burned_out,
        ignited = report.ignited,
        "Tick advanced"
    );
    report
}

fn scan_sequential<R: Rng + ?Sized>(
    forest: &Forest,
    burning: &[Coord],
    rng: &mut R,
) -> HashSet<Coord> {
    let mut pending = HashSet::new();
    for &coord in burning {
        if let Some(source) = forest.tree(coord) {
            propose_ignitions(forest, coord, source, rng, &mut pending);
        }
    }
    pending
}

fn scan_parallel(forest: &Forest, burning: &[Coord], tick_seed: u64) -> HashSet<Coord> {
    burning
        .par_iter()
        .enumerate()
        .flat_map_iter(|(i, &coord)| {
            let mut proposals: Vec<Coord> = Vec::new();
            if let Some(source) = forest.tree(coord) {
                let mut cell_rng = ChaCha8Rng::seed_from_u64(cell_seed(tick_seed, i));
                propose_ignitions(forest, coord, source, &mut cell_rng, &mut proposals);
            }
            proposals
        })
        .collect()
}

/// Draw once per healthy neighbor of `coord` and collect the ones that catch.
fn propose_ignitions<R, E>(forest: &Forest, coord: Coord, source: &Tree, rng: &mut R, out: &mut E)
where
    R: Rng + ?Sized,
    E: Extend<Coord>,
{
    let humidity = forest.humidity();
    for neighbor in forest.neighbors(coord) {
        let target = match forest.tree(neighbor.coord) {
            Some(t) if t.is_healthy() => t,
            _ => continue,
        };
        let probability = spread_probability(source, target, neighbor.diagonal, humidity);
        if probability > rng.r#gen::<f64>() {
            out.extend(std::iter::once(neighbor.coord));
        }
    }
}

/// Deterministic per-cell seed for the parallel scan.
fn cell_seed(tick_seed: u64, index: usize) -> u64 {
    tick_seed
        .wrapping_mul(6364136223846793005)
        .wrapping_add(index as u64)
        .wrapping_mul(1442695040888963407)
}
