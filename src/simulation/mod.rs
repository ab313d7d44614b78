pub mod engine;
pub mod probability;
pub mod statistics;

use std::ops::ControlFlow;

use rand::Rng;
use tracing::{info, warn};

use crate::forest::Forest;
use crate::simulation::engine::{advance, ignite, strike_lightning, SpreadMode, StepReport, StrikeOutcome};
use crate::simulation::statistics::SimulationStats;

/// Progress notifications delivered to a run observer.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum RunEvent {
    Struck(StrikeOutcome),
    Ignited(bool),
    Tick { step: u32, report: StepReport },
}

/// Result of a finished run: the statistics plus the final grid.
#[derive(Debug, Clone)]
pub struct RunResult {
    pub stats: SimulationStats,
    pub forest: Forest,
    /// True when an observer stopped the run before the fire went out.
    pub interrupted: bool,
}

/// Run one fire to completion: strike, ignite, tick until no fire remains.
pub fn run_simulation<R: Rng + ?Sized>(forest: Forest, rng: &mut R, mode: SpreadMode) -> RunResult {
    run_simulation_with(forest, rng, mode, |_, _| ControlFlow::Continue(()))
}

/// Like [`run_simulation`], calling `observer` after the strike, after the
/// ignition attempt and after every tick. Returning `Break` ends the run
/// early; statistics then describe the forest as it stood.
///
/// The ignition attempt only happens when lightning actually hit a tree. The
/// step count covers ticks that reported active fire.
pub fn run_simulation_with<R, F>(
    mut forest: Forest,
    rng: &mut R,
    mode: SpreadMode,
    mut observer: F,
) -> RunResult
where
    R: Rng + ?Sized,
    F: FnMut(&Forest, RunEvent) -> ControlFlow<()>,
{
    let strike = strike_lightning(&mut forest, rng);
    if !strike.is_struck() {
        warn!(coord = %strike.coord(), "Lightning found no healthy tree");
    }
    let mut interrupted = observer(&forest, RunEvent::Struck(strike)).is_break();

    let mut ignited = false;
    if !interrupted && strike.is_struck() {
        ignited = ignite(&mut forest, strike.coord(), rng);
        interrupted = observer(&forest, RunEvent::Ignited(ignited)).is_break();
    }

    let mut steps = 0_u32;
    while !interrupted {
        let report = advance(&mut forest, rng, mode);
        if !report.fire_active() {
            break;
        }
        steps += 1;
        interrupted = observer(&forest, RunEvent::Tick { step: steps, report }).is_break();
    }

    let stats = statistics::compute_statistics(&forest, strike, ignited, steps);
    info!(
        strike = %stats.strike,
        strike_hit = stats.strike_hit,
        ignited,
        steps,
        total = stats.total_trees,
        burned = stats.burned_trees,
        interrupted,
        "Run finished"
    );

    RunResult {
        stats,
        forest,
        interrupted,
    }
}

#[cfg(test)]
pub(crate) mod fixtures {
    use rand::RngCore;

    /// Every draw is 0.0, so every probability check succeeds.
    pub struct ZeroRng;

    impl RngCore for ZeroRng {
        fn next_u32(&mut self) -> u32 {
            0
        }
        fn next_u64(&mut self) -> u64 {
            0
        }
        fn fill_bytes(&mut self, dest: &mut [u8]) {
            dest.fill(0);
        }
        fn try_fill_bytes(&mut self, dest: &mut [u8]) -> Result<(), rand::Error> {
            dest.fill(0);
            Ok(())
        }
    }

    /// Every draw is just below 1.0, so only probabilities above that succeed.
    /// Do not use with `gen_range`: it rejects all-ones samples forever.
    pub struct MaxRng;

    impl RngCore for MaxRng {
        fn next_u32(&mut self) -> u32 {
            u32::MAX
        }
        fn next_u64(&mut self) -> u64 {
            u64::MAX
        }
        fn fill_bytes(&mut self, dest: &mut [u8]) {
            dest.fill(0xFF);
        }
        fn try_fill_bytes(&mut self, dest: &mut [u8]) -> Result<(), rand::Error> {
            dest.fill(0xFF);
            Ok(())
        }
    }
}
