use rand::Rng;
use serde::{Deserialize, Serialize};

// === Enums ===

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Species {
    Pine,
    Oak,
    Birch,
    Maple,
}

impl Species {
    pub fn all() -> &'static [Species] {
        &[Species::Pine, Species::Oak, Species::Birch, Species::Maple]
    }

    /// Multiplier applied to ignition and spread probabilities.
    pub fn flammability(self) -> f64 {
        match self {
            Species::Pine => 1.4,
            Species::Oak => 0.8,
            Species::Birch => 1.2,
            Species::Maple => 1.0,
        }
    }

    /// Ticks a tree of this species burns before age and humidity adjustments.
    pub fn base_burn_duration(self) -> u32 {
        match self {
            Species::Pine => 5,
            Species::Oak => 4,
            Species::Birch => 3,
            Species::Maple => 4,
        }
    }

    pub fn random<R: Rng + ?Sized>(rng: &mut R) -> Species {
        let all = Species::all();
        all[rng.gen_range(0..all.len())]
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum TreeStatus {
    Healthy,
    Struck,
    Burning,
    Burned,
}

impl TreeStatus {
    pub fn all() -> &'static [TreeStatus] {
        &[
            TreeStatus::Healthy,
            TreeStatus::Struck,
            TreeStatus::Burning,
            TreeStatus::Burned,
        ]
    }

    /// Whether a direct ignition attempt may act on a tree in this state.
    pub fn is_ignitable(self) -> bool {
        matches!(self, TreeStatus::Healthy | TreeStatus::Struck)
    }
}

pub const MIN_AGE: u32 = 1;
pub const MAX_AGE: u32 = 100;

// === Tree ===

/// A single tree. Species and age are fixed at creation; status only moves
/// forward along Healthy -> Struck -> Burning -> Burned.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Tree {
    species: Species,
    age: u32,
    status: TreeStatus,
    burn_remaining: u32,
}

impl Tree {
    pub fn new(species: Species, age: u32) -> Self {
        debug_assert!((MIN_AGE..=MAX_AGE).contains(&age));
        Tree {
            species,
            age,
            status: TreeStatus::Healthy,
            burn_remaining: 0,
        }
    }

    pub fn random<R: Rng + ?Sized>(rng: &mut R) -> Self {
        let species = Species::random(rng);
        let age = rng.gen_range(MIN_AGE..=MAX_AGE);
        Tree::new(species, age)
    }

    pub fn species(&self) -> Species {
        self.species
    }

    pub fn age(&self) -> u32 {
        self.age
    }

    pub fn status(&self) -> TreeStatus {
        self.status
    }

    /// Remaining burn ticks. Always 0 unless the tree is burning.
    pub fn burn_remaining(&self) -> u32 {
        if self.status == TreeStatus::Burning {
            self.burn_remaining
        } else {
            0
        }
    }

    pub fn is_burning(&self) -> bool {
        self.status == TreeStatus::Burning
    }

    pub fn is_healthy(&self) -> bool {
        self.status == TreeStatus::Healthy
    }

    pub(crate) fn mark_struck(&mut self) -> bool {
        if self.status != TreeStatus::Healthy {
            return false;
        }
        self.status = TreeStatus::Struck;
        true
    }

    /// A zero duration burns out immediately.
    pub(crate) fn set_burning(&mut self, duration: u32) {
        debug_assert!(self.status.is_ignitable());
        if duration == 0 {
            self.status = TreeStatus::Burned;
            self.burn_remaining = 0;
        } else {
            self.status = TreeStatus::Burning;
            self.burn_remaining = duration;
        }
    }

    /// Consume one tick of fuel. Returns true when the tree burned out.
    pub(crate) fn burn_tick(&mut self) -> bool {
        if self.status != TreeStatus::Burning {
            return false;
        }
        self.burn_remaining = self.burn_remaining.saturating_sub(1);
        if self.burn_remaining == 0 {
            self.status = TreeStatus::Burned;
            true
        } else {
            false
        }
    }
}
