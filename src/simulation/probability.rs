//! Fire probability and burn duration models.
//!
//! All functions are pure; humidity is the forest-wide value in [0, 1].

use crate::forest::Tree;

const SPREAD_BASE: f64 = 0.4;
const DIAGONAL_FACTOR: f64 = 0.7;

/// Older trees catch fire more readily: 0.8 at age 0 up to 1.2 at age 100.
fn age_factor(age: u32) -> f64 {
    0.8 + 0.4 * (age as f64 / 100.0)
}

/// Probability that a lightning-struck tree catches fire.
pub fn ignition_probability(tree: &Tree, humidity: f64) -> f64 {
    let base = 0.8 - 0.5 * humidity;
    base * tree.species().flammability() * age_factor(tree.age())
}

/// Probability that `source` sets fire to the healthy `target` next to it.
pub fn spread_probability(source: &Tree, target: &Tree, diagonal: bool, humidity: f64) -> f64 {
    let base = if diagonal {
        SPREAD_BASE * DIAGONAL_FACTOR
    } else {
        SPREAD_BASE
    };
    let humidity_factor = 1.0 - 0.9 * humidity * humidity;
    base * source.species().flammability() * humidity_factor * age_factor(target.age())
}

/// Ticks a newly ignited tree burns for.
pub fn burn_duration(tree: &Tree, humidity: f64) -> u32 {
    let base = tree.species().base_burn_duration() as f64;
    let age = 1.0 + tree.age() as f64 / 100.0;
    let damp = 1.0 - 0.3 * humidity;
    (base * age * damp).floor().max(0.0) as u32
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::forest::Species;

    const EPS: f64 = 1e-12;

    #[test]
    fn ignition_probability_formula() {
        let pine = Tree::new(Species::Pine, 50);
        // (0.8 - 0.25) * 1.4 * 1.0
        assert!((ignition_probability(&pine, 0.5) - 0.77).abs() < EPS);

        let oak = Tree::new(Species::Oak, 100);
        // 0.8 * 0.8 * 1.2
        assert!((ignition_probability(&oak, 0.0) - 0.768).abs() < EPS);
    }

    #[test]
    fn diagonal_spread_is_seventy_percent_of_orthogonal() {
        let source = Tree::new(Species::Birch, 40);
        let target = Tree::new(Species::Maple, 60);
        let ortho = spread_probability(&source, &target, false, 0.3);
        let diag = spread_probability(&source, &target, true, 0.3);
        assert!((diag - ortho * 0.7).abs() < EPS);
    }

    #[test]
    fn spread_uses_source_species_and_target_age() {
        let pine = Tree::new(Species::Pine, 1);
        let old_oak = Tree::new(Species::Oak, 100);
        // 0.4 * 1.4 * 1.0 * 1.2
        assert!((spread_probability(&pine, &old_oak, false, 0.0) - 0.672).abs() < EPS);
        // 0.4 * 0.8 * 1.0 * (0.8 + 0.004)
        assert!((spread_probability(&old_oak, &pine, false, 0.0) - 0.25728).abs() < EPS);
    }

    #[test]
    fn full_humidity_cuts_spread_to_a_tenth() {
        let source = Tree::new(Species::Pine, 20);
        let target = Tree::new(Species::Pine, 80);
        let dry = spread_probability(&source, &target, false, 0.0);
        let wet = spread_probability(&source, &target, false, 1.0);
        assert!((wet - dry * 0.1).abs() < EPS);
    }

    #[test]
    fn spread_strictly_decreases_with_humidity_for_every_species() {
        let target = Tree::new(Species::Oak, 55);
        for &species in Species::all() {
            let source = Tree::new(species, 55);
            let mut previous = f64::INFINITY;
            for step in 0..=20 {
                let h = step as f64 / 20.0;
                let p = spread_probability(&source, &target, false, h);
                assert!(p < previous, "{:?} at humidity {}", species, h);
                previous = p;
            }
        }
    }

    #[test]
    fn burn_duration_formula() {
        // floor(5 * 1.5 * 1.0)
        assert_eq!(burn_duration(&Tree::new(Species::Pine, 50), 0.0), 7);
        // floor(3 * 2.0 * 0.7)
        assert_eq!(burn_duration(&Tree::new(Species::Birch, 100), 1.0), 4);
        // floor(4 * 1.01 * 0.85) = floor(3.434)
        assert_eq!(burn_duration(&Tree::new(Species::Oak, 1), 0.5), 3);
    }

    #[test]
    fn burn_duration_is_always_positive() {
        for &species in Species::all() {
            for age in [1, 50, 100] {
                let tree = Tree::new(species, age);
                assert!(burn_duration(&tree, 1.0) > 0);
            }
        }
    }
}
