use rand::Rng;
use tracing::debug;

use crate::config::forest::ForestParams;
use crate::forest::tree::Tree;
use crate::forest::{Coord, Forest};

/// Once fewer than 1/N of the cells are free, placement draws from the list
/// of free cells instead of rejecting collisions.
const DENSE_FILL_DIVISOR: usize = 8;

/// Build a forest holding exactly `params.target_tree_count()` trees.
///
/// Trees are placed by drawing uniform coordinates and retrying on
/// collisions. Each tree gets a uniform species and a uniform age in
/// [1, 100]. `params` must already be validated.
pub fn create_forest<R: Rng + ?Sized>(params: &ForestParams, rng: &mut R) -> Forest {
    debug_assert!(params.validate().is_ok(), "forest params must be validated");

    let mut forest = Forest::empty(params.width, params.height, params.humidity);
    let target = params.target_tree_count();
    let cells = params.cell_count();
    let dense_threshold = cells / DENSE_FILL_DIVISOR;

    let mut placed = 0;
    let mut collisions = 0_u64;

    while placed < target {
        if cells - placed <= dense_threshold {
            placed += fill_remaining(&mut forest, target - placed, rng);
            break;
        }

        let coord = Coord::new(
            rng.gen_range(0..params.width),
            rng.gen_range(0..params.height),
        );
        if forest.place_tree(coord, Tree::random(rng)) {
            placed += 1;
        } else {
            collisions += 1;
        }
    }

    debug!(
        width = params.width,
        height = params.height,
        trees = placed,
        collisions,
        "Forest created"
    );
    forest
}

/// Place `count` trees on uniformly chosen free cells.
///
/// Equivalent in distribution to rejection sampling, without the long tail
/// of retries when almost every cell is taken.
fn fill_remaining<R: Rng + ?Sized>(forest: &mut Forest, count: usize, rng: &mut R) -> usize {
    let mut free: Vec<Coord> = (0..forest.cell_count())
        .map(|i| forest.coord_of(i))
        .filter(|&c| !forest.is_occupied(c))
        .collect();

    let mut placed = 0;
    while placed < count && !free.is_empty() {
        let coord = free.swap_remove(rng.gen_range(0..free.len()));
        if forest.place_tree(coord, Tree::random(rng)) {
            placed += 1;
        }
    }
    placed
}
