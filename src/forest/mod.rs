pub mod generation;
pub mod tree;

use serde::{Deserialize, Serialize};

pub use tree::{Species, Tree, TreeStatus};

/// Grid coordinate. `x` is the column, `y` the row.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Coord {
    pub x: usize,
    pub y: usize,
}

impl Coord {
    pub fn new(x: usize, y: usize) -> Self {
        Coord { x, y }
    }
}

impl std::fmt::Display for Coord {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "({},{})", self.x, self.y)
    }
}

/// Moore neighborhood offsets as (dx, dy).
const NEIGHBOR_OFFSETS: [(isize, isize); 8] = [
    (-1, -1),
    (0, -1),
    (1, -1),
    (-1, 0),
    (1, 0),
    (-1, 1),
    (0, 1),
    (1, 1),
];

/// A neighbor of some cell, with whether it touches only at a corner.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Neighbor {
    pub coord: Coord,
    pub diagonal: bool,
}

/// A rectangular forest. Cells are stored row-major; `None` is open ground.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Forest {
    width: usize,
    height: usize,
    humidity: f64,
    cells: Vec<Option<Tree>>,
}

impl Forest {
    /// An all-empty forest.
    pub fn empty(width: usize, height: usize, humidity: f64) -> Self {
        Forest {
            width,
            height,
            humidity,
            cells: vec![None; width * height],
        }
    }

    /// Build a forest from explicit placements. Later placements on an
    /// occupied or out-of-bounds cell are ignored.
    pub fn with_trees<I>(width: usize, height: usize, humidity: f64, trees: I) -> Self
    where
        I: IntoIterator<Item = (Coord, Tree)>,
    {
        let mut forest = Forest::empty(width, height, humidity);
        for (coord, tree) in trees {
            forest.place_tree(coord, tree);
        }
        forest
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    pub fn humidity(&self) -> f64 {
        self.humidity
    }

    pub fn cell_count(&self) -> usize {
        self.cells.len()
    }

    pub fn contains(&self, coord: Coord) -> bool {
        coord.x < self.width && coord.y < self.height
    }

    fn index(&self, coord: Coord) -> Option<usize> {
        self.contains(coord).then(|| coord.y * self.width + coord.x)
    }

    pub(crate) fn coord_of(&self, index: usize) -> Coord {
        Coord::new(index % self.width, index / self.width)
    }

    pub fn tree(&self, coord: Coord) -> Option<&Tree> {
        self.index(coord).and_then(|i| self.cells[i].as_ref())
    }

    pub(crate) fn tree_mut(&mut self, coord: Coord) -> Option<&mut Tree> {
        self.index(coord).and_then(|i| self.cells[i].as_mut())
    }

    pub fn is_occupied(&self, coord: Coord) -> bool {
        self.tree(coord).is_some()
    }

    /// Place a tree on an empty in-bounds cell. Returns false otherwise.
    pub(crate) fn place_tree(&mut self, coord: Coord, tree: Tree) -> bool {
        match self.index(coord) {
            Some(i) if self.cells[i].is_none() => {
                self.cells[i] = Some(tree);
                true
            }
            _ => false,
        }
    }

    /// All trees with their coordinates, row-major.
    pub fn trees(&self) -> impl Iterator<Item = (Coord, &Tree)> + '_ {
        self.cells
            .iter()
            .enumerate()
            .filter_map(move |(i, cell)| cell.as_ref().map(|t| (self.coord_of(i), t)))
    }

    pub fn occupied_count(&self) -> usize {
        self.cells.iter().filter(|c| c.is_some()).count()
    }

    pub fn count_status(&self, status: TreeStatus) -> usize {
        self.trees().filter(|(_, t)| t.status() == status).count()
    }

    pub fn has_fire(&self) -> bool {
        self.trees().any(|(_, t)| t.is_burning())
    }

    /// In-bounds Moore neighbors of `coord`. The grid does not wrap.
    pub fn neighbors(&self, coord: Coord) -> impl Iterator<Item = Neighbor> + '_ {
        NEIGHBOR_OFFSETS.iter().filter_map(move |&(dx, dy)| {
            let x = coord.x.checked_add_signed(dx)?;
            let y = coord.y.checked_add_signed(dy)?;
            let c = Coord::new(x, y);
            self.contains(c).then_some(Neighbor {
                coord: c,
                diagonal: dx != 0 && dy != 0,
            })
        })
    }
}
