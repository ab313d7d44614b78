use crate::forest::{Coord, Forest, Species, Tree, TreeStatus};

const EMPTY: char = '.';

/// Character for one tree: its species initial while healthy, a status
/// marker otherwise.
pub fn tree_glyph(tree: &Tree) -> char {
    match tree.status() {
        TreeStatus::Healthy => match tree.species() {
            Species::Pine => 'p',
            Species::Oak => 'o',
            Species::Birch => 'b',
            Species::Maple => 'm',
        },
        TreeStatus::Struck => '*',
        TreeStatus::Burning => '#',
        TreeStatus::Burned => 'x',
    }
}

/// Draw the forest as one text line per row.
pub fn render_grid(forest: &Forest) -> String {
    let mut out = String::with_capacity((forest.width() + 1) * forest.height());
    for y in 0..forest.height() {
        for x in 0..forest.width() {
            let glyph = forest
                .tree(Coord::new(x, y))
                .map(tree_glyph)
                .unwrap_or(EMPTY);
            out.push(glyph);
        }
        out.push('\n');
    }
    out
}

pub fn legend() -> &'static str {
    "p/o/b/m healthy pine/oak/birch/maple  * struck  # burning  x burned  . empty"
}
