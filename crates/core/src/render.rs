//! Text rendering of the forest map

use crate::automaton::GridAutomaton;
use crate::cells::CellState;
use std::fmt;

/// Glyph for a cell without a tree
pub const EMPTY_GLYPH: char = '.';
/// Glyph for a standing, unburnt tree
pub const TREE_GLYPH: char = 'T';
/// Glyph for a burning cell (with or without a tree left)
pub const FIRE_GLYPH: char = '*';

/// Map glyph for one cell. Fire wins over tree.
pub fn glyph(state: CellState) -> char {
    if state.active {
        FIRE_GLYPH
    } else if state.occupied {
        TREE_GLYPH
    } else {
        EMPTY_GLYPH
    }
}

/// One line per row, top row first.
impl fmt::Display for GridAutomaton {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (trees, fires) in self.occupancy().iter_rows().zip(self.active().iter_rows()) {
            for (&occupied, &active) in trees.iter().zip(fires) {
                write!(f, "{}", glyph(CellState { occupied, active }))?;
            }
            writeln!(f)?;
        }
        Ok(())
    }
}
