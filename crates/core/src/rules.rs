//! The three per-tick sub-rules
//!
//! Each rule reads the layers as they stood when the rule started and
//! commits its writes when it returns. Rows are processed in parallel:
//!
//! - growth only touches a cell's own tree bit,
//! - ignition reads trees and writes fires,
//! - spread reads fires into a fresh buffer before anything is extinguished.

use crate::cells::CellGrid;
use crate::rng::RowStreams;
use crate::units::Probability;
use rand::Rng;
use rayon::prelude::*;

/// What the spread-and-extinguish rule did in one tick
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct SpreadOutcome {
    /// Trees that burnt down (cells burning and still holding a tree entering the rule)
    pub burnt: usize,
    /// Cells that will be burning at the start of the next tick
    pub ignited: usize,
}

/// Empty cells sprout a tree with probability `p`.
pub(crate) fn grow(trees: &mut CellGrid, p: Probability, streams: RowStreams) {
    if p.is_impossible() {
        return;
    }
    let columns = trees.columns();

    trees
        .as_mut_slice()
        .par_chunks_mut(columns)
        .enumerate()
        .for_each(|(row, cells)| {
            let mut rng = streams.row(row);
            for cell in cells {
                // Draw for every cell so the stream position never depends on state
                let draw: f64 = rng.random();
                if !*cell && p.hits(draw) {
                    *cell = true;
                }
            }
        });
}

/// Lightning strikes occupied cells with probability `p`.
pub(crate) fn ignite(trees: &CellGrid, fires: &mut CellGrid, p: Probability, streams: RowStreams) {
    if p.is_impossible() {
        return;
    }
    let columns = trees.columns();

    fires
        .as_mut_slice()
        .par_chunks_mut(columns)
        .zip(trees.as_slice().par_chunks(columns))
        .enumerate()
        .for_each(|(row, (fire_row, tree_row))| {
            let mut rng = streams.row(row);
            for (fire, &tree) in fire_row.iter_mut().zip(tree_row) {
                let draw: f64 = rng.random();
                if tree && p.hits(draw) {
                    *fire = true;
                }
            }
        });
}

/// Fire moves to occupied orthogonal neighbours, then burning cells lose
/// their tree and the new fire front replaces the old one.
///
/// Off-grid neighbours count as not burning.
pub(crate) fn spread_and_extinguish(trees: &mut CellGrid, fires: &mut CellGrid) -> SpreadOutcome {
    let rows = fires.rows();
    let columns = fires.columns();
    let mut next = vec![false; rows * columns];

    {
        let fire = fires.as_slice();
        let tree = trees.as_slice();
        next.par_chunks_mut(columns)
            .enumerate()
            .for_each(|(row, out)| {
                for (col, cell) in out.iter_mut().enumerate() {
                    let idx = row * columns + col;
                    if !tree[idx] {
                        continue;
                    }
                    let north = row > 0 && fire[idx - columns];
                    let south = row + 1 < rows && fire[idx + columns];
                    let west = col > 0 && fire[idx - 1];
                    let east = col + 1 < columns && fire[idx + 1];
                    *cell = north || south || east || west;
                }
            });
    }

    // A fire can outlive its tree by one tick; only standing trees count as burnt
    let burnt = fires
        .as_slice()
        .par_iter()
        .zip(trees.as_slice().par_iter())
        .filter(|&(&burning, &tree)| burning && tree)
        .count();
    trees
        .as_mut_slice()
        .par_iter_mut()
        .zip(fires.as_slice().par_iter())
        .for_each(|(tree, &burning)| {
            if burning {
                *tree = false;
            }
        });

    let ignited = next.iter().filter(|&&c| c).count();
    fires.replace_cells(next);

    SpreadOutcome { burnt, ignited }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cells::Dimensions;
    use crate::rng::master_from_seed;

    fn grid(rows: &[&str]) -> CellGrid {
        let parsed: Vec<Vec<bool>> = rows
            .iter()
            .map(|r| r.chars().map(|c| c == '#').collect())
            .collect();
        CellGrid::from_rows(&parsed).unwrap()
    }

    #[test]
    fn test_spread_reaches_orthogonal_neighbours_only() {
        let mut trees = grid(&["###", "###", "###"]);
        let mut fires = grid(&["...", ".#.", "..."]);

        let outcome = spread_and_extinguish(&mut trees, &mut fires);

        assert_eq!(fires, grid(&[".#.", "#.#", ".#."]));
        assert_eq!(trees, grid(&["###", "#.#", "###"]));
        assert_eq!(outcome, SpreadOutcome { burnt: 1, ignited: 4 });
    }

    #[test]
    fn test_spread_needs_a_tree() {
        let mut trees = grid(&["#..", "...", "..."]);
        let mut fires = grid(&[".#.", "...", "..."]);

        spread_and_extinguish(&mut trees, &mut fires);

        // Only the single tree next to the fire catches
        assert_eq!(fires, grid(&["#..", "...", "..."]));
    }

    #[test]
    fn test_burning_tree_next_to_fire_keeps_burning_without_tree() {
        let mut trees = grid(&["##"]);
        let mut fires = grid(&["##"]);

        let first = spread_and_extinguish(&mut trees, &mut fires);

        assert_eq!(trees, grid(&[".."]));
        assert_eq!(fires, grid(&["##"]));
        assert_eq!(first, SpreadOutcome { burnt: 2, ignited: 2 });

        // Next tick: no trees, so the fire dies out without burning anything
        let second = spread_and_extinguish(&mut trees, &mut fires);
        assert_eq!(fires, grid(&[".."]));
        assert_eq!(second, SpreadOutcome { burnt: 0, ignited: 0 });
    }

    #[test]
    fn test_grow_with_certain_probability_fills_grid() {
        let dims = Dimensions::new(4, 7).unwrap();
        let mut trees = CellGrid::new(dims);
        let streams = RowStreams::draw(&mut master_from_seed(1));
        grow(&mut trees, Probability::ONE, streams);
        assert_eq!(trees.count(), 28);
    }

    #[test]
    fn test_ignite_only_on_trees() {
        let trees = grid(&["#.#", "...", ".#."]);
        let mut fires = CellGrid::new(trees.dimensions());
        let streams = RowStreams::draw(&mut master_from_seed(9));
        ignite(&trees, &mut fires, Probability::ONE, streams);
        assert_eq!(fires, trees);
    }

    #[test]
    fn test_impossible_rules_leave_state_alone() {
        let mut trees = grid(&["#..", ".#."]);
        let before = trees.clone();
        let mut fires = CellGrid::new(trees.dimensions());
        let streams = RowStreams::draw(&mut master_from_seed(3));
        grow(&mut trees, Probability::ZERO, streams);
        ignite(&trees, &mut fires, Probability::ZERO, streams);
        assert_eq!(trees, before);
        assert_eq!(fires.count(), 0);
    }
}
