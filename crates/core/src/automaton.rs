//! Forest-fire grid automaton
//!
//! A forest is two boolean layers of the same shape: trees and fires. Each
//! call to [`GridAutomaton::step`] advances one tick by running, in order:
//!
//! 1. **Growth** - empty cells sprout a tree with `growth_probability`
//! 2. **Ignition** - lightning sets occupied cells alight with `ignition_probability`
//! 3. **Spread and extinguish** - occupied cells next to a fire (N/S/E/W,
//!    no wraparound) catch, then every cell that was burning loses its tree
//!
//! Later rules see the results of earlier ones within the same tick.

use crate::cells::{CellGrid, CellState, Dimensions};
use crate::error::ForestError;
use crate::params::ForestParams;
use crate::rng::{master_from_os, master_from_seed, RowStreams};
use crate::rules::{self, SpreadOutcome};
use crate::snapshot::ForestSnapshot;
use crate::stats::{ForestStats, FractionHistory};
use crate::units::Probability;
use rand::rngs::StdRng;
use tracing::{debug, info, trace};

/// Forest-fire cellular automaton
///
/// Owns both layers exclusively. `step()` is the only transition; the
/// `set_cell`/`inject` methods exist for tests and interactive drivers that
/// need to place trees or fires by hand.
#[derive(Debug, Clone)]
pub struct GridAutomaton {
    dimensions: Dimensions,
    trees: CellGrid,
    fires: CellGrid,
    growth: Probability,
    ignition: Probability,
    label: String,

    /// Completed ticks
    tick: u64,
    /// Trees lost to fire since construction
    burnt_total: u64,

    rng: StdRng,
}

impl GridAutomaton {
    /// Create an empty forest seeded from the operating system.
    ///
    /// # Errors
    /// Returns [`ForestError::InvalidParameter`] if either probability is
    /// outside [0, 1] or either dimension is not positive.
    pub fn new(
        rows: i64,
        columns: i64,
        growth_probability: f64,
        ignition_probability: f64,
    ) -> Result<Self, ForestError> {
        Self::from_params(&ForestParams::new(
            rows,
            columns,
            growth_probability,
            ignition_probability,
        ))
    }

    /// Create an empty forest from a parameter set, seeded from the operating system.
    ///
    /// # Errors
    /// Returns [`ForestError::InvalidParameter`] if `params` fails validation.
    pub fn from_params(params: &ForestParams) -> Result<Self, ForestError> {
        Self::build(params, master_from_os(), None)
    }

    /// Create an empty forest whose random draws are fully determined by `seed`.
    ///
    /// # Errors
    /// Returns [`ForestError::InvalidParameter`] if `params` fails validation.
    pub fn with_seed(params: &ForestParams, seed: u64) -> Result<Self, ForestError> {
        Self::build(params, master_from_seed(seed), Some(seed))
    }

    fn build(params: &ForestParams, rng: StdRng, seed: Option<u64>) -> Result<Self, ForestError> {
        let v = params.validated()?;

        info!(
            "Creating forest '{}': {}x{} grid, growth={}, ignition={}, seed={:?}",
            v.label,
            v.dimensions.rows(),
            v.dimensions.columns(),
            v.growth,
            v.ignition,
            seed
        );

        Ok(Self {
            dimensions: v.dimensions,
            trees: CellGrid::new(v.dimensions),
            fires: CellGrid::new(v.dimensions),
            growth: v.growth,
            ignition: v.ignition,
            label: v.label,
            tick: 0,
            burnt_total: 0,
            rng,
        })
    }

    /// Rebuild a forest from a snapshot, continuing with a new random stream.
    ///
    /// # Errors
    /// Returns [`ForestError::InvalidParameter`] if the stored parameters are
    /// invalid and [`ForestError::ShapeMismatch`] if either stored layer does
    /// not match the stored dimensions.
    pub fn restore(snapshot: ForestSnapshot, seed: Option<u64>) -> Result<Self, ForestError> {
        let rng = seed.map_or_else(master_from_os, master_from_seed);
        let mut forest = Self::build(&snapshot.params, rng, seed)?;

        snapshot.trees.ensure_shape(forest.dimensions)?;
        snapshot.fires.ensure_shape(forest.dimensions)?;
        forest.trees = snapshot.trees;
        forest.fires = snapshot.fires;
        forest.tick = snapshot.tick;
        forest.burnt_total = snapshot.burnt_total;

        info!(
            "Restored forest '{}' at tick {} ({} trees, {} fires)",
            forest.label,
            forest.tick,
            forest.occupied_count(),
            forest.active_count()
        );
        Ok(forest)
    }

    /// Advance the forest by exactly one tick.
    pub fn step(&mut self) -> SpreadOutcome {
        let growth_streams = RowStreams::draw(&mut self.rng);
        rules::grow(&mut self.trees, self.growth, growth_streams);
        trace!("tick {}: growth done, {} trees", self.tick, self.trees.count());

        let lightning_streams = RowStreams::draw(&mut self.rng);
        rules::ignite(&self.trees, &mut self.fires, self.ignition, lightning_streams);
        trace!("tick {}: ignition done, {} fires", self.tick, self.fires.count());

        let outcome = rules::spread_and_extinguish(&mut self.trees, &mut self.fires);

        self.tick += 1;
        self.burnt_total += outcome.burnt as u64;

        debug!(
            "Forest '{}' tick {}: burnt={}, burning={}, trees={}",
            self.label,
            self.tick,
            outcome.burnt,
            outcome.ignited,
            self.trees.count()
        );
        outcome
    }

    /// Advance `ticks` ticks.
    pub fn step_n(&mut self, ticks: u64) {
        for _ in 0..ticks {
            self.step();
        }
    }

    /// Advance `ticks` ticks, recording coverage after each one.
    pub fn run_recording(&mut self, ticks: u64) -> FractionHistory {
        let mut history = FractionHistory::starting_at(self.tick);
        for _ in 0..ticks {
            self.step();
            history.record(&self.stats());
        }
        history
    }

    // ====== Queries ======

    pub fn dimensions(&self) -> Dimensions {
        self.dimensions
    }

    /// Total number of cells (rows × columns)
    pub fn cell_count(&self) -> usize {
        self.dimensions.cell_count()
    }

    pub fn occupied_count(&self) -> usize {
        self.trees.count()
    }

    pub fn active_count(&self) -> usize {
        self.fires.count()
    }

    /// Share of cells holding a tree, in [0, 1]
    pub fn occupied_fraction(&self) -> f64 {
        fraction(self.occupied_count(), self.cell_count())
    }

    /// Share of cells on fire, in [0, 1]
    pub fn active_fraction(&self) -> f64 {
        fraction(self.active_count(), self.cell_count())
    }

    /// Tree layer as of the last completed tick
    pub fn occupancy(&self) -> &CellGrid {
        &self.trees
    }

    /// Fire layer as of the last completed tick
    pub fn active(&self) -> &CellGrid {
        &self.fires
    }

    /// Both bits of one cell, `None` when off-grid
    pub fn cell(&self, row: usize, column: usize) -> Option<CellState> {
        Some(CellState {
            occupied: self.trees.get(row, column)?,
            active: self.fires.get(row, column)?,
        })
    }

    pub fn label(&self) -> &str {
        &self.label
    }

    pub fn growth_probability(&self) -> Probability {
        self.growth
    }

    pub fn ignition_probability(&self) -> Probability {
        self.ignition
    }

    /// Completed ticks since construction (or the restored snapshot's tick)
    pub fn tick(&self) -> u64 {
        self.tick
    }

    /// Trees lost to fire over the forest's lifetime
    pub fn burnt_total(&self) -> u64 {
        self.burnt_total
    }

    /// Summary of the current tick
    pub fn stats(&self) -> ForestStats {
        ForestStats {
            tick: self.tick,
            cell_count: self.cell_count(),
            occupied_cells: self.occupied_count(),
            active_cells: self.active_count(),
            occupied_fraction: self.occupied_fraction(),
            active_fraction: self.active_fraction(),
            burnt_total: self.burnt_total,
        }
    }

    /// Parameters this forest was built with
    pub fn params(&self) -> ForestParams {
        ForestParams {
            rows: self.dimensions.rows() as i64,
            columns: self.dimensions.columns() as i64,
            growth_probability: self.growth.value(),
            ignition_probability: self.ignition.value(),
            label: Some(self.label.clone()),
        }
    }

    /// Serialisable copy of the full state (the random stream is not included).
    pub fn snapshot(&self) -> ForestSnapshot {
        ForestSnapshot {
            params: self.params(),
            tick: self.tick,
            burnt_total: self.burnt_total,
            trees: self.trees.clone(),
            fires: self.fires.clone(),
        }
    }

    // ====== State injection ======

    /// Overwrite a single cell.
    ///
    /// # Errors
    /// Returns [`ForestError::OutOfBounds`] if the coordinate is off-grid.
    pub fn set_cell(&mut self, row: usize, column: usize, state: CellState) -> Result<(), ForestError> {
        self.trees.set(row, column, state.occupied)?;
        self.fires.set(row, column, state.active)
    }

    /// Replace both layers wholesale.
    ///
    /// # Errors
    /// Returns [`ForestError::ShapeMismatch`] if either layer's shape differs
    /// from the forest's dimensions. Nothing is changed on error.
    pub fn inject(&mut self, trees: CellGrid, fires: CellGrid) -> Result<(), ForestError> {
        trees.ensure_shape(self.dimensions)?;
        fires.ensure_shape(self.dimensions)?;
        self.trees = trees;
        self.fires = fires;
        Ok(())
    }

    /// Remove every tree and fire, keeping parameters, tick counter, and random stream.
    pub fn clear(&mut self) {
        self.trees = CellGrid::new(self.dimensions);
        self.fires = CellGrid::new(self.dimensions);
    }
}

fn fraction(count: usize, total: usize) -> f64 {
    if total == 0 {
        0.0
    } else {
        count as f64 / total as f64
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn seeded(rows: i64, columns: i64, growth: f64, ignition: f64) -> GridAutomaton {
        GridAutomaton::with_seed(&ForestParams::new(rows, columns, growth, ignition), 1234).unwrap()
    }

    #[test]
    fn test_new_forest_is_empty() {
        let forest = GridAutomaton::new(12, 8, 0.3, 0.01).unwrap();
        assert_eq!(forest.cell_count(), 96);
        assert_eq!(forest.occupied_fraction(), 0.0);
        assert_eq!(forest.active_fraction(), 0.0);
        assert_eq!(forest.tick(), 0);
        assert_eq!(forest.label(), "Forest");
    }

    #[test]
    fn test_step_counts_ticks_and_burnt_trees() {
        let mut forest = seeded(3, 3, 0.0, 0.0);
        forest.set_cell(1, 1, CellState::BURNING).unwrap();
        forest.set_cell(0, 1, CellState::TREE).unwrap();

        let outcome = forest.step();

        assert_eq!(outcome, SpreadOutcome { burnt: 1, ignited: 1 });
        assert_eq!(forest.tick(), 1);
        assert_eq!(forest.burnt_total(), 1);
        assert_eq!(forest.cell(1, 1), Some(CellState::EMPTY));
        assert_eq!(forest.cell(0, 1), Some(CellState::BURNING));
    }

    #[test]
    fn test_lingering_fire_is_not_counted_twice() {
        let mut forest = seeded(1, 2, 0.0, 0.0);
        forest.set_cell(0, 0, CellState::BURNING).unwrap();
        forest.set_cell(0, 1, CellState::BURNING).unwrap();

        forest.step();
        forest.step();

        assert_eq!(forest.burnt_total(), 2);
        assert_eq!(forest.occupied_count(), 0);
        assert_eq!(forest.active_count(), 0);
    }

    #[test]
    fn test_growth_fraction_tracks_probability() {
        let mut forest = seeded(200, 200, 0.25, 0.0);
        forest.step();
        // 40k Bernoulli(0.25) draws: std-dev ~0.002
        assert_relative_eq!(forest.occupied_fraction(), 0.25, epsilon = 0.02);
    }

    #[test]
    fn test_run_recording_records_each_tick() {
        let mut forest = seeded(20, 20, 1.0, 0.0);
        let history = forest.run_recording(5);
        assert_eq!(history.len(), 5);
        assert_eq!(history.start_tick(), 0);
        assert!(history.occupied().iter().all(|&f| f == 1.0));
        assert_eq!(forest.tick(), 5);
    }

    #[test]
    fn test_split_recordings_join_into_one_history() {
        let mut whole = seeded(16, 16, 0.1, 0.01);
        let mut split = seeded(16, 16, 0.1, 0.01);

        let expected = whole.run_recording(30);
        let mut joined = FractionHistory::default();
        for _ in 0..3 {
            joined.extend(&split.run_recording(10));
        }

        assert_eq!(joined, expected);
        assert_eq!(joined.start_tick(), 0);
    }

    #[test]
    fn test_inject_rejects_wrong_shape_without_changing_state() {
        let mut forest = seeded(2, 2, 0.0, 0.0);
        let wrong = CellGrid::filled(Dimensions::new(3, 2).unwrap(), true);
        let right = CellGrid::filled(Dimensions::new(2, 2).unwrap(), false);
        assert!(matches!(
            forest.inject(wrong, right),
            Err(ForestError::ShapeMismatch { .. })
        ));
        assert_eq!(forest.occupied_count(), 0);
    }

    #[test]
    fn test_set_cell_out_of_bounds() {
        let mut forest = seeded(2, 2, 0.0, 0.0);
        assert_eq!(
            forest.set_cell(2, 0, CellState::TREE),
            Err(ForestError::OutOfBounds {
                row: 2,
                column: 0,
                rows: 2,
                columns: 2
            })
        );
    }

    #[test]
    fn test_clear_keeps_tick() {
        let mut forest = seeded(4, 4, 1.0, 0.0);
        forest.step();
        forest.clear();
        assert_eq!(forest.occupied_count(), 0);
        assert_eq!(forest.tick(), 1);
    }
}
