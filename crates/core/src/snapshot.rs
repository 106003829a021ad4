//! Serialisable forest state
//!
//! A snapshot carries the parameters, counters, and both layers. The random
//! stream is left out; [`crate::GridAutomaton::restore`] takes a
//! fresh seed instead. File handling belongs to the caller.

use crate::cells::CellGrid;
use crate::params::ForestParams;
use serde::{Deserialize, Serialize};

/// Full forest state at one tick
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ForestSnapshot {
    pub params: ForestParams,
    pub tick: u64,
    pub burnt_total: u64,
    pub trees: CellGrid,
    pub fires: CellGrid,
}

#[cfg(test)]
mod tests {
    use crate::{CellState, ForestError, ForestParams, GridAutomaton};

    #[test]
    fn test_restore_continues_from_snapshot() {
        let params = ForestParams::new(6, 6, 0.3, 0.05).with_label("ridge");
        let mut forest = GridAutomaton::with_seed(&params, 11).unwrap();
        forest.step_n(10);

        let json = serde_json::to_string(&forest.snapshot()).unwrap();
        let restored = GridAutomaton::restore(serde_json::from_str(&json).unwrap(), Some(5)).unwrap();

        assert_eq!(restored.tick(), 10);
        assert_eq!(restored.label(), "ridge");
        assert_eq!(restored.occupancy(), forest.occupancy());
        assert_eq!(restored.active(), forest.active());
        assert_eq!(restored.burnt_total(), forest.burnt_total());
    }

    #[test]
    fn test_restore_rejects_mismatched_layers() {
        let small = GridAutomaton::with_seed(&ForestParams::new(2, 2, 0.0, 0.0), 1).unwrap();
        let mut big = GridAutomaton::with_seed(&ForestParams::new(3, 3, 0.0, 0.0), 1).unwrap();
        big.set_cell(0, 0, CellState::TREE).unwrap();

        let mut snapshot = small.snapshot();
        snapshot.trees = big.occupancy().clone();

        let err = GridAutomaton::restore(snapshot, Some(1)).unwrap_err();
        assert_eq!(
            err,
            ForestError::ShapeMismatch {
                expected: (2, 2),
                found: (3, 3)
            }
        );
    }

    #[test]
    fn test_restore_rejects_out_of_range_probability() {
        let forest = GridAutomaton::with_seed(&ForestParams::new(2, 2, 0.0, 0.0), 1).unwrap();
        let mut snapshot = forest.snapshot();
        snapshot.params.ignition_probability = 2.0;
        assert!(GridAutomaton::restore(snapshot, None)
            .unwrap_err()
            .is_invalid_parameter());
    }
}
