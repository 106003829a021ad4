//! Grid storage for the forest
//!
//! Each layer (trees, fires) is a flat row-major `Vec<bool>` rather than a
//! `Vec<Vec<bool>>` so a whole row can be handed to a rayon worker as one
//! contiguous slice.

use crate::error::ForestError;
use serde::{Deserialize, Serialize};

/// Grid extent in cells, fixed when the forest is built
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Dimensions {
    rows: usize,
    columns: usize,
}

impl Dimensions {
    /// Validate signed extents coming from callers, config files, or the C ABI.
    ///
    /// # Errors
    /// Returns [`ForestError::InvalidParameter`] if either extent is zero or
    /// negative, or if `rows * columns` overflows `usize`.
    pub fn new(rows: i64, columns: i64) -> Result<Self, ForestError> {
        let rows = positive_extent("rows", rows)?;
        let columns = positive_extent("columns", columns)?;
        if rows.checked_mul(columns).is_none() {
            return Err(ForestError::invalid_parameter(
                "rows",
                format!("{rows}x{columns} grid exceeds addressable size"),
            ));
        }
        Ok(Self { rows, columns })
    }

    pub fn rows(self) -> usize {
        self.rows
    }

    pub fn columns(self) -> usize {
        self.columns
    }

    /// Total number of cells (rows × columns)
    pub fn cell_count(self) -> usize {
        self.rows * self.columns
    }

    /// Row-major index, or `None` when the coordinate is off-grid.
    #[inline]
    pub fn index(self, row: usize, column: usize) -> Option<usize> {
        if row < self.rows && column < self.columns {
            Some(row * self.columns + column)
        } else {
            None
        }
    }

    pub(crate) fn out_of_bounds(self, row: usize, column: usize) -> ForestError {
        ForestError::OutOfBounds {
            row,
            column,
            rows: self.rows,
            columns: self.columns,
        }
    }
}

fn positive_extent(name: &'static str, value: i64) -> Result<usize, ForestError> {
    if value <= 0 {
        return Err(ForestError::invalid_parameter(
            name,
            format!("must be positive, got {value}"),
        ));
    }
    usize::try_from(value).map_err(|_| {
        ForestError::invalid_parameter(name, format!("{value} exceeds addressable size"))
    })
}

/// One boolean layer of the forest (tree presence or fire)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CellGrid {
    dimensions: Dimensions,
    cells: Vec<bool>,
}

impl CellGrid {
    /// All-false grid
    pub fn new(dimensions: Dimensions) -> Self {
        Self::filled(dimensions, false)
    }

    pub fn filled(dimensions: Dimensions, value: bool) -> Self {
        Self {
            dimensions,
            cells: vec![value; dimensions.cell_count()],
        }
    }

    /// Build a grid from nested rows.
    ///
    /// # Errors
    /// Returns [`ForestError::InvalidParameter`] for an empty input and
    /// [`ForestError::ShapeMismatch`] when rows are ragged.
    pub fn from_rows(rows: &[Vec<bool>]) -> Result<Self, ForestError> {
        let columns = rows.first().map_or(0, Vec::len);
        let dimensions = Dimensions::new(rows.len() as i64, columns as i64)?;
        if let Some(ragged) = rows.iter().find(|r| r.len() != columns) {
            return Err(ForestError::ShapeMismatch {
                expected: (dimensions.rows, columns),
                found: (dimensions.rows, ragged.len()),
            });
        }
        Ok(Self {
            dimensions,
            cells: rows.concat(),
        })
    }

    pub fn dimensions(&self) -> Dimensions {
        self.dimensions
    }

    pub fn rows(&self) -> usize {
        self.dimensions.rows
    }

    pub fn columns(&self) -> usize {
        self.dimensions.columns
    }

    /// `None` when off-grid
    pub fn get(&self, row: usize, column: usize) -> Option<bool> {
        self.dimensions.index(row, column).map(|idx| self.cells[idx])
    }

    /// Number of `true` cells
    pub fn count(&self) -> usize {
        self.cells.iter().filter(|&&c| c).count()
    }

    /// Row-major view of every cell
    pub fn as_slice(&self) -> &[bool] {
        &self.cells
    }

    /// Iterate rows as slices, top to bottom.
    pub fn iter_rows(&self) -> impl Iterator<Item = &[bool]> + '_ {
        self.cells.chunks(self.dimensions.columns)
    }

    pub(crate) fn as_mut_slice(&mut self) -> &mut [bool] {
        &mut self.cells
    }

    pub(crate) fn set(&mut self, row: usize, column: usize, value: bool) -> Result<(), ForestError> {
        let idx = self
            .dimensions
            .index(row, column)
            .ok_or_else(|| self.dimensions.out_of_bounds(row, column))?;
        self.cells[idx] = value;
        Ok(())
    }

    /// Swap in a freshly computed layer of the same shape.
    pub(crate) fn replace_cells(&mut self, cells: Vec<bool>) {
        debug_assert_eq!(cells.len(), self.cells.len());
        self.cells = cells;
    }

    /// Reject a grid whose stored shape disagrees with its own cell count,
    /// which can only come from hand-edited serialized data.
    pub(crate) fn ensure_shape(&self, expected: Dimensions) -> Result<(), ForestError> {
        if self.dimensions != expected || self.cells.len() != expected.cell_count() {
            return Err(ForestError::ShapeMismatch {
                expected: (expected.rows, expected.columns),
                found: (self.dimensions.rows, self.dimensions.columns),
            });
        }
        Ok(())
    }
}

/// The two persisted bits of a single cell
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct CellState {
    /// A tree stands here
    pub occupied: bool,
    /// The cell is on fire
    pub active: bool,
}

impl CellState {
    pub const EMPTY: CellState = CellState {
        occupied: false,
        active: false,
    };

    pub const TREE: CellState = CellState {
        occupied: true,
        active: false,
    };

    pub const BURNING: CellState = CellState {
        occupied: true,
        active: true,
    };
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_dimensions_reject_non_positive() {
        assert!(Dimensions::new(0, 5).unwrap_err().is_invalid_parameter());
        assert!(Dimensions::new(5, -5).unwrap_err().is_invalid_parameter());
        assert!(Dimensions::new(i64::MAX, i64::MAX)
            .unwrap_err()
            .is_invalid_parameter());
        let dims = Dimensions::new(3, 4).unwrap();
        assert_eq!(dims.cell_count(), 12);
    }

    #[test]
    fn test_index_is_row_major() {
        let dims = Dimensions::new(3, 4).unwrap();
        assert_eq!(dims.index(0, 0), Some(0));
        assert_eq!(dims.index(1, 0), Some(4));
        assert_eq!(dims.index(2, 3), Some(11));
        assert_eq!(dims.index(3, 0), None);
        assert_eq!(dims.index(0, 4), None);
    }

    #[test]
    fn test_from_rows_rejects_ragged_input() {
        let err = CellGrid::from_rows(&[vec![true, false], vec![true]]).unwrap_err();
        assert_eq!(
            err,
            ForestError::ShapeMismatch {
                expected: (2, 2),
                found: (2, 1)
            }
        );
        assert!(CellGrid::from_rows(&[]).unwrap_err().is_invalid_parameter());
    }

    #[test]
    fn test_set_get_and_count() {
        let mut grid = CellGrid::new(Dimensions::new(2, 3).unwrap());
        grid.set(1, 2, true).unwrap();
        grid.set(0, 0, true).unwrap();
        assert_eq!(grid.get(1, 2), Some(true));
        assert_eq!(grid.get(1, 1), Some(false));
        assert_eq!(grid.count(), 2);
        assert!(grid.set(2, 0, true).is_err());

        let rows: Vec<&[bool]> = grid.iter_rows().collect();
        assert_eq!(rows, vec![&[true, false, false][..], &[false, false, true][..]]);
    }
}
