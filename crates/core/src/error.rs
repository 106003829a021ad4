//! Error types for the forest automaton
//!
//! Construction is the only place a caller can hand the automaton bad
//! values, so almost every variant here is raised before the first tick.
//! `step()` and the read-only queries never fail.

use std::fmt;

/// Errors produced while building, restoring, or injecting state into a forest.
#[derive(Debug, Clone, PartialEq)]
pub enum ForestError {
    /// A constructor argument is outside its valid range
    InvalidParameter {
        /// Parameter name (e.g. `"rows"`, `"growth_probability"`)
        name: &'static str,
        /// Human-readable constraint that was violated
        reason: String,
    },
    /// A cell coordinate lies outside the grid
    OutOfBounds {
        row: usize,
        column: usize,
        rows: usize,
        columns: usize,
    },
    /// A grid handed to the automaton has the wrong shape
    ShapeMismatch {
        /// Expected (rows, columns)
        expected: (usize, usize),
        /// Supplied (rows, columns)
        found: (usize, usize),
    },
}

impl ForestError {
    /// Shorthand for [`ForestError::InvalidParameter`].
    pub fn invalid_parameter(name: &'static str, reason: impl Into<String>) -> Self {
        ForestError::InvalidParameter {
            name,
            reason: reason.into(),
        }
    }

    /// True for the construction-time validation failure.
    pub fn is_invalid_parameter(&self) -> bool {
        matches!(self, ForestError::InvalidParameter { .. })
    }
}

impl fmt::Display for ForestError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ForestError::InvalidParameter { name, reason } => {
                write!(f, "Invalid parameter '{name}': {reason}")
            }
            ForestError::OutOfBounds {
                row,
                column,
                rows,
                columns,
            } => write!(
                f,
                "Cell ({row}, {column}) is outside the {rows}x{columns} grid"
            ),
            ForestError::ShapeMismatch { expected, found } => write!(
                f,
                "Grid shape mismatch: expected {}x{}, got {}x{}",
                expected.0, expected.1, found.0, found.1
            ),
        }
    }
}

impl std::error::Error for ForestError {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_names_parameter() {
        let err = ForestError::invalid_parameter("rows", "must be positive, got 0");
        assert_eq!(
            err.to_string(),
            "Invalid parameter 'rows': must be positive, got 0"
        );
        assert!(err.is_invalid_parameter());
    }

    #[test]
    fn test_out_of_bounds_is_not_invalid_parameter() {
        let err = ForestError::OutOfBounds {
            row: 4,
            column: 0,
            rows: 3,
            columns: 3,
        };
        assert!(!err.is_invalid_parameter());
        assert_eq!(err.to_string(), "Cell (4, 0) is outside the 3x3 grid");
    }
}
