//! Forest configuration
//!
//! `ForestParams` is the raw, serialisable description of a forest as it
//! arrives from a caller or a JSON config file. Nothing is trusted until
//! [`ForestParams::validate`] has run.

use crate::cells::Dimensions;
use crate::error::ForestError;
use crate::units::Probability;
use serde::{Deserialize, Serialize};

/// Default label when none is supplied
pub const DEFAULT_LABEL: &str = "Forest";

/// Construction parameters for a [`crate::GridAutomaton`]
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ForestParams {
    /// Grid rows (must be positive)
    pub rows: i64,
    /// Grid columns (must be positive)
    pub columns: i64,
    /// Chance per tick that an empty cell sprouts a tree
    pub growth_probability: f64,
    /// Chance per tick that lightning ignites an occupied cell
    pub ignition_probability: f64,
    /// Optional display name
    pub label: Option<String>,
}

impl Default for ForestParams {
    /// 150x150 forest with slow regrowth and rare lightning
    fn default() -> Self {
        Self {
            rows: 150,
            columns: 150,
            growth_probability: 0.0025,
            ignition_probability: 5.0e-6,
            label: None,
        }
    }
}

/// Parameters after validation
#[derive(Debug, Clone, PartialEq)]
pub(crate) struct ValidatedParams {
    pub dimensions: Dimensions,
    pub growth: Probability,
    pub ignition: Probability,
    pub label: String,
}

impl ForestParams {
    pub fn new(rows: i64, columns: i64, growth_probability: f64, ignition_probability: f64) -> Self {
        Self {
            rows,
            columns,
            growth_probability,
            ignition_probability,
            label: None,
        }
    }

    pub fn with_label(mut self, label: impl Into<String>) -> Self {
        self.label = Some(label.into());
        self
    }

    /// Check every field without building a forest.
    ///
    /// # Errors
    /// Returns [`ForestError::InvalidParameter`] naming the first bad field:
    /// a non-positive dimension or a probability outside [0, 1].
    pub fn validate(&self) -> Result<(), ForestError> {
        self.validated().map(|_| ())
    }

    pub(crate) fn validated(&self) -> Result<ValidatedParams, ForestError> {
        let dimensions = Dimensions::new(self.rows, self.columns)?;
        let growth = Probability::new("growth_probability", self.growth_probability)?;
        let ignition = Probability::new("ignition_probability", self.ignition_probability)?;
        let label = self
            .label
            .clone()
            .unwrap_or_else(|| DEFAULT_LABEL.to_string());

        Ok(ValidatedParams {
            dimensions,
            growth,
            ignition,
            label,
        })
    }
}
