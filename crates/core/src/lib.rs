//! Forest-Fire Automaton Core Library
//!
//! A cellular-automaton model of a forest: trees grow on empty ground,
//! lightning ignites standing trees, and fire spreads to orthogonal
//! neighbours before burning its own cell down.
//!
//! ## Usage
//!
//! ```
//! use forest_fire_core::{ForestParams, GridAutomaton};
//!
//! let params = ForestParams::new(50, 50, 0.01, 1.0e-4);
//! let mut forest = GridAutomaton::with_seed(&params, 42).unwrap();
//! let history = forest.run_recording(200);
//!
//! assert_eq!(history.len(), 200);
//! assert!(forest.occupied_fraction() <= 1.0);
//! ```
//!
//! The per-cell work inside each sub-rule runs on rayon; seeded forests
//! produce the same result regardless of thread count.

pub mod automaton;
pub mod cells;
pub mod error;
pub mod params;
pub mod render;
mod rng;
pub mod rules;
pub mod snapshot;
pub mod stats;
pub mod units;

pub use automaton::GridAutomaton;
pub use cells::{CellGrid, CellState, Dimensions};
pub use error::ForestError;
pub use params::{ForestParams, DEFAULT_LABEL};
pub use rules::SpreadOutcome;
pub use snapshot::ForestSnapshot;
pub use stats::{ForestStats, FractionHistory, SeriesSummary};
pub use units::Probability;
