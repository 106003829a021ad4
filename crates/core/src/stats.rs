//! Coverage statistics
//!
//! `ForestStats` is a single-tick summary; `FractionHistory` accumulates the
//! tree and fire fractions over a run so drivers can plot or export them.

use serde::{Deserialize, Serialize};

/// Coverage of the forest at one tick
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ForestStats {
    pub tick: u64,
    pub cell_count: usize,
    pub occupied_cells: usize,
    pub active_cells: usize,
    pub occupied_fraction: f64,
    pub active_fraction: f64,
    /// Trees lost to fire since construction
    pub burnt_total: u64,
}

/// Per-tick coverage series
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct FractionHistory {
    start_tick: u64,
    occupied: Vec<f64>,
    active: Vec<f64>,
}

/// Min/max/mean over a recorded series
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SeriesSummary {
    pub min: f64,
    pub max: f64,
    pub mean: f64,
}

impl FractionHistory {
    /// Empty history whose first entry will describe tick `start_tick + 1`
    pub fn starting_at(start_tick: u64) -> Self {
        Self {
            start_tick,
            ..Self::default()
        }
    }

    pub fn record(&mut self, stats: &ForestStats) {
        self.occupied.push(stats.occupied_fraction);
        self.active.push(stats.active_fraction);
    }

    pub fn len(&self) -> usize {
        self.occupied.len()
    }

    pub fn is_empty(&self) -> bool {
        self.occupied.is_empty()
    }

    /// Tick the recording started from
    pub fn start_tick(&self) -> u64 {
        self.start_tick
    }

    /// Tree fraction after each recorded tick
    pub fn occupied(&self) -> &[f64] {
        &self.occupied
    }

    /// Fire fraction after each recorded tick
    pub fn active(&self) -> &[f64] {
        &self.active
    }

    pub fn occupied_summary(&self) -> Option<SeriesSummary> {
        summarize(&self.occupied)
    }

    pub fn active_summary(&self) -> Option<SeriesSummary> {
        summarize(&self.active)
    }

    /// Append another run that continues where this one stopped.
    pub fn extend(&mut self, other: &FractionHistory) {
        if self.is_empty() {
            self.start_tick = other.start_tick;
        }
        self.occupied.extend_from_slice(&other.occupied);
        self.active.extend_from_slice(&other.active);
    }
}

fn summarize(series: &[f64]) -> Option<SeriesSummary> {
    if series.is_empty() {
        return None;
    }
    let min = series.iter().copied().fold(f64::INFINITY, f64::min);
    let max = series.iter().copied().fold(f64::NEG_INFINITY, f64::max);
    let mean = series.iter().sum::<f64>() / series.len() as f64;
    Some(SeriesSummary { min, max, mean })
}
