//! Validated scalar types
//!
//! Probabilities enter the automaton as raw `f64` values from callers, config
//! files and the C ABI. They are checked once here and carried as
//! [`Probability`] afterwards so the per-tick code never re-validates.

use crate::error::ForestError;
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::fmt;
use std::ops::Deref;

/// A per-cell, per-tick probability in the closed range [0, 1]
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(try_from = "f64", into = "f64")]
#[repr(transparent)]
pub struct Probability(f64);

impl Eq for Probability {}

impl PartialOrd for Probability {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Probability {
    fn cmp(&self, other: &Self) -> Ordering {
        self.0.total_cmp(&other.0)
    }
}

impl Deref for Probability {
    type Target = f64;
    #[inline]
    fn deref(&self) -> &f64 {
        &self.0
    }
}

impl Probability {
    /// Never happens
    pub const ZERO: Probability = Probability(0.0);

    /// Always happens
    pub const ONE: Probability = Probability(1.0);

    /// Validate `value` as the probability parameter `name`.
    ///
    /// # Errors
    /// Returns [`ForestError::InvalidParameter`] if `value` is NaN or outside [0, 1].
    pub fn new(name: &'static str, value: f64) -> Result<Self, ForestError> {
        if (0.0..=1.0).contains(&value) {
            Ok(Probability(value))
        } else {
            Err(ForestError::invalid_parameter(
                name,
                format!("must be within [0, 1], got {value}"),
            ))
        }
    }

    /// Get the raw f64 value
    #[inline]
    pub fn value(self) -> f64 {
        self.0
    }

    /// A draw from [0, 1) can never fall below zero, so the sub-rule is skipped.
    #[inline]
    pub(crate) fn is_impossible(self) -> bool {
        self.0 <= 0.0
    }

    /// Whether a uniform draw from [0, 1) succeeds against this probability.
    #[inline]
    pub(crate) fn hits(self, draw: f64) -> bool {
        draw < self.0
    }
}

impl fmt::Display for Probability {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl TryFrom<f64> for Probability {
    type Error = ForestError;

    fn try_from(value: f64) -> Result<Self, Self::Error> {
        Probability::new("probability", value)
    }
}

impl From<Probability> for f64 {
    fn from(p: Probability) -> Self {
        p.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bounds_are_inclusive() {
        assert_eq!(Probability::new("p", 0.0).unwrap(), Probability::ZERO);
        assert_eq!(Probability::new("p", 1.0).unwrap(), Probability::ONE);
        assert_eq!(*Probability::new("p", 0.25).unwrap(), 0.25);
    }

    #[test]
    fn test_rejects_out_of_range_and_nan() {
        for bad in [-0.1, 1.1, f64::NAN, f64::INFINITY, f64::NEG_INFINITY] {
            let err = Probability::new("growth_probability", bad).unwrap_err();
            assert!(err.is_invalid_parameter(), "{bad} should be rejected");
        }
    }

    #[test]
    fn test_certain_probability_always_hits() {
        // Largest f64 below 1.0 is still a valid uniform draw
        let just_below_one = 1.0 - f64::EPSILON / 2.0;
        assert!(Probability::ONE.hits(just_below_one));
        assert!(Probability::ONE.hits(0.0));
        assert!(!Probability::ZERO.hits(0.0));
        assert!(Probability::ZERO.is_impossible());
    }
}
