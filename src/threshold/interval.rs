use log::warn;
use serde::{Deserialize, Serialize};
use std::fmt;

use super::quantile::{quantile_type7, sorted_copy};

/// Tukey fence multiplier
pub const DEFAULT_FENCE_MULTIPLIER: f64 = 1.5;

/// Pool size below which quartiles are poorly defined
const MIN_MEANINGFUL_POOL: usize = 4;

/// Acceptance interval derived from the quartiles of a pooled sample
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct AcceptanceInterval {
    /// First quartile
    pub q1: f64,
    /// Third quartile
    pub q3: f64,
    /// Lower fence, `q1 - k * iqr`
    pub lower: f64,
    /// Upper fence, `q3 + k * iqr`
    pub upper: f64,
}

impl AcceptanceInterval {
    /// Interquartile range
    pub fn iqr(&self) -> f64 {
        self.q3 - self.q1
    }

    /// Width of the acceptance interval
    pub fn width(&self) -> f64 {
        self.upper - self.lower
    }

    /// `lower < value < upper`; values on a fence are rejected
    pub fn contains_strict(&self, value: f64) -> bool {
        self.lower < value && value < self.upper
    }

    /// `value` lies outside the closed interval `[lower, upper]`
    pub fn is_outlier(&self, value: f64) -> bool {
        value < self.lower || value > self.upper
    }
}

impl fmt::Display for AcceptanceInterval {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "[{:.4}, {:.4}] (Q1 {:.4}, Q3 {:.4}, IQR {:.4})",
            self.lower,
            self.upper,
            self.q1,
            self.q3,
            self.iqr()
        )
    }
}

/// Tukey fence with the default multiplier of 1.5
///
/// Returns `None` when `values` is empty. The result depends only on the
/// multiset of values, not their order. Values are expected to be finite:
/// NaN sorts above every number and turns any quartile it touches, and so
/// the fences, into NaN.
pub fn estimate_acceptance_interval(values: &[f64]) -> Option<AcceptanceInterval> {
    estimate_acceptance_interval_with(values, DEFAULT_FENCE_MULTIPLIER)
}

/// Tukey fence with a custom multiplier `k`
pub fn estimate_acceptance_interval_with(values: &[f64], k: f64) -> Option<AcceptanceInterval> {
    if values.is_empty() {
        return None;
    }
    if values.len() < MIN_MEANINGFUL_POOL {
        warn!(
            "Estimating quartiles from only {} control values; fences are degenerate",
            values.len()
        );
    }

    let sorted = sorted_copy(values);
    let q1 = quantile_type7(&sorted, 0.25)?;
    let q3 = quantile_type7(&sorted, 0.75)?;
    let iqr = q3 - q1;

    Some(AcceptanceInterval {
        q1,
        q3,
        lower: q1 - k * iqr,
        upper: q3 + k * iqr,
    })
}
