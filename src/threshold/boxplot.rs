use serde::{Deserialize, Serialize};

use super::quantile::{quantile_type7, sorted_copy};

/// Five-number summary plus whiskers and outliers of a pooled sample
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BoxplotSummary {
    /// Number of values summarized
    pub count: usize,
    /// Smallest value
    pub min: f64,
    /// First quartile
    pub q1: f64,
    /// Median
    pub median: f64,
    /// Third quartile
    pub q3: f64,
    /// Largest value
    pub max: f64,
    /// Smallest value not below the lower fence
    pub whisker_low: f64,
    /// Largest value not above the upper fence
    pub whisker_high: f64,
    /// Values outside the fences, ascending
    pub outliers: Vec<f64>,
}

impl BoxplotSummary {
    /// Summarize `values` using fences at `k` times the IQR
    pub fn from_values(values: &[f64], k: f64) -> Option<Self> {
        let sorted = sorted_copy(values);
        let min = *sorted.first()?;
        let max = *sorted.last()?;
        let q1 = quantile_type7(&sorted, 0.25)?;
        let median = quantile_type7(&sorted, 0.5)?;
        let q3 = quantile_type7(&sorted, 0.75)?;

        let iqr = q3 - q1;
        let (lower, upper) = (q1 - k * iqr, q3 + k * iqr);

        let inside = || sorted.iter().copied().filter(|v| *v >= lower && *v <= upper);
        // Q1 and Q3 always lie inside the fences
        let whisker_low = inside().next().unwrap_or(q1);
        let whisker_high = inside().last().unwrap_or(q3);
        let outliers = sorted
            .iter()
            .copied()
            .filter(|v| *v < lower || *v > upper)
            .collect();

        Some(Self {
            count: sorted.len(),
            min,
            q1,
            median,
            q3,
            max,
            whisker_low,
            whisker_high,
            outliers,
        })
    }
}
