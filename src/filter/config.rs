use serde::{Deserialize, Serialize};

use super::FilterError;
use crate::threshold::DEFAULT_FENCE_MULTIPLIER;

/// Minimum surviving replicates for a sample to be kept
pub const DEFAULT_MIN_REPLICATES: usize = 2;

/// Parameters of the run filter
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FilterConfig {
    /// IQR multiplier for the Tukey fences
    pub fence_multiplier: f64,
    /// Samples with fewer surviving records are emptied
    pub min_replicates: usize,
}

impl Default for FilterConfig {
    fn default() -> Self {
        Self {
            fence_multiplier: DEFAULT_FENCE_MULTIPLIER,
            min_replicates: DEFAULT_MIN_REPLICATES,
        }
    }
}

impl FilterConfig {
    /// Set the fence multiplier
    pub fn with_fence_multiplier(mut self, k: f64) -> Self {
        self.fence_multiplier = k;
        self
    }

    /// Set the minimum replicate count
    pub fn with_min_replicates(mut self, n: usize) -> Self {
        self.min_replicates = n;
        self
    }

    /// Check parameter ranges
    pub fn validate(&self) -> Result<(), FilterError> {
        if !self.fence_multiplier.is_finite() || self.fence_multiplier < 0.0 {
            return Err(FilterError::InvalidConfig(format!(
                "fence_multiplier must be finite and non-negative, got {}",
                self.fence_multiplier
            )));
        }
        if self.min_replicates == 0 {
            return Err(FilterError::InvalidConfig(
                "min_replicates must be at least 1".to_string(),
            ));
        }
        Ok(())
    }
}
