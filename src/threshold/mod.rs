//! # Threshold Estimation
//!
//! Robust acceptance intervals for pooled control-channel values.
//!
//! The interval is the classical Tukey fence `[Q1 - k*IQR, Q3 + k*IQR]` with
//! `k = 1.5` by default. Quartiles always use the type-7 (linear interpolation)
//! quantile definition so fence positions do not depend on a library default.
//!
//! ```rust
//! use dropqc::threshold::estimate_acceptance_interval;
//!
//! let interval = estimate_acceptance_interval(&[1.0, 1.5, 2.0, 2.5, 100.0]).unwrap();
//! assert_eq!((interval.lower, interval.upper), (0.0, 4.0));
//! assert!(!interval.contains_strict(100.0));
//! ```

mod boxplot;
mod interval;
mod quantile;

pub use boxplot::BoxplotSummary;
pub use interval::{
    estimate_acceptance_interval, estimate_acceptance_interval_with, AcceptanceInterval,
    DEFAULT_FENCE_MULTIPLIER,
};
pub use quantile::{quantile_type7, sorted_copy};
