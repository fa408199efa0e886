//! # Run Filtering
//!
//! Pools the control values of a run, estimates Tukey fences, keeps records
//! strictly inside the fences and empties samples with too few survivors.
//!
//! ## Example
//!
//! ```rust
//! use dropqc::filter::filter_run;
//! use dropqc::record::{ReplicateRecord, Run, Sample};
//! use dropqc::report::RecordingSink;
//!
//! let a = Sample::from_records("A", vec![
//!     ReplicateRecord::new(1.0),
//!     ReplicateRecord::new(2.0),
//!     ReplicateRecord::new(100.0),
//! ])?;
//! let b = Sample::from_records("B", vec![ReplicateRecord::new(1.5), ReplicateRecord::new(2.5)])?;
//! let run = Run::new("run_1", vec![a, b])?;
//!
//! let mut sink = RecordingSink::new();
//! let filtered = filter_run(&run, 0, &mut sink)?;
//!
//! assert_eq!(filtered.sample("A").map(|s| s.len()), Some(2));
//! assert_eq!(sink.summaries[0].removed_label(), "none");
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

mod batch;
mod config;
mod error;
mod run_filter;


#[cfg(feature = "parallel")]
pub use batch::filter_runs_parallel;
pub use batch::filter_runs;
pub use config::{FilterConfig, DEFAULT_MIN_REPLICATES};
pub use error::FilterError;
pub use run_filter::{filter_run, RunFilter};
