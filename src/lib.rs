//! # dropqc - Control-Channel Outlier Rejection for Droplet Replicates
//!
//! `dropqc` removes physically anomalous droplets from grouped replicate
//! measurements. Each run pools the control-dye (`orange`) intensities of all
//! its replicates, derives Tukey fences from the pooled quartiles, drops the
//! replicates outside the fences and empties samples left with too few
//! replicates to be usable.
//!
//! ## Key Features
//!
//! - **Pinned Quartiles**: Type-7 linear interpolation, independent of any
//!   library default.
//! - **Shape Preservation**: Emptied samples keep their name, position and
//!   column layout, so downstream tables never lose a key.
//! - **Pure Core**: Filtering returns new values; diagnostics go through an
//!   injected [`report::DiagnosticSink`].
//! - **Batch Processing**: Runs are independent and can be filtered in
//!   parallel (`parallel` feature) with ordered, non-interleaved diagnostics.
//!
//! ## Quick Start
//!
//! ```rust
//! use dropqc::filter::{filter_runs, FilterConfig};
//! use dropqc::record::{ReplicateRecord, Run, RunCollection, Sample};
//! use dropqc::report::RecordingSink;
//!
//! let a = Sample::from_records("A", vec![
//!     ReplicateRecord::new(1.0).with_field("green", 310.0),
//!     ReplicateRecord::new(2.0).with_field("green", 295.0),
//!     ReplicateRecord::new(100.0).with_field("green", 12.0),
//! ])?;
//! let b = Sample::from_records("B", vec![
//!     ReplicateRecord::new(1.5).with_field("green", 120.0),
//!     ReplicateRecord::new(2.5).with_field("green", 131.0),
//! ])?;
//! let runs = RunCollection::new(vec![Run::new("plate_1", vec![a, b])?]);
//!
//! let mut sink = RecordingSink::new();
//! let filtered = filter_runs(&runs, &FilterConfig::default(), &mut sink)?;
//!
//! assert_eq!(filtered.runs()[0].sample("A").map(|s| s.len()), Some(2));
//! println!("{}", sink.summaries[0]);
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```
//!
//! ## Architecture
//!
//! - [`record`]: Replicate records, samples, runs and their schema contract
//! - [`threshold`]: Type-7 quantiles, Tukey fences and box-plot summaries
//! - [`filter`]: Per-run filtering and the batch driver
//! - [`report`]: Diagnostic summaries and sinks
//! - [`ingest`]: Long-format CSV input, CSV/JSON output
//!
//! ## Filtering Rules
//!
//! | Step | Rule |
//! |------|------|
//! | Pool | All control values of all samples of the run |
//! | Fences | `Q1 - 1.5 * IQR`, `Q3 + 1.5 * IQR` |
//! | Keep record | `lower < orange < upper` (strict) |
//! | Empty sample | fewer than 2 records survive |

// Documentation lints - enforce complete documentation for publication
#![deny(missing_docs)]
#![deny(rustdoc::missing_crate_level_docs)]

pub mod filter;
pub mod ingest;
pub mod record;
pub mod report;
pub mod threshold;

/// Re-export commonly used types for convenience
pub mod prelude {
    pub use crate::filter::{filter_run, filter_runs, FilterConfig, FilterError, RunFilter};
    #[cfg(feature = "parallel")]
    pub use crate::filter::filter_runs_parallel;
    pub use crate::ingest::{
        read_csv, read_csv_from_reader, read_json, write_csv, write_json, IngestConfig,
        IngestError,
    };
    pub use crate::record::{
        FieldKind, FieldSpec, FieldValue, ReplicateRecord, Run, RunCollection, Sample, Schema,
        SchemaError,
    };
    pub use crate::report::{
        ConsoleSink, DiagnosticSink, LogSink, NullSink, RecordingSink, RunFilterSummary,
    };
    pub use crate::threshold::{
        estimate_acceptance_interval, estimate_acceptance_interval_with, AcceptanceInterval,
        BoxplotSummary,
    };
}
