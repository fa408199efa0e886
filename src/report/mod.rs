//! # Filter Diagnostics
//!
//! Every filtered run yields one [`RunFilterSummary`]. Summaries are delivered
//! to a [`DiagnosticSink`], one call per run, so a sink never sees a partial
//! block. The filtering core never prints anything itself.
//!
//! ## Sinks
//!
//! - [`NullSink`]: discards summaries
//! - [`RecordingSink`]: keeps summaries in memory
//! - [`LogSink`]: forwards summaries to the `log` facade
//! - [`ConsoleSink`]: writes summaries and a text box plot to any writer

mod boxplot;
mod console;
mod summary;

pub use boxplot::render_boxplot;
pub use console::ConsoleSink;
pub use summary::RunFilterSummary;

use log::info;

/// Receiver of per-run diagnostic summaries
pub trait DiagnosticSink {
    /// Handle the summary of one run
    fn report(&mut self, summary: &RunFilterSummary);
}

impl<S: DiagnosticSink + ?Sized> DiagnosticSink for &mut S {
    fn report(&mut self, summary: &RunFilterSummary) {
        (**self).report(summary);
    }
}

/// Sink that drops every summary
#[derive(Debug, Default, Clone, Copy)]
pub struct NullSink;

impl DiagnosticSink for NullSink {
    fn report(&mut self, _summary: &RunFilterSummary) {}
}

/// Sink that stores summaries in arrival order
#[derive(Debug, Default, Clone)]
pub struct RecordingSink {
    /// Summaries received so far
    pub summaries: Vec<RunFilterSummary>,
}

impl RecordingSink {
    /// Empty recording sink
    pub fn new() -> Self {
        Self::default()
    }
}

impl DiagnosticSink for RecordingSink {
    fn report(&mut self, summary: &RunFilterSummary) {
        self.summaries.push(summary.clone());
    }
}

/// Sink that emits each summary as a single `info` log message
#[derive(Debug, Default, Clone, Copy)]
pub struct LogSink;

impl DiagnosticSink for LogSink {
    fn report(&mut self, summary: &RunFilterSummary) {
        info!(
            "Run {} ({}): removed samples: {}; pooled {} values, {} outliers, {} rejected records; fences {}",
            summary.index,
            summary.run_name,
            summary.removed_label(),
            summary.pooled_count,
            summary.outlier_count,
            summary.rejected_records,
            summary.interval
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::threshold::{estimate_acceptance_interval, BoxplotSummary};

    fn summary(removed: &[&str]) -> RunFilterSummary {
        let pooled = [1.0, 1.5, 2.0, 2.5, 100.0];
        RunFilterSummary {
            index: 3,
            run_name: "plate_3".to_string(),
            pooled_count: pooled.len(),
            outlier_count: 1,
            rejected_records: 1,
            interval: estimate_acceptance_interval(&pooled).unwrap(),
            removed_samples: removed.iter().map(|s| s.to_string()).collect(),
            boxplot: BoxplotSummary::from_values(&pooled, 1.5).unwrap(),
        }
    }

    #[test]
    fn test_summary_display_without_removals() {
        let output = format!("{}", summary(&[]));
        assert!(output.contains("Run 3 (plate_3)"));
        assert!(output.contains("Removed samples: none"));
        assert!(output.contains("Pooled values: 5, outliers: 1 (20.0%), rejected records: 1"));
    }

    #[test]
    fn test_summary_display_lists_removed_samples() {
        let output = format!("{}", summary(&["C", "D"]));
        assert!(output.contains("Removed samples: C, D"));
    }

    #[test]
    fn test_recording_sink_keeps_order() {
        let mut sink = RecordingSink::new();
        let mut first = summary(&[]);
        first.index = 0;
        sink.report(&first);
        sink.report(&summary(&["C"]));

        let indices: Vec<_> = sink.summaries.iter().map(|s| s.index).collect();
        assert_eq!(indices, vec![0, 3]);
    }

    #[test]
    fn test_sink_through_mutable_reference() {
        fn deliver<S: DiagnosticSink>(mut sink: S, summary: &RunFilterSummary) {
            sink.report(summary);
        }

        let mut sink = RecordingSink::new();
        deliver(&mut sink, &summary(&[]));
        deliver(&mut sink, &summary(&["C"]));
        assert_eq!(sink.summaries.len(), 2);
    }
}
