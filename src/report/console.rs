use log::warn;
use std::io::Write;

use super::{render_boxplot, DiagnosticSink, RunFilterSummary};

/// Default plot width in characters
const DEFAULT_PLOT_WIDTH: usize = 60;

/// Sink writing human-readable summaries and box plots to a writer
pub struct ConsoleSink<W: Write> {
    writer: W,
    colored: bool,
    plot_width: usize,
}

impl ConsoleSink<std::io::Stdout> {
    /// Sink writing to standard output
    pub fn stdout() -> Self {
        Self::new(std::io::stdout())
    }
}

impl<W: Write> ConsoleSink<W> {
    /// Plain-text sink over `writer`
    pub fn new(writer: W) -> Self {
        Self {
            writer,
            colored: false,
            plot_width: DEFAULT_PLOT_WIDTH,
        }
    }

    /// Enable colored output (effective with the `colorized_output` feature)
    pub fn colored(mut self, colored: bool) -> Self {
        self.colored = colored;
        self
    }

    /// Set the box plot width
    pub fn plot_width(mut self, width: usize) -> Self {
        self.plot_width = width;
        self
    }

    /// Recover the underlying writer
    pub fn into_inner(self) -> W {
        self.writer
    }

    fn render(&self, summary: &RunFilterSummary) -> String {
        let mut block = if self.colored {
            summary.format_colored()
        } else {
            summary.to_string()
        };
        for line in render_boxplot(&summary.boxplot, self.plot_width).lines() {
            block.push_str("  ");
            block.push_str(line);
            block.push('\n');
        }
        block.push('\n');
        block
    }
}

impl<W: Write> DiagnosticSink for ConsoleSink<W> {
    fn report(&mut self, summary: &RunFilterSummary) {
        // One write per run keeps blocks from interleaving
        let block = self.render(summary);
        if let Err(e) = self.writer.write_all(block.as_bytes()).and_then(|_| self.writer.flush()) {
            warn!("Failed to write diagnostics for run {}: {}", summary.index, e);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::threshold::{estimate_acceptance_interval, BoxplotSummary};

    #[test]
    fn test_console_sink_writes_summary_and_plot() {
        let pooled = [1.0, 1.5, 2.0, 2.5, 100.0];
        let summary = RunFilterSummary {
            index: 0,
            run_name: "run_a".to_string(),
            pooled_count: 5,
            outlier_count: 1,
            rejected_records: 1,
            interval: estimate_acceptance_interval(&pooled).unwrap(),
            removed_samples: vec![],
            boxplot: BoxplotSummary::from_values(&pooled, 1.5).unwrap(),
        };

        let mut sink = ConsoleSink::new(Vec::new()).plot_width(30);
        sink.report(&summary);
        let output = String::from_utf8(sink.into_inner()).unwrap();

        assert!(output.starts_with("Run 0 (run_a)"));
        assert!(output.contains("Removed samples: none"));
        assert!(output.contains('M'));
        assert!(output.contains("100.000"));
    }
}
