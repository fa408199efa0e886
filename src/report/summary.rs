use serde::{Deserialize, Serialize};
use std::fmt;

#[cfg(feature = "colorized_output")]
use console::style;

use crate::threshold::{AcceptanceInterval, BoxplotSummary};

/// Diagnostic block produced for one filtered run
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RunFilterSummary {
    /// Position of the run in its collection
    pub index: usize,
    /// Run name
    pub run_name: String,
    /// Number of pooled control values
    pub pooled_count: usize,
    /// Pooled values outside `[lower, upper]`
    pub outlier_count: usize,
    /// Records dropped by the strict fence test (fence values included)
    pub rejected_records: usize,
    /// Fences used for this run
    pub interval: AcceptanceInterval,
    /// Samples emptied for having too few surviving replicates
    pub removed_samples: Vec<String>,
    /// Distribution of the pooled control values
    pub boxplot: BoxplotSummary,
}

impl RunFilterSummary {
    /// Fraction of pooled values flagged as outliers, in percent
    pub fn outlier_percentage(&self) -> f64 {
        if self.pooled_count == 0 {
            return 0.0;
        }
        100.0 * self.outlier_count as f64 / self.pooled_count as f64
    }

    /// True when at least one sample was emptied
    pub fn has_removals(&self) -> bool {
        !self.removed_samples.is_empty()
    }

    /// Removed sample names joined by commas, or `none`
    pub fn removed_label(&self) -> String {
        if self.removed_samples.is_empty() {
            "none".to_string()
        } else {
            self.removed_samples.join(", ")
        }
    }

    /// Format the summary with colors (requires console feature)
    pub fn format_colored(&self) -> String {
        #[cfg(feature = "colorized_output")]
        {
            let mut output = String::new();

            output.push_str(&format!(
                "{} {} ({})\n",
                style("Run").bold().cyan(),
                style(self.index).bold().cyan(),
                self.run_name
            ));

            let removed = if self.has_removals() {
                style(self.removed_label()).red().bold()
            } else {
                style(self.removed_label()).green()
            };
            output.push_str(&format!("  {}: {}\n", style("Removed samples").bold(), removed));

            let outliers = if self.outlier_count > 0 {
                style(self.outlier_count).yellow()
            } else {
                style(self.outlier_count).green()
            };
            output.push_str(&format!(
                "  {}: {}, {}: {} ({:.1}%), {}: {}\n",
                style("Pooled values").bold(),
                self.pooled_count,
                style("outliers").bold(),
                outliers,
                self.outlier_percentage(),
                style("rejected records").bold(),
                self.rejected_records
            ));
            output.push_str(&format!(
                "  {}: {}\n",
                style("Acceptance interval").bold(),
                self.interval
            ));

            output
        }

        #[cfg(not(feature = "colorized_output"))]
        {
            format!("{}", self)
        }
    }
}

impl fmt::Display for RunFilterSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Run {} ({})", self.index, self.run_name)?;
        writeln!(f, "  Removed samples: {}", self.removed_label())?;
        writeln!(
            f,
            "  Pooled values: {}, outliers: {} ({:.1}%), rejected records: {}",
            self.pooled_count,
            self.outlier_count,
            self.outlier_percentage(),
            self.rejected_records
        )?;
        writeln!(f, "  Acceptance interval: {}", self.interval)
    }
}
