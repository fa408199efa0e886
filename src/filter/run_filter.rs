use log::debug;

use super::{FilterConfig, FilterError};
use crate::record::Run;
use crate::report::{DiagnosticSink, RunFilterSummary};
use crate::threshold::{estimate_acceptance_interval_with, BoxplotSummary};

/// Control-channel outlier filter for a single run
#[derive(Debug, Clone, Default)]
pub struct RunFilter {
    config: FilterConfig,
}

impl RunFilter {
    /// Create a filter after validating `config`
    pub fn new(config: FilterConfig) -> Result<Self, FilterError> {
        config.validate()?;
        Ok(Self { config })
    }

    /// Active configuration
    pub fn config(&self) -> &FilterConfig {
        &self.config
    }

    /// Filter `run` and hand its summary to `sink`
    pub fn filter(
        &self,
        run: &Run,
        index: usize,
        sink: &mut dyn DiagnosticSink,
    ) -> Result<Run, FilterError> {
        let (filtered, summary) = self.filter_with_summary(run, index)?;
        sink.report(&summary);
        Ok(filtered)
    }

    /// Filter `run`, returning the new run and its diagnostic summary
    ///
    /// `index` only labels the summary. Records are kept when their control
    /// value lies strictly inside the fences; a sample left with fewer than
    /// `min_replicates` records is replaced by an empty sample with the same
    /// name and schema.
    pub fn filter_with_summary(
        &self,
        run: &Run,
        index: usize,
    ) -> Result<(Run, RunFilterSummary), FilterError> {
        let empty_run = || FilterError::EmptyRun {
            index,
            run: run.name().to_string(),
        };

        let pooled = run.pooled_control_values();
        let k = self.config.fence_multiplier;
        let interval = estimate_acceptance_interval_with(&pooled, k).ok_or_else(empty_run)?;
        let boxplot = BoxplotSummary::from_values(&pooled, k).ok_or_else(empty_run)?;
        let outlier_count = pooled.iter().filter(|v| interval.is_outlier(**v)).count();

        let mut samples = Vec::with_capacity(run.len());
        let mut removed_samples = Vec::new();
        let mut rejected_records = 0;

        for sample in run.samples() {
            let kept = sample.retain_records(|r| interval.contains_strict(r.orange));
            rejected_records += sample.len() - kept.len();

            if kept.len() < self.config.min_replicates {
                debug!(
                    "Run {} sample '{}': {} of {} records survive, emptying",
                    index,
                    sample.name(),
                    kept.len(),
                    sample.len()
                );
                removed_samples.push(sample.name().to_string());
                samples.push(sample.placeholder());
            } else {
                debug!(
                    "Run {} sample '{}': keeping {} of {} records",
                    index,
                    sample.name(),
                    kept.len(),
                    sample.len()
                );
                samples.push(kept);
            }
        }

        let summary = RunFilterSummary {
            index,
            run_name: run.name().to_string(),
            pooled_count: pooled.len(),
            outlier_count,
            rejected_records,
            interval,
            removed_samples,
            boxplot,
        };

        Ok((run.with_samples(samples), summary))
    }
}

/// Filter one run with the default configuration
pub fn filter_run(
    run: &Run,
    index: usize,
    sink: &mut dyn DiagnosticSink,
) -> Result<Run, FilterError> {
    RunFilter::default().filter(run, index, sink)
}
