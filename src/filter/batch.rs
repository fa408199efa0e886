use log::info;

use super::{FilterConfig, FilterError, RunFilter};
use crate::record::RunCollection;
use crate::report::DiagnosticSink;

/// Filter every run in order, using its position as the diagnostic index
///
/// Stops at the first failing run and returns its error; summaries of the
/// runs before it have already been delivered to `sink`.
pub fn filter_runs(
    runs: &RunCollection,
    config: &FilterConfig,
    sink: &mut dyn DiagnosticSink,
) -> Result<RunCollection, FilterError> {
    let filter = RunFilter::new(config.clone())?;
    info!("Filtering {} runs", runs.len());

    runs.iter()
        .enumerate()
        .map(|(index, run)| filter.filter(run, index, &mut *sink))
        .collect()
}

/// Filter runs concurrently with rayon
///
/// Results keep the input order. Summaries are delivered after all runs are
/// processed, one block per run, in run order.
#[cfg(feature = "parallel")]
pub fn filter_runs_parallel(
    runs: &RunCollection,
    config: &FilterConfig,
    sink: &mut dyn DiagnosticSink,
) -> Result<RunCollection, FilterError> {
    use rayon::prelude::*;

    let filter = RunFilter::new(config.clone())?;
    info!(
        "Filtering {} runs on {} threads",
        runs.len(),
        rayon::current_num_threads()
    );

    let outcomes: Vec<_> = runs
        .runs()
        .par_iter()
        .enumerate()
        .map(|(index, run)| filter.filter_with_summary(run, index))
        .collect();

    let mut filtered = Vec::with_capacity(outcomes.len());
    for outcome in outcomes {
        let (run, summary) = outcome?;
        sink.report(&summary);
        filtered.push(run);
    }

    Ok(RunCollection::new(filtered))
}
