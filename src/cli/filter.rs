use anyhow::{Context, Result};
use log::{info, warn};
use std::path::PathBuf;

use dropqc::filter::{self, FilterConfig};
use dropqc::ingest;
use dropqc::record::RunCollection;
use dropqc::report::{ConsoleSink, DiagnosticSink, LogSink};

use super::{load_runs, resolve_ingest_config, Config, InputArgs, OutputFormat};

/// Filter a replicate table and write the result
pub fn run(
    input: InputArgs,
    output: Option<PathBuf>,
    format: Option<OutputFormat>,
    fence_multiplier: Option<f64>,
    min_replicates: Option<usize>,
    parallel: bool,
    quiet: bool,
) -> Result<()> {
    let config = Config::load(input.config.as_deref())?;
    let ingest_config = resolve_ingest_config(&input, &config);

    let defaults = FilterConfig::default();
    let filter_config = FilterConfig {
        fence_multiplier: fence_multiplier
            .or(config.filter.fence_multiplier)
            .unwrap_or(defaults.fence_multiplier),
        min_replicates: min_replicates
            .or(config.filter.min_replicates)
            .unwrap_or(defaults.min_replicates),
    };
    let parallel = parallel || config.filter.parallel.unwrap_or(false);

    let format = format
        .or_else(|| output.as_deref().and_then(OutputFormat::from_path))
        .unwrap_or(OutputFormat::Csv);
    let output = output.unwrap_or_else(|| {
        let stem = input.input.file_stem().unwrap_or_default().to_string_lossy();
        input
            .input
            .with_file_name(format!("{}.filtered.{}", stem, format.extension()))
    });

    info!("dropqc - control-channel outlier filter");
    info!("=======================================");
    info!("Input:  {}", input.input.display());
    info!("Output: {} ({:?})", output.display(), format);
    info!("Fence multiplier: {}", filter_config.fence_multiplier);
    info!("Minimum replicates: {}", filter_config.min_replicates);
    info!("Control column: {}", ingest_config.control_column);

    let runs = load_runs(&input, &ingest_config)?;

    let mut console;
    let mut log_sink = LogSink;
    let sink: &mut dyn DiagnosticSink = if quiet {
        &mut log_sink
    } else {
        console = ConsoleSink::stdout().colored(cfg!(feature = "colorized_output"));
        &mut console
    };

    let filtered = {
        #[cfg(feature = "parallel")]
        {
            if parallel {
                filter::filter_runs_parallel(&runs, &filter_config, sink)
            } else {
                filter::filter_runs(&runs, &filter_config, sink)
            }
        }
        #[cfg(not(feature = "parallel"))]
        {
            if parallel {
                warn!("Parallel filtering requested but binary was built without the parallel feature; falling back to sequential filtering.");
            }
            filter::filter_runs(&runs, &filter_config, sink)
        }
    }
    .context("Filtering failed")?;

    let written = match format {
        OutputFormat::Csv => ingest::write_csv(&filtered, &output, &ingest_config),
        OutputFormat::Json => ingest::write_json(&filtered, &output),
    };
    written.with_context(|| format!("Failed to write {}", output.display()))?;

    if format == OutputFormat::Csv {
        let omitted = emptied_samples(&filtered);
        if !omitted.is_empty() {
            warn!(
                "{} emptied samples have no rows in the CSV output (use JSON to keep them): {}",
                omitted.len(),
                omitted.join(", ")
            );
        }
    }

    let before: usize = runs.iter().map(|r| r.record_count()).sum();
    let after: usize = filtered.iter().map(|r| r.record_count()).sum();
    info!("Filtering complete!");
    info!("  Runs: {}", filtered.len());
    info!("  Replicates kept: {} of {}", after, before);

    Ok(())
}

/// `run/sample` labels of samples without records
fn emptied_samples(runs: &RunCollection) -> Vec<String> {
    runs.iter()
        .flat_map(|run| {
            run.samples()
                .iter()
                .filter(|s| s.is_empty())
                .map(move |s| format!("{}/{}", run.name(), s.name()))
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use dropqc::filter::filter_runs;
    use dropqc::ingest::{read_csv_from_reader, IngestConfig};
    use dropqc::report::NullSink;
    use std::io::Cursor;

    #[test]
    fn test_emptied_samples_are_listed() {
        let table = "run,sample,orange\nr1,A,1\nr1,A,2\nr1,B,1.5\nr1,B,2.5\nr1,C,2\n";
        let runs = read_csv_from_reader(Cursor::new(table), &IngestConfig::default()).unwrap();
        assert!(emptied_samples(&runs).is_empty());

        let filtered = filter_runs(&runs, &FilterConfig::default(), &mut NullSink).unwrap();
        assert_eq!(emptied_samples(&filtered), vec!["r1/C".to_string()]);
    }
}
