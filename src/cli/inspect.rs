use anyhow::Result;

use dropqc::threshold::{estimate_acceptance_interval_with, DEFAULT_FENCE_MULTIPLIER};

use super::{load_runs, resolve_ingest_config, Config, InputArgs};

/// Display runs, samples and acceptance intervals of a replicate table
pub fn run(input: InputArgs) -> Result<()> {
    let config = Config::load(input.config.as_deref())?;
    let ingest_config = resolve_ingest_config(&input, &config);
    let k = config
        .filter
        .fence_multiplier
        .unwrap_or(DEFAULT_FENCE_MULTIPLIER);
    let runs = load_runs(&input, &ingest_config)?;

    println!("dropqc Table Information");
    println!("========================");
    println!("File: {}", input.input.display());
    println!("Runs: {}", runs.len());
    println!("Fence multiplier: {}", k);
    println!();

    for (index, run) in runs.iter().enumerate() {
        println!("Run {} ({}):", index, run.name());
        println!("  Samples: {}", run.len());
        println!("  Replicates: {}", run.record_count());
        if let Some(schema) = run.schema() {
            println!("  Columns: {}", schema.column_names().join(", "));
        }

        match estimate_acceptance_interval_with(&run.pooled_control_values(), k) {
            Some(interval) => println!("  Acceptance interval: {}", interval),
            None => println!("  Acceptance interval: <no control values>"),
        }

        for sample in run.samples() {
            println!("    {:<24} {:>4} replicates", sample.name(), sample.len());
        }
        println!();
    }

    Ok(())
}
