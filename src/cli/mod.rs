use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand, ValueEnum};
use std::path::{Path, PathBuf};

use dropqc::ingest::{self, IngestConfig};
use dropqc::record::RunCollection;

mod config;
mod filter;
mod inspect;

pub use config::Config;

/// dropqc - Control-channel outlier rejection for droplet replicates
#[derive(Parser)]
#[command(name = "dropqc")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Verbosity level (-v for info, -vv for debug)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    #[command(subcommand)]
    command: Commands,
}

/// Output table format.
#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// Long-format CSV (emptied samples contribute no rows)
    Csv,
    /// JSON with full structure, including emptied samples
    Json,
}

impl OutputFormat {
    fn extension(&self) -> &'static str {
        match self {
            OutputFormat::Csv => "csv",
            OutputFormat::Json => "json",
        }
    }

    fn from_path(path: &Path) -> Option<Self> {
        match path.extension()?.to_str()? {
            "json" => Some(OutputFormat::Json),
            "csv" | "tsv" => Some(OutputFormat::Csv),
            _ => None,
        }
    }
}

/// Input table options shared by all commands.
#[derive(Args, Debug)]
pub struct InputArgs {
    /// Replicate table (.csv, .tsv or .json)
    #[arg(value_name = "INPUT")]
    input: PathBuf,

    /// Load settings from a TOML config file
    #[arg(long, value_name = "FILE")]
    config: Option<PathBuf>,

    /// Column holding the run name (default: run)
    #[arg(long, value_name = "NAME")]
    run_column: Option<String>,

    /// Column holding the sample name (default: sample)
    #[arg(long, value_name = "NAME")]
    sample_column: Option<String>,

    /// Column holding the control-dye intensity (default: orange)
    #[arg(long, value_name = "NAME")]
    control_column: Option<String>,
}

#[derive(Subcommand)]
enum Commands {
    /// Remove control-channel outliers and empty under-replicated samples
    Filter {
        #[command(flatten)]
        input: InputArgs,

        /// Output path (defaults to <INPUT stem>.filtered.<format>)
        #[arg(short = 'o', long, value_name = "OUTPUT")]
        output: Option<PathBuf>,

        /// Output format (defaults to the output extension, else csv)
        #[arg(short = 'f', long, value_enum)]
        format: Option<OutputFormat>,

        /// IQR multiplier for the Tukey fences (default: 1.5)
        #[arg(short = 'k', long)]
        fence_multiplier: Option<f64>,

        /// Minimum surviving replicates per sample (default: 2)
        #[arg(short = 'm', long)]
        min_replicates: Option<usize>,

        /// Process runs concurrently (requires the parallel feature)
        #[arg(long)]
        parallel: bool,

        /// Send run summaries to the log instead of stdout
        #[arg(short = 'q', long)]
        quiet: bool,
    },

    /// Show runs, samples and acceptance intervals without filtering
    Inspect {
        #[command(flatten)]
        input: InputArgs,
    },
}

impl Cli {
    pub fn verbosity(&self) -> u8 {
        self.verbose
    }
}

pub fn init_logging(verbosity: u8) {
    let log_level = match verbosity {
        0 => "warn",
        1 => "info",
        _ => "debug",
    };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(log_level)).init();
}

pub fn dispatch(cli: Cli) -> Result<()> {
    match cli.command {
        Commands::Filter {
            input,
            output,
            format,
            fence_multiplier,
            min_replicates,
            parallel,
            quiet,
        } => filter::run(
            input,
            output,
            format,
            fence_multiplier,
            min_replicates,
            parallel,
            quiet,
        ),
        Commands::Inspect { input } => inspect::run(input),
    }
}

/// Column layout from CLI flags, then config file, then defaults.
fn resolve_ingest_config(args: &InputArgs, config: &Config) -> IngestConfig {
    let defaults = if args.input.extension().is_some_and(|e| e == "tsv") {
        IngestConfig::tsv()
    } else {
        IngestConfig::default()
    };

    IngestConfig {
        run_column: args
            .run_column
            .clone()
            .or_else(|| config.input.run_column.clone())
            .unwrap_or(defaults.run_column),
        sample_column: args
            .sample_column
            .clone()
            .or_else(|| config.input.sample_column.clone())
            .unwrap_or(defaults.sample_column),
        control_column: args
            .control_column
            .clone()
            .or_else(|| config.input.control_column.clone())
            .unwrap_or(defaults.control_column),
        delimiter: defaults.delimiter,
    }
}

/// Read the input table, CSV/TSV or JSON by extension.
fn load_runs(args: &InputArgs, ingest_config: &IngestConfig) -> Result<RunCollection> {
    if !args.input.exists() {
        anyhow::bail!("Input file does not exist: {}", args.input.display());
    }

    let runs = if OutputFormat::from_path(&args.input) == Some(OutputFormat::Json) {
        ingest::read_json(&args.input)
    } else {
        ingest::read_csv(&args.input, ingest_config)
    };
    runs.with_context(|| format!("Failed to read {}", args.input.display()))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn input_args(path: &str) -> InputArgs {
        InputArgs {
            input: PathBuf::from(path),
            config: None,
            run_column: None,
            sample_column: None,
            control_column: None,
        }
    }

    #[test]
    fn test_flags_override_config_file() {
        let config = Config::from_str(
            r#"
            [input]
            run_column = "plate"
            control_column = "dye"
        "#,
        )
        .unwrap();
        let mut args = input_args("table.csv");
        args.control_column = Some("orange_2".to_string());

        let resolved = resolve_ingest_config(&args, &config);
        assert_eq!(resolved.run_column, "plate");
        assert_eq!(resolved.sample_column, "sample");
        assert_eq!(resolved.control_column, "orange_2");
        assert_eq!(resolved.delimiter, b',');
    }

    #[test]
    fn test_tsv_extension_selects_tab_delimiter() {
        let resolved = resolve_ingest_config(&input_args("table.tsv"), &Config::default());
        assert_eq!(resolved.delimiter, b'\t');
    }

    #[test]
    fn test_output_format_from_path() {
        assert_eq!(OutputFormat::from_path(Path::new("a.json")), Some(OutputFormat::Json));
        assert_eq!(OutputFormat::from_path(Path::new("a.csv")), Some(OutputFormat::Csv));
        assert_eq!(OutputFormat::from_path(Path::new("a")), None);
    }

    #[test]
    fn test_cli_parses_filter_command() {
        let cli = Cli::try_parse_from([
            "dropqc", "-v", "filter", "runs.csv", "-o", "out.json", "-k", "3", "-m", "3",
        ])
        .unwrap();
        assert_eq!(cli.verbosity(), 1);
        match cli.command {
            Commands::Filter {
                input,
                output,
                fence_multiplier,
                min_replicates,
                ..
            } => {
                assert_eq!(input.input, PathBuf::from("runs.csv"));
                assert_eq!(output, Some(PathBuf::from("out.json")));
                assert_eq!(fence_multiplier, Some(3.0));
                assert_eq!(min_replicates, Some(3));
            }
            Commands::Inspect { .. } => panic!("expected filter command"),
        }
    }
}
