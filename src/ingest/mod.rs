//! # Replicate Table Ingestion
//!
//! Reads long-format replicate tables (one row per replicate) into a
//! [`RunCollection`](crate::record::RunCollection) and writes filtered
//! collections back out.
//!
//! ## Input Layout
//!
//! | run | sample | orange | green | peak |
//! |-----|--------|--------|-------|------|
//! | plate_1 | A | 1.02 | 340.1 | p1 |
//! | plate_1 | A | 0.98 | 351.7 | p2 |
//! | plate_1 | B | 1.10 | 120.4 | p1 |
//!
//! Column names are configurable through [`IngestConfig`]. Runs and samples
//! keep the order in which they first appear. A non-control column is numeric
//! for a run when every non-empty cell of that run parses as a number;
//! otherwise it is text.
//!
//! ## Output Formats
//!
//! - CSV: same layout as the input; emptied samples contribute no rows.
//! - JSON: full structure, including empty samples and their schemas.
//!
//! Files are written to a temporary sibling first and then renamed into place.

mod error;
mod reader;
mod writer;

#[cfg(test)]
mod tests;

pub use error::IngestError;
pub use reader::{read_csv, read_csv_from_reader, read_json};
pub use writer::{write_csv, write_csv_to_writer, write_json};

use serde::{Deserialize, Serialize};

use crate::record::DEFAULT_CONTROL_FIELD;

/// Column naming for long-format replicate tables
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct IngestConfig {
    /// Column holding the run name
    pub run_column: String,
    /// Column holding the sample name
    pub sample_column: String,
    /// Column holding the control-dye intensity
    pub control_column: String,
    /// Field delimiter
    pub delimiter: u8,
}

impl Default for IngestConfig {
    fn default() -> Self {
        Self {
            run_column: "run".to_string(),
            sample_column: "sample".to_string(),
            control_column: DEFAULT_CONTROL_FIELD.to_string(),
            delimiter: b',',
        }
    }
}

impl IngestConfig {
    /// Tab-separated variant of the default layout
    pub fn tsv() -> Self {
        Self {
            delimiter: b'\t',
            ..Self::default()
        }
    }
}
