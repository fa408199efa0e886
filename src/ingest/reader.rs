use log::{debug, info};
use std::collections::HashMap;
use std::fs::File;
use std::io::{BufReader, Read};
use std::path::Path;

use super::{IngestConfig, IngestError};
use crate::record::{
    FieldKind, FieldSpec, FieldValue, ReplicateRecord, Run, RunCollection, Sample, Schema,
    SchemaError,
};

/// One parsed row: control value plus raw cells of the remaining columns
struct RawRow {
    orange: f64,
    cells: Vec<String>,
}

#[derive(Default)]
struct RawRun {
    name: String,
    samples: Vec<(String, Vec<RawRow>)>,
    sample_index: HashMap<String, usize>,
}

impl RawRun {
    fn push(&mut self, sample: &str, row: RawRow) {
        let idx = match self.sample_index.get(sample) {
            Some(&idx) => idx,
            None => {
                self.samples.push((sample.to_string(), Vec::new()));
                self.sample_index.insert(sample.to_string(), self.samples.len() - 1);
                self.samples.len() - 1
            }
        };
        self.samples[idx].1.push(row);
    }
}

/// Read a long-format CSV file
pub fn read_csv<P: AsRef<Path>>(path: P, config: &IngestConfig) -> Result<RunCollection, IngestError> {
    let path = path.as_ref();
    info!("Reading replicate table: {}", path.display());
    let file = File::open(path)?;
    read_csv_from_reader(BufReader::new(file), config)
}

/// Read a long-format CSV table from any reader
pub fn read_csv_from_reader<R: Read>(
    reader: R,
    config: &IngestConfig,
) -> Result<RunCollection, IngestError> {
    let mut csv_reader = csv::ReaderBuilder::new()
        .delimiter(config.delimiter)
        .has_headers(true)
        .trim(csv::Trim::All)
        .from_reader(reader);

    let headers: Vec<String> = csv_reader.headers()?.iter().map(str::to_string).collect();
    let position = |name: &str| headers.iter().position(|h| h == name);

    let run_idx = position(&config.run_column)
        .ok_or_else(|| IngestError::MissingColumn(config.run_column.clone()))?;
    let sample_idx = position(&config.sample_column)
        .ok_or_else(|| IngestError::MissingColumn(config.sample_column.clone()))?;
    let control_idx = position(&config.control_column)
        .ok_or_else(|| SchemaError::MissingControlField(config.control_column.clone()))?;

    let field_columns: Vec<(usize, String)> = headers
        .iter()
        .enumerate()
        .filter(|(i, _)| ![run_idx, sample_idx, control_idx].contains(i))
        .map(|(i, h)| (i, h.clone()))
        .collect();

    let mut runs: Vec<RawRun> = Vec::new();
    let mut run_index: HashMap<String, usize> = HashMap::new();

    for record in csv_reader.records() {
        let record = record?;
        let line = record.position().map(|p| p.line()).unwrap_or(0);
        let cell = |i: usize| record.get(i).unwrap_or("");

        let raw_orange = cell(control_idx);
        let orange = raw_orange
            .parse::<f64>()
            .ok()
            .filter(|v| v.is_finite())
            .ok_or_else(|| IngestError::InvalidValue {
                line,
                column: config.control_column.clone(),
                value: raw_orange.to_string(),
            })?;

        let row = RawRow {
            orange,
            cells: field_columns.iter().map(|(i, _)| cell(*i).to_string()).collect(),
        };

        let run_name = cell(run_idx);
        let idx = match run_index.get(run_name) {
            Some(&idx) => idx,
            None => {
                runs.push(RawRun {
                    name: run_name.to_string(),
                    ..Default::default()
                });
                run_index.insert(run_name.to_string(), runs.len() - 1);
                runs.len() - 1
            }
        };
        runs[idx].push(cell(sample_idx), row);
    }

    let names: Vec<&str> = field_columns.iter().map(|(_, name)| name.as_str()).collect();
    let collection = runs
        .into_iter()
        .map(|raw| build_run(raw, &config.control_column, &names))
        .collect::<Result<RunCollection, _>>()?;

    info!(
        "Read {} runs ({} samples, {} replicates)",
        collection.len(),
        collection.iter().map(Run::len).sum::<usize>(),
        collection.iter().map(Run::record_count).sum::<usize>()
    );
    Ok(collection)
}

/// Read a JSON document produced by [`write_json`](super::write_json)
pub fn read_json<P: AsRef<Path>>(path: P) -> Result<RunCollection, IngestError> {
    let file = File::open(path.as_ref())?;
    Ok(serde_json::from_reader(BufReader::new(file))?)
}

fn build_run(raw: RawRun, control: &str, names: &[&str]) -> Result<Run, IngestError> {
    let kinds: Vec<FieldKind> = (0..names.len())
        .map(|col| infer_kind(raw.samples.iter().flat_map(|(_, rows)| rows.iter()), col))
        .collect();

    let fields = names
        .iter()
        .zip(&kinds)
        .map(|(name, kind)| FieldSpec::new(*name, *kind))
        .collect();
    let schema = Schema::with_control(control, fields)?;
    debug!("Run '{}' schema: {:?}", raw.name, schema.column_names());

    let mut samples = Vec::with_capacity(raw.samples.len());
    for (sample_name, rows) in raw.samples {
        let records = rows
            .into_iter()
            .map(|row| {
                let mut record = ReplicateRecord::new(row.orange);
                for ((name, kind), cell) in names.iter().zip(&kinds).zip(row.cells) {
                    record.fields.insert(name.to_string(), to_value(cell, *kind));
                }
                record
            })
            .collect();
        samples.push(Sample::new(sample_name, schema.clone(), records)?);
    }

    Ok(Run::new(raw.name, samples)?)
}

fn infer_kind<'a>(rows: impl Iterator<Item = &'a RawRow>, col: usize) -> FieldKind {
    let mut saw_value = false;
    for row in rows {
        let cell = row.cells[col].as_str();
        if cell.is_empty() {
            continue;
        }
        saw_value = true;
        if cell.parse::<f64>().is_err() {
            return FieldKind::Text;
        }
    }
    if saw_value {
        FieldKind::Number
    } else {
        FieldKind::Text
    }
}

fn to_value(cell: String, kind: FieldKind) -> FieldValue {
    match kind {
        FieldKind::Number => cell.parse::<f64>().map_or(FieldValue::Missing, FieldValue::Number),
        FieldKind::Text => FieldValue::Text(cell),
    }
}
