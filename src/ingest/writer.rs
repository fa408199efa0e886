use log::info;
use std::io::{BufWriter, Write};
use std::path::Path;

use tempfile::NamedTempFile;

use super::{IngestConfig, IngestError};
use crate::record::{FieldValue, RunCollection};

/// Write runs as a long-format CSV file
pub fn write_csv<P: AsRef<Path>>(
    runs: &RunCollection,
    path: P,
    config: &IngestConfig,
) -> Result<(), IngestError> {
    let path = path.as_ref();
    let mut temp = temp_sibling(path)?;
    write_csv_to_writer(runs, config, BufWriter::new(temp.as_file_mut()))?;
    temp.persist(path)?;
    info!("Wrote {}", path.display());
    Ok(())
}

/// Write runs as long-format CSV to any writer
///
/// Header: run column, sample column, then the schema columns with the control
/// column first. Samples without records produce no rows.
pub fn write_csv_to_writer<W: Write>(
    runs: &RunCollection,
    config: &IngestConfig,
    writer: W,
) -> Result<(), IngestError> {
    let mut csv_writer = csv::WriterBuilder::new()
        .delimiter(config.delimiter)
        .from_writer(writer);

    let mut layout: Option<Vec<String>> = None;
    for run in runs {
        let Some(schema) = run.schema() else {
            continue;
        };
        let columns: Vec<String> = schema.column_names().into_iter().map(str::to_string).collect();

        match &layout {
            None => {
                let mut header = vec![config.run_column.clone(), config.sample_column.clone()];
                header.extend(columns.iter().cloned());
                csv_writer.write_record(&header)?;
                layout = Some(columns);
            }
            Some(existing) if *existing != columns => {
                return Err(IngestError::ColumnLayoutConflict(run.name().to_string()));
            }
            Some(_) => {}
        }

        for sample in run.samples() {
            for record in sample.records() {
                let mut row = Vec::with_capacity(schema.width() + 2);
                row.push(run.name().to_string());
                row.push(sample.name().to_string());
                row.push(record.orange.to_string());
                for spec in schema.fields() {
                    row.push(record.get(&spec.name).map(format_cell).unwrap_or_default());
                }
                csv_writer.write_record(&row)?;
            }
        }
    }

    csv_writer.flush()?;
    Ok(())
}

/// Write runs as pretty-printed JSON, keeping empty samples
pub fn write_json<P: AsRef<Path>>(runs: &RunCollection, path: P) -> Result<(), IngestError> {
    let path = path.as_ref();
    let mut temp = temp_sibling(path)?;
    {
        let mut writer = BufWriter::new(temp.as_file_mut());
        serde_json::to_writer_pretty(&mut writer, runs)?;
        writer.flush()?;
    }
    temp.persist(path)?;
    info!("Wrote {}", path.display());
    Ok(())
}

fn temp_sibling(path: &Path) -> Result<NamedTempFile, IngestError> {
    let dir = path
        .parent()
        .filter(|p| !p.as_os_str().is_empty())
        .unwrap_or_else(|| Path::new("."));
    Ok(NamedTempFile::new_in(dir)?)
}

fn format_cell(value: &FieldValue) -> String {
    match value {
        FieldValue::Number(v) if v.is_nan() => String::new(),
        FieldValue::Missing => String::new(),
        other => other.to_string(),
    }
}
