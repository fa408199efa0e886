use super::*;
use crate::record::{FieldKind, FieldValue};
use std::io::Cursor;

const SAMPLE_TABLE: &str = "run,sample,orange,green,peak
plate_1,A,1.0,340.1,p1
plate_1,A,2.0,351.7,p2
plate_1,B,1.5,120.4,p1
plate_2,C,5.0,99.0,p3
plate_1,A,100.0,345.0,p3
plate_1,B,2.5,122.0,p2
";

#[test]
fn test_read_groups_by_first_appearance() {
    let runs = read_csv_from_reader(Cursor::new(SAMPLE_TABLE), &IngestConfig::default()).unwrap();

    assert_eq!(runs.len(), 2);
    let plate_1 = &runs.runs()[0];
    assert_eq!(plate_1.name(), "plate_1");
    assert_eq!(plate_1.sample_names().collect::<Vec<_>>(), vec!["A", "B"]);
    assert_eq!(
        plate_1.sample("A").unwrap().control_values().collect::<Vec<_>>(),
        vec![1.0, 2.0, 100.0]
    );
    assert_eq!(runs.runs()[1].name(), "plate_2");
}

#[test]
fn test_read_infers_field_kinds() {
    let runs = read_csv_from_reader(Cursor::new(SAMPLE_TABLE), &IngestConfig::default()).unwrap();
    let schema = runs.runs()[0].schema().unwrap();

    assert_eq!(schema.column_names(), vec!["orange", "green", "peak"]);
    assert_eq!(schema.field("green").unwrap().kind, FieldKind::Number);
    assert_eq!(schema.field("peak").unwrap().kind, FieldKind::Text);

    let record = &runs.runs()[0].sample("B").unwrap().records()[0];
    assert_eq!(record.get("green"), Some(&FieldValue::Number(120.4)));
    assert_eq!(record.get("peak"), Some(&FieldValue::Text("p1".to_string())));
}

#[test]
fn test_read_custom_columns_and_delimiter() {
    let table = "plate\twell\tcontrol\nr1\tA1\t0.5\nr1\tA1\t0.7\n";
    let config = IngestConfig {
        run_column: "plate".to_string(),
        sample_column: "well".to_string(),
        control_column: "control".to_string(),
        ..IngestConfig::tsv()
    };
    let runs = read_csv_from_reader(Cursor::new(table), &config).unwrap();

    let schema = runs.runs()[0].schema().unwrap();
    assert_eq!(schema.control(), "control");
    assert_eq!(runs.runs()[0].sample("A1").unwrap().len(), 2);
}

#[test]
fn test_missing_columns() {
    let err = read_csv_from_reader(Cursor::new("sample,orange\nA,1.0\n"), &IngestConfig::default())
        .unwrap_err();
    assert!(matches!(err, IngestError::MissingColumn(ref c) if c == "run"));

    let err = read_csv_from_reader(Cursor::new("run,sample,green\nr,A,1.0\n"), &IngestConfig::default())
        .unwrap_err();
    assert!(matches!(
        err,
        IngestError::SchemaError(crate::record::SchemaError::MissingControlField(_))
    ));
}

#[test]
fn test_invalid_control_value_reports_line() {
    let table = "run,sample,orange\nr,A,1.0\nr,A,bright\n";
    let err = read_csv_from_reader(Cursor::new(table), &IngestConfig::default()).unwrap_err();
    match err {
        IngestError::InvalidValue { line, column, value } => {
            assert_eq!(line, 3);
            assert_eq!(column, "orange");
            assert_eq!(value, "bright");
        }
        other => panic!("unexpected error: {other}"),
    }

    let table = "run,sample,orange\nr,A,inf\n";
    assert!(read_csv_from_reader(Cursor::new(table), &IngestConfig::default()).is_err());
}

#[test]
fn test_write_csv_skips_empty_samples() {
    let runs = read_csv_from_reader(Cursor::new(SAMPLE_TABLE), &IngestConfig::default()).unwrap();
    let filtered = crate::filter::filter_runs(
        &runs,
        &crate::filter::FilterConfig::default(),
        &mut crate::report::NullSink,
    )
    .unwrap();

    let mut buffer = Vec::new();
    write_csv_to_writer(&filtered, &IngestConfig::default(), &mut buffer).unwrap();
    let output = String::from_utf8(buffer).unwrap();
    let lines: Vec<_> = output.lines().collect();

    assert_eq!(lines[0], "run,sample,orange,green,peak");
    assert!(lines.contains(&"plate_1,A,1,340.1,p1"));
    assert!(!output.contains("100"));
    // plate_2 holds a single replicate, so its only sample is emptied
    assert!(!output.contains("plate_2"));
}

#[test]
fn test_write_csv_rejects_mixed_layouts() {
    let table_a = "run,sample,orange,green\nr1,A,1.0,2.0\n";
    let table_b = "run,sample,orange,peak\nr2,A,1.0,p1\n";
    let mut runs = read_csv_from_reader(Cursor::new(table_a), &IngestConfig::default()).unwrap();
    for run in read_csv_from_reader(Cursor::new(table_b), &IngestConfig::default()).unwrap() {
        runs.push(run);
    }

    let err = write_csv_to_writer(&runs, &IngestConfig::default(), Vec::new()).unwrap_err();
    assert!(matches!(err, IngestError::ColumnLayoutConflict(ref r) if r == "r2"));
}

#[test]
fn test_empty_numeric_cell_is_missing() {
    let table = "run,sample,orange,green\nr1,A,1.0,310.5\nr1,A,2.0,\n";
    let runs = read_csv_from_reader(Cursor::new(table), &IngestConfig::default()).unwrap();

    let sample = runs.runs()[0].sample("A").unwrap();
    assert_eq!(
        runs.runs()[0].schema().unwrap().field("green").unwrap().kind,
        FieldKind::Number
    );
    assert_eq!(sample.records()[1].get("green"), Some(&FieldValue::Missing));

    let mut buffer = Vec::new();
    write_csv_to_writer(&runs, &IngestConfig::default(), &mut buffer).unwrap();
    let output = String::from_utf8(buffer).unwrap();
    assert!(output.lines().any(|l| l == "r1,A,2,"));
}

#[test]
fn test_json_roundtrip_with_missing_values() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("runs.json");
    let table = "run,sample,orange,green\nr1,A,1.0,310.5\nr1,A,2.0,\n";
    let runs = read_csv_from_reader(Cursor::new(table), &IngestConfig::default()).unwrap();

    write_json(&runs, &path).unwrap();
    assert!(std::fs::read_to_string(&path).unwrap().contains("null"));
    let restored = read_json(&path).unwrap();
    assert_eq!(restored, runs);
}

#[test]
fn test_json_file_roundtrip() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("runs.json");
    let runs = read_csv_from_reader(Cursor::new(SAMPLE_TABLE), &IngestConfig::default()).unwrap();

    write_json(&runs, &path).unwrap();
    let restored = read_json(&path).unwrap();
    assert_eq!(restored, runs);
}

#[test]
fn test_csv_file_roundtrip() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("runs.csv");
    let runs = read_csv_from_reader(Cursor::new(SAMPLE_TABLE), &IngestConfig::default()).unwrap();

    write_csv(&runs, &path, &IngestConfig::default()).unwrap();
    let restored = read_csv(&path, &IngestConfig::default()).unwrap();
    assert_eq!(restored, runs);
}
