#![no_main]

use dropqc::filter::{filter_runs, FilterConfig};
use dropqc::ingest::{read_csv_from_reader, write_csv_to_writer, IngestConfig};
use dropqc::report::NullSink;
use libfuzzer_sys::fuzz_target;
use std::io::Cursor;

fuzz_target!(|data: &[u8]| {
    let config = IngestConfig::default();

    // Malformed tables must fail gracefully, never panic
    let Ok(runs) = read_csv_from_reader(Cursor::new(data), &config) else {
        return;
    };

    // Runs without control values are an error, not a panic
    if let Ok(filtered) = filter_runs(&runs, &FilterConfig::default(), &mut NullSink) {
        assert_eq!(filtered.len(), runs.len());
        let _ = write_csv_to_writer(&filtered, &config, Vec::new());
    }
});
