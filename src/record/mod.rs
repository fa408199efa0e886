//! # Replicate Data Model
//!
//! Typed representation of the replicate tables produced by upstream droplet
//! selection. A [`Run`] holds named [`Sample`]s; each sample holds
//! [`ReplicateRecord`]s that share one [`Schema`].
//!
//! ## Schema Columns
//!
//! | Column | Kind | Description |
//! |--------|------|-------------|
//! | orange (configurable) | Number | Control-dye intensity used for QC |
//! | any other field | Number or Text | Channel intensities, peak metadata, ... |
//!
//! Invariants are checked once, on construction (including deserialization):
//! every record matches its sample's schema, control values are finite, sample
//! names are unique within a run and all samples of a run share one schema.

mod error;
mod run;
mod sample;
mod types;


pub use error::SchemaError;
pub use run::{Run, RunCollection};
pub use sample::Sample;
pub use types::{FieldKind, FieldSpec, FieldValue, ReplicateRecord, Schema, DEFAULT_CONTROL_FIELD};
