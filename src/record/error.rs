use super::FieldKind;

/// Errors raised when replicate data violates the schema contract
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum SchemaError {
    /// A column name appears more than once in a schema
    #[error("Duplicate field '{0}' in schema")]
    DuplicateField(String),

    /// The control column is absent from the input
    #[error("Missing control field '{0}'")]
    MissingControlField(String),

    /// Two samples in one run have the same name
    #[error("Duplicate sample '{sample}' in run '{run}'")]
    DuplicateSample {
        /// Run name
        run: String,
        /// Offending sample name
        sample: String,
    },

    /// A record's field names differ from the sample schema
    #[error("Sample '{sample}': expected fields [{expected}], found [{found}]")]
    FieldMismatch {
        /// Sample name
        sample: String,
        /// Field names declared by the schema
        expected: String,
        /// Field names carried by the record
        found: String,
    },

    /// A record's field has a different kind than declared
    #[error("Sample '{sample}': field '{field}' should be {expected}, found {found}")]
    KindMismatch {
        /// Sample name
        sample: String,
        /// Field name
        field: String,
        /// Declared kind
        expected: FieldKind,
        /// Kind of the offending value
        found: FieldKind,
    },

    /// A sample's schema differs from the rest of its run
    #[error("Sample '{sample}' does not share the schema of run '{run}'")]
    SchemaMismatch {
        /// Run name
        run: String,
        /// Offending sample name
        sample: String,
    },

    /// A control value is NaN or infinite
    #[error("Sample '{sample}': control value {value} is not finite")]
    NonFiniteControl {
        /// Sample name
        sample: String,
        /// Offending value
        value: f64,
    },
}
