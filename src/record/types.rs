use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashSet};
use std::fmt;

use super::SchemaError;

/// Name of the control-dye column when none is configured
pub const DEFAULT_CONTROL_FIELD: &str = "orange";

/// Value of a non-control field
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum FieldValue {
    /// Numeric value (intensities, positions, widths)
    Number(f64),
    /// Categorical value (labels, flags)
    Text(String),
    /// Empty cell, serialized as `null`; valid for any field kind
    Missing,
}

impl FieldValue {
    /// Kind tag of this value, `None` for a missing value
    pub fn kind(&self) -> Option<FieldKind> {
        match self {
            FieldValue::Number(_) => Some(FieldKind::Number),
            FieldValue::Text(_) => Some(FieldKind::Text),
            FieldValue::Missing => None,
        }
    }

    /// True for an empty cell
    pub fn is_missing(&self) -> bool {
        matches!(self, FieldValue::Missing)
    }

    /// Numeric payload, if any
    pub fn as_number(&self) -> Option<f64> {
        match self {
            FieldValue::Number(v) => Some(*v),
            FieldValue::Text(_) | FieldValue::Missing => None,
        }
    }
}

impl fmt::Display for FieldValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FieldValue::Number(v) => write!(f, "{}", v),
            FieldValue::Text(s) => f.write_str(s),
            FieldValue::Missing => Ok(()),
        }
    }
}

impl From<f64> for FieldValue {
    fn from(value: f64) -> Self {
        FieldValue::Number(value)
    }
}

impl From<&str> for FieldValue {
    fn from(value: &str) -> Self {
        FieldValue::Text(value.to_string())
    }
}

impl From<String> for FieldValue {
    fn from(value: String) -> Self {
        FieldValue::Text(value)
    }
}

/// Kind of a schema field
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FieldKind {
    /// Floating-point column
    Number,
    /// String column
    Text,
}

impl fmt::Display for FieldKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FieldKind::Number => f.write_str("number"),
            FieldKind::Text => f.write_str("text"),
        }
    }
}

/// Name and kind of one non-control column
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct FieldSpec {
    /// Column name
    pub name: String,
    /// Column kind
    pub kind: FieldKind,
}

impl FieldSpec {
    /// Create a field specification
    pub fn new(name: impl Into<String>, kind: FieldKind) -> Self {
        Self {
            name: name.into(),
            kind,
        }
    }

    /// Numeric field
    pub fn number(name: impl Into<String>) -> Self {
        Self::new(name, FieldKind::Number)
    }

    /// Text field
    pub fn text(name: impl Into<String>) -> Self {
        Self::new(name, FieldKind::Text)
    }
}

/// Column layout shared by every record of a sample
///
/// The control column is always numeric and is listed first by
/// [`Schema::column_names`]; the remaining fields keep their declared order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "SchemaDef")]
pub struct Schema {
    control: String,
    fields: Vec<FieldSpec>,
}

#[derive(Deserialize)]
struct SchemaDef {
    #[serde(default = "default_control")]
    control: String,
    #[serde(default)]
    fields: Vec<FieldSpec>,
}

fn default_control() -> String {
    DEFAULT_CONTROL_FIELD.to_string()
}

impl TryFrom<SchemaDef> for Schema {
    type Error = SchemaError;

    fn try_from(def: SchemaDef) -> Result<Self, Self::Error> {
        Schema::with_control(def.control, def.fields)
    }
}

impl Default for Schema {
    fn default() -> Self {
        Self {
            control: default_control(),
            fields: Vec::new(),
        }
    }
}

impl Schema {
    /// Schema with the default `orange` control column
    pub fn new(fields: Vec<FieldSpec>) -> Result<Self, SchemaError> {
        Self::with_control(DEFAULT_CONTROL_FIELD, fields)
    }

    /// Schema with a custom control column name
    pub fn with_control(
        control: impl Into<String>,
        fields: Vec<FieldSpec>,
    ) -> Result<Self, SchemaError> {
        let control = control.into();
        if control.is_empty() {
            return Err(SchemaError::MissingControlField(control));
        }

        let mut seen = HashSet::with_capacity(fields.len() + 1);
        seen.insert(control.as_str());
        for field in &fields {
            if !seen.insert(field.name.as_str()) {
                return Err(SchemaError::DuplicateField(field.name.clone()));
            }
        }

        Ok(Self { control, fields })
    }

    /// Derive a schema from the fields carried by a record
    ///
    /// A missing value carries no kind and is taken as a number.
    pub fn infer(control: impl Into<String>, record: &ReplicateRecord) -> Result<Self, SchemaError> {
        let fields = record
            .fields
            .iter()
            .map(|(name, value)| {
                FieldSpec::new(name.clone(), value.kind().unwrap_or(FieldKind::Number))
            })
            .collect();
        Self::with_control(control, fields)
    }

    /// Name of the control column
    pub fn control(&self) -> &str {
        &self.control
    }

    /// Non-control fields in declared order
    pub fn fields(&self) -> &[FieldSpec] {
        &self.fields
    }

    /// Look up a non-control field by name
    pub fn field(&self, name: &str) -> Option<&FieldSpec> {
        self.fields.iter().find(|f| f.name == name)
    }

    /// All column names, control column first
    pub fn column_names(&self) -> Vec<&str> {
        std::iter::once(self.control.as_str())
            .chain(self.fields.iter().map(|f| f.name.as_str()))
            .collect()
    }

    /// Number of columns including the control column
    pub fn width(&self) -> usize {
        self.fields.len() + 1
    }

    pub(crate) fn check_record(
        &self,
        sample: &str,
        record: &ReplicateRecord,
    ) -> Result<(), SchemaError> {
        if !record.orange.is_finite() {
            return Err(SchemaError::NonFiniteControl {
                sample: sample.to_string(),
                value: record.orange,
            });
        }

        let names_match = record.fields.len() == self.fields.len()
            && self.fields.iter().all(|f| record.fields.contains_key(&f.name));
        if !names_match {
            return Err(SchemaError::FieldMismatch {
                sample: sample.to_string(),
                expected: self
                    .fields
                    .iter()
                    .map(|f| f.name.as_str())
                    .collect::<Vec<_>>()
                    .join(", "),
                found: record.fields.keys().map(String::as_str).collect::<Vec<_>>().join(", "),
            });
        }

        for spec in &self.fields {
            let Some(found) = record.fields.get(&spec.name).and_then(FieldValue::kind) else {
                continue;
            };
            if found != spec.kind {
                return Err(SchemaError::KindMismatch {
                    sample: sample.to_string(),
                    field: spec.name.clone(),
                    expected: spec.kind,
                    found,
                });
            }
        }

        Ok(())
    }
}

/// One replicate measurement
///
/// `orange` is the control-dye intensity; every other column lives in `fields`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReplicateRecord {
    /// Control-channel intensity
    pub orange: f64,
    /// Remaining schema-determined fields
    #[serde(default)]
    pub fields: BTreeMap<String, FieldValue>,
}

impl ReplicateRecord {
    /// Record with only a control value
    pub fn new(orange: f64) -> Self {
        Self {
            orange,
            fields: BTreeMap::new(),
        }
    }

    /// Add or replace a field (builder style)
    pub fn with_field(mut self, name: impl Into<String>, value: impl Into<FieldValue>) -> Self {
        self.fields.insert(name.into(), value.into());
        self
    }

    /// Look up a non-control field
    pub fn get(&self, name: &str) -> Option<&FieldValue> {
        self.fields.get(name)
    }
}
