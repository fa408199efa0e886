use serde::{Deserialize, Serialize};

use super::{ReplicateRecord, Schema, SchemaError};

/// Named group of replicate records sharing one schema
///
/// A sample with zero records is a valid placeholder: it keeps its name and
/// schema so downstream consumers still see a structurally complete table.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "SampleDef")]
pub struct Sample {
    name: String,
    schema: Schema,
    records: Vec<ReplicateRecord>,
}

#[derive(Deserialize)]
struct SampleDef {
    name: String,
    schema: Schema,
    #[serde(default)]
    records: Vec<ReplicateRecord>,
}

impl TryFrom<SampleDef> for Sample {
    type Error = SchemaError;

    fn try_from(def: SampleDef) -> Result<Self, Self::Error> {
        Sample::new(def.name, def.schema, def.records)
    }
}

impl Sample {
    /// Create a sample, checking every record against `schema`
    pub fn new(
        name: impl Into<String>,
        schema: Schema,
        records: Vec<ReplicateRecord>,
    ) -> Result<Self, SchemaError> {
        let name = name.into();
        for record in &records {
            schema.check_record(&name, record)?;
        }
        Ok(Self {
            name,
            schema,
            records,
        })
    }

    /// Create a sample whose schema is inferred from its first record
    ///
    /// An empty `records` yields a sample with the default schema.
    pub fn from_records(
        name: impl Into<String>,
        records: Vec<ReplicateRecord>,
    ) -> Result<Self, SchemaError> {
        let schema = match records.first() {
            Some(first) => Schema::infer(super::DEFAULT_CONTROL_FIELD, first)?,
            None => Schema::default(),
        };
        Self::new(name, schema, records)
    }

    /// Zero-record sample carrying `schema`
    pub fn empty(name: impl Into<String>, schema: Schema) -> Self {
        Self {
            name: name.into(),
            schema,
            records: Vec::new(),
        }
    }

    /// Append a record after checking it against the schema
    pub fn push(&mut self, record: ReplicateRecord) -> Result<(), SchemaError> {
        self.schema.check_record(&self.name, &record)?;
        self.records.push(record);
        Ok(())
    }

    /// Sample name
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Field layout of the records
    pub fn schema(&self) -> &Schema {
        &self.schema
    }

    /// Records in replicate order
    pub fn records(&self) -> &[ReplicateRecord] {
        &self.records
    }

    /// Number of replicate records
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// True when the sample holds no records
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Control-channel values in replicate order
    pub fn control_values(&self) -> impl Iterator<Item = f64> + '_ {
        self.records.iter().map(|r| r.orange)
    }

    /// Copy of this sample with no records, same name and schema
    pub fn placeholder(&self) -> Self {
        Self::empty(self.name.clone(), self.schema.clone())
    }

    /// Copy of this sample keeping only records matching `keep`
    pub fn retain_records<F>(&self, mut keep: F) -> Self
    where
        F: FnMut(&ReplicateRecord) -> bool,
    {
        Self {
            name: self.name.clone(),
            schema: self.schema.clone(),
            records: self.records.iter().filter(|r| keep(r)).cloned().collect(),
        }
    }
}
