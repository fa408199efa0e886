use serde::{Deserialize, Serialize};
use std::collections::HashSet;

use super::{Sample, Schema, SchemaError};

/// One experimental run: named samples in insertion order
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "RunDef")]
pub struct Run {
    name: String,
    samples: Vec<Sample>,
}

#[derive(Deserialize)]
struct RunDef {
    name: String,
    #[serde(default)]
    samples: Vec<Sample>,
}

impl TryFrom<RunDef> for Run {
    type Error = SchemaError;

    fn try_from(def: RunDef) -> Result<Self, Self::Error> {
        Run::new(def.name, def.samples)
    }
}

impl Run {
    /// Create a run, checking name uniqueness and schema agreement
    pub fn new(name: impl Into<String>, samples: Vec<Sample>) -> Result<Self, SchemaError> {
        let name = name.into();

        let mut seen = HashSet::with_capacity(samples.len());
        for sample in &samples {
            if !seen.insert(sample.name()) {
                return Err(SchemaError::DuplicateSample {
                    run: name,
                    sample: sample.name().to_string(),
                });
            }
        }

        if let Some(first) = samples.first() {
            if let Some(other) = samples.iter().find(|s| s.schema() != first.schema()) {
                return Err(SchemaError::SchemaMismatch {
                    run: name,
                    sample: other.name().to_string(),
                });
            }
        }

        Ok(Self { name, samples })
    }

    /// Replace the samples of an already validated run.
    ///
    /// Callers must keep names and schemas identical to `self`.
    pub(crate) fn with_samples(&self, samples: Vec<Sample>) -> Self {
        debug_assert_eq!(samples.len(), self.samples.len());
        Self {
            name: self.name.clone(),
            samples,
        }
    }

    /// Run name
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Samples in insertion order
    pub fn samples(&self) -> &[Sample] {
        &self.samples
    }

    /// Look up a sample by name
    pub fn sample(&self, name: &str) -> Option<&Sample> {
        self.samples.iter().find(|s| s.name() == name)
    }

    /// Sample names in insertion order
    pub fn sample_names(&self) -> impl Iterator<Item = &str> + '_ {
        self.samples.iter().map(Sample::name)
    }

    /// Schema shared by every sample, if the run has any
    pub fn schema(&self) -> Option<&Schema> {
        self.samples.first().map(Sample::schema)
    }

    /// Number of samples
    pub fn len(&self) -> usize {
        self.samples.len()
    }

    /// True when the run holds no samples
    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }

    /// Total number of records across all samples
    pub fn record_count(&self) -> usize {
        self.samples.iter().map(Sample::len).sum()
    }

    /// Control values of every record of every sample
    pub fn pooled_control_values(&self) -> Vec<f64> {
        let mut pooled = Vec::with_capacity(self.record_count());
        for sample in &self.samples {
            pooled.extend(sample.control_values());
        }
        pooled
    }
}

/// Ordered sequence of independently processed runs
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RunCollection {
    runs: Vec<Run>,
}

impl RunCollection {
    /// Wrap runs in their processing order
    pub fn new(runs: Vec<Run>) -> Self {
        Self { runs }
    }

    /// Append a run
    pub fn push(&mut self, run: Run) {
        self.runs.push(run);
    }

    /// Runs in order
    pub fn runs(&self) -> &[Run] {
        &self.runs
    }

    /// Iterate over runs in order
    pub fn iter(&self) -> std::slice::Iter<'_, Run> {
        self.runs.iter()
    }

    /// Number of runs
    pub fn len(&self) -> usize {
        self.runs.len()
    }

    /// True when the collection holds no runs
    pub fn is_empty(&self) -> bool {
        self.runs.is_empty()
    }

    /// Unwrap into the underlying vector
    pub fn into_runs(self) -> Vec<Run> {
        self.runs
    }
}

impl FromIterator<Run> for RunCollection {
    fn from_iter<I: IntoIterator<Item = Run>>(iter: I) -> Self {
        Self {
            runs: iter.into_iter().collect(),
        }
    }
}

impl<'a> IntoIterator for &'a RunCollection {
    type Item = &'a Run;
    type IntoIter = std::slice::Iter<'a, Run>;

    fn into_iter(self) -> Self::IntoIter {
        self.runs.iter()
    }
}

impl IntoIterator for RunCollection {
    type Item = Run;
    type IntoIter = std::vec::IntoIter<Run>;

    fn into_iter(self) -> Self::IntoIter {
        self.runs.into_iter()
    }
}
