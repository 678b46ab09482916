//! Views and aggregations.

use serde::{Deserialize, Serialize};

/// A rule for combining measurements, identified on the wire by a numeric
/// type code.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Aggregation {
    Count,
    Sum,
    LastValue,
    /// Histogram aggregation over explicit bucket boundaries.
    ///
    /// Boundaries are encoded in the order supplied; monotonicity is not
    /// enforced.
    Distribution { bounds: Vec<f64> },
}

impl Aggregation {
    /// Numeric aggregation type code on the wire. Code 0 is reserved for
    /// unknown aggregations and is never emitted by this client.
    pub fn type_code(&self) -> u8 {
        match self {
            Aggregation::Count => 1,
            Aggregation::Sum => 2,
            Aggregation::Distribution { .. } => 3,
            Aggregation::LastValue => 4,
        }
    }

    /// Bucket boundaries for distribution aggregations, `None` otherwise.
    pub fn bucket_bounds(&self) -> Option<&[f64]> {
        match self {
            Aggregation::Distribution { bounds } => Some(bounds),
            _ => None,
        }
    }
}

/// A named aggregation over a measure, possibly filtered by tag keys.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct View {
    pub name: String,
    pub description: String,
    pub tag_keys: Vec<String>,
    pub measure_name: String,
    pub aggregation: Aggregation,
}

impl View {
    pub fn new(
        name: impl Into<String>,
        measure_name: impl Into<String>,
        aggregation: Aggregation,
    ) -> Self {
        Self {
            name: name.into(),
            description: String::new(),
            tag_keys: Vec::new(),
            measure_name: measure_name.into(),
            aggregation,
        }
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    pub fn with_tag_key(mut self, key: impl Into<String>) -> Self {
        self.tag_keys.push(key.into());
        self
    }
}
