//! Measures and recorded measurements.

use serde::{Deserialize, Serialize};

use crate::message::MeasurementValueType;

/// A named numeric quantity definition.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Measure {
    pub name: String,
    pub description: String,
    pub unit: String,
    pub value_type: MeasurementValueType,
}

impl Measure {
    /// Create an integer-valued measure.
    pub fn int(name: impl Into<String>) -> Self {
        Self::new(name, MeasurementValueType::Int)
    }

    /// Create a float-valued measure.
    pub fn float(name: impl Into<String>) -> Self {
        Self::new(name, MeasurementValueType::Float)
    }

    fn new(name: impl Into<String>, value_type: MeasurementValueType) -> Self {
        Self {
            name: name.into(),
            description: String::new(),
            unit: String::new(),
            value_type,
        }
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    pub fn with_unit(mut self, unit: impl Into<String>) -> Self {
        self.unit = unit.into();
        self
    }
}

/// A single recorded value.
///
/// `Unknown` carries no value bytes on the wire; the receiver infers the
/// absence from the type tag.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum MeasurementValue {
    Int(u64),
    Float(f64),
    Unknown,
}

impl From<u64> for MeasurementValue {
    fn from(value: u64) -> Self {
        MeasurementValue::Int(value)
    }
}

impl From<f64> for MeasurementValue {
    fn from(value: f64) -> Self {
        MeasurementValue::Float(value)
    }
}

impl MeasurementValue {
    pub fn value_type(&self) -> MeasurementValueType {
        match self {
            MeasurementValue::Int(_) => MeasurementValueType::Int,
            MeasurementValue::Float(_) => MeasurementValueType::Float,
            MeasurementValue::Unknown => MeasurementValueType::Unknown,
        }
    }
}

/// One recorded value of a measure.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Measurement {
    pub measure_name: String,
    pub value: MeasurementValue,
}

impl Measurement {
    pub fn new(measure: &Measure, value: MeasurementValue) -> Self {
        Self {
            measure_name: measure.name.clone(),
            value,
        }
    }

    /// An integer measurement against the named measure.
    pub fn int(measure_name: impl Into<String>, value: u64) -> Self {
        Self {
            measure_name: measure_name.into(),
            value: MeasurementValue::Int(value),
        }
    }

    /// A float measurement against the named measure.
    pub fn float(measure_name: impl Into<String>, value: f64) -> Self {
        Self {
            measure_name: measure_name.into(),
            value: MeasurementValue::Float(value),
        }
    }
}
