//! Quality-model request bodies, from raw metric series up to the TSQMI root.

use serde::{Deserialize, Serialize};

use super::Schema;
use crate::validation::range::{UNIT_RANGE, WEIGHT_RANGE};
use crate::validation::reader::ObjectReader;
use crate::validation::{FieldPath, ValidationErrors, Violation};

/// A raw named numeric series, e.g. per-file test counts.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Metric {
    pub key: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub value: Option<Vec<f64>>,
}

impl Schema for Metric {
    const NAME: &'static str = "Metric";
    const FIELDS: &'static [&'static str] = &["key", "value"];

    fn read(reader: &mut ObjectReader<'_, '_>) -> Option<Self> {
        let key = reader.string("key");
        let value = reader.optional_float_list("value");
        Some(Self {
            key: key?,
            value: value?,
        })
    }
}

/// A named group of raw metrics feeding one calculation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Measure {
    pub key: String,
    pub metrics: Vec<Metric>,
}

impl Measure {
    /// Look up a metric series by key.
    pub fn metric(&self, key: &str) -> Option<&Metric> {
        self.metrics.iter().find(|m| m.key == key)
    }
}

impl Schema for Measure {
    const NAME: &'static str = "Measure";
    const FIELDS: &'static [&'static str] = &["key", "metrics"];

    fn read(reader: &mut ObjectReader<'_, '_>) -> Option<Self> {
        let key = reader.string("key");
        let metrics = reader.nested_list("metrics");
        Some(Self {
            key: key?,
            metrics: metrics?,
        })
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CalculateMeasureRequest {
    pub measures: Vec<Measure>,
}

impl Schema for CalculateMeasureRequest {
    const NAME: &'static str = "CalculateMeasureRequest";
    const FIELDS: &'static [&'static str] = &["measures"];

    fn read(reader: &mut ObjectReader<'_, '_>) -> Option<Self> {
        let measures = reader.nested_list("measures");
        Some(Self {
            measures: measures?,
        })
    }
}

/// A child score already calculated one level down, with its weight in the
/// parent.
///
/// `value` is a normalized score in `[0, 1]`; `weight` is in `[0, 100]`.
/// Only [`CalculatedSubEntity::new`] and schema validation check those
/// ranges; `Deserialize` and struct literals do not.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CalculatedSubEntity {
    pub key: String,
    pub value: f64,
    pub weight: f64,
}

impl CalculatedSubEntity {
    /// Build an entity, applying the same range rules as request validation.
    pub fn new(key: impl Into<String>, value: f64, weight: f64) -> Result<Self, ValidationErrors> {
        let root = FieldPath::root();
        let mut errors = ValidationErrors::new();
        if let Some(violation) = UNIT_RANGE.check(value) {
            errors.push(Violation::new(root.field("value"), violation));
        }
        if let Some(violation) = WEIGHT_RANGE.check(weight) {
            errors.push(Violation::new(root.field("weight"), violation));
        }
        if !errors.is_empty() {
            return Err(errors);
        }
        Ok(Self {
            key: key.into(),
            value,
            weight,
        })
    }
}

impl Schema for CalculatedSubEntity {
    const NAME: &'static str = "CalculatedSubEntity";
    const FIELDS: &'static [&'static str] = &["key", "value", "weight"];

    fn read(reader: &mut ObjectReader<'_, '_>) -> Option<Self> {
        let key = reader.string("key");
        let value = reader.bounded_float("value", UNIT_RANGE);
        let weight = reader.bounded_float("weight", WEIGHT_RANGE);
        Some(Self {
            key: key?,
            value: value?,
            weight: weight?,
        })
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SubCharacteristic {
    pub key: String,
    pub measures: Vec<CalculatedSubEntity>,
}

impl Schema for SubCharacteristic {
    const NAME: &'static str = "SubCharacteristic";
    const FIELDS: &'static [&'static str] = &["key", "measures"];

    fn read(reader: &mut ObjectReader<'_, '_>) -> Option<Self> {
        let key = reader.string("key");
        let measures = reader.nested_list("measures");
        Some(Self {
            key: key?,
            measures: measures?,
        })
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CalculateSubCharacteristicRequest {
    pub subcharacteristics: Vec<SubCharacteristic>,
}

impl Schema for CalculateSubCharacteristicRequest {
    const NAME: &'static str = "CalculateSubCharacteristicRequest";
    const FIELDS: &'static [&'static str] = &["subcharacteristics"];

    fn read(reader: &mut ObjectReader<'_, '_>) -> Option<Self> {
        let subcharacteristics = reader.nested_list("subcharacteristics");
        Some(Self {
            subcharacteristics: subcharacteristics?,
        })
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Characteristic {
    pub key: String,
    pub subcharacteristics: Vec<CalculatedSubEntity>,
}

impl Schema for Characteristic {
    const NAME: &'static str = "Characteristic";
    const FIELDS: &'static [&'static str] = &["key", "subcharacteristics"];

    fn read(reader: &mut ObjectReader<'_, '_>) -> Option<Self> {
        let key = reader.string("key");
        let subcharacteristics = reader.nested_list("subcharacteristics");
        Some(Self {
            key: key?,
            subcharacteristics: subcharacteristics?,
        })
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CalculateCharacteristicRequest {
    pub characteristics: Vec<Characteristic>,
}

impl Schema for CalculateCharacteristicRequest {
    const NAME: &'static str = "CalculateCharacteristicRequest";
    const FIELDS: &'static [&'static str] = &["characteristics"];

    fn read(reader: &mut ObjectReader<'_, '_>) -> Option<Self> {
        let characteristics = reader.nested_list("characteristics");
        Some(Self {
            characteristics: characteristics?,
        })
    }
}

/// The root of the quality model: characteristics weighted into one index.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Tsqmi {
    pub key: String,
    pub characteristics: Vec<CalculatedSubEntity>,
}

impl Schema for Tsqmi {
    const NAME: &'static str = "TSQMI";
    const FIELDS: &'static [&'static str] = &["key", "characteristics"];

    fn read(reader: &mut ObjectReader<'_, '_>) -> Option<Self> {
        let key = reader.string("key");
        let characteristics = reader.nested_list("characteristics");
        Some(Self {
            key: key?,
            characteristics: characteristics?,
        })
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CalculateTsqmiRequest {
    pub tsqmi: Tsqmi,
}

impl Schema for CalculateTsqmiRequest {
    const NAME: &'static str = "CalculateTSQMIRequest";
    const FIELDS: &'static [&'static str] = &["tsqmi"];

    fn read(reader: &mut ObjectReader<'_, '_>) -> Option<Self> {
        let tsqmi = reader.nested("tsqmi");
        Some(Self { tsqmi: tsqmi? })
    }
}
