//! Typed request schemas.
//!
//! [`hierarchy`] holds the quality-model request bodies (measures up to the
//! TSQMI root); [`raw`] holds the per-measure raw metric inputs.

pub mod hierarchy;
pub mod raw;

use std::fmt;
use std::str::FromStr;

use serde::Serialize;
use serde_json::Value;

use crate::error::CoreError;
use crate::validation::reader::ObjectReader;
use crate::validation::{validate_with, ValidationErrors, ValidationOptions};

use hierarchy::{
    CalculateCharacteristicRequest, CalculateMeasureRequest, CalculateSubCharacteristicRequest,
    CalculateTsqmiRequest,
};

/// A JSON object shape that can be read field by field.
pub trait Schema: Sized {
    /// Human-readable schema name, used in logs and errors.
    const NAME: &'static str;
    /// Every field the schema declares. Anything else is an unknown field.
    const FIELDS: &'static [&'static str];

    /// Read all declared fields, recording violations on the reader.
    ///
    /// Implementations must read every field before combining the results
    /// so that one call reports all violations.
    fn read(reader: &mut ObjectReader<'_, '_>) -> Option<Self>;
}

/// The four quality-model request bodies.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RequestKind {
    Measures,
    Subcharacteristics,
    Characteristics,
    Tsqmi,
}

impl RequestKind {
    pub const ALL: [RequestKind; 4] = [
        RequestKind::Measures,
        RequestKind::Subcharacteristics,
        RequestKind::Characteristics,
        RequestKind::Tsqmi,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            RequestKind::Measures => "measures",
            RequestKind::Subcharacteristics => "subcharacteristics",
            RequestKind::Characteristics => "characteristics",
            RequestKind::Tsqmi => "tsqmi",
        }
    }

    /// Validate `value` as this kind of request.
    pub fn validate(
        self,
        value: &Value,
        options: &ValidationOptions,
    ) -> Result<ValidatedRequest, ValidationErrors> {
        match self {
            RequestKind::Measures => {
                validate_with::<CalculateMeasureRequest>(value, options).map(ValidatedRequest::Measures)
            }
            RequestKind::Subcharacteristics => {
                validate_with::<CalculateSubCharacteristicRequest>(value, options)
                    .map(ValidatedRequest::Subcharacteristics)
            }
            RequestKind::Characteristics => {
                validate_with::<CalculateCharacteristicRequest>(value, options)
                    .map(ValidatedRequest::Characteristics)
            }
            RequestKind::Tsqmi => {
                validate_with::<CalculateTsqmiRequest>(value, options).map(ValidatedRequest::Tsqmi)
            }
        }
    }
}

impl fmt::Display for RequestKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for RequestKind {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|kind| kind.as_str() == s)
            .ok_or_else(|| {
                CoreError::InvalidOption(format!(
                    "unknown request kind '{s}', expected one of: measures, subcharacteristics, characteristics, tsqmi"
                ))
            })
    }
}

/// A request body that passed validation.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum ValidatedRequest {
    Measures(CalculateMeasureRequest),
    Subcharacteristics(CalculateSubCharacteristicRequest),
    Characteristics(CalculateCharacteristicRequest),
    Tsqmi(CalculateTsqmiRequest),
}
