//! Input validation engine.
//!
//! Walks a decoded JSON value against a [`Schema`], collecting every
//! missing field, type mismatch, range violation and unknown field in one
//! pass. Pure logic: no I/O, no state kept between calls.

pub mod options;
pub mod path;
pub mod range;
pub mod reader;
pub mod violation;

use serde_json::Value;

use crate::error::CoreError;
use crate::schema::Schema;

pub use options::{UnknownFieldPolicy, ValidationOptions};
pub use path::{FieldPath, PathSegment};
pub use violation::{ExpectedType, RangeBound, ValidationErrors, Violation, ViolationKind};

use reader::{read_object, Collector};

/// Validate `value` as schema `T` with default options.
pub fn validate<T: Schema>(value: &Value) -> Result<T, ValidationErrors> {
    validate_with(value, &ValidationOptions::default())
}

/// Validate `value` as schema `T`.
///
/// Returns the typed value, or every violation found.
pub fn validate_with<T: Schema>(
    value: &Value,
    options: &ValidationOptions,
) -> Result<T, ValidationErrors> {
    let mut collector = Collector::new(*options);
    let parsed = read_object::<T>(value, FieldPath::root(), &mut collector);
    let errors = collector.finish();

    match parsed {
        Some(parsed) if errors.is_empty() => {
            tracing::trace!(schema = T::NAME, "Payload accepted");
            Ok(parsed)
        }
        _ => {
            debug_assert!(!errors.is_empty(), "rejected payload without violations");
            tracing::debug!(
                schema = T::NAME,
                violations = errors.len(),
                "Payload rejected"
            );
            Err(errors)
        }
    }
}

/// Decode `json` and validate it as schema `T`.
pub fn validate_str<T: Schema>(json: &str, options: &ValidationOptions) -> Result<T, CoreError> {
    let value: Value = serde_json::from_str(json)?;
    validate_with(&value, options).map_err(|errors| CoreError::Validation {
        schema: T::NAME,
        errors,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schema::hierarchy::CalculateTsqmiRequest;
    use assert_matches::assert_matches;

    #[test]
    fn validate_str_reports_malformed_json() {
        let result = validate_str::<CalculateTsqmiRequest>("{", &ValidationOptions::default());
        assert_matches!(result, Err(CoreError::MalformedJson(_)));
    }

    #[test]
    fn validate_str_wraps_violations_with_schema_name() {
        let result = validate_str::<CalculateTsqmiRequest>("{}", &ValidationOptions::default());
        assert_matches!(
            result,
            Err(CoreError::Validation { schema: "CalculateTSQMIRequest", ref errors })
                if errors.paths() == vec!["tsqmi"]
        );
    }

    #[test]
    fn non_object_root_is_a_type_mismatch() {
        let errors = validate::<CalculateTsqmiRequest>(&serde_json::json!("tsqmi")).unwrap_err();
        assert_eq!(errors.paths(), vec!["$"]);
        assert_matches!(
            errors.violations()[0].kind,
            ViolationKind::TypeMismatch { expected: ExpectedType::Object, .. }
        );
    }
}
