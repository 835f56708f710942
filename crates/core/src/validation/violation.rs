//! Violation types and the accumulated error collection.

use std::fmt;

use serde::Serialize;
use serde_json::{Map, Value};

use super::path::{FieldPath, PathSegment};

/// Key under which messages about a whole object are reported in
/// [`ValidationErrors::to_messages`].
pub const SCHEMA_KEY: &str = "_schema";

/// JSON type a field was declared with.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ExpectedType {
    String,
    Float,
    Integer,
    List,
    Object,
}

impl ExpectedType {
    fn noun(self) -> &'static str {
        match self {
            ExpectedType::String => "string",
            ExpectedType::Float => "number",
            ExpectedType::Integer => "64-bit signed integer",
            ExpectedType::List => "list",
            ExpectedType::Object => "object",
        }
    }
}

impl fmt::Display for ExpectedType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            ExpectedType::String => "string",
            ExpectedType::Float => "float",
            ExpectedType::Integer => "integer",
            ExpectedType::List => "list",
            ExpectedType::Object => "object",
        };
        f.write_str(name)
    }
}

/// The bound a numeric value fell outside of.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum RangeBound {
    Min(f64),
    Max(f64),
}

/// What went wrong at a path.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ViolationKind {
    MissingField,
    TypeMismatch {
        expected: ExpectedType,
        actual: Value,
    },
    RangeViolation {
        value: f64,
        min: f64,
        max: f64,
        bound: RangeBound,
    },
    UnknownField,
}

impl ViolationKind {
    /// Short machine-readable reason.
    pub fn code(&self) -> &'static str {
        match self {
            ViolationKind::MissingField => "required",
            ViolationKind::TypeMismatch { .. } => "type",
            ViolationKind::RangeViolation { .. } => "range",
            ViolationKind::UnknownField => "unknown",
        }
    }

    fn message(&self) -> String {
        match self {
            ViolationKind::MissingField => "Missing data for required field.".to_string(),
            ViolationKind::TypeMismatch { actual, .. } if actual.is_null() => {
                "Field may not be null.".to_string()
            }
            ViolationKind::TypeMismatch { expected, actual } => {
                format!("Not a valid {}; got {actual}.", expected.noun())
            }
            ViolationKind::RangeViolation {
                value, min, max, ..
            } => format!(
                "Must be greater than or equal to {min} and less than or equal to {max}; got {value}."
            ),
            ViolationKind::UnknownField => "Unknown field.".to_string(),
        }
    }
}

/// A single field-level violation.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Violation {
    pub path: FieldPath,
    #[serde(flatten)]
    pub kind: ViolationKind,
    pub message: String,
}

impl Violation {
    pub fn new(path: FieldPath, kind: ViolationKind) -> Self {
        let message = kind.message();
        Self {
            path,
            kind,
            message,
        }
    }
}

impl fmt::Display for Violation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.path, self.message)
    }
}

/// Every violation found while validating one payload, in the order the
/// validator encountered them.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(transparent)]
pub struct ValidationErrors {
    violations: Vec<Violation>,
}

impl ValidationErrors {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, violation: Violation) {
        self.violations.push(violation);
    }

    pub fn is_empty(&self) -> bool {
        self.violations.is_empty()
    }

    pub fn len(&self) -> usize {
        self.violations.len()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Violation> {
        self.violations.iter()
    }

    pub fn violations(&self) -> &[Violation] {
        &self.violations
    }

    /// Rendered paths of all violations, e.g. `["tsqmi.key"]`.
    pub fn paths(&self) -> Vec<String> {
        self.violations.iter().map(|v| v.path.to_string()).collect()
    }

    /// Render as a nested map keyed by path segment, with list indices as
    /// decimal strings and message lists at the leaves.
    ///
    /// ```text
    /// {"measures": {"0": {"key": ["Missing data for required field."]}}}
    /// ```
    pub fn to_messages(&self) -> Value {
        let mut root = Map::new();
        for violation in &self.violations {
            insert_message(&mut root, violation.path.segments(), &violation.message);
        }
        Value::Object(root)
    }
}

impl fmt::Display for ValidationErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, violation) in self.violations.iter().enumerate() {
            if i > 0 {
                f.write_str("; ")?;
            }
            write!(f, "{violation}")?;
        }
        Ok(())
    }
}

impl std::error::Error for ValidationErrors {}

impl IntoIterator for ValidationErrors {
    type Item = Violation;
    type IntoIter = std::vec::IntoIter<Violation>;

    fn into_iter(self) -> Self::IntoIter {
        self.violations.into_iter()
    }
}

impl<'a> IntoIterator for &'a ValidationErrors {
    type Item = &'a Violation;
    type IntoIter = std::slice::Iter<'a, Violation>;

    fn into_iter(self) -> Self::IntoIter {
        self.violations.iter()
    }
}

fn segment_key(segment: &PathSegment) -> String {
    match segment {
        PathSegment::Field(name) => name.clone(),
        PathSegment::Index(index) => index.to_string(),
    }
}

fn insert_message(node: &mut Map<String, Value>, segments: &[PathSegment], message: &str) {
    match segments.split_first() {
        None => push_message(node, SCHEMA_KEY.to_string(), message),
        Some((head, [])) => push_message(node, segment_key(head), message),
        Some((head, rest)) => {
            let child = node
                .entry(segment_key(head))
                .or_insert_with(|| Value::Object(Map::new()));
            // A leaf that now gains children keeps its own messages under `_schema`.
            if child.is_array() {
                let messages = child.take();
                let mut map = Map::new();
                map.insert(SCHEMA_KEY.to_string(), messages);
                *child = Value::Object(map);
            }
            if let Value::Object(map) = child {
                insert_message(map, rest, message);
            }
        }
    }
}

fn push_message(node: &mut Map<String, Value>, key: String, message: &str) {
    match node.entry(key).or_insert_with(|| Value::Array(Vec::new())) {
        Value::Array(messages) => messages.push(Value::String(message.to_string())),
        Value::Object(map) => push_message(map, SCHEMA_KEY.to_string(), message),
        _ => {}
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn missing(path: FieldPath) -> Violation {
        Violation::new(path, ViolationKind::MissingField)
    }

    #[test]
    fn messages_follow_kind() {
        let root = FieldPath::root();
        assert_eq!(
            missing(root.field("key")).message,
            "Missing data for required field."
        );
        let mismatch = Violation::new(
            root.field("value"),
            ViolationKind::TypeMismatch {
                expected: ExpectedType::Float,
                actual: json!("abc"),
            },
        );
        assert_eq!(mismatch.message, "Not a valid number; got \"abc\".");
        let null = Violation::new(
            root.field("value"),
            ViolationKind::TypeMismatch {
                expected: ExpectedType::Float,
                actual: Value::Null,
            },
        );
        assert_eq!(null.message, "Field may not be null.");
        let range = Violation::new(
            root.field("weight"),
            ViolationKind::RangeViolation {
                value: 133.0,
                min: 0.0,
                max: 100.0,
                bound: RangeBound::Max(100.0),
            },
        );
        assert_eq!(
            range.message,
            "Must be greater than or equal to 0 and less than or equal to 100; got 133."
        );
    }

    #[test]
    fn codes_name_the_reason() {
        assert_eq!(ViolationKind::MissingField.code(), "required");
        assert_eq!(ViolationKind::UnknownField.code(), "unknown");
    }

    #[test]
    fn display_joins_path_and_message() {
        let mut errors = ValidationErrors::new();
        errors.push(missing(FieldPath::root().field("tsqmi")));
        errors.push(Violation::new(
            FieldPath::root().field("extra"),
            ViolationKind::UnknownField,
        ));
        assert_eq!(
            errors.to_string(),
            "tsqmi: Missing data for required field.; extra: Unknown field."
        );
    }

    #[test]
    fn serializes_flat_with_kind_tag() {
        let violation = Violation::new(
            FieldPath::root().field("measures").index(0).field("weight"),
            ViolationKind::RangeViolation {
                value: -1.0,
                min: 0.0,
                max: 100.0,
                bound: RangeBound::Min(0.0),
            },
        );
        let value = serde_json::to_value(&violation).unwrap();
        assert_eq!(value["path"], "measures[0].weight");
        assert_eq!(value["kind"], "range_violation");
        assert_eq!(value["bound"], json!({"min": 0.0}));
        assert_eq!(value["value"], -1.0);
    }

    #[test]
    fn messages_nest_by_segment() {
        let mut errors = ValidationErrors::new();
        let measure = FieldPath::root().field("measures").index(0);
        errors.push(missing(measure.field("key")));
        errors.push(missing(measure.field("metrics").index(2).field("key")));
        assert_eq!(
            errors.to_messages(),
            json!({
                "measures": {
                    "0": {
                        "key": ["Missing data for required field."],
                        "metrics": {"2": {"key": ["Missing data for required field."]}}
                    }
                }
            })
        );
    }

    #[test]
    fn root_messages_go_under_schema_key() {
        let mut errors = ValidationErrors::new();
        errors.push(Violation::new(
            FieldPath::root(),
            ViolationKind::TypeMismatch {
                expected: ExpectedType::Object,
                actual: json!([1]),
            },
        ));
        assert_eq!(
            errors.to_messages(),
            json!({"_schema": ["Not a valid object; got [1]."]})
        );
    }

    #[test]
    fn leaf_with_children_keeps_messages() {
        let mut errors = ValidationErrors::new();
        let tsqmi = FieldPath::root().field("tsqmi");
        errors.push(missing(tsqmi.clone()));
        errors.push(missing(tsqmi.field("key")));
        assert_eq!(
            errors.to_messages(),
            json!({
                "tsqmi": {
                    "_schema": ["Missing data for required field."],
                    "key": ["Missing data for required field."]
                }
            })
        );
    }
}
