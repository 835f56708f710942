//! Field readers that walk an untyped JSON object and record violations.
//!
//! Every reader method either returns the typed value or records why it
//! could not, then returns `None`. Callers read all of a schema's fields
//! before combining them so one pass reports every violation.

use serde_json::{Map, Value};

use super::options::{UnknownFieldPolicy, ValidationOptions};
use super::path::FieldPath;
use super::range::Range;
use super::violation::{ExpectedType, ValidationErrors, Violation, ViolationKind};
use crate::schema::Schema;

/// Accumulates violations for one validation call.
#[derive(Debug)]
pub struct Collector {
    errors: ValidationErrors,
    options: ValidationOptions,
}

impl Collector {
    pub fn new(options: ValidationOptions) -> Self {
        Self {
            errors: ValidationErrors::new(),
            options,
        }
    }

    pub fn report(&mut self, path: FieldPath, kind: ViolationKind) {
        self.errors.push(Violation::new(path, kind));
    }

    pub fn finish(self) -> ValidationErrors {
        self.errors
    }
}

/// Read `value` as an object of schema `T` located at `path`.
pub fn read_object<T: Schema>(
    value: &Value,
    path: FieldPath,
    collector: &mut Collector,
) -> Option<T> {
    let Some(map) = value.as_object() else {
        collector.report(path, mismatch(ExpectedType::Object, value));
        return None;
    };
    let mut reader = ObjectReader {
        map,
        path,
        collector,
    };
    let parsed = T::read(&mut reader);
    reader.check_unknown(T::FIELDS);
    parsed
}

/// Reads the declared fields of one JSON object.
pub struct ObjectReader<'v, 'c> {
    map: &'v Map<String, Value>,
    path: FieldPath,
    collector: &'c mut Collector,
}

impl<'v> ObjectReader<'v, '_> {
    pub fn path(&self) -> &FieldPath {
        &self.path
    }

    /// Required string field.
    pub fn string(&mut self, name: &str) -> Option<String> {
        let value = self.required(name)?;
        match value.as_str() {
            Some(s) => Some(s.to_string()),
            None => {
                self.report(name, mismatch(ExpectedType::String, value));
                None
            }
        }
    }

    /// Required float field. JSON integers are accepted as floats.
    pub fn float(&mut self, name: &str) -> Option<f64> {
        let value = self.required(name)?;
        match value.as_f64() {
            Some(n) => Some(n),
            None => {
                self.report(name, mismatch(ExpectedType::Float, value));
                None
            }
        }
    }

    /// Required float field that must also fall inside `range`.
    pub fn bounded_float(&mut self, name: &str, range: Range) -> Option<f64> {
        let n = self.float(name)?;
        match range.check(n) {
            None => Some(n),
            Some(violation) => {
                self.report(name, violation);
                None
            }
        }
    }

    /// Required integer field. Integral floats such as `5.0` are accepted.
    pub fn integer(&mut self, name: &str) -> Option<i64> {
        let value = self.required(name)?;
        match as_integer(value) {
            Some(n) => Some(n),
            None => {
                self.report(name, mismatch(ExpectedType::Integer, value));
                None
            }
        }
    }

    /// Required list of floats; each element is checked independently.
    pub fn float_list(&mut self, name: &str) -> Option<Vec<f64>> {
        let value = self.required(name)?;
        self.read_float_list(name, value)
    }

    /// List of floats that may be absent. The outer `None` means the field
    /// was present but invalid.
    pub fn optional_float_list(&mut self, name: &str) -> Option<Option<Vec<f64>>> {
        match self.map.get(name) {
            None => Some(None),
            Some(value) => self.read_float_list(name, value).map(Some),
        }
    }

    /// Required nested object of schema `T`.
    pub fn nested<T: Schema>(&mut self, name: &str) -> Option<T> {
        let value = self.required(name)?;
        read_object(value, self.path.field(name), self.collector)
    }

    /// Required list of nested objects of schema `T`.
    pub fn nested_list<T: Schema>(&mut self, name: &str) -> Option<Vec<T>> {
        let value = self.required(name)?;
        let Some(items) = value.as_array() else {
            self.report(name, mismatch(ExpectedType::List, value));
            return None;
        };
        let list_path = self.path.field(name);
        let mut parsed = Vec::with_capacity(items.len());
        let mut complete = true;
        for (index, item) in items.iter().enumerate() {
            match read_object(item, list_path.index(index), self.collector) {
                Some(entry) => parsed.push(entry),
                None => complete = false,
            }
        }
        complete.then_some(parsed)
    }

    fn read_float_list(&mut self, name: &str, value: &Value) -> Option<Vec<f64>> {
        let Some(items) = value.as_array() else {
            self.report(name, mismatch(ExpectedType::List, value));
            return None;
        };
        let list_path = self.path.field(name);
        let mut parsed = Vec::with_capacity(items.len());
        let mut complete = true;
        for (index, item) in items.iter().enumerate() {
            match item.as_f64() {
                Some(n) => parsed.push(n),
                None => {
                    complete = false;
                    self.collector.report(
                        list_path.index(index),
                        mismatch(ExpectedType::Float, item),
                    );
                }
            }
        }
        complete.then_some(parsed)
    }

    fn required(&mut self, name: &str) -> Option<&'v Value> {
        let map = self.map;
        let value = map.get(name);
        if value.is_none() {
            self.report(name, ViolationKind::MissingField);
        }
        value
    }

    fn report(&mut self, name: &str, kind: ViolationKind) {
        self.collector.report(self.path.field(name), kind);
    }

    fn check_unknown(&mut self, declared: &[&str]) {
        if self.collector.options.unknown_fields == UnknownFieldPolicy::Exclude {
            return;
        }
        let map = self.map;
        for key in map.keys() {
            if !declared.contains(&key.as_str()) {
                self.report(key, ViolationKind::UnknownField);
            }
        }
    }
}

fn mismatch(expected: ExpectedType, actual: &Value) -> ViolationKind {
    ViolationKind::TypeMismatch {
        expected,
        actual: actual.clone(),
    }
}

fn as_integer(value: &Value) -> Option<i64> {
    if let Some(n) = value.as_i64() {
        return Some(n);
    }
    let f = value.as_f64()?;
    // i64::MAX as f64 rounds up to 2^63, so the upper bound is exclusive.
    if f.fract() == 0.0 && f >= i64::MIN as f64 && f < i64::MAX as f64 {
        Some(f as i64)
    } else {
        None
    }
}
