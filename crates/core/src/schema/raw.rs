//! Raw metric inputs, one schema per measure calculation.

use serde::{Deserialize, Serialize};

use super::Schema;
use crate::validation::reader::ObjectReader;

/// Input of `calculate_em1`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NonComplexFileDensity {
    pub complexity: Vec<f64>,
    pub functions: Vec<f64>,
}

impl Schema for NonComplexFileDensity {
    const NAME: &'static str = "NonComplexFileDensity";
    const FIELDS: &'static [&'static str] = &["complexity", "functions"];

    fn read(reader: &mut ObjectReader<'_, '_>) -> Option<Self> {
        let complexity = reader.float_list("complexity");
        let functions = reader.float_list("functions");
        Some(Self {
            complexity: complexity?,
            functions: functions?,
        })
    }
}

/// Input of `calculate_em2`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CommentedFileDensity {
    pub comment_lines_density: Vec<f64>,
}

impl Schema for CommentedFileDensity {
    const NAME: &'static str = "CommentedFileDensity";
    const FIELDS: &'static [&'static str] = &["comment_lines_density"];

    fn read(reader: &mut ObjectReader<'_, '_>) -> Option<Self> {
        let comment_lines_density = reader.float_list("comment_lines_density");
        Some(Self {
            comment_lines_density: comment_lines_density?,
        })
    }
}

/// Input of `calculate_em3`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DuplicationAbsence {
    pub duplicated_lines_density: Vec<f64>,
}

impl Schema for DuplicationAbsence {
    const NAME: &'static str = "DuplicationAbsence";
    const FIELDS: &'static [&'static str] = &["duplicated_lines_density"];

    fn read(reader: &mut ObjectReader<'_, '_>) -> Option<Self> {
        let duplicated_lines_density = reader.float_list("duplicated_lines_density");
        Some(Self {
            duplicated_lines_density: duplicated_lines_density?,
        })
    }
}

/// Input of `calculate_em4`. Error and failure counts are totals, not
/// series.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PassedTests {
    pub tests: Vec<f64>,
    pub test_errors: f64,
    pub test_failures: f64,
}

impl Schema for PassedTests {
    const NAME: &'static str = "PassedTests";
    const FIELDS: &'static [&'static str] = &["tests", "test_errors", "test_failures"];

    fn read(reader: &mut ObjectReader<'_, '_>) -> Option<Self> {
        let tests = reader.float_list("tests");
        let test_errors = reader.float("test_errors");
        let test_failures = reader.float("test_failures");
        Some(Self {
            tests: tests?,
            test_errors: test_errors?,
            test_failures: test_failures?,
        })
    }
}

/// Input of `calculate_em5`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TestBuilds {
    pub test_execution_time: Vec<f64>,
    pub tests: Vec<f64>,
}

impl Schema for TestBuilds {
    const NAME: &'static str = "TestBuilds";
    const FIELDS: &'static [&'static str] = &["test_execution_time", "tests"];

    fn read(reader: &mut ObjectReader<'_, '_>) -> Option<Self> {
        let test_execution_time = reader.float_list("test_execution_time");
        let tests = reader.float_list("tests");
        Some(Self {
            test_execution_time: test_execution_time?,
            tests: tests?,
        })
    }
}

/// Input of `calculate_em6`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TestCoverage {
    pub coverage: Vec<f64>,
}

impl Schema for TestCoverage {
    const NAME: &'static str = "TestCoverage";
    const FIELDS: &'static [&'static str] = &["coverage"];

    fn read(reader: &mut ObjectReader<'_, '_>) -> Option<Self> {
        let coverage = reader.float_list("coverage");
        Some(Self {
            coverage: coverage?,
        })
    }
}

/// Input of `calculate_em7`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TeamThroughput {
    pub total_issues: i64,
    pub resolved_issues: i64,
}

impl Schema for TeamThroughput {
    const NAME: &'static str = "TeamThroughput";
    const FIELDS: &'static [&'static str] = &["total_issues", "resolved_issues"];

    fn read(reader: &mut ObjectReader<'_, '_>) -> Option<Self> {
        let total_issues = reader.integer("total_issues");
        let resolved_issues = reader.integer("resolved_issues");
        Some(Self {
            total_issues: total_issues?,
            resolved_issues: resolved_issues?,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::validation::{validate, ExpectedType, ViolationKind};
    use assert_matches::assert_matches;
    use serde_json::json;

    #[test]
    fn passed_tests_takes_series_and_totals() {
        let input: PassedTests = validate(&json!({
            "tests": [10.0, 12.0], "test_errors": 3, "test_failures": 1.0
        }))
        .unwrap();
        assert_eq!(input.tests, vec![10.0, 12.0]);
        assert_eq!(input.test_errors, 3.0);
        assert_eq!(input.test_failures, 1.0);
    }

    #[test]
    fn passed_tests_rejects_series_for_totals() {
        let errors = validate::<PassedTests>(&json!({
            "tests": [10.0], "test_errors": [3.0], "test_failures": 1.0
        }))
        .unwrap_err();
        assert_eq!(errors.paths(), vec!["test_errors"]);
    }

    #[test]
    fn list_fields_reject_scalars() {
        let errors = validate::<TestCoverage>(&json!({"coverage": 80.0})).unwrap_err();
        assert_matches!(
            &errors.violations()[0].kind,
            ViolationKind::TypeMismatch { expected: ExpectedType::List, .. }
        );
    }

    #[test]
    fn every_raw_field_is_required() {
        let errors = validate::<NonComplexFileDensity>(&json!({})).unwrap_err();
        assert_eq!(errors.paths(), vec!["complexity", "functions"]);
        let errors = validate::<TestBuilds>(&json!({"tests": [1.0]})).unwrap_err();
        assert_eq!(errors.paths(), vec!["test_execution_time"]);
    }

    #[test]
    fn team_throughput_accepts_integral_floats() {
        let input: TeamThroughput =
            validate(&json!({"total_issues": 20.0, "resolved_issues": 7})).unwrap();
        assert_eq!(
            input,
            TeamThroughput {
                total_issues: 20,
                resolved_issues: 7
            }
        );
    }

    #[test]
    fn team_throughput_rejects_fractions() {
        let errors =
            validate::<TeamThroughput>(&json!({"total_issues": 20.5, "resolved_issues": "7"}))
                .unwrap_err();
        assert_eq!(errors.len(), 2);
        assert!(errors.iter().all(|v| matches!(
            v.kind,
            ViolationKind::TypeMismatch { expected: ExpectedType::Integer, .. }
        )));
    }

    #[test]
    fn team_throughput_names_the_integer_width() {
        let errors = validate::<TeamThroughput>(&json!({
            "total_issues": u64::MAX, "resolved_issues": 1
        }))
        .unwrap_err();
        assert_eq!(errors.paths(), vec!["total_issues"]);
        assert_eq!(
            errors.violations()[0].message,
            "Not a valid 64-bit signed integer; got 18446744073709551615."
        );
    }
}
