//! Measure keys and the raw-metric schema each calculation consumes.
//!
//! Every measure of the quality model is computed by one external
//! calculation (`calculate_em1` .. `calculate_em7`) from a raw-metric
//! input. This module maps wire keys to those inputs and validates them.

use std::fmt;
use std::str::FromStr;

use serde::Serialize;
use serde_json::Value;

use crate::error::CoreError;
use crate::schema::raw::{
    CommentedFileDensity, DuplicationAbsence, NonComplexFileDensity, PassedTests,
    TeamThroughput, TestBuilds, TestCoverage,
};
use crate::schema::Schema;
use crate::validation::{validate_with, ValidationErrors, ValidationOptions};

// ---------------------------------------------------------------------------
// Measure keys
// ---------------------------------------------------------------------------

pub const MEASURE_NON_COMPLEX_FILE_DENSITY: &str = "non_complex_file_density";
pub const MEASURE_COMMENTED_FILE_DENSITY: &str = "commented_file_density";
/// Spelled as the pipeline sends it.
pub const MEASURE_DUPLICATION_ABSENCE: &str = "duplication_absense";
pub const MEASURE_PASSED_TESTS: &str = "passed_tests";
pub const MEASURE_TEST_BUILDS: &str = "test_builds";
pub const MEASURE_TEST_COVERAGE: &str = "test_coverage";
pub const MEASURE_TEAM_THROUGHPUT: &str = "team_throughput";

/// A measure with a known raw-metric input.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum MeasureKind {
    NonComplexFileDensity,
    CommentedFileDensity,
    DuplicationAbsence,
    PassedTests,
    TestBuilds,
    TestCoverage,
    TeamThroughput,
}

impl MeasureKind {
    /// All measures, in calculation order (em1 first).
    pub const ALL: [MeasureKind; 7] = [
        MeasureKind::NonComplexFileDensity,
        MeasureKind::CommentedFileDensity,
        MeasureKind::DuplicationAbsence,
        MeasureKind::PassedTests,
        MeasureKind::TestBuilds,
        MeasureKind::TestCoverage,
        MeasureKind::TeamThroughput,
    ];

    /// Resolve a wire key such as `passed_tests`.
    pub fn from_key(key: &str) -> Result<Self, CoreError> {
        Self::ALL
            .into_iter()
            .find(|kind| kind.key() == key)
            .ok_or_else(|| CoreError::UnknownMeasure(key.to_string()))
    }

    pub fn key(self) -> &'static str {
        match self {
            MeasureKind::NonComplexFileDensity => MEASURE_NON_COMPLEX_FILE_DENSITY,
            MeasureKind::CommentedFileDensity => MEASURE_COMMENTED_FILE_DENSITY,
            MeasureKind::DuplicationAbsence => MEASURE_DUPLICATION_ABSENCE,
            MeasureKind::PassedTests => MEASURE_PASSED_TESTS,
            MeasureKind::TestBuilds => MEASURE_TEST_BUILDS,
            MeasureKind::TestCoverage => MEASURE_TEST_COVERAGE,
            MeasureKind::TeamThroughput => MEASURE_TEAM_THROUGHPUT,
        }
    }

    /// Name of the external calculation fed by this measure's input.
    pub fn calculation(self) -> &'static str {
        match self {
            MeasureKind::NonComplexFileDensity => "calculate_em1",
            MeasureKind::CommentedFileDensity => "calculate_em2",
            MeasureKind::DuplicationAbsence => "calculate_em3",
            MeasureKind::PassedTests => "calculate_em4",
            MeasureKind::TestBuilds => "calculate_em5",
            MeasureKind::TestCoverage => "calculate_em6",
            MeasureKind::TeamThroughput => "calculate_em7",
        }
    }

    /// Field names of the raw-metric input.
    pub fn metric_keys(self) -> &'static [&'static str] {
        match self {
            MeasureKind::NonComplexFileDensity => NonComplexFileDensity::FIELDS,
            MeasureKind::CommentedFileDensity => CommentedFileDensity::FIELDS,
            MeasureKind::DuplicationAbsence => DuplicationAbsence::FIELDS,
            MeasureKind::PassedTests => PassedTests::FIELDS,
            MeasureKind::TestBuilds => TestBuilds::FIELDS,
            MeasureKind::TestCoverage => TestCoverage::FIELDS,
            MeasureKind::TeamThroughput => TeamThroughput::FIELDS,
        }
    }

    /// Name of the raw-metric schema.
    pub fn schema_name(self) -> &'static str {
        match self {
            MeasureKind::NonComplexFileDensity => NonComplexFileDensity::NAME,
            MeasureKind::CommentedFileDensity => CommentedFileDensity::NAME,
            MeasureKind::DuplicationAbsence => DuplicationAbsence::NAME,
            MeasureKind::PassedTests => PassedTests::NAME,
            MeasureKind::TestBuilds => TestBuilds::NAME,
            MeasureKind::TestCoverage => TestCoverage::NAME,
            MeasureKind::TeamThroughput => TeamThroughput::NAME,
        }
    }

    /// Validate `value` as this measure's raw-metric input.
    pub fn validate_input(
        self,
        value: &Value,
        options: &ValidationOptions,
    ) -> Result<RawMeasureInput, ValidationErrors> {
        let input = match self {
            MeasureKind::NonComplexFileDensity => {
                RawMeasureInput::NonComplexFileDensity(validate_with(value, options)?)
            }
            MeasureKind::CommentedFileDensity => {
                RawMeasureInput::CommentedFileDensity(validate_with(value, options)?)
            }
            MeasureKind::DuplicationAbsence => {
                RawMeasureInput::DuplicationAbsence(validate_with(value, options)?)
            }
            MeasureKind::PassedTests => RawMeasureInput::PassedTests(validate_with(value, options)?),
            MeasureKind::TestBuilds => RawMeasureInput::TestBuilds(validate_with(value, options)?),
            MeasureKind::TestCoverage => {
                RawMeasureInput::TestCoverage(validate_with(value, options)?)
            }
            MeasureKind::TeamThroughput => {
                RawMeasureInput::TeamThroughput(validate_with(value, options)?)
            }
        };
        Ok(input)
    }
}

impl fmt::Display for MeasureKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

impl FromStr for MeasureKind {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_key(s)
    }
}

/// A validated raw-metric input, tagged by the measure it belongs to.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum RawMeasureInput {
    NonComplexFileDensity(NonComplexFileDensity),
    CommentedFileDensity(CommentedFileDensity),
    DuplicationAbsence(DuplicationAbsence),
    PassedTests(PassedTests),
    TestBuilds(TestBuilds),
    TestCoverage(TestCoverage),
    TeamThroughput(TeamThroughput),
}

impl RawMeasureInput {
    pub fn kind(&self) -> MeasureKind {
        match self {
            RawMeasureInput::NonComplexFileDensity(_) => MeasureKind::NonComplexFileDensity,
            RawMeasureInput::CommentedFileDensity(_) => MeasureKind::CommentedFileDensity,
            RawMeasureInput::DuplicationAbsence(_) => MeasureKind::DuplicationAbsence,
            RawMeasureInput::PassedTests(_) => MeasureKind::PassedTests,
            RawMeasureInput::TestBuilds(_) => MeasureKind::TestBuilds,
            RawMeasureInput::TestCoverage(_) => MeasureKind::TestCoverage,
            RawMeasureInput::TeamThroughput(_) => MeasureKind::TeamThroughput,
        }
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use assert_matches::assert_matches;
    use serde_json::json;

    #[test]
    fn keys_resolve_to_kinds() {
        for kind in MeasureKind::ALL {
            assert_eq!(MeasureKind::from_key(kind.key()).unwrap(), kind);
            assert_eq!(kind.to_string().parse::<MeasureKind>().unwrap(), kind);
        }
    }

    #[test]
    fn unknown_key_is_an_error() {
        assert_matches!(
            MeasureKind::from_key("duplication_absence"),
            Err(CoreError::UnknownMeasure(key)) if key == "duplication_absence"
        );
    }

    #[test]
    fn calculations_follow_catalog_order() {
        let calculations: Vec<_> = MeasureKind::ALL.iter().map(|k| k.calculation()).collect();
        assert_eq!(
            calculations,
            vec![
                "calculate_em1",
                "calculate_em2",
                "calculate_em3",
                "calculate_em4",
                "calculate_em5",
                "calculate_em6",
                "calculate_em7",
            ]
        );
    }

    #[test]
    fn metric_keys_match_raw_schema_fields() {
        assert_eq!(
            MeasureKind::PassedTests.metric_keys(),
            &["tests", "test_errors", "test_failures"]
        );
        assert_eq!(MeasureKind::TestCoverage.metric_keys(), &["coverage"]);
        assert_eq!(MeasureKind::TeamThroughput.schema_name(), "TeamThroughput");
    }

    #[test]
    fn validate_input_dispatches_by_kind() {
        let input = MeasureKind::TestCoverage
            .validate_input(&json!({"coverage": [81.5, 90.0]}), &ValidationOptions::default())
            .unwrap();
        assert_eq!(input.kind(), MeasureKind::TestCoverage);
        assert_eq!(
            serde_json::to_value(&input).unwrap(),
            json!({"coverage": [81.5, 90.0]})
        );
    }

    #[test]
    fn validate_input_reports_schema_violations() {
        let errors = MeasureKind::TeamThroughput
            .validate_input(&json!({"total_issues": 4}), &ValidationOptions::default())
            .unwrap_err();
        assert_eq!(errors.paths(), vec!["resolved_issues"]);
    }
}
