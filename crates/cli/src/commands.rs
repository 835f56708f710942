//! Command execution, separated from process setup so it can be tested
//! without spawning the binary.

use std::io::Read;
use std::path::Path;

use anyhow::Context;
use serde::Serialize;
use serde_json::{json, Value};
use tsqmi_core::measure_catalog::MeasureKind;
use tsqmi_core::schema::RequestKind;
use tsqmi_core::validation::{ValidationErrors, ValidationOptions};

use crate::cli::Command;

/// Input validated; normalized document printed.
pub const EXIT_VALID: u8 = 0;
/// Input decoded but violated its schema; violation report printed.
pub const EXIT_INVALID: u8 = 1;
/// Input could not be read or decoded.
pub const EXIT_ERROR: u8 = 2;

/// What to print on stdout and how to exit.
#[derive(Debug, Clone, PartialEq)]
pub struct Outcome {
    pub exit_code: u8,
    pub output: String,
}

/// Execute one command, reading its input from the named file or stdin.
pub fn execute(command: &Command, options: &ValidationOptions) -> anyhow::Result<Outcome> {
    match command {
        Command::Request { kind, file } => {
            let input = read_input(file.as_deref())?;
            run_request(*kind, &input, options)
        }
        Command::Raw { measure, file } => {
            let input = read_input(file.as_deref())?;
            run_raw(*measure, &input, options)
        }
        Command::Catalog => catalog(),
    }
}

/// Validate `input` as a quality-model request body.
pub fn run_request(
    kind: RequestKind,
    input: &str,
    options: &ValidationOptions,
) -> anyhow::Result<Outcome> {
    let value = decode(input)?;
    match kind.validate(&value, options) {
        Ok(request) => {
            tracing::info!(kind = %kind, "Request body is valid");
            accepted(&request)
        }
        Err(errors) => {
            tracing::info!(kind = %kind, violations = errors.len(), "Request body is invalid");
            rejected(&errors)
        }
    }
}

/// Validate `input` as the raw metric input of `measure`.
pub fn run_raw(
    measure: MeasureKind,
    input: &str,
    options: &ValidationOptions,
) -> anyhow::Result<Outcome> {
    let value = decode(input)?;
    match measure.validate_input(&value, options) {
        Ok(raw) => {
            tracing::info!(
                measure = %measure,
                calculation = measure.calculation(),
                "Raw metric input is valid"
            );
            accepted(&raw)
        }
        Err(errors) => {
            tracing::info!(
                measure = %measure,
                violations = errors.len(),
                "Raw metric input is invalid"
            );
            rejected(&errors)
        }
    }
}

/// Describe every known measure.
pub fn catalog() -> anyhow::Result<Outcome> {
    let entries: Vec<Value> = MeasureKind::ALL
        .iter()
        .map(|kind| {
            json!({
                "key": kind.key(),
                "calculation": kind.calculation(),
                "schema": kind.schema_name(),
                "metrics": kind.metric_keys(),
            })
        })
        .collect();
    Ok(Outcome {
        exit_code: EXIT_VALID,
        output: serde_json::to_string_pretty(&entries)?,
    })
}

/// Read the whole input from `file`, or from stdin when `None`.
pub fn read_input(file: Option<&Path>) -> anyhow::Result<String> {
    match file {
        Some(path) => std::fs::read_to_string(path)
            .with_context(|| format!("failed to read {}", path.display())),
        None => {
            let mut input = String::new();
            std::io::stdin()
                .read_to_string(&mut input)
                .context("failed to read stdin")?;
            Ok(input)
        }
    }
}

fn decode(input: &str) -> anyhow::Result<Value> {
    serde_json::from_str(input).context("input is not valid JSON")
}

fn accepted<T: Serialize>(document: &T) -> anyhow::Result<Outcome> {
    Ok(Outcome {
        exit_code: EXIT_VALID,
        output: serde_json::to_string_pretty(document)?,
    })
}

fn rejected(errors: &ValidationErrors) -> anyhow::Result<Outcome> {
    let report = json!({
        "errors": errors.to_messages(),
        "violations": errors,
    });
    Ok(Outcome {
        exit_code: EXIT_INVALID,
        output: serde_json::to_string_pretty(&report)?,
    })
}
