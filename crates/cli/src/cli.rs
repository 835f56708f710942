use std::path::PathBuf;

use clap::{Parser, Subcommand};
use tsqmi_core::measure_catalog::MeasureKind;
use tsqmi_core::schema::RequestKind;
use tsqmi_core::validation::UnknownFieldPolicy;

#[derive(Debug, Parser)]
#[command(name = "tsqmi-validate")]
#[command(version, about = "Validate TSQMI quality-model request bodies")]
pub struct Cli {
    /// What to do with undeclared fields (raise or exclude). Overrides
    /// TSQMI_UNKNOWN_FIELDS.
    #[arg(long, global = true)]
    pub unknown_fields: Option<UnknownFieldPolicy>,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Validate a request body (measures, subcharacteristics, characteristics or tsqmi)
    Request {
        /// Request kind
        kind: RequestKind,
        /// JSON file to read; stdin when omitted
        file: Option<PathBuf>,
    },
    /// Validate the raw metric input of one measure, e.g. passed_tests
    Raw {
        /// Measure key
        measure: MeasureKind,
        /// JSON file to read; stdin when omitted
        file: Option<PathBuf>,
    },
    /// List measure keys with their input fields and calculations
    Catalog,
}
