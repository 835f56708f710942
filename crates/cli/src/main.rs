//! `tsqmi-validate` -- validate TSQMI request bodies from the command line.
//!
//! Reads a JSON document from a file or stdin, validates it against the
//! chosen schema and prints either the normalized document or a violation
//! report. Logs go to stderr.
//!
//! # Environment variables
//!
//! | Variable               | Default | Description                          |
//! |------------------------|---------|--------------------------------------|
//! | `TSQMI_UNKNOWN_FIELDS` | `raise` | `raise` or `exclude` undeclared fields |
//! | `TSQMI_LOG_FORMAT`     | `text`  | `text` or `json` log lines           |
//! | `RUST_LOG`             | `tsqmi_cli=info,tsqmi_core=info` | tracing filter |

use std::process::ExitCode;

use clap::Parser;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use tsqmi_cli::cli::Cli;
use tsqmi_cli::commands::{self, EXIT_ERROR};
use tsqmi_cli::config::{CliConfig, LogFormat};
use tsqmi_core::validation::ValidationOptions;

fn main() -> ExitCode {
    dotenvy::dotenv().ok();

    let cli = Cli::parse();

    let config = match CliConfig::from_env() {
        Ok(config) => config,
        Err(err) => {
            eprintln!("error: {err}");
            return ExitCode::from(EXIT_ERROR);
        }
    };

    init_tracing(config.log_format);

    let unknown_fields = cli.unknown_fields.unwrap_or(config.unknown_fields);
    let options = ValidationOptions::default().with_unknown_fields(unknown_fields);
    tracing::debug!(unknown_fields = %unknown_fields, "Loaded validator configuration");

    match commands::execute(&cli.command, &options) {
        Ok(outcome) => {
            println!("{}", outcome.output);
            ExitCode::from(outcome.exit_code)
        }
        Err(err) => {
            eprintln!("error: {err:#}");
            ExitCode::from(EXIT_ERROR)
        }
    }
}

fn init_tracing(format: LogFormat) {
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| "tsqmi_cli=info,tsqmi_core=info".into());
    let registry = tracing_subscriber::registry().with(filter);

    match format {
        LogFormat::Text => registry
            .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
            .init(),
        LogFormat::Json => registry
            .with(
                tracing_subscriber::fmt::layer()
                    .json()
                    .with_writer(std::io::stderr),
            )
            .init(),
    }
}
