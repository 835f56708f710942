use std::str::FromStr;

use tsqmi_core::validation::UnknownFieldPolicy;

/// Log output format for the stderr subscriber.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum LogFormat {
    #[default]
    Text,
    Json,
}

impl FromStr for LogFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "text" => Ok(LogFormat::Text),
            "json" => Ok(LogFormat::Json),
            other => Err(format!("expected 'text' or 'json', got '{other}'")),
        }
    }
}

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("{var} is invalid: {reason}")]
    Invalid { var: &'static str, reason: String },
}

/// Validator configuration loaded from environment variables.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CliConfig {
    /// What to do with undeclared request fields.
    pub unknown_fields: UnknownFieldPolicy,
    /// Format of log lines written to stderr.
    pub log_format: LogFormat,
}

impl CliConfig {
    /// Load configuration from environment variables with defaults.
    ///
    /// | Env Var                | Default |
    /// |------------------------|---------|
    /// | `TSQMI_UNKNOWN_FIELDS` | `raise` |
    /// | `TSQMI_LOG_FORMAT`     | `text`  |
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|var| std::env::var(var).ok())
    }

    /// Load configuration through `lookup` instead of the process
    /// environment.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let unknown_fields = match lookup("TSQMI_UNKNOWN_FIELDS") {
            Some(raw) => raw.parse::<UnknownFieldPolicy>().map_err(|e| ConfigError::Invalid {
                var: "TSQMI_UNKNOWN_FIELDS",
                reason: format!("{e}"),
            })?,
            None => UnknownFieldPolicy::default(),
        };

        let log_format = match lookup("TSQMI_LOG_FORMAT") {
            Some(raw) => raw.parse::<LogFormat>().map_err(|reason| ConfigError::Invalid {
                var: "TSQMI_LOG_FORMAT",
                reason,
            })?,
            None => LogFormat::default(),
        };

        Ok(Self {
            unknown_fields,
            log_format,
        })
    }
}
