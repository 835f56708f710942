//! Validator settings.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::CoreError;

/// What to do with object fields a schema does not declare.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum UnknownFieldPolicy {
    /// Report each undeclared field as a violation.
    #[default]
    Raise,
    /// Drop undeclared fields without comment.
    Exclude,
}

impl UnknownFieldPolicy {
    pub fn as_str(self) -> &'static str {
        match self {
            UnknownFieldPolicy::Raise => "raise",
            UnknownFieldPolicy::Exclude => "exclude",
        }
    }
}

impl fmt::Display for UnknownFieldPolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for UnknownFieldPolicy {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "raise" => Ok(UnknownFieldPolicy::Raise),
            "exclude" => Ok(UnknownFieldPolicy::Exclude),
            other => Err(CoreError::InvalidOption(format!(
                "unknown field policy must be 'raise' or 'exclude', got '{other}'"
            ))),
        }
    }
}

/// Settings shared by every schema during one validation call.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ValidationOptions {
    #[serde(default)]
    pub unknown_fields: UnknownFieldPolicy,
}

impl ValidationOptions {
    pub fn with_unknown_fields(mut self, policy: UnknownFieldPolicy) -> Self {
        self.unknown_fields = policy;
        self
    }
}
