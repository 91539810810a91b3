use serde::{Deserialize, Serialize};
use std::fmt;

use crate::errors::WebassertError;

/// Severity a message is written at
#[derive(Clone, Copy, Debug, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum LogLevel {
    /// Very detailed output such as page source dumps
    Trace,
    /// Diagnostic output
    Debug,
    /// Normal progress messages
    Info,
    /// Something the reader should look at
    Warn,
}

impl std::str::FromStr for LogLevel {
    type Err = WebassertError;

    /// Parse log level from string (case-insensitive)
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_uppercase().as_str() {
            "TRACE" => Ok(LogLevel::Trace),
            "DEBUG" => Ok(LogLevel::Debug),
            "INFO" => Ok(LogLevel::Info),
            "WARN" => Ok(LogLevel::Warn),
            _ => Err(WebassertError::InvalidLogLevel(s.to_string())),
        }
    }
}

impl fmt::Display for LogLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            LogLevel::Trace => "TRACE",
            LogLevel::Debug => "DEBUG",
            LogLevel::Info => "INFO",
            LogLevel::Warn => "WARN",
        };
        f.write_str(name)
    }
}

impl LogLevel {
    /// Parse an optional level, mapping the "no value" sentinel to `None`
    pub fn parse_optional(level: Option<&str>) -> Result<Option<Self>, WebassertError> {
        match level {
            Some(name) if !is_noney(level) => name.parse().map(Some),
            _ => Ok(None),
        }
    }
}

/// Stable identity of a live element, as assigned by the driver
///
/// Two handles with identical markup are still different elements, so
/// anything keyed by element uses this rather than structural equality.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Deserialize, Serialize)]
pub struct ElementId(pub String);

impl ElementId {
    pub fn new(id: impl Into<String>) -> Self {
        ElementId(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ElementId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Returns true for the "no value" sentinel: an absent value or any casing
/// of the string `none`.
///
/// This is the only place that decides what counts as unset for caller
/// parameters. The host's literal `NONE` log file marker is a different
/// convention and is compared separately.
pub fn is_noney(value: Option<&str>) -> bool {
    match value {
        None => true,
        Some(v) => v.eq_ignore_ascii_case("none"),
    }
}

#[cfg(test)]
#[path = "types_test.rs"]
mod types_test;
