//! Interfaces the verifier consumes from its host
//!
//! A `SessionContext` owns the browser session: element lookup, script
//! execution, page source and the ambient default timeout. An
//! `ExecutionContext` exposes the variables of the run in progress, if any.

use async_trait::async_trait;
use std::collections::HashMap;
use std::time::Duration;

use crate::config::Settings;
use crate::errors::Result;
use crate::logger::LogSink;
use crate::timestr;
use crate::types::{ElementId, LogLevel};

/// Variable holding the path of the run's log file, or `NONE`
pub const LOG_FILE_VARIABLE: &str = "${LOG FILE}";

/// Variable holding the run's output directory
pub const OUTPUT_DIR_VARIABLE: &str = "${OUTPUTDIR}";

/// Marker the host stores in `${LOG FILE}` when no log file is written.
/// Compared literally, unlike the case-insensitive "no value" sentinel.
pub const NO_LOG_FILE: &str = "NONE";

/// A live element handed out by a `SessionContext`
pub trait ElementHandle {
    /// Driver-assigned identity of the element
    fn id(&self) -> ElementId;
}

/// Browser session facade
#[async_trait]
pub trait SessionContext: Send + Sync {
    type Element: ElementHandle + Send + Sync;

    /// Look up the first element matching `locator`.
    ///
    /// With `required` set, no match is an `ElementNotFound` error;
    /// otherwise it is `Ok(None)`.
    async fn find_element(
        &self,
        locator: &str,
        tag: Option<&str>,
        required: bool,
    ) -> Result<Option<Self::Element>>;

    /// All elements matching `locator`, in document order. May be empty.
    async fn find_elements(&self, locator: &str) -> Result<Vec<Self::Element>>;

    /// Current value of an attribute, `None` when the attribute is absent
    async fn get_attribute(&self, element: &Self::Element, name: &str) -> Result<Option<String>>;

    /// Run `script` with `arguments[0]` bound to the element and
    /// `arguments[1]` to `arg` (`null` when `None`)
    async fn execute_script(
        &self,
        script: &str,
        element: &Self::Element,
        arg: Option<&str>,
    ) -> Result<()>;

    /// Write the current page state to `sink` at `level`
    async fn dump_page_state(&self, level: LogLevel, sink: &dyn LogSink) -> Result<()>;

    /// Ambient default timeout, read fresh on each call
    fn default_timeout(&self) -> Duration;

    fn parse_duration(&self, text: &str) -> Result<Duration> {
        timestr::timestr_to_duration(text)
    }

    /// The run in progress, `None` when nothing is executing
    fn execution_context(&self) -> Option<&dyn ExecutionContext>;
}

/// Variables of an active run
pub trait ExecutionContext: Send + Sync {
    fn get_variable_value(&self, name: &str) -> Option<String>;
}

/// Map-backed execution context
#[derive(Debug, Clone, Default)]
pub struct RunVariables {
    values: HashMap<String, String>,
}

impl RunVariables {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build the run variables from settings.
    ///
    /// `${LOG FILE}` is set to `NONE` when no log file is configured, and
    /// `${OUTPUTDIR}` defaults to the working directory.
    pub fn from_settings(settings: &Settings) -> Result<Self> {
        let log_file = settings
            .log_file
            .as_ref()
            .map(|p| p.display().to_string())
            .unwrap_or_else(|| NO_LOG_FILE.to_string());
        let output_dir = match &settings.output_dir {
            Some(dir) => dir.clone(),
            None => std::env::current_dir()?,
        };

        Ok(Self::new()
            .with(LOG_FILE_VARIABLE, log_file)
            .with(OUTPUT_DIR_VARIABLE, output_dir.display().to_string()))
    }

    pub fn with(mut self, name: &str, value: impl Into<String>) -> Self {
        self.set(name, value);
        self
    }

    pub fn set(&mut self, name: &str, value: impl Into<String>) {
        self.values.insert(name.to_string(), value.into());
    }
}

impl ExecutionContext for RunVariables {
    fn get_variable_value(&self, name: &str) -> Option<String> {
        self.values.get(name).cloned()
    }
}

#[cfg(test)]
#[path = "context_test.rs"]
mod context_test;
