//! Page verification and element highlighting
//!
//! `PageVerifier` is the unit keyword dispatchers call into. It asks its
//! `SessionContext` for elements and defaults, then either logs a
//! confirmation or returns an error. The only state it keeps between calls
//! is the record of original inline styles taken by `highlight_element`.
//!
//! A verifier is meant to be driven by one test at a time. Operations that
//! touch the style record take `&mut self`, so sharing one verifier across
//! tasks requires the caller to serialize access (e.g. a `Mutex`).

use std::collections::HashMap;
use std::env;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Duration;
use tracing::debug;

use crate::context::{
    ElementHandle, ExecutionContext, LOG_FILE_VARIABLE, NO_LOG_FILE, OUTPUT_DIR_VARIABLE,
    SessionContext,
};
use crate::errors::{Result, WebassertError};
use crate::logger::{LogSink, TracingSink};
use crate::types::{ElementId, LogLevel, is_noney};

/// Level page state is dumped at when an assertion fails
pub const DEFAULT_ASSERT_LOGLEVEL: &str = "TRACE";

/// Inline style written over highlighted elements
pub const HIGHLIGHT_STYLE: &str = "border: 2px solid red;";

/// Replaces the whole `style` attribute, or removes it when given `null`
const APPLY_STYLE_SCRIPT: &str = "if (arguments[1] === null) { \
     arguments[0].removeAttribute('style'); \
     } else { \
     arguments[0].setAttribute('style', arguments[1]); \
     }";

/// Original inline style per highlighted element; `None` means the element
/// had no `style` attribute.
pub type StyleOverrideMap = HashMap<ElementId, Option<String>>;

/// Assertions, timeout resolution and highlighting over a browser session
pub struct PageVerifier<S: SessionContext> {
    session: S,
    sink: Arc<dyn LogSink>,
    styles: Option<StyleOverrideMap>,
}

impl<S: SessionContext> PageVerifier<S> {
    /// Create a verifier that logs through `tracing`
    pub fn new(session: S) -> Self {
        Self::with_sink(session, Arc::new(TracingSink))
    }

    pub fn with_sink(session: S, sink: Arc<dyn LogSink>) -> Self {
        Self {
            session,
            sink,
            styles: None,
        }
    }

    pub fn session(&self) -> &S {
        &self.session
    }

    pub fn into_session(self) -> S {
        self.session
    }

    pub fn info(&self, msg: &str, html: bool) {
        self.sink.write(LogLevel::Info, msg, html);
    }

    pub fn debug(&self, msg: &str, html: bool) {
        self.sink.write(LogLevel::Debug, msg, html);
    }

    pub fn warn(&self, msg: &str, html: bool) {
        self.sink.write(LogLevel::Warn, msg, html);
    }

    /// Write `msg` at a caller-chosen level.
    ///
    /// A "no value" level (`None` or any casing of `none`) turns the call
    /// into a no-op, so callers can switch logging off with a parameter.
    pub fn log(&self, msg: &str, level: Option<&str>, html: bool) -> Result<()> {
        if let Some(level) = LogLevel::parse_optional(level)? {
            self.sink.write(level, msg, html);
        }
        Ok(())
    }

    /// Dump the current page state at `loglevel`; a "no value" level skips it
    pub async fn log_source(&self, loglevel: Option<&str>) -> Result<()> {
        match LogLevel::parse_optional(loglevel)? {
            Some(level) => {
                self.session
                    .dump_page_state(level, self.sink.as_ref())
                    .await
            }
            None => Ok(()),
        }
    }

    /// Fail unless `locator` matches at least one element.
    ///
    /// On failure the page state is dumped at `loglevel` first. `tag` only
    /// changes the wording of messages.
    pub async fn assert_page_contains(
        &self,
        locator: &str,
        tag: Option<&str>,
        message: Option<&str>,
        loglevel: Option<&str>,
    ) -> Result<()> {
        let what = element_kind(tag);
        if self.session.find_element(locator, tag, false).await?.is_none() {
            self.log_source(loglevel).await?;
            let message = resolve_message(message, || {
                format!("Page should have contained {what} '{locator}' but did not.")
            });
            return Err(WebassertError::AssertionFailure(message));
        }
        self.info(&format!("Current page contains {what} '{locator}'."), false);
        Ok(())
    }

    /// Fail if `locator` matches any element
    pub async fn assert_page_not_contains(
        &self,
        locator: &str,
        tag: Option<&str>,
        message: Option<&str>,
        loglevel: Option<&str>,
    ) -> Result<()> {
        let what = element_kind(tag);
        if self.session.find_element(locator, tag, false).await?.is_some() {
            self.log_source(loglevel).await?;
            let message = resolve_message(message, || {
                format!("Page should not have contained {what} '{locator}'.")
            });
            return Err(WebassertError::AssertionFailure(message));
        }
        self.info(
            &format!("Current page does not contain {what} '{locator}'."),
            false,
        );
        Ok(())
    }

    /// Explicit timeout expression, or the session default when unset.
    ///
    /// The default is read from the session on every call.
    pub fn get_timeout(&self, timeout: Option<&str>) -> Result<Duration> {
        match timeout {
            Some(expr) if !is_noney(timeout) => self.session.parse_duration(expr),
            _ => Ok(self.session.default_timeout()),
        }
    }

    /// Draw a red border on every element matching `locator`.
    ///
    /// The original inline styles are recorded so `apply_original_style` can
    /// put them back. Each call starts a fresh record: styles recorded by an
    /// earlier highlight that was never restored are lost, and those elements
    /// keep the border.
    pub async fn highlight_element(&mut self, locator: &str) -> Result<()> {
        let elements = self.session.find_elements(locator).await?;
        if elements.is_empty() {
            return Err(WebassertError::ElementNotFound(format!(
                "No element with locator '{}' found.",
                locator
            )));
        }

        if let Some(previous) = &self.styles
            && !previous.is_empty()
        {
            debug!(
                "Discarding {} recorded style(s) from previous highlight",
                previous.len()
            );
        }

        let styles = self.styles.insert(StyleOverrideMap::new());
        for element in &elements {
            let original = self.session.get_attribute(element, "style").await?;
            self.session
                .execute_script(APPLY_STYLE_SCRIPT, element, Some(HIGHLIGHT_STYLE))
                .await?;
            // Only elements that actually carry the border are recorded
            styles.insert(element.id(), original);
        }

        debug!(
            "Highlighted {} element(s) matching '{}'",
            elements.len(),
            locator
        );
        Ok(())
    }

    /// Put back the inline style recorded for each element matching `locator`.
    ///
    /// Only elements that currently match are restored. An element with no
    /// recorded style is a `StaleOverrideReference`; elements before it are
    /// already restored. The record is kept afterwards.
    pub async fn apply_original_style(&mut self, locator: &str) -> Result<()> {
        let Some(styles) = &self.styles else {
            return Err(WebassertError::NothingHighlighted(locator.to_string()));
        };

        let elements = self.session.find_elements(locator).await?;
        for element in &elements {
            let id = element.id();
            let original = styles
                .get(&id)
                .ok_or_else(|| WebassertError::StaleOverrideReference {
                    locator: locator.to_string(),
                    element: id.to_string(),
                })?;
            self.session
                .execute_script(APPLY_STYLE_SCRIPT, element, original.as_deref())
                .await?;
        }

        debug!(
            "Restored original style on {} element(s) matching '{}'",
            elements.len(),
            locator
        );
        Ok(())
    }

    /// Whether a highlight has been recorded
    pub fn is_highlighted(&self) -> bool {
        self.styles.is_some()
    }

    /// Number of elements in the current style record
    pub fn highlighted_count(&self) -> usize {
        self.styles.as_ref().map_or(0, HashMap::len)
    }

    /// Directory log artifacts should be written to
    pub fn log_dir(&self) -> Result<PathBuf> {
        resolve_log_dir(self.session.execution_context())
    }
}

/// Resolve the log directory of a run.
///
/// Falls back from the log file's directory, to the output directory when
/// the log file is `NONE`, to the working directory when no run is active.
pub fn resolve_log_dir(context: Option<&dyn ExecutionContext>) -> Result<PathBuf> {
    let Some(context) = context else {
        return Ok(env::current_dir()?);
    };

    let dir = match context.get_variable_value(LOG_FILE_VARIABLE) {
        Some(log_file) if log_file != NO_LOG_FILE => Path::new(&log_file)
            .parent()
            .filter(|parent| !parent.as_os_str().is_empty())
            .map(Path::to_path_buf),
        _ => context
            .get_variable_value(OUTPUT_DIR_VARIABLE)
            .map(PathBuf::from),
    };

    match dir {
        Some(dir) => Ok(dir),
        None => Ok(env::current_dir()?),
    }
}

fn element_kind(tag: Option<&str>) -> &str {
    tag.filter(|t| !t.is_empty()).unwrap_or("element")
}

fn resolve_message(message: Option<&str>, default: impl FnOnce() -> String) -> String {
    match message {
        Some(msg) if !is_noney(message) => msg.to_string(),
        _ => default(),
    }
}

#[cfg(test)]
#[path = "component_test.rs"]
mod component_test;
