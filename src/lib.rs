//! # webassert
#![allow(clippy::uninlined_format_args)]
//!
//! Page assertions and visual element highlighting for WebDriver-driven
//! browser tests.
//!
//! The [`PageVerifier`] sits between a keyword dispatcher and a browser
//! session. It checks whether locators match anything on the page, resolves
//! wait timeouts, draws a temporary red border around elements for
//! debugging, and works out where log artifacts belong.
//!
//! ## Library Usage
//!
//! ```no_run
//! use webassert::{PageVerifier, RunVariables, Settings, WebDriverSession};
//!
//! # async fn example() -> webassert::Result<()> {
//! let settings = Settings::from_env()?;
//! let session = WebDriverSession::connect(&settings)
//!     .await?
//!     .with_execution_context(RunVariables::from_settings(&settings)?);
//! session.goto("https://example.com").await?;
//!
//! let mut verifier = PageVerifier::new(session);
//! verifier
//!     .assert_page_contains("css:h1", Some("heading"), None, Some("TRACE"))
//!     .await?;
//!
//! verifier.highlight_element("css:p").await?;
//! verifier.apply_original_style("css:p").await?;
//!
//! let wait = verifier.get_timeout(Some("2 seconds"))?;
//! let logs = verifier.log_dir()?;
//! # let _ = (wait, logs);
//! # Ok(())
//! # }
//! ```
//!
//! ## CLI Usage
//!
//! ```bash
//! # Fail with exit code 3 unless the page has a submit button
//! webassert contains "https://example.com" "css:button[type=submit]" --tag button
//!
//! # Outline every card for five seconds, then restore the page
//! webassert highlight "https://example.com" "css:.card" --hold "5 s" --no-headless
//!
//! # Where would logs for this run go?
//! webassert log-dir --log-file results/log.html
//! ```
//!
//! Settings are read from `WEBASSERT_*` environment variables (see
//! [`config`]) and overridden by command line flags.

/// Page assertions, highlighting and log directory resolution
pub mod component;

/// Settings loaded from the environment
pub mod config;

/// Host interfaces: browser session and execution context
pub mod context;

/// Error type with exit codes
pub mod errors;

/// Log sinks
pub mod logger;

/// Duration expression parsing
pub mod timestr;

/// Shared value types
pub mod types;

/// WebDriver session facade
pub mod webdriver;

pub use component::{DEFAULT_ASSERT_LOGLEVEL, HIGHLIGHT_STYLE, PageVerifier, resolve_log_dir};
pub use config::Settings;
pub use context::{ElementHandle, ExecutionContext, RunVariables, SessionContext};
pub use errors::{Result, WebassertError};
pub use logger::{LogRecord, LogSink, MemorySink, TracingSink};
pub use types::{ElementId, LogLevel, is_noney};
pub use webdriver::{BrowserType, WebDriverSession};
