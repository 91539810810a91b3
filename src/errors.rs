use thiserror::Error;

/// Result type used across the library
pub type Result<T> = std::result::Result<T, WebassertError>;

/// Error type that includes exit codes
#[derive(Debug, Error)]
pub enum WebassertError {
    /// A page assertion did not hold (exit code 3)
    #[error("{0}")]
    AssertionFailure(String),
    /// Locator matched nothing where a match is required (exit code 2)
    #[error("{0}")]
    ElementNotFound(String),
    /// Element resolved on restore has no recorded original style (exit code 6)
    #[error("No original style recorded for element '{element}' matched by locator '{locator}'")]
    StaleOverrideReference { locator: String, element: String },
    /// Restore requested before any highlight (exit code 6)
    #[error("Nothing highlighted, cannot restore original style for locator '{0}'")]
    NothingHighlighted(String),
    /// Duration expression could not be parsed (exit code 5)
    #[error("Invalid time string '{0}'")]
    InvalidTimeout(String),
    /// Unknown log level name (exit code 1)
    #[error("Invalid log level '{0}'")]
    InvalidLogLevel(String),
    /// WebDriver command failed (exit code 4)
    #[error("WebDriver command failed: {0}")]
    WebDriver(#[from] fantoccini::error::CmdError),
    /// WebDriver connection failed (exit code 4)
    #[error("WebDriver connection failed: {0}")]
    WebDriverFailed(String),
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
    /// Generic error (exit code 1)
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl WebassertError {
    /// Get the exit code for this error
    pub fn exit_code(&self) -> i32 {
        match self {
            WebassertError::ElementNotFound(_) => 2,
            WebassertError::AssertionFailure(_) => 3,
            WebassertError::WebDriver(_) | WebassertError::WebDriverFailed(_) => 4,
            WebassertError::InvalidTimeout(_) => 5,
            WebassertError::StaleOverrideReference { .. }
            | WebassertError::NothingHighlighted(_) => 6,
            WebassertError::InvalidLogLevel(_)
            | WebassertError::Io(_)
            | WebassertError::Other(_) => 1,
        }
    }
}

#[cfg(test)]
#[path = "errors_test.rs"]
mod errors_test;
