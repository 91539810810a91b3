//! Settings loaded from the environment

use std::env;
use std::path::PathBuf;
use std::time::Duration;

use crate::errors::{Result, WebassertError};
use crate::timestr;
use crate::webdriver::BrowserType;

pub const ENV_WEBDRIVER_URL: &str = "WEBASSERT_WEBDRIVER_URL";
pub const ENV_BROWSER: &str = "WEBASSERT_BROWSER";
pub const ENV_HEADLESS: &str = "WEBASSERT_HEADLESS";
pub const ENV_TIMEOUT: &str = "WEBASSERT_TIMEOUT";
pub const ENV_LOG_FILE: &str = "WEBASSERT_LOG_FILE";
pub const ENV_OUTPUT_DIR: &str = "WEBASSERT_OUTPUT_DIR";

/// Runtime settings for a verification session
#[derive(Debug, Clone, PartialEq)]
pub struct Settings {
    /// WebDriver endpoint; the browser's default port when unset
    pub webdriver_url: Option<String>,
    pub browser: BrowserType,
    pub headless: bool,
    /// Ambient default timeout handed to the session
    pub default_timeout: Duration,
    /// Log file of the run; `None` means the run writes no log file
    pub log_file: Option<PathBuf>,
    pub output_dir: Option<PathBuf>,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            webdriver_url: None,
            browser: BrowserType::Firefox,
            headless: true,
            default_timeout: Duration::from_secs(5),
            log_file: None,
            output_dir: None,
        }
    }
}

impl Settings {
    /// Load settings from `WEBASSERT_*` environment variables
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|name| env::var(name).ok())
    }

    /// Load settings through an arbitrary variable lookup
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut settings = Settings::default();
        let value = |name: &str| lookup(name).filter(|v| !v.trim().is_empty());

        if let Some(url) = value(ENV_WEBDRIVER_URL) {
            settings.webdriver_url = Some(url);
        }
        if let Some(browser) = value(ENV_BROWSER) {
            settings.browser = browser.parse()?;
        }
        if let Some(headless) = value(ENV_HEADLESS) {
            settings.headless = parse_bool(&headless).ok_or_else(|| {
                WebassertError::Other(anyhow::anyhow!(
                    "Invalid value for {}: {}",
                    ENV_HEADLESS,
                    headless
                ))
            })?;
        }
        if let Some(timeout) = value(ENV_TIMEOUT) {
            settings.default_timeout = timestr::timestr_to_duration(&timeout)?;
        }
        if let Some(log_file) = value(ENV_LOG_FILE) {
            settings.log_file = Some(PathBuf::from(log_file));
        }
        if let Some(output_dir) = value(ENV_OUTPUT_DIR) {
            settings.output_dir = Some(PathBuf::from(output_dir));
        }

        Ok(settings)
    }
}

fn parse_bool(value: &str) -> Option<bool> {
    match value.trim().to_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" => Some(false),
        _ => None,
    }
}

#[cfg(test)]
#[path = "config_test.rs"]
mod config_test;
