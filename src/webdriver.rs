use anyhow::Context;
use async_trait::async_trait;
use fantoccini::elements::Element;
use fantoccini::{Client, ClientBuilder, Locator};
use serde_json::json;
use std::sync::RwLock;
use std::time::Duration;
use tracing::{debug, info};

use crate::config::Settings;
use crate::context::{ElementHandle, ExecutionContext, RunVariables, SessionContext};
use crate::errors::{Result, WebassertError};
use crate::logger::LogSink;
use crate::types::{ElementId, LogLevel};

/// Supported browser types
#[derive(Debug, Clone, Copy, PartialEq, serde::Serialize, serde::Deserialize)]
pub enum BrowserType {
    /// Mozilla Firefox
    Firefox,
    /// Google Chrome/Chromium
    Chrome,
}

impl std::str::FromStr for BrowserType {
    type Err = anyhow::Error;

    /// Parse browser type from string (case-insensitive)
    fn from_str(s: &str) -> anyhow::Result<Self> {
        match s.to_lowercase().as_str() {
            "firefox" => Ok(BrowserType::Firefox),
            "chrome" | "chromium" => Ok(BrowserType::Chrome),
            _ => anyhow::bail!("Unsupported browser: {}", s),
        }
    }
}

impl BrowserType {
    /// Default WebDriver URL for this browser type
    pub fn default_webdriver_url(&self) -> &'static str {
        match self {
            BrowserType::Firefox => "http://localhost:4444",
            BrowserType::Chrome => "http://localhost:9515",
        }
    }

    fn driver_name(&self) -> &'static str {
        match self {
            BrowserType::Firefox => "geckodriver",
            BrowserType::Chrome => "chromedriver",
        }
    }

    /// Session capabilities for this browser
    pub fn capabilities(
        &self,
        headless: bool,
        profile_dir: Option<&std::path::Path>,
    ) -> serde_json::Map<String, serde_json::Value> {
        let mut caps = serde_json::Map::new();

        match self {
            BrowserType::Firefox => {
                let mut args = Vec::new();
                if headless {
                    args.push("--headless".to_string());
                }
                caps.insert("moz:firefoxOptions".to_string(), json!({ "args": args }));
            }
            BrowserType::Chrome => {
                let mut args = vec!["--no-sandbox".to_string()];
                if headless {
                    args.push("--headless=new".to_string());
                    args.push("--disable-gpu".to_string());
                    args.push("--disable-dev-shm-usage".to_string());
                }
                if let Some(dir) = profile_dir {
                    args.push(format!("--user-data-dir={}", dir.display()));
                }
                caps.insert("goog:chromeOptions".to_string(), json!({ "args": args }));
            }
        }

        caps
    }
}

/// Map a locator string to a WebDriver strategy.
///
/// `css:`, `xpath:`, `id:` and `link:` prefixes pick the strategy
/// explicitly. Unprefixed locators starting with `//` or `(` are XPath,
/// anything else is CSS.
pub fn to_webdriver_locator(locator: &str) -> Locator<'_> {
    if let Some((prefix, rest)) = locator.split_once(':') {
        match prefix.trim().to_lowercase().as_str() {
            "css" => return Locator::Css(rest.trim()),
            "xpath" => return Locator::XPath(rest.trim()),
            "id" => return Locator::Id(rest.trim()),
            "link" => return Locator::LinkText(rest.trim()),
            _ => {}
        }
    }

    let trimmed = locator.trim();
    if trimmed.starts_with("//") || trimmed.starts_with('(') {
        Locator::XPath(trimmed)
    } else {
        Locator::Css(trimmed)
    }
}

impl ElementHandle for Element {
    fn id(&self) -> ElementId {
        ElementId::new(self.element_id().to_string())
    }
}

/// Session facade over a live WebDriver client
pub struct WebDriverSession {
    client: Client,
    default_timeout: RwLock<Duration>,
    context: Option<RunVariables>,
    // Keeps the Chrome profile directory alive for the session
    _profile_dir: Option<tempfile::TempDir>,
}

impl WebDriverSession {
    /// Connect to the WebDriver endpoint described by `settings`
    pub async fn connect(settings: &Settings) -> Result<Self> {
        let browser = settings.browser;
        let url = settings
            .webdriver_url
            .clone()
            .unwrap_or_else(|| browser.default_webdriver_url().to_string());
        info!("Connecting to {:?} WebDriver", browser);

        if !Self::is_webdriver_running(&url).await {
            return Err(WebassertError::WebDriverFailed(format!(
                "Cannot connect to {} at {}. Please ensure it is running \
                 (geckodriver --port 4444 or chromedriver --port 9515).",
                browser.driver_name(),
                url
            )));
        }

        // Chrome refuses to share a profile directory between sessions
        let profile_dir = match browser {
            BrowserType::Chrome => Some(
                tempfile::Builder::new()
                    .prefix("webassert-chrome-")
                    .tempdir()?,
            ),
            BrowserType::Firefox => None,
        };
        let caps = browser.capabilities(
            settings.headless,
            profile_dir.as_ref().map(|dir| dir.path()),
        );

        debug!("Connecting to WebDriver at {}", url);
        let client = ClientBuilder::rustls()
            .capabilities(caps)
            .connect(&url)
            .await
            .map_err(|e| WebassertError::WebDriverFailed(e.to_string()))?;

        Ok(Self {
            client,
            default_timeout: RwLock::new(settings.default_timeout),
            context: None,
            _profile_dir: profile_dir,
        })
    }

    async fn is_webdriver_running(url: &str) -> bool {
        let status_url = format!("{}/status", url);

        match reqwest::get(&status_url).await {
            Ok(response) => response.status().is_success(),
            Err(_) => false,
        }
    }

    /// Attach the variables of an active run
    pub fn with_execution_context(mut self, context: RunVariables) -> Self {
        self.context = Some(context);
        self
    }

    pub fn set_default_timeout(&self, timeout: Duration) {
        *self
            .default_timeout
            .write()
            .unwrap_or_else(|poisoned| poisoned.into_inner()) = timeout;
    }

    pub async fn goto(&self, url: &str) -> Result<()> {
        info!("Navigating to {}", url);
        self.client.goto(url).await?;

        // Give the page up to two seconds to finish loading
        let ready_script = "return document.readyState === 'complete';";
        for _ in 0..20 {
            match self.client.execute(ready_script, vec![]).await {
                Ok(val) if val.as_bool().unwrap_or(false) => break,
                _ => tokio::time::sleep(Duration::from_millis(100)).await,
            }
        }

        Ok(())
    }

    /// End the WebDriver session
    pub async fn close(self) -> Result<()> {
        self.client.close().await?;
        Ok(())
    }
}

#[async_trait]
impl SessionContext for WebDriverSession {
    type Element = Element;

    async fn find_element(
        &self,
        locator: &str,
        _tag: Option<&str>,
        required: bool,
    ) -> Result<Option<Element>> {
        debug!("Finding element with locator: {}", locator);
        let element = self.find_elements(locator).await?.into_iter().next();

        if element.is_none() && required {
            return Err(WebassertError::ElementNotFound(format!(
                "Element with locator '{}' not found.",
                locator
            )));
        }
        Ok(element)
    }

    async fn find_elements(&self, locator: &str) -> Result<Vec<Element>> {
        Ok(self.client.find_all(to_webdriver_locator(locator)).await?)
    }

    async fn get_attribute(&self, element: &Element, name: &str) -> Result<Option<String>> {
        Ok(element.attr(name).await?)
    }

    async fn execute_script(
        &self,
        script: &str,
        element: &Element,
        arg: Option<&str>,
    ) -> Result<()> {
        let element = serde_json::to_value(element).context("Failed to serialize element")?;
        self.client.execute(script, vec![element, json!(arg)]).await?;
        Ok(())
    }

    async fn dump_page_state(&self, level: LogLevel, sink: &dyn LogSink) -> Result<()> {
        let source = self.client.source().await?;
        sink.write(level, &source, false);
        Ok(())
    }

    fn default_timeout(&self) -> Duration {
        *self
            .default_timeout
            .read()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    fn execution_context(&self) -> Option<&dyn ExecutionContext> {
        self.context.as_ref().map(|c| c as &dyn ExecutionContext)
    }
}

#[cfg(test)]
#[path = "webdriver_test.rs"]
mod webdriver_test;
