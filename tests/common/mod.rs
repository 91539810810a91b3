// Shared fake browser session for integration tests

#![allow(dead_code)]

use async_trait::async_trait;
use std::collections::{HashMap, HashSet};
use std::sync::{Arc, Mutex, MutexGuard};
use std::time::Duration;

use webassert::{
    ElementHandle, ElementId, ExecutionContext, LogLevel, LogSink, MemorySink, PageVerifier, Result,
    RunVariables, SessionContext, WebassertError,
};

/// Element handed out by `FakePage`
#[derive(Debug, Clone)]
pub struct FakeElement {
    id: String,
}

impl ElementHandle for FakeElement {
    fn id(&self) -> ElementId {
        ElementId::new(&self.id)
    }
}

#[derive(Default)]
struct PageState {
    matches: HashMap<String, Vec<String>>,
    styles: HashMap<String, Option<String>>,
    dumps: Vec<LogLevel>,
    scripts_run: usize,
    broken: HashSet<String>,
}

/// Page source written by `dump_page_state`
pub const PAGE_SOURCE: &str = "<html><body>fake page</body></html>";

/// In-memory page: locators map to element ids, elements carry a style attribute
pub struct FakePage {
    state: Mutex<PageState>,
    default_timeout: Mutex<Duration>,
    context: Option<RunVariables>,
}

impl FakePage {
    pub fn new() -> Self {
        Self {
            state: Mutex::new(PageState::default()),
            default_timeout: Mutex::new(Duration::from_secs(5)),
            context: None,
        }
    }

    /// Add an element with the given inline style under `locator`
    pub fn with_element(self, locator: &str, id: &str, style: Option<&str>) -> Self {
        {
            let mut state = self.lock();
            state
                .matches
                .entry(locator.to_string())
                .or_default()
                .push(id.to_string());
            state
                .styles
                .insert(id.to_string(), style.map(String::from));
        }
        self
    }

    pub fn with_context(mut self, context: RunVariables) -> Self {
        self.context = Some(context);
        self
    }

    /// Change which elements `locator` resolves to, as if the DOM changed
    pub fn set_matches(&self, locator: &str, ids: &[&str]) {
        self.lock().matches.insert(
            locator.to_string(),
            ids.iter().map(|id| id.to_string()).collect(),
        );
    }

    /// Make every script run against element `id` fail, as if it went stale
    pub fn break_element(&self, id: &str) {
        self.lock().broken.insert(id.to_string());
    }

    pub fn style(&self, id: &str) -> Option<String> {
        self.lock().styles.get(id).cloned().flatten()
    }

    pub fn dumps(&self) -> Vec<LogLevel> {
        self.lock().dumps.clone()
    }

    pub fn scripts_run(&self) -> usize {
        self.lock().scripts_run
    }

    pub fn set_default_timeout(&self, timeout: Duration) {
        *self.default_timeout.lock().unwrap() = timeout;
    }

    fn lock(&self) -> MutexGuard<'_, PageState> {
        self.state.lock().unwrap()
    }
}

#[async_trait]
impl SessionContext for FakePage {
    type Element = FakeElement;

    async fn find_element(
        &self,
        locator: &str,
        _tag: Option<&str>,
        required: bool,
    ) -> Result<Option<FakeElement>> {
        let first = self
            .lock()
            .matches
            .get(locator)
            .and_then(|ids| ids.first().cloned());
        match first {
            Some(id) => Ok(Some(FakeElement { id })),
            None if required => Err(WebassertError::ElementNotFound(format!(
                "Element with locator '{}' not found.",
                locator
            ))),
            None => Ok(None),
        }
    }

    async fn find_elements(&self, locator: &str) -> Result<Vec<FakeElement>> {
        Ok(self
            .lock()
            .matches
            .get(locator)
            .map(|ids| ids.iter().map(|id| FakeElement { id: id.clone() }).collect())
            .unwrap_or_default())
    }

    async fn get_attribute(&self, element: &FakeElement, name: &str) -> Result<Option<String>> {
        assert_eq!(name, "style");
        Ok(self.lock().styles.get(&element.id).cloned().flatten())
    }

    async fn execute_script(
        &self,
        script: &str,
        element: &FakeElement,
        arg: Option<&str>,
    ) -> Result<()> {
        // Every script the verifier runs overwrites or removes the style attribute
        assert!(script.contains("setAttribute('style'"));
        let mut state = self.lock();
        if state.broken.contains(&element.id) {
            return Err(WebassertError::WebDriverFailed(format!(
                "stale element reference: {}",
                element.id
            )));
        }
        state.scripts_run += 1;
        state.styles.insert(element.id.clone(), arg.map(String::from));
        Ok(())
    }

    async fn dump_page_state(&self, level: LogLevel, sink: &dyn LogSink) -> Result<()> {
        self.lock().dumps.push(level);
        sink.write(level, PAGE_SOURCE, false);
        Ok(())
    }

    fn default_timeout(&self) -> Duration {
        *self.default_timeout.lock().unwrap()
    }

    fn execution_context(&self) -> Option<&dyn ExecutionContext> {
        self.context.as_ref().map(|c| c as &dyn ExecutionContext)
    }
}

/// Verifier over `page` that records its log output
pub fn verifier(page: FakePage) -> (PageVerifier<FakePage>, Arc<MemorySink>) {
    let sink = Arc::new(MemorySink::new());
    let verifier = PageVerifier::with_sink(page, sink.clone());
    (verifier, sink)
}
