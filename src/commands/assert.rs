use serde_json::json;
use tracing::info;

use crate::commands::utils;
use webassert::{Result, Settings};

/// Which way a page assertion goes
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Expectation {
    Contains,
    NotContains,
}

impl Expectation {
    pub fn name(&self) -> &'static str {
        match self {
            Expectation::Contains => "contains",
            Expectation::NotContains => "not-contains",
        }
    }
}

pub async fn handle_assert(
    settings: &Settings,
    expectation: Expectation,
    url: String,
    locator: String,
    tag: Option<String>,
    message: Option<String>,
    loglevel: String,
) -> Result<()> {
    info!("Checking that {} {} '{}'", url, expectation.name(), locator);

    let verifier = utils::open_verifier(settings, &url).await?;
    let tag = tag.as_deref();
    let message = message.as_deref();
    let loglevel = Some(loglevel.as_str());

    let result = match expectation {
        Expectation::Contains => {
            verifier
                .assert_page_contains(&locator, tag, message, loglevel)
                .await
        }
        Expectation::NotContains => {
            verifier
                .assert_page_not_contains(&locator, tag, message, loglevel)
                .await
        }
    };
    utils::finish(verifier, result).await?;

    utils::print_json(&json!({
        "assertion": expectation.name(),
        "url": url,
        "locator": locator,
        "passed": true,
    }))
}
