use anyhow::Context;
use serde_json::Value;
use tracing::warn;

use webassert::{PageVerifier, Result, RunVariables, Settings, WebDriverSession};

/// Connect to WebDriver, attach the run variables and open `url`
pub async fn open_verifier(settings: &Settings, url: &str) -> Result<PageVerifier<WebDriverSession>> {
    url::Url::parse(url).with_context(|| format!("Invalid URL: {}", url))?;

    let session = WebDriverSession::connect(settings)
        .await?
        .with_execution_context(RunVariables::from_settings(settings)?);

    if let Err(e) = session.goto(url).await {
        let _ = session.close().await;
        return Err(e);
    }

    Ok(PageVerifier::new(session))
}

/// Close the session, then report the operation's own result
pub async fn finish(verifier: PageVerifier<WebDriverSession>, result: Result<()>) -> Result<()> {
    let closed = verifier.into_session().close().await;
    settle(result, closed)
}

/// The operation's error wins over a failed close
pub fn settle(result: Result<()>, closed: Result<()>) -> Result<()> {
    match (result, closed) {
        (Err(e), Err(close_err)) => {
            warn!("Failed to close WebDriver session: {}", close_err);
            Err(e)
        }
        (Err(e), Ok(())) => Err(e),
        (Ok(()), closed) => closed,
    }
}

pub fn print_json(value: &Value) -> Result<()> {
    let text = serde_json::to_string_pretty(value).context("Failed to serialize output")?;
    println!("{}", text);
    Ok(())
}
