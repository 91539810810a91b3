use serde_json::json;
use tracing::info;

use crate::commands::utils;
use webassert::{Result, Settings, WebassertError};

/// Outline every element matching `locator`, wait `hold`, then restore
pub async fn handle_highlight(
    settings: &Settings,
    url: String,
    locator: String,
    hold: Option<String>,
) -> Result<()> {
    let mut verifier = utils::open_verifier(settings, &url).await?;

    let result = async {
        let hold = verifier.get_timeout(hold.as_deref())?;
        verifier.highlight_element(&locator).await?;
        let count = verifier.highlighted_count();
        info!("Holding highlight on {} element(s) for {:?}", count, hold);
        tokio::time::sleep(hold).await;
        verifier.apply_original_style(&locator).await?;
        Ok::<_, WebassertError>(count)
    }
    .await;

    let count = match result {
        Ok(count) => {
            utils::finish(verifier, Ok(())).await?;
            count
        }
        Err(e) => return utils::finish(verifier, Err(e)).await,
    };

    utils::print_json(&json!({
        "url": url,
        "locator": locator,
        "highlighted": count,
    }))
}
