use serde_json::json;

use crate::commands::utils;
use webassert::{Result, RunVariables, Settings, resolve_log_dir};

/// Print the log directory of a run configured by `settings`, or of no run
pub fn handle_log_dir(settings: &Settings, no_run: bool) -> Result<()> {
    let dir = if no_run {
        resolve_log_dir(None)?
    } else {
        let vars = RunVariables::from_settings(settings)?;
        resolve_log_dir(Some(&vars))?
    };

    utils::print_json(&json!({ "log_dir": dir.display().to_string() }))
}
