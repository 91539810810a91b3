// Unit tests for log directory resolution and message helpers

use super::*;
use crate::context::RunVariables;
use pretty_assertions::assert_eq;

#[test]
fn test_log_dir_from_log_file() {
    let vars = RunVariables::new()
        .with(LOG_FILE_VARIABLE, "/var/results/run-1/log.html")
        .with(OUTPUT_DIR_VARIABLE, "/var/results");

    assert_eq!(
        resolve_log_dir(Some(&vars)).unwrap(),
        PathBuf::from("/var/results/run-1")
    );
}

#[test]
fn test_log_dir_falls_back_to_output_dir_on_none_marker() {
    let vars = RunVariables::new()
        .with(LOG_FILE_VARIABLE, "NONE")
        .with(OUTPUT_DIR_VARIABLE, "/var/results");

    assert_eq!(
        resolve_log_dir(Some(&vars)).unwrap(),
        PathBuf::from("/var/results")
    );
}

#[test]
fn test_log_dir_marker_is_case_sensitive() {
    // Lowercase "none" is a real (relative) file name here, not the marker
    let vars = RunVariables::new()
        .with(LOG_FILE_VARIABLE, "logs/none")
        .with(OUTPUT_DIR_VARIABLE, "/var/results");

    assert_eq!(resolve_log_dir(Some(&vars)).unwrap(), PathBuf::from("logs"));
}

#[test]
fn test_log_dir_without_context_is_cwd() {
    let cwd = env::current_dir().unwrap();
    assert_eq!(resolve_log_dir(None).unwrap(), cwd);
}

#[test]
fn test_log_dir_bare_file_name_is_cwd() {
    let vars = RunVariables::new().with(LOG_FILE_VARIABLE, "log.html");
    let cwd = env::current_dir().unwrap();
    assert_eq!(resolve_log_dir(Some(&vars)).unwrap(), cwd);
}

#[test]
fn test_log_dir_missing_variables_is_cwd() {
    let vars = RunVariables::new().with(LOG_FILE_VARIABLE, "NONE");
    let cwd = env::current_dir().unwrap();
    assert_eq!(resolve_log_dir(Some(&vars)).unwrap(), cwd);

    let empty = RunVariables::new();
    assert_eq!(resolve_log_dir(Some(&empty)).unwrap(), cwd);
}

#[test]
fn test_element_kind() {
    assert_eq!(element_kind(None), "element");
    assert_eq!(element_kind(Some("")), "element");
    assert_eq!(element_kind(Some("link")), "link");
}

#[test]
fn test_resolve_message() {
    let default = || "synthesized".to_string();
    assert_eq!(resolve_message(None, default), "synthesized");
    assert_eq!(resolve_message(Some("None"), default), "synthesized");
    assert_eq!(resolve_message(Some("custom"), default), "custom");
}
