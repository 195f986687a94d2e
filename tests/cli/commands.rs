//! Subcommands run against the built binary

use super::{run_blocks, stdout};

fn empty_config(dir: &tempfile::TempDir) -> std::path::PathBuf {
    let path = dir.path().join("blocks.toml");
    std::fs::write(&path, "").unwrap();
    path
}

#[test]
fn test_list_shows_builtin_plugins() {
    let dir = tempfile::tempdir().unwrap();
    let output = run_blocks(&empty_config(&dir), &["list", "--format", "text"]);
    assert!(output.status.success());

    let text = stdout(&output);
    assert!(text.contains("dump [enabled] builtin, output"));
    assert!(text.contains("dump-json [enabled] builtin, json, output"));
}

#[test]
fn test_filter_json() {
    let dir = tempfile::tempdir().unwrap();
    let output = run_blocks(
        &empty_config(&dir),
        &["filter", "builtin", "json", "--format", "json"],
    );
    assert!(output.status.success());

    let value: serde_json::Value = serde_json::from_str(&stdout(&output)).unwrap();
    assert_eq!(value[0]["name"], "dump-json");
}

#[test]
fn test_show_unknown_plugin_fails() {
    let dir = tempfile::tempdir().unwrap();
    let output = run_blocks(&empty_config(&dir), &["show", "roundbrush"]);
    assert!(!output.status.success());
}

#[test]
fn test_malformed_filter_fails() {
    let dir = tempfile::tempdir().unwrap();
    let output = run_blocks(&empty_config(&dir), &["filter", "builtin..json"]);
    assert!(!output.status.success());
}

#[test]
fn test_missing_config_file_fails() {
    let dir = tempfile::tempdir().unwrap();
    let output = run_blocks(&dir.path().join("absent.toml"), &["list"]);
    assert!(!output.status.success());
    assert!(String::from_utf8_lossy(&output.stderr).contains("does not exist"));
}
