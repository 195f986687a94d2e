//! Configuration files driving the registry

use super::{run_blocks, stdout};

#[test]
fn test_config_disables_and_categorizes() {
    let dir = tempfile::tempdir().unwrap();
    let config = dir.path().join("blocks.toml");
    std::fs::write(
        &config,
        r#"
disable = "dump-json"

[categories]
"report.plain" = "dump"
"#,
    )
    .unwrap();

    let output = run_blocks(&config, &["filter", "report.plain", "--format", "text"]);
    assert!(output.status.success());
    assert_eq!(
        stdout(&output).trim(),
        "dump [enabled] builtin, output, report.plain"
    );

    let hidden = run_blocks(&config, &["list", "--format", "text"]);
    assert!(!stdout(&hidden).contains("dump-json"));

    let shown = run_blocks(&config, &["list", "--format", "text", "--include-disabled"]);
    assert!(stdout(&shown).contains("dump-json [disabled]"));
}

#[test]
fn test_json_output_needs_json_plugin() {
    let dir = tempfile::tempdir().unwrap();
    let config = dir.path().join("blocks.toml");
    std::fs::write(&config, "disable = [\"dump-json\"]\n").unwrap();

    let output = run_blocks(&config, &["list", "--format", "json"]);
    assert!(!output.status.success());
}

#[test]
fn test_missing_plugin_path_is_not_fatal() {
    let dir = tempfile::tempdir().unwrap();
    let config = dir.path().join("blocks.toml");
    let missing = dir.path().join("plugins");
    std::fs::write(
        &config,
        format!("plugin-path = {:?}\n", missing.display().to_string()),
    )
    .unwrap();

    let output = run_blocks(&config, &["list", "--format", "text"]);
    assert!(output.status.success());
    assert!(stdout(&output).contains("dump [enabled]"));
}
