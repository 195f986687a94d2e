//! CLI Integration Test Modules

pub mod commands;
pub mod toml_config;

use std::path::Path;
use std::process::{Command, Output};

/// Run the binary with an explicit (possibly empty) configuration file
pub fn run_blocks(config: &Path, args: &[&str]) -> Output {
    Command::new(env!("CARGO_BIN_EXE_blocks"))
        .arg("--no-color")
        .arg("--log-level")
        .arg("off")
        .arg("--config-file")
        .arg(config)
        .args(args)
        .output()
        .expect("failed to run blocks")
}

pub fn stdout(output: &Output) -> String {
    String::from_utf8_lossy(&output.stdout).to_string()
}
