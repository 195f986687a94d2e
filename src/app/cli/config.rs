//! TOML configuration file parsing and loading
//!
//! The default file is `<config dir>/Blocks/blocks.toml`. Recognised keys:
//!
//! ```toml
//! plugin-path = ["~/.local/lib/blocks", "/opt/brushes/libround.so"]
//! recursive = true
//! disable = "dump-json"
//! color = false
//! log-level = "debug"
//! log-format = "ext"
//! log-file = "none"
//!
//! [categories]
//! community = ["roundbrush", "flatbrush"]
//! "output.text" = "dump"
//! ```
//!
//! Keys taking a list also accept a single string.

use super::args::Args;
use crate::core::error_handling::ContextualError;
use std::path::{Path, PathBuf};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Configuration file does not exist: {}", path.display())]
    Missing { path: PathBuf },

    #[error("Cannot read configuration file {}: {source}", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Cannot parse configuration file {}: {source}", path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },

    #[error("Invalid value for '{key}': {message}")]
    Invalid { key: String, message: String },
}

impl ContextualError for ConfigError {
    fn is_user_actionable(&self) -> bool {
        true
    }

    fn user_message(&self) -> Option<String> {
        Some(self.to_string())
    }
}

/// Default configuration file location
pub fn default_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|d| d.join("Blocks").join("blocks.toml"))
}

/// Read and parse a configuration file
///
/// An explicitly given file must exist; a missing default file is not an
/// error and yields `None`.
pub fn load_config_file(config_file: Option<&Path>) -> Result<Option<toml::Table>, ConfigError> {
    let path = match config_file {
        Some(path) if !path.exists() => {
            return Err(ConfigError::Missing {
                path: path.to_path_buf(),
            })
        }
        Some(path) => path.to_path_buf(),
        None => match default_config_path() {
            Some(path) if path.exists() => path,
            _ => return Ok(None),
        },
    };

    let contents = std::fs::read_to_string(&path).map_err(|source| ConfigError::Read {
        path: path.clone(),
        source,
    })?;
    let table = toml::from_str::<toml::Table>(&contents)
        .map_err(|source| ConfigError::Parse { path: path.clone(), source })?;
    log::debug!("Loaded configuration from {}", path.display());
    Ok(Some(table))
}

impl Args {
    /// Apply TOML configuration values to Args
    ///
    /// Options already given on the command line are kept. List options
    /// are merged with configuration entries first.
    pub fn apply_toml_values(&mut self, config: &toml::Table) -> Result<(), ConfigError> {
        let config_paths: Vec<PathBuf> = string_list(config, "plugin-path")?
            .into_iter()
            .map(PathBuf::from)
            .collect();
        self.plugin_paths = merge(config_paths, std::mem::take(&mut self.plugin_paths));

        let config_disable = string_list(config, "disable")?;
        self.disable = merge(config_disable, std::mem::take(&mut self.disable));

        if let Some(recursive) = boolean(config, "recursive")? {
            self.recursive |= recursive;
        }
        if let Some(color) = boolean(config, "color")? {
            self.config_color = Some(color);
        }
        if self.log_level.is_none() {
            self.log_level = string(config, "log-level")?;
        }
        if self.log_format.is_none() {
            self.log_format = string(config, "log-format")?;
        }
        if self.log_file.is_none() {
            self.log_file = string(config, "log-file")?.map(PathBuf::from);
        }

        if let Some(value) = config.get("categories") {
            let table = value.as_table().ok_or_else(|| invalid("categories", "expected a table"))?;
            for category in table.keys() {
                let names = string_list(table, category)?;
                self.category_rules.push((category.clone(), names));
            }
        }
        Ok(())
    }
}

fn invalid(key: &str, message: &str) -> ConfigError {
    ConfigError::Invalid {
        key: key.to_string(),
        message: message.to_string(),
    }
}

fn string(config: &toml::Table, key: &str) -> Result<Option<String>, ConfigError> {
    match config.get(key) {
        None => Ok(None),
        Some(value) => value
            .as_str()
            .map(|s| Some(s.to_string()))
            .ok_or_else(|| invalid(key, "expected a string")),
    }
}

fn boolean(config: &toml::Table, key: &str) -> Result<Option<bool>, ConfigError> {
    match config.get(key) {
        None => Ok(None),
        Some(value) => value
            .as_bool()
            .map(Some)
            .ok_or_else(|| invalid(key, "expected true or false")),
    }
}

/// A string or an array of strings
fn string_list(config: &toml::Table, key: &str) -> Result<Vec<String>, ConfigError> {
    let Some(value) = config.get(key) else {
        return Ok(Vec::new());
    };

    if let Some(single) = value.as_str() {
        return Ok(vec![single.to_string()]);
    }
    let array = value
        .as_array()
        .ok_or_else(|| invalid(key, "expected a string or an array of strings"))?;
    array
        .iter()
        .map(|item| {
            item.as_str()
                .map(str::to_string)
                .ok_or_else(|| invalid(key, "array entries must be strings"))
        })
        .collect()
}

/// `first` then `second`, dropping repeats
fn merge<T: PartialEq>(first: Vec<T>, second: Vec<T>) -> Vec<T> {
    let mut merged = Vec::with_capacity(first.len() + second.len());
    for item in first.into_iter().chain(second) {
        if !merged.contains(&item) {
            merged.push(item);
        }
    }
    merged
}
