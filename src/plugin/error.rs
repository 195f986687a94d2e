//! Plugin Error Handling
//!
//! Error types for discovery (loading code from a source) and for registry
//! operations (registration, tagging and lookup).

use crate::core::error_handling::ContextualError;
use std::path::{Path, PathBuf};

/// Result type alias for registry operations
pub type RegistryResult<T> = std::result::Result<T, RegistryError>;

/// A plugin source could not be loaded or inspected
#[derive(Debug, thiserror::Error)]
pub enum DiscoveryError {
    #[error("Plugin source not found: {}", path.display())]
    NotFound { path: PathBuf },

    #[error("Failed to load plugin module '{}': {reason}", path.display())]
    LoadFailed { path: PathBuf, reason: String },

    #[error(
        "Plugin module '{}' was built for API version {found} (expected major version {expected})",
        path.display()
    )]
    IncompatibleApi {
        path: PathBuf,
        found: u32,
        expected: u32,
    },

    #[error("Cannot scan '{}': {source}", path.display())]
    Scan {
        path: PathBuf,
        #[source]
        source: glob::PatternError,
    },

    #[error("Cannot read '{}': {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The source loaded but its plugins could not be registered
    #[error("Plugins from '{}' were rejected: {source}", path.display())]
    Rejected {
        path: PathBuf,
        #[source]
        source: Box<RegistryError>,
    },
}

impl DiscoveryError {
    /// The source (file or directory) that failed
    pub fn source_path(&self) -> &Path {
        match self {
            DiscoveryError::NotFound { path }
            | DiscoveryError::LoadFailed { path, .. }
            | DiscoveryError::IncompatibleApi { path, .. }
            | DiscoveryError::Scan { path, .. }
            | DiscoveryError::Io { path, .. }
            | DiscoveryError::Rejected { path, .. } => path,
        }
    }
}

/// Errors raised by the plugin manager
#[derive(Debug, thiserror::Error)]
pub enum RegistryError {
    #[error("Plugin '{name}' is already registered")]
    DuplicateName { name: String },

    #[error("No enabled plugin named '{name}'")]
    NotFound { name: String },

    #[error("Malformed category '{category}': empty segment")]
    MalformedCategory { category: String },

    #[error("Plugin '{name}' does not belong to this manager")]
    UnknownRecord { name: String },

    #[error(transparent)]
    Discovery(#[from] DiscoveryError),

    #[error(
        "Loaded {} plugin(s) but {} source(s) failed",
        loaded.len(),
        failures.len()
    )]
    PartialLoad {
        loaded: Vec<String>,
        failures: Vec<DiscoveryError>,
    },
}

impl ContextualError for DiscoveryError {
    fn is_user_actionable(&self) -> bool {
        match self {
            DiscoveryError::NotFound { .. } | DiscoveryError::IncompatibleApi { .. } => true,
            DiscoveryError::Rejected { source, .. } => source.is_user_actionable(),
            _ => false,
        }
    }

    fn user_message(&self) -> Option<String> {
        self.is_user_actionable().then(|| self.to_string())
    }
}

impl ContextualError for RegistryError {
    fn is_user_actionable(&self) -> bool {
        match self {
            RegistryError::DuplicateName { .. }
            | RegistryError::NotFound { .. }
            | RegistryError::MalformedCategory { .. }
            | RegistryError::PartialLoad { .. } => true,
            RegistryError::UnknownRecord { .. } => false,
            RegistryError::Discovery(e) => e.is_user_actionable(),
        }
    }

    fn user_message(&self) -> Option<String> {
        match self {
            RegistryError::Discovery(e) => e.user_message(),
            RegistryError::PartialLoad { failures, .. } => {
                let sources: Vec<String> = failures
                    .iter()
                    .map(|f| f.source_path().display().to_string())
                    .collect();
                Some(format!("{} (failed: {})", self, sources.join(", ")))
            }
            _ => self.is_user_actionable().then(|| self.to_string()),
        }
    }
}
