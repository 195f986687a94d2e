//! Public API for the plugin system
//!
//! External modules should import from here rather than directly from
//! internal modules.

// Core plugin management
pub use crate::plugin::manager::{LoadOptions, PluginManager};

// Error handling
pub use crate::plugin::error::{DiscoveryError, RegistryError, RegistryResult};

// Plugin contract and records
pub use crate::plugin::record::{PluginRecord, PluginRef, PluginState};
pub use crate::plugin::traits::Plugin;

// Categories
pub use crate::plugin::category::{CategoryPath, CategorySpec};

// Module namespaces and link-time registration
pub use crate::plugin::types::{Export, ExportKind, KeepAlive, LinkedPlugin, PluginFactory, PluginModule};

// Plugin discovery and loading
pub use crate::plugin::discovery::SourcePaths;
pub use crate::plugin::loader::{LibraryLoader, ModuleLoader, API_VERSION_SYMBOL, MODULE_SYMBOL};
