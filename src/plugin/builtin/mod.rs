//! Built-in Plugin Implementations
//!
//! Plugins that ship with the binary. Each registers itself into the
//! `builtin` link-time namespace with `submit_plugin!`.

pub mod dump;

use crate::plugin::types::PluginModule;

/// Name of the link-time namespace built-in plugins register into
pub const BUILTIN_MODULE: &str = "builtin";

/// Every built-in plugin linked into the binary
pub fn module() -> PluginModule {
    PluginModule::collected(BUILTIN_MODULE)
}
