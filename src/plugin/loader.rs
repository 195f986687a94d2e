//! Module loaders
//!
//! Turning a file into a [`PluginModule`] is the host's job; the registry only
//! sees the [`ModuleLoader`] trait. [`LibraryLoader`] is the default
//! implementation and loads plugin crates compiled as shared libraries.
//!
//! A plugin crate (built with `crate-type = ["cdylib"]`) exposes its module
//! with [`export_plugin_module!`](crate::export_plugin_module):
//!
//! ```ignore
//! fn module() -> blocks::PluginModule {
//!     blocks::PluginModule::new("brushes")
//!         .plugin::<RoundBrush>("RoundBrush")
//!         .plugin::<FlatBrush>("FlatBrush")
//! }
//!
//! blocks::export_plugin_module!(module);
//! ```
//!
//! Host and plugin must be built with the same compiler and the same
//! `blocks` version: the module crosses the library boundary as a Rust value.

use crate::core::version;
use crate::plugin::error::DiscoveryError;
use crate::plugin::types::PluginModule;
use libloading::{Library, Symbol};
use std::path::Path;
use std::sync::Arc;

/// Exported by plugin libraries: the API version they were built against
pub const API_VERSION_SYMBOL: &[u8] = b"blocks_plugin_api_version\0";

/// Exported by plugin libraries: builds the library's module
pub const MODULE_SYMBOL: &[u8] = b"blocks_plugin_module\0";

type ApiVersionFn = extern "C" fn() -> u32;
type ModuleFn = fn() -> PluginModule;

/// Host-supplied primitive that loads the code at a path into a module
pub trait ModuleLoader: Send + Sync {
    /// Load the file at `path` into a namespace
    fn load(&self, path: &Path) -> Result<PluginModule, DiscoveryError>;

    /// Whether a file found while scanning a directory should be loaded
    fn accepts(&self, path: &Path) -> bool;
}

/// Loads platform shared libraries (`.so`, `.dylib`, `.dll`)
#[derive(Debug, Clone, Default)]
pub struct LibraryLoader;

impl LibraryLoader {
    pub fn new() -> Self {
        Self
    }

    fn load_failed(path: &Path, e: impl std::fmt::Display) -> DiscoveryError {
        DiscoveryError::LoadFailed {
            path: path.to_path_buf(),
            reason: e.to_string(),
        }
    }
}

impl ModuleLoader for LibraryLoader {
    fn load(&self, path: &Path) -> Result<PluginModule, DiscoveryError> {
        if !path.is_file() {
            return Err(DiscoveryError::NotFound {
                path: path.to_path_buf(),
            });
        }

        log::debug!("Loading plugin library {}", path.display());

        // SAFETY: loading a library runs its initializers. Plugin libraries
        // are trusted code supplied by the host's configuration.
        let library = unsafe { Library::new(path) }.map_err(|e| Self::load_failed(path, e))?;

        let found = {
            // SAFETY: the symbol is declared by `export_plugin_module!` with
            // this exact signature.
            let api_version: Symbol<'_, ApiVersionFn> = unsafe { library.get(API_VERSION_SYMBOL) }
                .map_err(|e| Self::load_failed(path, e))?;
            api_version()
        };
        if !version::is_api_compatible(found) {
            return Err(DiscoveryError::IncompatibleApi {
                path: path.to_path_buf(),
                found,
                expected: version::major_version(version::get_api_version()),
            });
        }

        let module = {
            // SAFETY: same declaration as above; the API version check makes
            // a mismatched `PluginModule` layout unlikely but cannot rule out
            // a different compiler, which is documented at module level.
            let entry: Symbol<'_, ModuleFn> = unsafe { library.get(MODULE_SYMBOL) }
                .map_err(|e| Self::load_failed(path, e))?;
            entry()
        };

        log::debug!(
            "Loaded module '{}' with {} export(s) from {}",
            module.name(),
            module.exports().len(),
            path.display()
        );
        Ok(module.with_keep_alive(Arc::new(library)))
    }

    fn accepts(&self, path: &Path) -> bool {
        path.extension()
            .is_some_and(|ext| ext == std::env::consts::DLL_EXTENSION)
    }
}

/// Export a module builder from a plugin library
///
/// `$builder` is a `fn() -> PluginModule`.
#[macro_export]
macro_rules! export_plugin_module {
    ($builder:path) => {
        #[no_mangle]
        pub extern "C" fn blocks_plugin_api_version() -> u32 {
            $crate::core::version::get_api_version()
        }

        #[no_mangle]
        pub fn blocks_plugin_module() -> $crate::plugin::api::PluginModule {
            $builder()
        }
    };
}
