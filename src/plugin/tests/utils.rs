//! Plugin Test Utilities
//!
//! Fixture modules, hook-counting plugins and an in-memory module loader
//! shared by the plugin test suites.

use crate::plugin::category::CategoryPath;
use crate::plugin::error::DiscoveryError;
use crate::plugin::loader::ModuleLoader;
use crate::plugin::record::PluginRef;
use crate::plugin::traits::Plugin;
use crate::plugin::types::PluginModule;
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

/// Names of records, in order
pub fn names(records: &[PluginRef]) -> Vec<String> {
    records.iter().map(|r| r.name().to_string()).collect()
}

/// Sorted names of records
pub fn sorted_names(records: &[PluginRef]) -> Vec<String> {
    let mut names = names(records);
    names.sort();
    names
}

macro_rules! fixture_plugin {
    ($name:ident) => {
        #[derive(Debug, Default)]
        pub struct $name;

        impl Plugin for $name {}
    };
    ($name:ident, [$($category:expr),*]) => {
        #[derive(Debug, Default)]
        pub struct $name;

        impl Plugin for $name {
            fn categories(&self) -> Vec<CategoryPath> {
                vec![$(CategoryPath::from($category)),*]
            }
        }
    };
}

fixture_plugin!(BarePlugin1);
fixture_plugin!(BarePlugin2);
fixture_plugin!(BusyPlugin1);
fixture_plugin!(BusyPlugin2);
fixture_plugin!(BaseTextFilter, ["text_filter"]);
fixture_plugin!(BaseFileLocator, ["file_locator"]);
fixture_plugin!(UncategorizedTextFilter, ["text_filter"]);
fixture_plugin!(MarkdownTextFilter, ["text_filter", "markdown"]);
fixture_plugin!(MarkdownFileLocator, ["file_locator", "markdown"]);

/// Two uncategorized plugins
pub fn bare_plugins() -> PluginModule {
    PluginModule::new("bare_plugins")
        .plugin::<BarePlugin1>("BarePlugin1")
        .plugin::<BarePlugin2>("BarePlugin2")
}

/// Two plugins among a re-exported plugin and a helper item
pub fn busy_plugins() -> PluginModule {
    PluginModule::new("busy_plugins")
        .reexport::<BarePlugin1>("BarePlugin1", "bare_plugins")
        .plugin::<BusyPlugin1>("BusyPlugin1")
        .plugin::<BusyPlugin2>("BusyPlugin2")
        .item("HelperClass")
}

/// Plugins declaring overlapping categories
pub fn categorized_plugins() -> PluginModule {
    PluginModule::new("categorized_plugins")
        .plugin::<BaseTextFilter>("BaseTextFilter")
        .plugin::<BaseFileLocator>("BaseFileLocator")
        .plugin::<UncategorizedTextFilter>("UncategorizedTextFilter")
        .plugin::<MarkdownTextFilter>("MarkdownTextFilter")
        .plugin::<MarkdownFileLocator>("MarkdownFileLocator")
}

/// A module exporting nothing loadable
pub fn no_plugins() -> PluginModule {
    PluginModule::new("no_plugins").item("helper")
}

/// Shared enable/disable hook counts
#[derive(Debug, Clone, Default)]
pub struct HookCounter {
    enables: Arc<AtomicUsize>,
    disables: Arc<AtomicUsize>,
}

impl HookCounter {
    pub fn enables(&self) -> usize {
        self.enables.load(Ordering::SeqCst)
    }

    pub fn disables(&self) -> usize {
        self.disables.load(Ordering::SeqCst)
    }
}

/// Plugin whose hook calls can be observed after it is boxed
#[derive(Debug)]
pub struct TrackedPlugin {
    name: String,
    counter: HookCounter,
}

impl TrackedPlugin {
    pub fn new(name: &str) -> Self {
        Self {
            name: name.to_string(),
            counter: HookCounter::default(),
        }
    }

    pub fn counter(&self) -> HookCounter {
        self.counter.clone()
    }
}

impl Plugin for TrackedPlugin {
    fn name(&self) -> String {
        self.name.clone()
    }

    fn on_enable(&mut self) {
        self.counter.enables.fetch_add(1, Ordering::SeqCst);
    }

    fn on_disable(&mut self) {
        self.counter.disables.fetch_add(1, Ordering::SeqCst);
    }
}

/// In-memory stand-in for the shared library loader
///
/// Each registered module is backed by a real (empty) `.mod` file so
/// directory scanning behaves as it does for libraries.
#[derive(Default)]
pub struct FakeLoader {
    modules: HashMap<PathBuf, Option<fn() -> PluginModule>>,
}

impl FakeLoader {
    pub const EXTENSION: &'static str = "mod";

    pub fn new() -> Self {
        Self::default()
    }

    /// Serve `builder`'s module for `dir/file`
    pub fn with_module(mut self, dir: &Path, file: &str, builder: fn() -> PluginModule) -> Self {
        let path = dir.join(file);
        std::fs::write(&path, b"").expect("failed to create fixture file");
        self.modules.insert(path, Some(builder));
        self
    }

    /// Make `dir/file` fail to load
    pub fn with_broken(mut self, dir: &Path, file: &str) -> Self {
        let path = dir.join(file);
        std::fs::write(&path, b"").expect("failed to create fixture file");
        self.modules.insert(path, None);
        self
    }
}

impl ModuleLoader for FakeLoader {
    fn load(&self, path: &Path) -> Result<PluginModule, DiscoveryError> {
        match self.modules.get(path) {
            Some(Some(builder)) => Ok(builder()),
            Some(None) => Err(DiscoveryError::LoadFailed {
                path: path.to_path_buf(),
                reason: "syntax error".to_string(),
            }),
            None => Err(DiscoveryError::NotFound {
                path: path.to_path_buf(),
            }),
        }
    }

    fn accepts(&self, path: &Path) -> bool {
        path.extension().is_some_and(|ext| ext == Self::EXTENSION)
    }
}
