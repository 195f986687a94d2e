//! Type definitions for the plugin system
//!
//! A [`PluginModule`] is an in-memory namespace of exports. Discovery walks
//! the exports and instantiates the plugin factories the namespace defines
//! itself; re-exported factories and plain items are skipped.

use crate::plugin::traits::Plugin;
use std::any::Any;
use std::fmt;
use std::sync::Arc;

/// Creates a fresh plugin instance with no arguments
pub type PluginFactory = fn() -> Box<dyn Plugin>;

/// Opaque guard that must outlive everything created from a module
/// (for dynamically loaded modules, the shared library itself)
pub type KeepAlive = Arc<dyn Any + Send + Sync>;

/// What a module export is
#[derive(Clone, Copy)]
pub enum ExportKind {
    /// A plugin type that can be instantiated
    Plugin(PluginFactory),
    /// Anything else: helper types, functions, constants
    Item,
}

/// One public export of a module namespace
#[derive(Clone)]
pub struct Export {
    /// Name the export is visible under
    pub name: String,
    /// Namespace that defined the export
    pub origin: String,
    pub kind: ExportKind,
}

impl fmt::Debug for Export {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let kind = match self.kind {
            ExportKind::Plugin(_) => "plugin",
            ExportKind::Item => "item",
        };
        f.debug_struct("Export")
            .field("name", &self.name)
            .field("origin", &self.origin)
            .field("kind", &kind)
            .finish()
    }
}

/// An already-loaded namespace of exports
#[derive(Clone)]
pub struct PluginModule {
    name: String,
    exports: Vec<Export>,
    keep_alive: Option<KeepAlive>,
}

impl PluginModule {
    /// Create an empty module
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            exports: Vec::new(),
            keep_alive: None,
        }
    }

    /// Export a plugin type defined by this module
    pub fn plugin<P: Plugin + Default>(self, export_name: &str) -> Self {
        let origin = self.name.clone();
        self.export(export_name, origin, ExportKind::Plugin(instantiate::<P>))
    }

    /// Export a plugin factory defined by this module
    pub fn factory(self, export_name: &str, factory: PluginFactory) -> Self {
        let origin = self.name.clone();
        self.export(export_name, origin, ExportKind::Plugin(factory))
    }

    /// Re-export a plugin type defined by another module
    pub fn reexport<P: Plugin + Default>(self, export_name: &str, origin: &str) -> Self {
        self.export(export_name, origin, ExportKind::Plugin(instantiate::<P>))
    }

    /// Export something that is not a plugin
    pub fn item(self, export_name: &str) -> Self {
        let origin = self.name.clone();
        self.export(export_name, origin, ExportKind::Item)
    }

    fn export(mut self, name: &str, origin: impl Into<String>, kind: ExportKind) -> Self {
        self.exports.push(Export {
            name: name.to_string(),
            origin: origin.into(),
            kind,
        });
        self
    }

    /// Attach a guard that every record created from this module retains
    pub fn with_keep_alive(mut self, guard: KeepAlive) -> Self {
        self.keep_alive = Some(guard);
        self
    }

    /// Assemble the namespace registered at link time under `name` with
    /// [`submit_plugin!`](crate::submit_plugin)
    pub fn collected(name: &str) -> Self {
        inventory::iter::<LinkedPlugin>()
            .filter(|linked| linked.module == name)
            .fold(Self::new(name), |module, linked| {
                module.factory(linked.export_name, linked.factory)
            })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn exports(&self) -> &[Export] {
        &self.exports
    }

    pub fn keep_alive(&self) -> Option<&KeepAlive> {
        self.keep_alive.as_ref()
    }
}

impl fmt::Debug for PluginModule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PluginModule")
            .field("name", &self.name)
            .field("exports", &self.exports)
            .field("keep_alive", &self.keep_alive.is_some())
            .finish()
    }
}

fn instantiate<P: Plugin + Default>() -> Box<dyn Plugin> {
    Box::new(P::default())
}

/// A plugin registered into a named in-process namespace at link time
pub struct LinkedPlugin {
    pub module: &'static str,
    pub export_name: &'static str,
    pub factory: PluginFactory,
}

inventory::collect!(LinkedPlugin);

/// Register a `Plugin + Default` type into a link-time namespace
///
/// ```ignore
/// blocks::submit_plugin!("builtin", RoundBrush);
/// let module = PluginModule::collected("builtin");
/// ```
#[macro_export]
macro_rules! submit_plugin {
    ($module:expr, $plugin:ty) => {
        $crate::inventory::submit! {
            $crate::plugin::api::LinkedPlugin {
                module: $module,
                export_name: stringify!($plugin),
                factory: || -> ::std::boxed::Box<dyn $crate::plugin::api::Plugin> {
                    ::std::boxed::Box::new(<$plugin as ::std::default::Default>::default())
                },
            }
        }
    };
}

/// A discovered plugin instance waiting to be registered
pub struct Candidate {
    pub instance: Box<dyn Plugin>,
    /// Module or file the candidate came from
    pub source: String,
    pub keep_alive: Option<KeepAlive>,
}

impl Candidate {
    pub fn name(&self) -> String {
        self.instance.name()
    }
}

impl fmt::Debug for Candidate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Candidate")
            .field("name", &self.instance.name())
            .field("source", &self.source)
            .finish()
    }
}
