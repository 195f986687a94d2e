pub mod app;
pub mod core;
pub mod plugin;

pub use plugin::api::{
    CategoryPath, CategorySpec, LoadOptions, Plugin, PluginManager, PluginModule, PluginRef,
    RegistryError,
};

#[doc(hidden)]
pub use inventory;
