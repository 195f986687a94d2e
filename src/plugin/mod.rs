//! Plugin System Module
//!
//! Discovers plugins from in-memory modules, shared libraries and
//! directories, keeps them in a name table and a category index, and
//! answers lookups and category filters.

// Internal modules - all access should go through api module
pub(crate) mod builtin;
pub(crate) mod category;
pub(crate) mod discovery;
pub(crate) mod error;
pub(crate) mod index;
pub(crate) mod loader;
pub(crate) mod manager;
pub(crate) mod record;
pub(crate) mod traits;
pub(crate) mod types;

// Public API module - the only public interface for the plugin system
pub mod api;

#[cfg(test)]
pub(crate) mod tests;
