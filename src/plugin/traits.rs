//! Plugin Trait
//!
//! The capability contract every plugin satisfies. Anything that can name
//! itself and react to being enabled or disabled is a plugin; there is no
//! base type to inherit from.

use crate::plugin::category::CategoryPath;

/// Capability contract for a discoverable plugin
///
/// Implementors that also implement `Default` can be exported from a
/// [`PluginModule`](crate::plugin::types::PluginModule), which instantiates
/// them with no arguments during discovery.
pub trait Plugin: Send + Sync + 'static {
    /// Registry identity. Defaults to the implementing type's name without
    /// its module path.
    fn name(&self) -> String {
        short_type_name(std::any::type_name::<Self>()).to_string()
    }

    /// Categories the plugin declares for itself, applied at registration
    fn categories(&self) -> Vec<CategoryPath> {
        Vec::new()
    }

    /// One-line description for listings
    fn description(&self) -> String {
        String::new()
    }

    /// Called when the record moves from disabled to enabled
    fn on_enable(&mut self) {}

    /// Called when the record moves from enabled to disabled
    fn on_disable(&mut self) {}
}

/// `my_crate::brushes::RoundBrush` -> `RoundBrush`
///
/// Generic arguments are kept intact (`Wrapper<a::B>` -> `Wrapper<a::B>`).
pub(crate) fn short_type_name(full: &str) -> &str {
    let base = full.split('<').next().unwrap_or(full);
    match base.rfind("::") {
        Some(pos) => &full[pos + 2..],
        None => full,
    }
}
