//! Plugin Record
//!
//! Wraps one plugin instance with its name, category tags and enabled state.
//! Records are shared (`Arc`) between the manager and callers; state changes
//! through any handle are seen by every later query.

use crate::plugin::category::CategoryPath;
use crate::plugin::traits::Plugin;
use crate::plugin::types::KeepAlive;
use std::collections::BTreeSet;
use std::fmt;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError, RwLock};

/// Shared handle to a registered record
pub type PluginRef = Arc<PluginRecord>;

/// Enabled/disabled state of a record
#[derive(Debug, Clone, Copy, PartialEq, Eq, strum_macros::Display, strum_macros::EnumString)]
#[strum(serialize_all = "lowercase")]
pub enum PluginState {
    Enabled,
    Disabled,
}

pub struct PluginRecord {
    name: String,
    source: String,
    description: String,
    enabled: AtomicBool,
    categories: RwLock<BTreeSet<CategoryPath>>,
    // Declared before `_keep_alive` so the instance is dropped before the
    // library that holds its code.
    instance: Mutex<Box<dyn Plugin>>,
    _keep_alive: Option<KeepAlive>,
}

impl PluginRecord {
    pub(crate) fn new(
        name: String,
        source: String,
        instance: Box<dyn Plugin>,
        keep_alive: Option<KeepAlive>,
    ) -> Self {
        Self {
            description: instance.description(),
            name,
            source,
            enabled: AtomicBool::new(true),
            categories: RwLock::new(BTreeSet::new()),
            instance: Mutex::new(instance),
            _keep_alive: keep_alive,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Module or file the plugin was discovered in
    pub fn source(&self) -> &str {
        &self.source
    }

    pub fn description(&self) -> &str {
        &self.description
    }

    pub fn is_enabled(&self) -> bool {
        self.enabled.load(Ordering::SeqCst)
    }

    pub fn state(&self) -> PluginState {
        if self.is_enabled() {
            PluginState::Enabled
        } else {
            PluginState::Disabled
        }
    }

    /// Enable the record. The plugin's enable hook runs only when the record
    /// was disabled; returns whether a transition happened.
    pub fn enable(&self) -> bool {
        self.transition(true)
    }

    /// Disable the record. The plugin's disable hook runs only when the
    /// record was enabled; returns whether a transition happened.
    pub fn disable(&self) -> bool {
        self.transition(false)
    }

    fn transition(&self, enable: bool) -> bool {
        // The instance lock serializes transitions so each hook fires once.
        let mut instance = self.lock_instance();
        if self.enabled.swap(enable, Ordering::SeqCst) == enable {
            return false;
        }
        if enable {
            instance.on_enable();
        } else {
            instance.on_disable();
        }
        log::debug!("Plugin '{}' is now {}", self.name, self.state());
        true
    }

    /// Category tags in sorted order
    pub fn categories(&self) -> Vec<CategoryPath> {
        self.categories
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .iter()
            .cloned()
            .collect()
    }

    pub fn has_category(&self, path: &CategoryPath) -> bool {
        self.categories
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .contains(path)
    }

    /// Only the manager tags records, so the record and the index stay in step.
    pub(crate) fn add_category(&self, path: &CategoryPath) -> bool {
        self.categories
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .insert(path.clone())
    }

    /// Run `f` with exclusive access to the plugin instance
    pub fn with_instance<R>(&self, f: impl FnOnce(&mut dyn Plugin) -> R) -> R {
        let mut instance = self.lock_instance();
        f(instance.as_mut())
    }

    fn lock_instance(&self) -> MutexGuard<'_, Box<dyn Plugin>> {
        self.instance.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl fmt::Debug for PluginRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PluginRecord")
            .field("name", &self.name)
            .field("source", &self.source)
            .field("state", &self.state())
            .field("categories", &self.categories())
            .finish()
    }
}
