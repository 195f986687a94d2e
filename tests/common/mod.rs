//! Common test utilities and helpers
//!
//! Plugin fixtures and an in-memory module loader usable through the public
//! API only.

#![allow(dead_code)]

use blocks::plugin::api::{CategoryPath, DiscoveryError, ModuleLoader, Plugin, PluginModule};
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicUsize, Ordering};

#[derive(Debug, Default)]
pub struct RoundBrush;

impl Plugin for RoundBrush {
    fn name(&self) -> String {
        "roundbrush".to_string()
    }

    fn description(&self) -> String {
        "Soft round brush".to_string()
    }
}

#[derive(Debug, Default)]
pub struct FlatBrush;

impl Plugin for FlatBrush {
    fn name(&self) -> String {
        "flatbrush".to_string()
    }

    fn categories(&self) -> Vec<CategoryPath> {
        vec!["brush".into()]
    }
}

pub static PENCIL_DISABLES: AtomicUsize = AtomicUsize::new(0);

#[derive(Debug, Default)]
pub struct Pencil;

impl Plugin for Pencil {
    fn categories(&self) -> Vec<CategoryPath> {
        vec!["tool".into(), "sketch.line".into()]
    }

    fn on_disable(&mut self) {
        PENCIL_DISABLES.fetch_add(1, Ordering::SeqCst);
    }
}

pub fn brushes() -> PluginModule {
    PluginModule::new("brushes")
        .plugin::<RoundBrush>("RoundBrush")
        .plugin::<FlatBrush>("FlatBrush")
        .item("BRUSH_SIZES")
}

pub fn tools() -> PluginModule {
    PluginModule::new("tools")
        .reexport::<RoundBrush>("RoundBrush", "brushes")
        .plugin::<Pencil>("Pencil")
}

pub fn names(records: &[blocks::PluginRef]) -> Vec<String> {
    records.iter().map(|r| r.name().to_string()).collect()
}

/// Serves prebuilt modules for `.blk` files written into a directory
#[derive(Default)]
pub struct MemoryLoader {
    modules: HashMap<PathBuf, fn() -> PluginModule>,
}

impl MemoryLoader {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_module(mut self, dir: &Path, file: &str, builder: fn() -> PluginModule) -> Self {
        let path = dir.join(file);
        std::fs::write(&path, b"").unwrap();
        self.modules.insert(path, builder);
        self
    }
}

impl ModuleLoader for MemoryLoader {
    fn load(&self, path: &Path) -> Result<PluginModule, DiscoveryError> {
        match self.modules.get(path) {
            Some(builder) => Ok(builder()),
            None => Err(DiscoveryError::LoadFailed {
                path: path.to_path_buf(),
                reason: "not a plugin module".to_string(),
            }),
        }
    }

    fn accepts(&self, path: &Path) -> bool {
        path.extension().is_some_and(|ext| ext == "blk")
    }
}
