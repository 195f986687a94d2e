//! Plugin Manager
//!
//! Central coordinator: runs discovery, wraps candidates into records, and
//! owns the name table and the category index. Loading takes `&mut self` and
//! must finish before concurrent queries start; queries take `&self`.

use crate::plugin::category::{CategoryPath, CategorySpec};
use crate::plugin::discovery::{PluginDiscovery, SourcePaths};
use crate::plugin::error::{DiscoveryError, RegistryError, RegistryResult};
use crate::plugin::index::CategoryIndex;
use crate::plugin::loader::{LibraryLoader, ModuleLoader};
use crate::plugin::record::{PluginRecord, PluginRef};
use crate::plugin::types::{Candidate, PluginModule};
use log::{debug, info, warn};
use std::collections::{HashMap, HashSet};
use std::fmt;
use std::path::Path;
use std::sync::Arc;

/// Options for path-based loading
#[derive(Debug, Clone, Default)]
pub struct LoadOptions {
    /// Categories applied to every plugin loaded by the call
    pub categories: CategorySpec,
    /// Scan directories recursively
    pub recursive: bool,
}

impl LoadOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn as_category(mut self, categories: impl Into<CategorySpec>) -> Self {
        self.categories = categories.into();
        self
    }

    pub fn recursive(mut self, recursive: bool) -> Self {
        self.recursive = recursive;
        self
    }
}

/// Central plugin manager responsible for:
/// - loading plugins from modules, files and directories
/// - keeping plugin names unique
/// - category tagging and filtering
/// - name lookup with enabled/disabled visibility
pub struct PluginManager {
    loader: Box<dyn ModuleLoader>,

    /// Records in registration order
    records: Vec<PluginRef>,

    by_name: HashMap<String, PluginRef>,

    index: CategoryIndex,
}

impl PluginManager {
    /// Create an empty manager that loads shared libraries from paths
    pub fn new() -> Self {
        Self::with_loader(LibraryLoader::new())
    }

    /// Create an empty manager with a custom module loader
    pub fn with_loader(loader: impl ModuleLoader + 'static) -> Self {
        Self {
            loader: Box::new(loader),
            records: Vec::new(),
            by_name: HashMap::new(),
            index: CategoryIndex::new(),
        }
    }

    /// Load the plugins an in-memory module defines
    pub fn load_from_module(&mut self, module: &PluginModule) -> RegistryResult<Vec<PluginRef>> {
        self.load_from_module_as(module, CategorySpec::none())
    }

    /// Load the plugins an in-memory module defines and tag each with `as_category`
    pub fn load_from_module_as(
        &mut self,
        module: &PluginModule,
        as_category: impl Into<CategorySpec>,
    ) -> RegistryResult<Vec<PluginRef>> {
        let candidates = PluginDiscovery::from_module(module);
        let loaded = self.register(candidates, &as_category.into())?;
        info!(
            "Loaded {} plugin(s) from module '{}'",
            loaded.len(),
            module.name()
        );
        Ok(loaded)
    }

    /// Load plugins from one or more files or directories, in order
    pub fn load_from_path(
        &mut self,
        paths: impl Into<SourcePaths>,
    ) -> RegistryResult<Vec<PluginRef>> {
        self.load_from_path_with(paths, &LoadOptions::default())
    }

    /// Load plugins from one or more files or directories, in order
    ///
    /// Sources that fail to load do not stop the others. Each loaded file is
    /// registered as its own batch, so a file repeating a registered name is
    /// rejected as a whole (`DiscoveryError::Rejected`) while the other files
    /// stay registered. When some sources failed `RegistryError::PartialLoad`
    /// lists the loaded plugins together with the failures; a single failure
    /// with nothing loaded is returned as its own error.
    pub fn load_from_path_with(
        &mut self,
        paths: impl Into<SourcePaths>,
        options: &LoadOptions,
    ) -> RegistryResult<Vec<PluginRef>> {
        let paths = paths.into();
        options.categories.validate()?;

        let discovered = PluginDiscovery::new(self.loader.as_ref())
            .recursive(options.recursive)
            .from_paths(&paths);
        let mut failures = discovered.failures;
        let mut loaded = Vec::new();
        for batch in discovered.batches {
            match self.register(batch.candidates, &options.categories) {
                Ok(records) => loaded.extend(records),
                Err(e) => {
                    warn!("Rejected plugins from {}: {}", batch.source.display(), e);
                    failures.push(DiscoveryError::Rejected {
                        path: batch.source,
                        source: Box::new(e),
                    });
                }
            }
        }

        info!(
            "Loaded {} plugin(s) from {} path(s), {} source(s) failed",
            loaded.len(),
            paths.paths().len(),
            failures.len()
        );

        match failures.len() {
            0 => Ok(loaded),
            1 if loaded.is_empty() => Err(match failures.remove(0) {
                DiscoveryError::Rejected { source, .. } => *source,
                e => RegistryError::Discovery(e),
            }),
            _ => Err(RegistryError::PartialLoad {
                loaded: loaded.iter().map(|r| r.name().to_string()).collect(),
                failures,
            }),
        }
    }

    /// Load plugins from a single file
    pub fn load_from_file(&mut self, path: impl AsRef<Path>) -> RegistryResult<Vec<PluginRef>> {
        self.load_from_file_as(path, CategorySpec::none())
    }

    /// Load plugins from a single file and tag each with `as_category`
    pub fn load_from_file_as(
        &mut self,
        path: impl AsRef<Path>,
        as_category: impl Into<CategorySpec>,
    ) -> RegistryResult<Vec<PluginRef>> {
        let path = path.as_ref();
        let as_category = as_category.into();
        as_category.validate()?;

        let candidates = PluginDiscovery::new(self.loader.as_ref()).from_file(path)?;
        let loaded = self.register(candidates, &as_category)?;
        info!("Loaded {} plugin(s) from {}", loaded.len(), path.display());
        Ok(loaded)
    }

    /// Register a batch of candidates
    ///
    /// Every check runs before anything is inserted, so a rejected batch
    /// leaves the registry untouched.
    fn register(
        &mut self,
        candidates: Vec<Candidate>,
        as_category: &CategorySpec,
    ) -> RegistryResult<Vec<PluginRef>> {
        as_category.validate()?;

        let mut batch_names = HashSet::new();
        let mut prepared = Vec::with_capacity(candidates.len());
        for candidate in candidates {
            let name = candidate.name();
            if self.by_name.contains_key(&name) || !batch_names.insert(name.clone()) {
                return Err(RegistryError::DuplicateName { name });
            }
            let declared = candidate.instance.categories();
            CategorySpec::from(declared.clone()).validate()?;
            prepared.push((name, declared, candidate));
        }

        let mut loaded = Vec::with_capacity(prepared.len());
        for (name, declared, candidate) in prepared {
            let record = Arc::new(PluginRecord::new(
                name.clone(),
                candidate.source,
                candidate.instance,
                candidate.keep_alive,
            ));
            self.records.push(Arc::clone(&record));
            self.by_name.insert(name.clone(), Arc::clone(&record));

            for path in declared.iter().chain(as_category.paths()) {
                self.tag(&record, path);
            }
            debug!(
                "Registered plugin '{}' from '{}' with categories {:?}",
                name,
                record.source(),
                record
                    .categories()
                    .iter()
                    .map(ToString::to_string)
                    .collect::<Vec<_>>()
            );
            loaded.push(record);
        }
        Ok(loaded)
    }

    fn tag(&mut self, record: &PluginRecord, path: &CategoryPath) -> bool {
        let indexed = self.index.insert(path, record.name());
        let tagged = record.add_category(path);
        indexed || tagged
    }

    /// Add `category` to each record in `to`
    ///
    /// Tagging a record with a category it already carries is a no-op and
    /// does not touch the plugin instance. All records must belong to this
    /// manager; nothing is tagged if one does not.
    pub fn apply_category<I>(
        &mut self,
        category: impl Into<CategorySpec>,
        to: I,
    ) -> RegistryResult<()>
    where
        I: IntoIterator,
        I::Item: AsRef<PluginRecord>,
    {
        let category = category.into();
        category.validate()?;

        let mut targets = Vec::new();
        for item in to {
            let record = item.as_ref();
            let owned = self
                .by_name
                .get(record.name())
                .filter(|existing| std::ptr::eq(Arc::as_ptr(*existing), record))
                .ok_or_else(|| RegistryError::UnknownRecord {
                    name: record.name().to_string(),
                })?;
            targets.push(Arc::clone(owned));
        }

        for record in &targets {
            for path in category.paths() {
                if self.tag(record, path) {
                    debug!("Tagged plugin '{}' with '{}'", record.name(), path);
                }
            }
        }
        Ok(())
    }

    /// Look up a plugin by exact name
    ///
    /// Disabled plugins are treated as absent unless `include_disabled`.
    pub fn get_by_name(&self, name: &str, include_disabled: bool) -> RegistryResult<PluginRef> {
        match self.by_name.get(name) {
            Some(record) if include_disabled || record.is_enabled() => Ok(Arc::clone(record)),
            Some(_) => {
                debug!("Plugin '{}' exists but is disabled", name);
                Err(RegistryError::NotFound {
                    name: name.to_string(),
                })
            }
            None => Err(RegistryError::NotFound {
                name: name.to_string(),
            }),
        }
    }

    /// Records satisfying every category in `category_spec`, in registration order
    pub fn filter_by_category(
        &self,
        category_spec: impl Into<CategorySpec>,
        include_disabled: bool,
    ) -> RegistryResult<Vec<PluginRef>> {
        let spec = category_spec.into();
        spec.validate()?;

        let matching = self.index.matching(&spec.flatten());
        Ok(self
            .records
            .iter()
            .filter(|record| matching.contains(record.name()))
            .filter(|record| include_disabled || record.is_enabled())
            .cloned()
            .collect())
    }

    /// Every registered record, in registration order
    pub fn all(&self, include_disabled: bool) -> Vec<PluginRef> {
        self.records
            .iter()
            .filter(|record| include_disabled || record.is_enabled())
            .cloned()
            .collect()
    }

    /// Every category carried by at least one record
    pub fn categories(&self) -> Vec<CategoryPath> {
        self.index.categories().cloned().collect()
    }

    /// Number of registered records, enabled or not
    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

impl Default for PluginManager {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for PluginManager {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PluginManager")
            .field(
                "plugins",
                &self.records.iter().map(|r| r.name()).collect::<Vec<_>>(),
            )
            .field("categories", &self.index.len())
            .finish()
    }
}
