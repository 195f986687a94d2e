//! Plugin Discovery
//!
//! Turns a source into candidate plugin instances without touching the
//! registry. Three strategies:
//!
//! - module: instantiate the plugin factories a namespace defines itself
//! - path: load each file (or each accepted file in a directory) through the
//!   [`ModuleLoader`] and apply the module strategy
//! - file: the path strategy for exactly one file
//!
//! A source that fails to load is reported and the remaining sources are
//! still scanned.

use crate::plugin::error::DiscoveryError;
use crate::plugin::loader::ModuleLoader;
use crate::plugin::types::{Candidate, ExportKind, PluginModule};
use std::path::{Path, PathBuf};

/// One or more filesystem sources, processed in order
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SourcePaths(Vec<PathBuf>);

impl SourcePaths {
    pub fn paths(&self) -> &[PathBuf] {
        &self.0
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl From<&Path> for SourcePaths {
    fn from(path: &Path) -> Self {
        Self(vec![path.to_path_buf()])
    }
}

impl From<PathBuf> for SourcePaths {
    fn from(path: PathBuf) -> Self {
        Self(vec![path])
    }
}

impl From<&PathBuf> for SourcePaths {
    fn from(path: &PathBuf) -> Self {
        Self(vec![path.clone()])
    }
}

impl From<&str> for SourcePaths {
    fn from(path: &str) -> Self {
        Self(vec![PathBuf::from(path)])
    }
}

impl From<Vec<PathBuf>> for SourcePaths {
    fn from(paths: Vec<PathBuf>) -> Self {
        Self(paths)
    }
}

impl From<&[PathBuf]> for SourcePaths {
    fn from(paths: &[PathBuf]) -> Self {
        Self(paths.to_vec())
    }
}

impl<const N: usize> From<[&str; N]> for SourcePaths {
    fn from(paths: [&str; N]) -> Self {
        Self(paths.iter().map(PathBuf::from).collect())
    }
}

impl<const N: usize> From<[&Path; N]> for SourcePaths {
    fn from(paths: [&Path; N]) -> Self {
        Self(paths.iter().map(|p| p.to_path_buf()).collect())
    }
}

/// Candidates loaded from one file
#[derive(Debug)]
pub struct SourceBatch {
    pub source: PathBuf,
    pub candidates: Vec<Candidate>,
}

/// Result of scanning several sources
#[derive(Debug, Default)]
pub struct Discovered {
    /// One batch per loaded file, in scan order
    pub batches: Vec<SourceBatch>,
    pub failures: Vec<DiscoveryError>,
}

impl Discovered {
    pub fn candidates(&self) -> impl Iterator<Item = &Candidate> {
        self.batches.iter().flat_map(|batch| batch.candidates.iter())
    }
}

/// Discovery adapter over an injected module loader
pub struct PluginDiscovery<'a> {
    loader: &'a dyn ModuleLoader,
    recursive: bool,
}

impl<'a> PluginDiscovery<'a> {
    pub fn new(loader: &'a dyn ModuleLoader) -> Self {
        Self {
            loader,
            recursive: false,
        }
    }

    /// Descend into subdirectories when scanning a directory
    pub fn recursive(mut self, recursive: bool) -> Self {
        self.recursive = recursive;
        self
    }

    /// Candidates from an already-loaded namespace
    pub fn from_module(module: &PluginModule) -> Vec<Candidate> {
        module
            .exports()
            .iter()
            .filter(|export| export.origin == module.name())
            .filter_map(|export| match export.kind {
                ExportKind::Plugin(factory) => Some(factory),
                ExportKind::Item => None,
            })
            .map(|factory| Candidate {
                instance: factory(),
                source: module.name().to_string(),
                keep_alive: module.keep_alive().cloned(),
            })
            .collect()
    }

    /// Candidates from one file
    pub fn from_file(&self, path: &Path) -> Result<Vec<Candidate>, DiscoveryError> {
        let module = self.loader.load(path)?;
        let mut candidates = Self::from_module(&module);
        // Attribute file-loaded candidates to the file rather than the namespace.
        let source = path.display().to_string();
        for candidate in &mut candidates {
            candidate.source = source.clone();
        }
        Ok(candidates)
    }

    /// Candidates from every file or directory in `sources`, in order
    pub fn from_paths(&self, sources: &SourcePaths) -> Discovered {
        let mut discovered = Discovered::default();

        for source in sources.paths() {
            let files = if source.is_dir() {
                match self.module_files(source, &mut discovered.failures) {
                    Ok(files) => files,
                    Err(e) => {
                        discovered.failures.push(e);
                        continue;
                    }
                }
            } else if source.exists() {
                vec![source.clone()]
            } else {
                discovered.failures.push(DiscoveryError::NotFound {
                    path: source.clone(),
                });
                continue;
            };

            for file in files {
                match self.from_file(&file) {
                    Ok(candidates) => discovered.batches.push(SourceBatch {
                        source: file,
                        candidates,
                    }),
                    Err(e) => {
                        log::warn!("Skipping plugin source: {}", e);
                        discovered.failures.push(e);
                    }
                }
            }
        }

        discovered
    }

    /// Files in `dir` the loader accepts, sorted
    ///
    /// Only an invalid pattern fails the whole directory. Entries that cannot
    /// be read are added to `failures` and the scan goes on.
    fn module_files(
        &self,
        dir: &Path,
        failures: &mut Vec<DiscoveryError>,
    ) -> Result<Vec<PathBuf>, DiscoveryError> {
        let pattern = if self.recursive { "**/*" } else { "*" };
        let escaped = glob::Pattern::escape(&dir.to_string_lossy());
        let full = format!("{}/{}", escaped.trim_end_matches('/'), pattern);

        let entries = glob::glob(&full).map_err(|source| DiscoveryError::Scan {
            path: dir.to_path_buf(),
            source,
        })?;

        let entries = entries.map(|entry| {
            entry.map_err(|e| DiscoveryError::Io {
                path: e.path().to_path_buf(),
                source: e.into_error(),
            })
        });
        let files = self.accepted_files(entries, failures);
        log::debug!("Found {} module file(s) in {}", files.len(), dir.display());
        Ok(files)
    }

    /// Keep the readable entries the loader accepts; record the unreadable ones
    fn accepted_files<I>(&self, entries: I, failures: &mut Vec<DiscoveryError>) -> Vec<PathBuf>
    where
        I: IntoIterator<Item = Result<PathBuf, DiscoveryError>>,
    {
        let mut files = Vec::new();
        for entry in entries {
            match entry {
                Ok(path) if path.is_file() && self.loader.accepts(&path) => files.push(path),
                Ok(_) => {}
                Err(e) => {
                    log::warn!("Skipping unreadable entry: {}", e);
                    failures.push(e);
                }
            }
        }
        files.sort();
        files
    }
}
