//! Loading plugins from modules, files and directories

use crate::common::{brushes, names, tools, MemoryLoader};
use blocks::plugin::api::{DiscoveryError, LoadOptions, SourcePaths};
use blocks::{PluginManager, RegistryError};

#[test]
fn test_load_from_module_skips_items_and_reexports() {
    let mut manager = PluginManager::new();
    let brushes = manager.load_from_module(&brushes()).unwrap();
    let tools = manager.load_from_module(&tools()).unwrap();

    assert_eq!(names(&brushes), vec!["roundbrush", "flatbrush"]);
    assert_eq!(names(&tools), vec!["Pencil"]);
    assert_eq!(manager.len(), 3);
}

#[test]
fn test_loading_the_same_module_twice_is_rejected() {
    let mut manager = PluginManager::new();
    manager.load_from_module(&brushes()).unwrap();

    match manager.load_from_module(&brushes()) {
        Err(RegistryError::DuplicateName { name }) => assert_eq!(name, "roundbrush"),
        other => panic!("Expected DuplicateName, got {:?}", other),
    }
    assert_eq!(manager.len(), 2);
}

#[test]
fn test_load_directory_in_sorted_order() {
    let dir = tempfile::tempdir().unwrap();
    let loader = MemoryLoader::new()
        .with_module(dir.path(), "b_tools.blk", tools)
        .with_module(dir.path(), "a_brushes.blk", brushes);
    std::fs::write(dir.path().join("README.md"), "not a plugin").unwrap();

    let mut manager = PluginManager::with_loader(loader);
    let loaded = manager.load_from_path(dir.path()).unwrap();
    assert_eq!(names(&loaded), vec!["roundbrush", "flatbrush", "Pencil"]);
}

#[test]
fn test_load_from_file_as_category_list() {
    let dir = tempfile::tempdir().unwrap();
    let loader = MemoryLoader::new().with_module(dir.path(), "brushes.blk", brushes);
    let mut manager = PluginManager::with_loader(loader);

    manager
        .load_from_file_as(dir.path().join("brushes.blk"), vec!["community", "paint"])
        .unwrap();
    let found = manager
        .filter_by_category("community.paint", false)
        .unwrap();
    assert_eq!(names(&found), vec!["roundbrush", "flatbrush"]);
}

#[test]
fn test_missing_path_among_several() {
    let dir = tempfile::tempdir().unwrap();
    let loader = MemoryLoader::new().with_module(dir.path(), "brushes.blk", brushes);
    let mut manager = PluginManager::with_loader(loader);

    let sources = SourcePaths::from(vec![
        dir.path().join("absent"),
        dir.path().join("brushes.blk"),
    ]);
    match manager.load_from_path_with(sources, &LoadOptions::new()) {
        Err(RegistryError::PartialLoad { loaded, failures }) => {
            assert_eq!(loaded, vec!["roundbrush", "flatbrush"]);
            assert!(matches!(failures[0], DiscoveryError::NotFound { .. }));
        }
        other => panic!("Expected PartialLoad, got {:?}", other),
    }
    assert!(manager.get_by_name("flatbrush", false).is_ok());
}

#[test]
fn test_library_loader_reports_missing_library() {
    let mut manager = PluginManager::new();
    assert!(matches!(
        manager.load_from_file("/no/such/libbrushes.so"),
        Err(RegistryError::Discovery(DiscoveryError::NotFound { .. }))
    ));
}
