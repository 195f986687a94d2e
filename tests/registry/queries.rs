//! Name lookup, category filtering and enable/disable state

use crate::common::{brushes, names, tools, PENCIL_DISABLES};
use blocks::{CategorySpec, PluginManager, RegistryError};
use std::sync::atomic::Ordering;

fn loaded() -> PluginManager {
    let mut manager = PluginManager::new();
    manager.load_from_module(&brushes()).unwrap();
    manager.load_from_module(&tools()).unwrap();
    manager
}

#[test]
fn test_roundbrush_walkthrough() {
    let mut manager = PluginManager::new();
    let loaded = manager.load_from_module_as(&brushes(), "brush").unwrap();
    let roundbrush: Vec<_> = loaded
        .iter()
        .filter(|r| r.name() == "roundbrush")
        .cloned()
        .collect();
    manager.apply_category("community", &roundbrush).unwrap();

    let query = "community.brush";
    assert_eq!(
        names(&manager.filter_by_category(query, false).unwrap()),
        vec!["roundbrush"]
    );

    manager.get_by_name("roundbrush", false).unwrap().disable();
    assert!(manager.filter_by_category(query, false).unwrap().is_empty());
    assert_eq!(
        names(&manager.filter_by_category(query, true).unwrap()),
        vec!["roundbrush"]
    );
}

#[test]
fn test_list_and_dotted_forms_agree() {
    let manager = loaded();
    let dotted = manager.filter_by_category("sketch.line", false).unwrap();
    let listed = manager
        .filter_by_category(CategorySpec::from(vec!["sketch.line"]), false)
        .unwrap();
    assert_eq!(names(&dotted), vec!["Pencil"]);
    assert_eq!(names(&dotted), names(&listed));

    // "sketch" alone was never applied.
    assert!(manager.filter_by_category("sketch", false).unwrap().is_empty());
}

#[test]
fn test_disable_hook_fires_once() {
    let manager = loaded();
    let pencil = manager.get_by_name("Pencil", false).unwrap();
    let before = PENCIL_DISABLES.load(Ordering::SeqCst);

    assert!(pencil.disable());
    assert!(!pencil.disable());
    assert_eq!(PENCIL_DISABLES.load(Ordering::SeqCst), before + 1);

    assert!(matches!(
        manager.get_by_name("Pencil", false),
        Err(RegistryError::NotFound { .. })
    ));
    assert!(manager.get_by_name("Pencil", true).unwrap().enable());
    assert_eq!(names(&manager.filter_by_category("tool", false).unwrap()), vec!["Pencil"]);
}

#[test]
fn test_records_carry_metadata() {
    let manager = loaded();
    let roundbrush = manager.get_by_name("roundbrush", false).unwrap();
    assert_eq!(roundbrush.source(), "brushes");
    assert_eq!(roundbrush.description(), "Soft round brush");
    assert!(roundbrush.categories().is_empty());

    let rendered: Vec<String> = manager.categories().iter().map(|c| c.to_string()).collect();
    assert_eq!(rendered, vec!["brush", "sketch.line", "tool"]);
}

#[test]
fn test_declared_dotted_category_in_every_spelling() {
    let manager = loaded();
    for spec in [
        CategorySpec::from("sketch.line"),
        CategorySpec::from(["sketch", "line"]),
        CategorySpec::from(["sketch.line"]),
        CategorySpec::from(["tool", "sketch", "line"]),
    ] {
        assert_eq!(
            names(&manager.filter_by_category(spec, false).unwrap()),
            vec!["Pencil"]
        );
    }
    assert!(manager.filter_by_category("sketch", false).unwrap().is_empty());
}
