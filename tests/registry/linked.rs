//! Plugins registered into a link-time namespace with `submit_plugin!`

use crate::common::{names, FlatBrush, RoundBrush};
use blocks::{PluginManager, PluginModule};

blocks::submit_plugin!("integration_brushes", RoundBrush);
blocks::submit_plugin!("integration_brushes", FlatBrush);

#[test]
fn test_collected_namespace_loads_like_any_module() {
    let module = PluginModule::collected("integration_brushes");
    assert_eq!(module.exports().len(), 2);

    let mut manager = PluginManager::new();
    let mut loaded = names(&manager.load_from_module_as(&module, "linked").unwrap());
    loaded.sort();
    assert_eq!(loaded, vec!["flatbrush", "roundbrush"]);

    let linked_brushes = manager.filter_by_category(["linked", "brush"], false).unwrap();
    assert_eq!(names(&linked_brushes), vec!["flatbrush"]);
}

#[test]
fn test_unknown_namespace_is_empty() {
    let module = PluginModule::collected("no_such_namespace");
    assert!(module.exports().is_empty());
    let mut manager = PluginManager::new();
    assert!(manager.load_from_module(&module).unwrap().is_empty());
}
