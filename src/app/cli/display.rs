//! CLI display utilities for formatting output

use crate::core::styles::StyleRole;
use crate::plugin::api::{CategoryPath, PluginRef, PluginState};
use prettytable::{format, Cell, Row, Table};

/// Styled cell; the spec is ignored when color is off
fn cell(text: &str, role: StyleRole, use_color: bool) -> Cell {
    let cell = Cell::new(text);
    match role.to_prettytable_spec() {
        Some(spec) if use_color => cell.style_spec(&spec),
        _ => cell,
    }
}

fn titles(names: &[&str], use_color: bool) -> Row {
    Row::new(
        names
            .iter()
            .map(|name| cell(name, StyleRole::Header, use_color))
            .collect(),
    )
}

fn joined_categories(record: &PluginRef) -> String {
    record
        .categories()
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join(", ")
}

/// One row per record: name, state, categories, source, description
pub fn plugin_table(records: &[PluginRef], use_color: bool) -> Table {
    let mut table = Table::new();
    table.set_format(*format::consts::FORMAT_CLEAN);
    table.set_titles(titles(
        &["Plugin", "State", "Categories", "Source", "Description"],
        use_color,
    ));

    for record in records {
        let state_role = match record.state() {
            PluginState::Enabled => StyleRole::Valid,
            PluginState::Disabled => StyleRole::Disabled,
        };
        table.add_row(Row::new(vec![
            cell(record.name(), StyleRole::Name, use_color),
            cell(&record.state().to_string(), state_role, use_color),
            cell(&joined_categories(record), StyleRole::Category, use_color),
            cell(record.source(), StyleRole::Value, use_color),
            cell(record.description(), StyleRole::Value, use_color),
        ]));
    }
    table
}

/// Category paths with the number of plugins each matches
pub fn category_table(categories: &[(CategoryPath, usize)], use_color: bool) -> Table {
    let mut table = Table::new();
    table.set_format(*format::consts::FORMAT_CLEAN);
    table.set_titles(titles(&["Category", "Plugins"], use_color));
    for (category, count) in categories {
        table.add_row(Row::new(vec![
            cell(&category.to_string(), StyleRole::Category, use_color),
            cell(&count.to_string(), StyleRole::Value, use_color),
        ]));
    }
    table
}

/// `key: value` lines describing one record
pub fn plugin_details(record: &PluginRef, use_color: bool) -> String {
    let key = |k: &str| StyleRole::Header.paint(&format!("{:<12}", k), use_color);
    let mut lines = vec![
        format!("{}{}", key("Name:"), StyleRole::Name.paint(record.name(), use_color)),
        format!("{}{}", key("State:"), record.state()),
        format!("{}{}", key("Source:"), record.source()),
        format!(
            "{}{}",
            key("Categories:"),
            StyleRole::Category.paint(&joined_categories(record), use_color)
        ),
    ];
    if !record.description().is_empty() {
        lines.push(format!("{}{}", key("Description:"), record.description()));
    }
    lines.join("\n")
}

/// Print a table, colorizing cells when requested
pub fn print_table(table: &Table, use_color: bool) -> std::io::Result<()> {
    table.print_tty(use_color).map(|_| ())
}
