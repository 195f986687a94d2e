//! Subcommand execution against a loaded registry

use crate::app::cli::args::{Command, OutputFormat};
use crate::app::cli::display;
use crate::core::error_handling::ContextualError;
use crate::plugin::api::{CategorySpec, PluginManager, PluginRef, RegistryError};
use crate::plugin::builtin::dump::{DumpPlugin, JsonDumpPlugin};
use prettytable::Table;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum CommandError {
    #[error(transparent)]
    Registry(#[from] RegistryError),

    #[error("Cannot serialize output: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Cannot write output: {0}")]
    Io(#[from] std::io::Error),
}

impl ContextualError for CommandError {
    fn is_user_actionable(&self) -> bool {
        match self {
            CommandError::Registry(e) => e.is_user_actionable(),
            CommandError::Json(_) | CommandError::Io(_) => false,
        }
    }

    fn user_message(&self) -> Option<String> {
        match self {
            CommandError::Registry(e) => e.user_message(),
            _ => None,
        }
    }
}

/// Rendered result of a subcommand
#[derive(Debug)]
pub enum Output {
    Table(Table),
    Text(String),
}

impl Output {
    pub fn print(&self, use_color: bool) -> Result<(), CommandError> {
        match self {
            Output::Table(table) if table.is_empty() => println!("No results."),
            Output::Table(table) => display::print_table(table, use_color)?,
            Output::Text(text) => println!("{}", text),
        }
        Ok(())
    }
}

/// Run `command` against `manager`
pub fn execute(
    manager: &PluginManager,
    command: &Command,
    include_disabled: bool,
    use_color: bool,
) -> Result<Output, CommandError> {
    match command {
        Command::List { format } => {
            let records = manager.all(include_disabled);
            render_records(manager, &records, *format, use_color)
        }
        Command::Filter { categories, format } => {
            let spec: CategorySpec = categories.iter().collect();
            let records = manager.filter_by_category(spec, include_disabled)?;
            log::debug!("Filter matched {} plugin(s)", records.len());
            render_records(manager, &records, *format, use_color)
        }
        Command::Show { name } => {
            let record = manager.get_by_name(name, include_disabled)?;
            Ok(Output::Text(display::plugin_details(&record, use_color)))
        }
        Command::Categories => {
            let mut counts = Vec::new();
            for category in manager.categories() {
                let count = manager
                    .filter_by_category(category.clone(), include_disabled)?
                    .len();
                counts.push((category, count));
            }
            Ok(Output::Table(display::category_table(&counts, use_color)))
        }
    }
}

/// Text and JSON output go through the built-in dump plugins, so disabling
/// one of them turns its format off.
fn render_records(
    manager: &PluginManager,
    records: &[PluginRef],
    format: OutputFormat,
    use_color: bool,
) -> Result<Output, CommandError> {
    match format {
        OutputFormat::Table => Ok(Output::Table(display::plugin_table(records, use_color))),
        OutputFormat::Text => {
            manager.get_by_name("dump", false)?;
            Ok(Output::Text(DumpPlugin.render(records)))
        }
        OutputFormat::Json => {
            manager.get_by_name("dump-json", false)?;
            Ok(Output::Text(JsonDumpPlugin.render(records)?))
        }
    }
}
