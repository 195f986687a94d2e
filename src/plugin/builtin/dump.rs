//! Dump plugins: write registry contents to standard output as text or JSON.

use crate::plugin::category::CategoryPath;
use crate::plugin::record::PluginRef;
use crate::plugin::traits::Plugin;
use crate::submit_plugin;
use serde::Serialize;

submit_plugin!(super::BUILTIN_MODULE, DumpPlugin);
submit_plugin!(super::BUILTIN_MODULE, JsonDumpPlugin);

/// Serializable view of one record
#[derive(Debug, Serialize)]
pub struct RecordSummary {
    pub name: String,
    pub source: String,
    pub state: String,
    pub categories: Vec<String>,
    pub description: String,
}

impl From<&PluginRef> for RecordSummary {
    fn from(record: &PluginRef) -> Self {
        Self {
            name: record.name().to_string(),
            source: record.source().to_string(),
            state: record.state().to_string(),
            categories: record.categories().iter().map(ToString::to_string).collect(),
            description: record.description().to_string(),
        }
    }
}

/// One line per record: `name [state] categories`
#[derive(Debug, Default)]
pub struct DumpPlugin;

impl DumpPlugin {
    pub fn render(&self, records: &[PluginRef]) -> String {
        records
            .iter()
            .map(RecordSummary::from)
            .map(|summary| {
                format!(
                    "{} [{}] {}",
                    summary.name,
                    summary.state,
                    summary.categories.join(", ")
                )
                .trim_end()
                .to_string()
            })
            .collect::<Vec<_>>()
            .join("\n")
    }
}

impl Plugin for DumpPlugin {
    fn name(&self) -> String {
        "dump".to_string()
    }

    fn categories(&self) -> Vec<CategoryPath> {
        vec!["builtin".into(), "output".into()]
    }

    fn description(&self) -> String {
        "Dump registry contents as text".to_string()
    }

    fn on_disable(&mut self) {
        log::debug!("Text dump output disabled");
    }
}

/// A JSON array of record summaries
#[derive(Debug, Default)]
pub struct JsonDumpPlugin;

impl JsonDumpPlugin {
    pub fn render(&self, records: &[PluginRef]) -> Result<String, serde_json::Error> {
        let summaries: Vec<RecordSummary> = records.iter().map(RecordSummary::from).collect();
        serde_json::to_string_pretty(&summaries)
    }
}

impl Plugin for JsonDumpPlugin {
    fn name(&self) -> String {
        "dump-json".to_string()
    }

    fn categories(&self) -> Vec<CategoryPath> {
        vec!["builtin".into(), "output".into(), "json".into()]
    }

    fn description(&self) -> String {
        "Dump registry contents as JSON".to_string()
    }

    fn on_disable(&mut self) {
        log::debug!("JSON dump output disabled");
    }
}
