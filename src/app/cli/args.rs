//! Command line arguments
//!
//! `Args` holds the global options and the selected subcommand. Values left
//! unset on the command line are filled from the configuration file (see
//! `config.rs`); command line values always win.

use clap::{ArgAction, Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

#[derive(Parser, Debug, Clone, Default)]
#[command(name = "blocks")]
#[command(about = "Discover, categorize and inspect plugins")]
#[command(version)]
#[command(after_help = " * can be specified multiple times")]
pub struct Args {
    /// Configuration file path
    #[arg(short = 'c', long = "config-file", value_name = "FILE", global = true)]
    pub config_file: Option<PathBuf>,

    /// Plugin libraries or directories to load*
    #[arg(short = 'p', long = "plugin-path", value_name = "PATH", action = ArgAction::Append, global = true)]
    pub plugin_paths: Vec<PathBuf>,

    /// Scan plugin directories recursively
    #[arg(short = 'r', long = "recursive", global = true)]
    pub recursive: bool,

    /// Plugins to disable after loading*
    #[arg(short = 'd', long = "disable", value_name = "NAME", action = ArgAction::Append, global = true)]
    pub disable: Vec<String>,

    /// Include disabled plugins in results
    #[arg(short = 'a', long = "include-disabled", global = true)]
    pub include_disabled: bool,

    /// Force colored output
    #[arg(long = "color", conflicts_with = "no_color", global = true)]
    pub color: bool,

    /// Disable colored output
    #[arg(long = "no-color", global = true)]
    pub no_color: bool,

    /// Log level
    #[arg(short = 'l', long = "log-level", value_name = "LEVEL", value_parser = ["trace", "debug", "info", "warn", "error", "off"], global = true)]
    pub log_level: Option<String>,

    /// Log file path (use 'none' to disable file logging)
    #[arg(short = 'f', long = "log-file", value_name = "FILE", global = true)]
    pub log_file: Option<PathBuf>,

    /// Log output format
    #[arg(short = 'o', long = "log-format", value_name = "FORMAT", value_parser = ["text", "ext", "json"], global = true)]
    pub log_format: Option<String>,

    /// Category rules from the configuration file: category -> plugin names
    #[arg(skip)]
    pub category_rules: Vec<(String, Vec<String>)>,

    /// Color preference from the configuration file
    #[arg(skip)]
    pub config_color: Option<bool>,

    #[command(subcommand)]
    pub command: Option<Command>,
}

#[derive(Subcommand, Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// List registered plugins
    List {
        /// Output format
        #[arg(long = "format", value_enum, default_value_t = OutputFormat::Table)]
        format: OutputFormat,
    },

    /// List plugins carrying every given category (dot-separated paths)
    Filter {
        #[arg(value_name = "CATEGORY", required = true)]
        categories: Vec<String>,

        /// Output format
        #[arg(long = "format", value_enum, default_value_t = OutputFormat::Table)]
        format: OutputFormat,
    },

    /// Show one plugin in detail
    Show {
        #[arg(value_name = "NAME")]
        name: String,
    },

    /// List every category in use
    Categories,
}

impl Default for Command {
    fn default() -> Self {
        Command::List {
            format: OutputFormat::Table,
        }
    }
}

/// How plugin listings are written
#[derive(ValueEnum, Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum OutputFormat {
    #[default]
    Table,
    Text,
    Json,
}

impl Args {
    pub fn new() -> Self {
        Self::default()
    }

    /// Selected subcommand, `list` when none was given
    pub fn selected_command(&self) -> Command {
        self.command.clone().unwrap_or_default()
    }

    /// Whether to color output: flags first, then configuration, then terminal detection
    pub fn use_color(&self, is_terminal: bool) -> bool {
        if self.no_color {
            false
        } else if self.color {
            true
        } else {
            self.config_color.unwrap_or(is_terminal)
        }
    }

    /// Log file to write to, if any; `none` and `-` mean stderr
    pub fn effective_log_file(&self) -> Option<&PathBuf> {
        self.log_file.as_ref().filter(|path| {
            let text = path.to_string_lossy();
            !(text.eq_ignore_ascii_case("none") || text == "-")
        })
    }
}
