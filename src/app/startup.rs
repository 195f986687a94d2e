//! Application startup: arguments, configuration, logging, plugin loading
//! and command dispatch.

use crate::app::cli::args::Args;
use crate::app::cli::config::{load_config_file, ConfigError};
use crate::app::commands;
use crate::core::error_handling::log_error_with_context;
use crate::core::logging::init_logging;
use crate::core::styles::palette_to_clap;
use crate::core::version;
use crate::plugin::api::{LoadOptions, PluginManager, RegistryError, RegistryResult};
use crate::plugin::builtin;
use clap::{CommandFactory, FromArgMatches};
use log::{debug, info, warn};
use std::io::IsTerminal;

/// Initialize application startup
pub fn startup() {
    let is_terminal = std::io::stdout().is_terminal();
    let matches = Args::command()
        .styles(palette_to_clap(is_terminal))
        .get_matches();
    let mut args = match Args::from_arg_matches(&matches) {
        Ok(args) => args,
        Err(e) => e.exit(),
    };

    if let Err(e) = apply_configuration(&mut args) {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }

    let use_color = args.use_color(is_terminal);
    let log_file = args.effective_log_file().map(|p| p.to_string_lossy().to_string());
    if let Err(e) = init_logging(
        args.log_level.as_deref(),
        args.log_format.as_deref(),
        log_file.as_deref(),
        use_color,
    ) {
        eprintln!("Error: failed to initialize logging: {}", e);
        std::process::exit(1);
    }

    info!(
        "Blocks plugin registry starting (plugin API {}, built {}, {})",
        version::get_api_version(),
        version::build_time(),
        version::git_hash()
    );
    debug!("Arguments: {:?}", args);

    let manager = match build_manager(&args, PluginManager::new()) {
        Ok(manager) => manager,
        Err(e) => {
            log_error_with_context(&e, "Plugin loading");
            std::process::exit(1);
        }
    };

    let command = args.selected_command();
    let result = commands::execute(&manager, &command, args.include_disabled, use_color)
        .and_then(|output| output.print(use_color));
    if let Err(e) = result {
        log_error_with_context(&e, "Command");
        std::process::exit(1);
    }
}

/// Merge the configuration file (explicit or default) into `args`
pub fn apply_configuration(args: &mut Args) -> Result<(), ConfigError> {
    if let Some(config) = load_config_file(args.config_file.as_deref())? {
        args.apply_toml_values(&config)?;
    }
    Ok(())
}

/// Populate `manager` from built-in plugins and the configured plugin paths,
/// then apply configured categories and disables
///
/// Sources that fail to load are reported and skipped; duplicate names,
/// malformed categories and unknown plugin names are fatal.
pub fn build_manager(args: &Args, mut manager: PluginManager) -> RegistryResult<PluginManager> {
    manager.load_from_module(&builtin::module())?;

    if !args.plugin_paths.is_empty() {
        let options = LoadOptions::new().recursive(args.recursive);
        match manager.load_from_path_with(args.plugin_paths.clone(), &options) {
            Ok(loaded) => info!("Loaded {} external plugin(s)", loaded.len()),
            Err(e @ (RegistryError::PartialLoad { .. } | RegistryError::Discovery(_))) => {
                log_error_with_context(&e, "Plugin discovery");
                warn!("Continuing with {} plugin(s)", manager.len());
            }
            Err(e) => return Err(e),
        }
    }

    for (category, names) in &args.category_rules {
        let records = names
            .iter()
            .map(|name| manager.get_by_name(name, true))
            .collect::<RegistryResult<Vec<_>>>()?;
        manager.apply_category(category.as_str(), &records)?;
        debug!("Applied category '{}' to {} plugin(s)", category, records.len());
    }

    for name in &args.disable {
        if manager.get_by_name(name, true)?.disable() {
            info!("Disabled plugin '{}'", name);
        }
    }

    Ok(manager)
}
