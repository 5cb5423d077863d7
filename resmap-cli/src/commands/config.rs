//! Configuration management CLI commands.

use clap::Subcommand;
use resmap::config::{config_file_path, ConfigFile, InitOutcome};

use crate::error::CliError;

/// Config subcommands.
#[derive(Debug, Subcommand)]
pub enum ConfigCommands {
    /// Show the configuration file path
    Path,

    /// Print the effective configuration
    Show,

    /// Write a default configuration file if none exists
    Init,
}

/// Run a config subcommand.
pub fn run(command: ConfigCommands) -> Result<(), CliError> {
    match command {
        ConfigCommands::Path => {
            println!("{}", config_file_path().display());
            Ok(())
        }
        ConfigCommands::Show => run_show(),
        ConfigCommands::Init => run_init(),
    }
}

fn run_show() -> Result<(), CliError> {
    let path = config_file_path();
    let config = ConfigFile::load_from(&path)?;
    let source = if path.exists() { "file" } else { "defaults" };

    println!("Configuration ({}): {}", source, path.display());
    println!();
    println!("[server]");
    println!("  geoserver_url     = {}", config.server.geoserver_url);
    println!("  submit_url        = {}", config.server.submit_url);
    println!("  form_base_url     = {}", config.server.form_base_url);
    println!(
        "  location_endpoint = {}",
        config.server.location_endpoint.as_deref().unwrap_or("(none)")
    );
    println!("  timeout           = {}s", config.server.timeout);
    println!("[plan]");
    println!("  plan_id   = {}", config.plan.plan_id);
    println!("  plan_name = {}", config.plan.plan_name);
    println!("  district  = {}", config.plan.district);
    println!("  block     = {}", config.plan.block);
    println!("[loading]");
    println!("  fallback_window_ms = {}", config.loading.fallback_window_ms);
    println!("[viewport]");
    println!(
        "  close_zoom = {}, fly_zoom = {}, world = ({}, {}) @ {}",
        config.viewport.close_zoom,
        config.viewport.fly_zoom,
        config.viewport.world_lon,
        config.viewport.world_lat,
        config.viewport.world_zoom
    );
    println!("[logging]");
    println!(
        "  {}",
        config.logging.directory.join(&config.logging.file).display()
    );
    Ok(())
}

fn run_init() -> Result<(), CliError> {
    let path = config_file_path();
    match ConfigFile::init(&path)? {
        InitOutcome::Created => println!("Created {}", path.display()),
        InitOutcome::AlreadyPresent => {
            println!("Config file already exists: {}", path.display())
        }
    }
    Ok(())
}
