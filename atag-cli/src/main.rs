//! atag - tag audio files with consistent comment tokens
//!
//! Resolves the root folder, loads configuration, sets up logging, then
//! runs one command against the active tag bank.

use anyhow::{Context, Result};
use atag_cli::build_info;
use atag_cli::cli::Cli;
use atag_cli::commands::{self, App};
use atag_common::config::{
    default_config_path, load_toml_config, RootFolderInitializer, RootFolderResolver,
};
use clap::Parser;
use tracing::{debug, info};

fn main() -> Result<()> {
    let cli = Cli::parse();

    let config_path = cli.config.clone().or_else(default_config_path);
    let config = match &config_path {
        Some(path) => load_toml_config(path)
            .with_context(|| format!("Failed to load config {}", path.display()))?,
        None => Default::default(),
    };

    // Step 1: Resolve root folder (CLI > env > config > default)
    let root_folder = RootFolderResolver::new()
        .with_cli_arg(cli.root.clone())
        .with_config(&config)
        .resolve();

    // Step 2: Create root, banks and logs folders if missing
    let initializer = RootFolderInitializer::new(root_folder);
    initializer
        .ensure_directory_exists()
        .context("Failed to initialize root folder")?;

    let log_file = atag_cli::logging::init(cli.verbose, &config.logging, &initializer.logs_dir())?;

    info!(
        version = build_info::VERSION,
        git = build_info::GIT_HASH,
        built = build_info::BUILD_TIMESTAMP,
        profile = build_info::BUILD_PROFILE,
        root = %initializer.root().display(),
        "session_start"
    );
    if let Some(path) = &log_file {
        debug!(log = %path.display(), "Session log");
    }

    let mut app = App::new(initializer, config, config_path, cli.bank.clone());
    debug!(bank = %app.active_bank(), "Active bank");

    commands::run(&mut app, cli.command)?;
    Ok(())
}
