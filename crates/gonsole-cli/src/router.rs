//! Command routing logic for CLI

use std::path::PathBuf;

use gonsole_core::config::{ConfigLayer, ConfigLoader, ConsoleConfig};

use crate::args::{Cli, Commands, ConfigAction};
use crate::commands;

/// Config file named on the command line, or the default location
pub fn config_path(cli: &Cli) -> PathBuf {
    cli.config_file
        .clone()
        .unwrap_or_else(ConfigLoader::default_config_path)
}

/// Effective configuration: defaults, file, environment, then flags
pub fn load_config(cli: &Cli) -> anyhow::Result<ConsoleConfig> {
    let flags = ConfigLayer {
        git_executable: cli.git.clone(),
        repositories: (!cli.repositories.is_empty()).then(|| cli.repositories.clone()),
        ..ConfigLayer::default()
    };

    let config = ConfigLoader::new()
        .with_defaults()
        .with_file(config_path(cli))
        .with_env()
        .with_args(flags)
        .load()?;
    Ok(config)
}

/// Route CLI commands to their respective handlers
pub async fn route(cli: Cli, config: ConsoleConfig) -> anyhow::Result<()> {
    let path = config_path(&cli);

    match cli.command {
        None => commands::interactive::execute(config, cli.verbose).await,
        Some(Commands::Exec { dir, args }) => commands::exec::execute(&config, dir, args).await,
        Some(Commands::Config { action }) => match action {
            ConfigAction::Show => commands::config::show(&config, &path),
            ConfigAction::Init { force } => commands::config::init(&path, force),
        },
    }
}
