//! Configuration management commands

use std::fs;
use std::path::Path;

use anyhow::Context;
use colored::*;
use gonsole_core::config::ConsoleConfig;

use crate::console::CliConsole;

/// Show the effective configuration
pub fn show(config: &ConsoleConfig, config_file: &Path) -> anyhow::Result<()> {
    let console = CliConsole::new(true);

    console.print_header("Configuration");
    if config_file.exists() {
        console.success(&format!("Loaded configuration from: {}", config_file.display()));
    } else {
        console.warn(&format!(
            "Configuration file not found: {}",
            config_file.display()
        ));
        console.info("Using defaults and environment");
    }

    println!("{}", serde_json::to_string_pretty(config)?);

    if config.repositories.is_empty() {
        eprintln!("{}", "No repositories configured; the working directory is used".dimmed());
    }
    Ok(())
}

/// Write a configuration file with default values
pub fn init(config_file: &Path, force: bool) -> anyhow::Result<()> {
    let console = CliConsole::new(true);

    if config_file.exists() && !force {
        anyhow::bail!(
            "Configuration file already exists: {} (use --force to overwrite)",
            config_file.display()
        );
    }

    write_default(config_file)?;
    console.success(&format!("Created configuration file: {}", config_file.display()));
    Ok(())
}

fn write_default(config_file: &Path) -> anyhow::Result<()> {
    if let Some(parent) = config_file.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent)
            .with_context(|| format!("Failed to create {}", parent.display()))?;
    }
    let content = serde_json::to_string_pretty(&ConsoleConfig::default())?;
    fs::write(config_file, content)
        .with_context(|| format!("Failed to write {}", config_file.display()))?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use gonsole_core::ConfigLoader;

    #[test]
    fn test_init_writes_loadable_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("gonsole_config.json");

        init(&path, false).unwrap();

        let loaded = ConfigLoader::new().with_file(&path).load().unwrap();
        assert_eq!(loaded, ConsoleConfig::default());
    }

    #[test]
    fn test_init_refuses_to_overwrite() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("gonsole_config.json");
        fs::write(&path, "{}").unwrap();

        assert!(init(&path, false).is_err());
        assert_eq!(fs::read_to_string(&path).unwrap(), "{}");

        init(&path, true).unwrap();
        assert_ne!(fs::read_to_string(&path).unwrap(), "{}");
    }
}
