//! Configuration loading and management

use std::fs;
use std::path::{Path, PathBuf};

use super::console_config::{ConfigLayer, ConsoleConfig, DEFAULT_CONFIG_FILE};
use super::logging_config::LoggingConfig;
use crate::error::{ConsoleError, ConsoleResult};

/// Environment variable overriding the git executable
pub const ENV_GIT: &str = "GONSOLE_GIT";
/// Environment variable overriding the console encoding
pub const ENV_ENCODING: &str = "GONSOLE_ENCODING";
/// Environment variable overriding the line delimiter
pub const ENV_LINE_DELIMITER: &str = "GONSOLE_LINE_DELIMITER";
/// Environment variable overriding the log level
pub const ENV_LOG: &str = "GONSOLE_LOG";

/// Source of configuration data
#[derive(Debug, Clone)]
pub enum ConfigSource {
    /// Configuration from a file
    File(PathBuf),
    /// Configuration from environment variables
    Environment,
    /// Configuration from command line arguments
    CommandLine(ConfigLayer),
    /// Default configuration
    Default,
}

/// Configuration loader with support for multiple sources.
///
/// Sources are applied in the order they were added; later sources win.
#[derive(Debug, Default)]
pub struct ConfigLoader {
    sources: Vec<ConfigSource>,
}

impl ConfigLoader {
    /// Create a new config loader
    pub fn new() -> Self {
        Self {
            sources: Vec::new(),
        }
    }

    /// Add a configuration source
    pub fn add_source(mut self, source: ConfigSource) -> Self {
        self.sources.push(source);
        self
    }

    /// Add a file source
    pub fn with_file<P: AsRef<Path>>(self, path: P) -> Self {
        self.add_source(ConfigSource::File(path.as_ref().to_path_buf()))
    }

    /// Add environment variables source
    pub fn with_env(self) -> Self {
        self.add_source(ConfigSource::Environment)
    }

    /// Add command line arguments source
    pub fn with_args(self, layer: ConfigLayer) -> Self {
        self.add_source(ConfigSource::CommandLine(layer))
    }

    /// Add default configuration source
    pub fn with_defaults(self) -> Self {
        self.add_source(ConfigSource::Default)
    }

    /// Load configuration from all sources
    pub fn load(self) -> ConsoleResult<ConsoleConfig> {
        let mut config = ConsoleConfig::default();

        for source in &self.sources {
            match source {
                ConfigSource::File(path) => {
                    tracing::debug!("Loading config from file: {}", path.display());
                    config.merge(load_from_file(path)?);
                }
                ConfigSource::Environment => {
                    tracing::debug!("Loading config from environment");
                    config.merge(layer_from_vars(|key| std::env::var(key).ok())?);
                }
                ConfigSource::CommandLine(layer) => {
                    tracing::debug!("Loading config from command line");
                    config.merge(layer.clone());
                }
                ConfigSource::Default => {
                    tracing::debug!("Loading default config");
                    config = ConsoleConfig::default();
                }
            }
        }

        config.validate()?;
        Ok(config)
    }

    /// Where the config file lives when no explicit path is given.
    ///
    /// A `gonsole_config.json` in the working directory wins over the one in
    /// the user's config directory.
    pub fn default_config_path() -> PathBuf {
        let local = PathBuf::from(DEFAULT_CONFIG_FILE);
        if local.exists() {
            return local;
        }
        dirs::config_dir()
            .map(|dir| dir.join("gonsole").join(DEFAULT_CONFIG_FILE))
            .unwrap_or(local)
    }
}

/// Load a layer from a JSON file; a missing file is an empty layer
fn load_from_file(path: &Path) -> ConsoleResult<ConfigLayer> {
    if !path.exists() {
        return Ok(ConfigLayer::default());
    }

    let content = fs::read_to_string(path).map_err(|e| {
        ConsoleError::config(format!(
            "Failed to read config file '{}': {}",
            path.display(),
            e
        ))
    })?;

    serde_json::from_str(&content).map_err(|e| {
        ConsoleError::config(format!(
            "Failed to parse config file '{}': {}",
            path.display(),
            e
        ))
    })
}

/// Build a layer from environment-style lookups
pub(crate) fn layer_from_vars<F>(lookup: F) -> ConsoleResult<ConfigLayer>
where
    F: Fn(&str) -> Option<String>,
{
    let mut layer = ConfigLayer::default();

    if let Some(git) = lookup(ENV_GIT).filter(|v| !v.is_empty()) {
        layer.git_executable = Some(git);
    }
    if let Some(encoding) = lookup(ENV_ENCODING).filter(|v| !v.is_empty()) {
        layer.encoding = Some(encoding.parse()?);
    }
    if let Some(delimiter) = lookup(ENV_LINE_DELIMITER).filter(|v| !v.is_empty()) {
        layer.line_delimiter = Some(unescape_delimiter(&delimiter));
    }
    if let Some(level) = lookup(ENV_LOG).filter(|v| !v.is_empty()) {
        layer.logging = Some(LoggingConfig {
            level,
            format: String::new(),
        });
    }

    Ok(layer)
}

/// Environment values cannot carry raw newlines portably, so `\n` and `\r`
/// escapes are accepted.
fn unescape_delimiter(raw: &str) -> String {
    raw.replace("\\r", "\r").replace("\\n", "\n")
}
