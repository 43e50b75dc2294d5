//! Console session configuration

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::PathBuf;

use super::logging_config::LoggingConfig;
use crate::console::CharacterEncoding;
use crate::error::{ConsoleError, ConsoleResult};

/// Default configuration file name
pub const DEFAULT_CONFIG_FILE: &str = "gonsole_config.json";

/// Default external tool
pub const DEFAULT_GIT_EXECUTABLE: &str = "git";

/// Effective configuration of a console session
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConsoleConfig {
    /// Path or name of the git executable
    pub git_executable: String,
    /// Encoding of all console channels
    pub encoding: CharacterEncoding,
    /// Line delimiter written after every output line
    pub line_delimiter: String,
    /// Known repositories; the first one is current at startup
    pub repositories: Vec<PathBuf>,
    /// Extra environment variables for the git process
    pub environment: BTreeMap<String, String>,
    /// Logging settings
    pub logging: LoggingConfig,
}

impl Default for ConsoleConfig {
    fn default() -> Self {
        Self {
            git_executable: DEFAULT_GIT_EXECUTABLE.to_string(),
            encoding: CharacterEncoding::default(),
            line_delimiter: "\n".to_string(),
            repositories: Vec::new(),
            environment: BTreeMap::new(),
            logging: LoggingConfig::default(),
        }
    }
}

/// A partial configuration as read from a single source.
///
/// Absent fields leave the value of earlier sources untouched.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ConfigLayer {
    pub git_executable: Option<String>,
    pub encoding: Option<CharacterEncoding>,
    pub line_delimiter: Option<String>,
    pub repositories: Option<Vec<PathBuf>>,
    pub environment: Option<BTreeMap<String, String>>,
    pub logging: Option<LoggingConfig>,
}

impl ConsoleConfig {
    /// Apply a layer on top of this configuration
    pub fn merge(&mut self, layer: ConfigLayer) {
        if let Some(git) = layer.git_executable {
            self.git_executable = git;
        }
        if let Some(encoding) = layer.encoding {
            self.encoding = encoding;
        }
        if let Some(delimiter) = layer.line_delimiter {
            self.line_delimiter = delimiter;
        }
        if let Some(repositories) = layer.repositories {
            self.repositories = repositories;
        }
        if let Some(environment) = layer.environment {
            self.environment.extend(environment);
        }
        if let Some(logging) = layer.logging {
            self.logging.merge(logging);
        }
    }

    /// Check the configuration for values the console cannot work with
    pub fn validate(&self) -> ConsoleResult<()> {
        if self.git_executable.trim().is_empty() {
            return Err(ConsoleError::config("git_executable must not be empty"));
        }
        if self.line_delimiter.is_empty() {
            return Err(ConsoleError::config("line_delimiter must not be empty"));
        }
        if let Some(blank) = self
            .repositories
            .iter()
            .find(|path| path.as_os_str().is_empty())
        {
            return Err(ConsoleError::config(format!(
                "repository path must not be empty: {:?}",
                blank
            )));
        }
        Ok(())
    }
}
