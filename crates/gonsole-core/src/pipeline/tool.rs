//! The external git tool and the environment it runs in

use std::collections::BTreeMap;
use std::sync::Arc;

use once_cell::sync::OnceCell;
use tracing::debug;

use crate::config::ConsoleConfig;

/// Variables every git child process gets unless configured otherwise.
///
/// The console has no terminal to offer git, so prompts, pagers and editors
/// are disabled.
const DEFAULT_ENVIRONMENT: &[(&str, &str)] = &[
    ("GIT_TERMINAL_PROMPT", "0"),
    ("GIT_PAGER", "cat"),
    ("GIT_EDITOR", "true"),
    ("TERM", "dumb"),
];

/// Child-process environment, resolved once on first use
#[derive(Debug, Default)]
pub struct ToolEnvironment {
    overrides: BTreeMap<String, String>,
    resolved: OnceCell<BTreeMap<String, String>>,
}

impl ToolEnvironment {
    pub fn new(overrides: BTreeMap<String, String>) -> Self {
        Self {
            overrides,
            resolved: OnceCell::new(),
        }
    }

    /// Resolve the environment; later calls return the cached result
    pub fn initialize(&self) -> &BTreeMap<String, String> {
        self.resolved.get_or_init(|| {
            let mut variables: BTreeMap<String, String> = DEFAULT_ENVIRONMENT
                .iter()
                .map(|(key, value)| (key.to_string(), value.to_string()))
                .collect();
            variables.extend(self.overrides.clone());
            debug!(count = variables.len(), "Resolved git environment");
            variables
        })
    }

    pub fn is_initialized(&self) -> bool {
        self.resolved.get().is_some()
    }
}

/// The git executable together with its shared environment
#[derive(Debug, Clone)]
pub struct GitTool {
    program: String,
    environment: Arc<ToolEnvironment>,
}

impl GitTool {
    pub fn new(program: impl Into<String>, environment: BTreeMap<String, String>) -> Self {
        Self {
            program: program.into(),
            environment: Arc::new(ToolEnvironment::new(environment)),
        }
    }

    pub fn from_config(config: &ConsoleConfig) -> Self {
        Self::new(config.git_executable.clone(), config.environment.clone())
    }

    pub fn program(&self) -> &str {
        &self.program
    }

    pub fn environment(&self) -> &ToolEnvironment {
        &self.environment
    }

    pub(crate) fn shared_environment(&self) -> Arc<ToolEnvironment> {
        Arc::clone(&self.environment)
    }
}

impl Default for GitTool {
    fn default() -> Self {
        Self::new(crate::config::DEFAULT_GIT_EXECUTABLE, BTreeMap::new())
    }
}
