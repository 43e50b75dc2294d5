//! Built-in commands acting on the console session

use std::fmt;
use std::str::FromStr;
use std::sync::Arc;

use async_trait::async_trait;
use tracing::debug;

use super::ConsoleCommandInterpreter;
use crate::console::ConsoleOutput;
use crate::error::{ConsoleError, ConsoleResult};
use crate::repository::{find_repository, repository_name, RepositoryProvider};
use crate::splitter::CommandLine;

/// Verbs handled by the console itself
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ControlCommand {
    /// `use <repository>`: switch the current repository
    Use,
    /// `repos`: list known repositories
    Repos,
}

impl ControlCommand {
    pub const ALL: [ControlCommand; 2] = [Self::Use, Self::Repos];

    pub const fn name(&self) -> &'static str {
        match self {
            Self::Use => "use",
            Self::Repos => "repos",
        }
    }
}

impl fmt::Display for ControlCommand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for ControlCommand {
    type Err = ConsoleError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|command| command.name() == s)
            .ok_or_else(|| ConsoleError::UnrecognizedCommand(s.to_string()))
    }
}

/// Interpreter for [`ControlCommand`]s
pub struct ControlCommandInterpreter {
    output: ConsoleOutput,
    repositories: Arc<dyn RepositoryProvider>,
}

impl ControlCommandInterpreter {
    pub fn new(output: ConsoleOutput, repositories: Arc<dyn RepositoryProvider>) -> Self {
        Self {
            output,
            repositories,
        }
    }

    fn use_repository(&self, arguments: &[String]) -> ConsoleResult<Option<String>> {
        let [name] = arguments else {
            return Ok(Some("Usage: use <repository>".to_string()));
        };

        let locations = self.repositories.repository_locations();
        match find_repository(&locations, name) {
            Some(location) => {
                self.repositories.set_current_repository_location(&location)?;
                Ok(None)
            }
            None => Ok(Some(format!("Unknown repository: {}", name))),
        }
    }

    async fn list_repositories(&self) -> ConsoleResult<Option<String>> {
        let current = self.repositories.current_repository_location();
        for location in self.repositories.repository_locations() {
            let marker = if location == current { '*' } else { ' ' };
            self.output
                .write_line(&format!(
                    "{} {} ({})",
                    marker,
                    repository_name(&location),
                    location.display()
                ))
                .await?;
        }
        Ok(None)
    }
}

#[async_trait]
impl ConsoleCommandInterpreter for ControlCommandInterpreter {
    fn name(&self) -> &str {
        "control"
    }

    fn is_recognized(&self, command_line: &CommandLine) -> bool {
        command_line
            .command()
            .is_some_and(|name| name.parse::<ControlCommand>().is_ok())
    }

    async fn execute(&self, command_line: &CommandLine) -> ConsoleResult<Option<String>> {
        let command: ControlCommand = command_line.command().unwrap_or_default().parse()?;
        debug!(%command, "Executing control command");

        match command {
            ControlCommand::Use => self.use_repository(command_line.arguments()),
            ControlCommand::Repos => self.list_repositories().await,
        }
    }
}
