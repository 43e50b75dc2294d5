//! Pass-through of git commands to the external tool

use std::sync::Arc;

use async_trait::async_trait;
use tokio_util::sync::CancellationToken;
use tracing::debug;

use super::ConsoleCommandInterpreter;
use crate::console::ConsoleOutput;
use crate::error::{ConsoleError, ConsoleResult};
use crate::pipeline::{CommandLineParser, GitPipeline, GitTool};
use crate::repository::{work_tree, RepositoryProvider};
use crate::splitter::CommandLine;

/// Forwards known git subcommands to git in the current repository
pub struct GitCommandInterpreter {
    tool: GitTool,
    parser: CommandLineParser,
    output: ConsoleOutput,
    errors: ConsoleOutput,
    repositories: Arc<dyn RepositoryProvider>,
    cancel: CancellationToken,
}

impl GitCommandInterpreter {
    pub fn new(
        tool: GitTool,
        output: ConsoleOutput,
        errors: ConsoleOutput,
        repositories: Arc<dyn RepositoryProvider>,
    ) -> Self {
        Self {
            tool,
            parser: CommandLineParser::new(),
            output,
            errors,
            repositories,
            cancel: CancellationToken::new(),
        }
    }

    /// Kill a running git process when `cancel` fires
    pub fn with_cancellation(mut self, cancel: CancellationToken) -> Self {
        self.cancel = cancel;
        self
    }

    pub fn with_parser(mut self, parser: CommandLineParser) -> Self {
        self.parser = parser;
        self
    }
}

#[async_trait]
impl ConsoleCommandInterpreter for GitCommandInterpreter {
    fn name(&self) -> &str {
        "git"
    }

    fn is_recognized(&self, command_line: &CommandLine) -> bool {
        command_line
            .command()
            .is_some_and(|name| self.parser.is_known(name))
    }

    async fn execute(&self, command_line: &CommandLine) -> ConsoleResult<Option<String>> {
        let location = self.repositories.current_repository_location();
        debug!(repository = %location.display(), "Executing git command");

        let pipeline = GitPipeline::new(
            &self.tool,
            self.output.clone(),
            self.errors.clone(),
            work_tree(&location),
        )
        .with_parser(self.parser.clone())
        .with_cancellation(self.cancel.clone());

        match pipeline.execute_command_line(command_line).await {
            Ok(()) => Ok(None),
            Err(ConsoleError::Cancelled) => Err(ConsoleError::Cancelled),
            Err(error) => Ok(Some(error.to_string())),
        }
    }
}
