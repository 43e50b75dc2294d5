//! Command executor pipeline for pass-through git commands
//!
//! ```text
//! CommandLine ──parse──▶ CommandInfo ──execute──▶ git child process
//!                                                 │ stdout ─▶ output channel
//!                                                 │ stderr ─▶ error channel
//! ```
//!
//! [`GitPipeline`] ties the stages together for one target directory. It is
//! used both by the interactive git interpreter and by the one-shot
//! `gonsole exec` command.

mod executor;
mod parser;
mod tool;


pub use executor::CommandExecutor;
pub use parser::{CommandInfo, CommandLineParser, KNOWN_SUBCOMMANDS};
pub use tool::{GitTool, ToolEnvironment};

use std::path::{Path, PathBuf};
use std::sync::Arc;

use tokio_util::sync::CancellationToken;

use crate::console::ConsoleOutput;
use crate::error::ConsoleResult;
use crate::splitter::CommandLine;

/// Initialize, parse and execute git commands against one directory
#[derive(Debug, Clone)]
pub struct GitPipeline {
    environment: Arc<ToolEnvironment>,
    parser: CommandLineParser,
    executor: CommandExecutor,
    directory: PathBuf,
}

impl GitPipeline {
    pub fn new(
        tool: &GitTool,
        output: ConsoleOutput,
        errors: ConsoleOutput,
        directory: impl Into<PathBuf>,
    ) -> Self {
        let environment = tool.shared_environment();
        Self {
            executor: CommandExecutor::new(
                tool.program(),
                Arc::clone(&environment),
                output,
                errors,
            ),
            environment,
            parser: CommandLineParser::new(),
            directory: directory.into(),
        }
    }

    /// Kill running commands when `cancel` fires
    pub fn with_cancellation(mut self, cancel: CancellationToken) -> Self {
        self.executor = self.executor.with_cancellation(cancel);
        self
    }

    pub fn with_parser(mut self, parser: CommandLineParser) -> Self {
        self.parser = parser;
        self
    }

    pub fn directory(&self) -> &Path {
        &self.directory
    }

    /// Prepare the tool environment; cheap after the first call
    pub fn initialize(&self) {
        self.environment.initialize();
    }

    pub fn parse(&self, command_line: &CommandLine) -> ConsoleResult<CommandInfo> {
        self.parser.parse(command_line, &self.directory)
    }

    pub async fn execute(&self, info: CommandInfo) -> ConsoleResult<()> {
        self.executor.execute(info).await
    }

    /// Run a whole command line through the pipeline
    pub async fn execute_command_line(&self, command_line: &CommandLine) -> ConsoleResult<()> {
        self.initialize();
        let info = self.parse(command_line)?;
        self.execute(info).await
    }
}
