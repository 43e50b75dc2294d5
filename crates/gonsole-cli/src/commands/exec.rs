//! One-shot git command through the console pipeline

use std::path::PathBuf;

use gonsole_core::config::ConsoleConfig;
use gonsole_core::console::ConsoleOutput;
use gonsole_core::repository::work_tree;
use gonsole_core::{CommandLine, ConsoleError, GitPipeline, GitTool};

use crate::console::CliConsole;
use crate::signal_handler::SignalHandler;

/// Run `args` as a git command in `dir`, streaming to stdout and stderr
pub async fn execute(config: &ConsoleConfig, dir: PathBuf, args: Vec<String>) -> anyhow::Result<()> {
    let console = CliConsole::new(false);
    let tool = GitTool::from_config(config);

    let output = ConsoleOutput::new(
        Box::new(tokio::io::stdout()),
        config.encoding,
        config.line_delimiter.clone(),
    );
    let errors = ConsoleOutput::new(
        Box::new(tokio::io::stderr()),
        config.encoding,
        config.line_delimiter.clone(),
    );

    let pipeline = GitPipeline::new(&tool, output, errors, work_tree(&dir));
    let cancel = tokio_util::sync::CancellationToken::new();
    let pipeline = pipeline.with_cancellation(cancel.clone());

    let mut signals = SignalHandler::new();
    if let Err(e) = signals.start(cancel) {
        tracing::warn!("Failed to initialize signal handling: {}", e);
    }

    let command_line: CommandLine = args.into_iter().collect();
    let result = pipeline.execute_command_line(&command_line).await;
    signals.stop();

    match result {
        Ok(()) => Ok(()),
        Err(ConsoleError::Cancelled) => std::process::exit(130),
        Err(e @ (ConsoleError::Execution(_) | ConsoleError::Parse(_))) => {
            console.error(&e.to_string());
            std::process::exit(1);
        }
        Err(e) => Err(e.into()),
    }
}
