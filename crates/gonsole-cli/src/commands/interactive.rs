//! Interactive console session

use std::path::PathBuf;
use std::sync::Arc;

use gonsole_core::config::ConsoleConfig;
use gonsole_core::{
    CompositeRepositoryProvider, GitTool, InputObserver, StdioConsoleProvider,
};

use crate::console::CliConsole;
use crate::signal_handler::SignalHandler;

/// Run a console session on the terminal until end of input or Ctrl+C
pub async fn execute(config: ConsoleConfig, verbose: bool) -> anyhow::Result<()> {
    let console = CliConsole::new(verbose);

    let locations = repository_locations(&config)?;
    for missing in locations.iter().filter(|location| !location.exists()) {
        console.warn(&format!("Repository not found: {}", missing.display()));
    }
    let repositories = Arc::new(CompositeRepositoryProvider::new(locations)?);

    let mut provider = StdioConsoleProvider::new(config.encoding, config.line_delimiter.clone());
    let mut observer = InputObserver::new(&mut provider, repositories, GitTool::from_config(&config));

    let mut signals = SignalHandler::new();
    if let Err(e) = signals.start(observer.cancellation_token()) {
        console.warn(&format!("Failed to initialize signal handling: {}", e));
    }

    console.info("Type a git command, `repos` or `use <repository>`; Ctrl+D to quit");
    observer.start()?;
    let result = observer.join().await;
    signals.stop();

    if let Err(e) = result {
        console.error(&e.to_string());
        std::process::exit(1);
    }

    // a pending stdin read cannot be interrupted; leave without waiting for it
    eprintln!();
    std::process::exit(0);
}

/// Configured repositories, or the working directory when none are given
fn repository_locations(config: &ConsoleConfig) -> anyhow::Result<Vec<PathBuf>> {
    if config.repositories.is_empty() {
        Ok(vec![std::env::current_dir()?])
    } else {
        Ok(config.repositories.clone())
    }
}
