//! Gonsole CLI application
//!
//! An interactive console bound to one or more git repositories.
//!
//! # Modes
//!
//! ## Interactive (default)
//! Reads command lines from the terminal. `use <repository>` and `repos`
//! control the session; known git subcommands are passed through to git in
//! the current repository. Ctrl+C ends the session and kills a running git
//! process.
//!
//! - **Command:** `gonsole` or `gonsole -r ../other-repo`
//!
//! ## Exec (one-shot)
//! Runs a single git command through the same pipeline and exits.
//!
//! - **Command:** `gonsole exec --dir <path> -- log --oneline`
//!
//! ## Configuration
//! `gonsole config show` and `gonsole config init`.

mod args;
mod commands;
mod console;
mod router;
mod signal_handler;

use clap::Parser;
use gonsole_core::config::LoggingConfig;
use tracing_subscriber::EnvFilter;

use args::Cli;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    let config = router::load_config(&cli)?;
    init_logging(&config.logging, cli.verbose);

    router::route(cli, config).await
}

/// Install the tracing subscriber.
///
/// `RUST_LOG` wins over the configured level. Logs go to stderr so they never
/// end up in the middle of a prompt.
fn init_logging(logging: &LoggingConfig, verbose: bool) {
    let level = if verbose { "debug" } else { logging.level.as_str() };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));
    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr);

    match logging.format.as_str() {
        "json" => builder.json().init(),
        "pretty" => builder.pretty().init(),
        _ => builder.compact().init(),
    }
}
