//! CLI argument definitions using clap
//!
//! - gonsole                          # Interactive console in the current directory
//! - gonsole -r a -r b                # Interactive console over several repositories
//! - gonsole exec --dir d -- status   # One-shot git command
//! - gonsole config show|init         # Configuration commands

use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "gonsole")]
#[command(about = "Gonsole - interactive git console")]
#[command(
    long_about = r#"Gonsole - interactive git console

USAGE:
  gonsole                              # Start a console in the current directory
  gonsole -r ~/src/app -r ~/src/lib    # Switch between repositories with `use`
  gonsole exec --dir . -- log -3       # Run one git command and exit

UTILITY COMMANDS:
  gonsole config init                  # Create config file
  gonsole config show                  # Show effective config"#
)]
#[command(version)]
pub struct Cli {
    /// Path to configuration file
    #[arg(long, global = true)]
    pub config_file: Option<PathBuf>,

    /// Repository to open; repeat to switch between several with `use`
    #[arg(short = 'r', long = "repository")]
    pub repositories: Vec<PathBuf>,

    /// Git executable to run
    #[arg(long)]
    pub git: Option<String>,

    /// Enable verbose output
    #[arg(long, short, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Run a single git command and exit
    #[command(verbatim_doc_comment)]
    Exec {
        /// Work tree to run in
        #[arg(long, default_value = ".")]
        dir: PathBuf,

        /// Git subcommand and its arguments
        #[arg(trailing_var_arg = true, allow_hyphen_values = true, required = true)]
        args: Vec<String>,
    },

    /// Manage configuration files
    #[command(verbatim_doc_comment)]
    Config {
        #[command(subcommand)]
        action: ConfigAction,
    },
}

#[derive(Subcommand, Clone)]
pub enum ConfigAction {
    /// Display the effective configuration
    Show,

    /// Create a new configuration file with defaults
    Init {
        /// Overwrite existing file
        #[arg(long)]
        force: bool,
    },
}
