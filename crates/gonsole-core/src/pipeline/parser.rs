//! Turning command lines into validated git invocations

use std::collections::BTreeSet;
use std::path::{Path, PathBuf};

use crate::error::{ConsoleError, ConsoleResult};
use crate::splitter::CommandLine;

/// Git subcommands the console forwards
pub const KNOWN_SUBCOMMANDS: &[&str] = &[
    "add", "am", "apply", "archive", "bisect", "blame", "branch", "bundle", "checkout",
    "cherry", "cherry-pick", "clean", "clone", "commit", "config", "describe", "diff",
    "fetch", "format-patch", "fsck", "gc", "grep", "help", "init", "log", "ls-files",
    "ls-remote", "ls-tree", "merge", "merge-base", "mv", "notes", "pull", "push", "rebase",
    "reflog", "remote", "reset", "restore", "rev-list", "rev-parse", "revert", "rm",
    "shortlog", "show", "show-ref", "stash", "status", "submodule", "switch", "tag",
    "version", "worktree",
];

/// A validated git invocation bound to a work tree.
///
/// Built by [`CommandLineParser::parse`] and consumed by value when executed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommandInfo {
    subcommand: String,
    arguments: Vec<String>,
    directory: PathBuf,
}

impl CommandInfo {
    pub fn subcommand(&self) -> &str {
        &self.subcommand
    }

    pub fn arguments(&self) -> &[String] {
        &self.arguments
    }

    pub fn directory(&self) -> &Path {
        &self.directory
    }

    /// Arguments for the git process, subcommand first
    pub fn argv(&self) -> Vec<String> {
        let mut argv = Vec::with_capacity(1 + self.arguments.len());
        argv.push(self.subcommand.clone());
        argv.extend(self.arguments.iter().cloned());
        argv
    }
}

/// Validates command lines against the known subcommand set
#[derive(Debug, Clone)]
pub struct CommandLineParser {
    subcommands: BTreeSet<String>,
}

impl CommandLineParser {
    pub fn new() -> Self {
        Self::with_subcommands(KNOWN_SUBCOMMANDS.iter().copied())
    }

    pub fn with_subcommands<I, S>(subcommands: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            subcommands: subcommands.into_iter().map(Into::into).collect(),
        }
    }

    pub fn is_known(&self, subcommand: &str) -> bool {
        self.subcommands.contains(subcommand)
    }

    /// Build a [`CommandInfo`] running in `directory`
    pub fn parse(&self, command_line: &CommandLine, directory: &Path) -> ConsoleResult<CommandInfo> {
        let subcommand = command_line
            .command()
            .ok_or_else(|| ConsoleError::parse("empty command line"))?;

        if subcommand.starts_with('-') {
            return Err(ConsoleError::parse(format!(
                "expected a git subcommand, found option '{}'",
                subcommand
            )));
        }
        if !self.is_known(subcommand) {
            return Err(ConsoleError::parse(format!(
                "unknown subcommand: {}",
                subcommand
            )));
        }
        if let Some(bad) = command_line.tokens().iter().find(|t| t.contains('\0')) {
            return Err(ConsoleError::parse(format!(
                "argument contains a NUL byte: {:?}",
                bad
            )));
        }

        Ok(CommandInfo {
            subcommand: subcommand.to_string(),
            arguments: command_line.arguments().to_vec(),
            directory: directory.to_path_buf(),
        })
    }
}

impl Default for CommandLineParser {
    fn default() -> Self {
        Self::new()
    }
}
