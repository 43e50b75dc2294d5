//! Command interpreters
//!
//! An interpreter declares which command lines it recognizes and executes
//! them. The console asks a fixed, ordered chain of interpreters and the first
//! one that recognizes a line handles it, so earlier interpreters shadow later
//! ones on shared command names:
//!
//! | Order | Interpreter | Recognizes |
//! |-------|-------------|------------|
//! | 1 | [`ControlCommandInterpreter`] | `use`, `repos` |
//! | 2 | [`GitCommandInterpreter`] | known git subcommands |

mod control;
mod git;

#[cfg(test)]
mod tests;

pub use control::{ControlCommand, ControlCommandInterpreter};
pub use git::GitCommandInterpreter;

use async_trait::async_trait;

use crate::error::ConsoleResult;
use crate::splitter::CommandLine;

/// A handler for one category of command lines
#[async_trait]
pub trait ConsoleCommandInterpreter: Send + Sync {
    /// Short name used in logs
    fn name(&self) -> &str;

    /// Whether this interpreter handles `command_line`
    fn is_recognized(&self, command_line: &CommandLine) -> bool;

    /// Execute a recognized command line.
    ///
    /// `Ok(Some(message))` reports a failure the user should see on the error
    /// channel; `Err` is reserved for unexpected failures.
    async fn execute(&self, command_line: &CommandLine) -> ConsoleResult<Option<String>>;
}

/// Ordered interpreters of a console session
#[derive(Default)]
pub struct InterpreterChain {
    interpreters: Vec<Box<dyn ConsoleCommandInterpreter>>,
}

impl InterpreterChain {
    pub fn new(interpreters: Vec<Box<dyn ConsoleCommandInterpreter>>) -> Self {
        Self { interpreters }
    }

    /// The first interpreter recognizing `command_line`
    pub fn find(&self, command_line: &CommandLine) -> Option<&dyn ConsoleCommandInterpreter> {
        self.interpreters
            .iter()
            .find(|interpreter| interpreter.is_recognized(command_line))
            .map(|interpreter| interpreter.as_ref())
    }

    pub fn len(&self) -> usize {
        self.interpreters.len()
    }

    pub fn is_empty(&self) -> bool {
        self.interpreters.is_empty()
    }
}

impl std::fmt::Debug for InterpreterChain {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_list()
            .entries(self.interpreters.iter().map(|i| i.name()))
            .finish()
    }
}
