//! Gonsole Core
//!
//! Interactive git console: reads command lines from a console, interprets
//! built-in control commands and passes git commands through to the git
//! executable in the current repository.

pub mod config;
pub mod console;
pub mod error;
pub mod interpreter;
pub mod observer;
pub mod pipeline;
pub mod repository;
pub mod scanner;
pub mod splitter;

pub use config::{ConfigLoader, ConsoleConfig};
pub use console::{
    CharacterEncoding, ConsoleChannels, ConsoleInput, ConsoleIoProvider, ConsoleOutput,
    MemoryConsole, StdioConsoleProvider,
};
pub use error::{ConsoleError, ConsoleResult};
pub use interpreter::{
    ConsoleCommandInterpreter, ControlCommandInterpreter, GitCommandInterpreter, InterpreterChain,
};
pub use observer::InputObserver;
pub use pipeline::{GitPipeline, GitTool};
pub use repository::{CompositeRepositoryProvider, RepositoryProvider};
pub use scanner::{InputScanner, PROMPT_POSTFIX};
pub use splitter::{split, CommandLine};
