//! Console I/O channels
//!
//! A console session writes to three independent output channels (prompt,
//! standard output, error) and reads from one blocking input channel. All of
//! them are bound to the same character encoding and line delimiter for the
//! lifetime of the session.

mod encoding;
mod input;
pub mod memory;
mod output;
mod provider;

pub use encoding::CharacterEncoding;
pub use input::ConsoleInput;
pub use memory::{MemoryConsole, SharedBuffer};
pub use output::ConsoleOutput;
pub use provider::{ConsoleChannels, ConsoleIoProvider, StdioConsoleProvider};

use tokio::io::{AsyncRead, AsyncWrite};

/// Owned byte sink of a console channel
pub type BoxedWriter = Box<dyn AsyncWrite + Send + Unpin>;

/// Owned byte source of the input channel
pub type BoxedReader = Box<dyn AsyncRead + Send + Unpin>;
