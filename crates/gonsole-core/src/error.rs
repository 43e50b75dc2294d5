//! Error types for the gonsole console

use std::error::Error as StdError;
use thiserror::Error;

/// Result type alias for console operations
pub type ConsoleResult<T> = Result<T, ConsoleError>;

/// Main error type for the console pipeline
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ConsoleError {
    /// Line splitting or command-line parsing failed
    #[error("Parse error: {0}")]
    Parse(String),

    /// No interpreter claimed the input
    #[error("Unrecognized command: {0}")]
    UnrecognizedCommand(String),

    /// The external tool ran but reported failure
    #[error("Execution error: {0}")]
    Execution(String),

    /// The external tool could not be started
    #[error("Tool not found: {program}: {message}")]
    ToolNotFound { program: String, message: String },

    /// Configuration related errors
    #[error("Configuration error: {0}")]
    Config(String),

    /// IO errors
    #[error("IO error: {0}")]
    Io(String),

    /// JSON serialization/deserialization errors
    #[error("JSON error: {0}")]
    Json(String),

    /// The session or command was cancelled
    #[error("Cancelled")]
    Cancelled,

    /// Generic error with context
    #[error("Error: {0}")]
    Other(String),
}

impl ConsoleError {
    /// Create a new parse error
    pub fn parse(message: impl Into<String>) -> Self {
        Self::Parse(message.into())
    }

    /// Create a new execution error
    pub fn execution(message: impl Into<String>) -> Self {
        Self::Execution(message.into())
    }

    /// Create a new tool-not-found error
    pub fn tool_not_found(program: impl Into<String>, message: impl Into<String>) -> Self {
        Self::ToolNotFound {
            program: program.into(),
            message: message.into(),
        }
    }

    /// Create a new configuration error
    pub fn config(message: impl Into<String>) -> Self {
        Self::Config(message.into())
    }

    /// Create a new generic error
    pub fn other(message: impl Into<String>) -> Self {
        Self::Other(message.into())
    }

    /// Whether this error ends the session rather than a single command
    pub const fn is_cancelled(&self) -> bool {
        matches!(self, Self::Cancelled)
    }
}

impl From<std::io::Error> for ConsoleError {
    fn from(error: std::io::Error) -> Self {
        Self::Io(error.to_string())
    }
}

impl From<serde_json::Error> for ConsoleError {
    fn from(error: serde_json::Error) -> Self {
        Self::Json(error.to_string())
    }
}

impl From<shell_words::ParseError> for ConsoleError {
    fn from(error: shell_words::ParseError) -> Self {
        Self::Parse(error.to_string())
    }
}

/// Render an error and its source chain, one cause per line.
///
/// This is the console's stand-in for a stack trace.
pub fn diagnostic(error: &(dyn StdError + 'static)) -> String {
    let mut text = error.to_string();
    let mut source = error.source();
    while let Some(cause) = source {
        text.push_str("\n  caused by: ");
        text.push_str(&cause.to_string());
        source = cause.source();
    }
    text
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unrecognized_command_message() {
        let error = ConsoleError::UnrecognizedCommand("frobnicate".to_string());
        assert_eq!(error.to_string(), "Unrecognized command: frobnicate");
    }

    #[test]
    fn test_io_conversion() {
        let io = std::io::Error::new(std::io::ErrorKind::BrokenPipe, "pipe closed");
        let error: ConsoleError = io.into();
        assert!(matches!(error, ConsoleError::Io(ref msg) if msg.contains("pipe closed")));
    }

    #[test]
    fn test_diagnostic_includes_source_chain() {
        #[derive(Debug, Error)]
        #[error("outer failure")]
        struct Outer(#[source] std::io::Error);

        let error = Outer(std::io::Error::other("disk gone"));
        let text = diagnostic(&error);
        assert!(text.starts_with("outer failure"));
        assert!(text.contains("caused by: disk gone"));
    }

    #[test]
    fn test_cancelled_is_distinguished() {
        assert!(ConsoleError::Cancelled.is_cancelled());
        assert!(!ConsoleError::execution("boom").is_cancelled());
    }
}
