//! Console I/O providers and the channel set built from them

use super::encoding::CharacterEncoding;
use super::input::ConsoleInput;
use super::output::ConsoleOutput;
use super::{BoxedReader, BoxedWriter};

/// Supplies the byte streams and text conventions of a console session.
///
/// Each stream accessor is called once when a session is opened.
pub trait ConsoleIoProvider {
    fn prompt_stream(&mut self) -> BoxedWriter;
    fn output_stream(&mut self) -> BoxedWriter;
    fn error_stream(&mut self) -> BoxedWriter;
    fn input_stream(&mut self) -> BoxedReader;
    fn character_encoding(&self) -> CharacterEncoding;
    fn line_delimiter(&self) -> String;
}

/// Console bound to the process's stdin, stdout and stderr
#[derive(Debug, Clone)]
pub struct StdioConsoleProvider {
    encoding: CharacterEncoding,
    line_delimiter: String,
}

impl StdioConsoleProvider {
    pub fn new(encoding: CharacterEncoding, line_delimiter: impl Into<String>) -> Self {
        Self {
            encoding,
            line_delimiter: line_delimiter.into(),
        }
    }
}

impl Default for StdioConsoleProvider {
    fn default() -> Self {
        Self::new(CharacterEncoding::Utf8, "\n")
    }
}

impl ConsoleIoProvider for StdioConsoleProvider {
    fn prompt_stream(&mut self) -> BoxedWriter {
        Box::new(tokio::io::stdout())
    }

    fn output_stream(&mut self) -> BoxedWriter {
        Box::new(tokio::io::stdout())
    }

    fn error_stream(&mut self) -> BoxedWriter {
        Box::new(tokio::io::stderr())
    }

    fn input_stream(&mut self) -> BoxedReader {
        Box::new(tokio::io::stdin())
    }

    fn character_encoding(&self) -> CharacterEncoding {
        self.encoding
    }

    fn line_delimiter(&self) -> String {
        self.line_delimiter.clone()
    }
}

/// The four channels of one console session
#[derive(Debug)]
pub struct ConsoleChannels {
    pub prompt: ConsoleOutput,
    pub output: ConsoleOutput,
    pub error: ConsoleOutput,
    pub input: ConsoleInput,
}

impl ConsoleChannels {
    /// Bind every channel to the provider's encoding and delimiter
    pub fn open(provider: &mut dyn ConsoleIoProvider) -> Self {
        let encoding = provider.character_encoding();
        let delimiter = provider.line_delimiter();

        Self {
            prompt: ConsoleOutput::new(provider.prompt_stream(), encoding, delimiter.clone()),
            output: ConsoleOutput::new(provider.output_stream(), encoding, delimiter.clone()),
            error: ConsoleOutput::new(provider.error_stream(), encoding, delimiter.clone()),
            input: ConsoleInput::new(provider.input_stream(), encoding, &delimiter),
        }
    }
}
