//! In-memory console for embedding and tests

use std::io;
use std::pin::Pin;
use std::sync::Arc;
use std::task::{Context, Poll};

use parking_lot::Mutex;
use tokio::io::{AsyncRead, AsyncWrite};

use super::encoding::CharacterEncoding;
use super::provider::ConsoleIoProvider;
use super::{BoxedReader, BoxedWriter};

/// A growable byte buffer shared between writers and observers
#[derive(Debug, Clone, Default)]
pub struct SharedBuffer(Arc<Mutex<Vec<u8>>>);

impl SharedBuffer {
    pub fn new() -> Self {
        Self::default()
    }

    /// A writer appending to this buffer
    pub fn writer(&self) -> MemorySink {
        MemorySink {
            targets: vec![self.clone()],
        }
    }

    pub fn bytes(&self) -> Vec<u8> {
        self.0.lock().clone()
    }

    /// Buffer contents decoded as UTF-8
    pub fn contents(&self) -> String {
        String::from_utf8_lossy(&self.0.lock()).into_owned()
    }

    fn append(&self, bytes: &[u8]) {
        self.0.lock().extend_from_slice(bytes);
    }
}

/// Writer that appends everything to one or more shared buffers
#[derive(Debug, Clone)]
pub struct MemorySink {
    targets: Vec<SharedBuffer>,
}

impl AsyncWrite for MemorySink {
    fn poll_write(
        self: Pin<&mut Self>,
        _cx: &mut Context<'_>,
        buf: &[u8],
    ) -> Poll<io::Result<usize>> {
        for target in &self.targets {
            target.append(buf);
        }
        Poll::Ready(Ok(buf.len()))
    }

    fn poll_flush(self: Pin<&mut Self>, _cx: &mut Context<'_>) -> Poll<io::Result<()>> {
        Poll::Ready(Ok(()))
    }

    fn poll_shutdown(self: Pin<&mut Self>, _cx: &mut Context<'_>) -> Poll<io::Result<()>> {
        Poll::Ready(Ok(()))
    }
}

/// Console whose channels are memory buffers.
///
/// Besides one buffer per channel, a transcript records the interleaving of
/// all three output channels in write order.
pub struct MemoryConsole {
    input: Option<BoxedReader>,
    prompt: SharedBuffer,
    output: SharedBuffer,
    error: SharedBuffer,
    transcript: SharedBuffer,
    encoding: CharacterEncoding,
    line_delimiter: String,
}

impl MemoryConsole {
    /// Create a console reading from `input`
    pub fn new(input: impl AsyncRead + Send + Unpin + 'static) -> Self {
        Self {
            input: Some(Box::new(input)),
            prompt: SharedBuffer::new(),
            output: SharedBuffer::new(),
            error: SharedBuffer::new(),
            transcript: SharedBuffer::new(),
            encoding: CharacterEncoding::Utf8,
            line_delimiter: "\n".to_string(),
        }
    }

    /// Create a console whose input is a fixed script followed by end of input
    pub fn with_script(script: &str) -> Self {
        Self::new(io::Cursor::new(script.as_bytes().to_vec()))
    }

    pub fn with_encoding(mut self, encoding: CharacterEncoding) -> Self {
        self.encoding = encoding;
        self
    }

    pub fn with_line_delimiter(mut self, line_delimiter: impl Into<String>) -> Self {
        self.line_delimiter = line_delimiter.into();
        self
    }

    pub fn prompt(&self) -> SharedBuffer {
        self.prompt.clone()
    }

    pub fn output(&self) -> SharedBuffer {
        self.output.clone()
    }

    pub fn error(&self) -> SharedBuffer {
        self.error.clone()
    }

    pub fn transcript(&self) -> SharedBuffer {
        self.transcript.clone()
    }

    fn sink_for(&self, channel: &SharedBuffer) -> BoxedWriter {
        Box::new(MemorySink {
            targets: vec![channel.clone(), self.transcript.clone()],
        })
    }
}

impl ConsoleIoProvider for MemoryConsole {
    fn prompt_stream(&mut self) -> BoxedWriter {
        self.sink_for(&self.prompt)
    }

    fn output_stream(&mut self) -> BoxedWriter {
        self.sink_for(&self.output)
    }

    fn error_stream(&mut self) -> BoxedWriter {
        self.sink_for(&self.error)
    }

    fn input_stream(&mut self) -> BoxedReader {
        self.input
            .take()
            .unwrap_or_else(|| Box::new(tokio::io::empty()))
    }

    fn character_encoding(&self) -> CharacterEncoding {
        self.encoding
    }

    fn line_delimiter(&self) -> String {
        self.line_delimiter.clone()
    }
}
