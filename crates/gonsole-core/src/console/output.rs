//! Encoded output channel

use std::fmt;
use std::sync::Arc;

use tokio::io::AsyncWriteExt;
use tokio::sync::Mutex;

use super::encoding::CharacterEncoding;
use super::BoxedWriter;
use crate::error::ConsoleResult;

/// A byte sink bound to an encoding and a line delimiter.
///
/// Clones share the same sink. Every write is flushed before it returns, so
/// a prompt is visible before the loop blocks on input.
#[derive(Clone)]
pub struct ConsoleOutput {
    sink: Arc<Mutex<BoxedWriter>>,
    encoding: CharacterEncoding,
    line_delimiter: Arc<str>,
}

impl ConsoleOutput {
    pub fn new(
        sink: BoxedWriter,
        encoding: CharacterEncoding,
        line_delimiter: impl Into<String>,
    ) -> Self {
        Self {
            sink: Arc::new(Mutex::new(sink)),
            encoding,
            line_delimiter: Arc::from(line_delimiter.into()),
        }
    }

    /// Write text without a trailing delimiter
    pub async fn write(&self, text: &str) -> ConsoleResult<()> {
        self.write_bytes(&self.encoding.encode(text)).await
    }

    /// Write text followed by the session's line delimiter
    pub async fn write_line(&self, text: &str) -> ConsoleResult<()> {
        let mut bytes = self.encoding.encode(text);
        bytes.extend(self.encoding.encode(&self.line_delimiter));
        self.write_bytes(&bytes).await
    }

    /// Write raw bytes, e.g. as produced by an external process
    pub async fn write_bytes(&self, bytes: &[u8]) -> ConsoleResult<()> {
        let mut sink = self.sink.lock().await;
        sink.write_all(bytes).await?;
        sink.flush().await?;
        Ok(())
    }

    pub fn encoding(&self) -> CharacterEncoding {
        self.encoding
    }

    pub fn line_delimiter(&self) -> &str {
        &self.line_delimiter
    }
}

impl fmt::Debug for ConsoleOutput {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ConsoleOutput")
            .field("encoding", &self.encoding)
            .field("line_delimiter", &self.line_delimiter)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::console::memory::SharedBuffer;

    #[tokio::test]
    async fn test_write_line_appends_delimiter() {
        let buffer = SharedBuffer::new();
        let output = ConsoleOutput::new(
            Box::new(buffer.writer()),
            CharacterEncoding::Utf8,
            "\r\n",
        );

        output.write("repo> ").await.unwrap();
        output.write_line("done").await.unwrap();

        assert_eq!(buffer.contents(), "repo> done\r\n");
    }

    #[tokio::test]
    async fn test_write_uses_bound_encoding() {
        let buffer = SharedBuffer::new();
        let output = ConsoleOutput::new(Box::new(buffer.writer()), CharacterEncoding::Latin1, "\n");

        output.write_line("Grüße").await.unwrap();

        assert_eq!(buffer.bytes(), b"Gr\xfc\xdfe\n".to_vec());
    }

    #[tokio::test]
    async fn test_clones_share_the_sink() {
        let buffer = SharedBuffer::new();
        let output = ConsoleOutput::new(Box::new(buffer.writer()), CharacterEncoding::Utf8, "\n");
        let clone = output.clone();

        output.write("a").await.unwrap();
        clone.write("b").await.unwrap();

        assert_eq!(buffer.contents(), "ab");
    }
}
