//! Line-oriented input channel

use tokio::io::{AsyncBufReadExt, BufReader};

use super::encoding::CharacterEncoding;
use super::BoxedReader;
use crate::error::ConsoleResult;

/// Blocking line source of a console session
pub struct ConsoleInput {
    reader: BufReader<BoxedReader>,
    encoding: CharacterEncoding,
    delimiter: Vec<u8>,
    strip_carriage_return: bool,
}

impl ConsoleInput {
    pub fn new(source: BoxedReader, encoding: CharacterEncoding, line_delimiter: &str) -> Self {
        let delimiter = encoding.encode(line_delimiter);
        Self {
            reader: BufReader::new(source),
            encoding,
            delimiter,
            strip_carriage_return: line_delimiter == "\n",
        }
    }

    /// Read one logical line without its delimiter.
    ///
    /// Returns `None` once the source is closed. A final line without a
    /// delimiter is still returned before `None`.
    pub async fn read_line(&mut self) -> ConsoleResult<Option<String>> {
        let terminator = self.delimiter.last().copied().unwrap_or(b'\n');
        let mut buffer = Vec::new();

        loop {
            let read = self.reader.read_until(terminator, &mut buffer).await?;
            if read == 0 {
                if buffer.is_empty() {
                    return Ok(None);
                }
                break;
            }
            // multi-byte delimiters may contain the terminator byte early
            if buffer.ends_with(&self.delimiter) || buffer.last() != Some(&terminator) {
                break;
            }
        }

        if buffer.ends_with(&self.delimiter) {
            buffer.truncate(buffer.len() - self.delimiter.len());
        }
        if self.strip_carriage_return && buffer.last() == Some(&b'\r') {
            buffer.pop();
        }

        Ok(Some(self.encoding.decode(&buffer)))
    }
}

impl std::fmt::Debug for ConsoleInput {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ConsoleInput")
            .field("encoding", &self.encoding)
            .field("delimiter", &self.delimiter)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    fn input(bytes: &[u8], delimiter: &str) -> ConsoleInput {
        ConsoleInput::new(
            Box::new(Cursor::new(bytes.to_vec())),
            CharacterEncoding::Utf8,
            delimiter,
        )
    }

    #[tokio::test]
    async fn test_lines_then_end_sentinel() {
        let mut input = input(b"status\nlog -1\n", "\n");

        assert_eq!(input.read_line().await.unwrap().as_deref(), Some("status"));
        assert_eq!(input.read_line().await.unwrap().as_deref(), Some("log -1"));
        assert_eq!(input.read_line().await.unwrap(), None);
    }

    #[tokio::test]
    async fn test_trailing_line_without_delimiter() {
        let mut input = input(b"branch", "\n");

        assert_eq!(input.read_line().await.unwrap().as_deref(), Some("branch"));
        assert_eq!(input.read_line().await.unwrap(), None);
    }

    #[tokio::test]
    async fn test_crlf_input_with_lf_delimiter() {
        let mut input = input(b"status\r\n", "\n");
        assert_eq!(input.read_line().await.unwrap().as_deref(), Some("status"));
    }

    #[tokio::test]
    async fn test_multi_byte_delimiter() {
        let mut input = input(b"one\rtwo\r\n", "\r\n");
        assert_eq!(input.read_line().await.unwrap().as_deref(), Some("one\rtwo"));
        assert_eq!(input.read_line().await.unwrap(), None);
    }

    #[tokio::test]
    async fn test_decodes_with_bound_encoding() {
        let mut input = ConsoleInput::new(
            Box::new(Cursor::new(b"commit -m \xe4\n".to_vec())),
            CharacterEncoding::Latin1,
            "\n",
        );
        assert_eq!(input.read_line().await.unwrap().as_deref(), Some("commit -m ä"));
    }
}
