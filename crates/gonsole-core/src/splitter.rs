//! Splitting raw input lines into command lines

use std::fmt;

use shell_words::split as split_words;

use crate::error::{ConsoleError, ConsoleResult};

/// Tokens of one input line; the first token is the command name
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CommandLine {
    tokens: Vec<String>,
}

impl CommandLine {
    pub fn new(tokens: Vec<String>) -> Self {
        Self { tokens }
    }

    /// The command name, if any
    pub fn command(&self) -> Option<&str> {
        self.tokens.first().map(String::as_str)
    }

    /// Everything after the command name
    pub fn arguments(&self) -> &[String] {
        self.tokens.get(1..).unwrap_or_default()
    }

    pub fn tokens(&self) -> &[String] {
        &self.tokens
    }

    pub fn is_empty(&self) -> bool {
        self.tokens.is_empty()
    }

    pub fn len(&self) -> usize {
        self.tokens.len()
    }
}

impl<S: Into<String>> FromIterator<S> for CommandLine {
    fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
        Self::new(iter.into_iter().map(Into::into).collect())
    }
}

impl fmt::Display for CommandLine {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&shell_words::join(&self.tokens))
    }
}

/// Split a raw line into tokens.
///
/// Whitespace separates tokens; single quotes, double quotes and backslash
/// escapes follow POSIX shell word rules. An unterminated quote is a
/// [`ConsoleError::Parse`] naming the offending line. Nothing is dropped
/// silently.
///
/// There are no comments: a `#` is literal wherever it appears, so
/// `log --grep #123` keeps `#123` as an argument and `# note` yields the
/// tokens `#` and `note`.
pub fn split(line: &str) -> ConsoleResult<CommandLine> {
    let tokens = split_words(&escape_word_hashes(line))
        .map_err(|e| ConsoleError::parse(format!("{} in: {}", e, line.trim())))?;
    Ok(CommandLine::new(tokens))
}

/// Backslash-escape every unquoted `#` that starts a word, which shell word
/// rules would otherwise treat as the start of a comment.
fn escape_word_hashes(line: &str) -> String {
    let mut escaped_line = String::with_capacity(line.len());
    let mut quote: Option<char> = None;
    let mut escaping = false;
    let mut word_start = true;

    for c in line.chars() {
        if escaping {
            escaping = false;
            word_start = false;
            escaped_line.push(c);
            continue;
        }

        match (quote, c) {
            (Some('\''), '\'') => quote = None,
            (Some('\''), _) => {}
            (Some(_), '"') => quote = None,
            (Some(_), '\\') => escaping = true,
            (Some(_), _) => {}
            (None, '\\') => escaping = true,
            (None, '\'' | '"') => quote = Some(c),
            (None, '#') if word_start => escaped_line.push('\\'),
            (None, _) => {}
        }

        word_start = quote.is_none() && !escaping && c.is_whitespace();
        escaped_line.push(c);
    }

    escaped_line
}
