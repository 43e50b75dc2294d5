//! Running git and streaming its output

use std::io::ErrorKind;
use std::process::Stdio;
use std::sync::Arc;

use tokio::io::{AsyncRead, AsyncReadExt};
use tokio::process::Command;
use tokio_util::sync::CancellationToken;
use tracing::{debug, instrument};

use super::parser::CommandInfo;
use super::tool::ToolEnvironment;
use crate::console::ConsoleOutput;
use crate::error::{ConsoleError, ConsoleResult};

const CHUNK_SIZE: usize = 8 * 1024;

/// Executes [`CommandInfo`]s with the git executable.
///
/// The child's stdout goes to `output` and its stderr to `errors`, chunk by
/// chunk as the child produces them. When `cancel` fires the child is killed.
#[derive(Debug, Clone)]
pub struct CommandExecutor {
    program: String,
    environment: Arc<ToolEnvironment>,
    output: ConsoleOutput,
    errors: ConsoleOutput,
    cancel: CancellationToken,
}

impl CommandExecutor {
    pub fn new(
        program: impl Into<String>,
        environment: Arc<ToolEnvironment>,
        output: ConsoleOutput,
        errors: ConsoleOutput,
    ) -> Self {
        Self {
            program: program.into(),
            environment,
            output,
            errors,
            cancel: CancellationToken::new(),
        }
    }

    pub fn with_cancellation(mut self, cancel: CancellationToken) -> Self {
        self.cancel = cancel;
        self
    }

    /// Run the command to completion.
    ///
    /// Returns once both output streams are drained and the exit status is
    /// known, so nothing of this command is written after it returns.
    #[instrument(skip(self, info), fields(subcommand = %info.subcommand(), directory = %info.directory().display()))]
    pub async fn execute(&self, info: CommandInfo) -> ConsoleResult<()> {
        if self.cancel.is_cancelled() {
            return Err(ConsoleError::Cancelled);
        }

        let mut command = Command::new(&self.program);
        command
            .args(info.argv())
            .current_dir(info.directory())
            .envs(self.environment.initialize())
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .kill_on_drop(true);

        let mut child = command.spawn().map_err(|e| match e.kind() {
            ErrorKind::NotFound => ConsoleError::tool_not_found(&self.program, e.to_string()),
            _ => ConsoleError::execution(format!(
                "failed to start {} in '{}': {}",
                self.program,
                info.directory().display(),
                e
            )),
        })?;
        debug!(pid = ?child.id(), "Started git");

        let stdout = child.stdout.take();
        let stderr = child.stderr.take();
        let output = &self.output;
        let errors = &self.errors;

        // owns the child: dropping this future on cancellation kills it
        let run = async move {
            let (streamed_out, streamed_err) =
                tokio::join!(pump(stdout, output), pump(stderr, errors));
            streamed_out?;
            streamed_err?;
            Ok::<_, ConsoleError>(child.wait().await?)
        };

        let status = tokio::select! {
            biased;
            _ = self.cancel.cancelled() => {
                debug!("Cancellation requested, killing git");
                return Err(ConsoleError::Cancelled);
            }
            status = run => status?,
        };

        if status.success() {
            debug!("git {} finished", info.subcommand());
            return Ok(());
        }

        Err(match status.code() {
            Some(code) => ConsoleError::execution(format!(
                "git {} exited with status {}",
                info.subcommand(),
                code
            )),
            None => ConsoleError::execution(format!(
                "git {} was terminated by a signal",
                info.subcommand()
            )),
        })
    }
}

/// Copy a child stream into a console channel until it closes
async fn pump<R>(source: Option<R>, sink: &ConsoleOutput) -> ConsoleResult<()>
where
    R: AsyncRead + Unpin,
{
    let Some(mut source) = source else {
        return Ok(());
    };

    let mut buffer = vec![0u8; CHUNK_SIZE];
    loop {
        let read = source.read(&mut buffer).await?;
        if read == 0 {
            return Ok(());
        }
        sink.write_bytes(&buffer[..read]).await?;
    }
}
