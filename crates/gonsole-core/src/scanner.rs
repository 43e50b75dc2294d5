//! The read-eval loop of a console session

use std::any::Any;
use std::panic::AssertUnwindSafe;
use std::sync::Arc;

use futures::FutureExt;
use tokio_util::sync::CancellationToken;
use tracing::{debug, info, warn};

use crate::console::{ConsoleChannels, ConsoleInput, ConsoleOutput};
use crate::error::{diagnostic, ConsoleError, ConsoleResult};
use crate::interpreter::InterpreterChain;
use crate::repository::{repository_name, RepositoryProvider};
use crate::splitter::split;

/// Appended to the repository name to form the prompt
pub const PROMPT_POSTFIX: &str = "> ";

/// Reads lines from the input channel and dispatches them until end of input
/// or cancellation.
///
/// Each iteration writes a prompt naming the current repository, waits for a
/// line, and hands it to the first interpreter that recognizes it. Failures
/// of a single command are reported on the error channel and never end the
/// loop.
pub struct InputScanner {
    prompt: ConsoleOutput,
    input: ConsoleInput,
    repositories: Arc<dyn RepositoryProvider>,
    dispatcher: Dispatcher,
    cancel: CancellationToken,
}

/// Per-line dispatch state. It is borrowed across awaits of the session task
/// and must stay `Sync`, so the input channel lives outside it.
struct Dispatcher {
    error: ConsoleOutput,
    interpreters: InterpreterChain,
    cancel: CancellationToken,
}

impl InputScanner {
    pub fn new(
        channels: ConsoleChannels,
        repositories: Arc<dyn RepositoryProvider>,
        interpreters: InterpreterChain,
        cancel: CancellationToken,
    ) -> Self {
        Self {
            prompt: channels.prompt,
            input: channels.input,
            repositories,
            dispatcher: Dispatcher {
                error: channels.error,
                interpreters,
                cancel: cancel.clone(),
            },
            cancel,
        }
    }

    /// The prompt for the repository that is current right now
    pub fn prompt_text(&self) -> String {
        let location = self.repositories.current_repository_location();
        format!("{}{}", repository_name(&location), PROMPT_POSTFIX)
    }

    /// Run until end of input or cancellation.
    ///
    /// A console that can no longer be used also ends the session: a failed
    /// prompt write or input read is returned as the error of the session.
    /// Failures of individual commands never are.
    pub async fn run(mut self) -> ConsoleResult<()> {
        info!(interpreters = ?self.dispatcher.interpreters, "Console session started");

        loop {
            if self.cancel.is_cancelled() {
                break;
            }

            self.prompt.write(&self.prompt_text()).await?;

            let line = tokio::select! {
                biased;
                _ = self.cancel.cancelled() => break,
                line = self.input.read_line() => line?,
            };

            let Some(line) = line else {
                debug!("End of input");
                break;
            };

            if line.trim().is_empty() {
                continue;
            }

            let cancel = self.cancel.clone();
            tokio::select! {
                biased;
                _ = cancel.cancelled() => break,
                _ = self.dispatcher.dispatch(&line) => {}
            }
        }

        info!("Console session ended");
        Ok(())
    }
}

impl Dispatcher {
    async fn dispatch(&self, line: &str) {
        let outcome = AssertUnwindSafe(self.interpret(line)).catch_unwind().await;
        if self.cancel.is_cancelled() {
            return;
        }

        let message = match outcome {
            Ok(Ok(None)) => return,
            Ok(Ok(Some(message))) => message,
            Ok(Err(ConsoleError::Cancelled)) => return,
            Ok(Err(error)) => diagnostic(&error),
            Err(payload) => format!("Unexpected failure: {}", panic_message(payload.as_ref())),
        };

        if let Err(e) = self.error.write_line(&message).await {
            warn!("Failed to report command failure: {}", e);
        }
    }

    async fn interpret(&self, line: &str) -> ConsoleResult<Option<String>> {
        let command_line = match split(line) {
            Ok(command_line) => command_line,
            Err(e) => return Ok(Some(e.to_string())),
        };

        let Some(interpreter) = self.interpreters.find(&command_line) else {
            let name = command_line.command().unwrap_or(line.trim());
            return Ok(Some(
                ConsoleError::UnrecognizedCommand(name.to_string()).to_string(),
            ));
        };

        debug!(interpreter = interpreter.name(), command = %command_line, "Dispatching");
        interpreter.execute(&command_line).await
    }
}

fn panic_message(payload: &(dyn Any + Send)) -> &str {
    if let Some(message) = payload.downcast_ref::<&str>() {
        message
    } else if let Some(message) = payload.downcast_ref::<String>() {
        message
    } else {
        "panic"
    }
}
