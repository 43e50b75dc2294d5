//! Lifecycle of a console session running in the background

use std::sync::Arc;

use tokio::task::JoinHandle;
use tokio_util::sync::CancellationToken;
use tracing::{debug, warn};

use crate::console::{ConsoleChannels, ConsoleIoProvider};
use crate::error::{ConsoleError, ConsoleResult};
use crate::interpreter::{
    ConsoleCommandInterpreter, ControlCommandInterpreter, GitCommandInterpreter, InterpreterChain,
};
use crate::pipeline::GitTool;
use crate::repository::RepositoryProvider;
use crate::scanner::InputScanner;

/// Starts and stops the read-eval loop of one console session.
///
/// The loop runs as a single task on the current tokio runtime. Stopping
/// cancels the session token, which unblocks a pending read and kills a
/// running git process, then waits for the task to finish. Nothing is
/// written to the console after [`stop`](Self::stop) returns.
pub struct InputObserver {
    scanner: Option<InputScanner>,
    cancel: CancellationToken,
    handle: Option<JoinHandle<ConsoleResult<()>>>,
}

impl InputObserver {
    /// Create a session with the standard interpreters: control commands
    /// first, then git pass-through.
    pub fn new(
        provider: &mut dyn ConsoleIoProvider,
        repositories: Arc<dyn RepositoryProvider>,
        tool: GitTool,
    ) -> Self {
        let channels = ConsoleChannels::open(provider);
        let cancel = CancellationToken::new();

        let interpreters: Vec<Box<dyn ConsoleCommandInterpreter>> = vec![
            Box::new(ControlCommandInterpreter::new(
                channels.output.clone(),
                Arc::clone(&repositories),
            )),
            Box::new(
                GitCommandInterpreter::new(
                    tool,
                    channels.output.clone(),
                    channels.error.clone(),
                    Arc::clone(&repositories),
                )
                .with_cancellation(cancel.clone()),
            ),
        ];

        Self::with_interpreters(
            channels,
            repositories,
            InterpreterChain::new(interpreters),
            cancel,
        )
    }

    /// Create a session with a custom interpreter chain.
    ///
    /// Interpreters that run long operations should observe `cancel`.
    pub fn with_interpreters(
        channels: ConsoleChannels,
        repositories: Arc<dyn RepositoryProvider>,
        interpreters: InterpreterChain,
        cancel: CancellationToken,
    ) -> Self {
        Self {
            scanner: Some(InputScanner::new(
                channels,
                repositories,
                interpreters,
                cancel.clone(),
            )),
            cancel,
            handle: None,
        }
    }

    /// Start the loop; a session can only be started once
    pub fn start(&mut self) -> ConsoleResult<()> {
        let scanner = self
            .scanner
            .take()
            .ok_or_else(|| ConsoleError::other("console session already started"))?;

        debug!("Starting console session");
        self.handle = Some(tokio::spawn(scanner.run()));
        Ok(())
    }

    /// Cancel the session and wait for the loop to finish
    pub async fn stop(&mut self) -> ConsoleResult<()> {
        debug!("Stopping console session");
        self.cancel.cancel();
        self.scanner = None;
        self.join().await
    }

    /// Wait for the loop to end on its own, e.g. at end of input
    pub async fn join(&mut self) -> ConsoleResult<()> {
        let Some(handle) = self.handle.take() else {
            return Ok(());
        };

        match handle.await {
            Ok(result) => result,
            Err(e) if e.is_cancelled() => Ok(()),
            Err(e) => {
                warn!("Console session task failed: {}", e);
                Err(ConsoleError::other(format!("console session failed: {}", e)))
            }
        }
    }

    pub fn cancellation_token(&self) -> CancellationToken {
        self.cancel.clone()
    }

    pub fn is_running(&self) -> bool {
        self.handle
            .as_ref()
            .is_some_and(|handle| !handle.is_finished())
    }
}

impl Drop for InputObserver {
    fn drop(&mut self) {
        self.cancel.cancel();
        if let Some(handle) = self.handle.take() {
            handle.abort();
        }
    }
}
