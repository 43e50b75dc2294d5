//! Ctrl+C handling for console sessions

use futures::stream::StreamExt;
use signal_hook::consts::SIGINT;
use signal_hook_tokio::{Handle, Signals};
use tokio::task::JoinHandle;
use tokio_util::sync::CancellationToken;

/// Turns SIGINT into cancellation of a session token.
///
/// The first Ctrl+C cancels the session, which kills a running git process
/// and ends the read loop. A second one exits the process right away.
#[derive(Default)]
pub struct SignalHandler {
    signals: Option<Handle>,
    task_handle: Option<JoinHandle<()>>,
}

impl SignalHandler {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start forwarding SIGINT to `cancel`
    pub fn start(&mut self, cancel: CancellationToken) -> std::io::Result<()> {
        if self.task_handle.is_some() {
            return Ok(());
        }

        let mut signals = Signals::new([SIGINT])?;
        self.signals = Some(signals.handle());

        self.task_handle = Some(tokio::spawn(async move {
            while let Some(signal) = signals.next().await {
                if signal != SIGINT {
                    continue;
                }
                if cancel.is_cancelled() {
                    eprintln!("\nInterrupted again, exiting");
                    std::process::exit(130);
                }
                tracing::debug!("SIGINT received, cancelling session");
                cancel.cancel();
            }
        }));
        Ok(())
    }

    pub fn is_active(&self) -> bool {
        self.task_handle.is_some()
    }

    /// Stop forwarding signals
    pub fn stop(&mut self) {
        if let Some(signals) = self.signals.take() {
            signals.close();
        }
        if let Some(handle) = self.task_handle.take() {
            handle.abort();
        }
    }
}

impl Drop for SignalHandler {
    fn drop(&mut self) {
        self.stop();
    }
}
