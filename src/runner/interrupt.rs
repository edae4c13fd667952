//! Cancellation flag for Ctrl+C

use crate::error::Result;
use std::sync::Arc;
use tokio::sync::watch;
use tracing::debug;

/// Cloneable "user asked us to stop" flag
///
/// Once triggered it stays triggered.
#[derive(Debug, Clone)]
pub struct Interrupt {
    tx: Arc<watch::Sender<bool>>,
}

impl Default for Interrupt {
    fn default() -> Self {
        Self::new()
    }
}

impl Interrupt {
    /// A flag nothing triggers except [`Interrupt::trigger`]
    pub fn new() -> Self {
        let (tx, _rx) = watch::channel(false);
        Self { tx: Arc::new(tx) }
    }

    /// A flag triggered by the first Ctrl+C
    ///
    /// The signal handler is installed before this returns. Must be called
    /// inside a Tokio runtime.
    pub fn listen_for_ctrl_c() -> Result<Self> {
        #[cfg(unix)]
        let mut signal =
            tokio::signal::unix::signal(tokio::signal::unix::SignalKind::interrupt())?;
        #[cfg(windows)]
        let mut signal = tokio::signal::windows::ctrl_c()?;

        let interrupt = Self::new();
        let handle = interrupt.clone();
        tokio::spawn(async move {
            if signal.recv().await.is_some() {
                debug!("received Ctrl+C");
                handle.trigger();
            }
        });
        Ok(interrupt)
    }

    /// Trigger the flag
    pub fn trigger(&self) {
        self.tx.send_replace(true);
    }

    /// Whether the flag has been triggered
    pub fn is_triggered(&self) -> bool {
        *self.tx.borrow()
    }

    /// Resolve once the flag is triggered
    pub async fn triggered(&self) {
        let mut rx = self.tx.subscribe();
        // The sender lives in `self`, so this only returns on trigger
        let _ = rx.wait_for(|stop| *stop).await;
    }
}
