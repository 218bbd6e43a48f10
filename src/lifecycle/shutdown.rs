//! Signal handling for interrupting a conversation

use anyhow::{Context, Result};
use tokio::signal::unix::{signal, SignalKind};
use tracing::debug;

/// Which signal asked the process to stop
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ShutdownKind {
    Terminate,
    Interrupt,
}

impl ShutdownKind {
    /// Conventional exit status for a process stopped by this signal
    pub fn exit_code(&self) -> i32 {
        match self {
            ShutdownKind::Terminate => 143,
            ShutdownKind::Interrupt => 130,
        }
    }
}

/// Handles shutdown signals (SIGTERM, SIGINT)
pub struct ShutdownSignal {
    sigterm: tokio::signal::unix::Signal,
    sigint: tokio::signal::unix::Signal,
}

impl ShutdownSignal {
    /// Register the signal handlers
    pub fn new() -> Result<Self> {
        let sigterm =
            signal(SignalKind::terminate()).context("failed to register SIGTERM handler")?;
        let sigint =
            signal(SignalKind::interrupt()).context("failed to register SIGINT handler")?;
        Ok(Self { sigterm, sigint })
    }

    /// Wait for a shutdown signal
    pub async fn wait(&mut self) -> ShutdownKind {
        tokio::select! {
            _ = self.sigterm.recv() => {
                debug!("received SIGTERM");
                ShutdownKind::Terminate
            }
            _ = self.sigint.recv() => {
                debug!("received SIGINT");
                ShutdownKind::Interrupt
            }
        }
    }
}
