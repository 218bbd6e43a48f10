//! front-desk: voice-driven hotel front desk assistant
//!
//! Holds one conversation with a guest:
//! - Normalizes and classifies each utterance into an intent
//! - Answers availability, room and policy questions from the inventory
//! - Books a room, persisting the decremented inventory atomically
//!
//! Speech recognition and synthesis are external; the binary reads
//! utterances from stdin and speaks replies on stdout.

mod config;
mod conversation;
mod events;
mod intent;
mod lifecycle;
mod state;
mod store;
mod voice;

#[cfg(test)]
mod testing;

use std::io::BufReader;
use std::sync::Arc;

use anyhow::{Context, Result};
use tokio::sync::broadcast;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

use crate::config::Config;
use crate::conversation::Session;
use crate::events::ConversationEvent;
use crate::lifecycle::ShutdownSignal;
use crate::store::{preflight, JsonFileStore};
use crate::voice::{ConsoleNarrator, ConsoleTranscriber};

#[tokio::main]
async fn main() -> Result<()> {
    // Logs go to stderr; stdout carries the conversation
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    info!(version = env!("CARGO_PKG_VERSION"), "front-desk starting");

    let config = Config::load().context("failed to load configuration")?;
    config.ensure_dirs()?;
    info!(data_file = ?config.data_file, "configuration loaded");

    let mut shutdown = ShutdownSignal::new()?;

    // Engine and conversation -> event logger
    let (event_tx, mut event_rx) = broadcast::channel::<ConversationEvent>(64);

    let events = tokio::spawn(async move {
        loop {
            match event_rx.recv().await {
                Ok(event) => info!(%event, "conversation event"),
                Err(broadcast::error::RecvError::Lagged(n)) => {
                    warn!(skipped = n, "event receiver lagged");
                }
                Err(broadcast::error::RecvError::Closed) => break,
            }
        }
    });

    let store = Arc::new(JsonFileStore::new(&config.data_file));
    if !store.path().exists() {
        warn!(path = %store.path().display(), "inventory file does not exist yet");
    }
    preflight(store.as_ref())
        .with_context(|| format!("cannot read inventory at {}", store.path().display()))?;
    let mut session = Session::new(
        store,
        Box::new(ConsoleNarrator),
        event_tx,
        config.fallback_greeting.clone(),
    );
    let mut transcriber = ConsoleTranscriber::new(BufReader::new(std::io::stdin()), config.echo);

    // The transcriber blocks, so the conversation runs off the async workers
    let conversation = tokio::task::spawn_blocking(move || session.run(&mut transcriber));

    tokio::select! {
        result = conversation => {
            let outcome = result.context("conversation task failed")?;
            info!(%outcome, "conversation finished");
        }

        kind = shutdown.wait() => {
            info!(?kind, "shutdown signal received, abandoning conversation");
            // The blocked stdin read cannot be cancelled
            std::process::exit(kind.exit_code());
        }
    }

    // Session dropped its sender; drain what is left
    if let Err(e) = events.await {
        warn!(?e, "event logger failed");
    }

    info!("front-desk stopped");

    Ok(())
}
