//! Conversation loop
//!
//! One session per process: greet, then listen, normalize, classify, dispatch
//! and speak until the engine reaches its terminal state or the transcriber
//! runs out of input. There is no turn limit.

use std::sync::Arc;
use std::time::Instant;

use tokio::sync::broadcast;
use tracing::{debug, info, warn};

use crate::events::{ConversationEvent, SessionOutcome};
use crate::intent::{classify, normalize};
use crate::state::{BookingEngine, SessionState};
use crate::store::DataStore;
use crate::voice::{Narrator, Transcriber, TranscriptionError};

/// Everything one conversation needs, built once and passed around
pub struct Session {
    engine: BookingEngine,
    narrator: Box<dyn Narrator>,
    event_tx: broadcast::Sender<ConversationEvent>,
    fallback_greeting: String,
    turns: u64,
}

impl Session {
    pub fn new(
        store: Arc<dyn DataStore>,
        narrator: Box<dyn Narrator>,
        event_tx: broadcast::Sender<ConversationEvent>,
        fallback_greeting: impl Into<String>,
    ) -> Self {
        Self {
            engine: BookingEngine::new(store, event_tx.clone()),
            narrator,
            event_tx,
            fallback_greeting: fallback_greeting.into(),
            turns: 0,
        }
    }

    /// Run the conversation to completion. Blocks on the transcriber.
    pub fn run(&mut self, transcriber: &mut dyn Transcriber) -> SessionOutcome {
        let started_at = Instant::now();

        let greeting = self.engine.greeting(&self.fallback_greeting);
        self.speak_all(&greeting.lines);
        self.emit(ConversationEvent::SessionStarted);
        info!("conversation started");

        let outcome = loop {
            self.turns += 1;

            let utterance = match transcriber.listen() {
                Ok(utterance) => utterance,
                Err(TranscriptionError::Closed) => {
                    info!(turn = self.turns, "transcriber input closed");
                    break SessionOutcome::InputClosed;
                }
                Err(e) => {
                    self.transcription_failed(e);
                    continue;
                }
            };

            if let Some(outcome) = self.handle_utterance(&utterance) {
                break outcome;
            }
        };

        let duration_ms = started_at.elapsed().as_millis() as u64;
        info!(
            turns = self.turns,
            duration_ms,
            %outcome,
            "conversation ended"
        );
        self.emit(ConversationEvent::SessionEnded {
            turns: self.turns,
            duration_ms,
            outcome,
        });
        outcome
    }

    /// One turn after a successful transcription
    fn handle_utterance(&mut self, utterance: &str) -> Option<SessionOutcome> {
        let text = normalize(utterance);
        if text.is_empty() {
            self.transcription_failed(TranscriptionError::NoSpeechDetected);
            return None;
        }

        let intent = classify(&text);
        debug!(turn = self.turns, %text, %intent, "turn classified");
        self.emit(ConversationEvent::TurnHandled {
            turn: self.turns,
            intent,
        });

        let reply = self.engine.handle(intent);
        self.speak_all(&reply.lines);

        match self.engine.state() {
            SessionState::Idle => None,
            SessionState::Ended(outcome) => Some(outcome),
        }
    }

    fn transcription_failed(&mut self, error: TranscriptionError) {
        warn!(turn = self.turns, error = %error, "transcription failed");
        self.emit(ConversationEvent::TranscriptionFailed {
            turn: self.turns,
            kind: error.kind().to_string(),
        });
        if let Some(apology) = error.apology() {
            self.narrator.speak(apology);
        }
    }

    fn speak_all(&self, lines: &[String]) {
        for line in lines {
            self.narrator.speak(line);
        }
    }

    fn emit(&self, event: ConversationEvent) {
        // No subscriber is fine
        let _ = self.event_tx.send(event);
    }
}
