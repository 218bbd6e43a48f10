//! Speech input
//!
//! The console transcriber stands in for a speech recognizer: each line read
//! is one utterance.

use std::io::BufRead;

use tracing::{debug, warn};

/// Why no utterance was produced
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum TranscriptionError {
    #[error("no speech detected")]
    NoSpeechDetected,

    #[error("speech recognition service unavailable: {0}")]
    ServiceUnavailable(String),

    #[error("input closed")]
    Closed,
}

impl TranscriptionError {
    /// Spoken apology for a recoverable failure
    pub fn apology(&self) -> Option<&'static str> {
        match self {
            TranscriptionError::NoSpeechDetected => {
                Some("Sorry, I couldn't understand that. Could you please repeat?")
            }
            TranscriptionError::ServiceUnavailable(_) => Some(
                "There seems to be an issue with the speech recognition service. Please try again later.",
            ),
            TranscriptionError::Closed => None,
        }
    }

    /// Short label for session events
    pub fn kind(&self) -> &'static str {
        match self {
            TranscriptionError::NoSpeechDetected => "no_speech_detected",
            TranscriptionError::ServiceUnavailable(_) => "service_unavailable",
            TranscriptionError::Closed => "closed",
        }
    }
}

/// Produces one utterance per call, blocking until input arrives
pub trait Transcriber: Send {
    fn listen(&mut self) -> Result<String, TranscriptionError>;
}

/// Reads utterances line by line
pub struct ConsoleTranscriber<R> {
    reader: R,
    echo: bool,
}

impl<R: BufRead + Send> ConsoleTranscriber<R> {
    pub fn new(reader: R, echo: bool) -> Self {
        Self { reader, echo }
    }
}

impl<R: BufRead + Send> Transcriber for ConsoleTranscriber<R> {
    fn listen(&mut self) -> Result<String, TranscriptionError> {
        debug!("listening");

        let mut line = String::new();
        match self.reader.read_line(&mut line) {
            Ok(0) => Err(TranscriptionError::Closed),
            Ok(_) => {
                let heard = line.trim();
                if heard.is_empty() {
                    return Err(TranscriptionError::NoSpeechDetected);
                }
                if self.echo {
                    println!("You said: {}", heard);
                }
                Ok(heard.to_string())
            }
            Err(e) => {
                warn!(error = %e, "failed to read utterance");
                Err(TranscriptionError::ServiceUnavailable(e.to_string()))
            }
        }
    }
}
