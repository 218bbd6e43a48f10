//! Voice module: the speech collaborators around the conversation
//!
//! Audio capture and text-to-speech live outside this crate. The traits here
//! are the seams where a recognizer or a TTS engine plugs in; the console
//! implementations drive the assistant from a terminal.

mod narrator;
mod transcriber;

pub use narrator::{ConsoleNarrator, Narrator};
pub use transcriber::{ConsoleTranscriber, Transcriber, TranscriptionError};
