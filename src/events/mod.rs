//! Events module for conversation transitions
//!
//! Provides structured event types emitted while a session runs: turns,
//! transcription failures, bookings and the session's end.

use serde::{Deserialize, Serialize};

use crate::intent::{Intent, RoomType};

/// How a session finished
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SessionOutcome {
    /// Guest said goodbye
    Farewell,
    /// A room was booked
    Booked,
    /// The transcriber has no more input
    InputClosed,
}

impl std::fmt::Display for SessionOutcome {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SessionOutcome::Farewell => write!(f, "farewell"),
            SessionOutcome::Booked => write!(f, "booked"),
            SessionOutcome::InputClosed => write!(f, "input_closed"),
        }
    }
}

/// Events emitted during a conversation
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ConversationEvent {
    /// Greeting spoken, waiting for the first utterance
    SessionStarted,

    /// An utterance was classified and dispatched
    TurnHandled {
        turn: u64,
        intent: Intent,
    },

    /// The transcriber produced nothing usable this turn
    TranscriptionFailed {
        turn: u64,
        kind: String,
    },

    /// A unit was reserved and saved
    RoomBooked {
        room: RoomType,
        /// Units left after this booking
        remaining: u32,
    },

    /// Saving a booking failed and the reservation was undone
    BookingRolledBack {
        room: RoomType,
    },

    /// The conversation finished
    SessionEnded {
        turns: u64,
        /// Duration in milliseconds that the session was active
        duration_ms: u64,
        outcome: SessionOutcome,
    },
}

impl std::fmt::Display for ConversationEvent {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ConversationEvent::SessionStarted => write!(f, "SESSION_STARTED"),
            ConversationEvent::TurnHandled { turn, intent } => {
                write!(f, "TURN_HANDLED #{} {}", turn, intent)
            }
            ConversationEvent::TranscriptionFailed { turn, kind } => {
                write!(f, "TRANSCRIPTION_FAILED #{} ({})", turn, kind)
            }
            ConversationEvent::RoomBooked { room, remaining } => {
                write!(f, "ROOM_BOOKED {} ({} left)", room, remaining)
            }
            ConversationEvent::BookingRolledBack { room } => {
                write!(f, "BOOKING_ROLLED_BACK {}", room)
            }
            ConversationEvent::SessionEnded {
                turns,
                duration_ms,
                outcome,
            } => write!(
                f,
                "SESSION_ENDED {} after {} turns ({}ms)",
                outcome, turns, duration_ms
            ),
        }
    }
}
