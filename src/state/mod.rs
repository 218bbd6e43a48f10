//! State machine module for the front desk conversation
//!
//! Provides the booking engine with two states:
//! - Idle: between turns, every intent is executed here
//! - Ended: terminal, reached by a farewell or a successful booking

mod booking;
mod machine;

pub use machine::{BookingEngine, SessionState};
