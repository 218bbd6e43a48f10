//! Booking engine state machine
//!
//! Executes one intent per turn against a freshly loaded inventory. Two
//! states: Idle between turns and the terminal Ended, reached by a farewell
//! or by a successful booking.

use std::sync::Arc;

use rand::seq::SliceRandom;
use tokio::sync::broadcast;
use tracing::{debug, info, warn};

use crate::events::{ConversationEvent, SessionOutcome};
use crate::intent::{FaqTopic, Intent, RoomType};
use crate::store::{self, DataStore, InventoryDocument, Loaded, ReserveError};

use super::booking::{book_room, BookingError};

const NO_ROOMS: &str = "I'm sorry, but no rooms are available at the moment.";
const ROOM_NOT_FOUND: &str = "Sorry, I couldn't find that room type.";
const AMBIGUOUS_ROOM: &str =
    "Sorry, I didn't understand the room choice. Please specify single, double, or suite.";
const BOOKING_NOT_SAVED: &str =
    "Sorry, I couldn't complete your booking right now. Nothing was reserved, please try again.";
const FAREWELL: &str = "Goodbye! Have a great day!";
const NOT_UNDERSTOOD: &str =
    "Sorry, I didn't understand your request. Please ask about room availability, pricing, or booking.";
const SESSION_OVER: &str = "This conversation has already ended.";

/// Conversation state
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SessionState {
    /// Waiting for the next intent
    #[default]
    Idle,
    /// Terminal; no further intents are executed
    Ended(SessionOutcome),
}

impl std::fmt::Display for SessionState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SessionState::Idle => write!(f, "Idle"),
            SessionState::Ended(outcome) => write!(f, "Ended({})", outcome),
        }
    }
}

/// Lines to speak in response to one turn, in order
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Reply {
    pub lines: Vec<String>,
}

impl Reply {
    fn say(&mut self, line: impl Into<String>) {
        self.lines.push(line.into());
    }
}

/// The state machine that executes intents against the inventory
pub struct BookingEngine {
    state: SessionState,
    store: Arc<dyn DataStore>,
    event_tx: broadcast::Sender<ConversationEvent>,
}

impl BookingEngine {
    pub fn new(store: Arc<dyn DataStore>, event_tx: broadcast::Sender<ConversationEvent>) -> Self {
        Self {
            state: SessionState::Idle,
            store,
            event_tx,
        }
    }

    pub fn state(&self) -> SessionState {
        self.state
    }

    /// Opening line: a random greeting from the document, else `fallback`
    pub fn greeting(&self, fallback: &str) -> Reply {
        let mut reply = Reply::default();
        let document = self.load(&mut reply);
        let greeting = document
            .greetings
            .choose(&mut rand::thread_rng())
            .map(String::as_str)
            .unwrap_or(fallback);
        reply.say(greeting);
        reply
    }

    /// Execute one intent
    pub fn handle(&mut self, intent: Intent) -> Reply {
        let mut reply = Reply::default();

        if let SessionState::Ended(_) = self.state {
            warn!(%intent, "intent received after session ended");
            reply.say(SESSION_OVER);
            return reply;
        }

        debug!(%intent, "handling intent");
        match intent {
            Intent::CheckAvailability => self.check_availability(&mut reply),
            Intent::RoomDetail(room) => self.room_detail(room, &mut reply),
            Intent::BookRoom(room) => self.book(room, &mut reply),
            Intent::BookRoomAmbiguous => reply.say(AMBIGUOUS_ROOM),
            Intent::FaqQuery(topic) => self.faq(topic, &mut reply),
            Intent::EndConversation => {
                reply.say(FAREWELL);
                self.transition_to(SessionState::Ended(SessionOutcome::Farewell));
            }
            Intent::Unknown => reply.say(NOT_UNDERSTOOD),
        }
        reply
    }

    /// Fresh copy of the document; load diagnostics are spoken first
    fn load(&self, reply: &mut Reply) -> InventoryDocument {
        let Loaded {
            document,
            diagnostic,
        } = store::load_or_default(self.store.as_ref());
        if let Some(diagnostic) = diagnostic {
            reply.say(diagnostic);
        }
        document
    }

    fn check_availability(&self, reply: &mut Reply) {
        let document = self.load(reply);
        let available = document.available_room_types();

        if available.is_empty() {
            reply.say(NO_ROOMS);
        } else {
            reply.say(format!(
                "We have the following rooms available: {}.",
                available.join(", ")
            ));
        }
    }

    fn room_detail(&self, room: RoomType, reply: &mut Reply) {
        let document = self.load(reply);
        let Some(record) = document.room(room) else {
            reply.say(ROOM_NOT_FOUND);
            return;
        };

        let mut line = format!(
            "The {} room is available for {:.2} dollars per night after a discount of {}%.",
            room,
            record.final_price(),
            record.discount_percent
        );
        if !record.amenities.is_empty() {
            line.push_str(&format!(
                " It includes amenities like {}.",
                record.amenities.join(", ")
            ));
        }
        reply.say(line);
    }

    fn book(&mut self, room: RoomType, reply: &mut Reply) {
        let mut document = self.load(reply);

        match book_room(&mut document, self.store.as_ref(), room) {
            Ok(remaining) => {
                info!(%room, remaining, "room booked");
                let _ = self
                    .event_tx
                    .send(ConversationEvent::RoomBooked { room, remaining });
                reply.say(format!(
                    "Successfully booked a {} room at {}.",
                    room,
                    document.display_name()
                ));
                self.transition_to(SessionState::Ended(SessionOutcome::Booked));
            }
            Err(BookingError::Reserve(ReserveError::UnknownRoom(_))) => {
                reply.say(ROOM_NOT_FOUND);
            }
            Err(BookingError::Reserve(ReserveError::SoldOut(_))) => {
                info!(%room, "booking refused, sold out");
                reply.say(format!("Sorry, no {} rooms are available.", room));
            }
            Err(BookingError::Persist(_)) => {
                let _ = self
                    .event_tx
                    .send(ConversationEvent::BookingRolledBack { room });
                reply.say(BOOKING_NOT_SAVED);
            }
        }
    }

    fn faq(&self, topic: FaqTopic, reply: &mut Reply) {
        let document = self.load(reply);
        let answer = document.faq(topic).unwrap_or_else(|| topic.fallback());
        reply.say(answer);
    }

    fn transition_to(&mut self, new_state: SessionState) {
        info!(from = %self.state, to = %new_state, "state transition");
        self.state = new_state;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::{sample_document, MemoryStore};

    fn create_engine(
        store: &Arc<MemoryStore>,
    ) -> (BookingEngine, broadcast::Receiver<ConversationEvent>) {
        let (tx, rx) = broadcast::channel(16);
        (BookingEngine::new(store.clone(), tx), rx)
    }

    fn available(store: &MemoryStore, room: RoomType) -> u32 {
        store.snapshot().unwrap().room(room).unwrap().available
    }

    #[test]
    fn test_initial_state() {
        let store = Arc::new(MemoryStore::new(sample_document()));
        let (engine, _) = create_engine(&store);
        assert_eq!(engine.state(), SessionState::Idle);
    }

    #[test]
    fn test_check_availability_lists_in_document_order() {
        let store = Arc::new(MemoryStore::new(sample_document()));
        let (mut engine, _) = create_engine(&store);

        let reply = engine.handle(Intent::CheckAvailability);
        assert_eq!(
            reply.lines,
            vec!["We have the following rooms available: single, double."]
        );
        assert_eq!(engine.state(), SessionState::Idle);
    }

    #[test]
    fn test_check_availability_with_empty_rooms() {
        let mut doc = sample_document();
        doc.rooms = Default::default();
        let store = Arc::new(MemoryStore::new(doc));
        let (mut engine, _) = create_engine(&store);

        assert_eq!(engine.handle(Intent::CheckAvailability).lines, vec![NO_ROOMS]);
    }

    #[test]
    fn test_room_detail() {
        let store = Arc::new(MemoryStore::new(sample_document()));
        let (mut engine, _) = create_engine(&store);

        let reply = engine.handle(Intent::RoomDetail(RoomType::Double));
        assert_eq!(
            reply.lines,
            vec![
                "The double room is available for 135.00 dollars per night after a discount of 10%. \
                 It includes amenities like WiFi, TV, Mini-bar."
            ]
        );
    }

    #[test]
    fn test_room_detail_missing_room() {
        let mut doc = sample_document();
        doc.rooms = Default::default();
        let store = Arc::new(MemoryStore::new(doc));
        let (mut engine, _) = create_engine(&store);

        assert_eq!(
            engine.handle(Intent::RoomDetail(RoomType::Suite)).lines,
            vec![ROOM_NOT_FOUND]
        );
    }

    #[test]
    fn test_reads_never_mutate() {
        let store = Arc::new(MemoryStore::new(sample_document()));
        let (mut engine, _) = create_engine(&store);

        let first = engine.handle(Intent::RoomDetail(RoomType::Single));
        for _ in 0..3 {
            assert_eq!(engine.handle(Intent::RoomDetail(RoomType::Single)), first);
            engine.handle(Intent::CheckAvailability);
        }
        assert_eq!(store.save_count(), 0);
        assert_eq!(store.snapshot(), Some(sample_document()));
    }

    #[test]
    fn test_each_operation_reloads() {
        let store = Arc::new(MemoryStore::new(sample_document()));
        let (mut engine, _) = create_engine(&store);

        engine.handle(Intent::CheckAvailability);
        engine.handle(Intent::FaqQuery(FaqTopic::Parking));
        assert_eq!(store.load_count(), 2);
    }

    #[test]
    fn test_booking_ends_session() {
        let store = Arc::new(MemoryStore::new(sample_document()));
        let (mut engine, mut rx) = create_engine(&store);

        let reply = engine.handle(Intent::BookRoom(RoomType::Single));
        assert_eq!(reply.lines, vec!["Successfully booked a single room at Grand Plaza."]);
        assert_eq!(engine.state(), SessionState::Ended(SessionOutcome::Booked));
        assert_eq!(available(&store, RoomType::Single), 0);

        match rx.try_recv().unwrap() {
            ConversationEvent::RoomBooked { room, remaining } => {
                assert_eq!(room, RoomType::Single);
                assert_eq!(remaining, 0);
            }
            other => panic!("unexpected event {other:?}"),
        }
    }

    #[test]
    fn test_second_booking_of_last_unit_is_refused() {
        let store = Arc::new(MemoryStore::new(sample_document()));

        let (mut first, _) = create_engine(&store);
        first.handle(Intent::BookRoom(RoomType::Single));

        let (mut second, _) = create_engine(&store);
        let reply = second.handle(Intent::BookRoom(RoomType::Single));
        assert_eq!(reply.lines, vec!["Sorry, no single rooms are available."]);
        assert_eq!(second.state(), SessionState::Idle);
        assert_eq!(available(&store, RoomType::Single), 0);
        assert_eq!(store.save_count(), 1);
    }

    #[test]
    fn test_save_failure_keeps_session_open() {
        let store = Arc::new(MemoryStore::new(sample_document()));
        store.fail_saves(true);
        let (mut engine, mut rx) = create_engine(&store);

        let reply = engine.handle(Intent::BookRoom(RoomType::Double));
        assert_eq!(reply.lines, vec![BOOKING_NOT_SAVED]);
        assert_eq!(engine.state(), SessionState::Idle);
        assert_eq!(available(&store, RoomType::Double), 3);
        assert!(matches!(
            rx.try_recv().unwrap(),
            ConversationEvent::BookingRolledBack {
                room: RoomType::Double
            }
        ));
    }

    #[test]
    fn test_faq_answer_and_fallback() {
        let store = Arc::new(MemoryStore::new(sample_document()));
        let (mut engine, _) = create_engine(&store);

        assert_eq!(
            engine.handle(Intent::FaqQuery(FaqTopic::Parking)).lines,
            vec!["Free parking is available."]
        );
        assert_eq!(
            engine.handle(Intent::FaqQuery(FaqTopic::Pets)).lines,
            vec!["I don't have information on pets."]
        );
    }

    #[test]
    fn test_missing_store_speaks_diagnostic_then_fails_closed() {
        let store = Arc::new(MemoryStore::missing());
        let (mut engine, _) = create_engine(&store);

        let reply = engine.handle(Intent::RoomDetail(RoomType::Suite));
        assert_eq!(
            reply.lines,
            vec![
                "Hotel data file not found. Please ensure the file exists.",
                ROOM_NOT_FOUND
            ]
        );
    }

    #[test]
    fn test_end_conversation() {
        let store = Arc::new(MemoryStore::new(sample_document()));
        let (mut engine, _) = create_engine(&store);

        assert_eq!(engine.handle(Intent::EndConversation).lines, vec![FAREWELL]);
        assert_eq!(engine.state(), SessionState::Ended(SessionOutcome::Farewell));

        // terminal: nothing else runs
        assert_eq!(engine.handle(Intent::BookRoom(RoomType::Double)).lines, vec![SESSION_OVER]);
        assert_eq!(store.save_count(), 0);
    }

    #[test]
    fn test_ambiguous_and_unknown_stay_idle() {
        let store = Arc::new(MemoryStore::new(sample_document()));
        let (mut engine, _) = create_engine(&store);

        assert_eq!(engine.handle(Intent::BookRoomAmbiguous).lines, vec![AMBIGUOUS_ROOM]);
        assert_eq!(engine.handle(Intent::Unknown).lines, vec![NOT_UNDERSTOOD]);
        assert_eq!(engine.state(), SessionState::Idle);
    }

    #[test]
    fn test_greeting_fallback() {
        let mut doc = sample_document();
        doc.greetings.clear();
        let store = Arc::new(MemoryStore::new(doc));
        let (engine, _) = create_engine(&store);

        assert_eq!(engine.greeting("Hello!").lines, vec!["Hello!"]);
    }

    #[test]
    fn test_greeting_from_document() {
        let store = Arc::new(MemoryStore::new(sample_document()));
        let (engine, _) = create_engine(&store);

        assert_eq!(
            engine.greeting("Hello!").lines,
            vec!["Welcome to the Grand Plaza!"]
        );
    }
}
