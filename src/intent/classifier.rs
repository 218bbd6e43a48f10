//! Keyword-presence intent classification
//!
//! Rules are evaluated top to bottom and the first match wins. Priority is
//! fixed by table position, never by match length, so room and booking rules
//! shadow the exit rule.

use tracing::debug;

use super::types::{FaqTopic, Intent, RoomType};

/// One entry of the classification table
struct Rule {
    name: &'static str,
    matches: fn(&str) -> Option<Intent>,
}

const RULES: &[Rule] = &[
    Rule {
        name: "availability",
        matches: match_availability,
    },
    Rule {
        name: "room_detail",
        matches: match_room_detail,
    },
    Rule {
        name: "booking",
        matches: match_booking,
    },
    Rule {
        name: "faq",
        matches: match_faq,
    },
    Rule {
        name: "exit",
        matches: match_exit,
    },
];

const FAQ_KEYWORDS: &[(&str, FaqTopic)] = &[
    ("check-in", FaqTopic::CheckInOut),
    ("check out", FaqTopic::CheckInOut),
    ("parking", FaqTopic::Parking),
    ("pets", FaqTopic::Pets),
];

const EXIT_KEYWORDS: &[&str] = &["stop", "exit", "quit", "goodbye"];

/// Classify a normalized utterance
pub fn classify(text: &str) -> Intent {
    for rule in RULES {
        if let Some(intent) = (rule.matches)(text) {
            debug!(rule = rule.name, %intent, "utterance classified");
            return intent;
        }
    }
    Intent::Unknown
}

/// First room type mentioned, in `RoomType::ALL` order
fn room_keyword(text: &str) -> Option<RoomType> {
    RoomType::ALL
        .into_iter()
        .find(|room| text.contains(room.as_str()))
}

fn match_availability(text: &str) -> Option<Intent> {
    (text.contains("available") && text.contains("room")).then_some(Intent::CheckAvailability)
}

fn match_room_detail(text: &str) -> Option<Intent> {
    if text.contains("book") {
        return None;
    }
    room_keyword(text).map(Intent::RoomDetail)
}

fn match_booking(text: &str) -> Option<Intent> {
    if !text.contains("book") {
        return None;
    }
    Some(room_keyword(text).map_or(Intent::BookRoomAmbiguous, Intent::BookRoom))
}

fn match_faq(text: &str) -> Option<Intent> {
    FAQ_KEYWORDS
        .iter()
        .find(|(keyword, _)| text.contains(keyword))
        .map(|(_, topic)| Intent::FaqQuery(*topic))
}

fn match_exit(text: &str) -> Option<Intent> {
    EXIT_KEYWORDS
        .iter()
        .any(|keyword| text.contains(keyword))
        .then_some(Intent::EndConversation)
}
