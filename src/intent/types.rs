//! Intent vocabulary shared by the classifier and the booking engine

use serde::{Deserialize, Serialize};

/// Bookable room categories
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RoomType {
    Single,
    Double,
    Suite,
}

impl RoomType {
    /// All room types, in keyword-matching priority order
    pub const ALL: [RoomType; 3] = [RoomType::Single, RoomType::Double, RoomType::Suite];

    /// Key used in the inventory document and in spoken replies
    pub fn as_str(&self) -> &'static str {
        match self {
            RoomType::Single => "single",
            RoomType::Double => "double",
            RoomType::Suite => "suite",
        }
    }
}

impl std::fmt::Display for RoomType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Policy topics the front desk can answer
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FaqTopic {
    CheckInOut,
    Parking,
    Pets,
}

impl FaqTopic {
    /// Key under `faqs` in the inventory document
    pub fn key(&self) -> &'static str {
        match self {
            FaqTopic::CheckInOut => "check_in_out",
            FaqTopic::Parking => "parking",
            FaqTopic::Pets => "pets",
        }
    }

    /// Reply used when the document has no answer for this topic
    pub fn fallback(&self) -> &'static str {
        match self {
            FaqTopic::CheckInOut => "I don't have information on check-in and check-out times.",
            FaqTopic::Parking => "I don't have information on parking.",
            FaqTopic::Pets => "I don't have information on pets.",
        }
    }
}

impl std::fmt::Display for FaqTopic {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.key())
    }
}

/// The classified purpose of one utterance
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", content = "value", rename_all = "snake_case")]
pub enum Intent {
    /// Which room types have units left
    CheckAvailability,
    /// Price, discount and amenities of one room type
    RoomDetail(RoomType),
    /// Reserve one unit of a room type
    BookRoom(RoomType),
    /// "book" without a recognizable room type
    BookRoomAmbiguous,
    /// Hotel policy question
    FaqQuery(FaqTopic),
    /// Guest is done
    EndConversation,
    Unknown,
}

impl std::fmt::Display for Intent {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Intent::CheckAvailability => write!(f, "CHECK_AVAILABILITY"),
            Intent::RoomDetail(room) => write!(f, "ROOM_DETAIL ({})", room),
            Intent::BookRoom(room) => write!(f, "BOOK_ROOM ({})", room),
            Intent::BookRoomAmbiguous => write!(f, "BOOK_ROOM_AMBIGUOUS"),
            Intent::FaqQuery(topic) => write!(f, "FAQ_QUERY ({})", topic),
            Intent::EndConversation => write!(f, "END_CONVERSATION"),
            Intent::Unknown => write!(f, "UNKNOWN"),
        }
    }
}
