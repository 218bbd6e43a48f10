//! Persisted inventory document
//!
//! Field names and nesting match the on-disk JSON format:
//! `hotel_name`, `greetings`, `rooms` (keyed by room type) and `faqs`
//! (keyed by topic).

use std::collections::HashMap;
use std::fmt;

use rust_decimal::{Decimal, RoundingStrategy};
use serde::de::{MapAccess, Visitor};
use serde::ser::SerializeMap;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::intent::{FaqTopic, RoomType};

/// Root persisted entity
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct InventoryDocument {
    #[serde(default)]
    pub hotel_name: String,

    #[serde(default)]
    pub greetings: Vec<String>,

    #[serde(default)]
    pub rooms: RoomTable,

    #[serde(default)]
    pub faqs: HashMap<String, String>,
}

/// One bookable room category
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RoomRecord {
    #[serde(with = "rust_decimal::serde::float")]
    pub price_per_night: Decimal,

    /// Percentage off the nightly price, 0..=100
    #[serde(rename = "discount", default, with = "rust_decimal::serde::float")]
    pub discount_percent: Decimal,

    #[serde(default)]
    pub amenities: Vec<String>,

    /// Bookable units left
    pub available: u32,
}

impl RoomRecord {
    /// Nightly price after discount, rounded half away from zero to cents
    pub fn final_price(&self) -> Decimal {
        let price = self.price_per_night * (Decimal::ONE_HUNDRED - self.discount_percent)
            / Decimal::ONE_HUNDRED;
        price.round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero)
    }
}

/// Room records in document order
///
/// Serialized as a JSON object. Insertion order is kept so availability is
/// always reported in the order the hotel lists its rooms.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RoomTable(Vec<(String, RoomRecord)>);

impl RoomTable {
    pub fn get(&self, room_type: &str) -> Option<&RoomRecord> {
        self.0
            .iter()
            .find(|(name, _)| name == room_type)
            .map(|(_, record)| record)
    }

    pub fn get_mut(&mut self, room_type: &str) -> Option<&mut RoomRecord> {
        self.0
            .iter_mut()
            .find(|(name, _)| name == room_type)
            .map(|(_, record)| record)
    }

    /// Insert or replace a record, keeping its position on replace
    pub fn insert(&mut self, room_type: impl Into<String>, record: RoomRecord) {
        let room_type = room_type.into();
        match self.0.iter().position(|(name, _)| *name == room_type) {
            Some(index) => self.0[index].1 = record,
            None => self.0.push((room_type, record)),
        }
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &RoomRecord)> {
        self.0.iter().map(|(name, record)| (name.as_str(), record))
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl Serialize for RoomTable {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.0.len()))?;
        for (name, record) in &self.0 {
            map.serialize_entry(name, record)?;
        }
        map.end()
    }
}

impl<'de> Deserialize<'de> for RoomTable {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        struct RoomTableVisitor;

        impl<'de> Visitor<'de> for RoomTableVisitor {
            type Value = RoomTable;

            fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str("a map of room type to room record")
            }

            fn visit_map<A: MapAccess<'de>>(self, mut access: A) -> Result<RoomTable, A::Error> {
                let mut table = RoomTable::default();
                while let Some((name, record)) = access.next_entry::<String, RoomRecord>()? {
                    table.insert(name, record);
                }
                Ok(table)
            }
        }

        deserializer.deserialize_map(RoomTableVisitor)
    }
}

/// Why a unit could not be reserved
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum ReserveError {
    #[error("room type {0} is not in the inventory")]
    UnknownRoom(RoomType),

    #[error("no {0} rooms are available")]
    SoldOut(RoomType),
}

impl InventoryDocument {
    /// Name used in replies, with a neutral stand-in when unset
    pub fn display_name(&self) -> &str {
        if self.hotel_name.trim().is_empty() {
            "our hotel"
        } else {
            &self.hotel_name
        }
    }

    pub fn room(&self, room: RoomType) -> Option<&RoomRecord> {
        self.rooms.get(room.as_str())
    }

    /// Room types with at least one unit left, in document order
    pub fn available_room_types(&self) -> Vec<&str> {
        self.rooms
            .iter()
            .filter(|(_, record)| record.available > 0)
            .map(|(name, _)| name)
            .collect()
    }

    pub fn faq(&self, topic: FaqTopic) -> Option<&str> {
        self.faqs.get(topic.key()).map(String::as_str)
    }

    /// Take one unit of `room`, returning how many remain
    pub fn reserve(&mut self, room: RoomType) -> Result<u32, ReserveError> {
        let record = self
            .rooms
            .get_mut(room.as_str())
            .ok_or(ReserveError::UnknownRoom(room))?;
        record.available = record
            .available
            .checked_sub(1)
            .ok_or(ReserveError::SoldOut(room))?;
        Ok(record.available)
    }

    /// Give back a unit taken by [`reserve`](Self::reserve)
    pub fn release(&mut self, room: RoomType) {
        if let Some(record) = self.rooms.get_mut(room.as_str()) {
            record.available = record.available.saturating_add(1);
        }
    }

    /// Check value ranges serde cannot express
    pub fn validate(&self) -> Result<(), String> {
        for (name, record) in self.rooms.iter() {
            if record.price_per_night < Decimal::ZERO {
                return Err(format!("room {name}: price_per_night must be non-negative"));
            }
            if !(Decimal::ZERO..=Decimal::ONE_HUNDRED).contains(&record.discount_percent) {
                return Err(format!("room {name}: discount must be between 0 and 100"));
            }
        }
        Ok(())
    }
}
