//! Test doubles for the store and the speech collaborators

use std::collections::{HashMap, VecDeque};
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use rust_decimal::Decimal;

use crate::store::document::{RoomRecord, RoomTable};
use crate::store::{DataStore, InventoryDocument, StoreError};
use crate::voice::{Narrator, Transcriber, TranscriptionError};

/// Three room types, one single left, no pets answer
pub fn sample_document() -> InventoryDocument {
    let mut rooms = RoomTable::default();
    rooms.insert(
        "single",
        RoomRecord {
            price_per_night: Decimal::new(100, 0),
            discount_percent: Decimal::ZERO,
            amenities: vec!["WiFi".into(), "TV".into()],
            available: 1,
        },
    );
    rooms.insert(
        "double",
        RoomRecord {
            price_per_night: Decimal::new(150, 0),
            discount_percent: Decimal::new(10, 0),
            amenities: vec!["WiFi".into(), "TV".into(), "Mini-bar".into()],
            available: 3,
        },
    );
    rooms.insert(
        "suite",
        RoomRecord {
            price_per_night: Decimal::new(300, 0),
            discount_percent: Decimal::new(20, 0),
            amenities: vec!["WiFi".into(), "Jacuzzi".into()],
            available: 0,
        },
    );

    let faqs = HashMap::from([
        (
            "check_in_out".to_string(),
            "Check-in is at 2 PM and check-out is at 11 AM.".to_string(),
        ),
        ("parking".to_string(), "Free parking is available.".to_string()),
    ]);

    InventoryDocument {
        hotel_name: "Grand Plaza".into(),
        greetings: vec!["Welcome to the Grand Plaza!".into()],
        rooms,
        faqs,
    }
}

/// In-memory store with switchable save failures
#[derive(Default)]
pub struct MemoryStore {
    document: Mutex<Option<InventoryDocument>>,
    fail_saves: AtomicBool,
    loads: AtomicUsize,
    saves: AtomicUsize,
}

impl MemoryStore {
    pub fn new(document: InventoryDocument) -> Self {
        Self {
            document: Mutex::new(Some(document)),
            ..Self::default()
        }
    }

    /// A store whose document does not exist
    pub fn missing() -> Self {
        Self::default()
    }

    pub fn fail_saves(&self, fail: bool) {
        self.fail_saves.store(fail, Ordering::SeqCst);
    }

    pub fn snapshot(&self) -> Option<InventoryDocument> {
        self.document.lock().unwrap().clone()
    }

    pub fn load_count(&self) -> usize {
        self.loads.load(Ordering::SeqCst)
    }

    pub fn save_count(&self) -> usize {
        self.saves.load(Ordering::SeqCst)
    }
}

impl DataStore for MemoryStore {
    fn load(&self) -> Result<InventoryDocument, StoreError> {
        self.loads.fetch_add(1, Ordering::SeqCst);
        self.document
            .lock()
            .unwrap()
            .clone()
            .ok_or_else(|| StoreError::NotFound("memory".into()))
    }

    fn save(&self, document: &InventoryDocument) -> Result<(), StoreError> {
        if self.fail_saves.load(Ordering::SeqCst) {
            return Err(StoreError::Io(std::io::Error::new(
                std::io::ErrorKind::PermissionDenied,
                "read-only store",
            )));
        }
        self.saves.fetch_add(1, Ordering::SeqCst);
        *self.document.lock().unwrap() = Some(document.clone());
        Ok(())
    }
}

/// Replays a fixed list of transcription results, then reports input closed
pub struct ScriptedTranscriber {
    script: VecDeque<Result<String, TranscriptionError>>,
}

impl ScriptedTranscriber {
    pub fn new<I, S>(utterances: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            script: utterances.into_iter().map(|u| Ok(u.into())).collect(),
        }
    }

    pub fn from_results(script: Vec<Result<String, TranscriptionError>>) -> Self {
        Self {
            script: script.into(),
        }
    }
}

impl Transcriber for ScriptedTranscriber {
    fn listen(&mut self) -> Result<String, TranscriptionError> {
        self.script
            .pop_front()
            .unwrap_or(Err(TranscriptionError::Closed))
    }
}

/// Keeps everything it was asked to say
#[derive(Clone, Default)]
pub struct RecordingNarrator {
    spoken: Arc<Mutex<Vec<String>>>,
}

impl RecordingNarrator {
    pub fn spoken(&self) -> Vec<String> {
        self.spoken.lock().unwrap().clone()
    }
}

impl Narrator for RecordingNarrator {
    fn speak(&self, text: &str) {
        self.spoken.lock().unwrap().push(text.to_string());
    }
}
