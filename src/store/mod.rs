//! Inventory persistence
//!
//! The document is reloaded for every operation and written back only when a
//! booking mutates it. A missing or corrupt document never escapes this
//! module: callers get an empty document plus a diagnostic to speak. Other
//! I/O failures surface once, from [`preflight`] at startup.

pub(crate) mod document;
mod json_file;

use std::path::PathBuf;

use tracing::warn;

pub use document::{InventoryDocument, ReserveError};
pub use json_file::JsonFileStore;

/// Errors raised by a data store
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("inventory file not found: {0}")]
    NotFound(PathBuf),

    #[error("inventory file is corrupted: {0}")]
    Corrupt(String),

    #[error("failed to serialize inventory: {0}")]
    Serialize(String),

    #[error("inventory I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl StoreError {
    /// What to tell the guest when loading failed
    pub fn diagnostic(&self) -> &'static str {
        match self {
            StoreError::NotFound(_) => "Hotel data file not found. Please ensure the file exists.",
            StoreError::Corrupt(_) => "Hotel data file is corrupted. Please fix the file.",
            StoreError::Serialize(_) | StoreError::Io(_) => {
                "I'm having trouble reading the hotel data right now."
            }
        }
    }
}

/// Durable home of the inventory document
pub trait DataStore: Send + Sync {
    fn load(&self) -> Result<InventoryDocument, StoreError>;

    fn save(&self, document: &InventoryDocument) -> Result<(), StoreError>;
}

/// Startup check that the store is readable.
///
/// Missing and corrupt documents are recoverable and pass; any other I/O
/// failure is returned so the process can exit.
pub fn preflight(store: &dyn DataStore) -> Result<(), StoreError> {
    match store.load() {
        Err(e @ StoreError::Io(_)) => Err(e),
        _ => Ok(()),
    }
}

/// A freshly loaded document
#[derive(Debug)]
pub struct Loaded {
    pub document: InventoryDocument,
    /// Set when loading failed and an empty document was substituted
    pub diagnostic: Option<&'static str>,
}

/// Load the document, substituting an empty one on failure
pub fn load_or_default(store: &dyn DataStore) -> Loaded {
    match store.load() {
        Ok(document) => Loaded {
            document,
            diagnostic: None,
        },
        Err(e) => {
            warn!(error = %e, "inventory unavailable, using an empty document");
            Loaded {
                document: InventoryDocument::default(),
                diagnostic: Some(e.diagnostic()),
            }
        }
    }
}
