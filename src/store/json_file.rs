//! JSON file backed data store

use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use serde::Serialize;
use tracing::{debug, warn};

use super::document::InventoryDocument;
use super::{DataStore, StoreError};

/// Stores the inventory document as a single pretty-printed JSON file
#[derive(Debug, Clone)]
pub struct JsonFileStore {
    path: PathBuf,
}

impl JsonFileStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Sibling file written before being renamed over the document
    fn staging_path(&self) -> PathBuf {
        let mut name = self
            .path
            .file_name()
            .map(|n| n.to_os_string())
            .unwrap_or_default();
        name.push(".tmp");
        self.path.with_file_name(name)
    }
}

impl DataStore for JsonFileStore {
    fn load(&self) -> Result<InventoryDocument, StoreError> {
        let content = match std::fs::read_to_string(&self.path) {
            Ok(content) => content,
            Err(e) if e.kind() == ErrorKind::NotFound => {
                return Err(StoreError::NotFound(self.path.clone()));
            }
            Err(e) if e.kind() == ErrorKind::InvalidData => {
                return Err(StoreError::Corrupt(e.to_string()));
            }
            Err(e) => return Err(e.into()),
        };

        // The derived deserializer would also accept a JSON array
        let value: serde_json::Value =
            serde_json::from_str(&content).map_err(|e| StoreError::Corrupt(e.to_string()))?;
        if !value.is_object() {
            return Err(StoreError::Corrupt(
                "top level must be a JSON object".to_string(),
            ));
        }
        let document: InventoryDocument =
            serde_json::from_value(value).map_err(|e| StoreError::Corrupt(e.to_string()))?;
        document.validate().map_err(StoreError::Corrupt)?;

        debug!(path = ?self.path, rooms = document.rooms.iter().count(), "inventory loaded");
        Ok(document)
    }

    fn save(&self, document: &InventoryDocument) -> Result<(), StoreError> {
        let mut buf = Vec::new();
        let formatter = serde_json::ser::PrettyFormatter::with_indent(b"    ");
        let mut serializer = serde_json::Serializer::with_formatter(&mut buf, formatter);
        document
            .serialize(&mut serializer)
            .map_err(|e| StoreError::Serialize(e.to_string()))?;

        let staging = self.staging_path();
        std::fs::write(&staging, &buf)?;
        if let Err(e) = std::fs::rename(&staging, &self.path) {
            if let Err(cleanup) = std::fs::remove_file(&staging) {
                warn!(path = ?staging, error = %cleanup, "failed to remove staged inventory");
            }
            return Err(e.into());
        }

        debug!(path = ?self.path, bytes = buf.len(), "inventory saved");
        Ok(())
    }
}
