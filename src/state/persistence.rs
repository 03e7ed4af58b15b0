use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::document::Document;
use crate::element::MapElement;
use crate::path::StoryPath;
use crate::util::time;

#[derive(Debug, Error)]
pub enum PersistenceError {
    #[error("Failed to serialize map: {0}")]
    SerializationError(#[from] serde_json::Error),

    #[error("Failed to write map: {0}")]
    WriteError(#[from] std::io::Error),

    #[error("Failed to read map file: {0}")]
    ReadError(String),
}

pub type PersistenceResult<T> = Result<T, PersistenceError>;

/// The serialized form of a map, handed to the host on save.
///
/// ```json
/// {"elements": [...], "paths": [...], "timestamp": 1700000000, "version": "0.1.0"}
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MapSnapshot {
    pub elements: Vec<MapElement>,
    pub paths: Vec<StoryPath>,
    /// Seconds since the UNIX epoch
    #[serde(default)]
    pub timestamp: u64,
    #[serde(default)]
    pub version: String,
}

impl Default for MapSnapshot {
    fn default() -> Self {
        Self::new(&Document::new())
    }
}

impl MapSnapshot {
    pub fn new(document: &Document) -> Self {
        Self {
            elements: document.elements().as_slice().to_vec(),
            paths: document.paths().as_slice().to_vec(),
            timestamp: time::timestamp_secs(),
            version: env!("CARGO_PKG_VERSION").to_string(),
        }
    }

    /// Rebuilds the document, dropping records that would break its invariants.
    pub fn into_document(self) -> Document {
        if !self.version.is_empty() && self.version != env!("CARGO_PKG_VERSION") {
            log::warn!(
                "Snapshot version {} differs from current version {}",
                self.version,
                env!("CARGO_PKG_VERSION")
            );
        }
        Document::from_parts(self.elements, self.paths)
    }

    pub fn to_json(&self) -> PersistenceResult<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    pub fn from_json(json: &str) -> PersistenceResult<Self> {
        Ok(serde_json::from_str(json)?)
    }
}

/// Receives snapshots when the user saves. The editor has no storage of its own.
pub trait SaveHandler {
    fn save(&mut self, snapshot: MapSnapshot);
}

impl<F: FnMut(MapSnapshot)> SaveHandler for F {
    fn save(&mut self, snapshot: MapSnapshot) {
        self(snapshot)
    }
}

/// Stores a single map as pretty-printed JSON on disk.
#[cfg(not(target_arch = "wasm32"))]
#[derive(Debug, Clone)]
pub struct JsonFileStore {
    path: std::path::PathBuf,
}

#[cfg(not(target_arch = "wasm32"))]
impl JsonFileStore {
    pub fn new(path: impl Into<std::path::PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &std::path::Path {
        &self.path
    }

    pub fn exists(&self) -> bool {
        self.path.is_file()
    }

    pub fn save_snapshot(&self, snapshot: &MapSnapshot) -> PersistenceResult<()> {
        if let Some(dir) = self.path.parent().filter(|dir| !dir.as_os_str().is_empty()) {
            std::fs::create_dir_all(dir)?;
        }
        std::fs::write(&self.path, snapshot.to_json()?)?;
        Ok(())
    }

    pub fn load(&self) -> PersistenceResult<MapSnapshot> {
        let json = std::fs::read_to_string(&self.path)
            .map_err(|e| PersistenceError::ReadError(format!("{}: {}", self.path.display(), e)))?;
        MapSnapshot::from_json(&json)
    }
}

#[cfg(not(target_arch = "wasm32"))]
impl SaveHandler for JsonFileStore {
    fn save(&mut self, snapshot: MapSnapshot) {
        match self.save_snapshot(&snapshot) {
            Ok(()) => log::info!(
                "Saved {} element(s) and {} path(s) to {}",
                snapshot.elements.len(),
                snapshot.paths.len(),
                self.path.display()
            ),
            Err(err) => log::error!("Saving to {} failed: {}", self.path.display(), err),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_timestamp_and_version_default() {
        let snapshot = MapSnapshot::from_json(r#"{"elements": [], "paths": []}"#).unwrap();
        assert_eq!(snapshot.timestamp, 0);
        assert!(snapshot.version.is_empty());
        assert_eq!(snapshot.into_document(), Document::new());
    }

    #[test]
    fn closures_are_save_handlers() {
        let mut saved = Vec::new();
        {
            let mut handler = |snapshot: MapSnapshot| saved.push(snapshot);
            handler.save(MapSnapshot::default());
        }
        assert_eq!(saved.len(), 1);
    }
}
