//! Snapshot backings for the participant registry
//!
//! A backing only knows how to load and save the whole participant map.
//! The JSON file backing rewrites the file in full on every save; the
//! memory backing keeps nothing.

use std::collections::BTreeMap;
use std::path::PathBuf;

use crate::core::error::AppResult;
use crate::exchange::participant::{ParticipantId, ParticipantRecord};

/// The persisted shape: participant id → record.
pub type Snapshot = BTreeMap<ParticipantId, ParticipantRecord>;

/// Where the registry keeps its participants between mutations.
pub trait ParticipantStore: Send {
    /// Reads the full snapshot, empty when nothing was saved yet.
    fn load(&self) -> AppResult<Snapshot>;

    /// Replaces the stored snapshot with `snapshot`.
    fn save(&mut self, snapshot: &Snapshot) -> AppResult<()>;

    /// Short description for logs.
    fn describe(&self) -> String;
}

/// Pretty-printed UTF-8 JSON object keyed by stringified participant id.
#[derive(Debug, Clone)]
pub struct JsonFileStore {
    path: PathBuf,
}

impl JsonFileStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

impl ParticipantStore for JsonFileStore {
    fn load(&self) -> AppResult<Snapshot> {
        if !self.path.exists() {
            return Ok(Snapshot::new());
        }
        let raw = fs_err::read_to_string(&self.path)?;
        if raw.trim().is_empty() {
            return Ok(Snapshot::new());
        }
        Ok(serde_json::from_str(&raw)?)
    }

    fn save(&mut self, snapshot: &Snapshot) -> AppResult<()> {
        let json = serde_json::to_string_pretty(snapshot)?;
        fs_err::write(&self.path, json)?;
        Ok(())
    }

    fn describe(&self) -> String {
        format!("json file {}", self.path.display())
    }
}

/// Keeps nothing; the registry's own map is the only copy.
#[derive(Debug, Clone, Default)]
pub struct MemoryStore;

impl ParticipantStore for MemoryStore {
    fn load(&self) -> AppResult<Snapshot> {
        Ok(Snapshot::new())
    }

    fn save(&mut self, _snapshot: &Snapshot) -> AppResult<()> {
        Ok(())
    }

    fn describe(&self) -> String {
        "in-memory".to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use tempfile::TempDir;

    fn record(name: &str, phone: &str, wish: &str) -> ParticipantRecord {
        ParticipantRecord {
            name: name.to_string(),
            handle: String::new(),
            phone: phone.to_string(),
            wish: wish.to_string(),
        }
    }

    #[test]
    fn test_missing_file_loads_empty() {
        let dir = TempDir::new().unwrap();
        let store = JsonFileStore::new(dir.path().join("users.json"));
        assert!(store.load().unwrap().is_empty());
    }

    #[test]
    fn test_file_layout_is_keyed_by_string_id() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("users.json");
        let mut store = JsonFileStore::new(&path);

        let mut snapshot = Snapshot::new();
        snapshot.insert(ParticipantId(101), record("Ann", "+71234567", "a nice book"));
        snapshot.insert(ParticipantId(202), record("Бен", "+79990001122", ""));
        store.save(&snapshot).unwrap();

        let raw = std::fs::read_to_string(&path).unwrap();
        assert!(raw.contains("Бен"), "non-ASCII names are written as UTF-8");
        let value: serde_json::Value = serde_json::from_str(&raw).unwrap();
        assert_eq!(
            value,
            serde_json::json!({
                "101": {"name": "Ann", "phone": "+71234567", "wish": "a nice book"},
                "202": {"name": "Бен", "phone": "+79990001122"}
            })
        );

        assert_eq!(store.load().unwrap(), snapshot);
    }

    #[test]
    fn test_reads_file_without_wish_field() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("users.json");
        std::fs::write(&path, r#"{"5": {"name": "Old", "phone": "+7000000000"}}"#).unwrap();

        let loaded = JsonFileStore::new(&path).load().unwrap();
        let old = loaded.get(&ParticipantId(5)).unwrap();
        assert_eq!(old.name, "Old");
        assert!(old.wish.is_empty());
    }

    #[test]
    fn test_corrupt_file_is_an_error() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("users.json");
        std::fs::write(&path, "{not json").unwrap();
        assert!(JsonFileStore::new(&path).load().is_err());
    }
}
