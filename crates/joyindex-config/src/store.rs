//! Persisted mapping store.
//!
//! A JSON document recording the user's confirmed bindings from `init`: one
//! record per device plus the absolute paths of the two external files.
//! Loaded at the start of every reconciliation run, immutable during a run.

use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::ConfigError;

/// A user's confirmed binding for one device, from a prior `init`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PersistedMapping {
    /// The stable key (`VIDPID:<VID>:<PID>:<Name>`).
    pub unique_identifier: String,
    pub name: String,
    /// The index the external application must use for this device.
    pub expected_index: u32,
    /// The external application's own GUID at init time. Advisory only.
    pub guid: String,
}

/// The whole store document.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MappingDocument {
    pub devices_file_path: PathBuf,
    pub bindings_file_path: PathBuf,
    pub mappings: Vec<PersistedMapping>,
}

impl MappingDocument {
    /// Reject documents whose expected indices collide. Applying such a
    /// document would emit a device list with duplicate slots.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let mut seen = std::collections::HashSet::new();
        for mapping in &self.mappings {
            if !seen.insert(mapping.expected_index) {
                return Err(ConfigError::DuplicateExpectedIndex(mapping.expected_index));
            }
        }
        Ok(())
    }
}

/// Load/exists/save access to the mapping store file.
#[derive(Debug, Clone)]
pub struct MappingStore {
    path: PathBuf,
}

impl MappingStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn exists(&self) -> bool {
        self.path.exists()
    }

    pub fn load(&self) -> Result<MappingDocument, ConfigError> {
        if !self.path.exists() {
            return Err(ConfigError::FileNotFound(self.path.clone()));
        }
        let content = fs::read_to_string(&self.path)?;
        let document: MappingDocument = serde_json::from_str(&content)?;
        document.validate()?;
        debug!(path = %self.path.display(), mappings = document.mappings.len(), "store loaded");
        Ok(document)
    }

    pub fn save(&self, document: &MappingDocument) -> Result<(), ConfigError> {
        document.validate()?;
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)?;
        }
        let content = serde_json::to_string_pretty(document)?;
        fs::write(&self.path, content)?;
        info!(path = %self.path.display(), mappings = document.mappings.len(), "store saved");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn sample_document() -> MappingDocument {
        MappingDocument {
            devices_file_path: PathBuf::from("/game/data/input/devices.txt"),
            bindings_file_path: PathBuf::from("/game/data/input/current.map"),
            mappings: vec![
                PersistedMapping {
                    unique_identifier: "VIDPID:044F:B10A:ThrustmasterT.16000M".to_string(),
                    name: "Thrustmaster T.16000M".to_string(),
                    expected_index: 0,
                    guid: "b10a044f-1111-2222-0000000000000000".to_string(),
                },
                PersistedMapping {
                    unique_identifier: "VIDPID:044F:B687:TWCSThrottle".to_string(),
                    name: "TWCS Throttle".to_string(),
                    expected_index: 1,
                    guid: "b687044f-3333-4444-0000000000000000".to_string(),
                },
            ],
        }
    }

    #[test]
    fn round_trips_through_disk() {
        let dir = TempDir::new().expect("temp dir");
        let store = MappingStore::new(dir.path().join("mappings.json"));
        assert!(!store.exists());

        let document = sample_document();
        store.save(&document).expect("save");
        assert!(store.exists());

        let loaded = store.load().expect("load");
        assert_eq!(loaded, document);
    }

    #[test]
    fn store_uses_camel_case_field_names() {
        let json = serde_json::to_string(&sample_document()).expect("serialize");
        assert!(json.contains("uniqueIdentifier"));
        assert!(json.contains("expectedIndex"));
        assert!(json.contains("devicesFilePath"));
        assert!(json.contains("bindingsFilePath"));
    }

    #[test]
    fn duplicate_expected_index_is_rejected_on_load() {
        let dir = TempDir::new().expect("temp dir");
        let path = dir.path().join("mappings.json");
        let mut document = sample_document();
        document.mappings[1].expected_index = 0;
        fs::write(&path, serde_json::to_string(&document).expect("serialize")).expect("write");

        let err = MappingStore::new(&path).load().expect_err("should fail");
        assert!(matches!(err, ConfigError::DuplicateExpectedIndex(0)));
    }

    #[test]
    fn duplicate_expected_index_is_rejected_on_save() {
        let dir = TempDir::new().expect("temp dir");
        let store = MappingStore::new(dir.path().join("mappings.json"));
        let mut document = sample_document();
        document.mappings[0].expected_index = 1;

        let err = store.save(&document).expect_err("should fail");
        assert!(matches!(err, ConfigError::DuplicateExpectedIndex(1)));
        assert!(!store.exists());
    }

    #[test]
    fn loading_missing_store_is_a_file_not_found() {
        let dir = TempDir::new().expect("temp dir");
        let err = MappingStore::new(dir.path().join("absent.json"))
            .load()
            .expect_err("should fail");
        assert!(matches!(err, ConfigError::FileNotFound(_)));
    }
}
