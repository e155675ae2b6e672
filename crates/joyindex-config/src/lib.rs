//! External configuration plumbing for JoyIndex.
//!
//! Covers the two text formats owned by the external application (the device
//! list and the free-text bindings file), the backup-then-write mutation
//! discipline every rewrite goes through, and the JSON store holding the
//! user's confirmed device mappings.

#![deny(static_mut_refs)]

pub mod backup;
pub mod bindings;
pub mod devices;
pub mod store;

use std::path::PathBuf;

use thiserror::Error;

pub use backup::{BackupOutcome, create_backup, write_with_backup};
pub use bindings::{BindingsRewrite, apply_remapping, rewrite_bindings_file};
pub use devices::{ExternalDeviceRecord, parse_device_list, serialize_device_list};
pub use store::{MappingDocument, MappingStore, PersistedMapping};

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("file not found: {0}")]
    FileNotFound(PathBuf),

    #[error("cannot back up missing file: {0}")]
    BackupSourceMissing(PathBuf),

    #[error("backup failed for {path}: {source}")]
    BackupFailed {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("duplicate expected index {0} in mapping store")]
    DuplicateExpectedIndex(u32),

    #[error("malformed mapping store: {0}")]
    MalformedStore(#[from] serde_json::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// The pair of external files a reconciliation run may rewrite.
///
/// Passed explicitly into the engine and codec so tests can point at
/// temporary files; nothing below the CLI hardcodes a file name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReindexFiles {
    pub devices_file: PathBuf,
    pub bindings_file: PathBuf,
}

impl ReindexFiles {
    pub fn new(devices_file: impl Into<PathBuf>, bindings_file: impl Into<PathBuf>) -> Self {
        Self {
            devices_file: devices_file.into(),
            bindings_file: bindings_file.into(),
        }
    }
}
