//! Backup-then-write scoped mutation.
//!
//! Every rewrite of an external file goes through [`write_with_backup`]: the
//! pre-write content is copied to a timestamped sibling before the new
//! content lands. A failed backup aborts the write, so a crash or error can
//! lose at most the newest content, never the prior state.

use std::fs;
use std::path::{Path, PathBuf};

use chrono::Local;
use tracing::{debug, info};

use crate::ConfigError;

/// Result of a backup attempt.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BackupOutcome {
    Created(PathBuf),
    /// A backup with the same timestamp already exists (same-second repeat);
    /// the prior state is already preserved, so no copy is needed.
    AlreadyCurrent(PathBuf),
}

impl BackupOutcome {
    pub fn path(&self) -> &Path {
        match self {
            Self::Created(p) | Self::AlreadyCurrent(p) => p,
        }
    }
}

fn backup_path_for(path: &Path) -> PathBuf {
    let timestamp = Local::now().format("%Y%m%d_%H%M%S");
    PathBuf::from(format!("{}.backup_{}", path.display(), timestamp))
}

/// Copy `path` to a timestamped sibling.
///
/// Fails loudly when the source does not exist. A same-second repeat finds
/// the sibling already present and treats it as current rather than
/// overwriting it.
pub fn create_backup(path: &Path) -> Result<BackupOutcome, ConfigError> {
    if !path.exists() {
        return Err(ConfigError::BackupSourceMissing(path.to_path_buf()));
    }

    let backup_path = backup_path_for(path);
    if backup_path.exists() {
        debug!(backup = %backup_path.display(), "backup for this second already exists");
        return Ok(BackupOutcome::AlreadyCurrent(backup_path));
    }

    fs::copy(path, &backup_path).map_err(|source| ConfigError::BackupFailed {
        path: path.to_path_buf(),
        source,
    })?;
    info!(source = %path.display(), backup = %backup_path.display(), "backup created");
    Ok(BackupOutcome::Created(backup_path))
}

/// The scoped mutation: back up, then write. No caller gets to write one of
/// the external files without the backup precondition.
pub fn write_with_backup(path: &Path, content: &str) -> Result<BackupOutcome, ConfigError> {
    let outcome = create_backup(path)?;
    fs::write(path, content)?;
    Ok(outcome)
}
