//! Engine error types.

use joyindex_config::ConfigError;
use thiserror::Error;

/// One hard verification problem. All issues found in a run are collected
/// and reported together so the user can fix every connectivity problem in
/// one pass.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum MappingIssue {
    #[error("device not found: \"{name}\" ({stable_key}) is not connected")]
    DeviceNotFound { name: String, stable_key: String },

    #[error("duplicate mapping: connected device ({stable_key}) is claimed by {claim_count} mappings")]
    DuplicateMapping {
        stable_key: String,
        claim_count: usize,
    },
}

#[derive(Error, Debug)]
pub enum EngineError {
    /// Verification failed; no file was touched. Carries every issue found.
    #[error("{} mapping issue(s) prevent reconciliation", .0.len())]
    Verification(Vec<MappingIssue>),

    #[error(transparent)]
    Config(#[from] ConfigError),
}
