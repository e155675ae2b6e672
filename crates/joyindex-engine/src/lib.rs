//! Reconciliation engine: matches persisted mappings against connected
//! hardware and the external application's device list, computes the index
//! remapping, and applies it across both external files.

#![deny(static_mut_refs)]

pub mod error;
pub mod init;
pub mod matcher;
pub mod reconcile;

pub use error::{EngineError, MappingIssue};
pub use init::{InitOutcome, build_mappings};
pub use matcher::{MatchCandidate, MatchTarget, MatchTier, best_match, equivalent, normalize_name};
pub use reconcile::{ReconcileOutcome, ReconcileReport, reconcile, verify_mappings};
