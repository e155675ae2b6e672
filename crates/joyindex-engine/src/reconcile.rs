//! The reconciliation run: verify, match, compute, apply.
//!
//! A run is strictly ordered: persisted mappings are verified against the
//! connected hardware first (all hard errors collected, no mutation on any
//! failure), then each verified pair is located in the external device list,
//! the index remapping is computed, and only a non-empty remapping triggers
//! the backup-then-rewrite pass over the two external files.

use std::collections::{BTreeMap, HashSet};
use std::fs;
use std::path::PathBuf;

use joyindex_config::bindings::BindingsRewrite;
use joyindex_config::{
    ConfigError, ExternalDeviceRecord, MappingDocument, PersistedMapping, ReindexFiles,
    parse_device_list, rewrite_bindings_file, serialize_device_list, write_with_backup,
};
use joyindex_device_types::DeviceIdentity;
use tracing::{debug, info, warn};

use crate::error::{EngineError, MappingIssue};
use crate::matcher::{MatchCandidate, MatchTarget, MatchTier, best_match};

/// A persisted mapping paired with the connected device it verified against.
#[derive(Debug, Clone, Copy)]
pub struct VerifiedPair<'a> {
    pub mapping: &'a PersistedMapping,
    pub device: &'a DeviceIdentity,
}

/// Verify that every persisted mapping corresponds to exactly one connected
/// device.
///
/// Stable keys are compared by exact equality: both sides were produced from
/// the same vendor/product/name triple, so identifier equality is expected
/// here, never heuristics. All issues are collected before returning.
pub fn verify_mappings<'a>(
    mappings: &'a [PersistedMapping],
    connected: &'a [DeviceIdentity],
) -> Result<Vec<VerifiedPair<'a>>, Vec<MappingIssue>> {
    let mut pairs = Vec::new();
    let mut issues = Vec::new();
    let mut claims: BTreeMap<String, usize> = BTreeMap::new();

    for mapping in mappings {
        let device = connected
            .iter()
            .find(|d| d.stable_key() == mapping.unique_identifier);
        match device {
            Some(device) => {
                *claims.entry(device.stable_key()).or_insert(0) += 1;
                pairs.push(VerifiedPair { mapping, device });
            }
            None => issues.push(MappingIssue::DeviceNotFound {
                name: mapping.name.clone(),
                stable_key: mapping.unique_identifier.clone(),
            }),
        }
    }

    for (stable_key, claim_count) in claims {
        if claim_count > 1 {
            issues.push(MappingIssue::DuplicateMapping {
                stable_key,
                claim_count,
            });
        }
    }

    if issues.is_empty() {
        Ok(pairs)
    } else {
        Err(issues)
    }
}

/// Terminal state of a run that passed verification.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ReconcileOutcome {
    /// Every matched device already sits at its expected index.
    NoOpNeeded,
    /// Both files rewritten (devices list always, bindings only if any line
    /// actually referenced a remapped index).
    Applied {
        devices_backup: PathBuf,
        bindings: BindingsRewrite,
    },
}

/// What a reconciliation run did and found.
#[derive(Debug, Clone)]
pub struct ReconcileReport {
    /// Soft warnings: matched devices absent from the external list.
    pub warnings: Vec<String>,
    /// Old external index -> expected index, only for devices that moved.
    pub remapping: BTreeMap<u32, u32>,
    pub outcome: ReconcileOutcome,
}

/// Run one reconciliation over the files named by the store document.
pub fn reconcile(
    document: &MappingDocument,
    connected: &[DeviceIdentity],
) -> Result<ReconcileReport, EngineError> {
    let files = ReindexFiles::new(&document.devices_file_path, &document.bindings_file_path);
    let pairs = verify_mappings(&document.mappings, connected).map_err(EngineError::Verification)?;
    info!(mappings = pairs.len(), "all persisted mappings verified against connected devices");

    if !files.devices_file.exists() {
        return Err(EngineError::Config(ConfigError::FileNotFound(
            files.devices_file.clone(),
        )));
    }
    // A missing bindings file must surface before the device list is
    // rewritten; the two files move together or not at all.
    if !files.bindings_file.exists() {
        return Err(EngineError::Config(ConfigError::FileNotFound(
            files.bindings_file.clone(),
        )));
    }
    let device_list_text = fs::read_to_string(&files.devices_file).map_err(ConfigError::Io)?;
    let records = parse_device_list(&device_list_text);
    debug!(records = records.len(), "external device list parsed");

    let candidates: Vec<MatchCandidate<'_>> = records
        .iter()
        .map(|r| MatchCandidate {
            identifier: Some(r.guid.as_str()),
            name: r.model.as_str(),
        })
        .collect();

    let mut warnings = Vec::new();
    let mut remapping: BTreeMap<u32, u32> = BTreeMap::new();
    // Record position -> new index, for the rebuild below.
    let mut moved: BTreeMap<usize, u32> = BTreeMap::new();
    let mut taken: HashSet<usize> = HashSet::new();

    for pair in &pairs {
        let target = MatchTarget {
            identifier: Some(pair.mapping.guid.as_str()),
            name: pair.mapping.name.as_str(),
        };
        let Some((position, tier)) = best_match(&target, &candidates) else {
            warn!(device = %pair.mapping.name, "device missing from external list");
            warnings.push(format!(
                "\"{}\" is not in the external device list; it may need re-initialization",
                pair.mapping.name
            ));
            continue;
        };
        if !taken.insert(position) {
            warnings.push(format!(
                "\"{}\" matched an external record already claimed by another mapping; skipped",
                pair.mapping.name
            ));
            continue;
        }

        let record = &records[position];
        if tier != MatchTier::Identifier {
            debug!(device = %pair.mapping.name, ?tier, "external record matched heuristically");
        }
        if record.index != pair.mapping.expected_index {
            remapping.insert(record.index, pair.mapping.expected_index);
            moved.insert(position, pair.mapping.expected_index);
        }
    }

    if remapping.is_empty() {
        info!("all devices already at their expected indices, nothing to do");
        return Ok(ReconcileReport {
            warnings,
            remapping,
            outcome: ReconcileOutcome::NoOpNeeded,
        });
    }

    let rebuilt = rebuild_device_list(&records, &moved);
    let devices_backup =
        write_with_backup(&files.devices_file, &serialize_device_list(&rebuilt))?;
    info!(path = %files.devices_file.display(), moved = moved.len(), "device list rewritten");

    let bindings = rewrite_bindings_file(&files.bindings_file, &remapping)?;

    Ok(ReconcileReport {
        warnings,
        remapping,
        outcome: ReconcileOutcome::Applied {
            devices_backup: devices_backup.path().to_path_buf(),
            bindings,
        },
    })
}

/// Rebuild the external list: remapped records carry their new index;
/// untouched records survive only if their original index was not claimed by
/// a remapped record.
fn rebuild_device_list(
    records: &[ExternalDeviceRecord],
    moved: &BTreeMap<usize, u32>,
) -> Vec<ExternalDeviceRecord> {
    let claimed: HashSet<u32> = moved.values().copied().collect();
    let mut rebuilt = Vec::with_capacity(records.len());

    for (position, record) in records.iter().enumerate() {
        if let Some(new_index) = moved.get(&position) {
            rebuilt.push(ExternalDeviceRecord::new(
                *new_index,
                record.guid.clone(),
                record.model.clone(),
            ));
        }
    }
    for (position, record) in records.iter().enumerate() {
        if !moved.contains_key(&position) && !claimed.contains(&record.index) {
            rebuilt.push(record.clone());
        }
    }

    rebuilt
}
