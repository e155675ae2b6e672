//! The init flow: pair connected devices with external records to build a
//! fresh set of persisted mappings.

use std::collections::HashSet;

use joyindex_config::{ExternalDeviceRecord, PersistedMapping};
use joyindex_device_types::DeviceIdentity;
use tracing::{debug, warn};

use crate::matcher::{MatchCandidate, MatchTarget, best_match};

/// Result of pairing connected hardware with the external device list.
#[derive(Debug, Clone)]
pub struct InitOutcome {
    pub mappings: Vec<PersistedMapping>,
    /// Devices that could not be paired with any external record.
    pub warnings: Vec<String>,
}

/// Build persisted mappings for every connected device with a counterpart in
/// the external list.
///
/// The derived GUID is tier-1 input only (it is a best-effort proxy for the
/// external application's GUID); the name tiers carry devices where the proxy
/// misses. Each external record is claimed at most once, first device wins.
pub fn build_mappings(
    connected: &[DeviceIdentity],
    records: &[ExternalDeviceRecord],
) -> InitOutcome {
    let candidates: Vec<MatchCandidate<'_>> = records
        .iter()
        .map(|r| MatchCandidate {
            identifier: Some(r.guid.as_str()),
            name: r.model.as_str(),
        })
        .collect();

    let mut mappings = Vec::new();
    let mut warnings = Vec::new();
    let mut taken: HashSet<usize> = HashSet::new();

    for device in connected {
        let target = MatchTarget {
            identifier: Some(device.guid.as_str()),
            name: device.display_name.as_str(),
        };
        let Some((position, tier)) = best_match(&target, &candidates) else {
            warn!(device = %device.display_name, "no external record to pair with");
            warnings.push(format!(
                "\"{}\" has no counterpart in the external device list; connect it in the \
                 external application first",
                device.display_name
            ));
            continue;
        };
        if !taken.insert(position) {
            warnings.push(format!(
                "\"{}\" matched an external record already paired with another device; skipped",
                device.display_name
            ));
            continue;
        }

        let record = &records[position];
        debug!(device = %device.display_name, index = record.index, ?tier, "paired");
        mappings.push(PersistedMapping {
            unique_identifier: device.stable_key(),
            name: device.display_name.clone(),
            expected_index: record.index,
            guid: record.guid.clone(),
        });
    }

    InitOutcome { mappings, warnings }
}
