//! `joyctl view`: show connected controllers and mapping status.

use std::path::Path;

use anyhow::Result;
use joyindex_config::MappingStore;
use joyindex_device_types::DeviceIdentity;

use crate::commands::connected_devices;
use crate::output;

/// Connection status of one persisted mapping.
#[derive(Debug, Clone)]
pub struct MappingStatus {
    pub name: String,
    pub expected_index: u32,
    pub connected: bool,
}

pub fn execute(store_path: &Path, json: bool) -> Result<()> {
    let devices = connected_devices();

    let store = MappingStore::new(store_path);
    let statuses = if store.exists() {
        let document = store.load()?;
        Some(mapping_statuses(&document.mappings, &devices))
    } else {
        None
    };

    output::print_view(&devices, statuses.as_deref(), json);
    Ok(())
}

fn mapping_statuses(
    mappings: &[joyindex_config::PersistedMapping],
    devices: &[DeviceIdentity],
) -> Vec<MappingStatus> {
    mappings
        .iter()
        .map(|mapping| MappingStatus {
            name: mapping.name.clone(),
            expected_index: mapping.expected_index,
            connected: devices
                .iter()
                .any(|d| d.stable_key() == mapping.unique_identifier),
        })
        .collect()
}
