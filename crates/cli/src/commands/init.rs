//! `joyctl init <folder>`: pair connected controllers with the external
//! application's device list and persist the result as the mapping store.

use std::fs;
use std::path::Path;

use anyhow::{Context, Result};
use joyindex_config::{MappingDocument, MappingStore, parse_device_list};
use joyindex_engine::build_mappings;
use tracing::info;

use crate::commands::connected_devices;
use crate::error::CliError;
use crate::output;

pub fn execute(
    store_path: &Path,
    folder: &Path,
    devices_file: &str,
    bindings_file: &str,
    json: bool,
) -> Result<()> {
    if !folder.is_dir() {
        return Err(CliError::FolderNotFound(folder.to_path_buf()).into());
    }
    // Canonicalize so the store carries absolute paths that survive a cwd
    // change between init and update.
    let folder = folder
        .canonicalize()
        .with_context(|| format!("cannot resolve folder {}", folder.display()))?;

    let devices_path = folder.join(devices_file);
    if !devices_path.is_file() {
        return Err(CliError::DeviceListNotFound(devices_path).into());
    }
    let bindings_path = folder.join(bindings_file);
    if !bindings_path.is_file() {
        return Err(CliError::BindingsFileNotFound(bindings_path).into());
    }

    let device_list_text = fs::read_to_string(&devices_path)
        .with_context(|| format!("cannot read {}", devices_path.display()))?;
    let records = parse_device_list(&device_list_text);
    let devices = connected_devices();
    info!(
        connected = devices.len(),
        external = records.len(),
        "pairing connected controllers with external records"
    );

    let outcome = build_mappings(&devices, &records);

    let document = MappingDocument {
        devices_file_path: devices_path,
        bindings_file_path: bindings_path,
        mappings: outcome.mappings.clone(),
    };
    let store = MappingStore::new(store_path);
    store
        .save(&document)
        .with_context(|| format!("cannot save mapping store {}", store_path.display()))?;

    output::print_init(&outcome, store_path, json);
    Ok(())
}
