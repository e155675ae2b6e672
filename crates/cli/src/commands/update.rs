//! `joyctl update` (the default command): reconcile the external
//! application's device indices with the persisted mappings.

use std::path::Path;

use anyhow::{Context, Result};
use joyindex_config::MappingStore;
use joyindex_engine::reconcile;
use tracing::info;

use crate::commands::connected_devices;
use crate::error::CliError;
use crate::output;

pub fn execute(store_path: &Path, json: bool) -> Result<()> {
    let store = MappingStore::new(store_path);
    if !store.exists() {
        return Err(CliError::StoreNotFound(store_path.to_path_buf()).into());
    }
    let document = store
        .load()
        .with_context(|| format!("cannot load mapping store {}", store_path.display()))?;

    let devices = connected_devices();
    info!(
        mappings = document.mappings.len(),
        connected = devices.len(),
        "starting reconciliation"
    );

    let report = reconcile(&document, &devices)?;
    output::print_report(&report, json);
    Ok(())
}
