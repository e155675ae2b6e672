//! The resolution pipeline: filter, dedup, enrich.

use std::collections::HashSet;

use joyindex_device_types::{DeviceIdentity, derive_guid};
use tracing::{debug, warn};

use crate::oem::OemRegistry;
use crate::source::DeviceSource;

/// Resolve the currently attached controllers.
///
/// Never fails: a source error degrades to that source contributing nothing.
/// Within one pass, vendor/product pairs are deduplicated first-seen-wins;
/// OEM entries may only rename devices still carrying a placeholder name, or
/// add devices the primary source missed.
pub fn resolve(primary: &dyn DeviceSource, oem: &dyn OemRegistry) -> Vec<DeviceIdentity> {
    let mut devices: Vec<DeviceIdentity> = Vec::new();
    let mut seen: HashSet<String> = HashSet::new();

    let descriptors = match primary.enumerate() {
        Ok(descriptors) => descriptors,
        Err(e) => {
            warn!(source = primary.name(), error = %e, "device source failed, continuing without it");
            Vec::new()
        }
    };

    for descriptor in descriptors {
        let Some(identity) = DeviceIdentity::from_descriptor(&descriptor) else {
            debug!(name = %descriptor.name, "descriptor filtered out");
            continue;
        };
        if !seen.insert(identity.dedup_key()) {
            debug!(key = %identity.dedup_key(), "duplicate vendor/product pair dropped");
            continue;
        }
        devices.push(identity);
    }

    let oem_entries = match oem.entries() {
        Ok(entries) => entries,
        Err(e) => {
            warn!(error = %e, "OEM registry unavailable, skipping enrichment");
            Vec::new()
        }
    };

    for entry in oem_entries {
        let key = entry.dedup_key();
        if let Some(existing) = devices.iter_mut().find(|d| d.dedup_key() == key) {
            if existing.has_placeholder_name() && !entry.name.trim().is_empty() {
                debug!(key = %key, old = %existing.display_name, new = %entry.name,
                    "placeholder name replaced from OEM registry");
                existing.display_name = entry.name.trim().to_string();
            }
        } else if oem.reflects_attached_hardware() && seen.insert(key) {
            let instance_id = format!(
                "OEM\\VID_{}&PID_{}",
                entry.vendor_id.to_ascii_uppercase(),
                entry.product_id.to_ascii_uppercase()
            );
            let guid = derive_guid(Some(&entry.vendor_id), Some(&entry.product_id), &instance_id);
            devices.push(DeviceIdentity {
                instance_id,
                guid,
                display_name: entry.name.trim().to_string(),
                vendor_id: entry.vendor_id.to_ascii_lowercase(),
                product_id: entry.product_id.to_ascii_lowercase(),
            });
        }
    }

    debug!(count = devices.len(), "resolution complete");
    devices
}
