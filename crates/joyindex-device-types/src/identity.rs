//! Raw device descriptors and resolved device identities.

use std::sync::LazyLock;

use regex::Regex;
use serde::Serialize;

use crate::classify::is_game_controller;
use crate::guid::derive_guid;

// Hardware-id strings carry the vendor/product pair as `VID_044F&PID_B108`
// (Windows) or occasionally with `&` as the separator. First match wins.
static VID_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)VID[_&]([0-9A-F]{4})").unwrap_or_else(|e| panic!("invalid VID pattern: {e}"))
});
static PID_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)PID[_&]([0-9A-F]{4})").unwrap_or_else(|e| panic!("invalid PID pattern: {e}"))
});

/// Extract the `(vendor_id, product_id)` pair from a hardware-id string.
///
/// Returns lowercase 4-hex-digit strings, or `None` when either half is
/// missing — such descriptors are dropped by the resolver.
pub fn extract_vid_pid(hardware_id: &str) -> Option<(String, String)> {
    let vid = VID_PATTERN.captures(hardware_id)?.get(1)?.as_str().to_ascii_lowercase();
    let pid = PID_PATTERN.captures(hardware_id)?.get(1)?.as_str().to_ascii_lowercase();
    Some((vid, pid))
}

/// One device as handed over by an enumeration source, before any filtering.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawDeviceDescriptor {
    /// OS-assigned, volatile across reboots. Never persisted.
    pub instance_id: String,
    /// The string the vendor/product pair is extracted from.
    pub hardware_id: String,
    /// Best-effort display name; may be a generic placeholder.
    pub name: String,
}

impl RawDeviceDescriptor {
    pub fn new(
        instance_id: impl Into<String>,
        hardware_id: impl Into<String>,
        name: impl Into<String>,
    ) -> Self {
        Self {
            instance_id: instance_id.into(),
            hardware_id: hardware_id.into(),
            name: name.into(),
        }
    }
}

/// One physical controller as seen by the OS this run.
///
/// Created fresh each enumeration pass; never persisted directly. The
/// cross-run identity is [`DeviceIdentity::stable_key`], not `instance_id`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DeviceIdentity {
    pub instance_id: String,
    /// Synthetic GUID mimicking the external application's format. Best-effort
    /// proxy only; the external application derives its GUID independently.
    pub guid: String,
    pub display_name: String,
    /// 4 lowercase hex digits.
    pub vendor_id: String,
    /// 4 lowercase hex digits.
    pub product_id: String,
}

impl DeviceIdentity {
    /// Build an identity from a raw descriptor.
    ///
    /// Returns `None` when the vendor/product pair cannot be extracted or the
    /// name fails controller classification.
    pub fn from_descriptor(descriptor: &RawDeviceDescriptor) -> Option<Self> {
        let (vendor_id, product_id) = extract_vid_pid(&descriptor.hardware_id)?;
        if !is_game_controller(&descriptor.name) {
            return None;
        }
        let guid = derive_guid(Some(&vendor_id), Some(&product_id), &descriptor.instance_id);
        Some(Self {
            instance_id: descriptor.instance_id.clone(),
            guid,
            display_name: descriptor.name.trim().to_string(),
            vendor_id,
            product_id,
        })
    }

    /// Durable cross-run identity: `VIDPID:<VID>:<PID>:<NameWithoutSpaces>`.
    pub fn stable_key(&self) -> String {
        let compact_name: String = self
            .display_name
            .chars()
            .filter(|c| !c.is_whitespace())
            .collect();
        format!(
            "VIDPID:{}:{}:{}",
            self.vendor_id.to_ascii_uppercase(),
            self.product_id.to_ascii_uppercase(),
            compact_name
        )
    }

    /// Key used to deduplicate within one enumeration pass.
    pub fn dedup_key(&self) -> String {
        format!("{}:{}", self.vendor_id, self.product_id)
    }

    /// True when the display name looks like a generic placeholder that an
    /// OEM registry entry is allowed to overwrite.
    pub fn has_placeholder_name(&self) -> bool {
        let lower = self.display_name.to_ascii_lowercase();
        lower.contains("hid") || lower.contains("unknown")
    }
}
