//! Deterministic GUID derivation.
//!
//! The external application identifies devices by its own GUID scheme. To
//! match against it without access to its derivation, we synthesize a GUID in
//! the same shape from the vendor/product pair and a per-device string. This
//! is a best-effort proxy: it is NOT guaranteed to equal the external
//! application's GUID for the same physical device, so callers treat it as
//! one matching signal among several, never as ground truth.

use std::collections::hash_map::DefaultHasher;
use std::hash::{Hash, Hasher};

/// Derive the synthetic GUID for a device.
///
/// Pure function: the same `(vendor_id, product_id, device_id)` triple always
/// yields the same string. Missing vendor/product halves default to `0000`.
///
/// Format: `{pid}{vid}-{h[0..4]}-{h[4..8]}-0000000000000000` where `h` is the
/// absolute value of a non-cryptographic hash of `device_id` rendered as
/// 8 lowercase hex digits.
pub fn derive_guid(vendor_id: Option<&str>, product_id: Option<&str>, device_id: &str) -> String {
    let vid = pad_id(vendor_id);
    let pid = pad_id(product_id);

    let mut hasher = DefaultHasher::new();
    device_id.hash(&mut hasher);
    // Truncate to i32 and strip the sign so the value always renders as
    // exactly 8 hex digits.
    let h = format!("{:08x}", (hasher.finish() as i32).unsigned_abs());

    format!(
        "{}{}-{}-{}-0000000000000000",
        pid,
        vid,
        &h[0..4],
        &h[4..8]
    )
}

fn pad_id(id: Option<&str>) -> String {
    match id {
        Some(s) if !s.is_empty() => format!("{:0>4}", s.to_ascii_lowercase()),
        _ => "0000".to_string(),
    }
}
