//! OEM display-name registries.
//!
//! Secondary enrichment source keyed by vendor/product pair. A registry can
//! rename a device the primary source reported with a placeholder name; a
//! registry that reflects actually-attached hardware (the Windows joystick
//! OEM hive) can also contribute devices the primary source missed entirely.

use crate::source::SourceError;

/// One registry entry: vendor/product pair plus the OEM-provided name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OemEntry {
    /// 4 lowercase hex digits.
    pub vendor_id: String,
    /// 4 lowercase hex digits.
    pub product_id: String,
    pub name: String,
}

impl OemEntry {
    pub fn new(
        vendor_id: impl Into<String>,
        product_id: impl Into<String>,
        name: impl Into<String>,
    ) -> Self {
        Self {
            vendor_id: vendor_id.into(),
            product_id: product_id.into(),
            name: name.into(),
        }
    }

    pub fn dedup_key(&self) -> String {
        format!(
            "{}:{}",
            self.vendor_id.to_ascii_lowercase(),
            self.product_id.to_ascii_lowercase()
        )
    }
}

/// Capability trait for OEM name lookup sources.
pub trait OemRegistry {
    fn entries(&self) -> Result<Vec<OemEntry>, SourceError>;

    /// Whether entries describe hardware that has actually been attached.
    ///
    /// Only such registries may contribute devices the primary source missed;
    /// a static name table renaming on top of live enumeration must never
    /// invent connected hardware.
    fn reflects_attached_hardware(&self) -> bool {
        false
    }
}

/// Built-in name table for well-known HOTAS-class hardware. Rename-only.
#[derive(Debug, Default)]
pub struct StaticOemRegistry {
    extra: Vec<OemEntry>,
}

/// Known flight controllers: (vendor id, product id, OEM name).
const KNOWN_CONTROLLERS: &[(&str, &str, &str)] = &[
    // Thrustmaster
    ("044f", "b10a", "Thrustmaster T.16000M"),
    ("044f", "b687", "Thrustmaster TWCS Throttle"),
    ("044f", "b679", "Thrustmaster TFRP Rudder"),
    ("044f", "0402", "Thrustmaster HOTAS Warthog Joystick"),
    ("044f", "0404", "Thrustmaster HOTAS Warthog Throttle"),
    // Logitech / Saitek
    ("046d", "c215", "Logitech Extreme 3D Pro"),
    ("06a3", "075c", "Saitek X52 Flight Control System"),
    ("06a3", "0762", "Saitek X52 Professional"),
    ("06a3", "0763", "Saitek Pro Flight Rudder Pedals"),
    // VKB / Virpil
    ("231d", "0200", "VKBsim Gladiator NXT"),
    ("3344", "0194", "VPC Constellation ALPHA"),
    // Honeycomb
    ("294b", "1900", "Honeycomb Alpha Flight Controls"),
];

impl StaticOemRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registry with additional entries layered over the built-in table.
    pub fn with_entries(extra: Vec<OemEntry>) -> Self {
        Self { extra }
    }
}

impl OemRegistry for StaticOemRegistry {
    fn entries(&self) -> Result<Vec<OemEntry>, SourceError> {
        let mut entries: Vec<OemEntry> = KNOWN_CONTROLLERS
            .iter()
            .map(|(vid, pid, name)| OemEntry::new(*vid, *pid, *name))
            .collect();
        entries.extend(self.extra.iter().cloned());
        Ok(entries)
    }
}

/// Windows joystick OEM hive: names keyed by `VID_xxxx&PID_xxxx` subkeys.
/// Reflects devices that have been attached at some point, so it may also
/// contribute devices the live enumeration missed.
#[cfg(target_os = "windows")]
#[derive(Debug, Default)]
pub struct WindowsOemRegistry;

#[cfg(target_os = "windows")]
impl WindowsOemRegistry {
    const OEM_SUBKEY: &'static str =
        r"System\CurrentControlSet\Control\MediaProperties\PrivateProperties\Joystick\OEM";

    pub fn new() -> Self {
        Self
    }
}

#[cfg(target_os = "windows")]
impl OemRegistry for WindowsOemRegistry {
    fn entries(&self) -> Result<Vec<OemEntry>, SourceError> {
        use joyindex_device_types::extract_vid_pid;
        use winreg::RegKey;
        use winreg::enums::HKEY_CURRENT_USER;

        let hive = RegKey::predef(HKEY_CURRENT_USER);
        let oem_key = hive
            .open_subkey(Self::OEM_SUBKEY)
            .map_err(|e| SourceError::Unavailable(e.to_string()))?;

        let mut entries = Vec::new();
        for subkey_name in oem_key.enum_keys().flatten() {
            let Some((vendor_id, product_id)) = extract_vid_pid(&subkey_name) else {
                continue;
            };
            let Ok(subkey) = oem_key.open_subkey(&subkey_name) else {
                continue;
            };
            let name: String = match subkey.get_value("OEMName") {
                Ok(name) => name,
                Err(_) => continue,
            };
            if name.trim().is_empty() {
                continue;
            }
            entries.push(OemEntry::new(vendor_id, product_id, name.trim()));
        }
        Ok(entries)
    }

    fn reflects_attached_hardware(&self) -> bool {
        true
    }
}

/// The platform default: the OS OEM hive on Windows, the built-in name table
/// elsewhere.
pub fn default_oem_registry() -> Box<dyn OemRegistry> {
    #[cfg(target_os = "windows")]
    {
        Box::new(WindowsOemRegistry::new())
    }
    #[cfg(not(target_os = "windows"))]
    {
        Box::new(StaticOemRegistry::new())
    }
}

pub mod mock {
    use super::*;

    /// In-memory OEM registry for tests.
    #[derive(Debug, Default)]
    pub struct InMemoryOemRegistry {
        entries: Vec<OemEntry>,
        attached: bool,
        fail: bool,
    }

    impl InMemoryOemRegistry {
        /// Rename-only registry.
        pub fn new(entries: Vec<OemEntry>) -> Self {
            Self {
                entries,
                attached: false,
                fail: false,
            }
        }

        /// Registry whose entries count as previously-attached hardware.
        pub fn attached(entries: Vec<OemEntry>) -> Self {
            Self {
                entries,
                attached: true,
                fail: false,
            }
        }

        /// A registry that always errors.
        pub fn failing() -> Self {
            Self {
                entries: Vec::new(),
                attached: false,
                fail: true,
            }
        }
    }

    impl OemRegistry for InMemoryOemRegistry {
        fn entries(&self) -> Result<Vec<OemEntry>, SourceError> {
            if self.fail {
                return Err(SourceError::Unavailable("simulated failure".to_string()));
            }
            Ok(self.entries.clone())
        }

        fn reflects_attached_hardware(&self) -> bool {
            self.attached
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn built_in_table_is_well_formed() {
        let entries = StaticOemRegistry::new().entries().expect("static registry");
        assert!(!entries.is_empty());
        for entry in &entries {
            assert_eq!(entry.vendor_id.len(), 4);
            assert_eq!(entry.product_id.len(), 4);
            assert!(!entry.name.is_empty());
        }
    }

    #[test]
    fn static_table_never_claims_attached_hardware() {
        assert!(!StaticOemRegistry::new().reflects_attached_hardware());
    }

    #[test]
    fn extra_entries_are_appended() {
        let registry =
            StaticOemRegistry::with_entries(vec![OemEntry::new("beef", "cafe", "Test Stick")]);
        let entries = registry.entries().expect("static registry");
        assert!(entries.iter().any(|e| e.dedup_key() == "beef:cafe"));
    }
}
