//! Command implementations.

pub mod init;
pub mod update;
pub mod view;

use joyindex_device_types::DeviceIdentity;
use joyindex_resolve::{HidapiDeviceSource, default_oem_registry, resolve};

/// File names the external application uses, overridable per invocation.
pub const DEFAULT_DEVICES_FILE: &str = "devices.txt";
pub const DEFAULT_BINDINGS_FILE: &str = "current.map";

/// Enumerate currently-connected game controllers.
pub fn connected_devices() -> Vec<DeviceIdentity> {
    let source = HidapiDeviceSource::new();
    let oem = default_oem_registry();
    resolve(&source, oem.as_ref())
}
