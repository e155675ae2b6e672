//! Identity resolution: turning OS device enumeration into a deduplicated
//! list of [`DeviceIdentity`] values.
//!
//! Enumeration is abstracted behind two capability traits so the filtering,
//! dedup, and enrichment pipeline can be tested without any OS dependency:
//! [`DeviceSource`] lists attached HID-class devices, [`OemRegistry`] supplies
//! OEM display names keyed by vendor/product pair. Real adapters (`hidapi`,
//! the built-in controller name table) live alongside in-memory mocks.

#![deny(static_mut_refs)]

pub mod oem;
pub mod resolver;
pub mod source;

pub use joyindex_device_types::DeviceIdentity;
pub use oem::{OemEntry, OemRegistry, StaticOemRegistry, default_oem_registry};
pub use resolver::resolve;
pub use source::{DeviceSource, HidapiDeviceSource, SourceError};
