//! Device enumeration sources.

use joyindex_device_types::RawDeviceDescriptor;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum SourceError {
    #[error("enumeration source unavailable: {0}")]
    Unavailable(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// A source of raw device descriptors.
///
/// Adapters may fail; the resolver treats any failure as "source returned
/// nothing" and continues with partial results.
pub trait DeviceSource {
    /// Short adapter name for log lines.
    fn name(&self) -> &str;

    /// Enumerate currently attached devices.
    fn enumerate(&self) -> Result<Vec<RawDeviceDescriptor>, SourceError>;
}

/// Real adapter over the hidapi enumeration.
///
/// The hardware-id string is rendered in the Windows `VID_xxxx&PID_xxxx`
/// shape on every platform so the extraction path downstream is uniform.
#[derive(Debug, Default)]
pub struct HidapiDeviceSource;

impl HidapiDeviceSource {
    pub fn new() -> Self {
        Self
    }
}

impl DeviceSource for HidapiDeviceSource {
    fn name(&self) -> &str {
        "hidapi"
    }

    fn enumerate(&self) -> Result<Vec<RawDeviceDescriptor>, SourceError> {
        let api = hidapi::HidApi::new().map_err(|e| SourceError::Unavailable(e.to_string()))?;

        let descriptors = api
            .device_list()
            .map(|info| {
                let hardware_id =
                    format!("VID_{:04X}&PID_{:04X}", info.vendor_id(), info.product_id());
                let instance_id = info.path().to_string_lossy().into_owned();
                let name = match info.product_string() {
                    Some(s) if !s.trim().is_empty() => s.to_string(),
                    _ => "Unknown HID Device".to_string(),
                };
                RawDeviceDescriptor::new(instance_id, hardware_id, name)
            })
            .collect();

        Ok(descriptors)
    }
}

pub mod mock {
    use super::*;

    /// In-memory device source for tests.
    #[derive(Debug, Default)]
    pub struct InMemoryDeviceSource {
        descriptors: Vec<RawDeviceDescriptor>,
        fail: bool,
    }

    impl InMemoryDeviceSource {
        pub fn new(descriptors: Vec<RawDeviceDescriptor>) -> Self {
            Self {
                descriptors,
                fail: false,
            }
        }

        /// A source that always errors, for exercising the swallow-and-continue
        /// failure policy.
        pub fn failing() -> Self {
            Self {
                descriptors: Vec::new(),
                fail: true,
            }
        }
    }

    impl DeviceSource for InMemoryDeviceSource {
        fn name(&self) -> &str {
            "in-memory"
        }

        fn enumerate(&self) -> Result<Vec<RawDeviceDescriptor>, SourceError> {
            if self.fail {
                return Err(SourceError::Unavailable("simulated failure".to_string()));
            }
            Ok(self.descriptors.clone())
        }
    }
}
