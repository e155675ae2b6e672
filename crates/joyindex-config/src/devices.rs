//! Codec for the external application's device-list file.
//!
//! Line-oriented, comma-delimited. One header line `configId,guid,model|`,
//! then per-device lines `<index>,"<urlencoded guid>",<urlencoded model>`.
//! The GUID field is double-quote-wrapped and the model field historically
//! carries a trailing pipe; both are artifacts of the external format and are
//! stripped on decode.

use percent_encoding::{AsciiSet, NON_ALPHANUMERIC, percent_decode_str, utf8_percent_encode};
use tracing::debug;

/// Everything except unreserved characters is encoded, so a space becomes
/// `%20` (never `+`), matching what the external application writes.
const FIELD_ENCODE_SET: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'-')
    .remove(b'_')
    .remove(b'.')
    .remove(b'~');

pub const DEVICE_LIST_HEADER: &str = "configId,guid,model|";

/// One line of the external device list.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExternalDeviceRecord {
    /// 0-based slot the external application addresses the device by.
    pub index: u32,
    pub guid: String,
    pub model: String,
}

impl ExternalDeviceRecord {
    pub fn new(index: u32, guid: impl Into<String>, model: impl Into<String>) -> Self {
        Self {
            index,
            guid: guid.into(),
            model: model.into(),
        }
    }
}

fn decode_field(field: &str) -> String {
    percent_decode_str(field).decode_utf8_lossy().into_owned()
}

fn encode_field(field: &str) -> String {
    utf8_percent_encode(field, FIELD_ENCODE_SET).to_string()
}

// The format wraps the GUID in exactly one quote per side; anything past
// that belongs to the value.
fn strip_wrapping_quotes(field: &str) -> &str {
    let field = field.strip_prefix('"').unwrap_or(field);
    field.strip_suffix('"').unwrap_or(field)
}

/// Parse the device-list text. Malformed lines are skipped, never fatal.
pub fn parse_device_list(content: &str) -> Vec<ExternalDeviceRecord> {
    let mut records = Vec::new();

    for line in content.lines() {
        let line = line.trim();
        if line.is_empty() || !line.contains(',') {
            continue;
        }

        let fields: Vec<&str> = line.split(',').collect();
        if fields.len() < 3 {
            continue;
        }

        let Ok(index) = fields[0].trim().parse::<u32>() else {
            // Covers the header line as well as genuinely malformed input.
            debug!(line, "skipping device-list line without integer index");
            continue;
        };

        // URL-decode first, then strip the format's wrapping characters.
        let decoded_guid = decode_field(fields[1]);
        let guid = strip_wrapping_quotes(&decoded_guid).to_string();
        let model = decode_field(fields[2])
            .trim_end_matches('|')
            .to_string();

        records.push(ExternalDeviceRecord { index, guid, model });
    }

    records
}

/// Serialize a device list: header line, then records ascending by index.
pub fn serialize_device_list(records: &[ExternalDeviceRecord]) -> String {
    let mut sorted: Vec<&ExternalDeviceRecord> = records.iter().collect();
    sorted.sort_by_key(|r| r.index);

    let mut out = String::from(DEVICE_LIST_HEADER);
    out.push('\n');
    for record in sorted {
        let quoted_guid = format!("\"{}\"", record.guid);
        out.push_str(&format!(
            "{},{},{}\n",
            record.index,
            encode_field(&quoted_guid),
            encode_field(&record.model)
        ));
    }
    out
}
