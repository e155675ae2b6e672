//! Full reconciliation runs over real temp files.

use std::collections::BTreeMap;
use std::fs;
use std::path::Path;

use joyindex_config::bindings::BindingsRewrite;
use joyindex_config::{
    ConfigError, ExternalDeviceRecord, MappingDocument, PersistedMapping, serialize_device_list,
};
use joyindex_device_types::DeviceIdentity;
use joyindex_engine::{EngineError, MappingIssue, ReconcileOutcome, reconcile};
use tempfile::TempDir;

fn device(vid: &str, pid: &str, name: &str) -> DeviceIdentity {
    DeviceIdentity {
        instance_id: format!("HID\\VID_{vid}&PID_{pid}\\1"),
        guid: format!("{pid}{vid}-aaaa-bbbb-0000000000000000"),
        display_name: name.to_string(),
        vendor_id: vid.to_string(),
        product_id: pid.to_string(),
    }
}

fn write_fixture(dir: &Path, records: &[ExternalDeviceRecord], bindings: &str) -> MappingDocument {
    let devices_file = dir.join("devices.txt");
    let bindings_file = dir.join("current.map");
    fs::write(&devices_file, serialize_device_list(records)).expect("write devices");
    fs::write(&bindings_file, bindings).expect("write bindings");
    MappingDocument {
        devices_file_path: devices_file,
        bindings_file_path: bindings_file,
        mappings: Vec::new(),
    }
}

#[test]
fn moves_a_device_back_to_its_expected_index() {
    let dir = TempDir::new().expect("temp dir");
    let stick = device("046d", "c215", "Thrustmaster T16000");

    let records = vec![
        ExternalDeviceRecord::new(0, "other-guid", "Other Device"),
        ExternalDeviceRecord::new(3, "game-guid-1", "T16000"),
    ];
    let bindings = "pitch=joy3_axis\nroll=joy3\nview=joy30\nfire=joy0\n";
    let mut document = write_fixture(dir.path(), &records, bindings);
    document.mappings = vec![PersistedMapping {
        unique_identifier: stick.stable_key(),
        name: stick.display_name.clone(),
        expected_index: 0,
        guid: "game-guid-1".to_string(),
    }];

    let report = reconcile(&document, std::slice::from_ref(&stick)).expect("reconcile");

    assert_eq!(report.remapping, BTreeMap::from([(3u32, 0u32)]));
    let ReconcileOutcome::Applied { devices_backup, bindings } = &report.outcome else {
        panic!("expected Applied, got {:?}", report.outcome);
    };
    assert!(devices_backup.exists());
    // joy3 whole words rewritten, joy30 and joy3_axis left alone.
    assert_eq!(
        fs::read_to_string(&document.bindings_file_path).expect("read bindings"),
        "pitch=joy3_axis\nroll=joy0\nview=joy30\nfire=joy0\n"
    );
    assert_eq!(*bindings, BindingsRewrite::Rewritten { changed_lines: 1 });

    // The stick now owns index 0; the record that sat there was displaced.
    let rewritten = fs::read_to_string(&document.devices_file_path).expect("read devices");
    let parsed = joyindex_config::parse_device_list(&rewritten);
    assert_eq!(parsed, vec![ExternalDeviceRecord::new(0, "game-guid-1", "T16000")]);

    // Second run with unchanged hardware is a no-op.
    let second = reconcile(&document, std::slice::from_ref(&stick)).expect("second run");
    assert!(second.remapping.is_empty());
    assert_eq!(second.outcome, ReconcileOutcome::NoOpNeeded);
}

#[test]
fn swapped_devices_swap_cleanly() {
    let dir = TempDir::new().expect("temp dir");
    let stick = device("044f", "b10a", "T.16000M Joystick");
    let throttle = device("044f", "b687", "TWCS Throttle");

    let records = vec![
        ExternalDeviceRecord::new(0, "guid-throttle", "TWCS Throttle"),
        ExternalDeviceRecord::new(1, "guid-stick", "T.16000M Joystick"),
    ];
    let mut document = write_fixture(dir.path(), &records, "a=joy0\nb=joy1\n");
    document.mappings = vec![
        PersistedMapping {
            unique_identifier: stick.stable_key(),
            name: stick.display_name.clone(),
            expected_index: 0,
            guid: "guid-stick".to_string(),
        },
        PersistedMapping {
            unique_identifier: throttle.stable_key(),
            name: throttle.display_name.clone(),
            expected_index: 1,
            guid: "guid-throttle".to_string(),
        },
    ];

    let connected = vec![stick, throttle];
    let report = reconcile(&document, &connected).expect("reconcile");
    assert_eq!(report.remapping, BTreeMap::from([(0u32, 1u32), (1u32, 0u32)]));

    let rewritten = fs::read_to_string(&document.devices_file_path).expect("read devices");
    let parsed = joyindex_config::parse_device_list(&rewritten);
    assert_eq!(
        parsed,
        vec![
            ExternalDeviceRecord::new(0, "guid-stick", "T.16000M Joystick"),
            ExternalDeviceRecord::new(1, "guid-throttle", "TWCS Throttle"),
        ]
    );
    assert_eq!(
        fs::read_to_string(&document.bindings_file_path).expect("read bindings"),
        "a=joy1\nb=joy0\n"
    );
}

#[test]
fn missing_device_aborts_without_touching_files() {
    let dir = TempDir::new().expect("temp dir");
    let records = vec![ExternalDeviceRecord::new(0, "g", "Some Stick")];
    let bindings = "a=joy0\n";
    let mut document = write_fixture(dir.path(), &records, bindings);
    document.mappings = vec![PersistedMapping {
        unique_identifier: "VIDPID:BEEF:CAFE:SoldStick".to_string(),
        name: "Sold Stick".to_string(),
        expected_index: 0,
        guid: "g".to_string(),
    }];

    let devices_before = fs::read_to_string(&document.devices_file_path).expect("read");
    let err = reconcile(&document, &[]).expect_err("should abort");
    let EngineError::Verification(issues) = err else {
        panic!("expected verification failure, got {err}");
    };
    assert!(matches!(issues.as_slice(), [MappingIssue::DeviceNotFound { .. }]));

    // Nothing rewritten, no backups created.
    assert_eq!(
        fs::read_to_string(&document.devices_file_path).expect("read"),
        devices_before
    );
    assert_eq!(fs::read_to_string(&document.bindings_file_path).expect("read"), bindings);
    assert_eq!(fs::read_dir(dir.path()).expect("read dir").count(), 2);
}

#[test]
fn missing_bindings_file_aborts_before_any_write() {
    let dir = TempDir::new().expect("temp dir");
    let stick = device("046d", "c215", "Thrustmaster T16000");
    let records = vec![
        ExternalDeviceRecord::new(0, "other-guid", "Other Device"),
        ExternalDeviceRecord::new(3, "game-guid-1", "T16000"),
    ];
    let mut document = write_fixture(dir.path(), &records, "roll=joy3\n");
    fs::remove_file(&document.bindings_file_path).expect("remove bindings");
    document.mappings = vec![PersistedMapping {
        unique_identifier: stick.stable_key(),
        name: stick.display_name.clone(),
        expected_index: 0,
        guid: "game-guid-1".to_string(),
    }];

    let devices_before = fs::read_to_string(&document.devices_file_path).expect("read devices");
    let err = reconcile(&document, std::slice::from_ref(&stick)).expect_err("should abort");
    assert!(matches!(
        err,
        EngineError::Config(ConfigError::FileNotFound(ref p)) if *p == document.bindings_file_path
    ));

    // The device list needed a 3->0 remap, but with the bindings file gone
    // it must stay exactly as it was, with no backup next to it.
    assert_eq!(
        fs::read_to_string(&document.devices_file_path).expect("read devices"),
        devices_before
    );
    assert_eq!(fs::read_dir(dir.path()).expect("read dir").count(), 1);
}

#[test]
fn device_absent_from_external_list_is_a_soft_warning() {
    let dir = TempDir::new().expect("temp dir");
    let stick = device("044f", "b10a", "T.16000M Joystick");
    let records = vec![ExternalDeviceRecord::new(0, "g", "Completely Unrelated Hardware")];
    let mut document = write_fixture(dir.path(), &records, "a=joy0\n");
    document.mappings = vec![PersistedMapping {
        unique_identifier: stick.stable_key(),
        name: stick.display_name.clone(),
        expected_index: 1,
        guid: "no-such-guid".to_string(),
    }];

    let report = reconcile(&document, std::slice::from_ref(&stick)).expect("soft path");
    assert_eq!(report.outcome, ReconcileOutcome::NoOpNeeded);
    assert_eq!(report.warnings.len(), 1);
    assert!(report.warnings[0].contains("T.16000M"));
}
