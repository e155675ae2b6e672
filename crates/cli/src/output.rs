//! Output formatting for CLI responses.

use anyhow::Error;
use colored::Colorize;
use joyindex_config::bindings::BindingsRewrite;
use joyindex_device_types::DeviceIdentity;
use joyindex_engine::{EngineError, InitOutcome, ReconcileOutcome, ReconcileReport};
use serde_json::{Value, json};

use crate::commands::view::MappingStatus;

fn print_json(value: &Value) {
    match serde_json::to_string_pretty(value) {
        Ok(s) => println!("{s}"),
        Err(e) => eprintln!("Failed to format output as JSON: {e}"),
    }
}

/// Print error in JSON format.
pub fn print_error_json(error: &Error) {
    let issues: Vec<String> = match error.downcast_ref::<EngineError>() {
        Some(EngineError::Verification(issues)) => issues.iter().map(ToString::to_string).collect(),
        _ => Vec::new(),
    };
    print_json(&json!({
        "success": false,
        "error": {
            "message": error.to_string(),
            "issues": issues,
        }
    }));
}

/// Print error in human-readable format, with the full verification batch
/// when the run failed on mapping issues.
pub fn print_error_human(error: &Error) {
    eprintln!("{} {}", "Error:".red().bold(), error);

    if let Some(EngineError::Verification(issues)) = error.downcast_ref::<EngineError>() {
        for issue in issues {
            eprintln!("  {} {}", "•".red(), issue);
        }
        return;
    }

    let mut source = error.source();
    while let Some(err) = source {
        eprintln!("  {} {}", "Caused by:".yellow(), err);
        source = err.source();
    }
}

fn device_json(device: &DeviceIdentity) -> Value {
    json!({
        "name": device.display_name,
        "vendorId": device.vendor_id,
        "productId": device.product_id,
        "stableKey": device.stable_key(),
        "guid": device.guid,
    })
}

/// Print connected controllers and, when a store exists, per-mapping status.
pub fn print_view(devices: &[DeviceIdentity], statuses: Option<&[MappingStatus]>, json: bool) {
    if json {
        let mappings: Option<Vec<Value>> = statuses.map(|s| {
            s.iter()
                .map(|m| {
                    json!({
                        "name": m.name,
                        "expectedIndex": m.expected_index,
                        "connected": m.connected,
                    })
                })
                .collect()
        });
        print_json(&json!({
            "success": true,
            "devices": devices.iter().map(device_json).collect::<Vec<_>>(),
            "mappings": mappings,
        }));
        return;
    }

    if devices.is_empty() {
        println!("{}", "No game controllers found".yellow());
    } else {
        println!("{}", "Connected Controllers:".bold());
        for device in devices {
            println!(
                "  {} {} ({}:{})",
                "●".green(),
                device.display_name.bold(),
                device.vendor_id.dimmed(),
                device.product_id.dimmed()
            );
        }
    }

    match statuses {
        None => println!("\n{}", "No mapping store yet; run `joyctl init <folder>`".yellow()),
        Some(statuses) => {
            println!("\n{}", "Persisted Mappings:".bold());
            if statuses.is_empty() {
                println!("  {}", "none".dimmed());
            }
            for status in statuses {
                let marker = if status.connected {
                    "connected".green()
                } else {
                    "not connected".red()
                };
                println!(
                    "  {} -> index {} ({marker})",
                    status.name.bold(),
                    status.expected_index
                );
            }
        }
    }
}

/// Print the outcome of an init run.
pub fn print_init(outcome: &InitOutcome, store_path: &std::path::Path, json: bool) {
    if json {
        print_json(&json!({
            "success": true,
            "store": store_path.display().to_string(),
            "mappings": outcome
                .mappings
                .iter()
                .map(|m| {
                    json!({
                        "name": m.name,
                        "expectedIndex": m.expected_index,
                        "guid": m.guid,
                    })
                })
                .collect::<Vec<_>>(),
            "warnings": outcome.warnings,
        }));
        return;
    }

    for warning in &outcome.warnings {
        println!("{} {warning}", "⚠".yellow());
    }
    for mapping in &outcome.mappings {
        println!(
            "  {} {} -> index {}",
            "●".green(),
            mapping.name.bold(),
            mapping.expected_index
        );
    }
    println!(
        "{} {} mapping(s) saved to {}",
        "✓".green(),
        outcome.mappings.len(),
        store_path.display()
    );
}

/// Print a reconciliation report.
pub fn print_report(report: &ReconcileReport, json: bool) {
    if json {
        let remapping: Vec<Value> = report
            .remapping
            .iter()
            .map(|(old, new)| json!({ "from": old, "to": new }))
            .collect();
        let (applied, backup, changed_lines) = match &report.outcome {
            ReconcileOutcome::NoOpNeeded => (false, None, 0),
            ReconcileOutcome::Applied {
                devices_backup,
                bindings,
            } => {
                let changed = match bindings {
                    BindingsRewrite::Unchanged => 0,
                    BindingsRewrite::Rewritten { changed_lines } => *changed_lines,
                };
                (true, Some(devices_backup.display().to_string()), changed)
            }
        };
        print_json(&json!({
            "success": true,
            "applied": applied,
            "remapping": remapping,
            "devicesBackup": backup,
            "bindingsLinesChanged": changed_lines,
            "warnings": report.warnings,
        }));
        return;
    }

    for warning in &report.warnings {
        println!("{} {warning}", "⚠".yellow());
    }

    match &report.outcome {
        ReconcileOutcome::NoOpNeeded => {
            println!("{} {}", "✓".green(), "All devices already at their expected indices");
        }
        ReconcileOutcome::Applied {
            devices_backup,
            bindings,
        } => {
            for (old, new) in &report.remapping {
                println!("  index {old} -> {new}");
            }
            println!(
                "{} Device list rewritten (backup: {})",
                "✓".green(),
                devices_backup.display()
            );
            match bindings {
                BindingsRewrite::Unchanged => {
                    println!("{} {}", "✓".green(), "Bindings file needed no changes");
                }
                BindingsRewrite::Rewritten { changed_lines } => {
                    println!("{} Bindings file rewritten ({changed_lines} line(s))", "✓".green());
                }
            }
        }
    }
}
