//! joyctl - keep flight-sim joystick indices stable across reboots.
//!
//! The external application addresses controllers by enumeration index,
//! which the OS reshuffles freely. `joyctl init` records which index each
//! controller should have; `joyctl update` puts every controller back on its
//! recorded index by rewriting the application's device list and bindings
//! file (each write preceded by a timestamped backup).

#![deny(static_mut_refs)]
#![deny(unused_must_use)]
#![deny(clippy::unwrap_used)]

mod commands;
mod error;
mod output;

use std::path::PathBuf;

use anyhow::Result;
use clap::{Parser, Subcommand};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use crate::error::CliError;

#[derive(Parser)]
#[command(name = "joyctl")]
#[command(about = "Keep flight-sim joystick indices stable across reboots")]
#[command(version)]
#[command(long_about = "
joyctl pairs each connected game controller with its slot in the external
application's device list (init), then restores those slots whenever the OS
reshuffles enumeration order (update). Running joyctl with no command is the
same as `joyctl update`.

Use --json for machine-readable output suitable for scripting.
")]
struct Cli {
    /// Output format (human-readable or JSON)
    #[arg(
        long,
        global = true,
        help = "Output in JSON format for machine parsing"
    )]
    json: bool,

    /// Verbose logging
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Mapping-store file (defaults to the user config directory)
    #[arg(long, global = true, env = "JOYCTL_STORE")]
    store: Option<PathBuf>,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Show connected controllers and persisted-mapping status
    View,

    /// Pair connected controllers with the external device list in FOLDER
    Init {
        /// Folder holding the external application's input files
        folder: PathBuf,

        /// Device-list file name inside FOLDER
        #[arg(long, default_value = commands::DEFAULT_DEVICES_FILE)]
        devices_file: String,

        /// Bindings file name inside FOLDER
        #[arg(long, default_value = commands::DEFAULT_BINDINGS_FILE)]
        bindings_file: String,
    },

    /// Restore every controller to its expected index (the default command)
    Update,
}

fn main() {
    let cli = Cli::parse();

    let log_level = match cli.verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| format!("joyctl={log_level},joyindex={log_level}").into()),
        )
        .with(tracing_subscriber::fmt::layer().with_target(false))
        .init();

    if let Err(e) = execute_command(&cli) {
        if cli.json {
            output::print_error_json(&e);
        } else {
            output::print_error_human(&e);
        }
        std::process::exit(1);
    }
}

fn execute_command(cli: &Cli) -> Result<()> {
    let store_path = store_path(cli)?;

    match cli.command.as_ref().unwrap_or(&Commands::Update) {
        Commands::View => commands::view::execute(&store_path, cli.json),
        Commands::Init {
            folder,
            devices_file,
            bindings_file,
        } => commands::init::execute(&store_path, folder, devices_file, bindings_file, cli.json),
        Commands::Update => commands::update::execute(&store_path, cli.json),
    }
}

fn store_path(cli: &Cli) -> Result<PathBuf> {
    if let Some(path) = &cli.store {
        return Ok(path.clone());
    }
    let config_dir = dirs::config_dir().ok_or(CliError::NoConfigDirectory)?;
    Ok(config_dir.join("joyctl").join("mappings.json"))
}
