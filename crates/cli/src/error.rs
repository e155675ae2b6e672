//! CLI-boundary errors: bad invocations and missing inputs.

use std::path::PathBuf;

use thiserror::Error;

#[derive(Error, Debug)]
pub enum CliError {
    #[error("no mapping store at {0}; run `joyctl init <folder>` first")]
    StoreNotFound(PathBuf),

    #[error("folder not found: {0}")]
    FolderNotFound(PathBuf),

    #[error("device list not found: {0}")]
    DeviceListNotFound(PathBuf),

    #[error("bindings file not found: {0}")]
    BindingsFileNotFound(PathBuf),

    #[error("cannot locate a user config directory; pass --store explicitly")]
    NoConfigDirectory,
}
