//! Device identity logic for flight-sim game controllers.
//!
//! This crate is intentionally I/O-free. It provides pure functions and types
//! for turning volatile OS enumeration data (hardware-id strings, display
//! names) into the stable identities the reconciliation engine matches on.
//! Everything here can be tested without hardware or OS-level plumbing.

#![deny(static_mut_refs)]

pub mod classify;
pub mod guid;
pub mod identity;

pub use classify::is_game_controller;
pub use guid::derive_guid;
pub use identity::{DeviceIdentity, RawDeviceDescriptor, extract_vid_pid};
