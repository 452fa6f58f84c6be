// file: src/lib.rs
// version: 1.0.0
// guid: 7b1e5d20-4a9f-4c83-b6d7-2f08a915ce34

//! # NixOS Bootstrap
//!
//! Bootstraps a minimal NixOS installation onto a bare disk: detects the
//! target device and boot mode, fetches authorized SSH keys, partitions and
//! formats the disk, generates a declarative system configuration, and runs
//! the installer. The result is a host ready to be handed off to a separate
//! configuration-management tool over SSH.

pub mod cli;
pub mod config;
pub mod error;
pub mod executor;
pub mod install;
pub mod logging;
pub mod network;
pub mod utils;

pub use error::{BootstrapError, Result};

/// Version information for the binary
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
