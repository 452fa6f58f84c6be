// file: src/config/mod.rs
// version: 1.0.0
// guid: a4c8f1d6-93b2-4e07-8c15-6d20b47e9a58

//! Configuration module for the bootstrap orchestrator
//!
//! Holds the resolved, immutable bootstrap configuration and the
//! declarative-document generator. Resolution happens exactly once at
//! startup; every stage receives the config by reference afterwards.

pub mod nixos;
pub mod resolver;

pub use resolver::{resolve, Overrides, ValueSource};

use crate::error::BootstrapError;

/// Default hostname assigned when neither flag nor env var is set
pub const DEFAULT_HOSTNAME: &str = "nixos";
/// Default swap partition end boundary
pub const DEFAULT_SWAP_SIZE: &str = "8GiB";
/// Default boot partition end boundary
pub const DEFAULT_BOOT_SIZE: &str = "512MiB";
/// Default timezone identifier
pub const DEFAULT_TIMEZONE: &str = "UTC";
/// Default locale identifier
pub const DEFAULT_LOCALE: &str = "en_US.UTF-8";
/// Default account whose public keys unlock root SSH access
pub const DEFAULT_KEY_USER: &str = "jdfalk";
/// Default countdown before the final reboot, in seconds
pub const DEFAULT_REBOOT_DELAY: u64 = 5;

/// Firmware boot mode of the target machine
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BootMode {
    /// UEFI firmware: GPT partition table, systemd-boot loader
    Uefi,
    /// Legacy BIOS firmware: MBR partition table, GRUB installed to disk
    Legacy,
}

impl BootMode {
    pub fn as_str(&self) -> &'static str {
        match self {
            BootMode::Uefi => "uefi",
            BootMode::Legacy => "legacy",
        }
    }
}

impl std::str::FromStr for BootMode {
    type Err = BootstrapError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "uefi" | "efi" => Ok(BootMode::Uefi),
            "legacy" | "bios" | "mbr" => Ok(BootMode::Legacy),
            _ => Err(BootstrapError::config(format!("unknown boot mode: {}", s))),
        }
    }
}

impl std::fmt::Display for BootMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Fully resolved bootstrap configuration
///
/// Populated once by [`resolver::resolve`] and immutable afterwards. Sizes
/// are opaque boundary strings handed to the partitioning tool (e.g.
/// `512MiB`, `8GiB`).
#[derive(Debug, Clone)]
pub struct BootstrapConfig {
    /// Target disk device path (e.g. /dev/sda)
    pub disk: String,
    /// Hostname assigned to the installed system
    pub hostname: String,
    /// End boundary of the swap partition
    pub swap_size: String,
    /// End boundary of the boot partition
    pub boot_size: String,
    /// Firmware boot mode
    pub boot_mode: BootMode,
    /// Timezone identifier (e.g. Europe/Berlin)
    pub timezone: String,
    /// Locale identifier (e.g. en_US.UTF-8)
    pub locale: String,
    /// GitHub account whose public keys are fetched for root SSH access
    pub key_user: String,
    /// Seconds to count down before the final reboot
    pub reboot_delay: u64,
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    #[test]
    fn test_boot_mode_parsing() {
        assert_eq!(BootMode::from_str("uefi").unwrap(), BootMode::Uefi);
        assert_eq!(BootMode::from_str("EFI").unwrap(), BootMode::Uefi);
        assert_eq!(BootMode::from_str("legacy").unwrap(), BootMode::Legacy);
        assert_eq!(BootMode::from_str("bios").unwrap(), BootMode::Legacy);
        assert_eq!(BootMode::from_str("mbr").unwrap(), BootMode::Legacy);
        assert!(BootMode::from_str("openfirmware").is_err());
    }

    #[test]
    fn test_boot_mode_display() {
        assert_eq!(BootMode::Uefi.to_string(), "uefi");
        assert_eq!(BootMode::Legacy.to_string(), "legacy");
    }
}
