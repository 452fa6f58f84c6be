// file: src/cli/args.rs
// version: 1.0.0
// guid: 7f2a94d6-c581-4b07-a3e9-16d80f5c2b74

//! Command line argument definitions
//!
//! Every configuration attribute is an optional flag backed by an
//! environment variable, preserving the env-driven surface of the original
//! workflow. There are no positional arguments; unset attributes fall
//! through to auto-detection and then to fixed defaults.

use crate::config::{BootMode, Overrides};
use clap::Parser;

#[derive(Parser)]
#[command(name = "nixos-bootstrap")]
#[command(about = "Bootstrap a minimal NixOS installation onto a bare disk")]
#[command(version = env!("CARGO_PKG_VERSION"))]
pub struct Cli {
    /// Target disk device; auto-detected from the first disk-type block device when unset
    #[arg(long, env = "DISK")]
    pub disk: Option<String>,

    /// Hostname for the installed system
    #[arg(long, env = "TARGET_HOSTNAME")]
    pub hostname: Option<String>,

    /// End boundary of the swap partition (e.g. 8GiB)
    #[arg(long, env = "SWAP_SIZE")]
    pub swap_size: Option<String>,

    /// End boundary of the boot partition (e.g. 512MiB)
    #[arg(long, env = "BOOT_SIZE")]
    pub boot_size: Option<String>,

    /// Firmware boot mode; detected from /sys/firmware/efi when unset
    #[arg(long, env = "BOOT_MODE", value_enum)]
    pub boot_mode: Option<BootModeArg>,

    /// Timezone identifier (e.g. Europe/Berlin)
    #[arg(long, env = "TIMEZONE")]
    pub timezone: Option<String>,

    /// Locale identifier (e.g. en_US.UTF-8)
    #[arg(long, env = "LOCALE")]
    pub locale: Option<String>,

    /// GitHub account whose public keys unlock root SSH access
    #[arg(long, env = "KEY_USER")]
    pub key_user: Option<String>,

    /// Seconds to count down before the final reboot
    #[arg(long, env = "REBOOT_DELAY")]
    pub reboot_delay: Option<u64>,

    #[arg(short, long)]
    pub verbose: bool,

    #[arg(short, long)]
    pub quiet: bool,
}

impl Cli {
    /// Collect explicit overrides for the layered resolver
    pub fn overrides(&self) -> Overrides {
        Overrides {
            disk: self.disk.clone(),
            hostname: self.hostname.clone(),
            swap_size: self.swap_size.clone(),
            boot_size: self.boot_size.clone(),
            boot_mode: self.boot_mode.map(Into::into),
            timezone: self.timezone.clone(),
            locale: self.locale.clone(),
            key_user: self.key_user.clone(),
            reboot_delay: self.reboot_delay,
        }
    }
}

/// Boot mode argument for the CLI
#[derive(clap::ValueEnum, Clone, Copy, Debug)]
pub enum BootModeArg {
    Uefi,
    Legacy,
}

impl From<BootModeArg> for BootMode {
    fn from(mode: BootModeArg) -> Self {
        match mode {
            BootModeArg::Uefi => BootMode::Uefi,
            BootModeArg::Legacy => BootMode::Legacy,
        }
    }
}

impl From<BootMode> for BootModeArg {
    fn from(mode: BootMode) -> Self {
        match mode {
            BootMode::Uefi => BootModeArg::Uefi,
            BootMode::Legacy => BootModeArg::Legacy,
        }
    }
}
