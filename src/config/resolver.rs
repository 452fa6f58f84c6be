// file: src/config/resolver.rs
// version: 1.0.0
// guid: e2d74b09-1f6a-4385-a9c0-58f3b6217d4c

//! Layered configuration resolution
//!
//! Every attribute resolves through the same ladder: explicit override
//! (flag or environment variable) > auto-detection > fixed default. The
//! resolved value and its source are logged so the operator can audit the
//! run before confirming it. Detection probes go through the command
//! runner, keeping resolution testable without hardware.

use super::{BootMode, BootstrapConfig};
use crate::executor::CommandRunner;
use crate::{BootstrapError, Result};
use serde::Deserialize;
use std::path::Path;
use tracing::info;

/// Explicit overrides collected from the CLI/environment surface
#[derive(Debug, Default, Clone)]
pub struct Overrides {
    pub disk: Option<String>,
    pub hostname: Option<String>,
    pub swap_size: Option<String>,
    pub boot_size: Option<String>,
    pub boot_mode: Option<BootMode>,
    pub timezone: Option<String>,
    pub locale: Option<String>,
    pub key_user: Option<String>,
    pub reboot_delay: Option<u64>,
}

/// Where a resolved configuration value came from
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ValueSource {
    Explicit,
    Detected,
    Default,
}

impl ValueSource {
    pub fn as_str(&self) -> &'static str {
        match self {
            ValueSource::Explicit => "explicit",
            ValueSource::Detected => "detected",
            ValueSource::Default => "default",
        }
    }
}

/// Resolve the full bootstrap configuration
///
/// Fails with a precondition error when no disk was given and none can be
/// detected.
pub async fn resolve(runner: &dyn CommandRunner, overrides: &Overrides) -> Result<BootstrapConfig> {
    let (disk, disk_source) = match &overrides.disk {
        Some(disk) => (disk.clone(), ValueSource::Explicit),
        None => {
            let detected = detect_disk(runner).await?.ok_or_else(|| {
                BootstrapError::precondition("no disk device found; set DISK explicitly")
            })?;
            (detected, ValueSource::Detected)
        }
    };
    log_value("disk", &disk, disk_source);

    let (boot_mode, mode_source) = match overrides.boot_mode {
        Some(mode) => (mode, ValueSource::Explicit),
        None => (detect_boot_mode(runner).await, ValueSource::Detected),
    };
    log_value("boot_mode", boot_mode.as_str(), mode_source);

    let (hostname, source) = resolve_string(&overrides.hostname, super::DEFAULT_HOSTNAME);
    log_value("hostname", &hostname, source);
    let (swap_size, source) = resolve_string(&overrides.swap_size, super::DEFAULT_SWAP_SIZE);
    log_value("swap_size", &swap_size, source);
    let (boot_size, source) = resolve_string(&overrides.boot_size, super::DEFAULT_BOOT_SIZE);
    log_value("boot_size", &boot_size, source);
    let (timezone, source) = resolve_string(&overrides.timezone, super::DEFAULT_TIMEZONE);
    log_value("timezone", &timezone, source);
    let (locale, source) = resolve_string(&overrides.locale, super::DEFAULT_LOCALE);
    log_value("locale", &locale, source);
    let (key_user, source) = resolve_string(&overrides.key_user, super::DEFAULT_KEY_USER);
    log_value("key_user", &key_user, source);

    let (reboot_delay, source) = match overrides.reboot_delay {
        Some(delay) => (delay, ValueSource::Explicit),
        None => (super::DEFAULT_REBOOT_DELAY, ValueSource::Default),
    };
    log_value("reboot_delay", &reboot_delay.to_string(), source);

    Ok(BootstrapConfig {
        disk,
        hostname,
        swap_size,
        boot_size,
        boot_mode,
        timezone,
        locale,
        key_user,
        reboot_delay,
    })
}

fn resolve_string(value: &Option<String>, default: &str) -> (String, ValueSource) {
    match value {
        Some(v) => (v.clone(), ValueSource::Explicit),
        None => (default.to_string(), ValueSource::Default),
    }
}

fn log_value(name: &str, value: &str, source: ValueSource) {
    info!("{} = {} ({})", name, value, source.as_str());
}

/// Detect the first block device of type "disk"
async fn detect_disk(runner: &dyn CommandRunner) -> Result<Option<String>> {
    let output = runner
        .run_with_output("lsblk", &["-J", "-o", "NAME,TYPE,SIZE"])
        .await?;
    let devices = parse_lsblk(&output)?;
    Ok(first_disk(&devices))
}

/// Detect boot mode from the firmware interface directory
async fn detect_boot_mode(runner: &dyn CommandRunner) -> BootMode {
    if runner.path_exists(Path::new("/sys/firmware/efi")).await {
        BootMode::Uefi
    } else {
        BootMode::Legacy
    }
}

/// Parse lsblk JSON output into block device records
fn parse_lsblk(json: &str) -> Result<Vec<LsblkDevice>> {
    let output: LsblkOutput = serde_json::from_str(json)?;
    Ok(output.blockdevices)
}

/// Pick the first device of type "disk", as a /dev path
fn first_disk(devices: &[LsblkDevice]) -> Option<String> {
    devices
        .iter()
        .find(|dev| dev.device_type.as_deref() == Some("disk"))
        .map(|dev| format!("/dev/{}", dev.name))
}

#[derive(Debug, Deserialize)]
struct LsblkOutput {
    blockdevices: Vec<LsblkDevice>,
}

#[derive(Debug, Deserialize)]
struct LsblkDevice {
    name: String,
    #[serde(rename = "type")]
    device_type: Option<String>,
    #[allow(dead_code)]
    size: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    const LSBLK_FIXTURE: &str = r#"{
        "blockdevices": [
            {"name": "loop0", "type": "loop", "size": "4K"},
            {"name": "sr0", "type": "rom", "size": "1024M"},
            {"name": "vda", "type": "disk", "size": "50G"},
            {"name": "vdb", "type": "disk", "size": "100G"}
        ]
    }"#;

    /// Probe fake: canned lsblk output, no firmware directory
    struct ProbeRunner {
        lsblk: &'static str,
        efi_present: bool,
    }

    #[async_trait::async_trait]
    impl CommandRunner for ProbeRunner {
        async fn run(&self, _program: &str, _args: &[&str]) -> crate::Result<()> {
            panic!("resolution must not execute destructive commands");
        }

        async fn run_streaming(&self, _program: &str, _args: &[&str]) -> crate::Result<()> {
            panic!("resolution must not execute destructive commands");
        }

        async fn run_with_output(&self, program: &str, _args: &[&str]) -> crate::Result<String> {
            assert_eq!(program, "lsblk");
            Ok(self.lsblk.to_string())
        }

        async fn path_exists(&self, _path: &Path) -> bool {
            self.efi_present
        }
    }

    #[test]
    fn test_first_disk_skips_non_disk_devices() {
        let devices = parse_lsblk(LSBLK_FIXTURE).unwrap();
        assert_eq!(first_disk(&devices), Some("/dev/vda".to_string()));
    }

    #[test]
    fn test_first_disk_none_when_no_candidates() {
        let devices =
            parse_lsblk(r#"{"blockdevices": [{"name": "loop0", "type": "loop", "size": "4K"}]}"#)
                .unwrap();
        assert_eq!(first_disk(&devices), None);
    }

    #[test]
    fn test_parse_lsblk_rejects_garbage() {
        assert!(parse_lsblk("not json").is_err());
    }

    #[tokio::test]
    async fn test_resolve_detects_disk_and_boot_mode() {
        let runner = ProbeRunner {
            lsblk: LSBLK_FIXTURE,
            efi_present: false,
        };
        let config = resolve(&runner, &Overrides::default()).await.unwrap();
        assert_eq!(config.disk, "/dev/vda");
        assert_eq!(config.boot_mode, BootMode::Legacy);
    }

    #[tokio::test]
    async fn test_resolve_uefi_when_firmware_directory_present() {
        let runner = ProbeRunner {
            lsblk: LSBLK_FIXTURE,
            efi_present: true,
        };
        let config = resolve(&runner, &Overrides::default()).await.unwrap();
        assert_eq!(config.boot_mode, BootMode::Uefi);
    }

    #[tokio::test]
    async fn test_resolve_fails_without_disk_candidate() {
        let runner = ProbeRunner {
            lsblk: r#"{"blockdevices": []}"#,
            efi_present: false,
        };
        let err = resolve(&runner, &Overrides::default()).await.unwrap_err();
        assert!(matches!(err, BootstrapError::Precondition(_)));
    }

    #[tokio::test]
    async fn test_resolve_explicit_overrides_win() {
        let runner = ProbeRunner {
            lsblk: LSBLK_FIXTURE,
            efi_present: true,
        };
        let overrides = Overrides {
            disk: Some("/dev/sdz".to_string()),
            hostname: Some("builder".to_string()),
            boot_mode: Some(BootMode::Legacy),
            reboot_delay: Some(0),
            ..Default::default()
        };

        let config = resolve(&runner, &overrides).await.unwrap();
        assert_eq!(config.disk, "/dev/sdz");
        assert_eq!(config.hostname, "builder");
        assert_eq!(config.boot_mode, BootMode::Legacy);
        assert_eq!(config.reboot_delay, 0);
        // Unset attributes fall back to defaults
        assert_eq!(config.swap_size, crate::config::DEFAULT_SWAP_SIZE);
        assert_eq!(config.boot_size, crate::config::DEFAULT_BOOT_SIZE);
        assert_eq!(config.timezone, crate::config::DEFAULT_TIMEZONE);
        assert_eq!(config.locale, crate::config::DEFAULT_LOCALE);
    }
}
