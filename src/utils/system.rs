// file: src/utils/system.rs
// version: 1.0.0
// guid: 8e61d3b9-05f7-4a2c-bd48-17c90f26e5a8

//! System utility functions

use std::process::Stdio;
use tokio::process::Command;

/// System utility functions
pub struct SystemUtils;

impl SystemUtils {
    /// Check if running as root
    pub fn is_root() -> bool {
        #[cfg(unix)]
        {
            unsafe { libc::getuid() == 0 }
        }
        #[cfg(not(unix))]
        {
            false
        }
    }

    /// Check if a command exists in PATH
    pub async fn command_exists(command: &str) -> bool {
        Command::new("which")
            .arg(command)
            .stdout(Stdio::null())
            .stderr(Stdio::null())
            .status()
            .await
            .map(|status| status.success())
            .unwrap_or(false)
    }
}
