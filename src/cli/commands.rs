// file: src/cli/commands.rs
// version: 1.0.0
// guid: 3c85e1f7-62d9-4b40-a8c3-95f207d1b6e8

//! Command implementation for the CLI
//!
//! Drives the whole bootstrap: preflight guard, configuration resolution,
//! key fetch, interactive confirmation, then the destructive pipeline.
//! Everything before the confirmation gate is read-only.

use crate::{
    cli::args::Cli,
    config::{resolver, BootMode, BootstrapConfig},
    executor::HostRunner,
    install::Bootstrap,
    network::KeyFetcher,
    utils::{prompt, system::SystemUtils},
    BootstrapError, Result,
};
use tracing::info;

/// How a bootstrap run ended without error
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    /// Pipeline ran to completion (the host is about to reboot)
    Completed,
    /// Operator declined the confirmation; disk untouched
    Declined,
}

/// Run the bootstrap end to end
pub async fn install_command(cli: &Cli) -> Result<Outcome> {
    if !SystemUtils::is_root() {
        return Err(BootstrapError::precondition(
            "nixos-bootstrap must run as root",
        ));
    }

    let runner = HostRunner::new();
    let config = resolver::resolve(&runner, &cli.overrides()).await?;
    check_required_tools(&config).await?;

    let keys = KeyFetcher::new()
        .fetch_authorized_keys(&config.key_user)
        .await?;

    if !prompt::confirm_destruction(&config, keys.len())? {
        info!("Aborted by operator; disk untouched");
        return Ok(Outcome::Declined);
    }

    info!("Starting bootstrap of {} on {}", config.hostname, config.disk);
    let bootstrap = Bootstrap::new(Box::new(runner), config, keys);
    bootstrap.run().await?;

    Ok(Outcome::Completed)
}

/// Verify that every external tool the pipeline needs is present
async fn check_required_tools(config: &BootstrapConfig) -> Result<()> {
    let mut required = vec![
        "parted",
        "mkfs.ext4",
        "mkswap",
        "mount",
        "swapon",
        "nixos-generate-config",
        "nixos-install",
    ];
    if config.boot_mode == BootMode::Uefi {
        required.push("mkfs.fat");
    }

    for tool in required {
        if !SystemUtils::command_exists(tool).await {
            return Err(BootstrapError::precondition(format!(
                "required tool not found in PATH: {}",
                tool
            )));
        }
    }
    Ok(())
}
