// file: src/install/mod.rs
// version: 1.0.0
// guid: b2f64c80-e9a5-4d31-87c9-50d18ae36f27

//! Bootstrap pipeline orchestration
//!
//! Runs the destructive half of the bootstrap in strict sequence:
//! partition → format → mount → generate configuration → install →
//! finalize. The confirmation gate has already been passed when this
//! module is entered; every failure from here on is fatal with no
//! rollback.

pub mod disk;
pub mod filesystem;
pub mod plan;

use crate::config::{nixos, BootstrapConfig};
use crate::executor::CommandRunner;
use crate::Result;
use plan::PartitionPlan;
use std::path::PathBuf;
use std::time::Duration;
use tokio::time::sleep;
use tracing::info;

/// Default mount point for the target filesystem
pub const DEFAULT_TARGET_ROOT: &str = "/mnt";

/// The bootstrap pipeline
pub struct Bootstrap {
    runner: Box<dyn CommandRunner>,
    config: BootstrapConfig,
    keys: Vec<String>,
    target_root: PathBuf,
}

impl Bootstrap {
    pub fn new(runner: Box<dyn CommandRunner>, config: BootstrapConfig, keys: Vec<String>) -> Self {
        Self {
            runner,
            config,
            keys,
            target_root: PathBuf::from(DEFAULT_TARGET_ROOT),
        }
    }

    /// Override the target root mount point (tests use a temp directory)
    pub fn with_target_root(mut self, target_root: impl Into<PathBuf>) -> Self {
        self.target_root = target_root.into();
        self
    }

    /// Run the pipeline to completion
    ///
    /// The final reboot is the last action; on a real host this function
    /// never returns from a successful run.
    pub async fn run(&self) -> Result<()> {
        let plan = PartitionPlan::new(&self.config);
        let paths = plan.partition_paths(&self.config.disk);

        disk::apply_plan(self.runner.as_ref(), &self.config.disk, &plan).await?;
        disk::wait_for_partitions(self.runner.as_ref(), &paths).await?;
        filesystem::format_partitions(self.runner.as_ref(), &self.config, &paths).await?;
        filesystem::mount_target(self.runner.as_ref(), &paths, &self.target_root).await?;
        self.generate_configuration().await?;
        self.install().await?;
        self.finalize().await?;

        Ok(())
    }

    /// Generate hardware configuration and write configuration.nix
    async fn generate_configuration(&self) -> Result<()> {
        let root = self.target_root.display().to_string();

        info!("Generating hardware configuration under {}", root);
        self.runner
            .run_streaming("nixos-generate-config", &["--root", &root])
            .await?;

        let document = nixos::render(&self.config, &self.keys);
        let path = self.target_root.join("etc/nixos/configuration.nix");
        if let Some(parent) = path.parent() {
            tokio::fs::create_dir_all(parent).await?;
        }
        tokio::fs::write(&path, document).await?;
        info!("Wrote {}", path.display());

        Ok(())
    }

    /// Invoke the installer against the mounted target
    async fn install(&self) -> Result<()> {
        let root = self.target_root.display().to_string();
        info!("Running nixos-install (this can take a while)");
        self.runner
            .run_streaming("nixos-install", &["--no-root-passwd", "--root", &root])
            .await
    }

    /// Hostname record, operator guidance, countdown, reboot
    async fn finalize(&self) -> Result<()> {
        // The declarative config already sets the hostname; the plain
        // record keeps tooling that reads /etc/hostname working before
        // the first activation.
        let hostname_path = self.target_root.join("etc/hostname");
        if let Some(parent) = hostname_path.parent() {
            tokio::fs::create_dir_all(parent).await?;
        }
        tokio::fs::write(&hostname_path, format!("{}\n", self.config.hostname)).await?;

        info!("Installation complete");
        info!(
            "After reboot, connect with: ssh root@{}",
            self.config.hostname
        );
        info!("Hand the host to configuration management from there");

        for remaining in (1..=self.config.reboot_delay).rev() {
            info!("Rebooting in {}...", remaining);
            sleep(Duration::from_secs(1)).await;
        }

        // Point of no return
        self.runner.run_streaming("reboot", &[]).await
    }
}
