// file: src/install/filesystem.rs
// version: 1.0.0
// guid: 84d0b6f5-3c2a-4917-be58-7f61a02d9c43

//! Filesystem creation and target mounting
//!
//! Formats the three planned partitions and assembles the target mount
//! tree: root at the target root, boot under `<root>/boot`, swap
//! activated. Any failure aborts the pipeline; there is no partial-success
//! continuation.

use crate::config::{BootMode, BootstrapConfig};
use crate::executor::CommandRunner;
use crate::Result;
use std::path::Path;
use tracing::info;

/// Filesystem label of the boot partition
pub const BOOT_LABEL: &str = "BOOT";
/// Filesystem label of the swap partition
pub const SWAP_LABEL: &str = "SWAP";
/// Filesystem label of the root partition
pub const ROOT_LABEL: &str = "NIXOS";

/// Format boot, swap, and root partitions
///
/// `paths` is the ordered partition path list from the plan: boot, swap,
/// root.
pub async fn format_partitions(
    runner: &dyn CommandRunner,
    config: &BootstrapConfig,
    paths: &[String],
) -> Result<()> {
    let (boot, swap, root) = (&paths[0], &paths[1], &paths[2]);

    match config.boot_mode {
        BootMode::Uefi => {
            info!("Formatting {} as FAT32 ({})", boot, BOOT_LABEL);
            runner
                .run("mkfs.fat", &["-F", "32", "-n", BOOT_LABEL, boot])
                .await?;
        }
        BootMode::Legacy => {
            info!("Formatting {} as ext4 ({})", boot, BOOT_LABEL);
            runner
                .run("mkfs.ext4", &["-F", "-L", BOOT_LABEL, boot])
                .await?;
        }
    }

    info!("Formatting {} as swap ({})", swap, SWAP_LABEL);
    runner.run("mkswap", &["-L", SWAP_LABEL, swap]).await?;

    info!("Formatting {} as ext4 ({})", root, ROOT_LABEL);
    runner.run("mkfs.ext4", &["-F", "-L", ROOT_LABEL, root]).await?;

    Ok(())
}

/// Mount the target tree and activate swap
pub async fn mount_target(
    runner: &dyn CommandRunner,
    paths: &[String],
    target_root: &Path,
) -> Result<()> {
    let (boot, swap, root) = (&paths[0], &paths[1], &paths[2]);
    let root_dir = target_root.display().to_string();
    let boot_dir = target_root.join("boot");

    tokio::fs::create_dir_all(target_root).await?;
    info!("Mounting {} at {}", root, root_dir);
    runner.run("mount", &[root, &root_dir]).await?;

    tokio::fs::create_dir_all(&boot_dir).await?;
    let boot_dir = boot_dir.display().to_string();
    info!("Mounting {} at {}", boot, boot_dir);
    runner.run("mount", &[boot, &boot_dir]).await?;

    info!("Activating swap on {}", swap);
    runner.run("swapon", &[swap.as_str()]).await?;

    Ok(())
}
