// file: src/install/disk.rs
// version: 1.0.0
// guid: 1e7fa9c3-50b8-4d2e-a671-9304cb8e5f12

//! Partition table application
//!
//! Applies a [`PartitionPlan`] to the target disk with parted, then waits
//! for the kernel to publish the partition device nodes before the
//! formatting stage touches them.

use super::plan::PartitionPlan;
use crate::executor::CommandRunner;
use crate::{BootstrapError, Result};
use std::path::Path;
use std::time::Duration;
use tokio::time::{sleep, Instant};
use tracing::{debug, info};

const NODE_POLL_INTERVAL: Duration = Duration::from_millis(200);
const NODE_WAIT_TIMEOUT: Duration = Duration::from_secs(10);

/// Create the partition table and all planned partitions
pub async fn apply_plan(
    runner: &dyn CommandRunner,
    disk: &str,
    plan: &PartitionPlan,
) -> Result<()> {
    info!(
        "Creating {} partition table on {}",
        plan.table.parted_label(),
        disk
    );
    runner
        .run("parted", &["--script", disk, "mklabel", plan.table.parted_label()])
        .await?;

    for part in &plan.partitions {
        info!(
            "Creating partition {} ({} {} .. {})",
            part.number, part.fs_hint, part.start, part.end
        );
        runner
            .run(
                "parted",
                &[
                    "--script",
                    disk,
                    "mkpart",
                    part.part_type,
                    part.fs_hint,
                    &part.start,
                    &part.end,
                ],
            )
            .await?;

        if let Some(flag) = part.flag {
            let number = part.number.to_string();
            runner
                .run("parted", &["--script", disk, "set", &number, flag, "on"])
                .await?;
        }
    }

    Ok(())
}

/// Wait for every partition device node to materialize
///
/// The kernel republishes device nodes asynchronously after parted exits,
/// so the paths are polled with a bounded timeout instead of a fixed
/// sleep. A node that never appears is fatal.
pub async fn wait_for_partitions(runner: &dyn CommandRunner, paths: &[String]) -> Result<()> {
    for path in paths {
        let deadline = Instant::now() + NODE_WAIT_TIMEOUT;
        loop {
            if runner.path_exists(Path::new(path)).await {
                debug!("Partition device ready: {}", path);
                break;
            }
            if Instant::now() >= deadline {
                return Err(BootstrapError::tool(format!(
                    "partition device {} did not appear within {}s",
                    path,
                    NODE_WAIT_TIMEOUT.as_secs()
                )));
            }
            sleep(NODE_POLL_INTERVAL).await;
        }
    }
    Ok(())
}
