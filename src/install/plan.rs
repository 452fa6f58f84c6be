// file: src/install/plan.rs
// version: 1.0.0
// guid: 5a8d23e0-b491-4c76-8f02-e63a19d7c5b4

//! Deterministic partition planning
//!
//! Pure derivation of the partition layout and partition device paths from
//! the resolved configuration. Nothing here touches hardware; the plan is
//! applied separately by [`super::disk`].

use crate::config::{BootMode, BootstrapConfig};

/// Partition table types understood by parted
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TableType {
    Gpt,
    Msdos,
}

impl TableType {
    /// Label argument for `parted mklabel`
    pub fn parted_label(&self) -> &'static str {
        match self {
            TableType::Gpt => "gpt",
            TableType::Msdos => "msdos",
        }
    }
}

/// Role of a planned partition
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PartitionRole {
    Boot,
    Swap,
    Root,
}

/// One planned partition
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PartitionSpec {
    /// 1-based partition index
    pub number: u32,
    pub role: PartitionRole,
    /// parted partition type / name argument ("ESP" or "primary")
    pub part_type: &'static str,
    /// parted filesystem hint for mkpart
    pub fs_hint: &'static str,
    /// Start boundary passed verbatim to parted
    pub start: String,
    /// End boundary passed verbatim to parted
    pub end: String,
    /// Partition flag set after creation ("esp" or "boot")
    pub flag: Option<&'static str>,
}

/// Complete partition layout for a disk
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PartitionPlan {
    pub table: TableType,
    pub partitions: Vec<PartitionSpec>,
}

impl PartitionPlan {
    /// Derive the layout from the resolved configuration
    ///
    /// Both boot modes share the same geometry: boot from 1MiB to
    /// `boot_size`, swap from `boot_size` to `swap_size`, root from
    /// `swap_size` to end of disk. The boot mode decides the table type,
    /// the boot partition filesystem, and its flag.
    pub fn new(config: &BootstrapConfig) -> Self {
        let (table, boot_type, boot_fs, boot_flag) = match config.boot_mode {
            BootMode::Uefi => (TableType::Gpt, "ESP", "fat32", "esp"),
            BootMode::Legacy => (TableType::Msdos, "primary", "ext4", "boot"),
        };

        let partitions = vec![
            PartitionSpec {
                number: 1,
                role: PartitionRole::Boot,
                part_type: boot_type,
                fs_hint: boot_fs,
                start: "1MiB".to_string(),
                end: config.boot_size.clone(),
                flag: Some(boot_flag),
            },
            PartitionSpec {
                number: 2,
                role: PartitionRole::Swap,
                part_type: "primary",
                fs_hint: "linux-swap",
                start: config.boot_size.clone(),
                end: config.swap_size.clone(),
                flag: None,
            },
            PartitionSpec {
                number: 3,
                role: PartitionRole::Root,
                part_type: "primary",
                fs_hint: "ext4",
                start: config.swap_size.clone(),
                end: "100%".to_string(),
                flag: None,
            },
        ];

        Self { table, partitions }
    }

    /// Derive the device path of every planned partition, in order
    pub fn partition_paths(&self, disk: &str) -> Vec<String> {
        self.partitions
            .iter()
            .map(|part| partition_path(disk, part.number))
            .collect()
    }
}

/// Derive the device path of partition `number` on `disk`
///
/// NVMe-style device names take a `p` separator before the partition
/// index (`/dev/nvme0n1p1`); traditional names append the index directly
/// (`/dev/sda1`).
pub fn partition_path(disk: &str, number: u32) -> String {
    if is_nvme_name(disk) {
        format!("{}p{}", disk, number)
    } else {
        format!("{}{}", disk, number)
    }
}

fn is_nvme_name(disk: &str) -> bool {
    disk.rsplit('/')
        .next()
        .map(|name| name.starts_with("nvme"))
        .unwrap_or(false)
}
