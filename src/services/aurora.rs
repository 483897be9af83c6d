//! Aurora cost calculator
//!
//! Compute depends on the deployment type; storage, I/O and backup are
//! billed the same way for both.

use super::HOURS_PER_MONTH;
use crate::error::CostError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Serverless v2 price per ACU-hour
pub const ACU_PRICE_PER_HOUR: f64 = 0.12;
/// Cluster storage price per GB-month
pub const STORAGE_PRICE_PER_GB: f64 = 0.10;
/// Price per million I/O requests
pub const IO_PRICE_PER_MILLION: f64 = 0.20;
/// Backup storage price per GB-month
pub const BACKUP_PRICE_PER_GB: f64 = 0.021;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum AuroraInstanceType {
    #[serde(rename = "db.r6g.large")]
    R6gLarge,
    #[serde(rename = "db.r6g.xlarge")]
    R6gXlarge,
    #[serde(rename = "db.r6g.2xlarge")]
    R6g2xlarge,
    #[serde(rename = "db.r6g.4xlarge")]
    R6g4xlarge,
    #[serde(rename = "db.r6g.8xlarge")]
    R6g8xlarge,
    #[serde(rename = "db.r6g.12xlarge")]
    R6g12xlarge,
    #[serde(rename = "db.r6g.16xlarge")]
    R6g16xlarge,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AuroraInstanceMetadata {
    pub name: &'static str,
    pub vcpu: u32,
    #[serde(rename = "memoryGB")]
    pub memory_gb: u32,
    pub price_per_hour: f64,
}

const INSTANCE_METADATA: [AuroraInstanceMetadata; 7] = [
    AuroraInstanceMetadata { name: "db.r6g.large", vcpu: 2, memory_gb: 16, price_per_hour: 0.24 },
    AuroraInstanceMetadata { name: "db.r6g.xlarge", vcpu: 4, memory_gb: 32, price_per_hour: 0.48 },
    AuroraInstanceMetadata { name: "db.r6g.2xlarge", vcpu: 8, memory_gb: 64, price_per_hour: 0.96 },
    AuroraInstanceMetadata { name: "db.r6g.4xlarge", vcpu: 16, memory_gb: 128, price_per_hour: 1.92 },
    AuroraInstanceMetadata { name: "db.r6g.8xlarge", vcpu: 32, memory_gb: 256, price_per_hour: 3.84 },
    AuroraInstanceMetadata { name: "db.r6g.12xlarge", vcpu: 48, memory_gb: 384, price_per_hour: 5.76 },
    AuroraInstanceMetadata { name: "db.r6g.16xlarge", vcpu: 64, memory_gb: 512, price_per_hour: 7.68 },
];

impl AuroraInstanceType {
    pub const ALL: [AuroraInstanceType; 7] = [
        AuroraInstanceType::R6gLarge,
        AuroraInstanceType::R6gXlarge,
        AuroraInstanceType::R6g2xlarge,
        AuroraInstanceType::R6g4xlarge,
        AuroraInstanceType::R6g8xlarge,
        AuroraInstanceType::R6g12xlarge,
        AuroraInstanceType::R6g16xlarge,
    ];

    pub fn metadata(&self) -> &'static AuroraInstanceMetadata {
        let index = match self {
            AuroraInstanceType::R6gLarge => 0,
            AuroraInstanceType::R6gXlarge => 1,
            AuroraInstanceType::R6g2xlarge => 2,
            AuroraInstanceType::R6g4xlarge => 3,
            AuroraInstanceType::R6g8xlarge => 4,
            AuroraInstanceType::R6g12xlarge => 5,
            AuroraInstanceType::R6g16xlarge => 6,
        };
        &INSTANCE_METADATA[index]
    }

    pub fn as_str(&self) -> &'static str {
        self.metadata().name
    }

    pub fn price_per_hour(&self) -> f64 {
        self.metadata().price_per_hour
    }
}

impl fmt::Display for AuroraInstanceType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for AuroraInstanceType {
    type Err = CostError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim().to_ascii_lowercase();
        let wanted = wanted.strip_prefix("db.").unwrap_or(&wanted);
        AuroraInstanceType::ALL
            .into_iter()
            .find(|t| t.as_str().trim_start_matches("db.") == wanted)
            .ok_or_else(|| {
                CostError::validation(
                    "instanceType",
                    format!("Unknown Aurora instance type: {}. Supported: db.r6g.large to db.r6g.16xlarge", s),
                )
            })
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AuroraServerlessV2Config {
    #[serde(rename = "minACU")]
    pub min_acu: f64,
    #[serde(rename = "maxACU")]
    pub max_acu: f64,
    #[serde(rename = "storageGB")]
    pub storage_gb: f64,
    #[serde(rename = "ioRequests")]
    pub io_requests: f64,
    #[serde(rename = "backupStorageGB")]
    pub backup_storage_gb: f64,
}

impl Default for AuroraServerlessV2Config {
    fn default() -> Self {
        Self {
            min_acu: 0.5,
            max_acu: 2.0,
            storage_gb: 100.0,
            io_requests: 1_000_000.0,
            backup_storage_gb: 50.0,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AuroraProvisionedConfig {
    #[serde(rename = "instanceType")]
    pub instance_type: AuroraInstanceType,
    #[serde(rename = "instanceCount")]
    pub instance_count: f64,
    #[serde(rename = "storageGB")]
    pub storage_gb: f64,
    #[serde(rename = "ioRequests")]
    pub io_requests: f64,
    #[serde(rename = "backupStorageGB")]
    pub backup_storage_gb: f64,
}

impl Default for AuroraProvisionedConfig {
    fn default() -> Self {
        Self {
            instance_type: AuroraInstanceType::R6gLarge,
            instance_count: 1.0,
            storage_gb: 100.0,
            io_requests: 1_000_000.0,
            backup_storage_gb: 50.0,
        }
    }
}

/// Aurora deployment, tagged by type
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", content = "config")]
pub enum AuroraConfig {
    #[serde(rename = "SERVERLESS_V2")]
    ServerlessV2(AuroraServerlessV2Config),
    #[serde(rename = "PROVISIONED")]
    Provisioned(AuroraProvisionedConfig),
}

impl Default for AuroraConfig {
    fn default() -> Self {
        AuroraConfig::ServerlessV2(AuroraServerlessV2Config::default())
    }
}

impl AuroraConfig {
    pub fn deployment_name(&self) -> &'static str {
        match self {
            AuroraConfig::ServerlessV2(_) => "Serverless v2",
            AuroraConfig::Provisioned(_) => "Provisioned",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AuroraCostBreakdown {
    pub compute_cost: f64,
    pub storage_cost: f64,
    pub io_cost: f64,
    pub backup_cost: f64,
    pub total_cost: f64,
}

fn with_shared_costs(
    compute_cost: f64,
    storage_gb: f64,
    io_requests: f64,
    backup_storage_gb: f64,
) -> AuroraCostBreakdown {
    let storage_cost = storage_gb * STORAGE_PRICE_PER_GB;
    let io_cost = (io_requests / 1_000_000.0) * IO_PRICE_PER_MILLION;
    let backup_cost = backup_storage_gb * BACKUP_PRICE_PER_GB;
    let total_cost = compute_cost + storage_cost + io_cost + backup_cost;

    AuroraCostBreakdown {
        compute_cost,
        storage_cost,
        io_cost,
        backup_cost,
        total_cost,
    }
}

pub fn calculate_aurora_costs(config: &AuroraConfig) -> AuroraCostBreakdown {
    match config {
        AuroraConfig::ServerlessV2(c) => {
            let avg_acu = (c.min_acu + c.max_acu) / 2.0;
            let compute_cost = avg_acu * ACU_PRICE_PER_HOUR * HOURS_PER_MONTH;
            with_shared_costs(compute_cost, c.storage_gb, c.io_requests, c.backup_storage_gb)
        }
        AuroraConfig::Provisioned(c) => {
            let compute_cost =
                c.instance_type.price_per_hour() * HOURS_PER_MONTH * c.instance_count;
            with_shared_costs(compute_cost, c.storage_gb, c.io_requests, c.backup_storage_gb)
        }
    }
}
