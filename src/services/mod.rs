//! Per-service cost calculators
//!
//! Each submodule owns one service: its configuration record, its static
//! price table and a pure `calculate_*` function returning a breakdown.
//! None of them depend on each other and none of them can fail.
//!
//! - `s3`: storage tiers, request classes, tiered data transfer
//! - `aurora`: Serverless v2 ACUs or provisioned r6g instances
//! - `lambda`: request count plus GB-seconds
//! - `ecs`: Fargate vCPU-hours plus GB-hours

pub mod aurora;
pub mod ecs;
pub mod lambda;
pub mod s3;

use crate::breakdown::GenericCostBreakdown;
use crate::error::CostError;
use crate::pricing::PricingDataSet;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

pub use aurora::{calculate_aurora_costs, AuroraConfig, AuroraCostBreakdown};
pub use ecs::{calculate_ecs_costs, EcsConfig, EcsCostBreakdown};
pub use lambda::{calculate_lambda_costs, LambdaConfig, LambdaCostBreakdown};
pub use s3::{calculate_s3_costs, S3CostBreakdown, S3StorageConfig, S3StorageTier};

/// Fixed hours-per-month used by every hourly price (365 * 24 / 12).
pub const HOURS_PER_MONTH: f64 = 730.0;

/// CPU architecture for Lambda and Fargate
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Architecture {
    X86,
    Arm,
}

impl Architecture {
    pub const ALL: [Architecture; 2] = [Architecture::X86, Architecture::Arm];

    pub fn as_str(&self) -> &'static str {
        match self {
            Architecture::X86 => "x86",
            Architecture::Arm => "arm",
        }
    }
}

impl fmt::Display for Architecture {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Architecture {
    type Err = CostError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "x86" | "x86_64" | "amd64" => Ok(Architecture::X86),
            "arm" | "arm64" | "graviton" => Ok(Architecture::Arm),
            _ => Err(CostError::validation(
                "architecture",
                format!("Unknown architecture: {}. Use 'x86' or 'arm'", s),
            )),
        }
    }
}

/// Which service a configuration belongs to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum Service {
    S3,
    Aurora,
    Lambda,
    Ecs,
}

impl Service {
    /// Heading used when comparing two configurations of this service
    pub fn title(&self) -> &'static str {
        match self {
            Service::S3 => "S3 Storage Tiers Comparison",
            Service::Aurora => "Aurora Deployment Comparison",
            Service::Lambda => "Lambda Architecture Comparison",
            Service::Ecs => "ECS Fargate Comparison",
        }
    }
}

impl fmt::Display for Service {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Service::S3 => "s3",
            Service::Aurora => "aurora",
            Service::Lambda => "lambda",
            Service::Ecs => "ecs",
        };
        f.write_str(name)
    }
}

/// A configuration for any of the supported services
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "service", content = "config", rename_all = "lowercase")]
pub enum ServiceConfig {
    S3(S3StorageConfig),
    Aurora(AuroraConfig),
    Lambda(LambdaConfig),
    Ecs(EcsConfig),
}

impl ServiceConfig {
    pub fn service(&self) -> Service {
        match self {
            ServiceConfig::S3(_) => Service::S3,
            ServiceConfig::Aurora(_) => Service::Aurora,
            ServiceConfig::Lambda(_) => Service::Lambda,
            ServiceConfig::Ecs(_) => Service::Ecs,
        }
    }

    /// Run the matching calculator and project the result.
    ///
    /// `pricing` is only consulted for S3 storage prices.
    pub fn estimate(&self, pricing: Option<&PricingDataSet>) -> GenericCostBreakdown {
        match self {
            ServiceConfig::S3(config) => (&calculate_s3_costs(config, pricing)).into(),
            ServiceConfig::Aurora(config) => (&calculate_aurora_costs(config)).into(),
            ServiceConfig::Lambda(config) => (&calculate_lambda_costs(config)).into(),
            ServiceConfig::Ecs(config) => (&calculate_ecs_costs(config)).into(),
        }
    }
}

impl From<S3StorageConfig> for ServiceConfig {
    fn from(config: S3StorageConfig) -> Self {
        ServiceConfig::S3(config)
    }
}

impl From<AuroraConfig> for ServiceConfig {
    fn from(config: AuroraConfig) -> Self {
        ServiceConfig::Aurora(config)
    }
}

impl From<LambdaConfig> for ServiceConfig {
    fn from(config: LambdaConfig) -> Self {
        ServiceConfig::Lambda(config)
    }
}

impl From<EcsConfig> for ServiceConfig {
    fn from(config: EcsConfig) -> Self {
        ServiceConfig::Ecs(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_architecture_parse() {
        assert_eq!("x86".parse::<Architecture>().unwrap(), Architecture::X86);
        assert_eq!("ARM".parse::<Architecture>().unwrap(), Architecture::Arm);
        assert_eq!("arm64".parse::<Architecture>().unwrap(), Architecture::Arm);
        assert!("mips".parse::<Architecture>().is_err());
    }

    #[test]
    fn test_architecture_serde() {
        assert_eq!(serde_json::to_string(&Architecture::X86).unwrap(), "\"x86\"");
        let arch: Architecture = serde_json::from_str("\"arm\"").unwrap();
        assert_eq!(arch, Architecture::Arm);
    }

    #[test]
    fn test_service_config_estimate_matches_service() {
        let config: ServiceConfig = EcsConfig::default().into();
        assert_eq!(config.service(), Service::Ecs);
        let direct = calculate_ecs_costs(&EcsConfig::default());
        assert_eq!(config.estimate(None).total, direct.total_cost);
    }

    #[test]
    fn test_service_config_json_shape() {
        let config: ServiceConfig = LambdaConfig::default().into();
        let value = serde_json::to_value(&config).unwrap();
        assert_eq!(value["service"], "lambda");
        assert_eq!(value["config"]["memoryMB"], 1024.0);
    }
}
