//! Lambda cost calculator

use super::Architecture;
use serde::{Deserialize, Serialize};

/// Price per million invocations, both architectures
pub const REQUEST_PRICE_PER_MILLION: f64 = 0.20;

pub const MIN_MEMORY_MB: f64 = 128.0;
pub const MAX_MEMORY_MB: f64 = 10_240.0;

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LambdaArchitectureMetadata {
    pub name: &'static str,
    pub description: &'static str,
    #[serde(rename = "pricePerGBSecond")]
    pub price_per_gb_second: f64,
}

const X86_METADATA: LambdaArchitectureMetadata = LambdaArchitectureMetadata {
    name: "x86_64",
    description: "Standard x86 architecture",
    price_per_gb_second: 0.0000166667,
};

const ARM_METADATA: LambdaArchitectureMetadata = LambdaArchitectureMetadata {
    name: "ARM Graviton2",
    description: "ARM-based architecture (~20% cheaper)",
    price_per_gb_second: 0.0000133334,
};

pub fn architecture_metadata(architecture: Architecture) -> &'static LambdaArchitectureMetadata {
    match architecture {
        Architecture::X86 => &X86_METADATA,
        Architecture::Arm => &ARM_METADATA,
    }
}

/// Common memory sizes offered as presets
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LambdaMemoryTier {
    #[serde(rename = "memoryMB")]
    pub memory_mb: u32,
    pub description: &'static str,
}

pub const MEMORY_TIERS: [LambdaMemoryTier; 8] = [
    LambdaMemoryTier { memory_mb: 128, description: "Minimal (128 MB)" },
    LambdaMemoryTier { memory_mb: 256, description: "Low (256 MB)" },
    LambdaMemoryTier { memory_mb: 512, description: "Light (512 MB)" },
    LambdaMemoryTier { memory_mb: 1024, description: "Standard (1 GB)" },
    LambdaMemoryTier { memory_mb: 2048, description: "Medium (2 GB)" },
    LambdaMemoryTier { memory_mb: 3008, description: "High (3 GB)" },
    LambdaMemoryTier { memory_mb: 5120, description: "Very High (5 GB)" },
    LambdaMemoryTier { memory_mb: 10240, description: "Maximum (10 GB)" },
];

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LambdaConfig {
    pub architecture: Architecture,
    #[serde(rename = "memoryMB")]
    pub memory_mb: f64,
    #[serde(rename = "monthlyInvocations")]
    pub monthly_invocations: f64,
    #[serde(rename = "avgDurationMs")]
    pub avg_duration_ms: f64,
}

impl Default for LambdaConfig {
    fn default() -> Self {
        Self {
            architecture: Architecture::X86,
            memory_mb: 1024.0,
            monthly_invocations: 1_000_000.0,
            avg_duration_ms: 200.0,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LambdaCostBreakdown {
    pub request_cost: f64,
    pub compute_cost: f64,
    pub total_cost: f64,
}

/// Billed GB-seconds for a month of invocations
pub fn gb_seconds(config: &LambdaConfig) -> f64 {
    (config.memory_mb / 1024.0) * (config.avg_duration_ms / 1000.0) * config.monthly_invocations
}

pub fn calculate_lambda_costs(config: &LambdaConfig) -> LambdaCostBreakdown {
    let request_cost = (config.monthly_invocations / 1_000_000.0) * REQUEST_PRICE_PER_MILLION;

    let price_per_gb_second = architecture_metadata(config.architecture).price_per_gb_second;
    let compute_cost = gb_seconds(config) * price_per_gb_second;

    let total_cost = request_cost + compute_cost;

    LambdaCostBreakdown {
        request_cost,
        compute_cost,
        total_cost,
    }
}
