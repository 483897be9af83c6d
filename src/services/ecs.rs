//! ECS Fargate cost calculator

use super::{Architecture, HOURS_PER_MONTH};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct EcsArchitectureMetadata {
    pub name: &'static str,
    pub description: &'static str,
    #[serde(rename = "pricePerVCPUHour")]
    pub price_per_vcpu_hour: f64,
    #[serde(rename = "pricePerGBHour")]
    pub price_per_gb_hour: f64,
}

const X86_METADATA: EcsArchitectureMetadata = EcsArchitectureMetadata {
    name: "x86_64",
    description: "Standard x86 architecture",
    price_per_vcpu_hour: 0.04048,
    price_per_gb_hour: 0.004445,
};

const ARM_METADATA: EcsArchitectureMetadata = EcsArchitectureMetadata {
    name: "ARM Graviton2",
    description: "ARM-based architecture (~20% cheaper)",
    price_per_vcpu_hour: 0.03238,
    price_per_gb_hour: 0.003556,
};

pub fn architecture_metadata(architecture: Architecture) -> &'static EcsArchitectureMetadata {
    match architecture {
        Architecture::X86 => &X86_METADATA,
        Architecture::Arm => &ARM_METADATA,
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct EcsVcpuTier {
    #[serde(rename = "vCPU")]
    pub vcpu: f64,
    pub description: &'static str,
}

pub const VCPU_TIERS: [EcsVcpuTier; 6] = [
    EcsVcpuTier { vcpu: 0.25, description: "Minimal (0.25 vCPU)" },
    EcsVcpuTier { vcpu: 0.5, description: "Light (0.5 vCPU)" },
    EcsVcpuTier { vcpu: 1.0, description: "Standard (1 vCPU)" },
    EcsVcpuTier { vcpu: 2.0, description: "Medium (2 vCPU)" },
    EcsVcpuTier { vcpu: 4.0, description: "High (4 vCPU)" },
    EcsVcpuTier { vcpu: 8.0, description: "Very High (8 vCPU)" },
];

/// Memory Fargate accepts for a given task size
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct EcsMemoryRange {
    #[serde(rename = "minGB")]
    pub min_gb: f64,
    #[serde(rename = "maxGB")]
    pub max_gb: f64,
}

const MEMORY_RANGES: [(f64, EcsMemoryRange); 7] = [
    (0.25, EcsMemoryRange { min_gb: 0.5, max_gb: 2.0 }),
    (0.5, EcsMemoryRange { min_gb: 1.0, max_gb: 4.0 }),
    (1.0, EcsMemoryRange { min_gb: 2.0, max_gb: 8.0 }),
    (2.0, EcsMemoryRange { min_gb: 4.0, max_gb: 16.0 }),
    (4.0, EcsMemoryRange { min_gb: 8.0, max_gb: 30.0 }),
    (8.0, EcsMemoryRange { min_gb: 16.0, max_gb: 60.0 }),
    (16.0, EcsMemoryRange { min_gb: 32.0, max_gb: 120.0 }),
];

/// Valid memory range for a task size, `None` for non-standard vCPU values
pub fn memory_range(vcpu: f64) -> Option<EcsMemoryRange> {
    MEMORY_RANGES
        .iter()
        .find(|(size, _)| *size == vcpu)
        .map(|(_, range)| *range)
}

/// Pull `memory_gb` into the range allowed for `vcpu`.
///
/// Non-standard vCPU values leave the memory untouched.
pub fn clamp_memory_to_vcpu(vcpu: f64, memory_gb: f64) -> f64 {
    match memory_range(vcpu) {
        Some(range) => memory_gb.min(range.max_gb).max(range.min_gb),
        None => memory_gb,
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EcsConfig {
    pub architecture: Architecture,
    #[serde(rename = "vCPU")]
    pub vcpu: f64,
    #[serde(rename = "memoryGB")]
    pub memory_gb: f64,
    #[serde(rename = "monthlyHours")]
    pub monthly_hours: f64,
}

impl Default for EcsConfig {
    fn default() -> Self {
        Self {
            architecture: Architecture::X86,
            vcpu: 1.0,
            memory_gb: 2.0,
            monthly_hours: HOURS_PER_MONTH,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EcsCostBreakdown {
    pub cpu_cost: f64,
    pub memory_cost: f64,
    pub total_cost: f64,
}

pub fn calculate_ecs_costs(config: &EcsConfig) -> EcsCostBreakdown {
    let metadata = architecture_metadata(config.architecture);

    let cpu_cost = config.vcpu * metadata.price_per_vcpu_hour * config.monthly_hours;
    let memory_cost = config.memory_gb * metadata.price_per_gb_hour * config.monthly_hours;
    let total_cost = cpu_cost + memory_cost;

    EcsCostBreakdown {
        cpu_cost,
        memory_cost,
        total_cost,
    }
}
