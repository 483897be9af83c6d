//! S3 storage cost calculator
//!
//! Storage is priced per GB-month by tier, preferring the pricing snapshot
//! and falling back to fixed list prices. Requests are priced per request in
//! two classes (standard and glacier). Data transfer out uses a volume-break
//! schedule where the whole volume is billed at the bracket price that
//! contains it.

use crate::error::CostError;
use crate::pricing::PricingDataSet;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use tracing::debug;

/// S3 storage class
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum S3StorageTier {
    Standard,
    StandardIa,
    OnezoneIa,
    GlacierInstant,
    GlacierFlexible,
    GlacierDeep,
}

/// Descriptive data shown alongside a tier
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct S3TierMetadata {
    pub name: &'static str,
    pub description: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub min_storage_days: Option<u32>,
    /// Minimum billable object size in KB
    #[serde(skip_serializing_if = "Option::is_none")]
    pub min_object_size: Option<u32>,
}

impl S3StorageTier {
    pub const ALL: [S3StorageTier; 6] = [
        S3StorageTier::Standard,
        S3StorageTier::StandardIa,
        S3StorageTier::OnezoneIa,
        S3StorageTier::GlacierInstant,
        S3StorageTier::GlacierFlexible,
        S3StorageTier::GlacierDeep,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            S3StorageTier::Standard => "STANDARD",
            S3StorageTier::StandardIa => "STANDARD_IA",
            S3StorageTier::OnezoneIa => "ONEZONE_IA",
            S3StorageTier::GlacierInstant => "GLACIER_INSTANT",
            S3StorageTier::GlacierFlexible => "GLACIER_FLEXIBLE",
            S3StorageTier::GlacierDeep => "GLACIER_DEEP",
        }
    }

    /// Usage-type aliases the price list uses for this tier, in lookup order
    pub fn usage_type_aliases(&self) -> &'static [&'static str] {
        match self {
            S3StorageTier::Standard => &["S3-Standard", "S3-Storage"],
            S3StorageTier::StandardIa => &["S3-StandardIA", "S3-SIA"],
            S3StorageTier::OnezoneIa => &["S3-OneZone-IA", "S3-OZ-IA"],
            S3StorageTier::GlacierInstant => &["S3-Glacier-Instant", "S3-GIR"],
            S3StorageTier::GlacierFlexible => &["S3-Glacier-Flexible", "S3-Glacier"],
            S3StorageTier::GlacierDeep => &["S3-Glacier-Deep", "S3-GDA"],
        }
    }

    /// List price per GB-month used when the snapshot has nothing usable
    pub fn fallback_storage_price(&self) -> f64 {
        match self {
            S3StorageTier::Standard => 0.023,
            S3StorageTier::StandardIa => 0.0125,
            S3StorageTier::OnezoneIa => 0.01,
            S3StorageTier::GlacierInstant => 0.004,
            S3StorageTier::GlacierFlexible => 0.0036,
            S3StorageTier::GlacierDeep => 0.00099,
        }
    }

    /// Price per PUT/COPY/POST/LIST request
    pub fn put_request_price(&self) -> f64 {
        match self {
            S3StorageTier::Standard | S3StorageTier::StandardIa | S3StorageTier::OnezoneIa => {
                0.005 / 1000.0
            }
            S3StorageTier::GlacierInstant
            | S3StorageTier::GlacierFlexible
            | S3StorageTier::GlacierDeep => 0.02 / 1000.0,
        }
    }

    /// Price per GET/SELECT request
    pub fn get_request_price(&self) -> f64 {
        match self {
            S3StorageTier::Standard => 0.0004 / 1000.0,
            S3StorageTier::StandardIa | S3StorageTier::OnezoneIa => 0.001 / 1000.0,
            S3StorageTier::GlacierInstant => 0.01 / 1000.0,
            S3StorageTier::GlacierFlexible | S3StorageTier::GlacierDeep => 0.0004 / 1000.0,
        }
    }

    pub fn metadata(&self) -> S3TierMetadata {
        match self {
            S3StorageTier::Standard => S3TierMetadata {
                name: "S3 Standard",
                description: "General purpose storage for frequently accessed data",
                min_storage_days: None,
                min_object_size: None,
            },
            S3StorageTier::StandardIa => S3TierMetadata {
                name: "S3 Standard-IA",
                description: "Infrequently accessed data with rapid access",
                min_storage_days: Some(30),
                min_object_size: Some(128),
            },
            S3StorageTier::OnezoneIa => S3TierMetadata {
                name: "S3 One Zone-IA",
                description: "Lower-cost option for infrequently accessed data in a single AZ",
                min_storage_days: Some(30),
                min_object_size: Some(128),
            },
            S3StorageTier::GlacierInstant => S3TierMetadata {
                name: "S3 Glacier Instant Retrieval",
                description: "Archive data with instant retrieval",
                min_storage_days: Some(90),
                min_object_size: Some(128),
            },
            S3StorageTier::GlacierFlexible => S3TierMetadata {
                name: "S3 Glacier Flexible Retrieval",
                description: "Archive data with minutes-to-hours retrieval",
                min_storage_days: Some(90),
                min_object_size: None,
            },
            S3StorageTier::GlacierDeep => S3TierMetadata {
                name: "S3 Glacier Deep Archive",
                description: "Lowest-cost storage for long-term archive",
                min_storage_days: Some(180),
                min_object_size: None,
            },
        }
    }
}

impl fmt::Display for S3StorageTier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for S3StorageTier {
    type Err = CostError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized = s.trim().to_ascii_uppercase().replace('-', "_");
        S3StorageTier::ALL
            .into_iter()
            .find(|tier| tier.as_str() == normalized)
            .ok_or_else(|| {
                CostError::validation(
                    "tier",
                    format!(
                        "Unknown storage tier: {}. Use one of STANDARD, STANDARD_IA, ONEZONE_IA, GLACIER_INSTANT, GLACIER_FLEXIBLE, GLACIER_DEEP",
                        s
                    ),
                )
            })
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct S3StorageConfig {
    pub tier: S3StorageTier,
    #[serde(rename = "storageGB")]
    pub storage_gb: f64,
    #[serde(rename = "putRequests")]
    pub put_requests: f64,
    #[serde(rename = "getRequests")]
    pub get_requests: f64,
    #[serde(rename = "dataTransferGB")]
    pub data_transfer_gb: f64,
}

impl Default for S3StorageConfig {
    fn default() -> Self {
        Self {
            tier: S3StorageTier::Standard,
            storage_gb: 100.0,
            put_requests: 10_000.0,
            get_requests: 100_000.0,
            data_transfer_gb: 50.0,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct S3CostBreakdown {
    pub storage_cost: f64,
    pub put_requests_cost: f64,
    pub get_requests_cost: f64,
    pub data_transfer_cost: f64,
    pub total_cost: f64,
}

/// Resolve the storage price per GB-month for a tier.
///
/// Each alias is tried as `TimedStorage-<alias>` against the snapshot; the
/// first strictly positive price wins. Otherwise the tier's list price.
pub fn storage_price_per_gb(tier: S3StorageTier, pricing: Option<&PricingDataSet>) -> f64 {
    if let Some(pricing) = pricing {
        for alias in tier.usage_type_aliases() {
            let usage_type = format!("TimedStorage-{}", alias);
            if let Some(price) = pricing.find_price(&usage_type, None) {
                if price > 0.0 {
                    debug!("S3 {} storage price from snapshot ({}): {}", tier, usage_type, price);
                    return price;
                }
            }
        }
    }

    let fallback = tier.fallback_storage_price();
    debug!("S3 {} storage price from fallback table: {}", tier, fallback);
    fallback
}

/// Price per GB for transferring `gb` out to the internet.
///
/// Not marginal: the bracket containing the total volume prices all of it.
pub fn data_transfer_price_per_gb(gb: f64) -> f64 {
    if gb <= 0.0 {
        0.0
    } else if gb <= 10_240.0 {
        0.09
    } else if gb <= 51_200.0 {
        0.085
    } else if gb <= 153_600.0 {
        0.07
    } else {
        0.05
    }
}

pub fn calculate_s3_costs(
    config: &S3StorageConfig,
    pricing: Option<&PricingDataSet>,
) -> S3CostBreakdown {
    let storage_price = storage_price_per_gb(config.tier, pricing);
    let put_price = config.tier.put_request_price();
    let get_price = config.tier.get_request_price();

    let storage_cost = config.storage_gb * storage_price;
    let put_requests_cost = config.put_requests * put_price;
    let get_requests_cost = config.get_requests * get_price;

    let data_transfer_price = data_transfer_price_per_gb(config.data_transfer_gb);
    let data_transfer_cost = config.data_transfer_gb * data_transfer_price;

    let total_cost = storage_cost + put_requests_cost + get_requests_cost + data_transfer_cost;

    S3CostBreakdown {
        storage_cost,
        put_requests_cost,
        get_requests_cost,
        data_transfer_cost,
        total_cost,
    }
}
