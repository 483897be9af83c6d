//! Pricing snapshot
//!
//! A snapshot is a JSON file of simplified AWS Price List entries. Only the
//! S3 calculator reads it, and only for per-GB storage prices; every lookup
//! that misses falls back to the fixed tables in `services`.
//!
//! ## Module Organization
//!
//! - this module: the snapshot types, loading/saving and price lookup
//! - `import`: turning a raw Price List dump into snapshot entries
//!
//! Snapshots are produced offline from a `aws pricing get-products` dump;
//! nothing here talks to AWS.

pub mod import;

use crate::error::{CostError, Result};
use crate::utils::ensure_parent_dir;
use chrono::{DateTime, Utc};
use clap::Subcommand;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use tracing::{debug, info};

pub use import::{simplify_price_list, PricingService};

/// Default location of the snapshot, relative to the working directory
pub const DEFAULT_SNAPSHOT_PATH: &str = "data/pricing/aws-pricing.json";

/// One price dimension of one product
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SimplifiedPricing {
    #[serde(default)]
    pub service: String,
    #[serde(default)]
    pub region: String,
    #[serde(default)]
    pub product_family: String,
    #[serde(default)]
    pub description: String,
    /// Kept as the string AWS returns, e.g. "0.0230000000"
    pub price_per_unit: String,
    #[serde(default)]
    pub unit: String,
    #[serde(default = "default_currency")]
    pub currency: String,
    #[serde(default)]
    pub attributes: BTreeMap<String, String>,
    #[serde(default)]
    pub last_updated: Option<DateTime<Utc>>,
}

fn default_currency() -> String {
    "USD".to_string()
}

impl SimplifiedPricing {
    /// Minimal S3 entry keyed by usage type (and optionally operation)
    pub fn for_usage_type(usage_type: &str, operation: Option<&str>, price_per_unit: &str) -> Self {
        let mut attributes = BTreeMap::new();
        attributes.insert("usagetype".to_string(), usage_type.to_string());
        if let Some(op) = operation {
            attributes.insert("operation".to_string(), op.to_string());
        }
        Self {
            service: "S3".to_string(),
            region: String::new(),
            product_family: String::new(),
            description: usage_type.to_string(),
            price_per_unit: price_per_unit.to_string(),
            unit: String::new(),
            currency: default_currency(),
            attributes,
            last_updated: None,
        }
    }

    pub fn usage_type(&self) -> Option<&str> {
        self.attributes.get("usagetype").map(String::as_str)
    }

    pub fn operation(&self) -> Option<&str> {
        self.attributes.get("operation").map(String::as_str)
    }

    /// Price as a number; `None` when AWS sent something unparsable
    pub fn price(&self) -> Option<f64> {
        self.price_per_unit.trim().parse::<f64>().ok().filter(|p| p.is_finite())
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PricingMetadata {
    pub last_updated: Option<DateTime<Utc>>,
    #[serde(default)]
    pub services: Vec<String>,
    #[serde(default)]
    pub regions: Vec<String>,
}

/// The whole snapshot file
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PricingDataSet {
    #[serde(default)]
    pub metadata: PricingMetadata,
    #[serde(default)]
    pub s3: Vec<SimplifiedPricing>,
    #[serde(default)]
    pub rds: Vec<SimplifiedPricing>,
}

impl PricingDataSet {
    /// Assemble a snapshot, filling metadata from the entries
    pub fn new(s3: Vec<SimplifiedPricing>, rds: Vec<SimplifiedPricing>, now: DateTime<Utc>) -> Self {
        let mut data = Self {
            metadata: PricingMetadata::default(),
            s3,
            rds,
        };
        data.refresh_metadata(now);
        data
    }

    /// Recompute services and regions after entries changed
    pub fn refresh_metadata(&mut self, now: DateTime<Utc>) {
        let mut services = Vec::new();
        if !self.s3.is_empty() {
            services.push(PricingService::S3.label().to_string());
        }
        if !self.rds.is_empty() {
            services.push(PricingService::Rds.label().to_string());
        }

        let mut regions: Vec<String> = self
            .s3
            .iter()
            .chain(self.rds.iter())
            .map(|item| item.region.clone())
            .collect();
        regions.sort();
        regions.dedup();

        self.metadata = PricingMetadata {
            last_updated: Some(now),
            services,
            regions,
        };
    }

    pub fn is_empty(&self) -> bool {
        self.s3.is_empty() && self.rds.is_empty()
    }

    /// First S3 entry whose usage type contains `usage_type` and, when
    /// given, whose operation equals `operation`.
    pub fn find_item(&self, usage_type: &str, operation: Option<&str>) -> Option<&SimplifiedPricing> {
        self.s3.iter().find(|item| {
            let matches_usage = item.usage_type().is_some_and(|u| u.contains(usage_type));
            let matches_op = operation.map_or(true, |op| item.operation() == Some(op));
            matches_usage && matches_op
        })
    }

    /// Price of the first matching entry, `None` on a miss or unparsable price
    pub fn find_price(&self, usage_type: &str, operation: Option<&str>) -> Option<f64> {
        let item = self.find_item(usage_type, operation)?;
        let price = item.price();
        if price.is_none() {
            debug!(
                "Unparsable price '{}' for usage type {}",
                item.price_per_unit, usage_type
            );
        }
        price
    }

    /// Load a snapshot file.
    ///
    /// A missing file is not an error: it yields `Ok(None)` so callers fall
    /// back to fixed prices. A file that exists but cannot be parsed is.
    pub fn load(path: &Path) -> Result<Option<Self>> {
        if !path.exists() {
            debug!("No pricing snapshot at {}, using fallback prices", path.display());
            return Ok(None);
        }

        let content = std::fs::read_to_string(path)?;
        let data: PricingDataSet = serde_json::from_str(&content).map_err(|e| {
            CostError::Pricing(format!(
                "Failed to parse pricing snapshot {}: {}",
                path.display(),
                e
            ))
        })?;

        debug!(
            "Loaded pricing snapshot {} ({} S3 items, {} RDS items)",
            path.display(),
            data.s3.len(),
            data.rds.len()
        );
        Ok(Some(data))
    }

    pub fn save(&self, path: &Path) -> Result<()> {
        ensure_parent_dir(path)?;
        let content = serde_json::to_string_pretty(self)?;
        std::fs::write(path, content)?;
        Ok(())
    }
}

#[derive(Subcommand, Clone)]
pub enum PricingCommands {
    /// Convert a raw AWS Price List dump into the pricing snapshot
    ///
    /// The input is the JSON printed by `aws pricing get-products`
    /// (an object with a `PriceList` array) or a bare array of products.
    /// Entries for the other service already in the snapshot are kept.
    ///
    /// Examples:
    ///   awscost pricing import --service s3 --input s3-products.json
    ///   awscost pricing import --service rds --input rds.json --output prices.json
    Import {
        /// Raw price list file
        #[arg(short, long)]
        input: PathBuf,
        /// Which service the dump belongs to
        #[arg(long, value_enum)]
        service: PricingService,
        /// Snapshot to write (defaults to the configured snapshot path)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
    /// Show snapshot entries, optionally filtered like the S3 calculator does
    Show {
        /// Substring of the usage type
        #[arg(long)]
        usage_type: Option<String>,
        /// Exact operation name
        #[arg(long)]
        operation: Option<String>,
    },
}

/// Read, simplify and merge a raw dump into the snapshot at `output`
pub fn import_price_list(
    input: &Path,
    service: PricingService,
    output: &Path,
    now: DateTime<Utc>,
) -> Result<PricingDataSet> {
    let raw = std::fs::read_to_string(input)?;
    let raw: serde_json::Value = serde_json::from_str(&raw)?;
    let items = simplify_price_list(&raw, service, now)?;
    info!(
        "Simplified {} {} pricing items ({})",
        items.len(),
        service.label(),
        service.service_code()
    );

    let mut data = PricingDataSet::load(output)?.unwrap_or_default();
    match service {
        PricingService::S3 => data.s3 = items,
        PricingService::Rds => data.rds = items,
    }
    data.refresh_metadata(now);
    data.save(output)?;
    Ok(data)
}

pub fn handle_command(
    cmd: PricingCommands,
    snapshot_path: &Path,
    output_format: crate::report::OutputFormat,
) -> Result<()> {
    use crate::report::OutputFormat;

    match cmd {
        PricingCommands::Import {
            input,
            service,
            output,
        } => {
            let output = output.unwrap_or_else(|| snapshot_path.to_path_buf());
            let data = import_price_list(&input, service, &output, Utc::now())?;
            match output_format {
                OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&data.metadata)?),
                OutputFormat::Text => {
                    println!("Pricing data saved to {}", output.display());
                    println!("Total items: {}", data.s3.len() + data.rds.len());
                }
            }
        }
        PricingCommands::Show {
            usage_type,
            operation,
        } => {
            let data = PricingDataSet::load(snapshot_path)?.ok_or_else(|| {
                CostError::Pricing(format!(
                    "No pricing snapshot at {}. Run 'awscost pricing import' first",
                    snapshot_path.display()
                ))
            })?;
            let items: Vec<&SimplifiedPricing> = data
                .s3
                .iter()
                .filter(|item| {
                    let usage_ok = usage_type
                        .as_deref()
                        .map_or(true, |u| item.usage_type().is_some_and(|t| t.contains(u)));
                    let op_ok = operation.as_deref().map_or(true, |op| item.operation() == Some(op));
                    usage_ok && op_ok
                })
                .collect();
            match output_format {
                OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&items)?),
                OutputFormat::Text => println!("{}", crate::report::pricing_table(&items)),
            }
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn sample() -> PricingDataSet {
        let mut data = PricingDataSet::default();
        data.s3.push(SimplifiedPricing::for_usage_type(
            "EU-Requests-Tier1",
            Some("PutObject"),
            "0.0000050000",
        ));
        data.s3.push(SimplifiedPricing::for_usage_type(
            "EU-Requests-Tier1",
            Some("CopyObject"),
            "0.0000060000",
        ));
        data.s3.push(SimplifiedPricing::for_usage_type(
            "EU-TimedStorage-ByteHrs",
            None,
            "0.0230000000",
        ));
        data
    }

    #[test]
    fn test_find_price_substring_match() {
        let data = sample();
        assert_eq!(data.find_price("TimedStorage", None), Some(0.023));
        assert_eq!(data.find_price("Glacier", None), None);
    }

    #[test]
    fn test_find_price_operation_filter() {
        let data = sample();
        assert_eq!(data.find_price("Requests-Tier1", None), Some(0.000005));
        assert_eq!(data.find_price("Requests-Tier1", Some("CopyObject")), Some(0.000006));
        assert_eq!(data.find_price("Requests-Tier1", Some("GetObject")), None);
    }

    #[test]
    fn test_entries_without_usage_type_never_match() {
        let mut data = PricingDataSet::default();
        let mut item = SimplifiedPricing::for_usage_type("x", None, "1.0");
        item.attributes.clear();
        data.s3.push(item);
        assert_eq!(data.find_price("", None), None);
    }

    #[test]
    fn test_load_missing_file_is_none() {
        let temp_dir = TempDir::new().unwrap();
        let loaded = PricingDataSet::load(&temp_dir.path().join("missing.json")).unwrap();
        assert!(loaded.is_none());
    }

    #[test]
    fn test_load_malformed_file_errors() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("bad.json");
        std::fs::write(&path, "{ not json").unwrap();
        let result = PricingDataSet::load(&path);
        assert!(matches!(result, Err(CostError::Pricing(_))));
    }

    #[test]
    fn test_load_minimal_snapshot_shape() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("aws-pricing.json");
        std::fs::write(
            &path,
            r#"{
              "metadata": {"lastUpdated": "2025-01-01T00:00:00.000Z", "services": ["S3"], "regions": ["EU (Ireland)"]},
              "s3": [{
                "service": "S3", "region": "EU (Ireland)", "productFamily": "Storage",
                "description": "$0.023 per GB - first 50 TB / month of storage used",
                "pricePerUnit": "0.0230000000", "unit": "GB-Mo", "currency": "USD",
                "attributes": {"usagetype": "EU-TimedStorage-ByteHrs", "location": "EU (Ireland)"},
                "lastUpdated": "2025-01-01T00:00:00.000Z"
              }],
              "rds": []
            }"#,
        )
        .unwrap();

        let data = PricingDataSet::load(&path).unwrap().unwrap();
        assert_eq!(data.s3.len(), 1);
        assert_eq!(data.metadata.regions, vec!["EU (Ireland)".to_string()]);
        assert_eq!(data.find_price("TimedStorage-ByteHrs", None), Some(0.023));
    }

    #[test]
    fn test_save_and_load_roundtrip() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("nested").join("pricing.json");
        let data = sample();
        data.save(&path).unwrap();
        let loaded = PricingDataSet::load(&path).unwrap().unwrap();
        assert_eq!(loaded, data);
    }

    #[test]
    fn test_refresh_metadata() {
        let mut item = SimplifiedPricing::for_usage_type("a", None, "1");
        item.region = "US East (N. Virginia)".to_string();
        let mut other = item.clone();
        other.region = "EU (Ireland)".to_string();
        let data = PricingDataSet::new(vec![item.clone(), other, item], vec![], Utc::now());
        assert_eq!(data.metadata.services, vec!["S3".to_string()]);
        assert_eq!(
            data.metadata.regions,
            vec!["EU (Ireland)".to_string(), "US East (N. Virginia)".to_string()]
        );
    }
}
