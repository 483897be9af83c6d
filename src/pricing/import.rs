//! Raw AWS Price List simplification
//!
//! `aws pricing get-products` returns every product as a JSON *string*
//! inside a `PriceList` array. Each product carries its attributes and a
//! nested `terms.OnDemand.<offer>.priceDimensions.<rate>` tree; every rate
//! becomes one flat `SimplifiedPricing` entry. Reserved terms are ignored.

use super::SimplifiedPricing;
use crate::error::{CostError, Result};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;
use tracing::debug;

/// Services a price list dump can belong to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum PricingService {
    S3,
    Rds,
}

impl PricingService {
    pub fn label(&self) -> &'static str {
        match self {
            PricingService::S3 => "S3",
            PricingService::Rds => "RDS Aurora",
        }
    }

    /// AWS service code for the Price List API
    pub fn service_code(&self) -> &'static str {
        match self {
            PricingService::S3 => "AmazonS3",
            PricingService::Rds => "AmazonRDS",
        }
    }

    /// Attribute used as description when a rate has none
    fn description_attribute(&self) -> &'static str {
        match self {
            PricingService::S3 => "usagetype",
            PricingService::Rds => "instanceType",
        }
    }
}

impl fmt::Display for PricingService {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct PriceListProduct {
    product: Product,
    #[serde(default)]
    terms: Terms,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct Product {
    #[serde(default)]
    sku: String,
    #[serde(default)]
    product_family: String,
    #[serde(default)]
    attributes: BTreeMap<String, String>,
}

#[derive(Debug, Default, Deserialize)]
struct Terms {
    #[serde(rename = "OnDemand")]
    on_demand: Option<BTreeMap<String, PricingTerm>>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct PricingTerm {
    #[serde(default)]
    price_dimensions: BTreeMap<String, PricingDimension>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct PricingDimension {
    #[serde(default)]
    unit: String,
    price_per_unit: PricePerUnit,
    #[serde(default)]
    description: Option<String>,
}

#[derive(Debug, Deserialize)]
struct PricePerUnit {
    #[serde(rename = "USD")]
    usd: String,
}

/// Pull the product list out of a dump.
///
/// Accepts `{"PriceList": [...]}` or a bare array; elements may be JSON
/// strings (as the API returns them) or already-decoded objects.
fn price_list_entries(raw: &serde_json::Value) -> Result<Vec<serde_json::Value>> {
    let list = match raw {
        serde_json::Value::Array(items) => items,
        serde_json::Value::Object(map) => match map.get("PriceList") {
            Some(serde_json::Value::Array(items)) => items,
            _ => {
                return Err(CostError::Pricing(
                    "Price list dump has no 'PriceList' array".to_string(),
                ))
            }
        },
        _ => {
            return Err(CostError::Pricing(
                "Price list dump must be an object or an array".to_string(),
            ))
        }
    };

    list.iter()
        .map(|entry| -> Result<serde_json::Value> {
            match entry {
                serde_json::Value::String(encoded) => Ok(serde_json::from_str(encoded)?),
                other => Ok(other.clone()),
            }
        })
        .collect()
}

/// Flatten a raw price list dump into snapshot entries
pub fn simplify_price_list(
    raw: &serde_json::Value,
    service: PricingService,
    now: DateTime<Utc>,
) -> Result<Vec<SimplifiedPricing>> {
    let entries = price_list_entries(raw)?;
    debug!("Price list dump has {} {} products", entries.len(), service);

    let mut simplified = Vec::new();
    for entry in entries {
        let data: PriceListProduct = serde_json::from_value(entry)?;
        let product = data.product;

        let Some(on_demand) = data.terms.on_demand else {
            debug!("Skipping {} product {} without OnDemand terms", service, product.sku);
            continue;
        };

        let region = product
            .attributes
            .get("location")
            .cloned()
            .unwrap_or_else(|| "Unknown".to_string());
        let fallback_description = product
            .attributes
            .get(service.description_attribute())
            .cloned()
            .unwrap_or_default();

        for term in on_demand.into_values() {
            for dimension in term.price_dimensions.into_values() {
                let description = dimension
                    .description
                    .filter(|d| !d.is_empty())
                    .unwrap_or_else(|| fallback_description.clone());
                simplified.push(SimplifiedPricing {
                    service: service.label().to_string(),
                    region: region.clone(),
                    product_family: product.product_family.clone(),
                    description,
                    price_per_unit: dimension.price_per_unit.usd,
                    unit: dimension.unit,
                    currency: "USD".to_string(),
                    attributes: product.attributes.clone(),
                    last_updated: Some(now),
                });
            }
        }
    }

    Ok(simplified)
}
