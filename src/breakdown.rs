//! Service-neutral view of a cost breakdown
//!
//! Every service breakdown converts into a `GenericCostBreakdown`: an
//! ordered list of labelled costs and a total copied verbatim from the
//! source. Rendering and comparison work on this type only.

use crate::services::{AuroraCostBreakdown, EcsCostBreakdown, LambdaCostBreakdown, S3CostBreakdown};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CostBreakdownItem {
    pub label: String,
    pub cost: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

impl CostBreakdownItem {
    pub fn new(label: impl Into<String>, cost: f64) -> Self {
        Self {
            label: label.into(),
            cost,
            description: None,
        }
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GenericCostBreakdown {
    pub items: Vec<CostBreakdownItem>,
    pub total: f64,
}

impl GenericCostBreakdown {
    /// Largest single item, used to scale bars in text output.
    ///
    /// 0.0 when there are no items or none costs anything.
    pub fn max_item_cost(&self) -> f64 {
        self.items.iter().map(|item| item.cost).fold(0.0, f64::max)
    }

    /// Sum of the items, independent of the stored total
    pub fn items_sum(&self) -> f64 {
        self.items.iter().map(|item| item.cost).sum()
    }
}

impl From<&S3CostBreakdown> for GenericCostBreakdown {
    fn from(breakdown: &S3CostBreakdown) -> Self {
        Self {
            items: vec![
                CostBreakdownItem::new("Storage", breakdown.storage_cost),
                CostBreakdownItem::new("PUT Requests", breakdown.put_requests_cost),
                CostBreakdownItem::new("GET Requests", breakdown.get_requests_cost),
                CostBreakdownItem::new("Data Transfer", breakdown.data_transfer_cost),
            ],
            total: breakdown.total_cost,
        }
    }
}

impl From<&AuroraCostBreakdown> for GenericCostBreakdown {
    fn from(breakdown: &AuroraCostBreakdown) -> Self {
        Self {
            items: vec![
                CostBreakdownItem::new("Compute", breakdown.compute_cost),
                CostBreakdownItem::new("Storage", breakdown.storage_cost),
                CostBreakdownItem::new("I/O Requests", breakdown.io_cost),
                CostBreakdownItem::new("Backup Storage", breakdown.backup_cost),
            ],
            total: breakdown.total_cost,
        }
    }
}

impl From<&LambdaCostBreakdown> for GenericCostBreakdown {
    fn from(breakdown: &LambdaCostBreakdown) -> Self {
        Self {
            items: vec![
                CostBreakdownItem::new("Lambda Requests", breakdown.request_cost),
                CostBreakdownItem::new("Compute Duration (GB-seconds)", breakdown.compute_cost),
            ],
            total: breakdown.total_cost,
        }
    }
}

impl From<&EcsCostBreakdown> for GenericCostBreakdown {
    fn from(breakdown: &EcsCostBreakdown) -> Self {
        Self {
            items: vec![
                CostBreakdownItem::new("vCPU Cost", breakdown.cpu_cost),
                CostBreakdownItem::new("Memory Cost", breakdown.memory_cost),
            ],
            total: breakdown.total_cost,
        }
    }
}
