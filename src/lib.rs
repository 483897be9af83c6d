//! awscost library
//!
//! Monthly cost estimates for S3, Aurora, Lambda and ECS Fargate, a
//! service-neutral breakdown shape and a two-way comparison on top of it.
//! The `awscost` binary is a thin CLI over this crate.

pub mod breakdown;
pub mod comparison;
pub mod config;
pub mod error;
pub mod estimate;
pub mod exit_codes;
pub mod pricing;
pub mod report;
pub mod services;
pub mod utils;
pub mod validation;

// Re-export commonly used types
pub use breakdown::{CostBreakdownItem, GenericCostBreakdown};
pub use comparison::{compare, CheaperOption, ComparisonResult};
pub use error::{CostError, Result};
pub use pricing::PricingDataSet;
pub use services::{
    calculate_aurora_costs, calculate_ecs_costs, calculate_lambda_costs, calculate_s3_costs,
    Architecture, AuroraConfig, EcsConfig, LambdaConfig, S3StorageConfig, S3StorageTier, Service,
    ServiceConfig,
};
