//! Estimate and compare commands
//!
//! Builds configuration records from command-line flags (or the scenario
//! file), optionally validates them, runs the calculators and hands the
//! result to `report` for rendering.

use crate::breakdown::GenericCostBreakdown;
use crate::comparison::compare;
use crate::config::Config;
use crate::error::{CostError, Result};
use crate::pricing::PricingDataSet;
use crate::report::{self, OutputFormat};
use crate::services::aurora::{
    AuroraInstanceType, AuroraProvisionedConfig, AuroraServerlessV2Config,
};
use crate::services::lambda::gb_seconds;
use crate::services::{
    Architecture, AuroraConfig, EcsConfig, LambdaConfig, S3StorageConfig, S3StorageTier, Service,
    ServiceConfig,
};
use crate::utils::format_quantity;
use crate::validation;
use clap::{Args, Subcommand};
use serde_json::json;
use tracing::warn;

/// Shared settings for the estimate and compare commands
pub struct RunContext {
    pub pricing: Option<PricingDataSet>,
    pub output: OutputFormat,
    /// Refuse to estimate invalid input instead of warning
    pub strict: bool,
}

#[derive(Subcommand, Clone)]
pub enum EstimateCommands {
    /// Estimate S3 storage, requests and data transfer
    ///
    /// Examples:
    ///   awscost estimate s3 --tier STANDARD_IA --storage-gb 500
    ///   awscost estimate s3 --data-transfer-gb 20000 --output json
    S3(S3Args),
    /// Estimate an Aurora cluster (Serverless v2 or provisioned)
    ///
    /// Examples:
    ///   awscost estimate aurora --min-acu 0.5 --max-acu 4
    ///   awscost estimate aurora --instance-type db.r6g.xlarge --instance-count 2
    Aurora(AuroraArgs),
    /// Estimate a Lambda function
    ///
    /// Examples:
    ///   awscost estimate lambda --memory-mb 512 --invocations 3000000
    ///   awscost estimate lambda --architecture arm --avg-duration-ms 50
    Lambda(LambdaArgs),
    /// Estimate an ECS Fargate task
    ///
    /// Examples:
    ///   awscost estimate ecs --vcpu 2 --memory-gb 4
    ///   awscost estimate ecs --architecture arm --monthly-hours 200
    Ecs(EcsArgs),
}

#[derive(Args, Clone)]
pub struct S3Args {
    /// Storage class
    #[arg(long, default_value = "STANDARD")]
    pub tier: S3StorageTier,
    /// Average stored volume in GB
    #[arg(long, default_value_t = 100.0)]
    pub storage_gb: f64,
    /// PUT/COPY/POST/LIST requests per month
    #[arg(long, default_value_t = 10_000.0)]
    pub put_requests: f64,
    /// GET/SELECT requests per month
    #[arg(long, default_value_t = 100_000.0)]
    pub get_requests: f64,
    /// Data transferred out to the internet per month, in GB
    #[arg(long, default_value_t = 50.0)]
    pub data_transfer_gb: f64,
}

impl From<S3Args> for S3StorageConfig {
    fn from(args: S3Args) -> Self {
        Self {
            tier: args.tier,
            storage_gb: args.storage_gb,
            put_requests: args.put_requests,
            get_requests: args.get_requests,
            data_transfer_gb: args.data_transfer_gb,
        }
    }
}

#[derive(Args, Clone)]
pub struct AuroraArgs {
    /// Provisioned instance type; omit for Serverless v2
    #[arg(long, conflicts_with_all = ["min_acu", "max_acu"])]
    pub instance_type: Option<AuroraInstanceType>,
    /// Number of provisioned instances (writer plus readers)
    #[arg(long, default_value_t = 1.0, requires = "instance_type")]
    pub instance_count: f64,
    /// Serverless v2 minimum capacity
    #[arg(long)]
    pub min_acu: Option<f64>,
    /// Serverless v2 maximum capacity
    #[arg(long)]
    pub max_acu: Option<f64>,
    /// Cluster storage in GB
    #[arg(long, default_value_t = 100.0)]
    pub storage_gb: f64,
    /// I/O requests per month
    #[arg(long, default_value_t = 1_000_000.0)]
    pub io_requests: f64,
    /// Backup storage beyond the free allowance, in GB
    #[arg(long, default_value_t = 50.0)]
    pub backup_storage_gb: f64,
}

impl From<AuroraArgs> for AuroraConfig {
    fn from(args: AuroraArgs) -> Self {
        match args.instance_type {
            Some(instance_type) => AuroraConfig::Provisioned(AuroraProvisionedConfig {
                instance_type,
                instance_count: args.instance_count,
                storage_gb: args.storage_gb,
                io_requests: args.io_requests,
                backup_storage_gb: args.backup_storage_gb,
            }),
            None => {
                let defaults = AuroraServerlessV2Config::default();
                AuroraConfig::ServerlessV2(AuroraServerlessV2Config {
                    min_acu: args.min_acu.unwrap_or(defaults.min_acu),
                    max_acu: args.max_acu.unwrap_or(defaults.max_acu),
                    storage_gb: args.storage_gb,
                    io_requests: args.io_requests,
                    backup_storage_gb: args.backup_storage_gb,
                })
            }
        }
    }
}

#[derive(Args, Clone)]
pub struct LambdaArgs {
    /// CPU architecture (x86 or arm)
    #[arg(long, default_value = "x86")]
    pub architecture: Architecture,
    /// Memory allocated to the function, 128 to 10240 MB
    #[arg(long, default_value_t = 1024.0)]
    pub memory_mb: f64,
    /// Invocations per month
    #[arg(long, default_value_t = 1_000_000.0)]
    pub invocations: f64,
    /// Average billed duration per invocation
    #[arg(long, default_value_t = 200.0)]
    pub avg_duration_ms: f64,
}

impl From<LambdaArgs> for LambdaConfig {
    fn from(args: LambdaArgs) -> Self {
        Self {
            architecture: args.architecture,
            memory_mb: args.memory_mb,
            monthly_invocations: args.invocations,
            avg_duration_ms: args.avg_duration_ms,
        }
    }
}

#[derive(Args, Clone)]
pub struct EcsArgs {
    /// CPU architecture (x86 or arm)
    #[arg(long, default_value = "x86")]
    pub architecture: Architecture,
    /// Task vCPU
    #[arg(long, default_value_t = 1.0)]
    pub vcpu: f64,
    /// Task memory in GB
    #[arg(long, default_value_t = 2.0)]
    pub memory_gb: f64,
    /// Hours the task runs per month, 1 to 730
    #[arg(long, default_value_t = 730.0)]
    pub monthly_hours: f64,
}

impl From<EcsArgs> for EcsConfig {
    fn from(args: EcsArgs) -> Self {
        Self {
            architecture: args.architecture,
            vcpu: args.vcpu,
            memory_gb: args.memory_gb,
            monthly_hours: args.monthly_hours,
        }
    }
}

impl From<EstimateCommands> for ServiceConfig {
    fn from(cmd: EstimateCommands) -> Self {
        match cmd {
            EstimateCommands::S3(args) => ServiceConfig::S3(args.into()),
            EstimateCommands::Aurora(args) => ServiceConfig::Aurora(args.into()),
            EstimateCommands::Lambda(args) => ServiceConfig::Lambda(args.into()),
            EstimateCommands::Ecs(args) => ServiceConfig::Ecs(args.into()),
        }
    }
}

/// Validate according to the context: error when strict, one warning per
/// bad field otherwise
fn check(config: &ServiceConfig, label: &str, ctx: &RunContext) -> Result<()> {
    let Err(err) = validation::validate(config) else {
        return Ok(());
    };
    if ctx.strict {
        return Err(err);
    }
    match &err {
        CostError::InvalidInput(errors) => {
            for field in &errors.0 {
                warn!("{}: {} (estimating anyway)", label, field);
            }
        }
        other => warn!("{}: {} (estimating anyway)", label, other),
    }
    Ok(())
}

fn title_for(config: &ServiceConfig) -> String {
    match config {
        ServiceConfig::S3(c) => format!("{} estimate", c.tier.metadata().name),
        ServiceConfig::Aurora(c) => format!("Aurora {} estimate", c.deployment_name()),
        ServiceConfig::Lambda(c) => format!("Lambda ({}) estimate", c.architecture),
        ServiceConfig::Ecs(c) => format!("ECS Fargate ({}) estimate", c.architecture),
    }
}

/// Estimate with display extras that are not part of the projection
fn estimate_for_display(config: &ServiceConfig, pricing: Option<&PricingDataSet>) -> GenericCostBreakdown {
    let mut breakdown = config.estimate(pricing);
    if let ServiceConfig::Lambda(c) = config {
        if breakdown.items.len() > 1 {
            let item = breakdown.items.remove(1);
            let description = format!("{} GB-seconds", format_quantity(gb_seconds(c)));
            breakdown.items.insert(1, item.with_description(description));
        }
    }
    breakdown
}

pub fn handle_command(cmd: EstimateCommands, ctx: &RunContext) -> Result<()> {
    let config: ServiceConfig = cmd.into();
    check(&config, &config.service().to_string(), ctx)?;

    let breakdown = estimate_for_display(&config, ctx.pricing.as_ref());
    match ctx.output {
        OutputFormat::Json => {
            let value = json!({
                "service": config.service(),
                "config": config,
                "breakdown": breakdown,
            });
            println!("{}", serde_json::to_string_pretty(&value)?);
        }
        OutputFormat::Text => report::print_estimate(&title_for(&config), &breakdown),
    }
    Ok(())
}

/// Compare the two scenario configurations for `service`
pub fn compare_service(service: Service, config: &Config, ctx: &RunContext) -> Result<()> {
    let scenario = config.scenario(service);
    check(&scenario.first, &scenario.first_label, ctx)?;
    check(&scenario.second, &scenario.second_label, ctx)?;

    let first = estimate_for_display(&scenario.first, ctx.pricing.as_ref());
    let second = estimate_for_display(&scenario.second, ctx.pricing.as_ref());
    let result = compare(first, second);

    match ctx.output {
        OutputFormat::Json => {
            let value = json!({
                "service": service,
                "firstLabel": scenario.first_label,
                "secondLabel": scenario.second_label,
                "comparison": result,
            });
            println!("{}", serde_json::to_string_pretty(&value)?);
        }
        OutputFormat::Text => report::print_comparison(
            service.title(),
            &result,
            &scenario.first_label,
            &scenario.second_label,
        ),
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ctx(strict: bool) -> RunContext {
        RunContext {
            pricing: None,
            output: OutputFormat::Json,
            strict,
        }
    }

    #[test]
    fn test_aurora_args_without_instance_is_serverless() {
        let args = AuroraArgs {
            instance_type: None,
            instance_count: 1.0,
            min_acu: Some(1.0),
            max_acu: None,
            storage_gb: 10.0,
            io_requests: 0.0,
            backup_storage_gb: 0.0,
        };
        match AuroraConfig::from(args) {
            AuroraConfig::ServerlessV2(c) => {
                assert_eq!(c.min_acu, 1.0);
                assert_eq!(c.max_acu, 2.0);
            }
            AuroraConfig::Provisioned(_) => panic!("expected serverless"),
        }
    }

    #[test]
    fn test_aurora_args_with_instance_is_provisioned() {
        let args = AuroraArgs {
            instance_type: Some(AuroraInstanceType::R6g8xlarge),
            instance_count: 2.0,
            min_acu: None,
            max_acu: None,
            storage_gb: 10.0,
            io_requests: 0.0,
            backup_storage_gb: 0.0,
        };
        assert!(matches!(AuroraConfig::from(args), AuroraConfig::Provisioned(c) if c.instance_count == 2.0));
    }

    #[test]
    fn test_lambda_display_adds_gb_seconds() {
        let config = ServiceConfig::Lambda(LambdaConfig::default());
        let breakdown = estimate_for_display(&config, None);
        assert_eq!(breakdown.items[1].description.as_deref(), Some("200,000 GB-seconds"));
        assert_eq!(breakdown.total, config.estimate(None).total);
    }

    #[test]
    fn test_strict_rejects_invalid_input() {
        let config = ServiceConfig::Ecs(EcsConfig {
            monthly_hours: 1000.0,
            ..EcsConfig::default()
        });
        assert!(check(&config, "ecs", &ctx(false)).is_ok());
        assert!(matches!(
            check(&config, "ecs", &ctx(true)),
            Err(CostError::InvalidInput(_))
        ));
    }

    #[test]
    fn test_strict_reports_every_bad_field() {
        let config = ServiceConfig::S3(S3StorageConfig {
            storage_gb: -1.0,
            put_requests: -1.0,
            get_requests: -1.0,
            data_transfer_gb: -1.0,
            ..S3StorageConfig::default()
        });
        assert!(check(&config, "s3", &ctx(false)).is_ok());
        match check(&config, "s3", &ctx(true)) {
            Err(CostError::InvalidInput(errors)) => assert_eq!(errors.0.len(), 4),
            other => panic!("expected invalid input, got {:?}", other),
        }
    }

    #[test]
    fn test_titles() {
        let config = ServiceConfig::S3(S3StorageConfig::default());
        assert_eq!(title_for(&config), "S3 Standard estimate");
        let config = ServiceConfig::Lambda(LambdaConfig::default());
        assert_eq!(title_for(&config), "Lambda (x86) estimate");
    }
}
