//! Input validation utilities
//!
//! The calculators accept any number and simply produce the matching
//! (possibly negative or absurd) cost. These checks are for callers that
//! want to reject such input before estimating, the way the configuration
//! forms did. Each `validate_*` function reports every offending field,
//! at most one reason per field.

use crate::error::{CostError, Result};
use crate::services::aurora::{AuroraConfig, AuroraProvisionedConfig, AuroraServerlessV2Config};
use crate::services::ecs::{memory_range, EcsConfig};
use crate::services::lambda::{LambdaConfig, MAX_MEMORY_MB, MIN_MEMORY_MB};
use crate::services::{S3StorageConfig, ServiceConfig, HOURS_PER_MONTH};
use std::fmt;

/// Minimum ACU Aurora Serverless v2 can scale down to
pub const MIN_ACU: f64 = 0.5;

/// One rejected field
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldError {
    pub field: String,
    pub reason: String,
}

impl FieldError {
    fn new(field: &str, reason: impl Into<String>) -> Self {
        Self {
            field: field.to_string(),
            reason: reason.into(),
        }
    }
}

impl fmt::Display for FieldError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} - {}", self.field, self.reason)
    }
}

/// Every field error of one configuration
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ValidationErrors(pub Vec<FieldError>);

impl ValidationErrors {
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn fields(&self) -> Vec<&str> {
        self.0.iter().map(|e| e.field.as_str()).collect()
    }

    fn push(&mut self, error: Option<FieldError>) {
        self.0.extend(error);
    }

    fn into_result(self) -> Result<()> {
        if self.is_empty() {
            Ok(())
        } else {
            Err(CostError::InvalidInput(self))
        }
    }
}

impl fmt::Display for ValidationErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let parts: Vec<String> = self.0.iter().map(|e| e.to_string()).collect();
        f.write_str(&parts.join("; "))
    }
}

fn check_finite(field: &str, value: f64) -> Option<FieldError> {
    if value.is_finite() {
        None
    } else {
        Some(FieldError::new(
            field,
            format!("{} must be a finite number, got: {}", field, value),
        ))
    }
}

fn check_non_negative(field: &str, value: f64, what: &str) -> Option<FieldError> {
    check_finite(field, value).or_else(|| {
        (value < 0.0).then(|| FieldError::new(field, format!("{} cannot be negative", what)))
    })
}

fn check_shared_aurora(errors: &mut ValidationErrors, storage_gb: f64, io_requests: f64, backup_storage_gb: f64) {
    errors.push(check_non_negative("storageGB", storage_gb, "Storage"));
    errors.push(check_non_negative("ioRequests", io_requests, "I/O requests"));
    errors.push(check_non_negative("backupStorageGB", backup_storage_gb, "Backup storage"));
}

pub fn validate_s3(config: &S3StorageConfig) -> ValidationErrors {
    let mut errors = ValidationErrors::default();
    errors.push(check_non_negative("storageGB", config.storage_gb, "Storage"));
    errors.push(check_non_negative("putRequests", config.put_requests, "PUT requests"));
    errors.push(check_non_negative("getRequests", config.get_requests, "GET requests"));
    errors.push(check_non_negative("dataTransferGB", config.data_transfer_gb, "Data transfer"));
    errors
}

fn validate_serverless_v2(config: &AuroraServerlessV2Config, errors: &mut ValidationErrors) {
    let min_error = check_finite("minACU", config.min_acu).or_else(|| {
        (config.min_acu < MIN_ACU).then(|| FieldError::new("minACU", "Min ACU must be at least 0.5"))
    });
    let max_error = check_finite("maxACU", config.max_acu).or_else(|| {
        (config.max_acu < config.min_acu).then(|| {
            FieldError::new("maxACU", "Max ACU must be greater than or equal to Min ACU")
        })
    });
    errors.push(min_error);
    errors.push(max_error);
    check_shared_aurora(errors, config.storage_gb, config.io_requests, config.backup_storage_gb);
}

fn validate_provisioned(config: &AuroraProvisionedConfig, errors: &mut ValidationErrors) {
    let count_error = check_finite("instanceCount", config.instance_count).or_else(|| {
        (config.instance_count < 1.0)
            .then(|| FieldError::new("instanceCount", "Instance count must be at least 1"))
    });
    errors.push(count_error);
    check_shared_aurora(errors, config.storage_gb, config.io_requests, config.backup_storage_gb);
}

pub fn validate_aurora(config: &AuroraConfig) -> ValidationErrors {
    let mut errors = ValidationErrors::default();
    match config {
        AuroraConfig::ServerlessV2(c) => validate_serverless_v2(c, &mut errors),
        AuroraConfig::Provisioned(c) => validate_provisioned(c, &mut errors),
    }
    errors
}

pub fn validate_lambda(config: &LambdaConfig) -> ValidationErrors {
    let mut errors = ValidationErrors::default();
    errors.push(check_finite("memoryMB", config.memory_mb).or_else(|| {
        (config.memory_mb < MIN_MEMORY_MB || config.memory_mb > MAX_MEMORY_MB)
            .then(|| FieldError::new("memoryMB", "Memory must be between 128 MB and 10,240 MB"))
    }));
    errors.push(check_non_negative(
        "monthlyInvocations",
        config.monthly_invocations,
        "Monthly invocations",
    ));
    errors.push(check_non_negative("avgDurationMs", config.avg_duration_ms, "Duration"));
    errors
}

pub fn validate_ecs(config: &EcsConfig) -> ValidationErrors {
    let mut errors = ValidationErrors::default();
    errors.push(check_finite("vCPU", config.vcpu));

    let memory_error = check_finite("memoryGB", config.memory_gb).or_else(|| {
        let range = memory_range(config.vcpu)?;
        (config.memory_gb < range.min_gb || config.memory_gb > range.max_gb).then(|| {
            FieldError::new(
                "memoryGB",
                format!(
                    "Memory must be between {} GB and {} GB for {} vCPU",
                    range.min_gb, range.max_gb, config.vcpu
                ),
            )
        })
    });
    errors.push(memory_error);

    errors.push(check_finite("monthlyHours", config.monthly_hours).or_else(|| {
        (config.monthly_hours < 1.0 || config.monthly_hours > HOURS_PER_MONTH)
            .then(|| FieldError::new("monthlyHours", "Monthly hours must be between 1 and 730"))
    }));
    errors
}

/// Validate any configuration; `Err(CostError::InvalidInput)` lists every bad field
pub fn validate(config: &ServiceConfig) -> Result<()> {
    let errors = match config {
        ServiceConfig::S3(c) => validate_s3(c),
        ServiceConfig::Aurora(c) => validate_aurora(c),
        ServiceConfig::Lambda(c) => validate_lambda(c),
        ServiceConfig::Ecs(c) => validate_ecs(c),
    };
    errors.into_result()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_are_valid() {
        assert!(validate_s3(&S3StorageConfig::default()).is_empty());
        assert!(validate_aurora(&AuroraConfig::default()).is_empty());
        assert!(validate_aurora(&AuroraConfig::Provisioned(AuroraProvisionedConfig::default())).is_empty());
        assert!(validate_lambda(&LambdaConfig::default()).is_empty());
        assert!(validate_ecs(&EcsConfig::default()).is_empty());
    }

    #[test]
    fn test_s3_negative_storage() {
        let config = S3StorageConfig {
            storage_gb: -1.0,
            ..S3StorageConfig::default()
        };
        assert_eq!(validate_s3(&config).fields(), ["storageGB"]);
    }

    #[test]
    fn test_s3_reports_every_bad_field() {
        let config = S3StorageConfig {
            storage_gb: -1.0,
            put_requests: -1.0,
            get_requests: -1.0,
            data_transfer_gb: -1.0,
            ..S3StorageConfig::default()
        };
        let errors = validate_s3(&config);
        assert_eq!(
            errors.fields(),
            ["storageGB", "putRequests", "getRequests", "dataTransferGB"]
        );
        assert!(errors.to_string().contains("Data transfer cannot be negative"));
    }

    #[test]
    fn test_non_finite_rejected() {
        let config = S3StorageConfig {
            get_requests: f64::NAN,
            ..S3StorageConfig::default()
        };
        assert_eq!(validate_s3(&config).fields(), ["getRequests"]);
    }

    #[test]
    fn test_aurora_acu_rules() {
        let low = AuroraConfig::ServerlessV2(AuroraServerlessV2Config {
            min_acu: 0.25,
            ..AuroraServerlessV2Config::default()
        });
        assert_eq!(validate_aurora(&low).fields(), ["minACU"]);

        let inverted = AuroraConfig::ServerlessV2(AuroraServerlessV2Config {
            min_acu: 4.0,
            max_acu: 2.0,
            ..AuroraServerlessV2Config::default()
        });
        assert_eq!(validate_aurora(&inverted).fields(), ["maxACU"]);
    }

    #[test]
    fn test_aurora_instance_count() {
        for instance_count in [0.0, 0.5, -2.0, f64::INFINITY] {
            let config = AuroraConfig::Provisioned(AuroraProvisionedConfig {
                instance_count,
                ..AuroraProvisionedConfig::default()
            });
            assert_eq!(validate_aurora(&config).fields(), ["instanceCount"]);
        }
    }

    #[test]
    fn test_aurora_count_and_storage_together() {
        let config = AuroraConfig::Provisioned(AuroraProvisionedConfig {
            instance_count: 0.0,
            storage_gb: -5.0,
            backup_storage_gb: -1.0,
            ..AuroraProvisionedConfig::default()
        });
        assert_eq!(
            validate_aurora(&config).fields(),
            ["instanceCount", "storageGB", "backupStorageGB"]
        );
    }

    #[test]
    fn test_lambda_memory_bounds() {
        for memory_mb in [64.0, 10_241.0] {
            let config = LambdaConfig {
                memory_mb,
                ..LambdaConfig::default()
            };
            assert_eq!(validate_lambda(&config).fields(), ["memoryMB"]);
        }
        for memory_mb in [128.0, 10_240.0] {
            let config = LambdaConfig {
                memory_mb,
                ..LambdaConfig::default()
            };
            assert!(validate_lambda(&config).is_empty());
        }
    }

    #[test]
    fn test_ecs_memory_range_for_vcpu() {
        let config = EcsConfig {
            vcpu: 1.0,
            memory_gb: 16.0,
            ..EcsConfig::default()
        };
        assert_eq!(validate_ecs(&config).fields(), ["memoryGB"]);

        // Non-preset vCPU values have no memory constraint
        let config = EcsConfig {
            vcpu: 3.0,
            memory_gb: 100.0,
            ..EcsConfig::default()
        };
        assert!(validate_ecs(&config).is_empty());
    }

    #[test]
    fn test_ecs_monthly_hours() {
        for monthly_hours in [0.0, 731.0] {
            let config = EcsConfig {
                monthly_hours,
                ..EcsConfig::default()
            };
            assert_eq!(validate_ecs(&config).fields(), ["monthlyHours"]);
        }
    }

    #[test]
    fn test_validate_dispatch() {
        let config: ServiceConfig = LambdaConfig {
            memory_mb: 1.0,
            avg_duration_ms: -10.0,
            ..LambdaConfig::default()
        }
        .into();
        match validate(&config) {
            Err(CostError::InvalidInput(errors)) => {
                assert_eq!(errors.fields(), ["memoryMB", "avgDurationMs"]);
            }
            other => panic!("expected invalid input, got {:?}", other),
        }
        assert!(validate(&EcsConfig::default().into()).is_ok());
    }
}
