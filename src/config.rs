use crate::error::{ConfigError, Result};
use crate::pricing::DEFAULT_SNAPSHOT_PATH;
use crate::services::aurora::AuroraProvisionedConfig;
use crate::services::{
    Architecture, AuroraConfig, EcsConfig, LambdaConfig, S3StorageConfig, S3StorageTier, Service,
    ServiceConfig,
};
use crate::utils::ensure_parent_dir;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tracing::{debug, warn};

/// Default config file name looked up in the working directory
pub const LOCAL_CONFIG_FILE: &str = ".awscost.toml";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub pricing: PricingConfig,
    #[serde(default = "default_s3_scenario")]
    pub s3: Scenario<S3StorageConfig>,
    #[serde(default = "default_aurora_scenario")]
    pub aurora: Scenario<AuroraConfig>,
    #[serde(default = "default_lambda_scenario")]
    pub lambda: Scenario<LambdaConfig>,
    #[serde(default = "default_ecs_scenario")]
    pub ecs: Scenario<EcsConfig>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PricingConfig {
    /// Pricing snapshot consulted by the S3 calculator
    pub snapshot: PathBuf,
}

impl Default for PricingConfig {
    fn default() -> Self {
        Self {
            snapshot: PathBuf::from(DEFAULT_SNAPSHOT_PATH),
        }
    }
}

/// Two configurations of one service to compare side by side
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Scenario<T> {
    #[serde(default = "default_first_label")]
    pub first_label: String,
    #[serde(default = "default_second_label")]
    pub second_label: String,
    pub first: T,
    pub second: T,
}

impl<T> Scenario<T> {
    pub fn new(first: T, second: T) -> Self {
        Self {
            first_label: default_first_label(),
            second_label: default_second_label(),
            first,
            second,
        }
    }
}

fn default_first_label() -> String {
    "Configuration 1".to_string()
}

fn default_second_label() -> String {
    "Configuration 2".to_string()
}

fn default_s3_scenario() -> Scenario<S3StorageConfig> {
    Scenario::new(
        S3StorageConfig::default(),
        S3StorageConfig {
            tier: S3StorageTier::StandardIa,
            ..S3StorageConfig::default()
        },
    )
}

fn default_aurora_scenario() -> Scenario<AuroraConfig> {
    Scenario::new(
        AuroraConfig::default(),
        AuroraConfig::Provisioned(AuroraProvisionedConfig::default()),
    )
}

fn default_lambda_scenario() -> Scenario<LambdaConfig> {
    Scenario::new(
        LambdaConfig::default(),
        LambdaConfig {
            architecture: Architecture::Arm,
            ..LambdaConfig::default()
        },
    )
}

fn default_ecs_scenario() -> Scenario<EcsConfig> {
    Scenario::new(
        EcsConfig::default(),
        EcsConfig {
            architecture: Architecture::Arm,
            ..EcsConfig::default()
        },
    )
}

impl Default for Config {
    fn default() -> Self {
        Self {
            pricing: PricingConfig::default(),
            s3: default_s3_scenario(),
            aurora: default_aurora_scenario(),
            lambda: default_lambda_scenario(),
            ecs: default_ecs_scenario(),
        }
    }
}

/// Labels and configurations of one service's scenario, service-neutral
pub struct ScenarioPair {
    pub first_label: String,
    pub second_label: String,
    pub first: ServiceConfig,
    pub second: ServiceConfig,
}

fn pair<T: Clone + Into<ServiceConfig>>(scenario: &Scenario<T>) -> ScenarioPair {
    ScenarioPair {
        first_label: scenario.first_label.clone(),
        second_label: scenario.second_label.clone(),
        first: scenario.first.clone().into(),
        second: scenario.second.clone().into(),
    }
}

impl Config {
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let config_path = if let Some(p) = path {
            p.to_path_buf()
        } else {
            // Try .awscost.toml in current dir, then ~/.config/awscost/config.toml
            let local = PathBuf::from(LOCAL_CONFIG_FILE);
            if local.exists() {
                local
            } else {
                dirs::config_dir()
                    .map(|d| d.join("awscost").join("config.toml"))
                    .unwrap_or_else(|| PathBuf::from(LOCAL_CONFIG_FILE))
            }
        };

        if config_path.exists() {
            let content = std::fs::read_to_string(&config_path)?;
            let config: Config = toml::from_str(&content).map_err(|e| {
                ConfigError::ParseError(format!(
                    "{}: {}\n  Tip: Run 'awscost init' to create a new config file",
                    config_path.display(),
                    e
                ))
            })?;
            debug!("Loaded config from {}", config_path.display());
            Ok(config)
        } else {
            // Use defaults but warn if user explicitly provided a path
            if path.is_some() {
                warn!(
                    "Config file not found: {}. Using default configuration",
                    config_path.display()
                );
            }
            Ok(Config::default())
        }
    }

    /// Load a scenario file named on the command line.
    ///
    /// Unlike `load`, a missing file is an error rather than defaults.
    pub fn load_scenario(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Err(ConfigError::NotFound(path.display().to_string()).into());
        }
        Self::load(Some(path))
    }

    pub fn save(&self, path: &Path) -> Result<()> {
        let content = toml::to_string_pretty(self).map_err(|e| ConfigError::InvalidValue {
            field: "config".to_string(),
            reason: e.to_string(),
        })?;
        ensure_parent_dir(path)?;
        std::fs::write(path, content)?;
        Ok(())
    }

    /// The scenario configured for `service`
    pub fn scenario(&self, service: Service) -> ScenarioPair {
        match service {
            Service::S3 => pair(&self.s3),
            Service::Aurora => pair(&self.aurora),
            Service::Lambda => pair(&self.lambda),
            Service::Ecs => pair(&self.ecs),
        }
    }
}

pub fn init_config(output: &Path) -> Result<()> {
    let config = Config::default();
    config.save(output)?;
    println!("Created config file: {}", output.display());
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::CostError;
    use tempfile::TempDir;

    #[test]
    fn test_config_default() {
        let config = Config::default();
        assert_eq!(config.pricing.snapshot, PathBuf::from(DEFAULT_SNAPSHOT_PATH));
        assert_eq!(config.s3.second.tier, S3StorageTier::StandardIa);
        assert_eq!(config.lambda.second.architecture, Architecture::Arm);
        assert!(matches!(config.aurora.second, AuroraConfig::Provisioned(_)));
    }

    #[test]
    fn test_config_save_and_load() {
        let temp_dir = TempDir::new().unwrap();
        let config_path = temp_dir.path().join("test_config.toml");

        let config = Config::default();
        assert!(config.save(&config_path).is_ok());
        assert!(config_path.exists());

        let loaded = Config::load(Some(&config_path)).unwrap();
        assert_eq!(loaded, config);
    }

    #[test]
    fn test_config_load_nonexistent() {
        let temp_dir = TempDir::new().unwrap();
        let fake_path = temp_dir.path().join("nonexistent.toml");

        // Should return default config
        let config = Config::load(Some(&fake_path)).unwrap();
        assert_eq!(config, Config::default());
    }

    #[test]
    fn test_config_load_invalid_toml() {
        let temp_dir = TempDir::new().unwrap();
        let config_path = temp_dir.path().join("invalid.toml");
        std::fs::write(&config_path, "invalid toml content {").unwrap();

        let result = Config::load(Some(&config_path));
        assert!(matches!(result, Err(CostError::Config(ConfigError::ParseError(_)))));
    }

    #[test]
    fn test_load_scenario_missing_file() {
        use crate::exit_codes::{codes, exit_code_for_error};

        let temp_dir = TempDir::new().unwrap();
        let missing = temp_dir.path().join("team-db.toml");

        let err = Config::load_scenario(&missing).unwrap_err();
        assert!(matches!(err, CostError::Config(ConfigError::NotFound(ref p)) if p.contains("team-db.toml")));
        assert_eq!(exit_code_for_error(&err), codes::CONFIG_ERROR);
    }

    #[test]
    fn test_load_scenario_existing_file() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("scenario.toml");
        let mut config = Config::default();
        config.ecs.first_label = "Intel".to_string();
        config.save(&path).unwrap();

        let loaded = Config::load_scenario(&path).unwrap();
        assert_eq!(loaded.ecs.first_label, "Intel");
    }

    #[test]
    fn test_partial_config_uses_defaults() {
        let temp_dir = TempDir::new().unwrap();
        let config_path = temp_dir.path().join("partial.toml");
        std::fs::write(
            &config_path,
            r#"
[pricing]
snapshot = "prices.json"

[lambda]
first_label = "Before"
second_label = "After"

[lambda.first]
architecture = "x86"
memoryMB = 512
monthlyInvocations = 5000000
avgDurationMs = 120

[lambda.second]
architecture = "arm"
memoryMB = 512
monthlyInvocations = 5000000
avgDurationMs = 100
"#,
        )
        .unwrap();

        let config = Config::load(Some(&config_path)).unwrap();
        assert_eq!(config.pricing.snapshot, PathBuf::from("prices.json"));
        assert_eq!(config.lambda.first_label, "Before");
        assert_eq!(config.lambda.first.memory_mb, 512.0);
        assert_eq!(config.lambda.second.avg_duration_ms, 100.0);
        assert_eq!(config.ecs, default_ecs_scenario());
    }

    #[test]
    fn test_aurora_scenario_in_toml() {
        let temp_dir = TempDir::new().unwrap();
        let config_path = temp_dir.path().join("aurora.toml");
        std::fs::write(
            &config_path,
            r#"
[aurora.first]
type = "SERVERLESS_V2"
config = { minACU = 1, maxACU = 8, storageGB = 500, ioRequests = 0, backupStorageGB = 0 }

[aurora.second]
type = "PROVISIONED"
config = { instanceType = "db.r6g.xlarge", instanceCount = 2, storageGB = 500, ioRequests = 0, backupStorageGB = 0 }
"#,
        )
        .unwrap();

        let config = Config::load(Some(&config_path)).unwrap();
        assert_eq!(config.aurora.first_label, "Configuration 1");
        match &config.aurora.second {
            AuroraConfig::Provisioned(c) => assert_eq!(c.instance_count, 2.0),
            AuroraConfig::ServerlessV2(_) => panic!("expected provisioned"),
        }
    }

    #[test]
    fn test_scenario_pair() {
        let config = Config::default();
        let pair = config.scenario(Service::Ecs);
        assert_eq!(pair.first.service(), Service::Ecs);
        assert_eq!(pair.second_label, "Configuration 2");
    }

    #[test]
    fn test_init_config() {
        let temp_dir = TempDir::new().unwrap();
        let config_path = temp_dir.path().join("init_test.toml");

        assert!(init_config(&config_path).is_ok());
        assert!(config_path.exists());

        let config = Config::load(Some(&config_path)).unwrap();
        assert_eq!(config.s3.first.tier, S3StorageTier::Standard);
    }

    #[test]
    fn test_init_config_replaces_broken_file() {
        let temp_dir = TempDir::new().unwrap();
        let config_path = temp_dir.path().join(LOCAL_CONFIG_FILE);
        std::fs::write(&config_path, "[s3\nbroken").unwrap();
        assert!(Config::load(Some(&config_path)).is_err());

        assert!(init_config(&config_path).is_ok());
        assert_eq!(Config::load(Some(&config_path)).unwrap(), Config::default());
    }
}
