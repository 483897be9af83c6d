use anyhow::Result;
use awscost::config::{self, Config};
use awscost::estimate::{self, EstimateCommands, RunContext};
use awscost::exit_codes::exit_code_for_anyhow;
use awscost::pricing::{self, PricingCommands, PricingDataSet};
use awscost::report::OutputFormat;
use awscost::services::Service;
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "awscost")]
#[command(
    about = "Monthly AWS cost estimates and side-by-side comparisons",
    long_about = "awscost estimates what a workload costs per month and compares two configurations.\n\nSupports:\n  - S3 storage tiers, requests and data transfer\n  - Aurora Serverless v2 and provisioned clusters\n  - Lambda on x86 and arm\n  - ECS Fargate on x86 and arm\n\nS3 storage prices can come from an imported AWS Price List snapshot."
)]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Configuration file path
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// Enable verbose output
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Output format (text, json)
    #[arg(long, global = true, value_enum, default_value = "text")]
    output: OutputFormat,

    /// Pricing snapshot (overrides the configured path)
    #[arg(long, global = true)]
    pricing: Option<PathBuf>,

    /// Fail on invalid input instead of estimating anyway
    #[arg(long, global = true)]
    strict: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Estimate the monthly cost of one configuration
    Estimate {
        #[command(subcommand)]
        subcommand: EstimateCommands,
    },
    /// Compare the two configurations of a scenario
    ///
    /// Examples:
    ///   awscost compare lambda
    ///   awscost compare aurora --scenario team-db.toml --output json
    Compare {
        /// Service to compare
        #[arg(value_enum)]
        service: Service,
        /// Config file holding the scenario (defaults to the loaded config)
        #[arg(long)]
        scenario: Option<PathBuf>,
    },
    /// Import and inspect pricing snapshots
    Pricing {
        #[command(subcommand)]
        subcommand: PricingCommands,
    },
    /// Write a config file with the default scenarios
    Init {
        /// Output path for config file
        #[arg(short, long, default_value = ".awscost.toml")]
        output: PathBuf,
    },
}

fn main() {
    if let Err(e) = run() {
        eprintln!("Error: {:#}", e);
        std::process::exit(exit_code_for_anyhow(&e));
    }
}

fn run() -> Result<()> {
    let cli = Cli::parse();

    // Only warnings and errors unless --verbose
    let filter = if cli.verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::new("warn")
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    // init must work even when the existing config file is broken
    let load_config = || -> Result<(Config, PathBuf)> {
        let config = Config::load(cli.config.as_deref())?;
        let snapshot_path = cli
            .pricing
            .clone()
            .unwrap_or_else(|| config.pricing.snapshot.clone());
        Ok((config, snapshot_path))
    };

    match cli.command {
        Commands::Estimate { subcommand } => {
            let (_, snapshot_path) = load_config()?;
            let ctx = RunContext {
                pricing: PricingDataSet::load(&snapshot_path)?,
                output: cli.output,
                strict: cli.strict,
            };
            estimate::handle_command(subcommand, &ctx)?;
        }
        Commands::Compare { service, scenario } => {
            let (config, snapshot_path) = load_config()?;
            let scenario_config = match scenario {
                Some(path) => Config::load_scenario(&path)?,
                None => config,
            };
            let ctx = RunContext {
                pricing: PricingDataSet::load(&snapshot_path)?,
                output: cli.output,
                strict: cli.strict,
            };
            estimate::compare_service(service, &scenario_config, &ctx)?;
        }
        Commands::Pricing { subcommand } => {
            let (_, snapshot_path) = load_config()?;
            pricing::handle_command(subcommand, &snapshot_path, cli.output)?;
        }
        Commands::Init { output } => {
            config::init_config(&output)?;
        }
    }

    Ok(())
}
