//! Freight Decision CLI: the `freight-decision` command.

use std::path::{Path, PathBuf};
use std::process::ExitCode;
use std::sync::Arc;

use clap::{Parser, Subcommand};
use thiserror::Error;

use freight_decision::adapters::FileCatalogSource;
use freight_decision::application::{
    DecisionPipeline, DecisionReport, RankCarriersCommand, RankCarriersHandler, ShipmentPlanner,
};
use freight_decision::config::{ConfigError, EngineConfig, LoggingConfig, ValidationError};
use freight_decision::domain::foundation::DomainError;
use freight_decision::domain::shipment::ShipmentContext;

/// Exit status when the outcome was withheld by the gate.
const EXIT_BLOCKED: u8 = 2;

#[derive(Parser)]
#[command(
    name = "freight-decision",
    about = "Rank freight carriers with neutrosophic AHP and grey TOPSIS behind a truth gate",
    version
)]
struct Cli {
    /// Configuration file (YAML, JSON, or TOML); overrides FREIGHT_DECISION_CONFIG
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Rank the catalog for a shipment and print the decision report as JSON
    Rank {
        /// Carrier catalog file (JSON or YAML)
        #[arg(long)]
        catalog: PathBuf,

        /// Shipment context file (JSON or YAML)
        #[arg(long)]
        shipment: PathBuf,

        /// Mark the result as a placeholder; it will never be truth-bound
        #[arg(long)]
        placeholder: bool,
    },

    /// Print the override token for a blocked decision's challenge
    ChallengeToken {
        /// Challenge printed in the blocked report
        #[arg(long)]
        challenge: String,
    },
}

#[derive(Debug, Error)]
enum CliError {
    #[error("Failed to load configuration: {0}")]
    Config(#[from] ConfigError),

    #[error("Invalid configuration: {0}")]
    InvalidConfig(#[from] ValidationError),

    #[error("Cannot read shipment {path}: {reason}")]
    Shipment { path: String, reason: String },

    #[error("{0}")]
    Domain(#[from] DomainError),

    #[error("Failed to serialize report: {0}")]
    Report(#[from] serde_json::Error),

    #[error("No override secret configured (set FREIGHT_DECISION__GATE__OVERRIDE_SECRET)")]
    OverrideDisabled,
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    let config = match load_config(cli.config.as_deref()) {
        Ok(config) => config,
        Err(err) => {
            eprintln!("error: {}", err);
            return ExitCode::FAILURE;
        }
    };

    if let Err(err) = init_tracing(&config.logging) {
        eprintln!("error: {}", err);
        return ExitCode::FAILURE;
    }

    let result = match cli.command {
        Commands::Rank {
            catalog,
            shipment,
            placeholder,
        } => rank(&config, &catalog, &shipment, placeholder),
        Commands::ChallengeToken { challenge } => challenge_token(&config, &challenge),
    };

    match result {
        Ok(code) => code,
        Err(err) => {
            tracing::error!(error = %err, "command failed");
            eprintln!("error: {}", err);
            ExitCode::FAILURE
        }
    }
}

fn load_config(path: Option<&Path>) -> Result<EngineConfig, CliError> {
    let config = match path {
        Some(path) => {
            dotenvy::dotenv().ok();
            EngineConfig::load_from(Some(path))?
        }
        None => EngineConfig::load()?,
    };
    config.validate()?;
    Ok(config)
}

fn init_tracing(logging: &LoggingConfig) -> Result<(), CliError> {
    let filter = logging.filter()?;
    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr);
    if logging.json {
        builder.json().init();
    } else {
        builder.init();
    }
    Ok(())
}

fn rank(
    config: &EngineConfig,
    catalog: &Path,
    shipment: &Path,
    placeholder: bool,
) -> Result<ExitCode, CliError> {
    let context = read_shipment(shipment)?;
    let handler = RankCarriersHandler::new(
        Arc::new(FileCatalogSource::new(catalog)),
        ShipmentPlanner::from_config(config),
        DecisionPipeline::from_config(config),
    );

    let mut cmd = RankCarriersCommand::new(context);
    cmd.placeholder = placeholder;
    let result = handler.handle(cmd)?;

    let report = DecisionReport::from_gated(&result.gated, Some(&result.catalog));
    println!("{}", report.to_json_pretty()?);

    if report.is_blocked() {
        Ok(ExitCode::from(EXIT_BLOCKED))
    } else {
        Ok(ExitCode::SUCCESS)
    }
}

fn challenge_token(config: &EngineConfig, challenge: &str) -> Result<ExitCode, CliError> {
    let token = config
        .gate
        .authority()
        .issue_token(challenge.trim())
        .ok_or(CliError::OverrideDisabled)?;
    println!("{}", token);
    Ok(ExitCode::SUCCESS)
}

fn read_shipment(path: &Path) -> Result<ShipmentContext, CliError> {
    let shipment_error = |reason: String| CliError::Shipment {
        path: path.display().to_string(),
        reason,
    };
    let contents = std::fs::read_to_string(path).map_err(|e| shipment_error(e.to_string()))?;
    serde_yaml::from_str(&contents).map_err(|e| shipment_error(e.to_string()))
}
