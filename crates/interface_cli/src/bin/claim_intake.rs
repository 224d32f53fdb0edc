//! Claim Intake - command line binary
//!
//! # Usage
//!
//! ```bash
//! # Register a claim from a draft file, with an optional damage photo
//! claim-intake register --draft jane.json --image dent.png
//!
//! # Manage stored claims
//! claim-intake list
//! claim-intake show 123456789012
//! claim-intake set-status 123456789012 "In Review"
//! claim-intake delete 123456789012
//! ```
//!
//! # Environment Variables
//!
//! * `CLAIMS_DATA_DIR` - Directory holding insuranceClaims.json (default: ./data)
//! * `CLAIMS_DAMAGE_API_URL` - Damage detection base URL
//!   (falls back to `NEXT_PUBLIC_DAMAGE_DETECTION_API_URL`)
//! * `CLAIMS_DAMAGE_API_TIMEOUT_SECS` - Request timeout (default: 30)
//! * `CLAIMS_ENSURE_UNIQUE_ID` - Re-draw claim numbers already in use (default: false)
//! * `CLAIMS_LOG_LEVEL` - Log level: trace, debug, info, warn, error (default: info)

use anyhow::Context;
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use std::process::ExitCode;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use core_kernel::AdapterHealth;
use domain_claims::{ClaimRecord, ClaimStore};
use interface_cli::{CliError, IntakeConfig, IntakeServices};

#[derive(Parser)]
#[command(name = "claim-intake")]
#[command(about = "Register car insurance claims and manage the stored claim list")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Register a new claim from a draft file
    Register {
        /// JSON object of camelCase field names to values
        #[arg(long)]
        draft: PathBuf,
        /// Photo of the damage
        #[arg(long)]
        image: Option<PathBuf>,
    },
    /// List all stored claims
    List,
    /// Show one stored claim
    Show {
        /// 12-digit claim number
        id: String,
    },
    /// Change the status of a stored claim
    SetStatus {
        /// 12-digit claim number
        id: String,
        /// New, In Review, Approved, Rejected or Closed
        status: String,
    },
    /// Delete a stored claim
    Delete {
        /// 12-digit claim number
        id: String,
    },
    /// Check the claim store and the damage detection service
    Check,
}

#[tokio::main]
async fn main() -> ExitCode {
    dotenvy::dotenv().ok();

    let cli = Cli::parse();
    match run(cli).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("Error: {:#}", err);
            if let Some(fields) = err.downcast_ref::<CliError>().and_then(CliError::field_errors) {
                for (field, message) in fields {
                    eprintln!("  {}: {}", field.label(), message);
                }
            }
            ExitCode::FAILURE
        }
    }
}

async fn run(cli: Cli) -> anyhow::Result<()> {
    let config = IntakeConfig::from_env().context("loading configuration")?;
    init_tracing(&config.log_level);

    let services = IntakeServices::from_config(&config)?;

    match cli.command {
        Commands::Register { draft, image } => {
            let json = tokio::fs::read_to_string(&draft)
                .await
                .map_err(|err| CliError::io(&draft, err))?;
            let input = interface_cli::parse_draft(&json)?;
            let image = match image {
                Some(path) => Some(interface_cli::load_image(&path).await?),
                None => None,
            };

            let controller = services.controller();
            let registration = interface_cli::register(&controller, &input, image).await?;

            println!("Claim {} registered", registration.record.id);
            println!("Next: {}", registration.navigation.path());
            print_record(&registration.record)?;
        }
        Commands::List => {
            let claims = services.store.list_all().await.map_err(CliError::from)?;
            if claims.is_empty() {
                println!("No claims found.");
            } else {
                for claim in claims {
                    println!(
                        "{}  {:<10}  {:<20}  {}  {}",
                        claim.id,
                        claim.status.as_str(),
                        claim.customer_name,
                        claim.incident_date,
                        claim.incident_type
                    );
                }
            }
        }
        Commands::Show { id } => {
            let record = interface_cli::show(services.store.as_ref(), &id).await?;
            print_record(&record)?;
        }
        Commands::SetStatus { id, status } => {
            let record = interface_cli::set_status(services.store.as_ref(), &id, &status).await?;
            println!("Claim {} is now {}", record.id, record.status);
        }
        Commands::Delete { id } => {
            interface_cli::delete(services.store.as_ref(), &id).await?;
            println!("Deleted claim {}", id);
        }
        Commands::Check => {
            let mut healthy = true;
            for result in services.health().await {
                healthy &= result.status == AdapterHealth::Healthy;
                println!(
                    "{:<24} {:?} ({}ms) {}",
                    result.adapter_id,
                    result.status,
                    result.latency_ms,
                    result.message.unwrap_or_default()
                );
            }
            if !healthy {
                anyhow::bail!("one or more collaborators are unhealthy");
            }
        }
    }

    Ok(())
}

fn print_record(record: &ClaimRecord) -> anyhow::Result<()> {
    println!("{}", serde_json::to_string_pretty(record)?);
    Ok(())
}

/// Initializes the tracing subscriber; `RUST_LOG` wins over the configured level
fn init_tracing(log_level: &str) {
    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(log_level))
        .unwrap_or_else(|_| EnvFilter::new("info"));

    tracing_subscriber::registry()
        .with(filter)
        .with(
            tracing_subscriber::fmt::layer()
                .with_target(true)
                .with_writer(std::io::stderr),
        )
        .init();
}
