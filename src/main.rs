use std::process::ExitCode;

use clap::{Parser, Subcommand};
use config::Config;
use log::{debug, error, info};

mod config;
mod dmarc_cleanup;
mod dns;
mod error;
mod providers;
mod reconciler;
mod zone_driver;

use error::Error;
use providers::cloudflare::error::map_error;
use providers::cloudflare::{CloudflareConfig, CloudflareProvider};

#[derive(Parser, Debug)]
#[command(name = "zone-txt-sync")]
#[command(about = "Keep SPF, DKIM and DMARC TXT records in place across Cloudflare zones", long_about = None)]
struct Args {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug, PartialEq, Eq)]
enum Command {
    /// Create missing DMARC, SPF and DKIM placeholder records on every zone
    Reconcile {
        /// Only consider the first N zones returned by the provider
        #[arg(long)]
        limit: Option<usize>,
    },
    /// Delete DMARC records from every zone
    DeleteDmarc,
}

async fn run(args: Args) -> Result<(), Error> {
    let config = Config::from_env()?;
    let provider = CloudflareProvider::new(CloudflareConfig::from(&config)).map_err(map_error)?;

    match args.command {
        Command::Reconcile { limit } => {
            config.require_record_content()?;
            let config = config.with_limit(limit);
            info!(
                "Reconciling mail TXT records ({} skipped domains, limit {:?})",
                config.skip_domains.len(),
                config.limit
            );
            zone_driver::run_reconcile(&provider, &config).await?;
        }
        Command::DeleteDmarc => {
            info!("Deleting DMARC records");
            zone_driver::run_delete_dmarc(&provider, &config).await?;
        }
    }

    Ok(())
}

#[tokio::main]
async fn main() -> ExitCode {
    // Initialize logging
    tracing_subscriber::fmt::init();

    if let Err(e) = dotenvy::dotenv() {
        debug!("No .env file loaded: {e}");
    }

    let args = Args::parse();

    match run(args).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!("Error: {e}");
            ExitCode::FAILURE
        }
    }
}
