//! Lead Service - HTTP API for lead capture.

use clap::{Parser, Subcommand};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use lead_service_lib::config::LeadServiceConfig;

#[derive(Parser)]
#[command(name = "lead-service")]
#[command(about = "Lead capture API")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Start the HTTP server
    Serve {
        /// Bind host (overrides LEAD_SERVICE_HOST)
        #[arg(long)]
        host: Option<String>,
        /// Bind port (overrides LEAD_SERVICE_PORT)
        #[arg(long)]
        port: Option<u16>,
    },
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Load environment variables
    dotenvy::dotenv().ok();

    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Serve { host, port } => {
            let config = LeadServiceConfig::from_env().with_addr(host, port);
            tracing::debug!(?config, "Configuration loaded");
            lead_service_lib::run_server(config).await?;
        }
    }

    Ok(())
}
