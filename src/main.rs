//! GA Dashboard
//!
//! Run with: cargo run -- serve
//!
//! # Configuration
//!
//! `--config <path>` or the first existing default location
//! (`~/.config/ga-dashboard/config.toml`, `/etc/ga-dashboard/config.toml`,
//! `./config.toml`). Environment variables override file values:
//! - `GA_DASHBOARD_HOST`, `GA_DASHBOARD_PORT`
//! - `GA_DASHBOARD_PROPERTY_ID`
//! - `GA_DASHBOARD_CREDENTIALS` (or `GOOGLE_APPLICATION_CREDENTIALS`)
//! - `GA_DASHBOARD_START_DATE`, `GA_DASHBOARD_END_DATE`
//! - `GA_DASHBOARD_LOG_LEVEL`, `GA_DASHBOARD_LOG_FORMAT`
//! - `RUST_LOG`: full filter directives (overrides the log level)

use anyhow::{anyhow, Context};
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use std::sync::Arc;

use ga_dashboard::api::{serve, AppState};
use ga_dashboard::config::{generate_default_config, Config};
use ga_dashboard::ga::GaDataClient;
use ga_dashboard::{logging, report};

#[derive(Parser)]
#[command(name = "ga-dashboard")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(about = "Google Analytics Dashboard API")]
#[command(long_about = "Serves fixed GA4 Data API reports as JSON endpoints.\nEach endpoint runs one report and renames its rows into named fields.")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,

    /// Config file (default: standard locations, then environment only)
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Start the HTTP server (default)
    Serve,

    /// Run one report and print its JSON body
    Report {
        /// Report path or slug (e.g. /analytics/bounce-rate or bounce-rate)
        name: String,
    },

    /// List available reports
    Reports,

    /// Generate default config file
    Config {
        /// Output path (default: stdout)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    match cli.command.unwrap_or(Commands::Serve) {
        Commands::Config { output } => {
            let content = generate_default_config();
            match output {
                Some(path) => {
                    std::fs::write(&path, content)
                        .with_context(|| format!("Failed to write {:?}", path))?;
                    println!("Config written to {:?}", path);
                }
                None => print!("{}", content),
            }
        }

        Commands::Reports => {
            for definition in report::REPORTS {
                println!("{:<32} {}", definition.path, definition.summary);
            }
        }

        Commands::Report { name } => {
            let definition =
                report::find(&name).ok_or_else(|| anyhow!("Unknown report: {}", name))?;
            let config = startup(cli.config)?;

            let client = connect(&config).await?;
            let body = report::run(
                &client,
                definition,
                &config.analytics.property_id,
                &config.analytics.date_range(),
            )
            .await
            .with_context(|| definition.error_message)?;

            println!("{}", serde_json::to_string_pretty(&body)?);
        }

        Commands::Serve => {
            let config = startup(cli.config)?;

            tracing::info!("Starting GA Dashboard API v{}", env!("CARGO_PKG_VERSION"));
            tracing::info!("GA4 property: {}", config.analytics.property_id);
            tracing::info!(
                "Report date range: {} to {}",
                config.analytics.start_date,
                config.analytics.end_date
            );

            let client = connect(&config).await?;
            let state = AppState::new(Arc::new(client), &config.analytics, config.server.clone());

            serve(state).await?;
            tracing::info!("GA Dashboard API stopped");
        }
    }

    Ok(())
}

/// Load and validate configuration, then install logging
fn startup(path: Option<PathBuf>) -> anyhow::Result<Config> {
    let (config, source) = match path {
        Some(path) => (Config::load_with_env(&path)?, Some(path)),
        None => Config::load_first(&Config::default_paths())?,
    };
    config.validate()?;

    logging::init(&config.logging);
    match source {
        Some(path) => tracing::info!("Loaded config from {:?}", path),
        None => tracing::info!("Using default config with environment overrides"),
    }

    Ok(config)
}

/// Build the reporting client once for the whole process
async fn connect(config: &Config) -> anyhow::Result<GaDataClient> {
    GaDataClient::with_credentials(
        config.analytics.client_config(),
        config.analytics.credentials_path.as_deref(),
    )
    .await
    .context("Failed to initialize GA4 Data API client")
}
