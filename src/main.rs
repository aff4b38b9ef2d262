use std::path::PathBuf;
use std::sync::Arc;

use anyhow::Context;
use chrono::Utc;
use clap::{Parser, Subcommand};
use tracing::{error, info, warn};

use ufc_events::cache::InMemoryEventCache;
use ufc_events::config::AppConfig;
use ufc_events::fallback::sample_events;
use ufc_events::logging::init_logging;
use ufc_events::metrics::init_metrics;
use ufc_events::server::{start_server, AppState};
use ufc_events::{EventService, ScrapePipeline};

#[derive(Parser)]
#[command(name = "ufc_events")]
#[command(about = "Scrapes upcoming UFC events and serves them over HTTP")]
#[command(version)]
struct Cli {
    /// Path to a TOML config file (defaults to $UFC_EVENTS_CONFIG, then config.toml)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Scrape once and print the report as JSON
    Scrape {
        /// Fail instead of printing the fallback event when the listing can't be fetched
        #[arg(long)]
        no_fallback: bool,
    },
    /// Serve the events API
    Serve {
        /// Overrides server.port
        #[arg(long)]
        port: Option<u16>,
    },
    /// Print the sample event cards as JSON
    Seed,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenv::dotenv().ok();
    let cli = Cli::parse();

    let config = AppConfig::load_with_env(cli.config.as_deref()).context("loading configuration")?;
    let _guard = init_logging(&config.logging.dir);

    match cli.command {
        Commands::Scrape { no_fallback } => {
            let pipeline = ScrapePipeline::from_config(config.scraper)?;
            let report = if no_fallback {
                pipeline.run().await?
            } else {
                pipeline.run_with_fallback().await
            };
            println!("{}", serde_json::to_string_pretty(&report)?);
        }
        Commands::Serve { port } => {
            let metrics = init_metrics();
            let pipeline = Arc::new(ScrapePipeline::from_config(config.scraper)?);
            let service = EventService::new(pipeline, Arc::new(InMemoryEventCache::new()), config.cache);

            if config.server.load_on_startup {
                info!("Loading events on startup");
                match service.load_latest().await {
                    Ok(report) if report.is_fallback() => {
                        warn!("Startup load served the fallback event");
                    }
                    Ok(report) => info!("Startup load cached {} events", report.events.len()),
                    Err(e) => error!("Startup load failed: {}", e),
                }
            }

            let port = port.unwrap_or(config.server.port);
            start_server(AppState { service, metrics }, port).await?;
        }
        Commands::Seed => {
            println!("{}", serde_json::to_string_pretty(&sample_events(Utc::now()))?);
        }
    }
    Ok(())
}
