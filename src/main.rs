mod config;
mod document;
mod error;
mod logger;
mod models;
mod publisher;
mod report;
mod sections;
mod store;

use anyhow::{Context, Result};
use chrono::Local;
use tracing::{error, info};

use config::Config;
use publisher::PublisherFactory;
use store::Store;

fn main() {
    // A failed run is logged and swallowed; the process exits normally
    // either way.
    if let Err(e) = run() {
        error!("Report run failed: {:#}", e);
    }
}

fn run() -> Result<()> {
    let config = Config::load().context("Failed to load configuration")?;
    logger::init(&config.log_level, &config.log_file)?;

    info!("Starting usage reporter");
    info!("Version: {}", env!("CARGO_PKG_VERSION"));
    info!(
        database = %config.database_path,
        output_dir = %config.output_dir,
        publisher_type = %config.publisher_type,
        log_level = %config.log_level,
        "Configuration loaded"
    );

    config
        .validate()
        .context("Configuration validation failed")?;

    let store = Store::open(&config.database_path)?;
    let sections = sections::report_sections();

    let rendered = report::generate(&store, sections, &config, Local::now())
        .context("Failed to generate report")?;

    let publisher = PublisherFactory::create(&config).context("Failed to create publisher")?;
    info!("Publishing report using {} publisher", publisher.name());
    publisher
        .publish(&rendered)
        .context("Failed to publish report")?;

    info!("Usage report completed successfully");
    Ok(())
}
