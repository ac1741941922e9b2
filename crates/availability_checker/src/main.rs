//! Main entry point for the park availability checker.
//! Runs a single check and exits; scheduling is left to cron or a similar trigger.

use std::sync::Arc;

use anyhow::Context;
use availability_checker::*;
use disney_api::AvailabilityClient;
use notification_services::{EmailService, MockEmailService, SmtpEmailService};
use park_availability::SnapshotStore;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load environment variables
    dotenvy::dotenv().ok();

    // Initialize logger
    env_logger::init_from_env(env_logger::Env::new().default_filter_or("info"));

    let config_path = config_path();
    let config = Config::load(&config_path)
        .with_context(|| format!("Failed to load config from {}", config_path.display()))?;

    let base_dir = std::env::current_dir().context("Failed to resolve working directory")?;
    let store = SnapshotStore::in_data_dir(base_dir, config.output.snapshot_filename());
    log::info!("📁 Snapshot file: {}", store.path().display());

    let email_service: Arc<dyn EmailService> = if dry_run() {
        log::warn!("🔧 DRY_RUN set, emails will only be logged");
        Arc::new(MockEmailService)
    } else {
        Arc::new(SmtpEmailService::new(&config.send_config)?)
    };

    let client = AvailabilityClient::new()?;
    let checker = AvailabilityChecker::new(client, email_service, store, config.date_range);

    let outcome = checker.run().await?;

    if let Some(summary) = outcome.summary() {
        print!("{}", summary);
    }

    Ok(())
}
