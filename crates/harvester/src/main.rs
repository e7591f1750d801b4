//! Showdown replay harvester
//!
//! Fetches recent replays for a ladder format, strips them down to the
//! battle-relevant event stream grouped by turn, persists the cleaned
//! replays, and writes one first-person episode file per participant.

mod clients;
mod config;
mod db;
mod episodes;
mod error;

use sqlx::PgPool;
use tracing::{error, info, warn};
use tracing_subscriber::EnvFilter;

use replay_core::{cleaner, pov};

use crate::clients::showdown::ShowdownClient;
use crate::config::Config;
use crate::error::HarvesterError;

/// Parse `--replay <id>` from CLI args (single-replay mode).
fn parse_replay_arg() -> Option<String> {
    let args: Vec<String> = std::env::args().collect();
    for i in 0..args.len() {
        if args[i] == "--replay" {
            if let Some(id) = args.get(i + 1) {
                return Some(id.clone());
            }
        }
    }
    None
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()))
        .init();

    // Load .env if present
    dotenvy::dotenv().ok();

    let config = Config::from_env();
    let client = ShowdownClient::new(config.request_delay_ms);

    let pool = match &config.database_url {
        Some(url) => {
            info!("Connecting to database...");
            let pool = db::pool::create_pool(url).await?;
            db::pool::run_migrations(&pool).await?;
            Some(pool)
        }
        None => {
            info!("DATABASE_URL not set - cleaned replays will not be persisted");
            None
        }
    };

    // --replay mode: process one replay by id, skip the listing
    if let Some(replay_id) = parse_replay_arg() {
        process_replay(&client, pool.as_ref(), &config, &replay_id).await?;
        return Ok(());
    }

    let listings = client
        .fetch_listing(&config.replay_format, config.max_pages, config.page_limit)
        .await?;

    if listings.is_empty() {
        info!(format = %config.replay_format, "No replays found, exiting");
        return Ok(());
    }
    info!(count = listings.len(), format = %config.replay_format, "Fetched replay listing");

    let total = listings.len();
    let mut successful = 0usize;
    let mut failed = 0usize;

    for (i, listing) in listings.iter().enumerate() {
        info!(replay_id = %listing.id, "Processing replay {}/{total}", i + 1);

        match process_replay(&client, pool.as_ref(), &config, &listing.id).await {
            Ok(()) => successful += 1,
            Err(e) => {
                error!(replay_id = %listing.id, error = %e, "Failed to process replay");
                failed += 1;
            }
        }
    }

    info!(total, successful, failed, "Processing complete");
    Ok(())
}

/// Fetch, clean, persist, and project one replay. A failure here is fatal
/// for this replay only; the batch loop logs it and moves on.
async fn process_replay(
    client: &ShowdownClient,
    pool: Option<&PgPool>,
    config: &Config,
    replay_id: &str,
) -> Result<(), HarvesterError> {
    let raw = client.fetch_replay(replay_id).await?;
    let cleaned = cleaner::clean(&raw);

    if cleaned.turns.is_none() {
        warn!(replay_id, "Replay record has no log; storing identity fields only");
    }

    if let Some(pool) = pool {
        let rating = db::replays::rating_or_default(&raw);
        match db::replays::insert_cleaned(pool, &cleaned, rating).await {
            Ok(true) => info!(replay_id, rating, "Stored cleaned replay"),
            Ok(false) => info!(replay_id, "Replay already stored, skipping insert"),
            Err(e) => warn!(replay_id, error = %e, "Failed to persist cleaned replay"),
        }
    }

    let episodes = pov::project(&cleaned)?;
    let written = episodes::write_episodes(&config.output_dir, &episodes)?;
    info!(replay_id, files = written.len(), "Wrote first-person episodes");

    Ok(())
}
