//! Harvester configuration from environment variables.

use std::env;
use std::path::PathBuf;

#[derive(Clone, Debug)]
pub struct Config {
    /// Postgres connection URL. Persistence is skipped when unset.
    pub database_url: Option<String>,

    /// Ladder format to harvest listings for.
    pub replay_format: String,

    /// Listing pages to fetch per run.
    pub max_pages: u32,

    /// Replays kept per listing page.
    pub page_limit: usize,

    /// Delay before each upstream request, to stay polite.
    pub request_delay_ms: u64,

    /// Directory for first-person episode files.
    pub output_dir: PathBuf,
}

impl Config {
    pub fn from_env() -> Self {
        Self {
            database_url: env::var("DATABASE_URL").ok(),
            replay_format: env::var("REPLAY_FORMAT").unwrap_or_else(|_| "gen9ou".to_string()),
            max_pages: env::var("MAX_PAGES")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(3),
            page_limit: env::var("PAGE_LIMIT")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(50),
            request_delay_ms: env::var("REQUEST_DELAY_MS")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(1000),
            output_dir: env::var("OUTPUT_DIR")
                .map(PathBuf::from)
                .unwrap_or_else(|_| PathBuf::from("data/episodes")),
        }
    }
}
