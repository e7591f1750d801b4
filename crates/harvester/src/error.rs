//! Harvester error types

use thiserror::Error;

#[derive(Error, Debug)]
pub enum HarvesterError {
    #[error("Request error: {0}")]
    Request(#[from] reqwest::Error),

    #[error("Upstream HTTP {0}")]
    Status(reqwest::StatusCode),

    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Projection error: {0}")]
    Pov(#[from] replay_core::pov::PovError),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}
