use std::time::Duration;

use reqwest::Client;
use serde_json::Value;

use replay_core::replay_data::RawReplay;

use crate::error::HarvesterError;

const BASE_URL: &str = "https://replay.pokemonshowdown.com";

/// One entry from the replay search listing.
#[derive(Debug, Clone)]
pub struct ReplayListing {
    pub id: String,
    pub players: Vec<String>,
    pub rating: Option<i64>,
}

/// One page of the search listing. `has_more` mirrors the upstream
/// convention of returning 51 entries when another page exists.
#[derive(Debug, Clone)]
pub struct ListingPage {
    pub replays: Vec<ReplayListing>,
    pub has_more: bool,
}

pub struct ShowdownClient {
    client: Client,
    request_delay: Duration,
}

impl ShowdownClient {
    pub fn new(request_delay_ms: u64) -> Self {
        let client = Client::builder()
            .user_agent("ShowdownHarvester/1.0")
            .timeout(Duration::from_secs(30))
            .build()
            .unwrap();
        Self {
            client,
            request_delay: Duration::from_millis(request_delay_ms),
        }
    }

    /// Fetch one page of the replay search listing for a format.
    /// Entries without an id or player list are skipped.
    pub async fn fetch_listing_page(
        &self,
        format: &str,
        page: u32,
    ) -> Result<ListingPage, HarvesterError> {
        let url = format!("{BASE_URL}/search.json");
        let page_str = page.to_string();

        // Rate limit
        tokio::time::sleep(self.request_delay).await;

        let resp = self
            .client
            .get(&url)
            .query(&[("format", format), ("page", page_str.as_str())])
            .send()
            .await?;

        if !resp.status().is_success() {
            return Err(HarvesterError::Status(resp.status()));
        }

        let data: Value = resp.json().await?;
        let entries = data.as_array().cloned().unwrap_or_default();
        let has_more = entries.len() > 50;

        let replays = entries
            .iter()
            .filter_map(|entry| {
                let id = entry.get("id")?.as_str()?.to_string();
                let players: Vec<String> = entry
                    .get("players")?
                    .as_array()?
                    .iter()
                    .filter_map(|p| p.as_str().map(str::to_string))
                    .collect();
                if players.is_empty() {
                    return None;
                }
                let rating = entry.get("rating").and_then(Value::as_i64);
                Some(ReplayListing { id, players, rating })
            })
            .collect();

        Ok(ListingPage { replays, has_more })
    }

    /// Fetch up to `max_pages` listing pages, keeping at most
    /// `per_page_limit` replays from each. Iterative with a per-request
    /// delay; stops early when the upstream reports no further pages.
    pub async fn fetch_listing(
        &self,
        format: &str,
        max_pages: u32,
        per_page_limit: usize,
    ) -> Result<Vec<ReplayListing>, HarvesterError> {
        let mut all = Vec::new();

        for page in 1..=max_pages {
            let mut page_data = self.fetch_listing_page(format, page).await?;
            page_data.replays.truncate(per_page_limit);
            all.extend(page_data.replays);

            if !page_data.has_more {
                break;
            }
        }

        Ok(all)
    }

    /// Fetch one raw replay record by id.
    pub async fn fetch_replay(&self, replay_id: &str) -> Result<RawReplay, HarvesterError> {
        let url = format!("{BASE_URL}/{replay_id}.json");

        // Rate limit
        tokio::time::sleep(self.request_delay).await;

        let resp = self.client.get(&url).send().await?;

        if !resp.status().is_success() {
            return Err(HarvesterError::Status(resp.status()));
        }

        Ok(resp.json().await?)
    }
}
