use async_trait::async_trait;
use reqwest::{Client, StatusCode};
use serde_json::Value;
use thiserror::Error;
use tracing::debug;

use crate::services::player_service::PlayerFetcher;

pub const SLEEPER_PLAYERS_URL: &str = "https://api.sleeper.app/v1/players/nfl";

/// Why a fetch attempt produced no usable payload. The service treats all
/// variants the same (fall back to the cached snapshot if one exists); they
/// only differ in the log line.
#[derive(Debug, Error)]
pub enum FetchError {
    #[error("request to Sleeper failed: {0}")]
    Transport(#[from] reqwest::Error),
    #[error("Sleeper returned status {0}")]
    Status(StatusCode),
    #[error("Sleeper response was not valid JSON: {0}")]
    Decode(reqwest::Error),
}

pub struct SleeperApi {
    client: Client,
    url: String,
}

impl SleeperApi {
    pub fn new() -> Self {
        Self::with_url(SLEEPER_PLAYERS_URL)
    }

    /// Point the client at a different endpoint, for tests or a local mirror.
    pub fn with_url(url: impl Into<String>) -> Self {
        Self {
            client: Client::new(),
            url: url.into(),
        }
    }
}

impl Default for SleeperApi {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl PlayerFetcher for SleeperApi {
    async fn fetch_players(&self) -> Result<Value, FetchError> {
        debug!("Sending request to {}", self.url);
        let response = self.client.get(&self.url).send().await?;

        let status = response.status();
        if !status.is_success() {
            return Err(FetchError::Status(status));
        }

        let players: Value = response.json().await.map_err(FetchError::Decode)?;
        Ok(players)
    }
}
