use std::time::Duration;

use reqwest::Client;
use serde_json::Value;

/// Standard-chess speeds; excludes every variant.
const STANDARD_PERF_TYPES: &str = "ultraBullet,bullet,blitz,rapid,classical,correspondence";

#[derive(Debug, thiserror::Error)]
pub enum LichessError {
    #[error("Request error: {0}")]
    Request(#[from] reqwest::Error),

    #[error("User not found: {0}")]
    UserNotFound(String),

    #[error("HTTP {0}")]
    Status(reqwest::StatusCode),
}

#[derive(Clone)]
pub struct LichessClient {
    client: Client,
    base_url: String,
}

impl LichessClient {
    pub fn new(base_url: impl Into<String>) -> Result<Self, LichessError> {
        let client = Client::builder()
            .user_agent("TacticsPacks/1.0")
            .timeout(Duration::from_secs(60))
            .build()?;
        Ok(Self {
            client,
            base_url: base_url.into().trim_end_matches('/').to_string(),
        })
    }

    /// Fetch the PGN text of a user's most recent games, newest first.
    pub async fn fetch_user_games(
        &self,
        username: &str,
        max_games: usize,
    ) -> Result<Vec<String>, LichessError> {
        let url = format!("{}/api/games/user/{}", self.base_url, username);
        let params = [
            ("pgnInJson", "true".to_string()),
            ("moves", "true".to_string()),
            ("max", max_games.to_string()),
            ("perfType", STANDARD_PERF_TYPES.to_string()),
        ];

        let resp = self
            .client
            .get(&url)
            .query(&params)
            .header("Accept", "application/x-ndjson")
            .send()
            .await?;

        if resp.status() == reqwest::StatusCode::NOT_FOUND {
            return Err(LichessError::UserNotFound(username.to_string()));
        }

        if !resp.status().is_success() {
            return Err(LichessError::Status(resp.status()));
        }

        let text = resp.text().await?;
        Ok(parse_game_stream(&text))
    }
}

/// Pull the `pgn` field out of each NDJSON line. Lines that fail to parse
/// or carry no PGN are skipped.
pub fn parse_game_stream(text: &str) -> Vec<String> {
    let mut games = Vec::new();

    for line in text.lines() {
        let line = line.trim();
        if line.is_empty() {
            continue;
        }

        match serde_json::from_str::<Value>(line) {
            Ok(game_data) => {
                if let Some(pgn) = game_data.get("pgn").and_then(|v| v.as_str()) {
                    if !pgn.is_empty() {
                        games.push(pgn.to_string());
                    }
                }
            }
            Err(e) => {
                tracing::warn!("Failed to parse Lichess game JSON: {e}");
            }
        }
    }

    games
}
