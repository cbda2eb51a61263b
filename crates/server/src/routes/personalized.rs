use std::sync::Arc;

use axum::{
    extract::{Path, Query},
    Extension, Json,
};
use puzzle_core::PuzzleEngine;
use serde_json::{json, Value as JsonValue};

use super::SelectionQuery;
use crate::clients::lichess::LichessClient;
use crate::config::Config;
use crate::error::AppError;

/// Recent games for `username`. A failed fetch is treated as an empty
/// history so the request still succeeds.
async fn recent_games(client: &LichessClient, username: &str, max_games: usize) -> Vec<String> {
    match client.fetch_user_games(username, max_games).await {
        Ok(games) => {
            tracing::info!("Fetched {} games for {username}", games.len());
            games
        }
        Err(e) => {
            tracing::warn!("Failed to fetch games for {username}: {e}");
            Vec::new()
        }
    }
}

/// GET /api/personalized/{username}?count=4&rating=1500&max_games=50
/// Puzzles whose pawn structure occurs in the user's recent Lichess games.
pub async fn get_personalized(
    Extension(engine): Extension<Arc<PuzzleEngine>>,
    Extension(config): Extension<Config>,
    Extension(lichess): Extension<LichessClient>,
    Path(username): Path<String>,
    Query(query): Query<SelectionQuery>,
) -> Result<Json<JsonValue>, AppError> {
    let count = query.count()?;
    let max_games = query.max_games.unwrap_or(config.recent_games);

    let games = recent_games(&lichess, &username, max_games).await;

    let mut rng = query.rng();
    let puzzles = engine.select_personalized(
        games.iter().map(String::as_str),
        count,
        query.rating,
        &mut rng,
    )?;
    let total = puzzles.len();

    Ok(Json(json!({
        "username": username,
        "games": games.len(),
        "puzzles": puzzles,
        "total": total,
    })))
}
