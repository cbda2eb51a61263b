use std::sync::Arc;

use axum::{
    extract::{Path, Query},
    Extension, Json,
};
use puzzle_core::{render_pgn_pack, PuzzleEngine, SelectedPuzzle};
use serde_json::{json, Value as JsonValue};

use super::SelectionQuery;
use crate::error::AppError;

/// GET /api/packs
/// Built-in packs first, then every opening pack.
pub async fn list_packs(Extension(engine): Extension<Arc<PuzzleEngine>>) -> Json<JsonValue> {
    Json(json!({ "packs": engine.list_pack_names() }))
}

/// GET /api/openings
pub async fn list_openings(Extension(engine): Extension<Arc<PuzzleEngine>>) -> Json<JsonValue> {
    Json(json!({ "openings": engine.list_opening_names() }))
}

fn select(
    engine: &PuzzleEngine,
    name: &str,
    query: &SelectionQuery,
) -> Result<Vec<SelectedPuzzle>, AppError> {
    let count = query.count()?;
    let mut rng = query.rng();
    Ok(engine.select(name, count, query.rating, &mut rng)?)
}

/// GET /api/packs/{name}/puzzles?count=4&rating=1200&seed=7
pub async fn get_pack_puzzles(
    Extension(engine): Extension<Arc<PuzzleEngine>>,
    Path(name): Path<String>,
    Query(query): Query<SelectionQuery>,
) -> Result<Json<JsonValue>, AppError> {
    let puzzles = select(&engine, &name, &query)?;
    let total = puzzles.len();

    Ok(Json(json!({
        "pack": name,
        "puzzles": puzzles,
        "total": total,
    })))
}

/// GET /api/packs/{name}/pgn
/// Same selection as `/puzzles`, rendered as a PGN file.
pub async fn get_pack_pgn(
    Extension(engine): Extension<Arc<PuzzleEngine>>,
    Path(name): Path<String>,
    Query(query): Query<SelectionQuery>,
) -> Result<String, AppError> {
    let puzzles = select(&engine, &name, &query)?;
    Ok(render_pgn_pack(&puzzles))
}
