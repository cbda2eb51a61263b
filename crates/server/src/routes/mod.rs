pub mod health;
pub mod packs;
pub mod personalized;

use rand::rngs::StdRng;
use rand::SeedableRng;
use serde::Deserialize;

use crate::error::AppError;

pub const DEFAULT_COUNT: usize = 4;

/// Query parameters shared by every selection endpoint.
#[derive(Debug, Default, Deserialize)]
pub struct SelectionQuery {
    pub count: Option<usize>,
    pub rating: Option<i32>,
    /// Fixes the draw and the renderings for reproducible packs.
    pub seed: Option<u64>,
    /// Personalized packs only.
    pub max_games: Option<usize>,
}

impl SelectionQuery {
    pub fn count(&self) -> Result<usize, AppError> {
        match self.count.unwrap_or(DEFAULT_COUNT) {
            0 => Err(AppError::BadRequest("count must be at least 1".to_string())),
            n => Ok(n),
        }
    }

    pub fn rng(&self) -> StdRng {
        match self.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        }
    }
}

#[cfg(test)]
pub(crate) mod test_support {
    use std::sync::Arc;

    use puzzle_core::loader::PackMapping;
    use puzzle_core::opening_index::OpeningIndex;
    use puzzle_core::rating::RatingSelector;
    use puzzle_core::{PuzzleEngine, PuzzleRecord};

    pub const START: &str = "rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w KQkq - 0 1";

    pub fn record(id: &str, rating: i32, tags: &str) -> PuzzleRecord {
        PuzzleRecord {
            puzzle_id: id.into(),
            fen: START.into(),
            moves: vec!["e2e4".into(), "e7e5".into()],
            rating,
            rating_deviation: 80,
            popularity: 90,
            plays: 1000,
            themes: "opening".into(),
            opening_tags: tags.into(),
            game_url: None,
        }
    }

    pub fn engine() -> Arc<PuzzleEngine> {
        let opening = (0..6).map(|i| record(&format!("o{i}"), 1000 + i * 100, "")).collect();
        let middlegame = vec![record("m0", 1500, "")];
        let endgame = vec![record("e0", 1800, "")];
        let tagged = (0..6)
            .map(|i| record(&format!("t{i}"), 1200, "kings_pawn_game"))
            .collect();
        let openings = OpeningIndex::build(tagged, 256, 5).expect("fixture index");
        Arc::new(PuzzleEngine::new(
            PackMapping::from_phases(opening, middlegame, endgame),
            openings,
            RatingSelector::new(100, 1000),
        ))
    }
}
