//! Pack resolution and puzzle selection.

use std::collections::{BTreeSet, HashSet};
use std::sync::Arc;

use rand::seq::SliceRandom;
use rand::Rng;
use serde::Serialize;
use tracing::{debug, info};

use crate::config::EngineConfig;
use crate::error::{LoadError, SelectionError};
use crate::history::collect_skeletons;
use crate::loader::PackMapping;
use crate::opening_index::OpeningIndex;
use crate::pack::{BuiltinPack, PackSource};
use crate::position::{render_position, Rendering};
use crate::rating::RatingSelector;
use crate::record::{PuzzleRecord, LICHESS_URL};
use crate::skeleton::PawnSkeleton;

/// One rendered puzzle in a generated pack.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SelectedPuzzle {
    pub puzzle_id: String,
    pub fen: String,
    pub rendering: Rendering,
    pub rating: i32,
    pub training_url: String,
    pub analysis_url: String,
    /// Source game on Lichess, when the corpus row carries one.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub game_url: Option<String>,
}

impl SelectedPuzzle {
    pub fn new(record: &PuzzleRecord, rendering: Rendering, fen: String) -> Self {
        Self {
            puzzle_id: record.puzzle_id.clone(),
            training_url: record.training_url(),
            analysis_url: analysis_url(&fen),
            game_url: record.game_url.clone(),
            rating: record.rating,
            rendering,
            fen,
        }
    }

    /// PGN stub that opens the position with a link back to the puzzle.
    pub fn to_pgn(&self) -> String {
        format!(
            "[FEN \"{}\"]\n[SITE \"{}\"]\n\n*\n\n",
            self.fen, self.training_url
        )
    }
}

/// Ad-hoc analysis board link for any position.
pub fn analysis_url(fen: &str) -> String {
    format!("{LICHESS_URL}/analysis/{}", fen.replace(' ', "_"))
}

pub fn render_pgn_pack(puzzles: &[SelectedPuzzle]) -> String {
    puzzles.iter().map(SelectedPuzzle::to_pgn).collect()
}

/// Long-lived, read-only puzzle cache. Built once, then shared across
/// requests; no operation mutates it.
#[derive(Debug)]
pub struct PuzzleEngine {
    packs: PackMapping,
    openings: OpeningIndex,
    selector: RatingSelector,
}

impl PuzzleEngine {
    pub fn new(packs: PackMapping, openings: OpeningIndex, selector: RatingSelector) -> Self {
        Self {
            packs,
            openings,
            selector,
        }
    }

    /// Load phase packs and the opening index from `config.puzzle_dir`.
    pub fn load(config: &EngineConfig) -> Result<Self, LoadError> {
        let packs = PackMapping::load(config)?;
        let openings = OpeningIndex::load(
            config.opening_file(),
            config.top_openings,
            config.min_skeleton_bucket,
        )?;
        info!(
            "Puzzle engine ready: {} puzzles, {} opening packs",
            packs.get(BuiltinPack::Random).len(),
            openings.opening_count()
        );
        Ok(Self::new(
            packs,
            openings,
            RatingSelector::new(config.rating_window, config.sample_size_threshold),
        ))
    }

    /// Built-in pack names followed by every indexed opening.
    pub fn list_pack_names(&self) -> Vec<String> {
        BuiltinPack::ALL
            .iter()
            .map(|pack| pack.name().to_string())
            .chain(self.openings.opening_names().map(str::to_string))
            .collect()
    }

    pub fn list_opening_names(&self) -> Vec<String> {
        self.openings.opening_names().map(str::to_string).collect()
    }

    /// Built-in packs take precedence over opening names.
    pub fn resolve(&self, pack_name: &str) -> Result<PackSource, SelectionError> {
        if let Some(pack) = BuiltinPack::from_name(pack_name) {
            return Ok(PackSource::Builtin(pack));
        }
        if self.openings.opening(pack_name).is_some() {
            return Ok(PackSource::Opening(pack_name.to_string()));
        }
        Err(SelectionError::UnknownPack(pack_name.to_string()))
    }

    pub fn candidates(&self, source: &PackSource) -> Vec<Arc<PuzzleRecord>> {
        match source {
            PackSource::Builtin(pack) => self.packs.get(*pack).to_vec(),
            PackSource::Opening(name) => self.openings.opening(name).map(<[_]>::to_vec).unwrap_or_default(),
            PackSource::Personalized(observed) => self.personalized_candidates(observed),
        }
    }

    /// Union of the skeleton buckets matching `observed`, largest bucket
    /// first. A puzzle indexed under two matching skeletons appears once.
    fn personalized_candidates(&self, observed: &BTreeSet<PawnSkeleton>) -> Vec<Arc<PuzzleRecord>> {
        let mut seen: HashSet<&str> = HashSet::new();
        let mut union = Vec::new();

        for (skeleton, members) in self.openings.skeleton_buckets() {
            if !observed.contains(skeleton) {
                continue;
            }
            for record in members {
                if seen.insert(record.puzzle_id.as_str()) {
                    union.push(Arc::clone(record));
                }
            }
        }

        union
    }

    pub fn select<R: Rng>(
        &self,
        pack_name: &str,
        count: usize,
        target_rating: Option<i32>,
        rng: &mut R,
    ) -> Result<Vec<SelectedPuzzle>, SelectionError> {
        let source = self.resolve(pack_name)?;
        self.select_from(&source, count, target_rating, rng)
    }

    /// Select from puzzles sharing a pawn structure with the given games
    /// (PGN text). No structural match means no puzzles.
    pub fn select_personalized<'a, I, R>(
        &self,
        games: I,
        count: usize,
        target_rating: Option<i32>,
        rng: &mut R,
    ) -> Result<Vec<SelectedPuzzle>, SelectionError>
    where
        I: IntoIterator<Item = &'a str>,
        R: Rng,
    {
        let source = PackSource::Personalized(collect_skeletons(games));
        self.select_from(&source, count, target_rating, rng)
    }

    pub fn select_from<R: Rng>(
        &self,
        source: &PackSource,
        count: usize,
        target_rating: Option<i32>,
        rng: &mut R,
    ) -> Result<Vec<SelectedPuzzle>, SelectionError> {
        let mut candidates = self.candidates(source);
        if let Some(target) = target_rating {
            candidates = self.selector.select(&candidates, target);
        }
        debug!(
            "Drawing {count} of {} candidates from {}",
            candidates.len(),
            source.label()
        );

        let drawn: Vec<&Arc<PuzzleRecord>> = candidates
            .choose_multiple(rng, count.min(candidates.len()))
            .collect();

        drawn
            .into_iter()
            .map(|record| -> Result<SelectedPuzzle, SelectionError> {
                let rendering = Rendering::from_coin(rng.gen_bool(0.5));
                let fen = render_position(record, rendering)?;
                Ok(SelectedPuzzle::new(record, rendering, fen))
            })
            .collect()
    }
}
