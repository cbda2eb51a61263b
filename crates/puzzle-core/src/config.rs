use std::path::{Path, PathBuf};

use crate::pack::BuiltinPack;

/// File holding the broader opening-tagged corpus.
pub const OPENING_TAG_FILE: &str = "opening_tag.csv";

/// Tunables for building and querying a [`crate::PuzzleEngine`].
#[derive(Clone, Debug)]
pub struct EngineConfig {
    /// Directory containing the curated CSV files.
    pub puzzle_dir: PathBuf,

    /// Number of by-opening packs retained (most frequent first).
    pub top_openings: usize,

    /// A skeleton bucket must hold more than this many puzzles to be kept.
    pub min_skeleton_bucket: usize,

    /// In-window count needed before the rating selector stops widening.
    pub sample_size_threshold: usize,

    /// Half-width of the inclusive rating window.
    pub rating_window: i32,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            puzzle_dir: PathBuf::from("puzzles"),
            top_openings: 256,
            min_skeleton_bucket: 5,
            sample_size_threshold: 1000,
            rating_window: 100,
        }
    }
}

impl EngineConfig {
    pub fn phase_file(&self, pack: BuiltinPack) -> Option<PathBuf> {
        pack.file_stem()
            .map(|stem| self.puzzle_dir.join(format!("{stem}.csv")))
    }

    pub fn opening_file(&self) -> PathBuf {
        self.puzzle_dir.join(OPENING_TAG_FILE)
    }

    pub fn with_puzzle_dir<P: AsRef<Path>>(mut self, dir: P) -> Self {
        self.puzzle_dir = dir.as_ref().to_path_buf();
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_file_layout() {
        let config = EngineConfig::default().with_puzzle_dir("/data");
        assert_eq!(
            config.phase_file(BuiltinPack::Middlegame),
            Some(PathBuf::from("/data/middlegame.csv"))
        );
        assert_eq!(config.phase_file(BuiltinPack::Random), None);
        assert_eq!(config.opening_file(), PathBuf::from("/data/opening_tag.csv"));
    }
}
