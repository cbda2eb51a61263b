//! Narrowing a candidate list to a target rating.

use std::sync::Arc;

use tracing::debug;

use crate::record::PuzzleRecord;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct RatingSelector {
    /// Half-width of the inclusive window around the target.
    pub window: i32,
    /// Minimum in-window population; also the size of the fallback result.
    pub threshold: usize,
}

impl Default for RatingSelector {
    fn default() -> Self {
        Self {
            window: 100,
            threshold: 1000,
        }
    }
}

impl RatingSelector {
    pub fn new(window: i32, threshold: usize) -> Self {
        Self { window, threshold }
    }

    /// Returns the in-window subset when it is well populated. Otherwise
    /// returns the `threshold` candidates closest to `target`, which may lie
    /// outside the window. Input order is kept in both cases (for ties in the
    /// fallback ranking).
    pub fn select(&self, candidates: &[Arc<PuzzleRecord>], target: i32) -> Vec<Arc<PuzzleRecord>> {
        let low = target.saturating_sub(self.window);
        let high = target.saturating_add(self.window);

        let in_window: Vec<Arc<PuzzleRecord>> = candidates
            .iter()
            .filter(|r| (low..=high).contains(&r.rating))
            .cloned()
            .collect();

        if in_window.len() >= self.threshold {
            return in_window;
        }

        debug!(
            "Rating band {low}..={high} has {} puzzles (< {}), ranking {} candidates by distance",
            in_window.len(),
            self.threshold,
            candidates.len()
        );

        let mut ranked: Vec<Arc<PuzzleRecord>> = candidates.to_vec();
        // sort_by_key is stable: equal distances keep input order
        ranked.sort_by_key(|r| (i64::from(r.rating) - i64::from(target)).abs());
        ranked.truncate(self.threshold);
        ranked
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pool(ratings: &[i32]) -> Vec<Arc<PuzzleRecord>> {
        ratings
            .iter()
            .enumerate()
            .map(|(i, &rating)| {
                Arc::new(PuzzleRecord {
                    puzzle_id: format!("p{i}"),
                    fen: "8/8/8/8/8/8/8/K6k w - - 0 1".into(),
                    moves: vec!["a1a2".into()],
                    rating,
                    rating_deviation: 80,
                    popularity: 50,
                    plays: 10,
                    themes: String::new(),
                    opening_tags: String::new(),
                    game_url: None,
                })
            })
            .collect()
    }

    fn ids(records: &[Arc<PuzzleRecord>]) -> Vec<&str> {
        records.iter().map(|r| r.puzzle_id.as_str()).collect()
    }

    #[test]
    fn test_dense_window_returns_exact_subset_in_order() {
        let candidates = pool(&[1500, 1000, 950, 2000, 1100, 900, 1101]);
        let selector = RatingSelector::new(100, 3);
        let picked = selector.select(&candidates, 1000);
        // 1000, 950, 1100, 900 are inside [900, 1100]; 1101 is not.
        assert_eq!(ids(&picked), vec!["p1", "p2", "p4", "p5"]);
    }

    #[test]
    fn test_sparse_window_falls_back_to_closest() {
        let candidates = pool(&[1300, 900, 1600, 1100, 700]);
        let selector = RatingSelector::new(100, 3);
        let picked = selector.select(&candidates, 1000);
        // Distances: 300, 100, 600, 100, 300 -> 900 and 1100 tie (input order), then 1300 before 700.
        assert_eq!(ids(&picked), vec!["p1", "p3", "p0"]);
    }

    #[test]
    fn test_fallback_returns_everything_when_pool_is_small() {
        let candidates = pool(&[900, 1100, 1300]);
        let picked = RatingSelector::default().select(&candidates, 1000);
        assert_eq!(ids(&picked), vec!["p0", "p1", "p2"]);
    }

    #[test]
    fn test_fallback_never_exceeds_threshold() {
        let ratings: Vec<i32> = (0..50).map(|i| 2000 + i * 10).collect();
        let candidates = pool(&ratings);
        let picked = RatingSelector::new(100, 10).select(&candidates, 500);
        assert_eq!(picked.len(), 10);
        assert!(picked.iter().all(|r| r.rating < 2100));
    }

    #[test]
    fn test_empty_candidates() {
        assert!(RatingSelector::default().select(&[], 1500).is_empty());
    }
}
