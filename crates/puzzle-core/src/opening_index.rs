//! Opening lookups derived from the opening-tagged corpus: by declared
//! opening name and by pawn skeleton.

use std::collections::{HashMap, HashSet};
use std::hash::Hash;
use std::path::Path;
use std::sync::Arc;

use tracing::info;

use crate::error::LoadError;
use crate::loader::load_records;
use crate::position::position_after_first_move;
use crate::record::PuzzleRecord;
use crate::skeleton::PawnSkeleton;

/// `queens_gambit_declined` -> `Queens Gambit Declined`
pub fn display_name(tag: &str) -> String {
    tag.split('_')
        .filter(|word| !word.is_empty())
        .map(capitalize)
        .collect::<Vec<_>>()
        .join(" ")
}

fn capitalize(word: &str) -> String {
    let mut chars = word.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars.flat_map(char::to_lowercase)).collect(),
        None => String::new(),
    }
}

/// Groups records by key, remembering the order keys were first seen.
struct Buckets<K> {
    lookup: HashMap<K, usize>,
    entries: Vec<(K, Vec<Arc<PuzzleRecord>>)>,
}

impl<K: Hash + Eq + Clone> Buckets<K> {
    fn new() -> Self {
        Self {
            lookup: HashMap::new(),
            entries: Vec::new(),
        }
    }

    fn push(&mut self, key: K, record: &Arc<PuzzleRecord>) {
        let idx = match self.lookup.get(&key) {
            Some(&idx) => idx,
            None => {
                let idx = self.entries.len();
                self.lookup.insert(key.clone(), idx);
                self.entries.push((key, Vec::new()));
                idx
            }
        };
        self.entries[idx].1.push(Arc::clone(record));
    }

    /// Largest first; equal sizes keep encounter order.
    fn into_by_size(self) -> Vec<(K, Vec<Arc<PuzzleRecord>>)> {
        let mut entries = self.entries;
        entries.sort_by(|a, b| b.1.len().cmp(&a.1.len()));
        entries
    }
}

/// Immutable opening lookups, rebuilt from scratch on every load.
#[derive(Debug, Default)]
pub struct OpeningIndex {
    /// Ascending by display name.
    by_opening: Vec<(String, Vec<Arc<PuzzleRecord>>)>,
    opening_lookup: HashMap<String, usize>,
    /// Descending by bucket size.
    by_skeleton: Vec<(PawnSkeleton, Vec<Arc<PuzzleRecord>>)>,
    skeleton_lookup: HashMap<PawnSkeleton, usize>,
}

impl OpeningIndex {
    pub fn load<P: AsRef<Path>>(
        path: P,
        top_openings: usize,
        min_skeleton_bucket: usize,
    ) -> Result<Self, LoadError> {
        let path = path.as_ref();
        let records = load_records(path)?;
        let index = Self::build(records, top_openings, min_skeleton_bucket).map_err(|e| match e {
            LoadError::Render { source, .. } => LoadError::Render {
                source_name: path.display().to_string(),
                source,
            },
            other => other,
        })?;
        info!(
            "Built opening index from {}: {} openings, {} pawn skeletons",
            path.display(),
            index.by_opening.len(),
            index.by_skeleton.len()
        );
        Ok(index)
    }

    /// Build both lookups. Fails if any record's first move is illegal, since
    /// the post-move skeleton cannot be derived.
    pub fn build(
        records: Vec<PuzzleRecord>,
        top_openings: usize,
        min_skeleton_bucket: usize,
    ) -> Result<Self, LoadError> {
        let mut openings: Buckets<String> = Buckets::new();
        let mut skeletons: Buckets<PawnSkeleton> = Buckets::new();

        for record in records.into_iter().map(Arc::new) {
            let mut names = HashSet::new();
            for tag in record.opening_tag_list() {
                let name = display_name(tag);
                if names.insert(name.clone()) {
                    openings.push(name, &record);
                }
            }

            let base = PawnSkeleton::from_fen(&record.fen);
            let after = position_after_first_move(&record)
                .map(|pos| PawnSkeleton::from_position(&pos))
                .map_err(|source| LoadError::Render {
                    source_name: "opening index".to_string(),
                    source,
                })?;
            let differs = after != base;
            skeletons.push(base, &record);
            if differs {
                skeletons.push(after, &record);
            }
        }

        let mut by_opening = openings.into_by_size();
        by_opening.truncate(top_openings);
        by_opening.sort_by(|a, b| a.0.cmp(&b.0));

        let by_skeleton: Vec<_> = skeletons
            .into_by_size()
            .into_iter()
            .filter(|(_, members)| members.len() > min_skeleton_bucket)
            .collect();

        let opening_lookup = by_opening
            .iter()
            .enumerate()
            .map(|(idx, (name, _))| (name.clone(), idx))
            .collect();
        let skeleton_lookup = by_skeleton
            .iter()
            .enumerate()
            .map(|(idx, (skeleton, _))| (skeleton.clone(), idx))
            .collect();

        Ok(Self {
            by_opening,
            opening_lookup,
            by_skeleton,
            skeleton_lookup,
        })
    }

    pub fn opening_names(&self) -> impl Iterator<Item = &str> {
        self.by_opening.iter().map(|(name, _)| name.as_str())
    }

    pub fn opening(&self, name: &str) -> Option<&[Arc<PuzzleRecord>]> {
        self.opening_lookup
            .get(name)
            .map(|&idx| self.by_opening[idx].1.as_slice())
    }

    pub fn skeleton(&self, skeleton: &PawnSkeleton) -> Option<&[Arc<PuzzleRecord>]> {
        self.skeleton_lookup
            .get(skeleton)
            .map(|&idx| self.by_skeleton[idx].1.as_slice())
    }

    /// Retained skeleton buckets, largest first.
    pub fn skeleton_buckets(&self) -> impl Iterator<Item = (&PawnSkeleton, &[Arc<PuzzleRecord>])> {
        self.by_skeleton
            .iter()
            .map(|(skeleton, members)| (skeleton, members.as_slice()))
    }

    pub fn opening_count(&self) -> usize {
        self.by_opening.len()
    }

    pub fn skeleton_count(&self) -> usize {
        self.by_skeleton.len()
    }
}

/// Frequency of every raw opening tag, rarest first.
pub fn tag_counts(records: &[PuzzleRecord]) -> Vec<(String, usize)> {
    let mut counts: Vec<(String, usize)> = Vec::new();
    let mut lookup: HashMap<&str, usize> = HashMap::new();

    for tag in records.iter().flat_map(|r| r.opening_tag_list()) {
        match lookup.get(tag) {
            Some(&idx) => counts[idx].1 += 1,
            None => {
                lookup.insert(tag, counts.len());
                counts.push((tag.to_string(), 1));
            }
        }
    }

    counts.sort_by_key(|(_, count)| *count);
    counts
}
