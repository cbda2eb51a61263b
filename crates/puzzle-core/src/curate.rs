//! Offline curation: split the full Lichess puzzle export into the phase and
//! opening files the engine loads.

use std::collections::HashMap;
use std::fs::{self, File};
use std::io::Read;
use std::path::Path;

use tracing::info;

use crate::error::LoadError;
use crate::record::{PuzzleRecord, RawPuzzleRow};

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PuzzleFilter {
    pub min_rating: i32,
    pub max_rating: i32,
    pub min_popularity: i32,
    pub min_plays: u32,
    /// Substring that must appear in the theme list.
    pub theme_tag: Option<String>,
    /// Substring that must appear in the opening tags.
    pub opening_tag: Option<String>,
}

impl PuzzleFilter {
    pub fn matches(&self, record: &PuzzleRecord) -> bool {
        (self.min_rating..=self.max_rating).contains(&record.rating)
            && record.popularity >= self.min_popularity
            && record.plays >= self.min_plays
            && self
                .theme_tag
                .as_deref()
                .map_or(true, |tag| record.themes.contains(tag))
            && self
                .opening_tag
                .as_deref()
                .map_or(true, |tag| record.opening_tags.contains(tag))
    }
}

/// Output file stem -> filter. Produces the files `EngineConfig` expects.
pub fn default_filters() -> Vec<(&'static str, PuzzleFilter)> {
    let phase = |theme: &str, min_plays: u32| PuzzleFilter {
        min_rating: 750,
        max_rating: 2000,
        min_popularity: 75,
        min_plays,
        theme_tag: Some(theme.to_string()),
        opening_tag: None,
    };

    vec![
        ("opening", phase("opening", 1000)),
        ("middlegame", phase("middlegame", 10_000)),
        ("endgame", phase("endgame", 10_000)),
        (
            "opening_tag",
            PuzzleFilter {
                min_rating: 500,
                max_rating: 2500,
                min_popularity: 25,
                min_plays: 10,
                theme_tag: Some("opening".to_string()),
                opening_tag: None,
            },
        ),
    ]
}

/// Stream `input` once, copying each matching row verbatim to
/// `<out_dir>/<name>.csv`. A row may land in several files. Returns the
/// number of rows written per filter, in filter order.
pub fn curate<R: Read>(
    input: R,
    out_dir: &Path,
    filters: &[(&str, PuzzleFilter)],
) -> Result<Vec<(String, usize)>, LoadError> {
    let csv_error = |source| LoadError::Csv {
        source_name: "curation input".to_string(),
        source,
    };

    fs::create_dir_all(out_dir).map_err(|source| LoadError::Io {
        path: out_dir.to_path_buf(),
        source,
    })?;

    let mut reader = csv::Reader::from_reader(input);
    let headers = reader.headers().map_err(csv_error)?.clone();

    let mut writers = HashMap::new();
    for (name, _) in filters {
        let path = out_dir.join(format!("{name}.csv"));
        let file = File::create(&path).map_err(|source| LoadError::Io {
            path: path.clone(),
            source,
        })?;
        let mut writer = csv::Writer::from_writer(file);
        writer.write_record(&headers).map_err(csv_error)?;
        writers.insert(*name, writer);
    }

    let mut counts = vec![0usize; filters.len()];
    for (idx, row) in reader.records().enumerate() {
        if idx > 0 && idx % 100_000 == 0 {
            info!("Processed {idx} rows");
        }

        let row = row.map_err(csv_error)?;
        let raw: RawPuzzleRow = row.deserialize(Some(&headers)).map_err(csv_error)?;
        let record = PuzzleRecord::try_from(raw).map_err(|source| LoadError::Row {
            source_name: "curation input".to_string(),
            row: idx + 2,
            source,
        })?;

        for (slot, (name, filter)) in filters.iter().enumerate() {
            if !filter.matches(&record) {
                continue;
            }
            if let Some(writer) = writers.get_mut(name) {
                writer.write_record(&row).map_err(csv_error)?;
                counts[slot] += 1;
            }
        }
    }

    for writer in writers.values_mut() {
        writer.flush().map_err(|source| LoadError::Io {
            path: out_dir.to_path_buf(),
            source,
        })?;
    }

    Ok(filters
        .iter()
        .zip(counts)
        .map(|((name, _), count)| (name.to_string(), count))
        .collect())
}
