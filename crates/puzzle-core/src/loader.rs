//! Reading curated puzzle CSVs into pack collections.

use std::collections::HashMap;
use std::fs::File;
use std::io::{BufReader, Read};
use std::path::Path;
use std::sync::Arc;

use tracing::info;

use crate::config::EngineConfig;
use crate::error::LoadError;
use crate::pack::BuiltinPack;
use crate::record::{PuzzleRecord, RawPuzzleRow};

/// Parse every row of a puzzle CSV. Stops at the first bad row.
pub fn read_records<R: Read>(reader: R, source_name: &str) -> Result<Vec<PuzzleRecord>, LoadError> {
    let mut csv_reader = csv::Reader::from_reader(reader);
    let mut records = Vec::new();

    for (idx, row) in csv_reader.deserialize::<RawPuzzleRow>().enumerate() {
        let row = row.map_err(|source| LoadError::Csv {
            source_name: source_name.to_string(),
            source,
        })?;
        let record = PuzzleRecord::try_from(row).map_err(|source| LoadError::Row {
            source_name: source_name.to_string(),
            // 1-based, after the header line
            row: idx + 2,
            source,
        })?;
        records.push(record);
    }

    Ok(records)
}

pub fn load_records<P: AsRef<Path>>(path: P) -> Result<Vec<PuzzleRecord>, LoadError> {
    let path = path.as_ref();
    let file = File::open(path).map_err(|source| LoadError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    read_records(BufReader::new(file), &path.display().to_string())
}

/// Built-in pack name -> puzzles, fixed after construction.
#[derive(Debug, Default)]
pub struct PackMapping {
    packs: HashMap<BuiltinPack, Vec<Arc<PuzzleRecord>>>,
}

impl PackMapping {
    /// Load the three phase files from the configured directory.
    pub fn load(config: &EngineConfig) -> Result<Self, LoadError> {
        Ok(Self::from_phases(
            load_phase(config, BuiltinPack::Opening)?,
            load_phase(config, BuiltinPack::Middlegame)?,
            load_phase(config, BuiltinPack::Endgame)?,
        ))
    }

    pub fn from_phases(
        opening: Vec<PuzzleRecord>,
        middlegame: Vec<PuzzleRecord>,
        endgame: Vec<PuzzleRecord>,
    ) -> Self {
        let mut packs = HashMap::new();
        let mut random = Vec::with_capacity(opening.len() + middlegame.len() + endgame.len());

        for (pack, records) in BuiltinPack::PHASES.into_iter().zip([opening, middlegame, endgame]) {
            let shared: Vec<Arc<PuzzleRecord>> = records.into_iter().map(Arc::new).collect();
            random.extend(shared.iter().cloned());
            packs.insert(pack, shared);
        }
        packs.insert(BuiltinPack::Random, random);

        Self { packs }
    }

    pub fn get(&self, pack: BuiltinPack) -> &[Arc<PuzzleRecord>] {
        self.packs.get(&pack).map(Vec::as_slice).unwrap_or_default()
    }
}

fn load_phase(config: &EngineConfig, pack: BuiltinPack) -> Result<Vec<PuzzleRecord>, LoadError> {
    let path = config.phase_file(pack).unwrap_or_default();
    let records = load_records(&path)?;
    info!("Loaded {} puzzles for pack {} from {}", records.len(), pack, path.display());
    Ok(records)
}
