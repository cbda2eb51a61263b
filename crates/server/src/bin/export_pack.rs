//! Export a generated puzzle pack to a file.
//!
//! Usage: cargo run --release --bin export-pack -- [--pack Random] [--count 100]
//!          [--rating 1000] [--format csv|pgn] [--seed N] [--out path]
//!
//! Reads the corpus from PUZZLE_DIR (default `puzzles`). Writes to stdout
//! when `--out` is not given.

use puzzle_core::{render_pgn_pack, PuzzleEngine, SelectedPuzzle};
use rand::rngs::StdRng;
use rand::SeedableRng;
use server::config::Config;
use std::env;
use std::fs::File;
use std::io::{self, Write};
use tracing_subscriber::EnvFilter;

const DEFAULT_PACK: &str = "Random";
const DEFAULT_COUNT: usize = 100;
const DEFAULT_RATING: i32 = 1000;

#[derive(Clone, Copy, PartialEq, Eq)]
enum Format {
    Csv,
    Pgn,
}

fn write_csv<W: Write>(out: W, puzzles: &[SelectedPuzzle]) -> anyhow::Result<()> {
    let mut writer = csv::Writer::from_writer(out);
    writer.write_record(["fen", "analysis_url"])?;
    for puzzle in puzzles {
        writer.write_record([puzzle.fen.as_str(), puzzle.analysis_url.as_str()])?;
    }
    writer.flush()?;
    Ok(())
}

fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()))
        .with_writer(io::stderr)
        .init();

    let args: Vec<String> = env::args().collect();

    let mut pack = DEFAULT_PACK.to_string();
    let mut count = DEFAULT_COUNT;
    let mut rating = Some(DEFAULT_RATING);
    let mut format = Format::Csv;
    let mut seed: Option<u64> = None;
    let mut out_path: Option<String> = None;

    let mut i = 1;
    while i < args.len() {
        let value = args.get(i + 1);
        match args[i].as_str() {
            "--pack" => {
                if let Some(v) = value {
                    pack = v.clone();
                }
                i += 2;
            }
            "--count" => {
                count = value.and_then(|s| s.parse().ok()).unwrap_or(DEFAULT_COUNT);
                i += 2;
            }
            "--rating" => {
                // `--rating none` disables the rating filter
                rating = value.and_then(|s| s.parse().ok());
                i += 2;
            }
            "--format" => {
                format = match value.map(String::as_str) {
                    Some("pgn") => Format::Pgn,
                    Some("csv") => Format::Csv,
                    other => anyhow::bail!("Unknown format: {}", other.unwrap_or("")),
                };
                i += 2;
            }
            "--seed" => {
                seed = value.and_then(|s| s.parse().ok());
                i += 2;
            }
            "--out" => {
                out_path = value.cloned();
                i += 2;
            }
            other => {
                eprintln!("Ignoring unknown argument: {other}");
                i += 1;
            }
        }
    }

    if count == 0 {
        anyhow::bail!("--count must be at least 1");
    }

    let config = Config::from_env();
    let engine = PuzzleEngine::load(&config.engine)?;

    let mut rng = match seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    };
    let puzzles = engine.select(&pack, count, rating, &mut rng)?;
    eprintln!("Selected {} puzzles from pack {}", puzzles.len(), pack);

    let out: Box<dyn Write> = match &out_path {
        Some(path) => Box::new(File::create(path)?),
        None => Box::new(io::stdout().lock()),
    };

    match format {
        Format::Csv => write_csv(out, &puzzles)?,
        Format::Pgn => {
            let mut out = out;
            out.write_all(render_pgn_pack(&puzzles).as_bytes())?;
            out.flush()?;
        }
    }

    if let Some(path) = out_path {
        eprintln!("Wrote {}", path);
    }
    Ok(())
}
