//! Split the Lichess puzzle export into the curated pack files.
//!
//! Usage:
//!   cargo run --release --bin curate-puzzles -- <lichess_db_puzzle.csv> [--out-dir puzzles]
//!   cargo run --release --bin curate-puzzles -- stats <opening_tag.csv>

use puzzle_core::curate::{curate, default_filters};
use puzzle_core::loader::load_records;
use puzzle_core::opening_index::tag_counts;
use std::env;
use std::fs::File;
use std::io::BufReader;
use std::path::PathBuf;
use std::time::Instant;
use tracing_subscriber::EnvFilter;

const DEFAULT_OUT_DIR: &str = "puzzles";

fn usage(program: &str) -> ! {
    eprintln!("Usage: {program} <input.csv> [--out-dir DIR]");
    eprintln!("       {program} stats <input.csv>");
    std::process::exit(1);
}

fn print_stats(input: &str) -> anyhow::Result<()> {
    let records = load_records(input)?;
    println!("{} puzzles in {}", records.len(), input);
    println!();

    for (tag, count) in tag_counts(&records) {
        println!("{count:>8}  {tag}");
    }
    Ok(())
}

fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()))
        .init();

    let args: Vec<String> = env::args().collect();
    if args.len() < 2 {
        usage(&args[0]);
    }

    if args[1] == "stats" {
        match args.get(2) {
            Some(input) => return print_stats(input),
            None => usage(&args[0]),
        }
    }

    let input = &args[1];
    let mut out_dir = PathBuf::from(DEFAULT_OUT_DIR);

    let mut i = 2;
    while i < args.len() {
        match args[i].as_str() {
            "--out-dir" => {
                if let Some(dir) = args.get(i + 1) {
                    out_dir = PathBuf::from(dir);
                }
                i += 2;
            }
            _ => i += 1,
        }
    }

    println!("Curating puzzles:");
    println!("  Input: {}", input);
    println!("  Output directory: {}", out_dir.display());
    println!();

    let start = Instant::now();
    let file = File::open(input)?;
    let counts = curate(BufReader::new(file), &out_dir, &default_filters())?;

    println!("Done in {:.1}s", start.elapsed().as_secs_f64());
    for (name, count) in counts {
        println!("  {:<12} {:>8} puzzles -> {}", name, count, out_dir.join(format!("{name}.csv")).display());
    }

    Ok(())
}
