#![allow(dead_code)]

use std::fs;
use std::path::Path;

use tempfile::TempDir;

pub const HEADER: &str =
    "PuzzleId,FEN,Moves,Rating,RatingDeviation,Popularity,NbPlays,Themes,GameUrl,OpeningTags";

pub const START: &str = "rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w KQkq - 0 1";

/// A single CSV line in the Lichess export layout.
pub fn row(id: &str, fen: &str, moves: &str, rating: i32, themes: &str, openings: &str) -> String {
    format!(
        "{id},{fen},{moves},{rating},80,90,5000,{themes},https://lichess.org/abc#1,{openings}"
    )
}

pub fn write_csv(dir: &Path, name: &str, rows: &[String]) {
    let mut body = String::from(HEADER);
    body.push('\n');
    for row in rows {
        body.push_str(row);
        body.push('\n');
    }
    fs::write(dir.join(name), body).unwrap();
}

/// A puzzle directory with all four curated files present.
pub fn corpus(opening: &[String], middlegame: &[String], endgame: &[String], tagged: &[String]) -> TempDir {
    let dir = tempfile::tempdir().unwrap();
    write_csv(dir.path(), "opening.csv", opening);
    write_csv(dir.path(), "middlegame.csv", middlegame);
    write_csv(dir.path(), "endgame.csv", endgame);
    write_csv(dir.path(), "opening_tag.csv", tagged);
    dir
}
