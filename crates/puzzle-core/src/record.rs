//! Puzzle record as stored in the Lichess puzzle database export.

use serde::Deserialize;

use crate::error::RecordError;

pub const LICHESS_URL: &str = "https://lichess.org";

/// One CSV row as it comes off disk. Every column is optional here so that
/// missing and malformed fields can be reported by name.
#[derive(Debug, Default, Deserialize)]
pub struct RawPuzzleRow {
    #[serde(rename = "PuzzleId", default)]
    pub puzzle_id: Option<String>,
    #[serde(rename = "FEN", default)]
    pub fen: Option<String>,
    #[serde(rename = "Moves", default)]
    pub moves: Option<String>,
    #[serde(rename = "Rating", default)]
    pub rating: Option<String>,
    #[serde(rename = "RatingDeviation", default)]
    pub rating_deviation: Option<String>,
    #[serde(rename = "Popularity", default)]
    pub popularity: Option<String>,
    #[serde(rename = "NbPlays", default)]
    pub plays: Option<String>,
    #[serde(rename = "Themes", default)]
    pub themes: Option<String>,
    #[serde(rename = "GameUrl", default)]
    pub game_url: Option<String>,
    #[serde(rename = "OpeningTags", default)]
    pub opening_tags: Option<String>,
}

/// An immutable tactic entry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PuzzleRecord {
    pub puzzle_id: String,
    /// Position before the opponent's move that sets up the tactic.
    pub fen: String,
    /// UCI moves; never empty.
    pub moves: Vec<String>,
    pub rating: i32,
    pub rating_deviation: i32,
    pub popularity: i32,
    pub plays: u32,
    /// Space-delimited, lower-cased.
    pub themes: String,
    /// Space-delimited, lower-cased, words joined with underscores.
    pub opening_tags: String,
    pub game_url: Option<String>,
}

impl PuzzleRecord {
    /// The setup move, or "" for a hand-built record with no moves.
    pub fn first_move(&self) -> &str {
        self.moves.first().map(String::as_str).unwrap_or_default()
    }

    pub fn theme_list(&self) -> impl Iterator<Item = &str> {
        self.themes.split_whitespace()
    }

    pub fn opening_tag_list(&self) -> impl Iterator<Item = &str> {
        self.opening_tags.split_whitespace()
    }

    pub fn training_url(&self) -> String {
        format!("{LICHESS_URL}/training/{}", self.puzzle_id)
    }
}

impl TryFrom<RawPuzzleRow> for PuzzleRecord {
    type Error = RecordError;

    fn try_from(row: RawPuzzleRow) -> Result<Self, Self::Error> {
        let puzzle_id = required("PuzzleId", row.puzzle_id)?;
        let fen = required("FEN", row.fen)?;
        let moves: Vec<String> = row
            .moves
            .ok_or(RecordError::MissingField("Moves"))?
            .split_whitespace()
            .map(str::to_string)
            .collect();
        if moves.is_empty() {
            return Err(RecordError::EmptyMoves(puzzle_id));
        }

        Ok(Self {
            puzzle_id,
            fen,
            moves,
            rating: int_field("Rating", row.rating)?,
            rating_deviation: int_field("RatingDeviation", row.rating_deviation)?,
            popularity: int_field("Popularity", row.popularity)?,
            plays: int_field("NbPlays", row.plays)?,
            themes: row.themes.unwrap_or_default().to_lowercase(),
            opening_tags: row.opening_tags.unwrap_or_default().to_lowercase(),
            game_url: row.game_url.filter(|url| !url.trim().is_empty()),
        })
    }
}

fn required(field: &'static str, value: Option<String>) -> Result<String, RecordError> {
    match value {
        Some(v) if !v.trim().is_empty() => Ok(v.trim().to_string()),
        _ => Err(RecordError::MissingField(field)),
    }
}

/// Blank cells default to zero; anything else must parse.
fn int_field<T>(field: &'static str, value: Option<String>) -> Result<T, RecordError>
where
    T: std::str::FromStr + Default,
{
    let Some(raw) = value else {
        return Ok(T::default());
    };
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Ok(T::default());
    }
    trimmed.parse().map_err(|_| RecordError::InvalidInteger {
        field,
        value: raw.clone(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_row() -> RawPuzzleRow {
        RawPuzzleRow {
            puzzle_id: Some("013h1".into()),
            fen: Some("r1bqk1nr/1p3ppp/p3p3/3pP3/1b1PP3/2N5/PP4PP/R1BQKB1R b KQkq - 0 9".into()),
            moves: Some("d5e4 d1a4 c8d7 a4b4".into()),
            rating: Some("1206".into()),
            rating_deviation: Some("128".into()),
            popularity: Some("-3".into()),
            plays: Some("28".into()),
            themes: Some("advantage fork opening short".into()),
            game_url: Some("https://lichess.org/3L3zhonx/black#18".into()),
            opening_tags: Some("Sicilian_Defense Sicilian_Defense_McDonnell_Attack".into()),
        }
    }

    #[test]
    fn test_parse_full_row() {
        let record = PuzzleRecord::try_from(sample_row()).unwrap();
        assert_eq!(record.puzzle_id, "013h1");
        assert_eq!(record.moves.len(), 4);
        assert_eq!(record.first_move(), "d5e4");
        assert_eq!(record.rating, 1206);
        assert_eq!(record.popularity, -3);
        assert_eq!(record.plays, 28);
        assert_eq!(
            record.opening_tag_list().collect::<Vec<_>>(),
            vec!["sicilian_defense", "sicilian_defense_mcdonnell_attack"]
        );
        assert_eq!(record.training_url(), "https://lichess.org/training/013h1");
    }

    #[test]
    fn test_blank_numbers_default_to_zero() {
        let row = RawPuzzleRow {
            rating: Some(String::new()),
            popularity: None,
            plays: Some("  ".into()),
            ..sample_row()
        };
        let record = PuzzleRecord::try_from(row).unwrap();
        assert_eq!(record.rating, 0);
        assert_eq!(record.popularity, 0);
        assert_eq!(record.plays, 0);
    }

    #[test]
    fn test_rejects_malformed_rows() {
        let row = RawPuzzleRow { rating: Some("twelve".into()), ..sample_row() };
        assert_eq!(
            PuzzleRecord::try_from(row),
            Err(RecordError::InvalidInteger { field: "Rating", value: "twelve".into() })
        );

        let row = RawPuzzleRow { moves: Some("   ".into()), ..sample_row() };
        assert_eq!(PuzzleRecord::try_from(row), Err(RecordError::EmptyMoves("013h1".into())));

        let row = RawPuzzleRow { moves: None, ..sample_row() };
        assert_eq!(PuzzleRecord::try_from(row), Err(RecordError::MissingField("Moves")));

        let row = RawPuzzleRow { fen: None, ..sample_row() };
        assert_eq!(PuzzleRecord::try_from(row), Err(RecordError::MissingField("FEN")));

        let row = RawPuzzleRow { plays: Some("-1".into()), ..sample_row() };
        assert!(matches!(
            PuzzleRecord::try_from(row),
            Err(RecordError::InvalidInteger { field: "NbPlays", .. })
        ));
    }
}
