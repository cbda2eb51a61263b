//! Offensive/defensive rendering of a puzzle record.

use serde::Serialize;
use shakmaty::{fen::Fen, uci::UciMove, CastlingMode, Chess, EnPassantMode, Position};

use crate::error::RenderError;
use crate::record::PuzzleRecord;

/// Which side of the tactic the solver is shown.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Rendering {
    /// After the key move, as the side that just played it.
    Offensive,
    /// Before the key move, facing the threat.
    Defensive,
}

impl Rendering {
    pub fn from_coin(defensive: bool) -> Self {
        if defensive {
            Rendering::Defensive
        } else {
            Rendering::Offensive
        }
    }
}

pub fn parse_fen(fen: &str) -> Result<Chess, RenderError> {
    let invalid = |reason: String| RenderError::InvalidFen {
        fen: fen.to_string(),
        reason,
    };
    let parsed: Fen = fen.parse().map_err(|e| invalid(format!("{e}")))?;
    parsed
        .into_position::<Chess>(CastlingMode::Standard)
        .map_err(|e| invalid(format!("{e}")))
}

pub fn to_fen(pos: &Chess) -> String {
    Fen::from_position(pos, EnPassantMode::Legal).to_string()
}

/// Base position with the record's first move played. Later moves are never
/// consulted.
pub fn position_after_first_move(record: &PuzzleRecord) -> Result<Chess, RenderError> {
    let pos = parse_fen(&record.fen)?;
    let uci = record.first_move();
    let illegal = |reason: String| RenderError::IllegalMove {
        puzzle_id: record.puzzle_id.clone(),
        uci: uci.to_string(),
        reason,
    };

    let parsed: UciMove = uci.parse().map_err(|e| illegal(format!("{e}")))?;
    let mv = parsed.to_move(&pos).map_err(|e| illegal(format!("{e}")))?;
    pos.play(mv).map_err(|e| illegal(format!("{e}")))
}

pub fn render_position(record: &PuzzleRecord, rendering: Rendering) -> Result<String, RenderError> {
    match rendering {
        Rendering::Defensive => Ok(record.fen.clone()),
        Rendering::Offensive => Ok(to_fen(&position_after_first_move(record)?)),
    }
}
