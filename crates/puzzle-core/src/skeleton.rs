//! Pawn-skeleton signatures.
//!
//! A skeleton keeps every pawn where it stands and replaces each run of
//! non-pawn squares (empty or occupied) with the number of squares it covers.
//! Positions that share a pawn structure compare equal regardless of where
//! the pieces are.

use std::fmt;

use shakmaty::{fen::Fen, Chess, EnPassantMode};

#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct PawnSkeleton(String);

impl PawnSkeleton {
    /// Skeleton of a full FEN. Only the piece-placement field is read.
    pub fn from_fen(fen: &str) -> Self {
        Self::from_placement(fen.split_whitespace().next().unwrap_or_default())
    }

    pub fn from_placement(placement: &str) -> Self {
        let ranks: Vec<String> = placement.split('/').map(canonical_rank).collect();
        Self(ranks.join("/"))
    }

    pub fn from_position(pos: &Chess) -> Self {
        Self::from_fen(&Fen::from_position(pos, EnPassantMode::Legal).to_string())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for PawnSkeleton {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

fn canonical_rank(rank: &str) -> String {
    let mut out = String::with_capacity(rank.len());
    let mut run = 0u32;

    for c in rank.chars() {
        match c {
            'P' | 'p' => {
                if run > 0 {
                    out.push_str(&run.to_string());
                    run = 0;
                }
                out.push(c);
            }
            // A digit is that many empty squares; anything else is one piece.
            _ => run += c.to_digit(10).unwrap_or(1),
        }
    }

    if run > 0 {
        out.push_str(&run.to_string());
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    const START: &str = "rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w KQkq - 0 1";

    #[test]
    fn test_start_position() {
        assert_eq!(
            PawnSkeleton::from_fen(START).as_str(),
            "8/pppppppp/8/8/8/8/PPPPPPPP/8"
        );
    }

    #[test]
    fn test_pieces_and_gaps_collapse() {
        // r1bqk1nr -> 8 squares with no pawn
        assert_eq!(canonical_rank("r1bqk1nr"), "8");
        // 3pP3 -> 3 p P 3
        assert_eq!(canonical_rank("3pP3"), "3pP3");
        // 1b1PP3 -> 3 squares, P, P, 3 squares
        assert_eq!(canonical_rank("1b1PP3"), "3PP3");
        assert_eq!(canonical_rank("PP4PP"), "PP4PP");
        assert_eq!(canonical_rank("R1BQKB1R"), "8");
    }

    #[test]
    fn test_ignores_non_placement_fields() {
        let a = PawnSkeleton::from_fen("4k3/pp6/8/8/8/8/PP6/4K3 w - - 0 1");
        let b = PawnSkeleton::from_fen("4k3/pp6/8/8/8/8/PP6/4K3 b - - 12 40");
        assert_eq!(a, b);
    }

    #[test]
    fn test_piece_identity_erased() {
        let a = PawnSkeleton::from_fen("r3k3/pp6/8/8/8/8/PP6/4K2R w - - 0 1");
        let b = PawnSkeleton::from_fen("4k2q/pp6/8/8/8/8/PP6/1N2K3 w - - 0 1");
        assert_eq!(a, b);
    }

    #[test]
    fn test_pawn_move_changes_skeleton() {
        let a = PawnSkeleton::from_fen(START);
        let b = PawnSkeleton::from_fen(
            "rnbqkbnr/pppppppp/8/8/4P3/8/PPPP1PPP/RNBQKBNR b KQkq - 0 1",
        );
        assert_ne!(a, b);
        assert_eq!(b.as_str(), "8/pppppppp/8/8/4P3/8/PPPP1PPP/8");
    }

    #[test]
    fn test_from_position_matches_fen() {
        assert_eq!(PawnSkeleton::from_position(&Chess::default()), PawnSkeleton::from_fen(START));
    }
}
