//! Pawn skeletons observed in a player's games.

use std::collections::BTreeSet;
use std::ops::ControlFlow;

use pgn_reader::{RawTag, Reader, SanPlus, Visitor};
use shakmaty::{Chess, Position};
use tracing::warn;

use crate::skeleton::PawnSkeleton;

const STANDARD_START_FEN: &str = "rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w KQkq - 0 1";

/// Tags collected during header parsing.
#[derive(Default)]
struct GameTags {
    custom_start: bool,
    /// Any `Variant` other than standard chess.
    variant: bool,
}

/// Replay state during movetext parsing.
struct Replay {
    pos: Chess,
    /// Set once a move fails to apply; later moves are ignored.
    stopped: bool,
}

/// Visitor that records the skeleton of every position reached.
#[derive(Default)]
struct SkeletonCollector {
    skeletons: BTreeSet<PawnSkeleton>,
}

impl Visitor for SkeletonCollector {
    type Tags = GameTags;
    type Movetext = Replay;
    type Output = ();

    fn begin_tags(&mut self) -> ControlFlow<(), GameTags> {
        ControlFlow::Continue(GameTags::default())
    }

    fn tag(&mut self, tags: &mut GameTags, name: &[u8], value: RawTag<'_>) -> ControlFlow<()> {
        if name == b"FEN" && value.decode_utf8_lossy() != STANDARD_START_FEN {
            tags.custom_start = true;
        }
        if name == b"Variant" && !value.decode_utf8_lossy().eq_ignore_ascii_case("standard") {
            tags.variant = true;
        }
        ControlFlow::Continue(())
    }

    fn begin_movetext(&mut self, tags: GameTags) -> ControlFlow<(), Replay> {
        // Only standard games from the initial position
        if tags.custom_start || tags.variant {
            return ControlFlow::Break(());
        }

        let pos = Chess::default();
        self.skeletons.insert(PawnSkeleton::from_position(&pos));
        ControlFlow::Continue(Replay { pos, stopped: false })
    }

    fn san(&mut self, state: &mut Replay, san_plus: SanPlus) -> ControlFlow<()> {
        if state.stopped {
            return ControlFlow::Continue(());
        }

        match san_plus.san.to_move(&state.pos) {
            Ok(mv) => {
                state.pos.play_unchecked(mv);
                self.skeletons.insert(PawnSkeleton::from_position(&state.pos));
            }
            Err(_) => state.stopped = true,
        }
        ControlFlow::Continue(())
    }

    fn end_game(&mut self, _state: Replay) {}
}

/// Skeletons of every position in every game, including each start position.
/// Unparsable PGN text contributes whatever was read before the failure.
pub fn collect_skeletons<'a, I>(games: I) -> BTreeSet<PawnSkeleton>
where
    I: IntoIterator<Item = &'a str>,
{
    let mut collector = SkeletonCollector::default();

    for pgn in games {
        let mut reader = Reader::new(pgn.as_bytes());
        loop {
            match reader.read_game(&mut collector) {
                Ok(Some(())) => {}
                Ok(None) => break,
                Err(e) => {
                    warn!("Failed to read game PGN: {e}");
                    break;
                }
            }
        }
    }

    collector.skeletons
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_every_position_is_recorded() {
        let pgn = "[Event \"Rated Blitz game\"]\n[White \"a\"]\n[Black \"b\"]\n[Result \"*\"]\n\n1. e4 e5 2. Nf3 Nc6 *\n";
        let skeletons = collect_skeletons([pgn]);

        // start, e4, e5 -- knight moves repeat the e4 e5 skeleton
        assert_eq!(skeletons.len(), 3);
        assert!(skeletons.contains(&PawnSkeleton::from_fen(STANDARD_START_FEN)));
        assert!(skeletons.contains(&PawnSkeleton::from_placement(
            "rnbqkbnr/pppp1ppp/8/4p3/4P3/8/PPPP1PPP/RNBQKBNR"
        )));
    }

    #[test]
    fn test_illegal_move_stops_replay() {
        let pgn = "[Result \"*\"]\n\n1. e4 Ke2 2. d4 *\n";
        let skeletons = collect_skeletons([pgn]);
        // start and e4 only; d4 is never reached
        assert_eq!(skeletons.len(), 2);
    }

    #[test]
    fn test_custom_start_is_skipped() {
        let pgn = "[SetUp \"1\"]\n[FEN \"4k3/8/8/8/8/8/4P3/4K3 w - - 0 1\"]\n\n1. e4 *\n";
        assert!(collect_skeletons([pgn]).is_empty());
    }

    #[test]
    fn test_variant_games_are_skipped() {
        let atomic = "[Variant \"Atomic\"]\n[Result \"*\"]\n\n1. e4 d5 2. exd5 *\n";
        assert!(collect_skeletons([atomic]).is_empty());

        let crazyhouse = "[Variant \"Crazyhouse\"]\n[Result \"*\"]\n\n1. e4 *\n";
        assert!(collect_skeletons([crazyhouse]).is_empty());

        let standard = "[Variant \"Standard\"]\n[Result \"*\"]\n\n1. e4 d5 2. exd5 *\n";
        let skeletons = collect_skeletons([standard]);
        assert_eq!(skeletons.len(), 4);
        assert!(skeletons.contains(&PawnSkeleton::from_placement(
            "rnbqkbnr/ppp1pppp/8/3P4/8/8/PPPP1PPP/RNBQKBNR"
        )));
    }

    #[test]
    fn test_games_are_unioned() {
        let a = "[Result \"*\"]\n\n1. d4 *\n";
        let b = "[Result \"*\"]\n\n1. c4 *\n";
        assert_eq!(collect_skeletons([a, b]).len(), 3);
        assert!(collect_skeletons(std::iter::empty()).is_empty());
    }
}
