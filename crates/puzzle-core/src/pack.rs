//! Pack names and the sources they resolve to.

use std::collections::BTreeSet;
use std::fmt;

use crate::skeleton::PawnSkeleton;

/// Packs shipped with every corpus.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum BuiltinPack {
    Opening,
    Middlegame,
    Endgame,
    /// Union of the three phase packs.
    Random,
}

impl BuiltinPack {
    pub const ALL: [BuiltinPack; 4] = [
        BuiltinPack::Opening,
        BuiltinPack::Middlegame,
        BuiltinPack::Endgame,
        BuiltinPack::Random,
    ];

    /// Phase packs in file order.
    pub const PHASES: [BuiltinPack; 3] = [
        BuiltinPack::Opening,
        BuiltinPack::Middlegame,
        BuiltinPack::Endgame,
    ];

    pub fn name(self) -> &'static str {
        match self {
            BuiltinPack::Opening => "Opening",
            BuiltinPack::Middlegame => "Middlegame",
            BuiltinPack::Endgame => "Endgame",
            BuiltinPack::Random => "Random",
        }
    }

    /// CSV stem for phase packs; `Random` has no file of its own.
    pub fn file_stem(self) -> Option<&'static str> {
        match self {
            BuiltinPack::Opening => Some("opening"),
            BuiltinPack::Middlegame => Some("middlegame"),
            BuiltinPack::Endgame => Some("endgame"),
            BuiltinPack::Random => None,
        }
    }

    /// Case-insensitive; "mixed" is accepted for the union pack.
    pub fn from_name(name: &str) -> Option<Self> {
        let name = name.trim();
        if name.eq_ignore_ascii_case("mixed") {
            return Some(BuiltinPack::Random);
        }
        Self::ALL
            .into_iter()
            .find(|pack| pack.name().eq_ignore_ascii_case(name))
    }
}

impl fmt::Display for BuiltinPack {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Where a pack's candidates come from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PackSource {
    Builtin(BuiltinPack),
    /// Display name of a retained by-opening bucket.
    Opening(String),
    /// Skeletons observed in a player's games.
    Personalized(BTreeSet<PawnSkeleton>),
}

impl PackSource {
    pub fn label(&self) -> String {
        match self {
            PackSource::Builtin(pack) => pack.name().to_string(),
            PackSource::Opening(name) => name.clone(),
            PackSource::Personalized(_) => "Personalized".to_string(),
        }
    }
}
