pub mod config;
pub mod curate;
pub mod engine;
pub mod error;
pub mod history;
pub mod loader;
pub mod opening_index;
pub mod pack;
pub mod position;
pub mod rating;
pub mod record;
pub mod skeleton;

pub use config::EngineConfig;
pub use engine::{analysis_url, render_pgn_pack, PuzzleEngine, SelectedPuzzle};
pub use error::{LoadError, RecordError, RenderError, SelectionError};
pub use pack::{BuiltinPack, PackSource};
pub use position::Rendering;
pub use record::PuzzleRecord;
pub use skeleton::PawnSkeleton;
