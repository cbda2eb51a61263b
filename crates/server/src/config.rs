use std::env;
use std::path::PathBuf;

use puzzle_core::EngineConfig;

#[derive(Clone, Debug)]
pub struct Config {
    pub engine: EngineConfig,
    pub host: String,
    pub port: u16,
    /// Games fetched per personalized request unless the query overrides it.
    pub recent_games: usize,
    pub lichess_base_url: String,
}

fn parsed_var<T: std::str::FromStr>(name: &str, default: T) -> T {
    env::var(name)
        .ok()
        .and_then(|v| v.parse().ok())
        .unwrap_or(default)
}

impl Config {
    pub fn from_env() -> Self {
        let defaults = EngineConfig::default();
        let engine = EngineConfig {
            puzzle_dir: env::var("PUZZLE_DIR")
                .map(PathBuf::from)
                .unwrap_or(defaults.puzzle_dir),
            top_openings: parsed_var("TOP_OPENINGS", defaults.top_openings),
            min_skeleton_bucket: parsed_var("MIN_SKELETON_BUCKET", defaults.min_skeleton_bucket),
            sample_size_threshold: parsed_var("SAMPLE_SIZE_THRESHOLD", defaults.sample_size_threshold),
            rating_window: parsed_var("RATING_WINDOW", defaults.rating_window),
        };

        Self {
            engine,
            host: env::var("HOST").unwrap_or_else(|_| "0.0.0.0".to_string()),
            port: parsed_var("PORT", 8000),
            recent_games: parsed_var("RECENT_GAMES", 50),
            lichess_base_url: env::var("LICHESS_BASE_URL")
                .unwrap_or_else(|_| "https://lichess.org".to_string()),
        }
    }
}
