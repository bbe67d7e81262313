use std::env;
use std::path::PathBuf;

use crate::champions::DEFAULT_CDN_BASE;
use crate::models::QueueType;

const DEFAULT_API_BASE: &str = "http://localhost:3000/api";
const DEFAULT_DDRAGON_VERSION: &str = "14.24.1";
const DEFAULT_DEMO_PLAYERS: usize = 12;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DataSource {
    Api,
    Demo,
}

#[derive(Debug, Clone)]
pub struct Settings {
    pub api_base: String,
    pub source: DataSource,
    pub default_queue: QueueType,
    pub demo_players: usize,
    pub catalog_path: Option<PathBuf>,
    pub ddragon_version: String,
    pub cdn_base: String,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            api_base: DEFAULT_API_BASE.to_string(),
            source: DataSource::Api,
            default_queue: QueueType::Solo,
            demo_players: DEFAULT_DEMO_PLAYERS,
            catalog_path: None,
            ddragon_version: DEFAULT_DDRAGON_VERSION.to_string(),
            cdn_base: DEFAULT_CDN_BASE.to_string(),
        }
    }
}

impl Settings {
    pub fn from_env() -> Self {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Same as [`Settings::from_env`] over an arbitrary key lookup.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let defaults = Self::default();
        let non_empty = |key: &str| {
            lookup(key)
                .map(|v| v.trim().to_string())
                .filter(|v| !v.is_empty())
        };

        let source = match non_empty("BOARD_SOURCE").map(|v| v.to_lowercase()) {
            Some(v) if v == "demo" || v == "fake" => DataSource::Demo,
            _ => DataSource::Api,
        };

        Self {
            api_base: non_empty("BOARD_API_BASE")
                .map(|v| v.trim_end_matches('/').to_string())
                .unwrap_or(defaults.api_base),
            source,
            default_queue: non_empty("BOARD_DEFAULT_QUEUE")
                .and_then(|v| QueueType::parse(&v))
                .unwrap_or(defaults.default_queue),
            demo_players: non_empty("BOARD_DEMO_PLAYERS")
                .and_then(|v| v.parse::<usize>().ok())
                .unwrap_or(defaults.demo_players)
                .clamp(1, 500),
            catalog_path: non_empty("CHAMPION_CATALOG_PATH").map(PathBuf::from),
            ddragon_version: non_empty("DDRAGON_VERSION").unwrap_or(defaults.ddragon_version),
            cdn_base: non_empty("DDRAGON_CDN").unwrap_or(defaults.cdn_base),
        }
    }

    pub fn players_url(&self) -> String {
        format!("{}/players", self.api_base)
    }
}

pub fn source_label(source: DataSource) -> &'static str {
    match source {
        DataSource::Api => "API",
        DataSource::Demo => "DEMO",
    }
}
