use std::collections::HashMap;
use std::fs;
use std::path::Path;

use anyhow::{Context, Result};
use serde::Deserialize;

use crate::http_client::get_text;

pub const DEFAULT_CDN_BASE: &str = "https://ddragon.leagueoflegends.com/cdn";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChampionEntry {
    pub key: u32,
    pub name: String,
    pub image_base_id: String,
}

/// Numeric champion key -> catalog entry. Built once, never mutated.
#[derive(Debug, Clone, Default)]
pub struct ChampionCatalog {
    version: String,
    cdn_base: String,
    by_key: HashMap<u32, ChampionEntry>,
}

impl ChampionCatalog {
    pub fn empty() -> Self {
        Self {
            version: String::new(),
            cdn_base: DEFAULT_CDN_BASE.to_string(),
            by_key: HashMap::new(),
        }
    }

    pub fn from_entries(
        version: impl Into<String>,
        cdn_base: impl Into<String>,
        entries: impl IntoIterator<Item = ChampionEntry>,
    ) -> Self {
        let by_key = entries.into_iter().map(|e| (e.key, e)).collect();
        Self {
            version: version.into(),
            cdn_base: cdn_base.into(),
            by_key,
        }
    }

    pub fn version(&self) -> &str {
        &self.version
    }

    pub fn len(&self) -> usize {
        self.by_key.len()
    }

    pub fn is_empty(&self) -> bool {
        self.by_key.is_empty()
    }

    pub fn get(&self, champion_id: u32) -> Option<&ChampionEntry> {
        self.by_key.get(&champion_id)
    }

    pub fn image_url(&self, entry: &ChampionEntry) -> String {
        format!(
            "{}/{}/img/champion/{}.png",
            self.cdn_base.trim_end_matches('/'),
            self.version,
            entry.image_base_id
        )
    }

    /// Display name and image URL for a champion id, if the catalog knows it.
    pub fn resolve(&self, champion_id: u32) -> Option<(String, String)> {
        let entry = self.get(champion_id)?;
        Some((entry.name.clone(), self.image_url(entry)))
    }
}

#[derive(Debug, Deserialize)]
struct DdragonChampionFile {
    #[serde(default)]
    version: String,
    #[serde(default)]
    data: HashMap<String, DdragonChampion>,
}

#[derive(Debug, Deserialize)]
struct DdragonChampion {
    id: String,
    key: String,
    name: String,
}

/// Parse a Data Dragon `champion.json` asset. Entries whose `key` is not
/// numeric are skipped.
pub fn parse_champion_json(raw: &str, cdn_base: &str) -> Result<ChampionCatalog> {
    let file: DdragonChampionFile =
        serde_json::from_str(raw.trim()).context("invalid champion json")?;
    let entries = file.data.into_values().filter_map(|champ| {
        let key = champ.key.trim().parse::<u32>().ok()?;
        Some(ChampionEntry {
            key,
            name: champ.name,
            image_base_id: champ.id,
        })
    });
    Ok(ChampionCatalog::from_entries(file.version, cdn_base, entries))
}

pub fn load_champion_file(path: &Path, cdn_base: &str) -> Result<ChampionCatalog> {
    let raw = fs::read_to_string(path)
        .with_context(|| format!("failed reading {}", path.display()))?;
    parse_champion_json(&raw, cdn_base)
}

pub fn fetch_champion_catalog(version: &str, cdn_base: &str) -> Result<ChampionCatalog> {
    let url = format!(
        "{}/{}/data/en_US/champion.json",
        cdn_base.trim_end_matches('/'),
        version
    );
    let body = get_text(&url).context("failed to fetch champion catalog")?;
    parse_champion_json(&body, cdn_base)
}
