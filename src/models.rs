use anyhow::{Context, Result};
use chrono::DateTime;
use serde::{Deserialize, Deserializer, Serialize};

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PlayersApiResponse {
    #[serde(default, deserialize_with = "null_or_default")]
    pub data: Vec<PlayerResponseItem>,
    #[serde(default, deserialize_with = "null_or_default")]
    pub meta: PageMeta,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PageMeta {
    #[serde(default, deserialize_with = "null_or_default")]
    pub total: u32,
    #[serde(default, deserialize_with = "null_or_default")]
    pub page: u32,
    #[serde(default, deserialize_with = "null_or_default", rename = "lastPage")]
    pub last_page: u32,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PlayerResponseItem {
    #[serde(default, deserialize_with = "null_or_default")]
    pub player: PlayerData,
    #[serde(default, deserialize_with = "null_or_default")]
    pub solo: QueueStats,
    #[serde(default, deserialize_with = "null_or_default")]
    pub flex: QueueStats,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PlayerData {
    #[serde(default, deserialize_with = "null_or_default")]
    pub id: String,
    #[serde(default, deserialize_with = "null_or_default", rename = "gameName")]
    pub game_name: String,
    #[serde(default, deserialize_with = "null_or_default", rename = "tagLine")]
    pub tag_line: String,
    #[serde(default, deserialize_with = "null_or_default")]
    pub puuid: String,
    // Legacy SOLO standing, only consulted when the SOLO history is empty.
    #[serde(default)]
    pub tier: Option<String>,
    #[serde(default)]
    pub rank: Option<String>,
    #[serde(default, rename = "leaguePoints")]
    pub league_points: Option<i64>,
    #[serde(default, rename = "profileIconId")]
    pub profile_icon_id: Option<u32>,
    #[serde(default, rename = "summonerLevel")]
    pub summoner_level: Option<u32>,
    #[serde(default, rename = "championMasteries")]
    pub champion_masteries: Option<Vec<ChampionMastery>>,
    #[serde(default)]
    pub stats: Option<SeasonStats>,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChampionMastery {
    #[serde(default, deserialize_with = "null_or_default", rename = "championId")]
    pub champion_id: u32,
    #[serde(default, deserialize_with = "null_or_default", rename = "championLevel")]
    pub champion_level: u32,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct SeasonStats {
    #[serde(default, deserialize_with = "null_or_default", rename = "totalKills")]
    pub total_kills: u32,
    #[serde(default, deserialize_with = "null_or_default", rename = "totalDeaths")]
    pub total_deaths: u32,
    #[serde(default, deserialize_with = "null_or_default", rename = "totalAssists")]
    pub total_assists: u32,
    #[serde(default, deserialize_with = "null_or_default", rename = "bestMatchKda")]
    pub best_match_kda: f64,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct QueueStats {
    #[serde(default, deserialize_with = "null_or_default")]
    pub snapshots: Vec<Snapshot>,
    #[serde(default)]
    pub stats: Option<QueuePointsStats>,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct QueuePointsStats {
    #[serde(default, deserialize_with = "null_or_default", rename = "pointsLostOrWon")]
    pub points_lost_or_won: i64,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Snapshot {
    #[serde(default, deserialize_with = "null_or_default")]
    pub id: String,
    #[serde(default, deserialize_with = "null_or_default", rename = "playerId")]
    pub player_id: String,
    #[serde(default, deserialize_with = "null_or_default", rename = "queueType")]
    pub queue_type: String,
    #[serde(default, deserialize_with = "null_or_default")]
    pub tier: String,
    #[serde(default, deserialize_with = "null_or_default")]
    pub rank: String,
    #[serde(default, deserialize_with = "null_or_default", rename = "leaguePoints")]
    pub league_points: i64,
    #[serde(default, deserialize_with = "null_or_default")]
    pub wins: u32,
    #[serde(default, deserialize_with = "null_or_default")]
    pub losses: u32,
    #[serde(default, deserialize_with = "null_or_default", rename = "hotStreak")]
    pub hot_streak: bool,
    #[serde(default, deserialize_with = "null_or_default", rename = "totalPoints")]
    pub total_points: i64,
    #[serde(default, deserialize_with = "null_or_default", rename = "createdAt")]
    pub created_at: String,
}

impl Snapshot {
    /// Creation time in epoch milliseconds, `None` when the backend sent
    /// something that is not RFC 3339.
    pub fn created_at_millis(&self) -> Option<i64> {
        let trimmed = self.created_at.trim();
        if trimmed.is_empty() {
            return None;
        }
        DateTime::parse_from_rfc3339(trimmed)
            .ok()
            .map(|dt| dt.timestamp_millis())
    }
}

impl PlayerResponseItem {
    pub fn queue(&self, queue: QueueType) -> &QueueStats {
        match queue {
            QueueType::Solo => &self.solo,
            QueueType::Flex => &self.flex,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum QueueType {
    Solo,
    Flex,
}

impl QueueType {
    pub fn toggled(self) -> Self {
        match self {
            QueueType::Solo => QueueType::Flex,
            QueueType::Flex => QueueType::Solo,
        }
    }

    pub fn parse(raw: &str) -> Option<Self> {
        match raw.trim().to_ascii_lowercase().as_str() {
            "solo" | "solo_duo" | "ranked_solo_5x5" => Some(QueueType::Solo),
            "flex" | "ranked_flex_sr" => Some(QueueType::Flex),
            _ => None,
        }
    }
}

pub fn queue_label(queue: QueueType) -> &'static str {
    match queue {
        QueueType::Solo => "SOLO/DUO",
        QueueType::Flex => "FLEX",
    }
}

// `default` only covers missing keys; the backend also sends explicit nulls.
fn null_or_default<'de, D, T>(deserializer: D) -> std::result::Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de> + Default,
{
    let value = Option::<T>::deserialize(deserializer)?;
    Ok(value.unwrap_or_default())
}

pub fn parse_players_json(raw: &str) -> Result<PlayersApiResponse> {
    let trimmed = raw.trim();
    if trimmed.is_empty() || trimmed == "null" {
        return Ok(PlayersApiResponse::default());
    }
    serde_json::from_str(trimmed).context("invalid players json")
}
