use std::cmp::Ordering;

use crate::champions::ChampionCatalog;
use crate::models::{PlayerResponseItem, QueueType};
use crate::snapshot::{queue_points_delta, resolve_latest};

pub const UNRANKED_TIER: &str = "UNRANKED";

#[derive(Debug, Clone, PartialEq)]
pub struct ResolvedMastery {
    pub champion_id: u32,
    pub champion_level: u32,
    pub champion_name: Option<String>,
    pub champion_image: Option<String>,
}

/// One leaderboard row for the active queue.
#[derive(Debug, Clone, PartialEq)]
pub struct DisplayRecord {
    pub id: String,
    pub rank_position: usize,
    pub name: String,
    pub tagline: String,
    pub tier: String,
    pub division: String,
    pub league_points: i64,
    pub pdl_change: i64,
    pub total_points: i64,
    pub wins: u32,
    pub losses: u32,
    pub win_rate: u32,
    pub hot_streak: bool,
    pub summoner_level: u32,
    pub season_kills: u32,
    pub season_deaths: u32,
    pub season_assists: u32,
    pub season_kda: f64,
    pub best_match_kda: f64,
    pub champion_masteries: Vec<ResolvedMastery>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SortKey {
    Rank,
    WinRate,
    Level,
    SeasonKills,
    SeasonDeaths,
    SeasonAssists,
    SeasonKda,
    BestKda,
}

impl SortKey {
    pub const ALL: [SortKey; 8] = [
        SortKey::Rank,
        SortKey::WinRate,
        SortKey::Level,
        SortKey::SeasonKills,
        SortKey::SeasonDeaths,
        SortKey::SeasonAssists,
        SortKey::SeasonKda,
        SortKey::BestKda,
    ];

    fn value(self, record: &DisplayRecord) -> f64 {
        match self {
            SortKey::Rank => record.total_points as f64,
            SortKey::WinRate => f64::from(record.win_rate),
            SortKey::Level => f64::from(record.summoner_level),
            SortKey::SeasonKills => f64::from(record.season_kills),
            SortKey::SeasonDeaths => f64::from(record.season_deaths),
            SortKey::SeasonAssists => f64::from(record.season_assists),
            SortKey::SeasonKda => record.season_kda,
            SortKey::BestKda => record.best_match_kda,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortDirection {
    Desc,
    Asc,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SortState {
    pub key: SortKey,
    pub direction: SortDirection,
}

impl Default for SortState {
    fn default() -> Self {
        Self {
            key: SortKey::Rank,
            direction: SortDirection::Desc,
        }
    }
}

impl SortState {
    /// Same key flips the direction; a different key starts descending.
    pub fn select(self, key: SortKey) -> Self {
        if key == self.key {
            let direction = match self.direction {
                SortDirection::Desc => SortDirection::Asc,
                SortDirection::Asc => SortDirection::Desc,
            };
            Self { key, direction }
        } else {
            Self {
                key,
                direction: SortDirection::Desc,
            }
        }
    }

    /// Direction applies to the selected key only; equal keys fall back to
    /// player id ascending in both directions.
    pub fn compare(&self, a: &DisplayRecord, b: &DisplayRecord) -> Ordering {
        let primary = self.key.value(b).total_cmp(&self.key.value(a));
        let primary = match self.direction {
            SortDirection::Desc => primary,
            SortDirection::Asc => primary.reverse(),
        };
        primary.then_with(|| a.id.cmp(&b.id))
    }
}

pub fn win_rate(wins: u32, losses: u32) -> u32 {
    let games = u64::from(wins) + u64::from(losses);
    if games == 0 {
        return 0;
    }
    (u64::from(wins) as f64 / games as f64 * 100.0).round() as u32
}

pub fn season_kda(kills: u32, deaths: u32, assists: u32) -> f64 {
    let takedowns = f64::from(kills) + f64::from(assists);
    if deaths > 0 {
        return round2(takedowns / f64::from(deaths));
    }
    if takedowns > 0.0 {
        return takedowns;
    }
    0.0
}

fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

/// Flatten one API item into a row for `queue`. `rank_position` stays 0
/// until [`rank_records`] runs.
pub fn map_player(
    item: &PlayerResponseItem,
    queue: QueueType,
    catalog: &ChampionCatalog,
) -> DisplayRecord {
    let player = &item.player;
    let history = item.queue(queue);
    let latest = resolve_latest(&history.snapshots);

    let (tier, division, league_points) = match (latest, queue) {
        (Some(snap), _) => (snap.tier.clone(), snap.rank.clone(), snap.league_points),
        (None, QueueType::Solo) => match player.tier.as_deref().map(str::trim) {
            Some(tier) if !tier.is_empty() => (
                tier.to_string(),
                player.rank.clone().unwrap_or_default(),
                player.league_points.unwrap_or(0),
            ),
            _ => (UNRANKED_TIER.to_string(), String::new(), 0),
        },
        (None, QueueType::Flex) => (UNRANKED_TIER.to_string(), String::new(), 0),
    };

    let total_points = latest.map(|s| s.total_points).unwrap_or(0);
    let wins = latest.map(|s| s.wins).unwrap_or(0);
    let losses = latest.map(|s| s.losses).unwrap_or(0);
    let stats = player.stats.unwrap_or_default();

    let champion_masteries = player
        .champion_masteries
        .as_deref()
        .unwrap_or_default()
        .iter()
        .map(|mastery| {
            let resolved = catalog.resolve(mastery.champion_id);
            ResolvedMastery {
                champion_id: mastery.champion_id,
                champion_level: mastery.champion_level,
                champion_name: resolved.as_ref().map(|(name, _)| name.clone()),
                champion_image: resolved.map(|(_, url)| url),
            }
        })
        .collect();

    DisplayRecord {
        id: player.id.clone(),
        rank_position: 0,
        name: player.game_name.clone(),
        tagline: player.tag_line.clone(),
        tier,
        division,
        league_points,
        pdl_change: queue_points_delta(history),
        total_points,
        wins,
        losses,
        win_rate: win_rate(wins, losses),
        hot_streak: latest.is_some_and(|s| s.hot_streak),
        summoner_level: player.summoner_level.unwrap_or(0),
        season_kills: stats.total_kills,
        season_deaths: stats.total_deaths,
        season_assists: stats.total_assists,
        season_kda: season_kda(stats.total_kills, stats.total_deaths, stats.total_assists),
        best_match_kda: stats.best_match_kda,
        champion_masteries,
    }
}

/// Stable sort by `sort`, then rewrite rank positions as 1..=n.
pub fn rank_records(records: &mut [DisplayRecord], sort: SortState) {
    records.sort_by(|a, b| sort.compare(a, b));
    for (idx, record) in records.iter_mut().enumerate() {
        record.rank_position = idx + 1;
    }
}

pub fn build_board(
    items: &[PlayerResponseItem],
    queue: QueueType,
    sort: SortState,
    catalog: &ChampionCatalog,
) -> Vec<DisplayRecord> {
    let mut records: Vec<DisplayRecord> = items
        .iter()
        .map(|item| map_player(item, queue, catalog))
        .collect();
    rank_records(&mut records, sort);
    records
}

/// Case-insensitive match on name or tag. An empty query keeps every row.
pub fn record_matches_query(record: &DisplayRecord, query: &str) -> bool {
    let needle = query.trim();
    if needle.is_empty() {
        return true;
    }
    contains_ci(&record.name, needle) || contains_ci(&record.tagline, needle)
}

fn contains_ci(haystack: &str, needle: &str) -> bool {
    haystack.to_lowercase().contains(&needle.to_lowercase())
}

pub fn sort_key_label(key: SortKey) -> &'static str {
    match key {
        SortKey::Rank => "RANK",
        SortKey::WinRate => "WINRATE",
        SortKey::Level => "LEVEL",
        SortKey::SeasonKills => "SEASON KILLS",
        SortKey::SeasonDeaths => "SEASON DEATHS",
        SortKey::SeasonAssists => "SEASON ASSISTS",
        SortKey::SeasonKda => "SEASON KDA",
        SortKey::BestKda => "BEST KDA",
    }
}

pub fn direction_label(direction: SortDirection) -> &'static str {
    match direction {
        SortDirection::Desc => "DESC",
        SortDirection::Asc => "ASC",
    }
}
