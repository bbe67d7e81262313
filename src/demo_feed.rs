use chrono::{Duration as ChronoDuration, NaiveDate, NaiveDateTime};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::champions::{ChampionCatalog, ChampionEntry};
use crate::models::{
    ChampionMastery, PageMeta, PlayerData, PlayerResponseItem, PlayersApiResponse,
    QueuePointsStats, QueueStats, SeasonStats, Snapshot,
};

pub const DEMO_CATALOG_VERSION: &str = "14.24.1";

const NAMES: &[&str] = &[
    "ShadowFlame",
    "JungleKing",
    "BotLaneGod",
    "SupportCarry",
    "TopDiff",
    "TrollMaster",
    "MidOrFeed",
    "WardBot",
    "BaronThief",
    "FlashOnD",
    "SmiteLate",
    "TowerDiver",
];
const TAGS: &[&str] = &["EUW", "NA1", "BR1", "KR", "LAN"];
const TIERS: &[&str] = &[
    "IRON", "BRONZE", "SILVER", "GOLD", "PLATINUM", "EMERALD", "DIAMOND", "MASTER",
];
const DIVISIONS: &[&str] = &["IV", "III", "II", "I"];
// Champion ids the demo catalog knows, plus one it does not (9999).
const DEMO_CHAMPIONS: &[(u32, &str, &str)] = &[
    (103, "Ahri", "Ahri"),
    (238, "Zed", "Zed"),
    (157, "Yasuo", "Yasuo"),
    (268, "Azir", "Azir"),
    (64, "Lee Sin", "LeeSin"),
    (222, "Jinx", "Jinx"),
    (412, "Thresh", "Thresh"),
    (122, "Darius", "Darius"),
    (62, "Wukong", "MonkeyKing"),
];
const UNKNOWN_CHAMPION_ID: u32 = 9999;

pub fn demo_catalog(cdn_base: &str) -> ChampionCatalog {
    let entries = DEMO_CHAMPIONS.iter().map(|(key, name, id)| ChampionEntry {
        key: *key,
        name: name.to_string(),
        image_base_id: id.to_string(),
    });
    ChampionCatalog::from_entries(DEMO_CATALOG_VERSION, cdn_base, entries)
}

/// Synthetic `/players` payload. Same seed, same payload.
pub fn demo_response(players: usize, seed: u64) -> PlayersApiResponse {
    let mut rng = StdRng::seed_from_u64(seed);
    let base = demo_epoch();
    let data = (0..players)
        .map(|idx| demo_player(idx, base, &mut rng))
        .collect::<Vec<_>>();
    let total = data.len() as u32;
    PlayersApiResponse {
        data,
        meta: PageMeta {
            total,
            page: 1,
            last_page: 1,
        },
    }
}

fn demo_epoch() -> NaiveDateTime {
    NaiveDate::from_ymd_opt(2025, 1, 6)
        .and_then(|d| d.and_hms_opt(0, 0, 0))
        .unwrap_or_default()
}

fn demo_player(idx: usize, base: NaiveDateTime, rng: &mut StdRng) -> PlayerResponseItem {
    let id = format!("demo-{:03}", idx + 1);
    let name = match NAMES.get(idx) {
        Some(name) => name.to_string(),
        None => format!("{}{}", NAMES[idx % NAMES.len()], idx / NAMES.len()),
    };

    // Every fourth player has never played flex; every fifth has no season stats.
    let flex_games = if idx % 4 == 3 { 0 } else { rng.gen_range(1..=4) };
    let stats = if idx % 5 == 4 {
        None
    } else {
        Some(SeasonStats {
            total_kills: rng.gen_range(0..400),
            total_deaths: rng.gen_range(0..300),
            total_assists: rng.gen_range(0..600),
            best_match_kda: (rng.gen_range(10..150) as f64) / 10.0,
        })
    };

    let masteries = (0..3)
        .map(|slot| {
            let champion_id = if slot == 2 && idx % 3 == 0 {
                UNKNOWN_CHAMPION_ID
            } else {
                DEMO_CHAMPIONS[rng.gen_range(0..DEMO_CHAMPIONS.len())].0
            };
            ChampionMastery {
                champion_id,
                champion_level: rng.gen_range(4..=10),
            }
        })
        .collect();

    PlayerResponseItem {
        player: PlayerData {
            id: id.clone(),
            game_name: name,
            tag_line: TAGS[rng.gen_range(0..TAGS.len())].to_string(),
            puuid: format!("puuid-{id}"),
            tier: Some(TIERS[rng.gen_range(0..TIERS.len())].to_string()),
            rank: Some(DIVISIONS[rng.gen_range(0..DIVISIONS.len())].to_string()),
            league_points: Some(rng.gen_range(0..100)),
            profile_icon_id: Some(rng.gen_range(1..30)),
            summoner_level: Some(rng.gen_range(30..700)),
            champion_masteries: Some(masteries),
            stats,
        },
        solo: demo_queue(&id, "RANKED_SOLO_5x5", rng.gen_range(1..=6), base, rng),
        flex: demo_queue(&id, "RANKED_FLEX_SR", flex_games, base, rng),
    }
}

fn demo_queue(
    player_id: &str,
    queue_type: &str,
    count: usize,
    base: NaiveDateTime,
    rng: &mut StdRng,
) -> QueueStats {
    let mut snapshots = Vec::with_capacity(count);
    let mut total_points: i64 = rng.gen_range(400..2800);
    let mut wins: u32 = rng.gen_range(5..60);
    let mut losses: u32 = rng.gen_range(5..60);
    for step in 0..count {
        let created = base + ChronoDuration::hours(step as i64);
        let tier_idx = ((total_points / 400) as usize).min(TIERS.len() - 1);
        let division_idx = ((total_points % 400) / 100) as usize;
        snapshots.push(Snapshot {
            id: format!("{player_id}-{queue_type}-{step}"),
            player_id: player_id.to_string(),
            queue_type: queue_type.to_string(),
            tier: TIERS[tier_idx].to_string(),
            rank: DIVISIONS[division_idx.min(DIVISIONS.len() - 1)].to_string(),
            league_points: total_points % 100,
            wins,
            losses,
            hot_streak: rng.gen_bool(0.2),
            total_points,
            created_at: format!("{}Z", created.format("%Y-%m-%dT%H:%M:%S")),
        });
        let swing: i64 = rng.gen_range(-25..=30);
        total_points = (total_points + swing).max(0);
        if swing >= 0 {
            wins += 1;
        } else {
            losses += 1;
        }
    }
    // Net change over the chronological history, taken before the shuffle.
    let net = match (snapshots.first(), snapshots.last()) {
        (Some(a), Some(b)) => b.total_points - a.total_points,
        _ => 0,
    };
    // Shuffle so consumers cannot rely on backend ordering.
    if snapshots.len() > 1 {
        let pivot = rng.gen_range(0..snapshots.len());
        snapshots.rotate_left(pivot);
    }
    QueueStats {
        snapshots,
        stats: Some(QueuePointsStats {
            points_lost_or_won: net,
        }),
    }
}
