use std::collections::HashMap;
use std::fs;
use std::path::PathBuf;

use academy_board::champions::{DEFAULT_CDN_BASE, parse_champion_json};
use academy_board::config::{DataSource, Settings};
use academy_board::models::{QueueType, parse_players_json};

fn read_fixture(name: &str) -> String {
    let mut path = PathBuf::from(env!("CARGO_MANIFEST_DIR"));
    path.push("tests");
    path.push("fixtures");
    path.push(name);
    fs::read_to_string(path).expect("fixture file should be readable")
}

#[test]
fn parses_players_fixture() {
    let raw = read_fixture("players.json");
    let resp = parse_players_json(&raw).expect("fixture should parse");
    assert_eq!(resp.data.len(), 3);
    assert_eq!(resp.meta.total, 3);
    assert_eq!(resp.meta.last_page, 1);

    let alpha = &resp.data[0];
    assert_eq!(alpha.player.game_name, "ShadowFlame");
    assert_eq!(alpha.solo.snapshots.len(), 2);
    assert_eq!(alpha.solo.snapshots[0].total_points, 140);
    assert!(alpha.solo.snapshots[0].hot_streak);
    assert_eq!(
        alpha.player.stats.map(|s| s.best_match_kda),
        Some(8.5)
    );

    let bravo = &resp.data[1];
    assert_eq!(bravo.player.tier, None);
    assert_eq!(bravo.player.league_points, None);
    assert!(bravo.player.champion_masteries.is_none());
    assert!(bravo.player.stats.is_none());
    assert_eq!(bravo.queue(QueueType::Flex).snapshots[0].tier, "PLATINUM");

    let charlie = &resp.data[2];
    assert!(charlie.solo.stats.is_none());
}

#[test]
fn empty_or_null_players_body_is_an_empty_board() {
    for raw in ["", "  ", "null"] {
        let resp = parse_players_json(raw).expect("empty body should parse");
        assert!(resp.data.is_empty());
        assert_eq!(resp.meta.total, 0);
    }
}

#[test]
fn sparse_player_items_parse() {
    let raw = r#"{"data":[{"player":{"id":"x","gameName":"Solo"}}]}"#;
    let resp = parse_players_json(raw).expect("sparse item should parse");
    assert_eq!(resp.data.len(), 1);
    assert!(resp.data[0].solo.snapshots.is_empty());
    assert!(resp.data[0].flex.snapshots.is_empty());
}

#[test]
fn explicit_nulls_fall_back_to_defaults() {
    let raw = r#"{"data":[{"player":{"id":"n","gameName":null,"stats":{"totalKills":null,"totalDeaths":2,"totalAssists":4,"bestMatchKda":null}},
        "solo":{"snapshots":[{"tier":"GOLD","rank":null,"leaguePoints":null,"totalPoints":null,"wins":null,"losses":3,"hotStreak":null,"createdAt":"2025-03-01T10:00:00Z"}],"stats":{"pointsLostOrWon":null}},
        "flex":null}],"meta":null}"#;
    let resp = parse_players_json(raw).expect("nulls should not fail the load");
    assert_eq!(resp.meta.total, 0);

    let item = &resp.data[0];
    assert_eq!(item.player.game_name, "");
    let stats = item.player.stats.expect("stats object present");
    assert_eq!(stats.total_kills, 0);
    assert_eq!(stats.total_assists, 4);
    assert_eq!(stats.best_match_kda, 0.0);

    let snap = &item.solo.snapshots[0];
    assert_eq!(snap.tier, "GOLD");
    assert_eq!(snap.rank, "");
    assert_eq!(snap.league_points, 0);
    assert_eq!(snap.total_points, 0);
    assert_eq!(snap.wins, 0);
    assert_eq!(snap.losses, 3);
    assert!(!snap.hot_streak);
    assert_eq!(item.solo.stats.map(|s| s.points_lost_or_won), Some(0));
    assert!(item.flex.snapshots.is_empty());
    assert!(item.flex.stats.is_none());
}

#[test]
fn null_snapshot_list_is_empty_history() {
    let raw = r#"{"data":[{"player":null,"solo":{"snapshots":null,"stats":null}}]}"#;
    let resp = parse_players_json(raw).expect("null history should parse");
    assert_eq!(resp.data[0].player.id, "");
    assert!(resp.data[0].solo.snapshots.is_empty());
}

#[test]
fn malformed_players_body_is_an_error() {
    let err = parse_players_json("{\"data\": [").unwrap_err();
    assert!(err.to_string().contains("invalid players json"));
}

#[test]
fn snapshot_timestamps_parse_as_rfc3339() {
    let raw = read_fixture("players.json");
    let resp = parse_players_json(&raw).expect("fixture should parse");
    let snaps = &resp.data[0].solo.snapshots;
    let newer = snaps[0].created_at_millis().expect("timestamp");
    let older = snaps[1].created_at_millis().expect("timestamp");
    assert_eq!(newer - older, 24 * 60 * 60 * 1000);
}

#[test]
fn champion_catalog_keys_by_numeric_key() {
    let raw = read_fixture("champion.json");
    let catalog = parse_champion_json(&raw, DEFAULT_CDN_BASE).expect("fixture should parse");
    assert_eq!(catalog.version(), "14.24.1");
    assert_eq!(catalog.len(), 2);

    let wukong = catalog.get(62).expect("wukong present");
    assert_eq!(wukong.name, "Wukong");
    assert_eq!(
        catalog.image_url(wukong),
        "https://ddragon.leagueoflegends.com/cdn/14.24.1/img/champion/MonkeyKing.png"
    );
    assert!(catalog.get(9999).is_none());
}

#[test]
fn settings_read_overrides_and_defaults() {
    let env: HashMap<&str, &str> = HashMap::from([
        ("BOARD_API_BASE", "https://board.example/api/"),
        ("BOARD_SOURCE", "demo"),
        ("BOARD_DEFAULT_QUEUE", "FLEX"),
        ("BOARD_DEMO_PLAYERS", "100000"),
        ("CHAMPION_CATALOG_PATH", "  "),
    ]);
    let settings = Settings::from_lookup(|key| env.get(key).map(|v| v.to_string()));
    assert_eq!(settings.players_url(), "https://board.example/api/players");
    assert_eq!(settings.source, DataSource::Demo);
    assert_eq!(settings.default_queue, QueueType::Flex);
    assert_eq!(settings.demo_players, 500);
    assert!(settings.catalog_path.is_none());
    assert_eq!(settings.cdn_base, DEFAULT_CDN_BASE);

    let defaults = Settings::from_lookup(|_| None);
    assert_eq!(defaults.source, DataSource::Api);
    assert_eq!(defaults.default_queue, QueueType::Solo);
    assert_eq!(defaults.players_url(), "http://localhost:3000/api/players");
}
