use criterion::{Criterion, criterion_group, criterion_main};
use std::hint::black_box;

use academy_board::board::{SortKey, SortState, build_board, rank_records};
use academy_board::champions::{DEFAULT_CDN_BASE, parse_champion_json};
use academy_board::demo_feed::{demo_catalog, demo_response};
use academy_board::models::{QueueType, parse_players_json};
use academy_board::state::{AppState, Delta, apply_delta};

fn bench_players_parse(c: &mut Criterion) {
    let raw = serde_json::to_string(&demo_response(300, 11)).unwrap();
    c.bench_function("players_parse", |b| {
        b.iter(|| {
            let resp = parse_players_json(black_box(&raw)).unwrap();
            black_box(resp.data.len());
        })
    });
}

fn bench_catalog_parse(c: &mut Criterion) {
    c.bench_function("catalog_parse", |b| {
        b.iter(|| {
            let catalog = parse_champion_json(black_box(CHAMPION_JSON), DEFAULT_CDN_BASE).unwrap();
            black_box(catalog.len());
        })
    });
}

fn bench_build_board(c: &mut Criterion) {
    let resp = demo_response(500, 3);
    let catalog = demo_catalog(DEFAULT_CDN_BASE);
    c.bench_function("build_board_500", |b| {
        b.iter(|| {
            let rows = build_board(
                black_box(&resp.data),
                QueueType::Solo,
                SortState::default(),
                &catalog,
            );
            black_box(rows.len());
        })
    });
}

fn bench_resort_all_keys(c: &mut Criterion) {
    let resp = demo_response(500, 5);
    let catalog = demo_catalog(DEFAULT_CDN_BASE);
    let rows = build_board(&resp.data, QueueType::Flex, SortState::default(), &catalog);
    c.bench_function("resort_all_keys_500", |b| {
        b.iter(|| {
            let mut sort = SortState::default();
            let mut rows = rows.clone();
            for key in SortKey::ALL {
                sort = sort.select(key);
                rank_records(&mut rows, sort);
            }
            black_box(rows[0].rank_position);
        })
    });
}

fn bench_state_reload(c: &mut Criterion) {
    let resp = demo_response(200, 9);
    c.bench_function("state_reload_200", |b| {
        b.iter(|| {
            let mut state = AppState::new(QueueType::Solo);
            let request_id = state.begin_fetch();
            apply_delta(
                &mut state,
                Delta::SetPlayers {
                    request_id,
                    response: resp.clone(),
                },
            );
            state.toggle_queue();
            black_box(state.rows.len());
        })
    });
}

criterion_group!(
    perf,
    bench_players_parse,
    bench_catalog_parse,
    bench_build_board,
    bench_resort_all_keys,
    bench_state_reload
);
criterion_main!(perf);

static CHAMPION_JSON: &str = include_str!("../tests/fixtures/champion.json");
