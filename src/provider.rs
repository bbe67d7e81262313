use std::sync::mpsc::{Receiver, Sender};
use std::thread::{self, JoinHandle};

use crate::champions::{ChampionCatalog, fetch_champion_catalog, load_champion_file};
use crate::config::{DataSource, Settings};
use crate::demo_feed;
use crate::players_fetch::fetch_players;
use crate::state::{Delta, ProviderCommand};

const DEMO_SEED: u64 = 0x5EED;

/// Worker thread: builds the champion catalog once, then answers commands
/// until the command channel closes.
pub fn spawn_provider(
    settings: Settings,
    tx: Sender<Delta>,
    cmd_rx: Receiver<ProviderCommand>,
) -> JoinHandle<()> {
    thread::spawn(move || {
        let catalog = load_catalog(&settings, &tx);
        if tx.send(Delta::SetCatalog(catalog)).is_err() {
            return;
        }

        let mut demo_round: u64 = 0;
        for cmd in cmd_rx {
            let delta = match cmd {
                ProviderCommand::FetchPlayers { request_id } => match settings.source {
                    DataSource::Api => match fetch_players(&settings.players_url()) {
                        Ok(response) => Delta::SetPlayers {
                            request_id,
                            response,
                        },
                        Err(err) => Delta::PlayersFailed {
                            request_id,
                            error: format!("{err:#}"),
                        },
                    },
                    DataSource::Demo => {
                        // A reload in demo mode moves to the next seeded round.
                        let response = demo_feed::demo_response(
                            settings.demo_players,
                            DEMO_SEED.wrapping_add(demo_round),
                        );
                        demo_round += 1;
                        Delta::SetPlayers {
                            request_id,
                            response,
                        }
                    }
                },
            };
            if tx.send(delta).is_err() {
                return;
            }
        }
    })
}

fn load_catalog(settings: &Settings, tx: &Sender<Delta>) -> ChampionCatalog {
    if let Some(path) = settings.catalog_path.as_deref() {
        match load_champion_file(path, &settings.cdn_base) {
            Ok(catalog) => return catalog,
            Err(err) => {
                let _ = tx.send(Delta::Log(format!(
                    "[WARN] Champion file {}: {err:#}",
                    path.display()
                )));
            }
        }
    }

    if settings.source == DataSource::Demo {
        return demo_feed::demo_catalog(&settings.cdn_base);
    }

    match fetch_champion_catalog(&settings.ddragon_version, &settings.cdn_base) {
        Ok(catalog) => catalog,
        Err(err) => {
            let _ = tx.send(Delta::Log(format!(
                "[WARN] Champion catalog unavailable, showing ids only: {err:#}"
            )));
            ChampionCatalog::empty()
        }
    }
}
