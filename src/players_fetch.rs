use anyhow::{Context, Result};

use crate::http_client::get_text;
use crate::models::{PlayersApiResponse, parse_players_json};

pub fn fetch_players(url: &str) -> Result<PlayersApiResponse> {
    let body = get_text(url).context("failed to fetch players")?;
    parse_players_json(&body)
}
