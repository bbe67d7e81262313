use std::time::Duration;

use anyhow::{Context, Result, anyhow};
use once_cell::sync::OnceCell;
use reqwest::blocking::Client;
use reqwest::header::{ACCEPT, HeaderMap, HeaderValue, USER_AGENT};

const REQUEST_TIMEOUT_SECS: u64 = 10;
const AGENT: &str = concat!("academy_board/", env!("CARGO_PKG_VERSION"));

static CLIENT: OnceCell<Client> = OnceCell::new();

pub fn http_client() -> Result<&'static Client> {
    CLIENT.get_or_try_init(|| {
        let mut headers = HeaderMap::new();
        headers.insert(USER_AGENT, HeaderValue::from_static(AGENT));
        headers.insert(ACCEPT, HeaderValue::from_static("application/json"));
        Client::builder()
            .timeout(Duration::from_secs(REQUEST_TIMEOUT_SECS))
            .default_headers(headers)
            .build()
            .context("failed to build http client")
    })
}

/// GET `url` and return the body. Any non-2xx status is an error carrying
/// the status line.
pub fn get_text(url: &str) -> Result<String> {
    let client = http_client()?;
    let resp = client.get(url).send().context("request failed")?;
    let status = resp.status();
    if !status.is_success() {
        let reason = status.canonical_reason().unwrap_or("unknown status");
        return Err(anyhow!("http {} {} for {}", status.as_u16(), reason, url));
    }
    resp.text().context("failed reading body")
}
