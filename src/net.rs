// src/net.rs
//
// One blocking reqwest client per run, configured from ScrapeOptions: fixed
// browser-ish headers, cookie jar for session continuity, hard timeout so a
// hung request can't stall a batch forever.

use reqwest::blocking::Client;
use reqwest::header::{HeaderMap, HeaderName, HeaderValue};

use crate::config::ScrapeOptions;
use crate::error::ScrapeError;

pub fn build_client(opts: &ScrapeOptions) -> Result<Client, ScrapeError> {
    let mut headers = HeaderMap::new();
    for (name, value) in &opts.headers {
        if let (Ok(n), Ok(v)) = (
            name.parse::<HeaderName>(),
            HeaderValue::from_str(value),
        ) {
            headers.insert(n, v);
        }
    }

    Ok(Client::builder()
        .user_agent(opts.user_agent.clone())
        .default_headers(headers)
        .cookie_store(true)
        .timeout(opts.timeout)
        .build()?)
}

/// GET a page and return its body, mapping non-2xx to a reportable error.
pub fn get_text(client: &Client, url: &str) -> Result<String, ScrapeError> {
    let resp = client.get(url).send()?;
    let status = resp.status();
    if !status.is_success() {
        return Err(ScrapeError::Status {
            url: url.to_string(),
            status: status.as_u16(),
        });
    }
    Ok(resp.text()?)
}

/// HEAD probe used by the date-range guessing. Any transport error counts as
/// "no": the caller is only sniffing for a URL pattern that answers 200.
pub fn head_ok(client: &Client, url: &str) -> bool {
    client
        .head(url)
        .send()
        .map(|r| r.status().is_success())
        .unwrap_or(false)
}
