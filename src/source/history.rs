// src/source/history.rs
//
// Pure-HTTP source: fetch the symbol's history page, steer it toward the
// requested period when possible, then locate/extract/clean the table.
//
// The period steering is guesswork against markup we don't control. Every
// miss falls back silently to the page as served; only the table pipeline
// itself can fail a symbol.

use reqwest::blocking::Client;
use tracing::debug;
use url::Url;

use crate::clean;
use crate::config::{Period, ScrapeOptions};
use crate::error::ScrapeError;
use crate::html;
use crate::net;
use crate::series::StockSeries;
use crate::source::SeriesSource;
use crate::table::{self, DefaultLocator, TableLocator};

pub struct HistoryPage {
    client: Client,
    opts: ScrapeOptions,
    locator: Box<dyn TableLocator>,
}

impl HistoryPage {
    pub fn new(opts: ScrapeOptions) -> Result<Self, ScrapeError> {
        Ok(Self {
            client: net::build_client(&opts)?,
            opts,
            locator: Box::new(DefaultLocator),
        })
    }

    /// Swap the table-finding strategy (the page layout is the fragile part).
    pub fn with_locator(mut self, locator: Box<dyn TableLocator>) -> Self {
        self.locator = locator;
        self
    }
}

impl SeriesSource for HistoryPage {
    fn name(&self) -> &'static str {
        "history-page"
    }

    fn fetch_series(&self, symbol: &str) -> Result<StockSeries, ScrapeError> {
        let base = self.opts.history_page(symbol);
        let mut page = net::get_text(&self.client, &base)?;

        if let Some(url) = select_period_url(&self.client, &page, &base, self.opts.period) {
            if url != base {
                debug!(%symbol, %url, "period-selected URL");
                match net::get_text(&self.client, &url) {
                    Ok(p) => page = p,
                    // Best-effort enhancement only; keep the base page.
                    Err(e) => debug!(%symbol, %url, error = %e, "period URL failed"),
                }
            }
        }

        let table = self.locator.locate(&page).ok_or(ScrapeError::NoTable)?;
        let raw = table::extract(table).ok_or(ScrapeError::NoRows)?;
        if raw.rows.is_empty() {
            return Err(ScrapeError::NoRows);
        }

        let series = clean::clean(symbol, &raw);
        if series.is_empty() {
            return Err(ScrapeError::EmptySeries);
        }
        Ok(series)
    }
}

/// Guess a URL that serves the requested period, in decreasing order of
/// confidence. `None` (or any internal miss) means: keep the base page.
fn select_period_url(client: &Client, page: &str, base: &str, period: Period) -> Option<String> {
    from_period_buttons(page, base, period)
        .or_else(|| from_script_api_urls(page, base, period))
        .or_else(|| from_query_patterns(client, base, period))
}

/// Method 1: an `<a>`/`<button>` whose text names the period and which
/// carries an `href` or `data-url`.
fn from_period_buttons(page: &str, base: &str, period: Period) -> Option<String> {
    for tag in ["a", "button"] {
        for (b, e) in html::blocks(page, tag) {
            let block = &page[b..e];
            let text = html::to_lower(&html::text(block));
            if !period.button_texts().iter().any(|t| text.contains(t)) {
                continue;
            }
            if let Some(target) = html::attr(block, "href").or_else(|| html::attr(block, "data-url")) {
                if let Some(resolved) = resolve(base, &target) {
                    return Some(resolved);
                }
            }
        }
    }
    None
}

/// Method 2: a quoted URL inside a `<script>` that mentions both "api" and
/// "history"; tack the period onto its query string.
fn from_script_api_urls(page: &str, base: &str, period: Period) -> Option<String> {
    for (b, e) in html::blocks(page, "script") {
        let body = html::inner(&page[b..e]);
        for candidate in quoted_strings(body) {
            let lc = html::to_lower(candidate);
            if !(lc.contains("api") && lc.contains("history")) {
                continue;
            }
            let absolute = if candidate.starts_with("http") {
                candidate.to_string()
            } else {
                resolve(base, candidate)?
            };
            let sep = if absolute.contains('?') { '&' } else { '?' };
            return Some(format!("{}{}period={}", absolute, sep, period.token()));
        }
    }
    None
}

/// Method 3: probe common query-string spellings with HEAD; first 200 wins.
fn from_query_patterns(client: &Client, base: &str, period: Period) -> Option<String> {
    let lower = period.token().to_string();
    let upper = lower.to_ascii_uppercase();
    for value in [&lower, &upper] {
        for key in ["period", "range", "timeframe"] {
            let url = format!("{}?{}={}", base, key, value);
            if net::head_ok(client, &url) {
                return Some(url);
            }
        }
    }
    None
}

fn resolve(base: &str, target: &str) -> Option<String> {
    Url::parse(base).ok()?.join(target).ok().map(Into::into)
}

/// String literals inside a script body, either quote style, no escapes
/// (enough for URL sniffing).
fn quoted_strings(body: &str) -> impl Iterator<Item = &str> {
    body.split(['"', '\''])
        .skip(1)
        .step_by(2)
        .filter(|s| !s.is_empty())
}
