// src/error.rs

use thiserror::Error;

/// Anything that can sink one symbol's scrape.
///
/// None of these are fatal to a batch: the runner logs the message, records the
/// symbol as failed and moves on. The variants only exist so log lines can say
/// *which* stage gave up.
#[derive(Debug, Error)]
pub enum ScrapeError {
    #[error("request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("HTTP {status} from {url}")]
    Status { url: String, status: u16 },

    #[error("no historical data table found on page")]
    NoTable,

    #[error("table had no data rows")]
    NoRows,

    #[error("all rows dropped during cleaning")]
    EmptySeries,

    #[error("unexpected payload: {0}")]
    BadPayload(String),

    #[error(transparent)]
    Io(#[from] std::io::Error),
}

impl From<csv::Error> for ScrapeError {
    fn from(e: csv::Error) -> Self {
        ScrapeError::Io(std::io::Error::other(e))
    }
}
