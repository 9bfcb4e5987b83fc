// src/runner.rs
//
// Drives the per-symbol pipeline across a batch. Strictly sequential with a
// politeness pause between requests; one symbol's failure never touches the
// rest of the batch.

use std::thread;
use std::time::Duration;

use tracing::{info, warn};

use crate::series::Portfolio;
use crate::source::SeriesSource;

/// What a batch run produced, for the caller's summary line.
#[derive(Debug)]
pub struct RunSummary {
    pub succeeded: usize,
    pub failed: Vec<String>,
}

impl RunSummary {
    pub fn attempted(&self) -> usize {
        self.succeeded + self.failed.len()
    }
}

/// Fetch every symbol through `source`, pausing `delay` between requests
/// (not after the last). Failures are logged and recorded, never raised.
pub fn collect(
    source: &dyn SeriesSource,
    symbols: &[String],
    delay: Duration,
) -> (Portfolio, RunSummary) {
    let mut portfolio = Portfolio::default();
    let mut succeeded = 0usize;

    for (i, symbol) in symbols.iter().enumerate() {
        if i > 0 && !delay.is_zero() {
            thread::sleep(delay); // be polite
        }

        info!(source = source.name(), %symbol, "fetching");
        match source.fetch_series(symbol) {
            Ok(series) => {
                info!(%symbol, rows = series.records.len(), "extracted");
                portfolio.insert(series);
                succeeded += 1;
            }
            Err(e) => {
                warn!(%symbol, error = %e, "no data");
                portfolio.failed.push(symbol.clone());
            }
        }
    }

    let summary = RunSummary {
        succeeded,
        failed: portfolio.failed.clone(),
    };
    info!(
        succeeded = summary.succeeded,
        failed = summary.failed.len(),
        "batch done"
    );
    (portfolio, summary)
}
