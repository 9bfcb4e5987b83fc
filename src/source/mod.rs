// src/source/mod.rs
//
// One scraping pipeline, parameterized by where the series comes from.
// `HistoryPage` scrapes the HTML history table; `ChartApi` asks a provider's
// chart endpoint for the same bars. Both feed the runner identically, so the
// cleaning and aggregation code exists exactly once.

mod chart;
mod history;

pub use chart::ChartApi;
pub use history::HistoryPage;

use crate::error::ScrapeError;
use crate::series::StockSeries;

/// A way to obtain one symbol's cleaned series.
///
/// Every error is a per-symbol "no data" outcome; callers log it and move on.
pub trait SeriesSource {
    /// Short name for log lines ("history-page", "chart-api").
    fn name(&self) -> &'static str;

    fn fetch_series(&self, symbol: &str) -> Result<StockSeries, ScrapeError>;
}
