// src/config.rs
//
// All knobs live here, passed explicitly. Nothing in the library reads
// globals; the session headers travel with ScrapeOptions instead of hiding in
// a shared client.

use std::path::PathBuf;
use std::time::Duration;

pub const DEFAULT_OUT_DIR: &str = "csv_files";
pub const DEFAULT_COMBINED_FILENAME: &str = "combined_stock_data.csv";

/// History-page URL template; `{symbol}` is replaced lowercased.
pub const DEFAULT_HISTORY_URL: &str = "https://stockanalysis.com/stocks/{symbol}/history/";

/// Chart-API endpoint template; `{symbol}` is replaced verbatim,
/// `{range}` with the period's API range.
pub const DEFAULT_CHART_URL: &str =
    "https://query1.finance.yahoo.com/v8/finance/chart/{symbol}?range={range}&interval=1d";

const USER_AGENT: &str = "Mozilla/5.0 (Macintosh; Intel Mac OS X 10_15_7) \
    AppleWebKit/537.36 (KHTML, like Gecko) Chrome/91.0.4472.124 Safari/537.36";

/// Requested history window. Selection is best-effort on the HTML side
/// (whatever the page serves by default if the heuristics miss).
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum Period {
    #[default]
    OneYear,
    SixMonths,
    Daily,
}

impl Period {
    /// Token used in query-string guessing (`?period=1y` etc.).
    pub fn token(&self) -> &'static str {
        match self {
            Period::OneYear => "1y",
            Period::SixMonths => "6m",
            Period::Daily => "daily",
        }
    }

    /// Range value for the chart API.
    pub fn api_range(&self) -> &'static str {
        match self {
            Period::OneYear => "1y",
            Period::SixMonths => "6mo",
            Period::Daily => "5d",
        }
    }

    /// Button/link texts that select this period on the page.
    pub fn button_texts(&self) -> &'static [&'static str] {
        match self {
            Period::OneYear => &["1 year", "1y", "year"],
            Period::SixMonths => &["6 months", "6m"],
            Period::Daily => &["daily", "1 day"],
        }
    }
}

/// Fetch-side configuration, shared by every source.
#[derive(Clone, Debug)]
pub struct ScrapeOptions {
    pub history_url: String,
    pub chart_url: String,
    pub period: Period,
    /// Politeness pause between per-symbol requests. Sequential by design.
    pub delay: Duration,
    pub timeout: Duration,
    pub user_agent: String,
    /// Extra fixed headers sent with every request.
    pub headers: Vec<(String, String)>,
}

impl Default for ScrapeOptions {
    fn default() -> Self {
        Self {
            history_url: DEFAULT_HISTORY_URL.to_string(),
            chart_url: DEFAULT_CHART_URL.to_string(),
            period: Period::default(),
            delay: Duration::from_secs(1),
            timeout: Duration::from_secs(15),
            user_agent: USER_AGENT.to_string(),
            headers: vec![
                (
                    "Accept".into(),
                    "text/html,application/xhtml+xml,application/xml;q=0.9,*/*;q=0.8".into(),
                ),
                ("Accept-Language".into(), "en-US,en;q=0.5".into()),
            ],
        }
    }
}

impl ScrapeOptions {
    /// Resolve the history-page URL for a symbol.
    pub fn history_page(&self, symbol: &str) -> String {
        self.history_url
            .replace("{symbol}", &symbol.to_ascii_lowercase())
    }

    /// Resolve the chart-API URL for a symbol.
    pub fn chart_endpoint(&self, symbol: &str) -> String {
        self.chart_url
            .replace("{symbol}", symbol)
            .replace("{range}", self.period.api_range())
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum ExportFormat {
    #[default]
    Csv,
    Tsv,
}

impl ExportFormat {
    pub fn ext(&self) -> &'static str {
        match self {
            ExportFormat::Csv => "csv",
            ExportFormat::Tsv => "tsv",
        }
    }
    pub fn delim(&self) -> u8 {
        match self {
            ExportFormat::Csv => b',',
            ExportFormat::Tsv => b'\t',
        }
    }
}

/// Output-side configuration.
#[derive(Clone, Debug)]
pub struct ExportOptions {
    pub out_dir: PathBuf,
    pub format: ExportFormat,
    /// One file per symbol.
    pub individual: bool,
    /// One combined file with a leading Symbol column.
    pub combined: bool,
    pub combined_filename: String,
}

impl Default for ExportOptions {
    fn default() -> Self {
        Self {
            out_dir: PathBuf::from(DEFAULT_OUT_DIR),
            format: ExportFormat::default(),
            individual: true,
            combined: false,
            combined_filename: DEFAULT_COMBINED_FILENAME.to_string(),
        }
    }
}

impl ExportOptions {
    /// Per-symbol output path: `<out_dir>/<SYMBOL>_historical_data.<ext>`.
    pub fn symbol_path(&self, symbol: &str) -> PathBuf {
        self.out_dir
            .join(format!("{}_historical_data.{}", symbol, self.format.ext()))
    }

    pub fn combined_path(&self) -> PathBuf {
        self.out_dir.join(&self.combined_filename)
    }
}
