// src/series.rs
//
// In-memory shapes for cleaned data. Everything here is transient: built fresh
// per run from page/API output, serialized to CSV, dropped.

use std::collections::BTreeMap;

use chrono::NaiveDate;

/// The recognized output schema, in canonical column order.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Column {
    Date,
    Open,
    High,
    Low,
    Close,
    AdjClose,
    Volume,
    Change,
}

/// Canonical ordering used for combined output and for normalizing
/// whatever order a source page happened to use.
pub const CANONICAL_ORDER: [Column; 8] = [
    Column::Date,
    Column::Open,
    Column::High,
    Column::Low,
    Column::Close,
    Column::AdjClose,
    Column::Volume,
    Column::Change,
];

impl Column {
    /// Match a (trimmed) source header against the schema.
    /// Unknown headers yield `None` and the column is dropped.
    pub fn from_header(header: &str) -> Option<Column> {
        let h = header.trim().to_ascii_lowercase();
        match h.as_str() {
            "date" => Some(Column::Date),
            "open" => Some(Column::Open),
            "high" => Some(Column::High),
            "low" => Some(Column::Low),
            "close" | "close*" => Some(Column::Close),
            "adj. close" | "adj close" | "adjusted close" => Some(Column::AdjClose),
            "volume" => Some(Column::Volume),
            "change" | "% change" | "change %" | "change%" => Some(Column::Change),
            _ => None,
        }
    }

    /// Header text used in output files.
    pub fn title(&self) -> &'static str {
        match self {
            Column::Date => "Date",
            Column::Open => "Open",
            Column::High => "High",
            Column::Low => "Low",
            Column::Close => "Close",
            Column::AdjClose => "Adj. Close",
            Column::Volume => "Volume",
            Column::Change => "Change",
        }
    }
}

/// One cleaned trading-day row. A `None` field is either a column the source
/// didn't provide or a cell that failed coercion.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Record {
    pub date: Option<NaiveDate>,
    pub open: Option<f64>,
    pub high: Option<f64>,
    pub low: Option<f64>,
    pub close: Option<f64>,
    pub adj_close: Option<f64>,
    pub volume: Option<i64>,
    pub change: Option<f64>,
}

impl Record {
    /// Render one cell for CSV output. Missing values are empty cells.
    pub fn cell(&self, col: Column) -> String {
        fn num(v: Option<f64>) -> String {
            v.map(|x| x.to_string()).unwrap_or_default()
        }
        match col {
            Column::Date => self
                .date
                .map(|d| d.format("%Y-%m-%d").to_string())
                .unwrap_or_default(),
            Column::Open => num(self.open),
            Column::High => num(self.high),
            Column::Low => num(self.low),
            Column::Close => num(self.close),
            Column::AdjClose => num(self.adj_close),
            Column::Volume => self.volume.map(|v| v.to_string()).unwrap_or_default(),
            Column::Change => num(self.change),
        }
    }
}

/// One symbol's cleaned series plus the subset of columns its source provided,
/// already in canonical order. Records are date-descending after cleaning.
#[derive(Clone, Debug)]
pub struct StockSeries {
    pub symbol: String,
    pub columns: Vec<Column>,
    pub records: Vec<Record>,
}

impl StockSeries {
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// (oldest, newest) dates present, if any row has one.
    pub fn date_range(&self) -> Option<(NaiveDate, NaiveDate)> {
        let mut dates = self.records.iter().filter_map(|r| r.date);
        let first = dates.next()?;
        let (min, max) = dates.fold((first, first), |(lo, hi), d| (lo.min(d), hi.max(d)));
        Some((min, max))
    }
}

/// Everything one batch run produced: per-symbol series keyed (and therefore
/// iterated) in ascending symbol order, plus the symbols that yielded nothing.
#[derive(Debug, Default)]
pub struct Portfolio {
    pub series: BTreeMap<String, StockSeries>,
    pub failed: Vec<String>,
}

impl Portfolio {
    pub fn insert(&mut self, series: StockSeries) {
        self.series.insert(series.symbol.clone(), series);
    }

    /// Union of the successful series' columns, canonical order.
    pub fn combined_columns(&self) -> Vec<Column> {
        CANONICAL_ORDER
            .iter()
            .copied()
            .filter(|c| self.series.values().any(|s| s.columns.contains(c)))
            .collect()
    }

    /// Rows for the combined file: (symbol, record) ordered by symbol
    /// ascending, then each series' own order (date-descending).
    pub fn combined_rows(&self) -> impl Iterator<Item = (&str, &Record)> {
        self.series
            .values()
            .flat_map(|s| s.records.iter().map(move |r| (s.symbol.as_str(), r)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn day(y: i32, m: u32, d: u32) -> Option<NaiveDate> {
        NaiveDate::from_ymd_opt(y, m, d)
    }

    fn two_day_series(symbol: &str) -> StockSeries {
        StockSeries {
            symbol: symbol.to_string(),
            columns: vec![Column::Date, Column::Close],
            records: vec![
                Record { date: day(2024, 1, 3), close: Some(11.0), ..Default::default() },
                Record { date: day(2024, 1, 2), close: Some(10.0), ..Default::default() },
            ],
        }
    }

    #[test]
    fn header_matching_is_forgiving() {
        assert_eq!(Column::from_header(" Adj. Close "), Some(Column::AdjClose));
        assert_eq!(Column::from_header("% CHANGE"), Some(Column::Change));
        assert_eq!(Column::from_header("Dividends"), None);
    }

    #[test]
    fn combined_rows_order_by_symbol_then_series_order() {
        let mut p = Portfolio::default();
        // Inserted out of order on purpose; BTreeMap sorts symbols.
        p.insert(two_day_series("MSFT"));
        p.insert(two_day_series("AAPL"));

        let rows: Vec<_> = p.combined_rows().collect();
        assert_eq!(rows.len(), 4);
        assert_eq!(rows[0].0, "AAPL");
        assert_eq!(rows[0].1.date, day(2024, 1, 3)); // newest first
        assert_eq!(rows[1].1.date, day(2024, 1, 2));
        assert_eq!(rows[2].0, "MSFT");
        assert_eq!(rows[3].0, "MSFT");
    }

    #[test]
    fn combined_columns_are_a_canonical_union() {
        let mut p = Portfolio::default();
        let mut a = two_day_series("A");
        a.columns = vec![Column::Date, Column::Volume];
        let mut b = two_day_series("B");
        b.columns = vec![Column::Date, Column::Open];
        p.insert(a);
        p.insert(b);
        assert_eq!(
            p.combined_columns(),
            vec![Column::Date, Column::Open, Column::Volume]
        );
    }

    #[test]
    fn missing_cells_render_empty() {
        let r = Record { close: Some(10.2), ..Default::default() };
        assert_eq!(r.cell(Column::Close), "10.2");
        assert_eq!(r.cell(Column::Date), "");
        assert_eq!(r.cell(Column::Volume), "");
    }
}
