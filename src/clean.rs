// src/clean.rs
//
// Coercing raw table text into typed records. Best effort throughout: a cell
// that won't parse becomes a missing value, never a dropped row.

use chrono::NaiveDate;

use crate::series::{Column, Record, StockSeries, CANONICAL_ORDER};
use crate::table::RawTable;

/// Date formats seen on the source pages, tried in order.
const DATE_FORMATS: [&str; 4] = ["%b %d, %Y", "%B %d, %Y", "%Y-%m-%d", "%m/%d/%Y"];

pub fn parse_date(s: &str) -> Option<NaiveDate> {
    let s = s.trim();
    DATE_FORMATS
        .iter()
        .find_map(|f| NaiveDate::parse_from_str(s, f).ok())
}

/// Price cells: `$` and thousands separators stripped, then decimal.
pub fn parse_price(s: &str) -> Option<f64> {
    s.trim().replace([',', '$'], "").parse().ok()
}

/// Volume cells: thousands separators stripped, then integer.
pub fn parse_volume(s: &str) -> Option<i64> {
    s.trim().replace(',', "").parse().ok()
}

/// Percent-change cells keep their percentage scale: "-1.23%" → -1.23.
pub fn parse_change(s: &str) -> Option<f64> {
    s.trim().replace('%', "").parse().ok()
}

fn set_field(record: &mut Record, col: Column, cell: &str) {
    match col {
        Column::Date => record.date = parse_date(cell),
        Column::Open => record.open = parse_price(cell),
        Column::High => record.high = parse_price(cell),
        Column::Low => record.low = parse_price(cell),
        Column::Close => record.close = parse_price(cell),
        Column::AdjClose => record.adj_close = parse_price(cell),
        Column::Volume => record.volume = parse_volume(cell),
        Column::Change => record.change = parse_change(cell),
    }
}

/// Turn a raw table into a cleaned series for `symbol`.
///
/// Headers are trimmed and matched against the known schema; unknown columns
/// are dropped. When a Date column exists, rows end up date-descending via a
/// stable sort, so rows without a parseable date keep their relative order.
pub fn clean(symbol: &str, raw: &RawTable) -> StockSeries {
    // header index -> schema column, for recognized headers only
    let mapped: Vec<(usize, Column)> = raw
        .headers
        .iter()
        .enumerate()
        .filter_map(|(i, h)| Column::from_header(h).map(|c| (i, c)))
        .collect();

    let mut columns: Vec<Column> = CANONICAL_ORDER
        .iter()
        .copied()
        .filter(|c| mapped.iter().any(|&(_, m)| m == *c))
        .collect();
    columns.dedup();

    let mut records: Vec<Record> = raw
        .rows
        .iter()
        .map(|cells| {
            let mut rec = Record::default();
            for &(i, col) in &mapped {
                if let Some(cell) = cells.get(i) {
                    set_field(&mut rec, col, cell);
                }
            }
            rec
        })
        .collect();

    if columns.contains(&Column::Date) {
        // Stable: equal keys (including two missing dates) keep input order.
        // `None` sorts below every `Some`, so undated rows sink to the end.
        records.sort_by(|a, b| b.date.cmp(&a.date));
    }

    StockSeries {
        symbol: symbol.to_string(),
        columns,
        records,
    }
}
