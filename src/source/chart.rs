// src/source/chart.rs
//
// Provider-backed source: a chart endpoint that returns timestamped OHLCV
// bars as JSON (Yahoo-style v8 chart payload). Same StockSeries out the other
// end as the HTML source, so the rest of the pipeline doesn't care.

use chrono::DateTime;
use reqwest::blocking::Client;
use serde::Deserialize;

use crate::config::ScrapeOptions;
use crate::error::ScrapeError;
use crate::net;
use crate::series::{Column, Record, StockSeries};
use crate::source::SeriesSource;

pub struct ChartApi {
    client: Client,
    opts: ScrapeOptions,
}

impl ChartApi {
    pub fn new(opts: ScrapeOptions) -> Result<Self, ScrapeError> {
        Ok(Self {
            client: net::build_client(&opts)?,
            opts,
        })
    }
}

#[derive(Deserialize)]
struct ChartResponse {
    chart: ChartBody,
}

#[derive(Deserialize)]
struct ChartBody {
    #[serde(default)]
    result: Option<Vec<ChartResult>>,
    #[serde(default)]
    error: Option<serde_json::Value>,
}

#[derive(Deserialize)]
struct ChartResult {
    #[serde(default)]
    timestamp: Vec<i64>,
    indicators: Indicators,
}

#[derive(Deserialize)]
struct Indicators {
    #[serde(default)]
    quote: Vec<Quote>,
    #[serde(default)]
    adjclose: Vec<AdjClose>,
}

#[derive(Deserialize, Default)]
struct Quote {
    #[serde(default)]
    open: Vec<Option<f64>>,
    #[serde(default)]
    high: Vec<Option<f64>>,
    #[serde(default)]
    low: Vec<Option<f64>>,
    #[serde(default)]
    close: Vec<Option<f64>>,
    #[serde(default)]
    volume: Vec<Option<i64>>,
}

#[derive(Deserialize)]
struct AdjClose {
    #[serde(default)]
    adjclose: Vec<Option<f64>>,
}

impl SeriesSource for ChartApi {
    fn name(&self) -> &'static str {
        "chart-api"
    }

    fn fetch_series(&self, symbol: &str) -> Result<StockSeries, ScrapeError> {
        let url = self.opts.chart_endpoint(symbol);
        let body = net::get_text(&self.client, &url)?;
        let parsed: ChartResponse = serde_json::from_str(&body)
            .map_err(|e| ScrapeError::BadPayload(e.to_string()))?;

        if let Some(err) = parsed.chart.error {
            return Err(ScrapeError::BadPayload(err.to_string()));
        }
        let result = parsed
            .chart
            .result
            .and_then(|mut r| (!r.is_empty()).then(|| r.remove(0)))
            .ok_or_else(|| ScrapeError::BadPayload("empty chart result".into()))?;

        let series = to_series(symbol, result);
        if series.is_empty() {
            return Err(ScrapeError::EmptySeries);
        }
        Ok(series)
    }
}

fn to_series(symbol: &str, result: ChartResult) -> StockSeries {
    let quote = result.indicators.quote.into_iter().next().unwrap_or_default();
    let adj = result.indicators.adjclose.into_iter().next();

    let mut columns = vec![
        Column::Date,
        Column::Open,
        Column::High,
        Column::Low,
        Column::Close,
    ];
    if adj.is_some() {
        columns.push(Column::AdjClose);
    }
    columns.push(Column::Volume);

    let at = |v: &Vec<Option<f64>>, i: usize| v.get(i).copied().flatten();

    let mut records: Vec<Record> = result
        .timestamp
        .iter()
        .enumerate()
        .map(|(i, &ts)| Record {
            date: DateTime::from_timestamp(ts, 0).map(|dt| dt.date_naive()),
            open: at(&quote.open, i),
            high: at(&quote.high, i),
            low: at(&quote.low, i),
            close: at(&quote.close, i),
            adj_close: adj.as_ref().and_then(|a| at(&a.adjclose, i)),
            volume: quote.volume.get(i).copied().flatten(),
            change: None,
        })
        .collect();

    // Providers serve bars oldest-first; output contract is newest-first.
    records.sort_by(|a, b| b.date.cmp(&a.date));

    StockSeries {
        symbol: symbol.to_string(),
        columns,
        records,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    const PAYLOAD: &str = r#"{
        "chart": {
            "result": [{
                "timestamp": [1704153600, 1704240000],
                "indicators": {
                    "quote": [{
                        "open": [10.0, null],
                        "high": [11.5, 12.0],
                        "low": [9.8, 10.1],
                        "close": [10.2, 11.9],
                        "volume": [1234567, null]
                    }],
                    "adjclose": [{"adjclose": [10.1, 11.8]}]
                }
            }],
            "error": null
        }
    }"#;

    #[test]
    fn payload_becomes_newest_first_series() {
        let parsed: ChartResponse = serde_json::from_str(PAYLOAD).unwrap();
        let result = parsed.chart.result.unwrap().remove(0);
        let s = to_series("AAPL", result);

        assert_eq!(s.records.len(), 2);
        // 1704240000 = 2024-01-03, newest first
        assert_eq!(s.records[0].date, NaiveDate::from_ymd_opt(2024, 1, 3));
        assert_eq!(s.records[0].open, None); // null bar → missing value
        assert_eq!(s.records[1].date, NaiveDate::from_ymd_opt(2024, 1, 2));
        assert_eq!(s.records[1].volume, Some(1_234_567));
        assert_eq!(s.records[1].adj_close, Some(10.1));
        assert!(s.columns.contains(&Column::AdjClose));
        assert!(!s.columns.contains(&Column::Change));
    }

    #[test]
    fn missing_adjclose_drops_the_column() {
        let result = ChartResult {
            timestamp: vec![1704153600],
            indicators: Indicators {
                quote: vec![Quote {
                    close: vec![Some(10.0)],
                    ..Default::default()
                }],
                adjclose: vec![],
            },
        };
        let s = to_series("A", result);
        assert!(!s.columns.contains(&Column::AdjClose));
        assert_eq!(s.records[0].close, Some(10.0));
    }
}
