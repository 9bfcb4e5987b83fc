// tests/source_http.rs
//
// Source-level tests against a local mock server: the full
// fetch → locate → extract → clean pipeline, batch failure isolation, and the
// chart-API payload path.

use std::time::Duration;

use httpmock::prelude::*;

use stock_scrape::config::ScrapeOptions;
use stock_scrape::runner;
use stock_scrape::source::{ChartApi, HistoryPage, SeriesSource};

const GOOD_PAGE: &str = r#"<html><body>
<h2>Historical Data</h2>
<table>
<tr><th>Date</th><th>Open</th><th>High</th><th>Low</th><th>Close</th><th>Volume</th><th>Change</th></tr>
<tr><td>Jan 3, 2024</td><td>$10.20</td><td>11.00</td><td>10.10</td><td>10.80</td><td>2,000,000</td><td>5.88%</td></tr>
<tr><td>Jan 2, 2024</td><td>$10.00</td><td>11.50</td><td>9.80</td><td>10.20</td><td>1,234,567</td><td>-3.25%</td></tr>
</table>
</body></html>"#;

fn history_opts(server: &MockServer) -> ScrapeOptions {
    ScrapeOptions {
        history_url: format!("{}/stocks/{{symbol}}/history/", server.base_url()),
        delay: Duration::ZERO,
        ..ScrapeOptions::default()
    }
}

#[test]
fn scrapes_and_cleans_a_history_page() {
    let server = MockServer::start();
    server.mock(|when, then| {
        when.method(GET).path("/stocks/good/history/");
        then.status(200)
            .header("content-type", "text/html")
            .body(GOOD_PAGE);
    });

    let source = HistoryPage::new(history_opts(&server)).unwrap();
    let series = source.fetch_series("GOOD").unwrap();

    assert_eq!(series.records.len(), 2);
    let newest = &series.records[0];
    assert_eq!(newest.date.map(|d| d.to_string()).as_deref(), Some("2024-01-03"));
    assert_eq!(newest.open, Some(10.20)); // "$10.20"
    let older = &series.records[1];
    assert_eq!(older.volume, Some(1_234_567));
    assert_eq!(older.change, Some(-3.25));
}

#[test]
fn failed_symbol_is_recorded_and_batch_continues() {
    let server = MockServer::start();
    server.mock(|when, then| {
        when.method(GET).path("/stocks/good/history/");
        then.status(200).body(GOOD_PAGE);
    });
    server.mock(|when, then| {
        // Page exists but holds no historical table.
        when.method(GET).path("/stocks/bad/history/");
        then.status(200).body("<html><body><p>Symbol not found</p></body></html>");
    });

    let source = HistoryPage::new(history_opts(&server)).unwrap();
    let symbols = vec!["BAD".to_string(), "GOOD".to_string()];
    let (portfolio, summary) = runner::collect(&source, &symbols, Duration::ZERO);

    assert_eq!(summary.succeeded, 1);
    assert_eq!(summary.failed, vec!["BAD"]);
    assert!(portfolio.series.contains_key("GOOD"));
    assert!(!portfolio.series.contains_key("BAD"));
}

#[test]
fn http_error_is_a_per_symbol_failure() {
    let server = MockServer::start();
    server.mock(|when, then| {
        when.method(GET).path("/stocks/gone/history/");
        then.status(500);
    });

    let source = HistoryPage::new(history_opts(&server)).unwrap();
    let symbols = vec!["GONE".to_string()];
    let (portfolio, summary) = runner::collect(&source, &symbols, Duration::ZERO);
    assert!(portfolio.series.is_empty());
    assert_eq!(summary.failed, vec!["GONE"]);
}

#[test]
fn chart_api_source_builds_the_same_series_shape() {
    let server = MockServer::start();
    server.mock(|when, then| {
        when.method(GET)
            .path("/chart/AAPL")
            .query_param("range", "1y");
        then.status(200).json_body(serde_json::json!({
            "chart": {
                "result": [{
                    "timestamp": [1704153600, 1704240000],
                    "indicators": {
                        "quote": [{
                            "open": [10.0, 10.5],
                            "high": [11.5, 12.0],
                            "low": [9.8, 10.1],
                            "close": [10.2, 11.9],
                            "volume": [1234567, 2000000]
                        }],
                        "adjclose": [{"adjclose": [10.1, 11.8]}]
                    }
                }],
                "error": null
            }
        }));
    });

    let opts = ScrapeOptions {
        chart_url: format!("{}/chart/{{symbol}}?range={{range}}", server.base_url()),
        ..ScrapeOptions::default()
    };
    let source = ChartApi::new(opts).unwrap();
    let series = source.fetch_series("AAPL").unwrap();

    assert_eq!(series.records.len(), 2);
    // newest first
    assert_eq!(series.records[0].close, Some(11.9));
    assert_eq!(series.records[1].close, Some(10.2));
    assert_eq!(series.records[1].adj_close, Some(10.1));
}
