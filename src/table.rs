// src/table.rs
//
// Finding the historical-data table on a page, and pulling its raw rows out.
// Locating is a pluggable strategy: the page layout is third-party and the
// heuristics here are the part most likely to need swapping when it changes.

use crate::html;

/// Header keywords that mark a price-history table.
const PRICE_KEYWORDS: [&str; 5] = ["date", "open", "high", "low", "close"];

/// Raw extraction result: the first row's cell texts as the column schema,
/// every following row as verbatim (trimmed) cell texts.
#[derive(Debug)]
pub struct RawTable {
    pub headers: Vec<String>,
    pub rows: Vec<Vec<String>>,
}

/// Strategy for picking the one table that holds historical prices.
/// Returns the table's block slice, or `None` as a non-fatal "no table".
pub trait TableLocator {
    fn locate<'a>(&self, doc: &'a str) -> Option<&'a str>;
}

/// Default strategy: first table whose header cells mention any price keyword,
/// falling back to the table attached to a "Historical Data" heading.
pub struct DefaultLocator;

impl TableLocator for DefaultLocator {
    fn locate<'a>(&self, doc: &'a str) -> Option<&'a str> {
        by_header_keywords(doc).or_else(|| by_historical_heading(doc))
    }
}

/// First table (document order) whose `<th>` texts, concatenated and
/// lowercased, contain at least one keyword. First qualifying wins.
fn by_header_keywords(doc: &str) -> Option<&str> {
    for (b, e) in html::blocks(doc, "table") {
        let table = &doc[b..e];
        let header_text = html::blocks(table, "th")
            .iter()
            .map(|&(tb, te)| html::text(&table[tb..te]))
            .collect::<Vec<_>>()
            .join(" ");
        if header_text.is_empty() {
            continue;
        }
        let lc = html::to_lower(&header_text);
        if PRICE_KEYWORDS.iter().any(|k| lc.contains(k)) {
            return Some(table);
        }
    }
    None
}

/// Fallback: find an `h1`–`h3` heading reading "Historical Data" and take the
/// table nearest to it — the enclosing table if the heading sits inside one,
/// otherwise the first table after it. String-scan stand-in for walking the
/// heading's ancestors up to `<body>`.
fn by_historical_heading(doc: &str) -> Option<&str> {
    let heading_at = ["h2", "h1", "h3"].into_iter().find_map(|tag| {
        html::blocks(doc, tag).into_iter().find_map(|(b, e)| {
            let t = html::to_lower(&html::text(&doc[b..e]));
            t.contains("historical data").then_some(b)
        })
    })?;

    let tables = html::blocks(doc, "table");
    if let Some(&(b, e)) = tables.iter().find(|&&(b, e)| b <= heading_at && heading_at < e) {
        return Some(&doc[b..e]);
    }
    tables
        .iter()
        .find(|&&(b, _)| b >= heading_at)
        .map(|&(b, e)| &doc[b..e])
}

/// Cell texts of one `<tr>` block: `<th>` and `<td>` merged in document order.
fn row_cells(tr: &str) -> Vec<String> {
    let mut spans = html::blocks(tr, "th");
    spans.extend(html::blocks(tr, "td"));
    spans.sort_by_key(|&(b, _)| b);
    spans
        .into_iter()
        .map(|(b, e)| html::text(&tr[b..e]).trim().to_string())
        .collect()
}

/// Convert a located table block into raw rows.
///
/// The first `<tr>`'s cells become the schema. Data rows with fewer cells than
/// headers are dropped whole; cells past the header count are discarded.
/// Returns `None` when the table has no header row.
pub fn extract(table: &str) -> Option<RawTable> {
    let mut trs = html::blocks(table, "tr").into_iter();

    let (hb, he) = trs.next()?;
    let headers = row_cells(&table[hb..he]);
    if headers.is_empty() {
        return None;
    }

    let mut rows = Vec::new();
    for (b, e) in trs {
        let cells = row_cells(&table[b..e]);
        if cells.len() < headers.len() {
            continue; // no partial-row salvage
        }
        let mut cells = cells;
        cells.truncate(headers.len());
        rows.push(cells);
    }

    Some(RawTable { headers, rows })
}
