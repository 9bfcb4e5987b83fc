// benches/clean.rs
use criterion::{black_box, criterion_group, criterion_main, Criterion};

use stock_scrape::clean;
use stock_scrape::table::{self, RawTable, TableLocator};

fn sample_page(rows: usize) -> String {
    let mut page = String::from(
        "<html><body><h2>Historical Data</h2><table>\
         <tr><th>Date</th><th>Open</th><th>High</th><th>Low</th><th>Close</th><th>Volume</th><th>Change</th></tr>",
    );
    for i in 0..rows {
        page.push_str(&format!(
            "<tr><td>Jan {}, 2024</td><td>$10.{:02}</td><td>11.50</td><td>9.80</td>\
             <td>10.20</td><td>1,234,567</td><td>-{}.25%</td></tr>",
            (i % 28) + 1,
            i % 100,
            i % 9
        ));
    }
    page.push_str("</table></body></html>");
    page
}

fn sample_raw(rows: usize) -> RawTable {
    let page = sample_page(rows);
    let located = table::DefaultLocator.locate(&page).expect("table");
    table::extract(located).expect("rows")
}

fn bench_extract(c: &mut Criterion) {
    let page = sample_page(250);
    c.bench_function("locate_and_extract_250", |b| {
        b.iter(|| {
            let t = table::DefaultLocator.locate(black_box(&page)).unwrap();
            black_box(table::extract(t).unwrap().rows.len())
        })
    });
}

fn bench_clean(c: &mut Criterion) {
    let raw = sample_raw(250);
    c.bench_function("clean_250", |b| {
        b.iter(|| black_box(clean::clean("AAPL", black_box(&raw)).records.len()))
    });
}

criterion_group!(benches, bench_extract, bench_clean);
criterion_main!(benches);
