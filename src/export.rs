// src/export.rs
//
// Writing series out as CSV/TSV. Per-symbol files mirror each series' own
// schema; the combined file gets a leading Symbol column and the union of the
// successful series' columns, empty cells where a series lacks one.

use std::fs;
use std::path::{Path, PathBuf};

use tracing::info;

use crate::config::ExportOptions;
use crate::error::ScrapeError;
use crate::series::{Portfolio, StockSeries};

/// Write everything `opts` asks for. Returns the paths written.
pub fn export(portfolio: &Portfolio, opts: &ExportOptions) -> Result<Vec<PathBuf>, ScrapeError> {
    let mut written = Vec::new();
    if portfolio.series.is_empty() {
        return Ok(written);
    }
    ensure_directory(&opts.out_dir)?;

    if opts.individual {
        for series in portfolio.series.values() {
            let path = opts.symbol_path(&series.symbol);
            write_series(&path, series, opts)?;
            written.push(path);
        }
    }

    if opts.combined {
        let path = opts.combined_path();
        write_combined(&path, portfolio, opts)?;
        written.push(path);
    }

    Ok(written)
}

/// One symbol's file: header row, then records in series order.
pub fn write_series(
    path: &Path,
    series: &StockSeries,
    opts: &ExportOptions,
) -> Result<(), ScrapeError> {
    let mut w = writer(path, opts)?;

    w.write_record(series.columns.iter().map(|c| c.title()))?;
    for record in &series.records {
        w.write_record(series.columns.iter().map(|&c| record.cell(c)))?;
    }
    w.flush()?;

    info!(path = %path.display(), rows = series.records.len(), "wrote series");
    Ok(())
}

/// The combined file: Symbol first, union schema, symbol-ascending /
/// date-descending row order (the portfolio iterates that way already).
pub fn write_combined(
    path: &Path,
    portfolio: &Portfolio,
    opts: &ExportOptions,
) -> Result<(), ScrapeError> {
    let columns = portfolio.combined_columns();
    let mut w = writer(path, opts)?;

    w.write_record(
        std::iter::once("Symbol").chain(columns.iter().map(|c| c.title())),
    )?;
    let mut rows = 0usize;
    for (symbol, record) in portfolio.combined_rows() {
        w.write_record(
            std::iter::once(symbol.to_string()).chain(columns.iter().map(|&c| record.cell(c))),
        )?;
        rows += 1;
    }
    w.flush()?;

    info!(path = %path.display(), rows, "wrote combined file");
    Ok(())
}

fn writer(path: &Path, opts: &ExportOptions) -> Result<csv::Writer<fs::File>, ScrapeError> {
    Ok(csv::WriterBuilder::new()
        .delimiter(opts.format.delim())
        .from_path(path)?)
}

fn ensure_directory(dir: &Path) -> Result<(), ScrapeError> {
    if dir.exists() && !dir.is_dir() {
        return Err(ScrapeError::Io(std::io::Error::new(
            std::io::ErrorKind::AlreadyExists,
            format!("path exists but is not a directory: {}", dir.display()),
        )));
    }
    if !dir.exists() {
        fs::create_dir_all(dir)?;
    }
    Ok(())
}

