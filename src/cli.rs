// src/cli.rs

use std::path::PathBuf;
use std::time::Duration;

use anyhow::{bail, Context};
use clap::{Parser, ValueEnum};

use crate::config::{ExportFormat, ExportOptions, Period, ScrapeOptions};
use crate::export;
use crate::runner;
use crate::source::{ChartApi, HistoryPage, SeriesSource};
use crate::symbols;

#[derive(Parser, Debug)]
#[command(
    name = "stock_scrape",
    about = "Scrape historical stock price tables and save them as CSV",
    version
)]
pub struct Args {
    /// Ticker symbols to fetch (e.g. AAPL MSFT). May be combined with --file.
    #[arg(value_name = "SYMBOL")]
    pub symbols: Vec<String>,

    /// Newline-delimited symbol file (# comments and blank lines ignored)
    #[arg(short, long, value_name = "PATH")]
    pub file: Option<PathBuf>,

    /// History window to request (best-effort on the HTML source)
    #[arg(long, value_enum, default_value_t = PeriodArg::OneYear)]
    pub period: PeriodArg,

    /// Seconds to pause between per-symbol requests
    #[arg(long, default_value_t = 1.0)]
    pub delay: f64,

    /// Where the series come from
    #[arg(long, value_enum, default_value_t = SourceArg::Http)]
    pub source: SourceArg,

    /// Output directory
    #[arg(short, long, value_name = "DIR", default_value = crate::config::DEFAULT_OUT_DIR)]
    pub out: PathBuf,

    /// Output format
    #[arg(long, value_enum, default_value_t = FormatArg::Csv)]
    pub format: FormatArg,

    /// Also write one combined file across all successful symbols
    #[arg(long)]
    pub combined: bool,

    /// Combined file name (inside the output directory)
    #[arg(long, value_name = "NAME", default_value = crate::config::DEFAULT_COMBINED_FILENAME)]
    pub combined_file: String,

    /// Skip the per-symbol files (use with --combined)
    #[arg(long)]
    pub no_individual: bool,
}

#[derive(Clone, Copy, Debug, ValueEnum)]
pub enum PeriodArg {
    #[value(name = "1y")]
    OneYear,
    #[value(name = "6m")]
    SixMonths,
    Daily,
}

#[derive(Clone, Copy, Debug, ValueEnum)]
pub enum SourceArg {
    /// Scrape the HTML history page
    Http,
    /// Query the provider chart API
    Api,
}

#[derive(Clone, Copy, Debug, ValueEnum)]
pub enum FormatArg {
    Csv,
    Tsv,
}

pub fn run(args: Args) -> anyhow::Result<()> {
    let mut symbols: Vec<String> = args
        .symbols
        .iter()
        .map(|s| s.trim().to_ascii_uppercase())
        .filter(|s| !s.is_empty())
        .collect();
    if let Some(path) = &args.file {
        let from_file = symbols::load_from_file(path)
            .with_context(|| format!("reading symbol file {}", path.display()))?;
        symbols.extend(from_file);
    }
    if symbols.is_empty() {
        bail!("no symbols given (pass them as arguments or via --file)");
    }

    let scrape = ScrapeOptions {
        period: match args.period {
            PeriodArg::OneYear => Period::OneYear,
            PeriodArg::SixMonths => Period::SixMonths,
            PeriodArg::Daily => Period::Daily,
        },
        delay: Duration::from_secs_f64(args.delay.max(0.0)),
        ..ScrapeOptions::default()
    };
    let delay = scrape.delay;

    let source: Box<dyn SeriesSource> = match args.source {
        SourceArg::Http => Box::new(HistoryPage::new(scrape)?),
        SourceArg::Api => Box::new(ChartApi::new(scrape)?),
    };

    let (portfolio, summary) = runner::collect(source.as_ref(), &symbols, delay);

    for series in portfolio.series.values() {
        match series.date_range() {
            Some((oldest, newest)) => println!(
                "  {}: {} rows ({} to {})",
                series.symbol,
                series.records.len(),
                oldest,
                newest
            ),
            None => println!("  {}: {} rows", series.symbol, series.records.len()),
        }
    }
    for symbol in &summary.failed {
        println!("  {}: no data", symbol);
    }

    if summary.succeeded == 0 {
        bail!("no data retrieved for any symbol");
    }

    let export_opts = ExportOptions {
        out_dir: args.out,
        format: match args.format {
            FormatArg::Csv => ExportFormat::Csv,
            FormatArg::Tsv => ExportFormat::Tsv,
        },
        individual: !args.no_individual,
        combined: args.combined,
        combined_filename: args.combined_file,
    };
    let written = export::export(&portfolio, &export_opts)?;
    for path in &written {
        println!("Saved {}", path.display());
    }

    println!(
        "{} of {} symbols succeeded",
        summary.succeeded,
        summary.attempted()
    );
    Ok(())
}
