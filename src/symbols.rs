// src/symbols.rs

use std::fs;
use std::path::Path;

use crate::error::ScrapeError;

/// Load ticker symbols from a newline-delimited file.
/// Blank lines and `#` comments are skipped; symbols are upper-cased.
/// Order is preserved; duplicates are the caller's problem.
pub fn load_from_file(path: &Path) -> Result<Vec<String>, ScrapeError> {
    let text = fs::read_to_string(path)?;
    Ok(parse(&text))
}

fn parse(text: &str) -> Vec<String> {
    text.lines()
        .map(str::trim)
        .filter(|l| !l.is_empty() && !l.starts_with('#'))
        .map(str::to_ascii_uppercase)
        .collect()
}
