use anyhow::{Context, Result, bail};
use chrono::NaiveDate;
use csv::ReaderBuilder;
use serde::Deserialize;

use std::fs::File;
use std::io::Read;
use std::path::{Path, PathBuf};

#[derive(Debug, Deserialize)]
pub struct PriceRow {
    pub date: String,
    pub close: f64,
}

/// One trading day of the input series: calendar date and closing price.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PriceBar {
    pub date: NaiveDate,
    pub close: f64,
}

/// Load a daily price series from a CSV file with a `date,close` header.
///
/// The returned series is validated: every close is positive and finite,
/// and dates are strictly ascending with no duplicates. The analysis
/// core relies on these invariants and never re-checks them.
pub fn load_price_series(input: &Path) -> Result<Vec<PriceBar>> {
    let file =
        File::open(input).with_context(|| format!("failed to open input file: {:?}", input))?;

    read_price_series(file).with_context(|| format!("invalid price series in {:?}", input))
}

/// Parse and validate a `date,close` CSV from any reader.
/// Dates use the `YYYY-MM-DD` format.
pub fn read_price_series<R: Read>(reader: R) -> Result<Vec<PriceBar>> {
    let mut rdr = ReaderBuilder::new().has_headers(true).from_reader(reader);

    let mut bars: Vec<PriceBar> = Vec::new();

    for result in rdr.deserialize::<PriceRow>() {
        let row: PriceRow = result.with_context(|| "failed to deserialize CSV row")?;
        let date = NaiveDate::parse_from_str(&row.date, "%Y-%m-%d")
            .with_context(|| format!("failed to parse date: {}", row.date))?;

        if !row.close.is_finite() || row.close <= 0.0 {
            bail!("close must be a positive price, got {} on {}", row.close, date);
        }

        if let Some(prev) = bars.last() {
            if date <= prev.date {
                bail!(
                    "dates must be strictly ascending, one bar per day: {} follows {}",
                    date,
                    prev.date
                );
            }
        }

        bars.push(PriceBar {
            date,
            close: row.close,
        });
    }

    Ok(bars)
}

/// Try each input file in order and return the first that yields a
/// non-empty series, together with the path that won.
///
/// This is the loader's whole fallback policy: an explicit ordered list
/// with first-success semantics. Errors only when every alternative
/// fails, naming each attempt.
pub fn load_first_available(inputs: &[PathBuf]) -> Result<(PathBuf, Vec<PriceBar>)> {
    let mut failures: Vec<String> = Vec::new();

    for input in inputs {
        match load_price_series(input) {
            Ok(bars) if !bars.is_empty() => return Ok((input.clone(), bars)),
            Ok(_) => failures.push(format!("{:?}: file contains no rows", input)),
            Err(err) => failures.push(format!("{:?}: {:#}", input, err)),
        }
    }

    bail!(
        "no usable price series among {} input(s): [{}]",
        inputs.len(),
        failures.join("; ")
    )
}
