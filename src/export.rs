use anyhow::{Context, Result};
use serde::Serialize;

use std::path::Path;

use crate::outcome::{ConfirmedBreakout, Outcome};

/// Flat CSV shape for one confirmed breakout. Unresolved horizon fields
/// serialize as empty cells.
#[derive(Debug, Serialize)]
struct ResultRow {
    date: String,
    breakout_close: f64,
    breakout_return_pct: f64,
    forward_close: Option<f64>,
    forward_return_pct: Option<f64>,
    outcome: &'static str,
}

fn outcome_label(outcome: Outcome) -> &'static str {
    match outcome {
        Outcome::Win => "win",
        Outcome::Loss => "loss",
        Outcome::Undetermined => "pending",
    }
}

/// Write the full breakout set to a CSV file, one row per breakout,
/// in date order.
pub fn write_results_csv(path: &Path, breakouts: &[ConfirmedBreakout]) -> Result<()> {
    let mut wtr = csv::Writer::from_path(path)
        .with_context(|| format!("failed to create results file: {:?}", path))?;

    for b in breakouts {
        wtr.serialize(ResultRow {
            date: b.date.to_string(),
            breakout_close: b.breakout_close,
            breakout_return_pct: b.breakout_return_pct,
            forward_close: b.forward_close,
            forward_return_pct: b.forward_return_pct,
            outcome: outcome_label(b.outcome),
        })
        .with_context(|| format!("failed to write results row for {}", b.date))?;
    }

    wtr.flush()
        .with_context(|| format!("failed to flush results file: {:?}", path))?;

    Ok(())
}
