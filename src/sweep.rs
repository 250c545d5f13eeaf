use rayon::prelude::*;
use serde::Serialize;

use crate::data::PriceBar;
use crate::detector::find_confirmed_breakouts;
use crate::outcome::{evaluate_breakouts, summarize};
use crate::params::{BreakoutParams, ParamsError};

/// One threshold's worth of results in a parameter sweep.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SweepRow {
    pub threshold_pct: f64,
    pub total_breakouts: usize,
    pub total_evaluable: usize,
    pub wins: usize,
    pub win_rate: Option<f64>,
    pub mean_forward_return: Option<f64>,
    pub median_forward_return: Option<f64>,
    pub min_forward_return: Option<f64>,
    pub max_forward_return: Option<f64>,
}

/// Re-run the analysis once per threshold, keeping the base parameters'
/// hold window and horizon. Rows come back in the order the thresholds
/// were given. Each run is independent, so the sweep fans out across
/// threads; results are identical to running each threshold alone.
///
/// All parameter sets are validated before any scanning starts.
pub fn run_threshold_sweep(
    series: &[PriceBar],
    base: &BreakoutParams,
    thresholds: &[f64],
) -> Result<Vec<SweepRow>, ParamsError> {
    base.validate()?;
    for &threshold_pct in thresholds {
        base.with_threshold(threshold_pct).validate()?;
    }

    let rows = thresholds
        .par_iter()
        .map(|&threshold_pct| {
            let params = base.with_threshold(threshold_pct);
            let candidates = find_confirmed_breakouts(series, &params);
            let breakouts = evaluate_breakouts(&candidates, series, &params);
            let stats = summarize(&breakouts);

            SweepRow {
                threshold_pct,
                total_breakouts: stats.total_breakouts,
                total_evaluable: stats.total_evaluable,
                wins: stats.wins,
                win_rate: stats.win_rate,
                mean_forward_return: stats.mean_forward_return,
                median_forward_return: stats.median_forward_return,
                min_forward_return: stats.min_forward_return,
                max_forward_return: stats.max_forward_return,
            }
        })
        .collect();

    Ok(rows)
}
