use std::collections::BTreeMap;

use chrono::{Datelike, NaiveDate};
use serde::Serialize;

use crate::data::PriceBar;
use crate::detector::{BreakoutCandidate, find_confirmed_breakouts};
use crate::params::{BreakoutParams, ParamsError};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum Outcome {
    /// Strictly above the breakout close at the forward horizon.
    Win,
    /// At or below the breakout close at the forward horizon.
    Loss,
    /// Too recent: the series ends before the horizon is reached.
    Undetermined,
}

/// A confirmed breakout together with its forward-horizon result.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ConfirmedBreakout {
    pub index: usize,
    pub date: NaiveDate,
    pub breakout_close: f64,
    pub breakout_return_pct: f64,
    /// Close `future_days` bars after the breakout day, when available.
    pub forward_close: Option<f64>,
    pub forward_return_pct: Option<f64>,
    pub outcome: Outcome,
}

impl ConfirmedBreakout {
    pub fn is_evaluable(&self) -> bool {
        self.outcome != Outcome::Undetermined
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct YearlyStats {
    pub evaluable: usize,
    pub wins: usize,
    pub win_rate: f64,
}

/// Aggregate statistics over one analysis run.
///
/// `win_rate` and the forward-return distribution cover evaluable
/// breakouts only; `mean_breakout_return` covers every confirmed
/// breakout. Undefined statistics (empty denominators) are `None`,
/// never a division by zero.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SummaryStatistics {
    pub total_breakouts: usize,
    pub total_evaluable: usize,
    pub wins: usize,
    pub win_rate: Option<f64>,
    pub mean_breakout_return: Option<f64>,
    pub mean_forward_return: Option<f64>,
    pub median_forward_return: Option<f64>,
    pub min_forward_return: Option<f64>,
    pub max_forward_return: Option<f64>,
    /// Sample standard deviation; needs at least two evaluable records.
    pub stddev_forward_return: Option<f64>,
    /// Keyed by the calendar year of the breakout date. Only years with
    /// at least one evaluable breakout appear.
    pub yearly: BTreeMap<i32, YearlyStats>,
}

/// Everything one run produces: the full breakout list (including
/// unresolved recent ones) plus the derived statistics. Plain data,
/// no formatting attached.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AnalysisReport {
    pub breakouts: Vec<ConfirmedBreakout>,
    pub stats: SummaryStatistics,
}

/// Run the whole pipeline on a validated series: parameter check,
/// candidate scan, hold-window confirmation, forward-horizon labeling
/// and aggregation. Pure function of its inputs; re-running on the same
/// series and parameters yields an identical report.
pub fn analyze_series(
    series: &[PriceBar],
    params: &BreakoutParams,
) -> Result<AnalysisReport, ParamsError> {
    params.validate()?;

    let candidates = find_confirmed_breakouts(series, params);
    let breakouts = evaluate_breakouts(&candidates, series, params);
    let stats = summarize(&breakouts);

    Ok(AnalysisReport { breakouts, stats })
}

/// Label each confirmed candidate against the close `future_days` bars
/// ahead. A forward return strictly above zero is a Win; exactly zero
/// counts as a Loss (there is no break-even class). Candidates whose
/// horizon lies past the end of the series stay Undetermined and keep
/// no forward figures.
pub fn evaluate_breakouts(
    candidates: &[BreakoutCandidate],
    series: &[PriceBar],
    params: &BreakoutParams,
) -> Vec<ConfirmedBreakout> {
    candidates
        .iter()
        .map(|c| {
            let (forward_close, forward_return_pct, outcome) =
                match series.get(c.index + params.future_days) {
                    Some(bar) => {
                        let ret = (bar.close - c.breakout_close) / c.breakout_close * 100.0;
                        let outcome = if ret > 0.0 { Outcome::Win } else { Outcome::Loss };
                        (Some(bar.close), Some(ret), outcome)
                    }
                    None => (None, None, Outcome::Undetermined),
                };

            ConfirmedBreakout {
                index: c.index,
                date: c.date,
                breakout_close: c.breakout_close,
                breakout_return_pct: c.daily_return_pct,
                forward_close,
                forward_return_pct,
                outcome,
            }
        })
        .collect()
}

/// Derive the summary statistics from a breakout set. Recomputed fresh
/// on every call; nothing is accumulated across runs.
pub fn summarize(breakouts: &[ConfirmedBreakout]) -> SummaryStatistics {
    let forward_returns: Vec<f64> = breakouts
        .iter()
        .filter_map(|b| b.forward_return_pct)
        .collect();

    let total_evaluable = forward_returns.len();
    let wins = breakouts
        .iter()
        .filter(|b| b.outcome == Outcome::Win)
        .count();

    let win_rate = if total_evaluable > 0 {
        Some(wins as f64 / total_evaluable as f64)
    } else {
        None
    };

    let breakout_returns: Vec<f64> = breakouts.iter().map(|b| b.breakout_return_pct).collect();

    SummaryStatistics {
        total_breakouts: breakouts.len(),
        total_evaluable,
        wins,
        win_rate,
        mean_breakout_return: mean(&breakout_returns),
        mean_forward_return: mean(&forward_returns),
        median_forward_return: median(&forward_returns),
        min_forward_return: forward_returns.iter().copied().reduce(f64::min),
        max_forward_return: forward_returns.iter().copied().reduce(f64::max),
        stddev_forward_return: sample_stddev(&forward_returns),
        yearly: yearly_breakdown(breakouts),
    }
}

/// Group evaluable breakouts by the calendar year of the breakout date.
fn yearly_breakdown(breakouts: &[ConfirmedBreakout]) -> BTreeMap<i32, YearlyStats> {
    let mut counts: BTreeMap<i32, (usize, usize)> = BTreeMap::new();

    for b in breakouts.iter().filter(|b| b.is_evaluable()) {
        let entry = counts.entry(b.date.year()).or_insert((0, 0));
        entry.0 += 1;
        if b.outcome == Outcome::Win {
            entry.1 += 1;
        }
    }

    counts
        .into_iter()
        .map(|(year, (evaluable, wins))| {
            // evaluable >= 1 for every key in the map
            let stats = YearlyStats {
                evaluable,
                wins,
                win_rate: wins as f64 / evaluable as f64,
            };
            (year, stats)
        })
        .collect()
}

fn mean(values: &[f64]) -> Option<f64> {
    if values.is_empty() {
        return None;
    }

    Some(values.iter().sum::<f64>() / values.len() as f64)
}

/// Median of the values; the mean of the two middle values for even
/// lengths.
fn median(values: &[f64]) -> Option<f64> {
    if values.is_empty() {
        return None;
    }

    let mut sorted = values.to_vec();
    sorted.sort_by(|a, b| a.partial_cmp(b).expect("finite returns"));

    let mid = sorted.len() / 2;
    if sorted.len() % 2 == 1 {
        Some(sorted[mid])
    } else {
        Some((sorted[mid - 1] + sorted[mid]) / 2.0)
    }
}

/// Sample standard deviation (n - 1 denominator). None below two values.
fn sample_stddev(values: &[f64]) -> Option<f64> {
    if values.len() < 2 {
        return None;
    }

    let m = mean(values)?;
    let var = values.iter().map(|v| (v - m) * (v - m)).sum::<f64>() / (values.len() - 1) as f64;

    Some(var.sqrt())
}
