use chrono::NaiveDate;

use crate::data::PriceBar;
use crate::params::BreakoutParams;

/// A day whose close gained at least the threshold versus the prior
/// close and survived the hold-window confirmation.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BreakoutCandidate {
    /// Position of the breakout day in the series (always >= 1).
    pub index: usize,
    pub date: NaiveDate,
    /// Close of the breakout day; the level the hold window and the
    /// forward return are measured against.
    pub breakout_close: f64,
    pub daily_return_pct: f64,
}

/// Scan the series and return every confirmed breakout, in date order.
///
/// A day `i` (i >= 1) is a *candidate* iff
///   (close[i] - close[i-1]) / close[i-1] * 100 >= threshold_pct.
/// A candidate is *confirmed* iff each of the next `hold_days` closes
/// exists and stays at or above close[i]. A hold window running past the
/// end of the series rejects the candidate; it is never confirmed on
/// missing data.
///
/// Overlapping breakouts are all kept: a candidate inside another
/// candidate's hold window is detected and confirmed on its own, and
/// the scan never suppresses re-triggering.
pub fn find_confirmed_breakouts(
    series: &[PriceBar],
    params: &BreakoutParams,
) -> Vec<BreakoutCandidate> {
    let mut confirmed: Vec<BreakoutCandidate> = Vec::new();

    if series.len() < 2 {
        return confirmed;
    }

    for i in 1..series.len() {
        let prev_close = series[i - 1].close;
        let close = series[i].close;
        let daily_return_pct = (close - prev_close) / prev_close * 100.0;

        if daily_return_pct < params.threshold_pct {
            continue;
        }

        if !holds_at_or_above(series, i, params.hold_days) {
            continue;
        }

        confirmed.push(BreakoutCandidate {
            index: i,
            date: series[i].date,
            breakout_close: close,
            daily_return_pct,
        });
    }

    confirmed
}

/// True iff closes `i+1 ..= i+hold_days` all exist and none of them is
/// below close[i]. Closing exactly at the breakout level still holds.
/// `hold_days == 0` needs no confirmation at all.
fn holds_at_or_above(series: &[PriceBar], i: usize, hold_days: usize) -> bool {
    let breakout_close = series[i].close;

    for k in 1..=hold_days {
        match series.get(i + k) {
            Some(bar) if bar.close >= breakout_close => {}
            _ => return false,
        }
    }

    true
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Build a series of consecutive calendar days with the given closes.
    fn series(closes: &[f64]) -> Vec<PriceBar> {
        let start = NaiveDate::from_ymd_opt(2020, 1, 1).unwrap();
        closes
            .iter()
            .enumerate()
            .map(|(i, &close)| PriceBar {
                date: start + chrono::Days::new(i as u64),
                close,
            })
            .collect()
    }

    fn default_with(threshold_pct: f64, hold_days: usize) -> BreakoutParams {
        BreakoutParams {
            threshold_pct,
            hold_days,
            ..BreakoutParams::default()
        }
    }

    #[test]
    fn test_find_confirmed_breakouts_empty_and_single_bar_series_yield_nothing() {
        let params = BreakoutParams::default();
        assert!(find_confirmed_breakouts(&series(&[]), &params).is_empty());
        assert!(find_confirmed_breakouts(&series(&[100.0]), &params).is_empty());
    }

    #[test]
    fn test_find_confirmed_breakouts_detects_gain_at_exact_threshold() {
        // 100 -> 105 is exactly +5%, and the two following closes hold
        // at or above 105.
        let bars = series(&[100.0, 105.0, 105.0, 106.0]);
        let params = default_with(5.0, 2);

        let out = find_confirmed_breakouts(&bars, &params);

        assert_eq!(out.len(), 1);
        assert_eq!(out[0].index, 1);
        assert_eq!(out[0].breakout_close, 105.0);
        assert!((out[0].daily_return_pct - 5.0).abs() < 1e-9);
    }

    #[test]
    fn test_find_confirmed_breakouts_ignores_gain_just_below_threshold() {
        // 100 -> 104.9 is +4.9%, below the 5% threshold.
        let bars = series(&[100.0, 104.9, 106.0, 107.0]);
        let params = default_with(5.0, 2);

        assert!(find_confirmed_breakouts(&bars, &params).is_empty());
    }

    #[test]
    fn test_find_confirmed_breakouts_rejects_candidate_that_dips_below_breakout_close() {
        // +6% day at index 1, but the second hold close dips to 105.9,
        // below the 106 breakout close.
        let bars = series(&[100.0, 106.0, 106.5, 105.9, 110.0]);
        let params = default_with(5.0, 2);

        assert!(find_confirmed_breakouts(&bars, &params).is_empty());
    }

    #[test]
    fn test_find_confirmed_breakouts_close_equal_to_breakout_close_still_holds() {
        // Holding means "not below": closing exactly at 106 both days
        // confirms the candidate.
        let bars = series(&[100.0, 106.0, 106.0, 106.0]);
        let params = default_with(5.0, 2);

        let out = find_confirmed_breakouts(&bars, &params);
        assert_eq!(out.len(), 1);
        assert_eq!(out[0].index, 1);
    }

    #[test]
    fn test_find_confirmed_breakouts_rejects_candidate_without_full_hold_window() {
        // +6% on the last bar: no trailing data to confirm against, so
        // the candidate is rejected rather than silently confirmed.
        let bars = series(&[100.0, 100.5, 106.5]);
        let params = default_with(5.0, 2);

        assert!(find_confirmed_breakouts(&bars, &params).is_empty());

        // One trailing bar is still one short of hold_days = 2.
        let bars = series(&[100.0, 106.0, 107.0]);
        assert!(find_confirmed_breakouts(&bars, &params).is_empty());
    }

    #[test]
    fn test_find_confirmed_breakouts_hold_days_zero_confirms_every_candidate() {
        // Without a hold window even the last bar of the series can be
        // a confirmed breakout.
        let bars = series(&[100.0, 106.0, 100.0, 106.0]);
        let params = default_with(5.0, 0);

        let out = find_confirmed_breakouts(&bars, &params);

        assert_eq!(out.len(), 2);
        assert_eq!(out[0].index, 1);
        assert_eq!(out[1].index, 3);
    }

    #[test]
    fn test_find_confirmed_breakouts_keeps_overlapping_breakouts() {
        // Index 1: 100 -> 106 (+6%), holds through indices 2 and 3.
        // Index 2: 106 -> 112.4 (+6.04%), inside the first candidate's
        // hold window, holds through indices 3 and 4.
        // Both must be emitted; re-triggering is never suppressed.
        let bars = series(&[100.0, 106.0, 112.4, 113.0, 114.0]);
        let params = default_with(5.0, 2);

        let out = find_confirmed_breakouts(&bars, &params);

        assert_eq!(out.len(), 2);
        assert_eq!(out[0].index, 1);
        assert_eq!(out[1].index, 2);
        // Ascending date order.
        assert!(out[0].date < out[1].date);
    }

    #[test]
    fn test_find_confirmed_breakouts_zero_threshold_degenerates_to_any_flat_or_up_day() {
        // threshold_pct = 0 turns every non-negative-return day into a
        // candidate; with hold_days = 0 all of them are confirmed.
        let bars = series(&[100.0, 100.0, 101.0, 100.5]);
        let params = default_with(0.0, 0);

        let out = find_confirmed_breakouts(&bars, &params);

        // Index 1 (0.0%), index 2 (+1.0%); index 3 is a down day.
        assert_eq!(out.len(), 2);
        assert_eq!(out[0].index, 1);
        assert_eq!(out[1].index, 2);
    }

    #[test]
    fn test_find_confirmed_breakouts_every_index_is_at_least_one() {
        // The first bar has no prior close; no candidate may sit at
        // index 0 regardless of parameters.
        let bars = series(&[100.0, 106.0, 107.0, 108.0]);
        let params = default_with(-50.0, 0);

        let out = find_confirmed_breakouts(&bars, &params);
        assert!(!out.is_empty());
        assert!(out.iter().all(|c| c.index >= 1));
    }
}
