use crate::outcome::{AnalysisReport, Outcome};
use crate::params::BreakoutParams;
use crate::sweep::SweepRow;

/// Console summary of one analysis run.
pub fn print_report(report: &AnalysisReport, params: &BreakoutParams) {
    let stats = &report.stats;
    let pending = stats.total_breakouts - stats.total_evaluable;

    println!("=== Breakout Analysis Summary ===");
    println!(
        "Pattern:            >= {:.1}% day, held {} close(s), evaluated {} trading days later",
        params.threshold_pct, params.hold_days, params.future_days
    );
    println!("Confirmed breakouts: {}", stats.total_breakouts);
    println!("Evaluable:           {}", stats.total_evaluable);
    println!("Pending:             {}", pending);
    println!(
        "Win rate:            {} ({}/{})",
        fmt_rate(stats.win_rate),
        stats.wins,
        stats.total_evaluable
    );
    println!(
        "Avg breakout return: {}",
        fmt_pct(stats.mean_breakout_return)
    );
    println!();
    println!("Forward return distribution (evaluable only):");
    println!("  Mean:    {}", fmt_pct(stats.mean_forward_return));
    println!("  Median:  {}", fmt_pct(stats.median_forward_return));
    println!("  Min:     {}", fmt_pct(stats.min_forward_return));
    println!("  Max:     {}", fmt_pct(stats.max_forward_return));
    println!("  Std Dev: {}", fmt_pct(stats.stddev_forward_return));

    if !stats.yearly.is_empty() {
        println!();
        println!("Win rate by year:");
        println!("  year  evaluable  wins  win_rate");
        for (year, y) in &stats.yearly {
            println!(
                "  {:>4} {:>10} {:>5} {:>8.1}%",
                year,
                y.evaluable,
                y.wins,
                y.win_rate * 100.0
            );
        }
    }

    if !report.breakouts.is_empty() {
        println!();
        println!("Recent breakouts (last 10):");
        let tail_start = report.breakouts.len().saturating_sub(10);
        for b in &report.breakouts[tail_start..] {
            match b.outcome {
                Outcome::Undetermined => println!(
                    "  {}: {:+.1}% -> PENDING (awaiting {} trading days)",
                    b.date, b.breakout_return_pct, params.future_days
                ),
                outcome => {
                    let label = if outcome == Outcome::Win { "WIN" } else { "LOSS" };
                    println!(
                        "  {}: {:+.1}% -> {:+.1}% ({})",
                        b.date,
                        b.breakout_return_pct,
                        b.forward_return_pct.expect("evaluable breakout"),
                        label
                    );
                }
            }
        }
    }
}

/// Aligned table for threshold-sweep results, one line per row.
pub fn print_sweep_table(rows: &[SweepRow]) {
    println!(
        "{:>9} {:>10} {:>10} {:>6} {:>9} {:>8} {:>8} {:>8} {:>8}",
        "threshold", "breakouts", "evaluable", "wins", "win_rate", "mean%", "median%", "min%", "max%"
    );

    for row in rows {
        println!(
            "{:>8.1}% {:>10} {:>10} {:>6} {:>9} {:>8} {:>8} {:>8} {:>8}",
            row.threshold_pct,
            row.total_breakouts,
            row.total_evaluable,
            row.wins,
            fmt_rate(row.win_rate),
            fmt_num(row.mean_forward_return),
            fmt_num(row.median_forward_return),
            fmt_num(row.min_forward_return),
            fmt_num(row.max_forward_return),
        );
    }
}

fn fmt_rate(rate: Option<f64>) -> String {
    match rate {
        Some(r) => format!("{:.1}%", r * 100.0),
        None => "n/a".to_string(),
    }
}

fn fmt_pct(value: Option<f64>) -> String {
    match value {
        Some(v) => format!("{:+.1}%", v),
        None => "n/a".to_string(),
    }
}

fn fmt_num(value: Option<f64>) -> String {
    match value {
        Some(v) => format!("{:+.1}", v),
        None => "n/a".to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fmt_rate_renders_fraction_as_percent_or_na() {
        assert_eq!(fmt_rate(Some(0.625)), "62.5%");
        assert_eq!(fmt_rate(Some(1.0)), "100.0%");
        assert_eq!(fmt_rate(None), "n/a");
    }

    #[test]
    fn test_fmt_pct_keeps_sign_and_one_decimal() {
        assert_eq!(fmt_pct(Some(22.64)), "+22.6%");
        assert_eq!(fmt_pct(Some(-5.0)), "-5.0%");
        assert_eq!(fmt_pct(None), "n/a");
    }
}
