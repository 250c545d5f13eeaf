use anyhow::Result;
use clap::Parser;

use std::path::PathBuf;

use breakout_analyzer::data::load_first_available;
use breakout_analyzer::export::write_results_csv;
use breakout_analyzer::outcome::analyze_series;
use breakout_analyzer::output::print_report;
use breakout_analyzer::params::BreakoutParams;

#[derive(Debug, Parser)]
struct Args {
    /// Path to a CSV file (date,close). Repeat the flag to give
    /// fallback files; they are tried in order and the first one with
    /// data wins.
    #[arg(long, required = true)]
    input: Vec<PathBuf>,

    /// Minimum single-day gain (percent) for a breakout candidate
    #[arg(long, default_value_t = 5.0)]
    threshold_pct: f64,

    /// Closes after the breakout day that must hold at or above the
    /// breakout close
    #[arg(long, default_value_t = 2)]
    hold_days: usize,

    /// Forward horizon in trading days used to label win/loss
    #[arg(long, default_value_t = 126)]
    future_days: usize,

    /// Write per-breakout results to this CSV file
    #[arg(long)]
    export: Option<PathBuf>,

    /// Print the full report as JSON instead of text
    #[arg(long, default_value_t = false)]
    json: bool,
}

fn main() -> Result<()> {
    let args = Args::parse();

    let (input, series) = load_first_available(&args.input)?;
    println!(
        "Loaded {} daily bars from {:?} ({} to {}).",
        series.len(),
        input,
        series.first().expect("series is non-empty").date,
        series.last().expect("series is non-empty").date,
    );

    let params = BreakoutParams {
        threshold_pct: args.threshold_pct,
        hold_days: args.hold_days,
        future_days: args.future_days,
    };

    let report = analyze_series(&series, &params)?;

    if args.json {
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else {
        print_report(&report, &params);
    }

    if let Some(path) = &args.export {
        write_results_csv(path, &report.breakouts)?;
        println!("Results exported to {:?}", path);
    }

    Ok(())
}
