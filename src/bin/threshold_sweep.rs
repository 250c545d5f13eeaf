use anyhow::Result;
use clap::Parser;
use serde::Deserialize;

use std::path::PathBuf;

use breakout_analyzer::data::load_price_series;
use breakout_analyzer::output::print_sweep_table;
use breakout_analyzer::params::BreakoutParams;
use breakout_analyzer::sweep::run_threshold_sweep;

#[derive(Debug, Parser)]
struct Args {
    /// config-file path
    #[arg(long)]
    config: PathBuf,
}

/// Sweep over candidate thresholds against one price series and report
/// a summary row per threshold.
#[derive(Deserialize)]
struct Config {
    /// Path to CSV with date,close data
    input: PathBuf,

    /// Thresholds (percent) to evaluate, in output order
    thresholds: Vec<f64>,

    /// Closes that must hold at or above the breakout close
    hold_days: usize,

    /// Forward horizon in trading days
    future_days: usize,
}

fn main() -> Result<()> {
    let args = Args::parse();
    let config_path = args
        .config
        .into_os_string()
        .into_string()
        .expect("Failed to translate config file path into string");
    let config: Config = config::Config::builder()
        .add_source(config::File::with_name(&config_path))
        .build()?
        .try_deserialize()?;

    let series = load_price_series(&config.input)?;
    println!("Loaded {} daily bars from {:?}", series.len(), config.input);

    let base = BreakoutParams {
        hold_days: config.hold_days,
        future_days: config.future_days,
        ..BreakoutParams::default()
    };

    let rows = run_threshold_sweep(&series, &base, &config.thresholds)?;

    println!();
    print_sweep_table(&rows);

    Ok(())
}
