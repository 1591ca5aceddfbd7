//! The `windows` command: list observations and every hourly-stepped
//! window sum for one window length.

use chrono::TimeDelta;

use regen_stats::moving_sum::{max_window, window_sums};

use crate::input::{load_series_file, parse_utc};

pub fn run_windows(
    series_csv: &str,
    location: &str,
    start: &str,
    end: &str,
    window_hours: i64,
) -> anyhow::Result<()> {
    let start = parse_utc(start)?;
    let end = parse_utc(end)?;
    anyhow::ensure!(start <= end, "range start lies after range end");
    anyhow::ensure!(window_hours > 0, "window must be at least one hour");

    let grouped = load_series_file(series_csv)?;
    let Some(values) = grouped.get(location) else {
        anyhow::bail!("no observations for location '{}'", location);
    };

    println!("observations for {} ({}):", location, values.len());
    for obs in values {
        println!("  {}  {}", obs.datetime.to_rfc3339(), obs.value_label());
    }

    let window = TimeDelta::hours(window_hours);
    let sums = window_sums(values, window, start, end);
    println!();
    println!("window sums ({} h, hourly steps):", window_hours);
    for sum in &sums {
        println!(
            "  {}  {}  {:>8.2} mm",
            sum.start.to_rfc3339(),
            sum.end.to_rfc3339(),
            sum.sum_mm
        );
    }

    match max_window(&sums) {
        Some(best) => println!(
            "max {:.2} mm in [{} .. {})",
            best.sum_mm,
            best.start.to_rfc3339(),
            best.end.to_rfc3339()
        ),
        None => println!("no complete window fits the range"),
    }
    Ok(())
}
