//! The `stats` command: fetch through the cache, aggregate, classify,
//! print.

use anyhow::Context;
use chrono::{DateTime, FixedOffset, TimeDelta};

use regen_cache::key::SeriesId;
use regen_cache::sqlite::SqliteStore;
use regen_cache::store::{CacheStore, MemoryStore};
use regen_cache::RainCache;
use regen_stats::rain_stats::{period_summary, rain_stats, standard_windows, PeriodSummary, RainStatRow};

use crate::ddf::DdfTable;
use crate::input::{load_series_file, parse_utc, CsvSeriesProvider};

pub fn run_stats(
    series_csv: &str,
    location: &str,
    start: &str,
    end: &str,
    area_km2: f64,
    display_offset: &str,
    cache_db: Option<&str>,
) -> anyhow::Result<()> {
    let start = parse_utc(start)?;
    let end = parse_utc(end)?;
    anyhow::ensure!(start <= end, "range start lies after range end");
    let display_tz: FixedOffset = display_offset
        .parse()
        .with_context(|| format!("invalid display offset '{}', expected e.g. +02:00", display_offset))?;

    let provider = CsvSeriesProvider::new(load_series_file(series_csv)?);
    let store: Box<dyn CacheStore> = match cache_db {
        Some(path) => Box::new(SqliteStore::open(path)?),
        None => Box::new(MemoryStore::new()),
    };
    let cache = RainCache::new(provider, store);

    let id = SeriesId::new("csv", "rain", "precipitation", location);
    let values = cache.cached_values(&id, start, end)?;
    log::info!("{} observations for {} in range", values.len(), location);

    let rows: Vec<RainStatRow> = standard_windows()
        .iter()
        .map(|window| rain_stats(&values, *window, start, end, area_km2, display_tz, &DdfTable))
        .collect();
    let summary = period_summary(&values, start, end, display_tz);
    let status_codes = values.iter().filter(|obs| obs.is_status_code()).count();

    print_table(location, area_km2, values.len(), status_codes, &rows, &summary);
    Ok(())
}

// ───────────────────────────── formatting ─────────────────────────────

fn print_table(
    location: &str,
    area_km2: f64,
    observations: usize,
    status_codes: usize,
    rows: &[RainStatRow],
    summary: &PeriodSummary,
) {
    println!("location {}  catchment {} km²", location, area_km2);
    println!(
        "{} observations in range ({} status-coded)",
        observations, status_codes
    );
    println!();
    println!(
        "{:<8} {:>10}  {:<25} {:<25} {}",
        "window", "max (mm)", "from", "to", "return period"
    );
    for row in rows {
        println!(
            "{:<8} {:>10}  {:<25} {:<25} {}",
            format_window(row.window),
            format_depth(row.max_mm),
            format_bound(row.start),
            format_bound(row.end),
            row.label
        );
    }
    println!();
    println!(
        "whole period: {:.1} mm over {} days ({} .. {})",
        summary.total_mm,
        summary.days,
        summary.start.to_rfc3339(),
        summary.end.to_rfc3339()
    );
}

fn format_window(window: TimeDelta) -> String {
    let hours = window.num_hours();
    if hours >= 24 && hours % 24 == 0 {
        format!("{} d", hours / 24)
    } else {
        format!("{} h", hours)
    }
}

fn format_depth(depth: Option<f64>) -> String {
    match depth {
        Some(depth) => format!("{:.1}", depth),
        None => "-".to_string(),
    }
}

fn format_bound(bound: Option<DateTime<FixedOffset>>) -> String {
    match bound {
        Some(bound) => bound.to_rfc3339(),
        None => "-".to_string(),
    }
}
