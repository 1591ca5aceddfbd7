//! Command implementations for the rainfall CLI.
//!
//! Provides subcommands for computing rainfall statistics tables and for
//! dumping the hourly-stepped window sums behind them.

use clap::Subcommand;

pub mod ddf;
pub mod input;
pub mod stats;
pub mod windows;

#[derive(Subcommand)]
pub enum Command {
    /// Rainfall statistics table for one location over a time range
    Stats {
        /// CSV file with observation rows: location,datetime,value,unit
        #[arg(short = 's', long)]
        series_csv: String,

        /// Location code to analyze
        #[arg(short = 'l', long)]
        location: String,

        /// Range start, RFC 3339 (e.g. 2024-01-01T09:00:00+01:00)
        #[arg(long)]
        start: String,

        /// Range end, RFC 3339
        #[arg(long)]
        end: String,

        /// Catchment area in km²
        #[arg(long, default_value_t = 25.0)]
        area_km2: f64,

        /// UTC offset window bounds are displayed in, e.g. +02:00
        #[arg(long, default_value = "+00:00")]
        display_offset: String,

        /// SQLite cache database path (in-memory cache when omitted)
        #[arg(long)]
        cache_db: Option<String>,
    },

    /// Dump every hourly-stepped window sum for one window length
    Windows {
        /// CSV file with observation rows: location,datetime,value,unit
        #[arg(short = 's', long)]
        series_csv: String,

        /// Location code to analyze
        #[arg(short = 'l', long)]
        location: String,

        /// Range start, RFC 3339
        #[arg(long)]
        start: String,

        /// Range end, RFC 3339
        #[arg(long)]
        end: String,

        /// Window length in hours
        #[arg(short = 'w', long, default_value_t = 24)]
        window_hours: i64,
    },
}

pub fn run(command: Command) -> anyhow::Result<()> {
    match command {
        Command::Stats {
            series_csv,
            location,
            start,
            end,
            area_km2,
            display_offset,
            cache_db,
        } => stats::run_stats(
            &series_csv,
            &location,
            &start,
            &end,
            area_km2,
            &display_offset,
            cache_db.as_deref(),
        ),
        Command::Windows {
            series_csv,
            location,
            start,
            end,
            window_hours,
        } => windows::run_windows(&series_csv, &location, &start, &end, window_hours),
    }
}
