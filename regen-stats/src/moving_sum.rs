//! Maximum moving sums over a rainfall series.

use chrono::{DateTime, TimeDelta, Utc};

use regen_series::observation::RainObservation;

/// One window's accumulated rainfall.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct WindowSum {
    pub sum_mm: f64,
    pub start: DateTime<Utc>,
    pub end: DateTime<Utc>,
}

/// Spacing between successive window starts.
pub fn window_step() -> TimeDelta {
    TimeDelta::hours(1)
}

/// Slack past the range end within which a final window may still close.
/// Covers ranges specified as `23:59:59`-style inclusive day ends.
pub fn range_end_tolerance() -> TimeDelta {
    TimeDelta::seconds(2)
}

/// Sums of `window`-long windows stepped hourly across `[range_start,
/// range_end]`.
///
/// Values must be sorted chronologically. A window `[w, w + window)` is
/// generated while `w + window <= range_end + tolerance`; its sum counts
/// observations with `w <= t < w + window`. Windows without observations
/// report 0.0, and a non-positive window yields no windows at all.
///
/// Both index pointers only ever move forward and every observation is
/// added and removed from the running sum at most once, so the whole scan
/// is linear in windows plus observations.
pub fn window_sums(
    values: &[RainObservation],
    window: TimeDelta,
    range_start: DateTime<Utc>,
    range_end: DateTime<Utc>,
) -> Vec<WindowSum> {
    let mut sums = Vec::new();
    if window <= TimeDelta::zero() {
        return sums;
    }
    let deadline = range_end + range_end_tolerance();

    let mut min_index = 0usize;
    let mut max_index = 0usize;
    let mut sum_mm = 0.0f64;
    let mut window_start = range_start;

    while window_start + window <= deadline {
        let window_end = window_start + window;
        while min_index < values.len() && values[min_index].at_utc() < window_start {
            sum_mm -= values[min_index].value;
            min_index += 1;
        }
        while max_index < values.len() && values[max_index].at_utc() < window_end {
            sum_mm += values[max_index].value;
            max_index += 1;
        }
        sums.push(WindowSum {
            sum_mm,
            start: window_start,
            end: window_end,
        });
        window_start = window_start + window_step();
    }
    sums
}

/// The window with the greatest sum. Ties keep the earliest window.
pub fn max_window(sums: &[WindowSum]) -> Option<WindowSum> {
    let mut best: Option<WindowSum> = None;
    for candidate in sums {
        let better = match best {
            Some(current) => candidate.sum_mm > current.sum_mm,
            None => true,
        };
        if better {
            best = Some(*candidate);
        }
    }
    best
}
