//! Statistics rows for the rainfall table: worst window per window length
//! plus a whole-period summary.

use chrono::{DateTime, FixedOffset, TimeDelta, Utc};

use regen_series::observation::RainObservation;

use crate::moving_sum::{max_window, window_sums};
use crate::return_period::{return_period_label, ReturnPeriodModel};

/// One row of the statistics table: the worst `window`-long stretch within
/// the requested range.
#[derive(Debug, Clone, PartialEq)]
pub struct RainStatRow {
    pub window: TimeDelta,
    pub max_mm: Option<f64>,
    pub start: Option<DateTime<FixedOffset>>,
    pub end: Option<DateTime<FixedOffset>>,
    pub label: String,
}

impl RainStatRow {
    fn empty(window: TimeDelta) -> RainStatRow {
        RainStatRow {
            window,
            max_mm: None,
            start: None,
            end: None,
            label: return_period_label(None),
        }
    }
}

/// Window lengths the statistics table reports on.
pub fn standard_windows() -> [TimeDelta; 4] {
    [
        TimeDelta::days(2),
        TimeDelta::days(1),
        TimeDelta::hours(3),
        TimeDelta::hours(1),
    ]
}

/// Compute the maximum moving sum for one window length and classify it.
///
/// `display_tz` is the offset the winning window bounds are reported in.
/// An empty series, or a window too long for the range, produces a row of
/// absent values with a dash label.
pub fn rain_stats<M: ReturnPeriodModel>(
    values: &[RainObservation],
    window: TimeDelta,
    range_start: DateTime<Utc>,
    range_end: DateTime<Utc>,
    area_km2: f64,
    display_tz: FixedOffset,
    model: &M,
) -> RainStatRow {
    let hours = window.num_seconds() as f64 / 3600.0;
    log::debug!("computing rain stats for a {} h window", hours);

    if values.is_empty() {
        return RainStatRow::empty(window);
    }
    let sums = window_sums(values, window, range_start, range_end);
    let Some(best) = max_window(&sums) else {
        return RainStatRow::empty(window);
    };

    let t = model.return_period(hours, area_km2, best.sum_mm);
    RainStatRow {
        window,
        max_mm: Some(best.sum_mm),
        start: Some(best.start.with_timezone(&display_tz)),
        end: Some(best.end.with_timezone(&display_tz)),
        label: return_period_label(t),
    }
}

/// Totals over the whole requested period, shown under the window rows.
#[derive(Debug, Clone, PartialEq)]
pub struct PeriodSummary {
    pub total_mm: f64,
    pub start: DateTime<FixedOffset>,
    pub end: DateTime<FixedOffset>,
    pub days: i64,
    pub label: String,
}

/// Sum every observation into a single summary row. The range is assumed
/// to be trimmed already; whatever is in `values` counts.
pub fn period_summary(
    values: &[RainObservation],
    range_start: DateTime<Utc>,
    range_end: DateTime<Utc>,
    display_tz: FixedOffset,
) -> PeriodSummary {
    let total_mm = values.iter().map(|obs| obs.value).sum();
    PeriodSummary {
        total_mm,
        start: range_start.with_timezone(&display_tz),
        end: range_end.with_timezone(&display_tz),
        days: (range_end - range_start).num_days(),
        label: "-".to_string(),
    }
}
