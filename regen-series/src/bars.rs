//! Bar geometry for drawing observations on a time axis.

use chrono::TimeDelta;

use crate::units::RateUnit;

/// How one observation is drawn as a bar.
///
/// An observation stamped `t` with a known accumulation interval `d`
/// covers `(t - d, t]`, so its bar starts `d` before the timestamp.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BarLayout {
    /// Offset from the observation timestamp to the bar's left edge.
    pub offset: TimeDelta,
    /// Bar width in days. Zero when the unit is unknown; the observation
    /// then renders as a point marker instead of a bar.
    pub width_days: f64,
}

/// Bar geometry for a unit.
pub fn bar_layout(unit: &RateUnit) -> BarLayout {
    match unit.sample_interval() {
        Some(interval) => BarLayout {
            offset: -interval,
            width_days: interval.num_seconds() as f64 / 86_400.0,
        },
        None => BarLayout {
            offset: TimeDelta::zero(),
            width_days: 0.0,
        },
    }
}
