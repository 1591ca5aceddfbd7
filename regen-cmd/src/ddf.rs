//! A depth-duration-frequency table for return period lookups.
//!
//! Deployments normally classify against their own regional statistics;
//! this table is a built-in stand-in with round-number depths so the CLI
//! can label events out of the box. Lookups pick the nearest tabulated
//! duration in log space, convert the areal depth to an equivalent point
//! depth, then interpolate the return period log-linearly between the
//! tabulated depths.

use regen_stats::return_period::ReturnPeriodModel;

/// Return period (years) and depth (mm) pairs for one event duration.
/// Depths are strictly increasing within a row.
struct DurationRow {
    hours: f64,
    points: &'static [(f64, f64)],
}

const DURATION_ROWS: &[DurationRow] = &[
    DurationRow {
        hours: 1.0,
        points: &[
            (1.0, 8.0),
            (2.0, 11.0),
            (5.0, 15.0),
            (10.0, 19.0),
            (25.0, 24.0),
            (50.0, 29.0),
            (100.0, 34.0),
        ],
    },
    DurationRow {
        hours: 3.0,
        points: &[
            (1.0, 12.0),
            (2.0, 15.0),
            (5.0, 20.0),
            (10.0, 25.0),
            (25.0, 32.0),
            (50.0, 38.0),
            (100.0, 45.0),
        ],
    },
    DurationRow {
        hours: 24.0,
        points: &[
            (1.0, 20.0),
            (2.0, 25.0),
            (5.0, 33.0),
            (10.0, 40.0),
            (25.0, 50.0),
            (50.0, 60.0),
            (100.0, 71.0),
        ],
    },
    DurationRow {
        hours: 48.0,
        points: &[
            (1.0, 25.0),
            (2.0, 31.0),
            (5.0, 41.0),
            (10.0, 50.0),
            (25.0, 63.0),
            (50.0, 75.0),
            (100.0, 89.0),
        ],
    },
];

/// Smallest return period the table will report.
const MIN_RETURN_PERIOD: f64 = 0.1;

/// Table-driven return period model with an areal reduction factor.
pub struct DdfTable;

impl ReturnPeriodModel for DdfTable {
    fn return_period(&self, duration_hours: f64, area_km2: f64, depth_mm: f64) -> Option<f64> {
        if !duration_hours.is_finite() || !depth_mm.is_finite() || duration_hours <= 0.0 {
            return None;
        }
        let row = nearest_row(duration_hours)?;
        let point_depth = depth_mm / areal_reduction(area_km2, duration_hours);
        interpolate(row.points, point_depth)
    }
}

/// Tabulated duration closest to `duration_hours` in log space.
fn nearest_row(duration_hours: f64) -> Option<&'static DurationRow> {
    let mut best: Option<(&'static DurationRow, f64)> = None;
    for row in DURATION_ROWS {
        let distance = (row.hours.ln() - duration_hours.ln()).abs();
        let better = match best {
            Some((_, best_distance)) => distance < best_distance,
            None => true,
        };
        if better {
            best = Some((row, distance));
        }
    }
    best.map(|(row, _)| row)
}

/// Ratio of areal to point depth, 1.0 at or below 1 km² and shrinking for
/// larger catchments and shorter durations.
fn areal_reduction(area_km2: f64, duration_hours: f64) -> f64 {
    let area = area_km2.max(1.0);
    let hours = duration_hours.max(0.25);
    (1.0 - 0.04 * area.log10() * hours.powf(-0.25)).clamp(0.5, 1.0)
}

/// Log-linear interpolation of the return period for `depth_mm`.
///
/// Depths beyond the last tabulated point are out of range. Depths under
/// the first point extrapolate along the first segment, floored at
/// [`MIN_RETURN_PERIOD`].
fn interpolate(points: &[(f64, f64)], depth_mm: f64) -> Option<f64> {
    let (_, last_depth) = *points.last()?;
    if depth_mm > last_depth {
        return None;
    }
    let (first_t, first_depth) = *points.first()?;
    if depth_mm <= first_depth {
        let (second_t, second_depth) = *points.get(1)?;
        let slope = (second_t.ln() - first_t.ln()) / (second_depth - first_depth);
        let t = (first_t.ln() + (depth_mm - first_depth) * slope).exp();
        return Some(t.max(MIN_RETURN_PERIOD));
    }
    for pair in points.windows(2) {
        let (t1, d1) = pair[0];
        let (t2, d2) = pair[1];
        if depth_mm <= d2 {
            let fraction = (depth_mm - d1) / (d2 - d1);
            return Some((t1.ln() + fraction * (t2.ln() - t1.ln())).exp());
        }
    }
    None
}
