//! Return period classification of rainfall depths.

/// Statistical model mapping a rainfall event to a return period in years.
///
/// `duration_hours` is the window length, `area_km2` the catchment area
/// and `depth_mm` the accumulated depth. `None` means the model cannot
/// place the event, for instance a depth beyond its table or a duration it
/// has no curve for.
pub trait ReturnPeriodModel {
    fn return_period(&self, duration_hours: f64, area_km2: f64, depth_mm: f64) -> Option<f64>;
}

impl<F> ReturnPeriodModel for F
where
    F: Fn(f64, f64, f64) -> Option<f64>,
{
    fn return_period(&self, duration_hours: f64, area_km2: f64, depth_mm: f64) -> Option<f64> {
        self(duration_hours, area_km2, depth_mm)
    }
}

/// Format a return period for display: whole years above one, a floor
/// marker at or below one, a dash when the model had no answer.
pub fn return_period_label(t: Option<f64>) -> String {
    match t {
        None => "-".to_string(),
        Some(t) if t > 1.0 => format!("T = {}", t as i64),
        Some(_) => "T ≤ 1".to_string(),
    }
}

/// Convert an area in m² to km².
pub fn square_meters_to_square_km(area_m2: f64) -> f64 {
    area_m2 / 1_000_000.0
}
