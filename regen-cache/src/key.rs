//! Cache keys: series identity plus a day-quantized time range.

use chrono::{DateTime, NaiveTime, TimeDelta, Utc};

/// Identity of one rainfall time series at the provider.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct SeriesId {
    pub source: String,
    pub filter: String,
    pub parameter: String,
    pub location: String,
}

impl SeriesId {
    pub fn new(source: &str, filter: &str, parameter: &str, location: &str) -> SeriesId {
        SeriesId {
            source: source.to_string(),
            filter: filter.to_string(),
            parameter: parameter.to_string(),
            location: location.to_string(),
        }
    }
}

/// Separator between key fields. Field order and separator are fixed;
/// changing either invalidates every existing entry.
pub const KEY_SEPARATOR: &str = "::";

/// Widen `[start, end]` to whole days: `start` floors to its midnight and
/// `end` moves to the midnight after its date, also when it already is
/// exactly midnight.
pub fn day_quantized_bounds(
    start: DateTime<Utc>,
    end: DateTime<Utc>,
) -> (DateTime<Utc>, DateTime<Utc>) {
    (
        floor_to_midnight(start),
        floor_to_midnight(end) + TimeDelta::days(1),
    )
}

fn floor_to_midnight(at: DateTime<Utc>) -> DateTime<Utc> {
    at.date_naive().and_time(NaiveTime::MIN).and_utc()
}

/// Key for a series over a quantized range: the identity fields and both
/// bounds joined with [`KEY_SEPARATOR`]. Not hashed; two keys are equal
/// exactly when the requests are.
pub fn cache_key(id: &SeriesId, day_start: DateTime<Utc>, day_end: DateTime<Utc>) -> String {
    let start = day_start.to_rfc3339();
    let end = day_end.to_rfc3339();
    [
        id.source.as_str(),
        id.filter.as_str(),
        id.parameter.as_str(),
        id.location.as_str(),
        start.as_str(),
        end.as_str(),
    ]
    .join(KEY_SEPARATOR)
}
