//! Rainfall observations and CSV parsing.
//!
//! Observation files are CSV with a header row, one observation per line:
//!
//! ```text
//! LOCATION,DATETIME,VALUE,UNIT
//! GOUDA,2024-01-01T09:00:00+01:00,1.2,mm/h
//! GOUDA,2024-01-01T10:00:00+01:00,-2.0,mm/h
//! ```
//!
//! Timestamps are RFC 3339 and keep whatever UTC offset the provider wrote
//! them with. Negative values at or below [`STATUS_CODE_CEILING`] are
//! provider status codes (sensor fault, maintenance), not measured rain.

use std::collections::HashMap;
use std::io::Read;

use chrono::{DateTime, FixedOffset, Utc};
use csv::StringRecord;
use itertools::Itertools;

use crate::error::{Result, SeriesError};
use crate::units::RateUnit;

/// Number of fields in one observation row: `location,datetime,value,unit`.
pub const CSV_ROW_LENGTH: usize = 4;

/// Values at or below this are status codes rather than measurements.
pub const STATUS_CODE_CEILING: f64 = -0.5;

/// A single rainfall measurement.
///
/// The timestamp keeps the UTC offset it arrived with, so an observation
/// survives serialization and comes back with the same offset. Ordering
/// and window arithmetic always go through [`RainObservation::at_utc`].
#[derive(Debug, Clone, PartialEq)]
pub struct RainObservation {
    pub datetime: DateTime<FixedOffset>,
    pub value: f64,
    pub unit: RateUnit,
}

impl RainObservation {
    /// The observation instant on the UTC timeline.
    pub fn at_utc(&self) -> DateTime<Utc> {
        self.datetime.with_timezone(&Utc)
    }

    /// True when the value is a status code rather than a measurement.
    pub fn is_status_code(&self) -> bool {
        self.value <= STATUS_CODE_CEILING
    }

    /// Human-readable value: the depth, or the status code spelled out.
    pub fn value_label(&self) -> String {
        if self.is_status_code() {
            format!("no data (status {})", self.value as i64)
        } else {
            format!("{:.1} mm", self.value)
        }
    }
}

/// One parsed CSV row: an observation plus the location it belongs to.
#[derive(Debug, Clone, PartialEq)]
pub struct SeriesRow {
    pub location: String,
    pub observation: RainObservation,
}

impl TryFrom<StringRecord> for SeriesRow {
    type Error = SeriesError;

    fn try_from(record: StringRecord) -> Result<SeriesRow> {
        if record.len() != CSV_ROW_LENGTH {
            return Err(SeriesError::InvalidRecord {
                message: format!(
                    "expected {} fields, got {}",
                    CSV_ROW_LENGTH,
                    record.len()
                ),
            });
        }
        let field = |index: usize| -> Result<&str> {
            record
                .get(index)
                .map(str::trim)
                .ok_or_else(|| SeriesError::InvalidRecord {
                    message: format!("missing field {}", index),
                })
        };

        let location = field(0)?;
        if location.is_empty() {
            return Err(SeriesError::InvalidRecord {
                message: "empty location".to_string(),
            });
        }
        let datetime = DateTime::parse_from_rfc3339(field(1)?)?;
        let value: f64 = field(2)?.parse()?;
        let unit = RateUnit::parse(field(3)?);

        Ok(SeriesRow {
            location: location.to_string(),
            observation: RainObservation {
                datetime,
                value,
                unit,
            },
        })
    }
}

/// Sort a series chronologically.
pub fn sort_chronologically(values: &mut [RainObservation]) {
    values.sort_by_key(RainObservation::at_utc);
}

/// Read observation rows and group them into per-location series, each
/// sorted by time.
///
/// Malformed rows are skipped and counted, matching how bulk loads treat
/// bad lines elsewhere in the toolkit.
pub fn read_grouped_series<R: Read>(reader: R) -> Result<HashMap<String, Vec<RainObservation>>> {
    let mut rdr = csv::ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .from_reader(reader);

    let mut rows: Vec<SeriesRow> = Vec::new();
    let mut skipped = 0u32;
    for result in rdr.records() {
        let record = result?;
        match SeriesRow::try_from(record) {
            Ok(row) => rows.push(row),
            Err(err) => {
                skipped += 1;
                log::debug!("skipping malformed observation row: {}", err);
            }
        }
    }

    rows.sort_by(|a, b| {
        a.location
            .cmp(&b.location)
            .then_with(|| a.observation.at_utc().cmp(&b.observation.at_utc()))
    });

    let mut grouped: HashMap<String, Vec<RainObservation>> = HashMap::new();
    for (location, chunk) in &rows.into_iter().chunk_by(|row| row.location.clone()) {
        grouped.insert(location, chunk.map(|row| row.observation).collect());
    }

    log::info!(
        "loaded {} locations ({} rows skipped)",
        grouped.len(),
        skipped
    );
    Ok(grouped)
}
