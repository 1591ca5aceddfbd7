//! Reading observation CSV files and serving them as a provider.

use std::collections::HashMap;
use std::fs::File;

use anyhow::Context;
use chrono::{DateTime, Utc};

use regen_cache::error::BoxError;
use regen_cache::key::SeriesId;
use regen_cache::provider::SeriesProvider;
use regen_series::observation::{read_grouped_series, RainObservation};

/// Load a CSV observations file into per-location series.
pub fn load_series_file(path: &str) -> anyhow::Result<HashMap<String, Vec<RainObservation>>> {
    let file = File::open(path).with_context(|| format!("opening series file {}", path))?;
    let grouped =
        read_grouped_series(file).with_context(|| format!("parsing series file {}", path))?;
    log::info!("loaded {} locations from {}", grouped.len(), path);
    Ok(grouped)
}

/// Parse an RFC 3339 timestamp into a UTC instant.
pub fn parse_utc(raw: &str) -> anyhow::Result<DateTime<Utc>> {
    let parsed = DateTime::parse_from_rfc3339(raw)
        .with_context(|| format!("invalid timestamp '{}', expected RFC 3339", raw))?;
    Ok(parsed.with_timezone(&Utc))
}

/// Provider serving observations out of a loaded CSV file.
///
/// Lookup is by the id's location field. Rows outside the requested range
/// are filtered out; an unknown location is an empty series, not an error.
pub struct CsvSeriesProvider {
    series: HashMap<String, Vec<RainObservation>>,
}

impl CsvSeriesProvider {
    pub fn new(series: HashMap<String, Vec<RainObservation>>) -> CsvSeriesProvider {
        CsvSeriesProvider { series }
    }
}

impl SeriesProvider for CsvSeriesProvider {
    fn fetch_raw(
        &self,
        id: &SeriesId,
        start: DateTime<Utc>,
        end: DateTime<Utc>,
    ) -> Result<Vec<RainObservation>, BoxError> {
        let Some(values) = self.series.get(&id.location) else {
            return Ok(Vec::new());
        };
        Ok(values
            .iter()
            .filter(|obs| {
                let t = obs.at_utc();
                t >= start && t <= end
            })
            .cloned()
            .collect())
    }
}
