//! The upstream source of observations.

use chrono::{DateTime, Utc};

use regen_series::observation::RainObservation;

use crate::error::BoxError;
use crate::key::SeriesId;

/// Something that can fetch raw observations for a series.
///
/// Implementations return observations sorted chronologically. Trimming is
/// the cache's job; a provider may return more than was asked for.
pub trait SeriesProvider {
    fn fetch_raw(
        &self,
        id: &SeriesId,
        start: DateTime<Utc>,
        end: DateTime<Utc>,
    ) -> Result<Vec<RainObservation>, BoxError>;
}

impl<F> SeriesProvider for F
where
    F: Fn(&SeriesId, DateTime<Utc>, DateTime<Utc>) -> Result<Vec<RainObservation>, BoxError>,
{
    fn fetch_raw(
        &self,
        id: &SeriesId,
        start: DateTime<Utc>,
        end: DateTime<Utc>,
    ) -> Result<Vec<RainObservation>, BoxError> {
        self(id, start, end)
    }
}
