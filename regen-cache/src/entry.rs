//! Serialized form of cached observations.
//!
//! Timestamps are stored as RFC 3339 strings carrying their original UTC
//! offset. Hits and misses both pass through [`decode`], so the caller
//! receives identical values whether the payload was just written or read
//! back later.

use chrono::DateTime;
use serde::{Deserialize, Serialize};

use regen_series::observation::RainObservation;
use regen_series::units::RateUnit;

use crate::error::EntryError;

/// One observation as it sits in a cache payload.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CachedValue {
    pub datetime: String,
    pub value: f64,
    pub unit: String,
}

impl From<&RainObservation> for CachedValue {
    fn from(obs: &RainObservation) -> CachedValue {
        CachedValue {
            datetime: obs.datetime.to_rfc3339(),
            value: obs.value,
            unit: obs.unit.as_str().to_string(),
        }
    }
}

impl CachedValue {
    fn into_observation(self) -> Result<RainObservation, EntryError> {
        Ok(RainObservation {
            datetime: DateTime::parse_from_rfc3339(&self.datetime)?,
            value: self.value,
            unit: RateUnit::parse(&self.unit),
        })
    }
}

/// Encode observations into a cache payload.
pub fn encode(values: &[RainObservation]) -> Result<String, EntryError> {
    let entries: Vec<CachedValue> = values.iter().map(CachedValue::from).collect();
    Ok(serde_json::to_string(&entries)?)
}

/// Decode a cache payload back into observations.
pub fn decode(payload: &str) -> Result<Vec<RainObservation>, EntryError> {
    let entries: Vec<CachedValue> = serde_json::from_str(payload)?;
    entries
        .into_iter()
        .map(CachedValue::into_observation)
        .collect()
}
