//! Time-bounded caching for rainfall observations.
//!
//! [`RainCache`] sits between a [`provider::SeriesProvider`] (the upstream
//! data source) and a [`store::CacheStore`] (memory or SQLite). Requests
//! are keyed on whole days, so all requests touching the same days of one
//! series share a single entry, and the provider is asked for the whole
//! quantized span rather than the exact range. Payloads live in the store
//! as JSON with RFC 3339 timestamp strings; a hit and a miss both pass
//! through the same decode path before the series is trimmed back to the
//! exact requested range.

pub mod entry;
pub mod error;
pub mod key;
pub mod provider;
pub mod sqlite;
pub mod store;

use std::time::Duration;

use chrono::{DateTime, Utc};

use regen_series::observation::RainObservation;
use regen_series::trim;

use crate::error::{CacheError, Result};
use crate::key::{cache_key, day_quantized_bounds, SeriesId};
use crate::provider::SeriesProvider;
use crate::store::CacheStore;

/// How long a cached payload stays valid.
pub const CACHE_TTL: Duration = Duration::from_secs(5 * 60);

/// Read-through cache for rainfall series.
pub struct RainCache<P, S> {
    provider: P,
    store: S,
    ttl: Duration,
}

impl<P: SeriesProvider, S: CacheStore> RainCache<P, S> {
    pub fn new(provider: P, store: S) -> RainCache<P, S> {
        RainCache::with_ttl(provider, store, CACHE_TTL)
    }

    /// Cache with a custom time-to-live.
    pub fn with_ttl(provider: P, store: S, ttl: Duration) -> RainCache<P, S> {
        RainCache {
            provider,
            store,
            ttl,
        }
    }

    /// Observations for `id` covering `[start, end]`, both ends inclusive.
    ///
    /// An entry that cannot be decoded counts as a miss: it is logged,
    /// refetched and overwritten. Provider and store failures are the only
    /// errors that reach the caller.
    pub fn cached_values(
        &self,
        id: &SeriesId,
        start: DateTime<Utc>,
        end: DateTime<Utc>,
    ) -> Result<Vec<RainObservation>> {
        let (day_start, day_end) = day_quantized_bounds(start, end);
        let key = cache_key(id, day_start, day_end);

        let payload = match self.store.get(&key)? {
            Some(payload) => {
                log::debug!("got timeseries for {} from cache", id.location);
                payload
            }
            None => self.refresh(&key, id, day_start, day_end)?,
        };

        let mut values = match entry::decode(&payload) {
            Ok(values) => values,
            Err(err) => {
                log::warn!(
                    "dropping unreadable cache entry for {}: {}",
                    id.location,
                    err
                );
                let payload = self.refresh(&key, id, day_start, day_end)?;
                entry::decode(&payload)?
            }
        };

        trim::trim_to_range(&mut values, start, end);
        Ok(values)
    }

    /// Fetch the quantized range from the provider and store it.
    fn refresh(
        &self,
        key: &str,
        id: &SeriesId,
        day_start: DateTime<Utc>,
        day_end: DateTime<Utc>,
    ) -> Result<String> {
        log::debug!(
            "caching values for {} [{} .. {}]",
            id.location,
            day_start,
            day_end
        );
        let fetched = self
            .provider
            .fetch_raw(id, day_start, day_end)
            .map_err(CacheError::Provider)?;
        let payload = entry::encode(&fetched)?;
        self.store.set(key, &payload, self.ttl)?;
        log::debug!("cache written for {} ({} values)", id.location, fetched.len());
        Ok(payload)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::BoxError;
    use crate::store::MemoryStore;
    use chrono::TimeZone;
    use regen_series::units::RateUnit;
    use std::cell::Cell;
    use std::rc::Rc;

    fn obs(rfc3339: &str, value: f64) -> RainObservation {
        RainObservation {
            datetime: DateTime::parse_from_rfc3339(rfc3339).unwrap(),
            value,
            unit: RateUnit::Mm1h,
        }
    }

    fn utc(y: i32, mo: u32, d: u32, h: u32, mi: u32, s: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(y, mo, d, h, mi, s).unwrap()
    }

    fn sample_id() -> SeriesId {
        SeriesId::new("fews", "rain", "P.radar", "GOUDA")
    }

    /// Provider that counts calls and always returns the same day of data.
    fn counting_provider(
        calls: Rc<Cell<u32>>,
        values: Vec<RainObservation>,
    ) -> impl Fn(&SeriesId, DateTime<Utc>, DateTime<Utc>) -> std::result::Result<Vec<RainObservation>, BoxError>
    {
        move |_id, _start, _end| {
            calls.set(calls.get() + 1);
            Ok(values.clone())
        }
    }

    fn full_day() -> Vec<RainObservation> {
        vec![
            obs("2024-01-01T02:00:00+02:00", 0.5),
            obs("2024-01-01T08:30:00+02:00", 1.5),
            obs("2024-01-01T09:00:00+02:00", 2.5),
            obs("2024-01-01T10:00:00+02:00", 3.5),
            obs("2024-01-01T23:00:00+02:00", 4.5),
        ]
    }

    #[test]
    fn second_request_is_served_from_cache() {
        let calls = Rc::new(Cell::new(0));
        let cache = RainCache::new(
            counting_provider(calls.clone(), full_day()),
            MemoryStore::new(),
        );
        let id = sample_id();
        let start = utc(2024, 1, 1, 7, 0, 0);
        let end = utc(2024, 1, 1, 8, 0, 0);

        let first = cache.cached_values(&id, start, end).unwrap();
        let second = cache.cached_values(&id, start, end).unwrap();
        assert_eq!(calls.get(), 1);
        assert_eq!(first, second);
        // The provider offset survives both the fresh and the cached path.
        assert_eq!(first[0].datetime.offset().local_minus_utc(), 7200);
        assert_eq!(second[0].datetime.offset().local_minus_utc(), 7200);
    }

    #[test]
    fn provider_is_asked_for_the_quantized_days() {
        let seen = Rc::new(Cell::new(None));
        let seen_in_provider = seen.clone();
        let provider = move |_id: &SeriesId,
                             start: DateTime<Utc>,
                             end: DateTime<Utc>|
              -> std::result::Result<Vec<RainObservation>, BoxError> {
            seen_in_provider.set(Some((start, end)));
            Ok(Vec::new())
        };
        let cache = RainCache::new(provider, MemoryStore::new());
        cache
            .cached_values(&sample_id(), utc(2024, 1, 1, 9, 30, 0), utc(2024, 1, 2, 11, 0, 0))
            .unwrap();
        assert_eq!(
            seen.get(),
            Some((utc(2024, 1, 1, 0, 0, 0), utc(2024, 1, 3, 0, 0, 0)))
        );
    }

    #[test]
    fn wider_request_in_the_same_day_reuses_the_entry() {
        let calls = Rc::new(Cell::new(0));
        let cache = RainCache::new(
            counting_provider(calls.clone(), full_day()),
            MemoryStore::new(),
        );
        let id = sample_id();

        // 08:30+02:00 is 06:30Z; the narrow request excludes it.
        let narrow = cache
            .cached_values(&id, utc(2024, 1, 1, 7, 0, 0), utc(2024, 1, 1, 8, 0, 0))
            .unwrap();
        assert_eq!(narrow.len(), 2);

        // The wider request hits the same day entry and still finds the
        // earlier observation, because the whole day was fetched.
        let wide = cache
            .cached_values(&id, utc(2024, 1, 1, 6, 0, 0), utc(2024, 1, 1, 8, 0, 0))
            .unwrap();
        assert_eq!(calls.get(), 1);
        assert_eq!(wide.len(), 3);
        assert_eq!(wide[0].value, 1.5);
    }

    #[test]
    fn values_are_trimmed_to_the_inclusive_range() {
        let cache = RainCache::new(
            counting_provider(Rc::new(Cell::new(0)), full_day()),
            MemoryStore::new(),
        );
        // Bounds land exactly on the 09:00+02:00 and 10:00+02:00 samples.
        let values = cache
            .cached_values(&sample_id(), utc(2024, 1, 1, 7, 0, 0), utc(2024, 1, 1, 8, 0, 0))
            .unwrap();
        let kept: Vec<f64> = values.iter().map(|o| o.value).collect();
        assert_eq!(kept, vec![2.5, 3.5]);
    }

    #[test]
    fn unreadable_entry_counts_as_a_miss() {
        let calls = Rc::new(Cell::new(0));
        let store = MemoryStore::new();
        let id = sample_id();
        let start = utc(2024, 1, 1, 7, 0, 0);
        let end = utc(2024, 1, 1, 8, 0, 0);
        let (day_start, day_end) = day_quantized_bounds(start, end);
        store
            .set(&cache_key(&id, day_start, day_end), "{broken", CACHE_TTL)
            .unwrap();

        let cache = RainCache::new(counting_provider(calls.clone(), full_day()), store);
        let values = cache.cached_values(&id, start, end).unwrap();
        assert_eq!(calls.get(), 1);
        assert_eq!(values.len(), 2);
    }

    #[test]
    fn provider_errors_reach_the_caller() {
        let provider = |_id: &SeriesId,
                        _start: DateTime<Utc>,
                        _end: DateTime<Utc>|
         -> std::result::Result<Vec<RainObservation>, BoxError> {
            Err("gateway timeout".into())
        };
        let cache = RainCache::new(provider, MemoryStore::new());
        let err = cache
            .cached_values(&sample_id(), utc(2024, 1, 1, 7, 0, 0), utc(2024, 1, 1, 8, 0, 0))
            .unwrap_err();
        assert!(matches!(err, CacheError::Provider(_)));
    }

    #[test]
    fn expired_entry_is_fetched_again() {
        let calls = Rc::new(Cell::new(0));
        let cache = RainCache::with_ttl(
            counting_provider(calls.clone(), full_day()),
            MemoryStore::new(),
            Duration::ZERO,
        );
        let id = sample_id();
        let start = utc(2024, 1, 1, 7, 0, 0);
        let end = utc(2024, 1, 1, 8, 0, 0);
        cache.cached_values(&id, start, end).unwrap();
        cache.cached_values(&id, start, end).unwrap();
        assert_eq!(calls.get(), 2);
    }

    #[test]
    fn empty_fetches_are_cached_too() {
        let calls = Rc::new(Cell::new(0));
        let cache = RainCache::new(
            counting_provider(calls.clone(), Vec::new()),
            MemoryStore::new(),
        );
        let id = sample_id();
        let start = utc(2024, 1, 1, 7, 0, 0);
        let end = utc(2024, 1, 1, 8, 0, 0);
        assert!(cache.cached_values(&id, start, end).unwrap().is_empty());
        assert!(cache.cached_values(&id, start, end).unwrap().is_empty());
        assert_eq!(calls.get(), 1);
    }

    #[test]
    fn works_against_the_sqlite_store() {
        let calls = Rc::new(Cell::new(0));
        let cache = RainCache::new(
            counting_provider(calls.clone(), full_day()),
            crate::sqlite::SqliteStore::open_in_memory().unwrap(),
        );
        let id = sample_id();
        let start = utc(2024, 1, 1, 7, 0, 0);
        let end = utc(2024, 1, 1, 8, 0, 0);
        let first = cache.cached_values(&id, start, end).unwrap();
        let second = cache.cached_values(&id, start, end).unwrap();
        assert_eq!(calls.get(), 1);
        assert_eq!(first, second);
    }
}
