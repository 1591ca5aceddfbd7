//! Trimming a series to a requested time range.

use chrono::{DateTime, NaiveDateTime, Utc};

use crate::observation::RainObservation;

/// Drop observations outside `[start, end]`. Both bounds are inclusive and
/// the input must be sorted chronologically. Applying the same trim twice
/// changes nothing.
pub fn trim_to_range(values: &mut Vec<RainObservation>, start: DateTime<Utc>, end: DateTime<Utc>) {
    let keep_from = values
        .iter()
        .position(|obs| obs.at_utc() >= start)
        .unwrap_or(values.len());
    values.drain(..keep_from);

    let keep_to = values
        .iter()
        .rposition(|obs| obs.at_utc() <= end)
        .map_or(0, |index| index + 1);
    values.truncate(keep_to);
}

/// Trim against naive bounds by anchoring them in the UTC offset of the
/// first observation. An empty series has no offset to anchor to and is
/// left untouched.
pub fn trim_to_naive_range(
    values: &mut Vec<RainObservation>,
    start: NaiveDateTime,
    end: NaiveDateTime,
) {
    let Some(first) = values.first() else {
        return;
    };
    let offset = *first.datetime.offset();
    let (Some(start), Some(end)) = (
        start.and_local_timezone(offset).single(),
        end.and_local_timezone(offset).single(),
    ) else {
        return;
    };
    trim_to_range(
        values,
        start.with_timezone(&Utc),
        end.with_timezone(&Utc),
    );
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::units::RateUnit;
    use chrono::{NaiveDate, TimeZone};

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

    fn sample_series() -> Vec<RainObservation> {
        vec![
            obs("2024-01-01T08:00:00+00:00", 0.1),
            obs("2024-01-01T09:00:00+00:00", 0.2),
            obs("2024-01-01T10:00:00+00:00", 0.3),
            obs("2024-01-01T11:00:00+00:00", 0.4),
            obs("2024-01-01T12:00:00+00:00", 0.5),
        ]
    }

    #[test]
    fn keeps_observations_exactly_on_both_bounds() {
        let mut values = sample_series();
        trim_to_range(
            &mut values,
            utc(2024, 1, 1, 9, 0, 0),
            utc(2024, 1, 1, 11, 0, 0),
        );
        let kept: Vec<f64> = values.iter().map(|o| o.value).collect();
        assert_eq!(kept, vec![0.2, 0.3, 0.4]);
    }

    #[test]
    fn trim_is_idempotent() {
        let mut values = sample_series();
        let start = utc(2024, 1, 1, 9, 0, 0);
        let end = utc(2024, 1, 1, 11, 0, 0);
        trim_to_range(&mut values, start, end);
        let once = values.clone();
        trim_to_range(&mut values, start, end);
        assert_eq!(values, once);
    }

    #[test]
    fn range_outside_series_empties_it() {
        let mut values = sample_series();
        trim_to_range(
            &mut values,
            utc(2024, 2, 1, 0, 0, 0),
            utc(2024, 2, 2, 0, 0, 0),
        );
        assert!(values.is_empty());

        let mut values = sample_series();
        trim_to_range(
            &mut values,
            utc(2023, 12, 1, 0, 0, 0),
            utc(2023, 12, 2, 0, 0, 0),
        );
        assert!(values.is_empty());
    }

    #[test]
    fn naive_bounds_anchor_to_first_observation_offset() {
        // Series reported at +02:00; naive 10:00 means 08:00Z.
        let mut values = vec![
            obs("2024-01-01T09:00:00+02:00", 1.0),
            obs("2024-01-01T10:00:00+02:00", 2.0),
            obs("2024-01-01T11:00:00+02:00", 3.0),
        ];
        let start = NaiveDate::from_ymd_opt(2024, 1, 1)
            .unwrap()
            .and_hms_opt(10, 0, 0)
            .unwrap();
        let end = NaiveDate::from_ymd_opt(2024, 1, 1)
            .unwrap()
            .and_hms_opt(11, 0, 0)
            .unwrap();
        trim_to_naive_range(&mut values, start, end);
        let kept: Vec<f64> = values.iter().map(|o| o.value).collect();
        assert_eq!(kept, vec![2.0, 3.0]);
    }

    #[test]
    fn naive_trim_leaves_empty_series_alone() {
        let mut values: Vec<RainObservation> = Vec::new();
        let start = NaiveDate::from_ymd_opt(2024, 1, 1)
            .unwrap()
            .and_hms_opt(0, 0, 0)
            .unwrap();
        trim_to_naive_range(&mut values, start, start);
        assert!(values.is_empty());
    }
}
