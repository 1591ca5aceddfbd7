//! Rainfall rate units and their accumulation intervals.

use chrono::TimeDelta;
use std::fmt;

/// Unit of measure attached to a rainfall observation.
///
/// Providers spell the same interval in more than one way (`mm/24hr` next
/// to `mm/24h`); both spellings parse to the same variant. Units nobody
/// recognizes are carried through as [`RateUnit::Other`] instead of being
/// rejected, so a series with an odd unit still aggregates.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum RateUnit {
    /// Depth accumulated over the preceding 24 hours.
    Mm24h,
    /// Depth accumulated over the preceding 3 hours.
    Mm3h,
    /// Depth accumulated over the preceding hour.
    Mm1h,
    /// Depth accumulated over the preceding 5 minutes.
    Mm5min,
    /// Unrecognized unit, preserved verbatim.
    Other(String),
}

impl RateUnit {
    /// Parse a provider unit string.
    pub fn parse(raw: &str) -> RateUnit {
        match raw.trim() {
            "mm/24hr" | "mm/24h" => RateUnit::Mm24h,
            "mm/3hr" | "mm/3h" => RateUnit::Mm3h,
            "mm/hr" | "mm/h" => RateUnit::Mm1h,
            "mm/5min" => RateUnit::Mm5min,
            other => RateUnit::Other(other.to_string()),
        }
    }

    /// Canonical spelling, used whenever a unit is serialized again.
    pub fn as_str(&self) -> &str {
        match self {
            RateUnit::Mm24h => "mm/24h",
            RateUnit::Mm3h => "mm/3h",
            RateUnit::Mm1h => "mm/h",
            RateUnit::Mm5min => "mm/5min",
            RateUnit::Other(raw) => raw,
        }
    }

    /// The accumulation interval one observation covers, if the unit is
    /// known. `None` for [`RateUnit::Other`].
    pub fn sample_interval(&self) -> Option<TimeDelta> {
        match self {
            RateUnit::Mm24h => Some(TimeDelta::hours(24)),
            RateUnit::Mm3h => Some(TimeDelta::hours(3)),
            RateUnit::Mm1h => Some(TimeDelta::hours(1)),
            RateUnit::Mm5min => Some(TimeDelta::minutes(5)),
            RateUnit::Other(_) => None,
        }
    }
}

impl From<&str> for RateUnit {
    fn from(raw: &str) -> RateUnit {
        RateUnit::parse(raw)
    }
}

impl fmt::Display for RateUnit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
