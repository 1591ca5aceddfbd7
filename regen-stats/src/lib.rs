//! Sliding-window rainfall statistics.
//!
//! Given a series of observations and a window length, [`moving_sum`]
//! computes the rainfall sum of every window stepped hourly across the
//! requested range, [`rain_stats`] reduces that to the single worst window
//! and classifies it with a [`return_period::ReturnPeriodModel`], and the
//! period summary totals the whole range. The aggregation is incremental:
//! each observation enters and leaves the running sum exactly once no
//! matter how many windows are generated.

pub mod moving_sum;
pub mod rain_stats;
pub mod return_period;
