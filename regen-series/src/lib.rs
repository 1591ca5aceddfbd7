//! Core types for rainfall time series.
//!
//! An observation is a timestamped depth in millimeters together with the
//! rate unit the provider reported it in. This crate owns the observation
//! and unit types, CSV parsing into per-location series, trimming a series
//! to a requested time range, and the bar geometry used when a series is
//! drawn on a time axis. Caching and statistics live in their own crates
//! on top of these types.

pub mod bars;
pub mod error;
pub mod observation;
pub mod trim;
pub mod units;
