//! Core types for miqat - solar prayer time calculator.
//!
//! This crate contains pure type definitions with no astronomy in it.

mod error;
mod geo;
mod params;
mod format;
mod prayer;

pub use error::MiqatError;
pub use geo::GeoCoordinate;
pub use params::{CalculationParams, CalculationParamsBuilder};
pub use format::{FormatConfig, Numerals};
pub use prayer::{Prayer, PrayerEvent, PrayerEventSet};
