//! # Miqat
//!
//! Daily prayer times from closed-form solar geometry: Julian date, solar
//! declination, equation of time and hour angle, evaluated once per day.
//!
//! This crate is a facade that re-exports functionality from the `miqat` ecosystem.
//!
//! ## Modules
//!
//! - `types`: Core types (GeoCoordinate, PrayerEventSet, MiqatError, etc.)
//! - `astronomy`: Solar formulas, calculator, refresh and countdown
//! - `timetable`: Monthly timetable
//! - `network`: IP geolocation with fallback (optional, `async` feature)
//!
//! ## Usage
//!
//! ```rust
//! use miqat::prelude::*;
//! use chrono::{FixedOffset, TimeZone};
//!
//! let now = FixedOffset::west_opt(4 * 3600).unwrap()
//!     .with_ymd_and_hms(2024, 6, 21, 12, 0, 0).unwrap();
//! let times = miqat::calculate(43.65, -79.38, Some(now)).unwrap(); // Result<PrayerEventSet, MiqatError>
//! assert_eq!(times[Prayer::Dhuhr].time, "13:18");
//! ```

pub use miqat_core::*;
