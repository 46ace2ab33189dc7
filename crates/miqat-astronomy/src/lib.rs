//! Prayer time calculations for miqat.
//!
//! Closed-form solar geometry (declination, equation of time, hour angle)
//! turned into the five daily prayer events.

pub mod solar;
pub mod timezone;
pub mod format;
pub mod prayer;
pub mod countdown;
