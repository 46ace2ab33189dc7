//! Network module for locating the user.
//!
//! Provides IP-based geolocation and fallback composition of providers.

pub mod geo;

pub use geo::{Fallback, FixedLocation, GeolocationProvider, IpApiProvider, LocationInfo};
