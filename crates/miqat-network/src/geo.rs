//! Geolocation Module.
//!
//! Locates the user with a fixed (device/query supplied) coordinate or an
//! IP lookup against ipapi.co, and composes providers with fallback.

use std::future::Future;

use log::{debug, warn};
use miqat_types::{GeoCoordinate, MiqatError};
use serde::Deserialize;

/// Location information with coordinates and place name.
#[derive(Debug, Clone, PartialEq)]
pub struct LocationInfo {
    /// Geographic coordinates.
    pub coords: GeoCoordinate,
    /// City name (if available).
    pub city: Option<String>,
    /// Region/Province name (if available).
    pub region: Option<String>,
    /// Country name (if available).
    pub country: Option<String>,
}

impl LocationInfo {
    /// Location known only by its coordinates.
    pub fn from_coords(coords: GeoCoordinate) -> Self {
        Self { coords, city: None, region: None, country: None }
    }

    /// Returns formatted location string (e.g., "Toronto, Ontario, Canada").
    pub fn display_name(&self) -> String {
        let parts: Vec<&str> = [
            self.city.as_deref(),
            self.region.as_deref(),
            self.country.as_deref(),
        ]
        .into_iter()
        .flatten()
        .collect();

        if parts.is_empty() {
            format!("{:.4}°, {:.4}°", self.coords.lat, self.coords.lng)
        } else {
            parts.join(", ")
        }
    }
}

/// Something that can tell where the user is.
pub trait GeolocationProvider {
    fn locate(&self) -> impl Future<Output = Result<LocationInfo, MiqatError>> + Send;
}

// =============================================================================
// Fixed location (device position, query parameters, CLI flags)
// =============================================================================

/// A caller-supplied location.
#[derive(Debug, Clone, PartialEq)]
pub struct FixedLocation(pub LocationInfo);

impl FixedLocation {
    pub fn new(coords: GeoCoordinate) -> Self {
        Self(LocationInfo::from_coords(coords))
    }

    /// Validates raw latitude/longitude first.
    pub fn from_lat_lng(lat: f64, lng: f64) -> Result<Self, MiqatError> {
        GeoCoordinate::new(lat, lng).map(Self::new)
    }
}

impl GeolocationProvider for FixedLocation {
    fn locate(&self) -> impl Future<Output = Result<LocationInfo, MiqatError>> + Send {
        std::future::ready(Ok(self.0.clone()))
    }
}

/// An absent provider always fails, so `Fallback` moves on to the next one.
impl<P: GeolocationProvider + Sync> GeolocationProvider for Option<P> {
    fn locate(&self) -> impl Future<Output = Result<LocationInfo, MiqatError>> + Send {
        async move {
            match self {
                Some(provider) => provider.locate().await,
                None => Err(MiqatError::unavailable("no location provided")),
            }
        }
    }
}

// =============================================================================
// ipapi.co lookup
// =============================================================================

/// IP-based geolocation using the ipapi.co JSON endpoint.
#[derive(Debug, Clone)]
pub struct IpApiProvider {
    client: reqwest::Client,
    endpoint: String,
}

/// ipapi.co response structure.
#[derive(Debug, Deserialize)]
struct IpApiResponse {
    #[serde(default)]
    error: bool,
    reason: Option<String>,
    latitude: Option<f64>,
    longitude: Option<f64>,
    city: Option<String>,
    region: Option<String>,
    country_name: Option<String>,
}

impl IpApiProvider {
    pub const DEFAULT_ENDPOINT: &'static str = "https://ipapi.co/json/";

    /// Creates a provider for the public ipapi.co endpoint.
    pub fn new() -> Result<Self, MiqatError> {
        let client = reqwest::Client::builder()
            .user_agent(concat!("miqat/", env!("CARGO_PKG_VERSION"), " (prayer times library)"))
            .build()
            .map_err(|e| MiqatError::NetworkError(format!("Failed to create HTTP client: {}", e)))?;
        Ok(Self { client, endpoint: Self::DEFAULT_ENDPOINT.to_string() })
    }

    /// Points the provider at another endpoint returning the same JSON shape.
    pub fn with_endpoint(mut self, endpoint: impl Into<String>) -> Self {
        self.endpoint = endpoint.into();
        self
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    async fn lookup(&self) -> Result<LocationInfo, MiqatError> {
        debug!("looking up location via {}", self.endpoint);

        let response = self
            .client
            .get(&self.endpoint)
            .send()
            .await
            .map_err(|e| MiqatError::NetworkError(format!("ipapi request failed: {}", e)))?;

        let status = response.status();
        if !status.is_success() {
            return Err(MiqatError::unavailable(format!("ipapi responded with {}", status)));
        }

        let data: IpApiResponse = response
            .json()
            .await
            .map_err(|e| MiqatError::NetworkError(format!("Failed to parse ipapi response: {}", e)))?;

        if data.error {
            return Err(MiqatError::unavailable(
                data.reason.unwrap_or_else(|| "ipapi returned an error".to_string()),
            ));
        }

        let (lat, lng) = match (data.latitude, data.longitude) {
            (Some(lat), Some(lng)) => (lat, lng),
            _ => return Err(MiqatError::unavailable("ipapi response has no coordinates")),
        };

        Ok(LocationInfo {
            coords: GeoCoordinate::new(lat, lng)?,
            city: data.city,
            region: data.region,
            country: data.country_name,
        })
    }
}

impl GeolocationProvider for IpApiProvider {
    fn locate(&self) -> impl Future<Output = Result<LocationInfo, MiqatError>> + Send {
        self.lookup()
    }
}

// =============================================================================
// Fallback composition
// =============================================================================

/// Tries `primary`, then `fallback` if the primary could not locate.
#[derive(Debug, Clone)]
pub struct Fallback<P, F> {
    primary: P,
    fallback: F,
}

impl<P, F> Fallback<P, F> {
    pub fn new(primary: P, fallback: F) -> Self {
        Self { primary, fallback }
    }
}

impl<P, F> GeolocationProvider for Fallback<P, F>
where
    P: GeolocationProvider + Sync,
    F: GeolocationProvider + Sync,
{
    fn locate(&self) -> impl Future<Output = Result<LocationInfo, MiqatError>> + Send {
        async move {
            match self.primary.locate().await {
                Err(e) if e.is_geolocation_failure() => {
                    warn!("primary geolocation failed, falling back: {}", e);
                    self.fallback.locate().await
                }
                result => result,
            }
        }
    }
}
