//! Calculation parameters.

use serde::{Deserialize, Serialize};

use crate::MiqatError;

/// Solar elevation angles (degrees) at which the angle-based prayers begin.
///
/// Defaults are Fajr and Isha at -18° (astronomical twilight) and Maghrib
/// at 0° (geometric sunset).
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CalculationParams {
    /// Sun elevation for Fajr. Default: -18.0
    pub fajr_angle: f64,
    /// Sun elevation for Isha. Default: -18.0
    pub isha_angle: f64,
    /// Sun elevation for Maghrib. Default: 0.0
    pub maghrib_angle: f64,
}

impl Default for CalculationParams {
    fn default() -> Self {
        Self { fajr_angle: -18.0, isha_angle: -18.0, maghrib_angle: 0.0 }
    }
}

impl CalculationParams {
    pub fn new() -> Self { Self::default() }

    /// Starts a validating builder.
    pub fn builder() -> CalculationParamsBuilder { CalculationParamsBuilder::default() }
}

/// Builder with validation for `CalculationParams`.
#[derive(Debug, Default)]
pub struct CalculationParamsBuilder {
    fajr_angle: Option<f64>,
    isha_angle: Option<f64>,
    maghrib_angle: Option<f64>,
}

impl CalculationParamsBuilder {
    pub fn fajr_angle(mut self, angle: f64) -> Self { self.fajr_angle = Some(angle); self }
    pub fn isha_angle(mut self, angle: f64) -> Self { self.isha_angle = Some(angle); self }
    pub fn maghrib_angle(mut self, angle: f64) -> Self { self.maghrib_angle = Some(angle); self }

    /// Builds and validates.
    pub fn build(self) -> Result<CalculationParams, MiqatError> {
        let defaults = CalculationParams::default();
        let params = CalculationParams {
            fajr_angle: self.fajr_angle.unwrap_or(defaults.fajr_angle),
            isha_angle: self.isha_angle.unwrap_or(defaults.isha_angle),
            maghrib_angle: self.maghrib_angle.unwrap_or(defaults.maghrib_angle),
        };

        for (name, angle) in [
            ("fajr", params.fajr_angle),
            ("isha", params.isha_angle),
            ("maghrib", params.maghrib_angle),
        ] {
            if !angle.is_finite() || !(-90.0..=90.0).contains(&angle) {
                return Err(MiqatError::invalid_config(format!(
                    "{} angle {} outside [-90, 90]",
                    name, angle
                )));
            }
        }

        // Twilight prayers happen while the sun is further below the horizon than at sunset.
        if params.fajr_angle > params.maghrib_angle || params.isha_angle > params.maghrib_angle {
            return Err(MiqatError::invalid_config(format!(
                "twilight angles (fajr {}, isha {}) must not be above the maghrib angle {}",
                params.fajr_angle, params.isha_angle, params.maghrib_angle
            )));
        }

        Ok(params)
    }
}
