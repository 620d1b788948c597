use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::f64::consts::TAU;
use strum_macros::{Display, EnumString};

use crate::earth::InertialFrame;
use crate::orbit::anomaly::to_true_anomaly;
use crate::orbit::InvalidOrbitError;
use crate::ConvergenceError;

/// WGS84 gravitational parameter of the Earth (m^3/s^2).
pub const EARTH_MU: f64 = 3.986_004_418e14;

/// Which anomaly `OrbitalElements::anomaly` holds.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize, Display, EnumString,
)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum AnomalyType {
    True,
    #[default]
    Mean,
    Eccentric,
}

/// Keplerian elements of an elliptical orbit at an epoch.
///
/// Distances are in metres and angles in radians.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct OrbitalElements {
    pub semi_major_axis: f64,
    pub eccentricity: f64,
    pub inclination: f64,
    pub argument_of_perigee: f64,
    /// Right ascension of the ascending node.
    pub right_ascension: f64,
    pub anomaly: f64,
    pub anomaly_type: AnomalyType,
    pub epoch: DateTime<Utc>,
    pub frame: InertialFrame,
    /// Gravitational parameter of the central body (m^3/s^2).
    pub mu: f64,
}

impl OrbitalElements {
    /// Rejects elements that do not describe a bound elliptical orbit.
    pub fn validate(&self) -> Result<(), InvalidOrbitError> {
        if !self.semi_major_axis.is_finite() || self.semi_major_axis <= 0.0 {
            return Err(InvalidOrbitError::SemiMajorAxis(self.semi_major_axis));
        }
        // NaN falls outside the range as well
        if !(0.0..1.0).contains(&self.eccentricity) {
            return Err(InvalidOrbitError::Eccentricity(self.eccentricity));
        }

        let angles = [
            ("inclination", self.inclination),
            ("argument of perigee", self.argument_of_perigee),
            ("right ascension", self.right_ascension),
            ("anomaly", self.anomaly),
        ];
        for (name, value) in angles {
            if !value.is_finite() {
                return Err(InvalidOrbitError::NonFinite { name, value });
            }
        }

        if !self.mu.is_finite() || self.mu <= 0.0 {
            return Err(InvalidOrbitError::GravitationalParameter(self.mu));
        }

        Ok(())
    }

    /// Keplerian period in seconds.
    pub fn period(&self) -> f64 {
        TAU / self.mean_motion()
    }

    /// Mean motion in rad/s.
    pub fn mean_motion(&self) -> f64 {
        (self.mu / self.semi_major_axis.powi(3)).sqrt()
    }

    pub fn semi_latus_rectum(&self) -> f64 {
        self.semi_major_axis * (1.0 - self.eccentricity * self.eccentricity)
    }

    pub fn perigee_radius(&self) -> f64 {
        self.semi_major_axis * (1.0 - self.eccentricity)
    }

    pub fn apogee_radius(&self) -> f64 {
        self.semi_major_axis * (1.0 + self.eccentricity)
    }

    /// Two-body specific orbital energy (J/kg).
    pub fn specific_energy(&self) -> f64 {
        -self.mu / (2.0 * self.semi_major_axis)
    }

    /// The anomaly at epoch expressed as a true anomaly.
    pub fn true_anomaly(&self) -> Result<f64, ConvergenceError> {
        to_true_anomaly(self.anomaly, self.anomaly_type, self.eccentricity)
    }
}
