use chrono::{DateTime, Utc};
use serde::Deserialize;
use std::path::Path;
use thiserror::Error;

use groundtrack::earth::{
    EarthModel, EarthModelError, InertialFrame, WGS84_EQUATORIAL_RADIUS_M, WGS84_FLATTENING,
};
use groundtrack::orbit::{AnomalyType, OrbitalElements, TleError, EARTH_MU};
use groundtrack::propagation::DEFAULT_MAX_STEPS;
use groundtrack::trajectory::PropagationSettings;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("YAML parse error: {0}")]
    Yaml(#[from] serde_yaml::Error),
    #[error("orbit file must contain exactly one of 'elements' or 'tle'")]
    OrbitSource,
    #[error("invalid duration '{value}': {message}")]
    Duration { value: String, message: String },
    #[error("earth model: {0}")]
    Earth(#[from] EarthModelError),
    #[error("{0}")]
    Tle(#[from] TleError),
}

/// An orbit file: the orbit plus how to propagate it.
#[derive(Debug, Clone, Deserialize)]
pub struct OrbitFile {
    pub name: Option<String>,
    pub elements: Option<ElementsConfig>,
    pub tle: Option<String>,
    #[serde(default)]
    pub propagation: PropagationConfig,
    #[serde(default)]
    pub earth: EarthConfig,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ElementsConfig {
    pub semi_major_axis_m: f64,
    pub eccentricity: f64,
    pub inclination_deg: f64,
    pub argument_of_perigee_deg: f64,
    pub right_ascension_deg: f64,
    pub anomaly_deg: f64,
    #[serde(default)]
    pub anomaly_type: AnomalyType,
    pub epoch: DateTime<Utc>,
    #[serde(default)]
    pub frame: InertialFrame,
    #[serde(default = "default_mu")]
    pub mu: f64,
}

fn default_mu() -> f64 {
    EARTH_MU
}

#[derive(Debug, Clone, Deserialize)]
pub struct PropagationConfig {
    #[serde(default = "default_step")]
    pub step: String,
    #[serde(default = "default_output_interval")]
    pub output_interval: String,
    #[serde(default = "default_max_steps")]
    pub max_steps: usize,
}

impl Default for PropagationConfig {
    fn default() -> Self {
        Self {
            step: default_step(),
            output_interval: default_output_interval(),
            max_steps: default_max_steps(),
        }
    }
}

fn default_step() -> String {
    "2s".to_string()
}

fn default_output_interval() -> String {
    "10s".to_string()
}

fn default_max_steps() -> usize {
    DEFAULT_MAX_STEPS
}

#[derive(Debug, Clone, Deserialize)]
pub struct EarthConfig {
    #[serde(default = "default_equatorial_radius")]
    pub equatorial_radius_m: f64,
    #[serde(default = "default_flattening")]
    pub flattening: f64,
}

impl Default for EarthConfig {
    fn default() -> Self {
        Self {
            equatorial_radius_m: default_equatorial_radius(),
            flattening: default_flattening(),
        }
    }
}

fn default_equatorial_radius() -> f64 {
    WGS84_EQUATORIAL_RADIUS_M
}

fn default_flattening() -> f64 {
    WGS84_FLATTENING
}

impl OrbitFile {
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path)?;
        Self::from_str(&content)
    }

    pub fn from_str(yaml: &str) -> Result<Self, ConfigError> {
        let file: OrbitFile = serde_yaml::from_str(yaml)?;
        Ok(file)
    }

    /// Elements as given, or converted from the TLE. Not yet validated.
    pub fn orbital_elements(&self) -> Result<OrbitalElements, ConfigError> {
        match (&self.elements, &self.tle) {
            (Some(elements), None) => Ok(elements.to_orbital_elements()),
            (None, Some(tle)) => Ok(OrbitalElements::from_tle(tle)?),
            _ => Err(ConfigError::OrbitSource),
        }
    }

    pub fn settings(&self) -> Result<PropagationSettings, ConfigError> {
        Ok(PropagationSettings {
            step: parse_duration(&self.propagation.step)?,
            output_interval: parse_duration(&self.propagation.output_interval)?,
            max_steps: self.propagation.max_steps,
        })
    }

    pub fn earth_model(&self) -> Result<EarthModel, ConfigError> {
        Ok(EarthModel::new(
            self.earth.equatorial_radius_m,
            self.earth.flattening,
        )?)
    }

    pub fn resolve(
        &self,
    ) -> Result<(OrbitalElements, EarthModel, PropagationSettings), ConfigError> {
        Ok((self.orbital_elements()?, self.earth_model()?, self.settings()?))
    }
}

impl ElementsConfig {
    pub fn to_orbital_elements(&self) -> OrbitalElements {
        OrbitalElements {
            semi_major_axis: self.semi_major_axis_m,
            eccentricity: self.eccentricity,
            inclination: self.inclination_deg.to_radians(),
            argument_of_perigee: self.argument_of_perigee_deg.to_radians(),
            right_ascension: self.right_ascension_deg.to_radians(),
            anomaly: self.anomaly_deg.to_radians(),
            anomaly_type: self.anomaly_type,
            epoch: self.epoch,
            frame: self.frame,
            mu: self.mu,
        }
    }
}

fn parse_duration(s: &str) -> Result<std::time::Duration, ConfigError> {
    humantime::parse_duration(s.trim()).map_err(|e| ConfigError::Duration {
        value: s.to_string(),
        message: e.to_string(),
    })
}
