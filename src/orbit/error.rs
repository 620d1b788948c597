use thiserror::Error;

use crate::ConvergenceError;

#[derive(Debug, Clone, PartialEq, Error)]
pub enum InvalidOrbitError {
    #[error("semi-major axis must be positive and finite, got {0} m")]
    SemiMajorAxis(f64),
    #[error("eccentricity must be in [0, 1), got {0}")]
    Eccentricity(f64),
    #[error("{name} must be finite, got {value}")]
    NonFinite { name: &'static str, value: f64 },
    #[error("gravitational parameter must be positive and finite, got {0} m^3/s^2")]
    GravitationalParameter(f64),
}

#[derive(Debug, Clone, PartialEq, Error)]
pub enum ConversionError {
    #[error("invalid orbit: {0}")]
    InvalidOrbit(#[from] InvalidOrbitError),
    #[error(transparent)]
    Convergence(#[from] ConvergenceError),
}
