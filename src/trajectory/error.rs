use thiserror::Error;

use crate::earth::FrameTransformError;
use crate::orbit::{ConversionError, InvalidOrbitError};
use crate::propagation::PropagationError;
use crate::ConvergenceError;

#[derive(Debug, Clone, PartialEq, Error)]
pub enum TrajectoryError {
    #[error("invalid orbit: {0}")]
    InvalidOrbit(#[from] InvalidOrbitError),
    #[error("propagation error: {0}")]
    Propagation(#[from] PropagationError),
    #[error("frame transform error: {0}")]
    FrameTransform(#[from] FrameTransformError),
    #[error(transparent)]
    Convergence(#[from] ConvergenceError),
    #[error("invalid propagation settings: {0}")]
    InvalidSettings(String),
}

impl From<ConversionError> for TrajectoryError {
    fn from(err: ConversionError) -> Self {
        match err {
            ConversionError::InvalidOrbit(e) => TrajectoryError::InvalidOrbit(e),
            ConversionError::Convergence(e) => TrajectoryError::Convergence(e),
        }
    }
}
