use thiserror::Error;

#[derive(Debug, Clone, Copy, PartialEq, Error)]
#[error("position radius {radius_m} m is singular for point-mass gravity")]
pub struct SingularityError {
    pub radius_m: f64,
}

#[derive(Debug, Clone, PartialEq, Error)]
pub enum PropagationError {
    #[error("singular state {elapsed_s} s after epoch: |r| = {radius_m} m")]
    Singularity { elapsed_s: f64, radius_m: f64 },
    #[error("integration step must be positive and finite, got {0} s")]
    InvalidStep(f64),
    #[error("propagation duration must be non-negative and finite, got {0} s")]
    InvalidDuration(f64),
    #[error("propagation needs {required} steps, limit is {limit}")]
    TooManySteps { required: f64, limit: usize },
}
