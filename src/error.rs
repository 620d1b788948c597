use thiserror::Error;

/// An iterative solver ran out of iterations before meeting its tolerance.
#[derive(Debug, Clone, PartialEq, Error)]
#[error("{what} did not converge after {iterations} iterations (residual {residual:e})")]
pub struct ConvergenceError {
    pub what: &'static str,
    pub iterations: usize,
    pub residual: f64,
}
