mod dynamics;
mod error;
mod integrator;
mod state;

pub use dynamics::{two_body, EquationsOfMotion, TwoBody, MIN_RADIUS_M};
pub use error::{PropagationError, SingularityError};
pub use integrator::{IntegrationStep, Rk4, Rk4Propagation, DEFAULT_MAX_STEPS};
pub use state::{shift_epoch, StateVector};
