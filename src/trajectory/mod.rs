mod builder;
mod error;
mod sampler;
mod types;

pub use builder::{build_trajectory, PropagationSettings};
pub use error::TrajectoryError;
pub use sampler::TrajectorySampler;
pub use types::{GeodeticPoint, Trajectory};
