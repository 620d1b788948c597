mod anomaly;
mod conversion;
mod elements;
mod error;
mod tle;

pub use anomaly::{
    eccentric_to_mean, eccentric_to_true, mean_to_eccentric, to_true_anomaly, true_to_eccentric,
    true_to_mean,
};
pub use conversion::to_state_vector;
pub use elements::{AnomalyType, OrbitalElements, EARTH_MU};
pub use error::{ConversionError, InvalidOrbitError};
pub use tle::{parse_tle_lines, TleError, TleLines};
