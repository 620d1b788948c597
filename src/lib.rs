//! Ground-track computation for a body on a two-body orbit.
//!
//! Orbital elements are converted to an inertial state vector, integrated
//! with a fixed-step RK4 scheme over one orbital period, and every sampled
//! state is rotated into the Earth-fixed frame and converted to geodetic
//! latitude, longitude and altitude.
//!
//! ```no_run
//! use chrono::{TimeZone, Utc};
//! use groundtrack::earth::{EarthModel, InertialFrame};
//! use groundtrack::orbit::{AnomalyType, OrbitalElements, EARTH_MU};
//! use groundtrack::trajectory::{build_trajectory, PropagationSettings};
//!
//! let elements = OrbitalElements {
//!     semi_major_axis: 6_793_000.0,
//!     eccentricity: 0.000_593_1,
//!     inclination: 51.64_f64.to_radians(),
//!     argument_of_perigee: 28.96_f64.to_radians(),
//!     right_ascension: 57.34_f64.to_radians(),
//!     anomaly: 122.70_f64.to_radians(),
//!     anomaly_type: AnomalyType::Mean,
//!     epoch: Utc.with_ymd_and_hms(2024, 3, 1, 0, 0, 0).unwrap(),
//!     frame: InertialFrame::Gcrf,
//!     mu: EARTH_MU,
//! };
//! let trajectory = build_trajectory(
//!     &elements,
//!     &EarthModel::wgs84(),
//!     &PropagationSettings::default(),
//! )?;
//! println!("{} samples", trajectory.len());
//! # Ok::<(), groundtrack::trajectory::TrajectoryError>(())
//! ```

pub mod earth;
mod error;
pub mod orbit;
pub mod propagation;
pub mod trajectory;

pub use error::ConvergenceError;
