mod error;
mod frames;
mod geodetic;
mod model;

pub use error::{EarthModelError, FrameTransformError};
pub use frames::{earth_rotation_angle, greenwich_mean_sidereal_time, j2000, InertialFrame};
pub use geodetic::{ecef_to_geodetic, geodetic_to_ecef, GeodeticCoordinates};
pub use model::{EarthModel, WGS84_EQUATORIAL_RADIUS_M, WGS84_FLATTENING};
