use chrono::{DateTime, Duration, Utc};
use nalgebra::Vector3;
use serde::Serialize;

use crate::earth::{EarthModelError, FrameTransformError, InertialFrame};

pub const WGS84_EQUATORIAL_RADIUS_M: f64 = 6_378_137.0;
pub const WGS84_FLATTENING: f64 = 1.0 / 298.257_223_563;

// 1900-01-01T00:00:00Z and 2100-01-01T00:00:00Z
const SUPPORTED_START_UNIX_SECONDS: i64 = -2_208_988_800;
const SUPPORTED_END_UNIX_SECONDS: i64 = 4_102_444_800;

/// Reference ellipsoid plus the rotation taking inertial positions to the
/// Earth-fixed frame.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct EarthModel {
    equatorial_radius: f64,
    flattening: f64,
}

impl Default for EarthModel {
    fn default() -> Self {
        Self::wgs84()
    }
}

impl EarthModel {
    pub fn new(equatorial_radius: f64, flattening: f64) -> Result<Self, EarthModelError> {
        if !equatorial_radius.is_finite() || equatorial_radius <= 0.0 {
            return Err(EarthModelError::EquatorialRadius(equatorial_radius));
        }
        if !(0.0..1.0).contains(&flattening) {
            return Err(EarthModelError::Flattening(flattening));
        }
        Ok(Self {
            equatorial_radius,
            flattening,
        })
    }

    pub fn wgs84() -> Self {
        Self {
            equatorial_radius: WGS84_EQUATORIAL_RADIUS_M,
            flattening: WGS84_FLATTENING,
        }
    }

    pub fn equatorial_radius(&self) -> f64 {
        self.equatorial_radius
    }

    pub fn flattening(&self) -> f64 {
        self.flattening
    }

    pub fn polar_radius(&self) -> f64 {
        self.equatorial_radius * (1.0 - self.flattening)
    }

    /// First eccentricity squared, `f (2 - f)`.
    pub fn eccentricity_squared(&self) -> f64 {
        self.flattening * (2.0 - self.flattening)
    }

    /// Times the rotation model accepts: 1900-01-01 to 2100-01-01 UTC.
    pub fn supported_range(&self) -> (DateTime<Utc>, DateTime<Utc>) {
        (
            DateTime::<Utc>::UNIX_EPOCH + Duration::seconds(SUPPORTED_START_UNIX_SECONDS),
            DateTime::<Utc>::UNIX_EPOCH + Duration::seconds(SUPPORTED_END_UNIX_SECONDS),
        )
    }

    pub fn check_time(&self, time: DateTime<Utc>) -> Result<(), FrameTransformError> {
        let (start, end) = self.supported_range();
        if time < start || time > end {
            return Err(FrameTransformError::TimeOutOfRange { time, start, end });
        }
        Ok(())
    }

    /// Checks that the whole interval `[start, start + seconds]` is supported.
    pub fn check_span(&self, start: DateTime<Utc>, seconds: f64) -> Result<(), FrameTransformError> {
        self.check_time(start)?;
        let (_, end) = self.supported_range();
        let available = (end - start).num_seconds() as f64;
        if !seconds.is_finite() || seconds < 0.0 || seconds > available {
            return Err(FrameTransformError::SpanOutOfRange { start, seconds });
        }
        Ok(())
    }

    /// Rotates an inertial position into the Earth-fixed frame at `time`.
    pub fn inertial_to_fixed(
        &self,
        frame: InertialFrame,
        position: &Vector3<f64>,
        time: DateTime<Utc>,
    ) -> Result<Vector3<f64>, FrameTransformError> {
        self.check_time(time)?;
        if !position.iter().all(|c| c.is_finite()) {
            return Err(FrameTransformError::NonFinitePosition);
        }

        let (sin_theta, cos_theta) = frame.rotation_angle(time).sin_cos();
        Ok(Vector3::new(
            position.x * cos_theta + position.y * sin_theta,
            -position.x * sin_theta + position.y * cos_theta,
            position.z,
        ))
    }
}
