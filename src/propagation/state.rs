use chrono::{DateTime, Duration, Utc};
use nalgebra::Vector3;
use serde::Serialize;

/// Inertial position (m) and velocity (m/s) at a point in time.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct StateVector {
    pub time: DateTime<Utc>,
    pub position: Vector3<f64>,
    pub velocity: Vector3<f64>,
}

impl StateVector {
    pub fn new(time: DateTime<Utc>, position: Vector3<f64>, velocity: Vector3<f64>) -> Self {
        Self {
            time,
            position,
            velocity,
        }
    }

    pub fn radius(&self) -> f64 {
        self.position.norm()
    }

    /// `|v|^2 / 2 - mu / |r|`
    pub fn specific_energy(&self, mu: f64) -> f64 {
        self.velocity.norm_squared() / 2.0 - mu / self.radius()
    }
}

/// `epoch` shifted by a (possibly fractional) number of seconds, at nanosecond resolution.
pub fn shift_epoch(epoch: DateTime<Utc>, seconds: f64) -> DateTime<Utc> {
    epoch + Duration::nanoseconds((seconds * 1e9).round() as i64)
}
