use nalgebra::Vector3;

use crate::propagation::SingularityError;

/// Below this radius point-mass gravity is treated as singular.
pub const MIN_RADIUS_M: f64 = 1e-3;

/// First-order form of the equations of motion: `(r, v) -> (dr/dt, dv/dt)`.
pub trait EquationsOfMotion {
    fn derivatives(
        &self,
        position: &Vector3<f64>,
        velocity: &Vector3<f64>,
    ) -> Result<(Vector3<f64>, Vector3<f64>), SingularityError>;
}

/// Point-mass two-body dynamics, `(v, -mu r / |r|^3)`.
pub fn two_body(
    mu: f64,
    position: &Vector3<f64>,
    velocity: &Vector3<f64>,
) -> Result<(Vector3<f64>, Vector3<f64>), SingularityError> {
    let r = position.norm();
    if !r.is_finite() || r < MIN_RADIUS_M {
        return Err(SingularityError { radius_m: r });
    }
    let acceleration = position * (-mu / (r * r * r));
    Ok((*velocity, acceleration))
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TwoBody {
    pub mu: f64,
}

impl TwoBody {
    pub fn new(mu: f64) -> Self {
        Self { mu }
    }
}

impl EquationsOfMotion for TwoBody {
    fn derivatives(
        &self,
        position: &Vector3<f64>,
        velocity: &Vector3<f64>,
    ) -> Result<(Vector3<f64>, Vector3<f64>), SingularityError> {
        two_body(self.mu, position, velocity)
    }
}
