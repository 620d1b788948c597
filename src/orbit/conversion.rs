use nalgebra::{Rotation3, Vector3};

use crate::orbit::{ConversionError, OrbitalElements};
use crate::propagation::StateVector;

/// Inertial position and velocity of the orbiting body at the elements' epoch.
pub fn to_state_vector(elements: &OrbitalElements) -> Result<StateVector, ConversionError> {
    elements.validate()?;

    let e = elements.eccentricity;
    let nu = elements.true_anomaly()?;
    let p = elements.semi_latus_rectum();
    let (sin_nu, cos_nu) = nu.sin_cos();

    let radius = p / (1.0 + e * cos_nu);
    let position_pf = Vector3::new(radius * cos_nu, radius * sin_nu, 0.0);
    let speed_scale = (elements.mu / p).sqrt();
    let velocity_pf = Vector3::new(-speed_scale * sin_nu, speed_scale * (e + cos_nu), 0.0);

    let rotation = perifocal_to_inertial(
        elements.right_ascension,
        elements.inclination,
        elements.argument_of_perigee,
    );

    Ok(StateVector::new(
        elements.epoch,
        rotation * position_pf,
        rotation * velocity_pf,
    ))
}

/// `Rz(raan) * Rx(i) * Rz(argp)`
fn perifocal_to_inertial(raan: f64, inclination: f64, argp: f64) -> Rotation3<f64> {
    Rotation3::from_axis_angle(&Vector3::z_axis(), raan)
        * Rotation3::from_axis_angle(&Vector3::x_axis(), inclination)
        * Rotation3::from_axis_angle(&Vector3::z_axis(), argp)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::orbit::elements::tests::iss_like;
    use crate::orbit::{AnomalyType, InvalidOrbitError};
    use approx::{assert_abs_diff_eq, assert_relative_eq};
    use std::f64::consts::FRAC_PI_2;

    #[test]
    fn equatorial_circular_orbit_starts_on_x_axis() {
        let mut elements = iss_like();
        elements.eccentricity = 0.0;
        elements.inclination = 0.0;
        elements.right_ascension = 0.0;
        elements.argument_of_perigee = 0.0;
        elements.anomaly = 0.0;

        let state = to_state_vector(&elements).unwrap();
        let speed = (elements.mu / elements.semi_major_axis).sqrt();

        assert_eq!(state.time, elements.epoch);
        assert_abs_diff_eq!(state.position.x, elements.semi_major_axis, epsilon = 1e-6);
        assert_abs_diff_eq!(state.position.y, 0.0, epsilon = 1e-6);
        assert_abs_diff_eq!(state.velocity.y, speed, epsilon = 1e-9);
        assert_abs_diff_eq!(state.velocity.z, 0.0, epsilon = 1e-9);
    }

    #[test]
    fn polar_orbit_at_ascending_node_moves_north() {
        let mut elements = iss_like();
        elements.eccentricity = 0.0;
        elements.inclination = FRAC_PI_2;
        elements.right_ascension = FRAC_PI_2;
        elements.argument_of_perigee = 0.0;
        elements.anomaly = 0.0;

        let state = to_state_vector(&elements).unwrap();

        // node on +y, velocity along +z
        assert_abs_diff_eq!(state.position.y, elements.semi_major_axis, epsilon = 1e-6);
        assert_abs_diff_eq!(state.velocity.x, 0.0, epsilon = 1e-9);
        assert!(state.velocity.z > 7_000.0);
    }

    #[test]
    fn perigee_state_matches_vis_viva() {
        let mut elements = iss_like();
        elements.eccentricity = 0.3;
        elements.anomaly = 0.0;
        elements.anomaly_type = AnomalyType::True;

        let state = to_state_vector(&elements).unwrap();
        let a = elements.semi_major_axis;
        let rp = a * 0.7;

        assert_relative_eq!(state.position.norm(), rp, max_relative = 1e-12);
        assert_relative_eq!(
            state.velocity.norm(),
            (elements.mu * (2.0 / rp - 1.0 / a)).sqrt(),
            max_relative = 1e-12
        );
        // flight path angle is zero at perigee
        assert_abs_diff_eq!(
            state.position.normalize().dot(&state.velocity.normalize()),
            0.0,
            epsilon = 1e-12
        );
    }

    #[test]
    fn energy_and_angular_momentum_match_elements() {
        let mut elements = iss_like();
        elements.eccentricity = 0.2;
        let state = to_state_vector(&elements).unwrap();

        assert_relative_eq!(
            state.specific_energy(elements.mu),
            elements.specific_energy(),
            max_relative = 1e-12
        );

        let h = state.position.cross(&state.velocity);
        assert_relative_eq!(
            h.norm(),
            (elements.mu * elements.semi_latus_rectum()).sqrt(),
            max_relative = 1e-12
        );
        assert_abs_diff_eq!(
            (h.z / h.norm()).acos(),
            elements.inclination,
            epsilon = 1e-12
        );
    }

    #[test]
    fn anomaly_types_agree_on_the_same_point() {
        let mut elements = iss_like();
        elements.eccentricity = 0.4;
        elements.anomaly_type = AnomalyType::Mean;
        let from_mean = to_state_vector(&elements).unwrap();

        let nu = elements.true_anomaly().unwrap();
        elements.anomaly = nu;
        elements.anomaly_type = AnomalyType::True;
        let from_true = to_state_vector(&elements).unwrap();

        assert_abs_diff_eq!(
            (from_mean.position - from_true.position).norm(),
            0.0,
            epsilon = 1e-6
        );
    }

    #[test]
    fn invalid_elements_are_rejected() {
        let mut elements = iss_like();
        elements.eccentricity = 1.2;
        assert_eq!(
            to_state_vector(&elements),
            Err(ConversionError::InvalidOrbit(
                InvalidOrbitError::Eccentricity(1.2)
            ))
        );
    }
}
