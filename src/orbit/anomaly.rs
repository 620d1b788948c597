//! Conversions between true, eccentric and mean anomaly for elliptical orbits.

use std::f64::consts::{PI, TAU};

use crate::orbit::AnomalyType;
use crate::ConvergenceError;

const KEPLER_TOLERANCE: f64 = 1e-14;
const KEPLER_MAX_ITERATIONS: usize = 50;
const RESIDUAL_ULPS: f64 = 4.0;

/// Solves Kepler's equation `E - e sin E = M` for the eccentric anomaly.
///
/// Newton iteration on the mean anomaly reduced to `[-pi, pi)`; the whole
/// revolutions removed by the reduction are added back to the result.
/// Iteration stops once the step is below tolerance or the residual is at
/// round-off level, whichever comes first.
pub fn mean_to_eccentric(mean: f64, e: f64) -> Result<f64, ConvergenceError> {
    // in-range anomalies are left untouched so tiny values keep their precision
    let reduced = if (-PI..PI).contains(&mean) {
        mean
    } else {
        (mean + PI).rem_euclid(TAU) - PI
    };
    let revolutions = mean - reduced;

    let mut eccentric = if e < 0.8 { reduced } else { PI * reduced.signum() };
    let mut residual = f64::NAN;
    for _ in 0..KEPLER_MAX_ITERATIONS {
        residual = eccentric - e * eccentric.sin() - reduced;
        if residual.abs() <= RESIDUAL_ULPS * f64::EPSILON * eccentric.abs().max(reduced.abs()) {
            return Ok(eccentric + revolutions);
        }
        let delta = residual / (1.0 - e * eccentric.cos());
        eccentric -= delta;
        if delta.abs() < KEPLER_TOLERANCE {
            return Ok(eccentric + revolutions);
        }
    }

    Err(ConvergenceError {
        what: "Kepler's equation",
        iterations: KEPLER_MAX_ITERATIONS,
        residual,
    })
}

pub fn eccentric_to_mean(eccentric: f64, e: f64) -> f64 {
    eccentric - e * eccentric.sin()
}

pub fn eccentric_to_true(eccentric: f64, e: f64) -> f64 {
    let half = eccentric / 2.0;
    2.0 * ((1.0 + e).sqrt() * half.sin()).atan2((1.0 - e).sqrt() * half.cos())
}

pub fn true_to_eccentric(true_anomaly: f64, e: f64) -> f64 {
    let half = true_anomaly / 2.0;
    2.0 * ((1.0 - e).sqrt() * half.sin()).atan2((1.0 + e).sqrt() * half.cos())
}

pub fn true_to_mean(true_anomaly: f64, e: f64) -> f64 {
    eccentric_to_mean(true_to_eccentric(true_anomaly, e), e)
}

/// Expresses `anomaly`, given as `kind`, as a true anomaly.
pub fn to_true_anomaly(anomaly: f64, kind: AnomalyType, e: f64) -> Result<f64, ConvergenceError> {
    match kind {
        AnomalyType::True => Ok(anomaly),
        AnomalyType::Eccentric => Ok(eccentric_to_true(anomaly, e)),
        AnomalyType::Mean => mean_to_eccentric(anomaly, e).map(|ecc| eccentric_to_true(ecc, e)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;

    #[test]
    fn circular_orbit_anomalies_coincide() {
        for angle in [-3.0, -0.5, 0.0, 1.0, 2.5] {
            assert_abs_diff_eq!(mean_to_eccentric(angle, 0.0).unwrap(), angle, epsilon = 1e-14);
            assert_abs_diff_eq!(eccentric_to_true(angle, 0.0), angle, epsilon = 1e-14);
        }
    }

    #[test]
    fn kepler_solution_satisfies_equation() {
        for e in [0.0005931, 0.1, 0.5, 0.9, 0.99] {
            for mean in [-3.1, -1.0, 0.0, 0.3, 1.5, 3.0] {
                let eccentric = mean_to_eccentric(mean, e).unwrap();
                assert_abs_diff_eq!(eccentric - e * eccentric.sin(), mean, epsilon = 1e-12);
            }
        }
    }

    #[test]
    fn near_parabolic_orbit_with_tiny_mean_anomaly() {
        let e = 0.999_999;
        for mean in [1e-12, 1e-9, -1e-9, 1e-6] {
            let eccentric = mean_to_eccentric(mean, e).unwrap();
            assert_abs_diff_eq!(eccentric - e * eccentric.sin(), mean, epsilon = 1e-17);
            assert_eq!(eccentric.signum(), mean.signum());
        }
        assert_abs_diff_eq!(mean_to_eccentric(1e-9, e).unwrap(), 8.846_222_866e-4, epsilon = 1e-12);
    }

    #[test]
    fn kepler_solution_keeps_whole_revolutions() {
        let e = 0.3;
        let mean = 2.0 * TAU + 1.0;
        let eccentric = mean_to_eccentric(mean, e).unwrap();
        assert_abs_diff_eq!(eccentric_to_mean(eccentric, e), mean, epsilon = 1e-12);
    }

    #[test]
    fn quadrature_point_of_known_ellipse() {
        // E = 90 deg: cos(nu) = -e, r = a
        let e = 0.5;
        let nu = eccentric_to_true(PI / 2.0, e);
        assert_abs_diff_eq!(nu.cos(), -e, epsilon = 1e-14);
        assert_abs_diff_eq!(true_to_eccentric(nu, e), PI / 2.0, epsilon = 1e-14);
        assert_abs_diff_eq!(true_to_mean(nu, e), PI / 2.0 - e, epsilon = 1e-14);
    }

    #[test]
    fn apsides_are_fixed_points() {
        for kind in [AnomalyType::True, AnomalyType::Mean, AnomalyType::Eccentric] {
            assert_abs_diff_eq!(to_true_anomaly(0.0, kind, 0.7).unwrap(), 0.0, epsilon = 1e-14);
            assert_abs_diff_eq!(
                to_true_anomaly(PI, kind, 0.7).unwrap().abs(),
                PI,
                epsilon = 1e-12
            );
        }
    }
}
