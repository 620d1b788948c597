use nalgebra::Vector3;
use serde::Serialize;
use std::f64::consts::{PI, TAU};

use crate::earth::EarthModel;
use crate::ConvergenceError;

const LATITUDE_TOLERANCE_RAD: f64 = 1e-12;
const LATITUDE_MAX_ITERATIONS: usize = 20;

/// Latitude and longitude in radians, altitude in metres above the ellipsoid.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct GeodeticCoordinates {
    pub latitude: f64,
    pub longitude: f64,
    pub altitude: f64,
}

/// Earth-fixed Cartesian position to geodetic coordinates.
///
/// Latitude is the root of `p sin(lat) - z cos(lat) - e^2 N sin(lat) cos(lat)`,
/// the fixed point of `tan(lat) = (z + e^2 N sin(lat)) / p`. Newton's method
/// from the geocentric latitude converges quadratically, including for
/// positions well inside the ellipsoid. Longitude is in `(-pi, pi]`.
pub fn ecef_to_geodetic(
    earth: &EarthModel,
    position: &Vector3<f64>,
) -> Result<GeodeticCoordinates, ConvergenceError> {
    let a = earth.equatorial_radius();
    let e2 = earth.eccentricity_squared();
    let p = position.x.hypot(position.y);
    let z = position.z;

    let longitude = normalize_longitude(position.y.atan2(position.x));

    let mut latitude = z.atan2(p);
    let mut converged = false;
    let mut delta = f64::NAN;
    for _ in 0..LATITUDE_MAX_ITERATIONS {
        let (sin_lat, cos_lat) = latitude.sin_cos();
        let w2 = 1.0 - e2 * sin_lat * sin_lat;
        let n = a / w2.sqrt();
        let f = p * sin_lat - z * cos_lat - e2 * n * sin_lat * cos_lat;
        let df = p * cos_lat + z * sin_lat
            - e2 * n
                * (cos_lat * cos_lat - sin_lat * sin_lat
                    + e2 * sin_lat * sin_lat * cos_lat * cos_lat / w2);
        delta = f / df;
        latitude -= delta;
        if delta.abs() < LATITUDE_TOLERANCE_RAD {
            converged = true;
            break;
        }
    }
    if !converged {
        return Err(ConvergenceError {
            what: "geodetic latitude",
            iterations: LATITUDE_MAX_ITERATIONS,
            residual: delta.abs(),
        });
    }

    let (sin_lat, cos_lat) = latitude.sin_cos();
    let altitude = p * cos_lat + z * sin_lat - a * (1.0 - e2 * sin_lat * sin_lat).sqrt();

    Ok(GeodeticCoordinates {
        latitude,
        longitude,
        altitude,
    })
}

/// `atan2` yields `-pi` on the negative x axis; that meridian is reported as `pi`.
fn normalize_longitude(longitude: f64) -> f64 {
    if longitude <= -PI {
        longitude + TAU
    } else {
        longitude
    }
}

/// Geodetic coordinates to an Earth-fixed Cartesian position.
pub fn geodetic_to_ecef(earth: &EarthModel, coordinates: &GeodeticCoordinates) -> Vector3<f64> {
    let a = earth.equatorial_radius();
    let e2 = earth.eccentricity_squared();
    let (sin_lat, cos_lat) = coordinates.latitude.sin_cos();
    let (sin_lon, cos_lon) = coordinates.longitude.sin_cos();
    let n = a / (1.0 - e2 * sin_lat * sin_lat).sqrt();
    let h = coordinates.altitude;

    Vector3::new(
        (n + h) * cos_lat * cos_lon,
        (n + h) * cos_lat * sin_lon,
        (n * (1.0 - e2) + h) * sin_lat,
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;
    use std::f64::consts::FRAC_PI_2;

    fn coords(lat_deg: f64, lon_deg: f64, altitude: f64) -> GeodeticCoordinates {
        GeodeticCoordinates {
            latitude: lat_deg.to_radians(),
            longitude: lon_deg.to_radians(),
            altitude,
        }
    }

    #[test]
    fn equator_and_pole() {
        let earth = EarthModel::wgs84();

        let equator = ecef_to_geodetic(&earth, &Vector3::new(6_378_137.0 + 400e3, 0.0, 0.0)).unwrap();
        assert_abs_diff_eq!(equator.latitude, 0.0, epsilon = 1e-15);
        assert_abs_diff_eq!(equator.longitude, 0.0, epsilon = 1e-15);
        assert_abs_diff_eq!(equator.altitude, 400e3, epsilon = 1e-6);

        let pole = ecef_to_geodetic(&earth, &Vector3::new(0.0, 0.0, earth.polar_radius() + 1e3)).unwrap();
        assert_abs_diff_eq!(pole.latitude, FRAC_PI_2, epsilon = 1e-12);
        assert_abs_diff_eq!(pole.altitude, 1e3, epsilon = 1e-6);
    }

    #[test]
    fn longitude_comes_from_atan2() {
        let earth = EarthModel::wgs84();
        let west = ecef_to_geodetic(&earth, &Vector3::new(0.0, -7.0e6, 0.0)).unwrap();
        assert_abs_diff_eq!(west.longitude, -FRAC_PI_2, epsilon = 1e-15);
    }

    #[test]
    fn inverts_forward_transform() {
        let earth = EarthModel::wgs84();
        let cases = [
            coords(45.0, 7.5, 0.0),
            coords(-33.9, 151.2, 58.0),
            coords(51.64, -120.0, 420e3),
            coords(-89.5, 10.0, 800e3),
            coords(12.3, 179.9, 35_786e3),
        ];

        for expected in cases {
            let ecef = geodetic_to_ecef(&earth, &expected);
            let actual = ecef_to_geodetic(&earth, &ecef).unwrap();
            assert_abs_diff_eq!(actual.latitude, expected.latitude, epsilon = 1e-11);
            assert_abs_diff_eq!(actual.longitude, expected.longitude, epsilon = 1e-12);
            assert_abs_diff_eq!(actual.altitude, expected.altitude, epsilon = 1e-4);
        }
    }

    #[test]
    fn negative_x_axis_is_the_positive_antimeridian() {
        let earth = EarthModel::wgs84();
        let point = ecef_to_geodetic(&earth, &Vector3::new(-7.0e6, -0.0, 0.0)).unwrap();
        assert_eq!(point.longitude, PI);
    }

    #[test]
    fn deep_interior_positions_converge() {
        let earth = EarthModel::wgs84();
        let cases = [
            coords(30.0, 0.0, -6_000e3),
            coords(-60.0, 45.0, -6_200e3),
            coords(5.0, -170.0, -6_300e3),
        ];
        for expected in cases {
            let ecef = geodetic_to_ecef(&earth, &expected);
            assert!(ecef.norm() < 500e3, "radius {}", ecef.norm());
            let actual = ecef_to_geodetic(&earth, &ecef).unwrap();
            assert_abs_diff_eq!(actual.latitude, expected.latitude, epsilon = 1e-10);
            assert_abs_diff_eq!(actual.longitude, expected.longitude, epsilon = 1e-12);
            assert_abs_diff_eq!(actual.altitude, expected.altitude, epsilon = 1e-3);
        }

        // a few hundred km from the centre, off any axis
        let point = ecef_to_geodetic(&earth, &Vector3::new(300e3, 0.0, 100e3)).unwrap();
        assert_abs_diff_eq!(point.latitude, 0.367_008_197, epsilon = 1e-8);
        assert_abs_diff_eq!(point.altitude, -6_059_483.674, epsilon = 1e-2);
    }

    #[test]
    fn geodetic_latitude_exceeds_geocentric() {
        let earth = EarthModel::wgs84();
        let geocentric = 45_f64.to_radians();
        let r = 6_371_000.0;
        let position = Vector3::new(r * geocentric.cos(), 0.0, r * geocentric.sin());
        let point = ecef_to_geodetic(&earth, &position).unwrap();

        let difference = (point.latitude - geocentric).to_degrees();
        assert!((0.18..0.20).contains(&difference), "difference = {difference}");
    }

    #[test]
    fn sphere_gives_radial_altitude() {
        let earth = EarthModel::new(6_371_000.0, 0.0).unwrap();
        let position = Vector3::new(3.0e6, 4.0e6, 5.0e6);
        let point = ecef_to_geodetic(&earth, &position).unwrap();
        assert_abs_diff_eq!(point.altitude, position.norm() - 6_371_000.0, epsilon = 1e-6);
    }

    #[test]
    fn known_station_position() {
        // Paris, 48.8566 N 2.3522 E
        let earth = EarthModel::wgs84();
        let ecef = geodetic_to_ecef(&earth, &coords(48.8566, 2.3522, 35.0));
        assert_abs_diff_eq!(ecef.x / 1e3, 4_200.94, epsilon = 0.01);
        assert_abs_diff_eq!(ecef.y / 1e3, 172.56, epsilon = 0.01);
        assert_abs_diff_eq!(ecef.z / 1e3, 4_780.11, epsilon = 0.01);
    }
}
