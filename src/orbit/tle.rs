use chrono::{DateTime, Utc};
use std::f64::consts::TAU;
use thiserror::Error;

use crate::earth::InertialFrame;
use crate::orbit::{AnomalyType, OrbitalElements, EARTH_MU};

const SECONDS_PER_DAY: f64 = 86_400.0;

#[derive(Debug, Error)]
pub enum TleError {
    #[error("invalid tle format")]
    InvalidFormat,
    #[error("invalid tle: {0}")]
    Tle(#[from] sgp4::TleError),
    #[error("tle mean motion must be positive, got {0} rev/day")]
    MeanMotion(f64),
}

/// The lines of one element set, borrowed from the input text.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TleLines<'a> {
    pub name: Option<&'a str>,
    pub line1: &'a str,
    pub line2: &'a str,
}

/// Splits a two- or three-line element set, ignoring blank lines and
/// surrounding whitespace. Data lines must carry their line numbers.
pub fn parse_tle_lines(tle: &str) -> Result<TleLines<'_>, TleError> {
    let mut lines = tle.lines().map(str::trim).filter(|l| !l.is_empty());
    let parsed = match (lines.next(), lines.next(), lines.next(), lines.next()) {
        (Some(line1), Some(line2), None, None) => TleLines {
            name: None,
            line1,
            line2,
        },
        (Some(name), Some(line1), Some(line2), None) => TleLines {
            name: Some(name.strip_prefix("0 ").unwrap_or(name)),
            line1,
            line2,
        },
        _ => return Err(TleError::InvalidFormat),
    };

    if !parsed.line1.starts_with("1 ") || !parsed.line2.starts_with("2 ") {
        return Err(TleError::InvalidFormat);
    }
    Ok(parsed)
}

impl OrbitalElements {
    /// Builds elements from a TLE.
    ///
    /// TLE elements are SGP4 mean elements in TEME; here they are taken as
    /// osculating Keplerian elements, and the semi-major axis is recovered
    /// from the mean motion with Kepler's third law.
    pub fn from_tle(tle: &str) -> Result<Self, TleError> {
        let lines = parse_tle_lines(tle)?;
        let elements = sgp4::Elements::from_tle(
            lines.name.map(str::to_owned),
            lines.line1.as_bytes(),
            lines.line2.as_bytes(),
        )?;

        if elements.mean_motion <= 0.0 {
            return Err(TleError::MeanMotion(elements.mean_motion));
        }
        let mean_motion_rad_s = elements.mean_motion * TAU / SECONDS_PER_DAY;
        let semi_major_axis = (EARTH_MU / (mean_motion_rad_s * mean_motion_rad_s)).cbrt();
        let epoch: DateTime<Utc> = elements.datetime.and_utc();

        log::debug!(
            "TLE {} (NORAD {}) epoch {}: a = {:.0} m",
            elements.object_name.as_deref().unwrap_or("unnamed"),
            elements.norad_id,
            epoch,
            semi_major_axis
        );

        Ok(Self {
            semi_major_axis,
            eccentricity: elements.eccentricity,
            inclination: elements.inclination.to_radians(),
            argument_of_perigee: elements.argument_of_perigee.to_radians(),
            right_ascension: elements.right_ascension.to_radians(),
            anomaly: elements.mean_anomaly.to_radians(),
            anomaly_type: AnomalyType::Mean,
            epoch,
            frame: InertialFrame::Teme,
            mu: EARTH_MU,
        })
    }
}
