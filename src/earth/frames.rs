//! Inertial frames and the Earth rotation angle used to leave them.

use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};
use std::f64::consts::TAU;
use strum_macros::{Display, EnumString};

const J2000_UNIX_SECONDS: i64 = 946_728_000;
const SECONDS_PER_DAY: f64 = 86_400.0;

// IERS 2003 Earth Rotation Angle
const ERA_AT_J2000: f64 = 0.779_057_273_264_0;
const ERA_EXCESS_PER_DAY: f64 = 0.002_737_811_911_354_48;

/// Inertial frame the orbital elements are expressed in.
///
/// Precession, nutation and polar motion are not modelled: every frame is
/// taken to share its z axis with the Earth-fixed frame, and only the angle
/// about that axis differs.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize, Display, EnumString,
)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum InertialFrame {
    /// Geocentric celestial reference frame; rotates by the Earth Rotation Angle.
    #[default]
    Gcrf,
    /// Mean equator and equinox of J2000; rotates by GMST.
    #[serde(rename = "eme2000")]
    #[strum(serialize = "eme2000")]
    Eme2000,
    /// True equator, mean equinox (SGP4 output); rotates by GMST.
    Teme,
}

impl InertialFrame {
    /// Angle from this frame's x axis to the Greenwich meridian at `time`, in radians.
    pub fn rotation_angle(&self, time: DateTime<Utc>) -> f64 {
        match self {
            InertialFrame::Gcrf => earth_rotation_angle(time),
            InertialFrame::Eme2000 | InertialFrame::Teme => greenwich_mean_sidereal_time(time),
        }
    }
}

/// 2000-01-01T12:00:00Z, with UTC standing in for UT1.
pub fn j2000() -> DateTime<Utc> {
    DateTime::<Utc>::UNIX_EPOCH + Duration::seconds(J2000_UNIX_SECONDS)
}

fn days_since_j2000(time: DateTime<Utc>) -> f64 {
    let delta = time - j2000();
    (delta.num_seconds() as f64 + f64::from(delta.subsec_nanos()) * 1e-9) / SECONDS_PER_DAY
}

/// IAU 1982 Greenwich mean sidereal time in radians.
pub fn greenwich_mean_sidereal_time(time: DateTime<Utc>) -> f64 {
    sgp4::iau_epoch_to_sidereal_time(sgp4::julian_years_since_j2000(&time.naive_utc()))
}

/// IERS 2003 Earth Rotation Angle in radians, in `[0, 2pi)`.
pub fn earth_rotation_angle(time: DateTime<Utc>) -> f64 {
    let days = days_since_j2000(time);
    // whole days contribute whole turns
    let turns = ERA_AT_J2000 + ERA_EXCESS_PER_DAY * days + days.rem_euclid(1.0);
    (TAU * turns).rem_euclid(TAU)
}
