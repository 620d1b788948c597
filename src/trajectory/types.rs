use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::earth::GeodeticCoordinates;

/// One ground-track sample. Angles in radians, altitude in metres.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct GeodeticPoint {
    pub time: DateTime<Utc>,
    pub latitude: f64,
    pub longitude: f64,
    pub altitude: f64,
}

impl GeodeticPoint {
    pub fn new(time: DateTime<Utc>, coordinates: GeodeticCoordinates) -> Self {
        Self {
            time,
            latitude: coordinates.latitude,
            longitude: coordinates.longitude,
            altitude: coordinates.altitude,
        }
    }

    pub fn latitude_deg(&self) -> f64 {
        self.latitude.to_degrees()
    }

    pub fn longitude_deg(&self) -> f64 {
        self.longitude.to_degrees()
    }
}

/// Ground track over one orbital period, oldest sample first.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Trajectory {
    epoch: DateTime<Utc>,
    period_s: f64,
    output_interval_s: f64,
    points: Vec<GeodeticPoint>,
}

impl Trajectory {
    pub(crate) fn new(
        epoch: DateTime<Utc>,
        period_s: f64,
        output_interval_s: f64,
        points: Vec<GeodeticPoint>,
    ) -> Self {
        Self {
            epoch,
            period_s,
            output_interval_s,
            points,
        }
    }

    pub fn epoch(&self) -> DateTime<Utc> {
        self.epoch
    }

    /// Keplerian period the trajectory spans, in seconds.
    pub fn period(&self) -> f64 {
        self.period_s
    }

    pub fn output_interval(&self) -> f64 {
        self.output_interval_s
    }

    pub fn points(&self) -> &[GeodeticPoint] {
        &self.points
    }

    pub fn iter(&self) -> std::slice::Iter<'_, GeodeticPoint> {
        self.points.iter()
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    pub fn first(&self) -> Option<&GeodeticPoint> {
        self.points.first()
    }

    pub fn last(&self) -> Option<&GeodeticPoint> {
        self.points.last()
    }

    /// Seconds between the first and last sample.
    pub fn span(&self) -> f64 {
        match (self.points.first(), self.points.last()) {
            (Some(first), Some(last)) => {
                let delta = last.time - first.time;
                delta.num_seconds() as f64 + f64::from(delta.subsec_nanos()) * 1e-9
            }
            _ => 0.0,
        }
    }
}

impl<'a> IntoIterator for &'a Trajectory {
    type Item = &'a GeodeticPoint;
    type IntoIter = std::slice::Iter<'a, GeodeticPoint>;

    fn into_iter(self) -> Self::IntoIter {
        self.points.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, TimeZone};

    fn point(time: DateTime<Utc>) -> GeodeticPoint {
        GeodeticPoint {
            time,
            latitude: 0.5,
            longitude: -1.0,
            altitude: 400e3,
        }
    }

    #[test]
    fn span_covers_first_to_last() {
        let epoch = Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap();
        let points = vec![
            point(epoch),
            point(epoch + Duration::seconds(10)),
            point(epoch + Duration::milliseconds(15_500)),
        ];
        let trajectory = Trajectory::new(epoch, 15.5, 10.0, points);

        assert_eq!(trajectory.len(), 3);
        assert_eq!(trajectory.span(), 15.5);
        assert_eq!(trajectory.first().unwrap().time, epoch);
        assert_eq!((&trajectory).into_iter().count(), 3);
    }

    #[test]
    fn empty_trajectory_has_no_span() {
        let epoch = Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap();
        let trajectory = Trajectory::new(epoch, 0.0, 10.0, Vec::new());
        assert!(trajectory.is_empty());
        assert_eq!(trajectory.span(), 0.0);
    }

    #[test]
    fn degree_accessors() {
        let epoch = Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap();
        let p = point(epoch);
        assert!((p.latitude_deg() - 28.647_889_756).abs() < 1e-6);
        assert!((p.longitude_deg() + 57.295_779_513).abs() < 1e-6);
    }
}
