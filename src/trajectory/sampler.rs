use crate::earth::{ecef_to_geodetic, EarthModel, InertialFrame};
use crate::propagation::{IntegrationStep, StateVector};
use crate::trajectory::{GeodeticPoint, TrajectoryError};

/// Relative slack on the output interval, absorbing float noise in step sums.
const INTERVAL_TOLERANCE: f64 = 1e-9;

/// Thins integrator steps down to the output cadence and converts the kept
/// states to geodetic points.
pub struct TrajectorySampler<'a> {
    earth: &'a EarthModel,
    frame: InertialFrame,
    output_interval: f64,
    last_recorded: Option<f64>,
    points: Vec<GeodeticPoint>,
}

impl<'a> TrajectorySampler<'a> {
    pub fn new(earth: &'a EarthModel, frame: InertialFrame, output_interval: f64) -> Self {
        Self {
            earth,
            frame,
            output_interval,
            last_recorded: None,
            points: Vec::new(),
        }
    }

    /// Records the state at the start of propagation.
    pub fn record_initial(&mut self, state: &StateVector) -> Result<(), TrajectoryError> {
        self.record(0.0, state)
    }

    /// Records `step` if the output interval has elapsed since the last
    /// recorded sample, or if it is the final step. Returns whether it was kept.
    pub fn offer(&mut self, step: &IntegrationStep) -> Result<bool, TrajectoryError> {
        let due = match self.last_recorded {
            None => true,
            Some(last) => {
                step.elapsed_s - last >= self.output_interval * (1.0 - INTERVAL_TOLERANCE)
            }
        };

        if due || step.is_final {
            self.record(step.elapsed_s, &step.state)?;
            Ok(true)
        } else {
            Ok(false)
        }
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    pub fn into_points(self) -> Vec<GeodeticPoint> {
        self.points
    }

    fn record(&mut self, elapsed_s: f64, state: &StateVector) -> Result<(), TrajectoryError> {
        let fixed = self
            .earth
            .inertial_to_fixed(self.frame, &state.position, state.time)?;
        let coordinates = ecef_to_geodetic(self.earth, &fixed)?;
        self.points.push(GeodeticPoint::new(state.time, coordinates));
        self.last_recorded = Some(elapsed_s);
        Ok(())
    }
}
