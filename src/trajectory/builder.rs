use std::time::Duration;

use crate::earth::EarthModel;
use crate::orbit::{to_state_vector, OrbitalElements};
use crate::propagation::{Rk4, TwoBody, DEFAULT_MAX_STEPS};
use crate::trajectory::{Trajectory, TrajectoryError, TrajectorySampler};

const DEFAULT_STEP: Duration = Duration::from_secs(2);
const DEFAULT_OUTPUT_INTERVAL: Duration = Duration::from_secs(10);

/// Integration step and output cadence for one trajectory build.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PropagationSettings {
    pub step: Duration,
    pub output_interval: Duration,
    /// Upper bound on integrator steps for a single build.
    pub max_steps: usize,
}

impl Default for PropagationSettings {
    fn default() -> Self {
        Self {
            step: DEFAULT_STEP,
            output_interval: DEFAULT_OUTPUT_INTERVAL,
            max_steps: DEFAULT_MAX_STEPS,
        }
    }
}

impl PropagationSettings {
    pub fn new(step: Duration, output_interval: Duration) -> Self {
        Self {
            step,
            output_interval,
            ..Self::default()
        }
    }

    pub fn validate(&self) -> Result<(), TrajectoryError> {
        if self.step.is_zero() {
            return Err(TrajectoryError::InvalidSettings(
                "integration step must be positive".into(),
            ));
        }
        if self.output_interval < self.step {
            return Err(TrajectoryError::InvalidSettings(format!(
                "output interval {:?} is shorter than integration step {:?}",
                self.output_interval, self.step
            )));
        }
        if self.output_interval.as_nanos() % self.step.as_nanos() != 0 {
            return Err(TrajectoryError::InvalidSettings(format!(
                "output interval {:?} is not a whole number of integration steps {:?}",
                self.output_interval, self.step
            )));
        }
        Ok(())
    }
}

/// Propagates `elements` over one Keplerian period and samples the ground track.
///
/// The first sample is at the elements' epoch and the last at epoch plus one
/// period; in between, samples are at least `output_interval` apart. Any
/// failure aborts the build and no partial trajectory is returned.
pub fn build_trajectory(
    elements: &OrbitalElements,
    earth: &EarthModel,
    settings: &PropagationSettings,
) -> Result<Trajectory, TrajectoryError> {
    settings.validate()?;
    elements.validate()?;

    let period = elements.period();
    earth.check_span(elements.epoch, period)?;

    let step = settings.step.as_secs_f64();
    let output_interval = settings.output_interval.as_secs_f64();
    if step > period {
        log::warn!(
            "integration step {} s exceeds the orbital period {:.3} s",
            step,
            period
        );
    }

    let initial = to_state_vector(elements)?;
    let dynamics = TwoBody::new(elements.mu);
    let steps = Rk4::new(step)?
        .with_max_steps(settings.max_steps)
        .propagate(&dynamics, &initial, period)?;

    log::debug!(
        "propagating {:.1} s from {} in {} steps of {} s ({} frame)",
        period,
        elements.epoch,
        steps.total_steps(),
        step,
        elements.frame
    );

    let mut sampler = TrajectorySampler::new(earth, elements.frame, output_interval);
    sampler.record_initial(&initial)?;
    for item in steps {
        sampler.offer(&item?)?;
    }

    let points = sampler.into_points();
    log::info!(
        "built ground track: {} samples over {:.1} s",
        points.len(),
        period
    );

    Ok(Trajectory::new(elements.epoch, period, output_interval, points))
}
