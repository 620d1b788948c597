//! Fixed-step classical Runge-Kutta integration.
//!
//! Integration is pull-based: [`Rk4::propagate`] returns an iterator that
//! advances one step per `next()` call. Consumers decide what to keep, so
//! integration granularity is independent from output cadence.

use chrono::{DateTime, Utc};
use nalgebra::Vector3;
use std::iter::FusedIterator;

use crate::propagation::{
    shift_epoch, EquationsOfMotion, PropagationError, SingularityError, StateVector,
};

pub const DEFAULT_MAX_STEPS: usize = 10_000_000;

/// A step count within this fraction of a whole number is rounded down,
/// so that float noise in `duration / step` does not add a sliver step.
const STEP_COUNT_SLACK: f64 = 1e-9;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Rk4 {
    step: f64,
    max_steps: usize,
}

impl Rk4 {
    pub fn new(step: f64) -> Result<Self, PropagationError> {
        if !step.is_finite() || step <= 0.0 {
            return Err(PropagationError::InvalidStep(step));
        }
        Ok(Self {
            step,
            max_steps: DEFAULT_MAX_STEPS,
        })
    }

    pub fn with_max_steps(mut self, max_steps: usize) -> Self {
        self.max_steps = max_steps;
        self
    }

    pub fn step_size(&self) -> f64 {
        self.step
    }

    /// One RK4 step of size `h` from `(position, velocity)`.
    pub fn step<E: EquationsOfMotion>(
        dynamics: &E,
        position: &Vector3<f64>,
        velocity: &Vector3<f64>,
        h: f64,
    ) -> Result<(Vector3<f64>, Vector3<f64>), SingularityError> {
        let half = h / 2.0;

        let (v1, a1) = dynamics.derivatives(position, velocity)?;
        let (v2, a2) = dynamics.derivatives(&(position + v1 * half), &(velocity + a1 * half))?;
        let (v3, a3) = dynamics.derivatives(&(position + v2 * half), &(velocity + a2 * half))?;
        let (v4, a4) = dynamics.derivatives(&(position + v3 * h), &(velocity + a3 * h))?;

        let new_position = position + (v1 + v2 * 2.0 + v3 * 2.0 + v4) * (h / 6.0);
        let new_velocity = velocity + (a1 + a2 * 2.0 + a3 * 2.0 + a4) * (h / 6.0);
        Ok((new_position, new_velocity))
    }

    /// Lazily integrates `initial` forward by `duration` seconds.
    ///
    /// The last step is shortened so the final state lands exactly on
    /// `duration`. The initial state itself is not yielded.
    pub fn propagate<'a, E: EquationsOfMotion>(
        &self,
        dynamics: &'a E,
        initial: &StateVector,
        duration: f64,
    ) -> Result<Rk4Propagation<'a, E>, PropagationError> {
        if !duration.is_finite() || duration < 0.0 {
            return Err(PropagationError::InvalidDuration(duration));
        }

        let total_steps = step_count(duration, self.step);
        if total_steps > self.max_steps as f64 {
            return Err(PropagationError::TooManySteps {
                required: total_steps,
                limit: self.max_steps,
            });
        }

        Ok(Rk4Propagation {
            dynamics,
            epoch: initial.time,
            position: initial.position,
            velocity: initial.velocity,
            step: self.step,
            duration,
            total_steps: total_steps as usize,
            taken: 0,
            done: false,
        })
    }
}

fn step_count(duration: f64, step: f64) -> f64 {
    if duration == 0.0 {
        return 0.0;
    }
    let ratio = duration / step;
    let whole = ratio.floor();
    let count = if ratio - whole < STEP_COUNT_SLACK * ratio.max(1.0) {
        whole
    } else {
        whole + 1.0
    };
    count.max(1.0)
}

/// A state produced by the integrator.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct IntegrationStep {
    /// Seconds since the initial state.
    pub elapsed_s: f64,
    pub state: StateVector,
    /// Set on the step that reaches the requested end time.
    pub is_final: bool,
}

/// Finite, non-restartable sequence of RK4 steps.
///
/// A singular state ends the sequence after yielding the error.
pub struct Rk4Propagation<'a, E> {
    dynamics: &'a E,
    epoch: DateTime<Utc>,
    position: Vector3<f64>,
    velocity: Vector3<f64>,
    step: f64,
    duration: f64,
    total_steps: usize,
    taken: usize,
    done: bool,
}

impl<E> Rk4Propagation<'_, E> {
    pub fn total_steps(&self) -> usize {
        self.total_steps
    }

    fn time_at(&self, index: usize) -> f64 {
        if index >= self.total_steps {
            self.duration
        } else {
            index as f64 * self.step
        }
    }
}

impl<E: EquationsOfMotion> Iterator for Rk4Propagation<'_, E> {
    type Item = Result<IntegrationStep, PropagationError>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.done || self.taken >= self.total_steps {
            return None;
        }

        let start = self.time_at(self.taken);
        let end = self.time_at(self.taken + 1);

        match Rk4::step(self.dynamics, &self.position, &self.velocity, end - start) {
            Ok((position, velocity)) => {
                self.position = position;
                self.velocity = velocity;
                self.taken += 1;
                let is_final = self.taken == self.total_steps;
                self.done = is_final;
                Some(Ok(IntegrationStep {
                    elapsed_s: end,
                    state: StateVector::new(shift_epoch(self.epoch, end), position, velocity),
                    is_final,
                }))
            }
            Err(SingularityError { radius_m }) => {
                self.done = true;
                Some(Err(PropagationError::Singularity {
                    elapsed_s: start,
                    radius_m,
                }))
            }
        }
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        if self.done {
            (0, Some(0))
        } else {
            (0, Some(self.total_steps - self.taken))
        }
    }
}

impl<E: EquationsOfMotion> FusedIterator for Rk4Propagation<'_, E> {}
