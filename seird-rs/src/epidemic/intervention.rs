use getset::CopyGetters;
use serde::{Deserialize, Serialize};

use crate::epidemic::EpiParams;
use crate::prelude::{Real, INF};

/// Default damping of the baseline reproduction number once an
/// intervention window closes.
const AFTER_DAMPING: Real = 0.5;

/// What the transmission rate reverts to once an intervention window
/// closes.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum PostIntervention {
    /// Baseline reproduction number scaled by a fixed factor.
    Damped(Real),
    /// Explicit replacement reproduction number.
    Fixed(Real),
}

impl Default for PostIntervention {
    fn default() -> Self {
        PostIntervention::Damped(AFTER_DAMPING)
    }
}

/// A single intervention window `[start, start + duration)` overriding the
/// transmission rate, expressed as a target reproduction number.
#[derive(CopyGetters, Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
#[getset(get_copy = "pub")]
pub struct InterventionSchedule {
    /// Day the window opens.
    start: Real,

    /// Window length, in days.
    duration: Real,

    /// Target reproduction number while the window is open.
    amplitude: Real,

    /// Rate once the window has closed.
    after: PostIntervention,
}

impl InterventionSchedule {
    pub fn new(start: Real, duration: Real, amplitude: Real) -> Self {
        InterventionSchedule {
            start,
            duration,
            amplitude,
            after: PostIntervention::default(),
        }
    }

    /// Revert to an explicit reproduction number after the window.
    pub fn with_after(mut self, r0: Real) -> Self {
        self.after = PostIntervention::Fixed(r0);
        self
    }

    /// Revert to a damped baseline after the window.
    pub fn with_damping(mut self, factor: Real) -> Self {
        self.after = PostIntervention::Damped(factor);
        self
    }

    /// A schedule that never triggers: the policy stays at baseline for
    /// the whole horizon.
    pub fn none() -> Self {
        InterventionSchedule {
            start: INF,
            duration: 0.0,
            amplitude: 0.0,
            after: PostIntervention::default(),
        }
    }
}

impl Default for InterventionSchedule {
    fn default() -> Self {
        InterventionSchedule::none()
    }
}

/// Piecewise-constant transmission rate induced by an intervention window.
///
/// Reproduction numbers are resolved against the model parameters once, at
/// construction; `beta` is then a pure function of time.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TransmissionPolicy {
    baseline: Real,
    intervened: Real,
    after: Real,
    start: Real,
    end: Real,
}

impl TransmissionPolicy {
    pub fn new(params: &EpiParams, schedule: &InterventionSchedule) -> TransmissionPolicy {
        let period = params.infectious_period();
        let baseline = params.r0() / period;
        let after = match schedule.after() {
            PostIntervention::Damped(factor) => factor * baseline,
            PostIntervention::Fixed(r0) => r0 / period,
        };
        TransmissionPolicy {
            baseline,
            intervened: schedule.amplitude() / period,
            after,
            start: schedule.start(),
            end: schedule.start() + schedule.duration(),
        }
    }

    /// Constant-baseline policy, no intervention.
    pub fn baseline(params: &EpiParams) -> TransmissionPolicy {
        TransmissionPolicy::new(params, &InterventionSchedule::none())
    }

    /// Effective transmission rate at absolute time `t`.
    pub fn beta(&self, t: Real) -> Real {
        if t < self.start {
            self.baseline
        } else if t < self.end {
            self.intervened
        } else {
            self.after
        }
    }
}
