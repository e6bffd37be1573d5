use getset::{CopyGetters, Setters};
use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};
use crate::prelude::Real;

// Default param values
const R0: Real = 2.2;
const INCUBATION_PERIOD: Real = 5.2;
const INFECTIOUS_PERIOD: Real = 2.9;
const CASE_FATALITY_RATIO: Real = 0.02;
const PROB_SEVERE: Real = 0.2;
const MILD_RECOVERY_PERIOD: Real = 11.1;
const HOSPITAL_LAG: Real = 5.0;
const SEVERE_RECOVERY_PERIOD: Real = 28.6;
const DEATH_PERIOD: Real = 32.0;

const POPULATION_SIZE: Real = 1_000_000.0;
const INITIAL_INFECTIONS: Real = 10.0;

const HORIZON: Real = 365.0;
const OUTPUT_STEP: Real = 1.0;
const REFINEMENT: u32 = 40;

/// Epidemiological parameters shared by every model variant. Durations are
/// in days, probabilities are absolute. Each variant validates only the
/// entries it actually uses, at model construction.
#[derive(CopyGetters, Setters, Debug, PartialEq, Copy, Clone, Serialize, Deserialize)]
#[serde(default)]
#[getset(get_copy = "pub", set = "pub")]
pub struct EpiParams {
    /// Basic reproduction number.
    r0: Real,

    /// Mean duration in the "Exposed" compartment.
    incubation_period: Real,

    /// Mean duration in the "Infectious" compartment.
    infectious_period: Real,

    /// Probability that an infection terminates in death.
    case_fatality_ratio: Real,

    /// Probability that an infectious case turns severe.
    prob_severe: Real,

    /// Recovery time of a mild case.
    mild_recovery_period: Real,

    /// Time a severe case spends at home before hospital admission.
    hospital_lag: Real,

    /// Recovery time of a severe case once hospitalized.
    severe_recovery_period: Real,

    /// Time from the end of the infectious period to death for a fatal
    /// case.
    death_period: Real,
}

impl Default for EpiParams {
    fn default() -> Self {
        EpiParams {
            r0: R0,
            incubation_period: INCUBATION_PERIOD,
            infectious_period: INFECTIOUS_PERIOD,
            case_fatality_ratio: CASE_FATALITY_RATIO,
            prob_severe: PROB_SEVERE,
            mild_recovery_period: MILD_RECOVERY_PERIOD,
            hospital_lag: HOSPITAL_LAG,
            severe_recovery_period: SEVERE_RECOVERY_PERIOD,
            death_period: DEATH_PERIOD,
        }
    }
}

/// Population under simulation.
#[derive(CopyGetters, Setters, Debug, PartialEq, Copy, Clone, Serialize, Deserialize)]
#[serde(default)]
#[getset(get_copy = "pub", set = "pub")]
pub struct PopulationParams {
    /// Total population size.
    size: Real,

    /// Infectious individuals at t = 0.
    initial_infections: Real,
}

impl PopulationParams {
    pub fn new(size: Real, initial_infections: Real) -> Self {
        PopulationParams {
            size,
            initial_infections,
        }
    }

    /// The seed must leave a non-empty susceptible pool, since the initial
    /// infectious fraction is normalized against it.
    pub fn validate(&self) -> Result<()> {
        if !(self.size > 0.0) {
            return Err(Error::InvalidParameter(format!(
                "population size must be positive, got {}",
                self.size
            )));
        }
        if !(self.initial_infections >= 0.0) {
            return Err(Error::InvalidParameter(format!(
                "initial infections must be non-negative, got {}",
                self.initial_infections
            )));
        }
        if self.initial_infections >= self.size {
            return Err(Error::InvalidParameter(format!(
                "initial infections ({}) must be smaller than the population ({})",
                self.initial_infections, self.size
            )));
        }
        Ok(())
    }
}

impl Default for PopulationParams {
    fn default() -> Self {
        PopulationParams {
            size: POPULATION_SIZE,
            initial_infections: INITIAL_INFECTIONS,
        }
    }
}

/// Time discretization of a run. The output cadence and the integration
/// resolution are independent: each output step is integrated in
/// `refinement` fine sub-steps.
#[derive(CopyGetters, Setters, Debug, PartialEq, Copy, Clone, Serialize, Deserialize)]
#[serde(default)]
#[getset(get_copy = "pub", set = "pub")]
pub struct SimulationParams {
    /// Total horizon, in days.
    horizon: Real,

    /// Spacing of the output samples, in days.
    output_step: Real,

    /// Fine integration sub-steps per output step.
    refinement: u32,
}

impl SimulationParams {
    pub fn new(horizon: Real, output_step: Real) -> Self {
        SimulationParams {
            horizon,
            output_step,
            refinement: REFINEMENT,
        }
    }

    pub fn with_refinement(mut self, refinement: u32) -> Self {
        self.refinement = refinement;
        self
    }

    /// Number of output samples, `ceil(horizon / output_step)`.
    pub fn samples(&self) -> usize {
        (self.horizon / self.output_step).ceil() as usize
    }

    /// Size of one fine integration step.
    pub fn fine_step(&self) -> Real {
        self.output_step / self.refinement as Real
    }

    pub fn validate(&self) -> Result<()> {
        if !(self.horizon > 0.0) {
            return Err(Error::InvalidParameter(format!(
                "horizon must be positive, got {}",
                self.horizon
            )));
        }
        if !(self.output_step > 0.0) {
            return Err(Error::InvalidParameter(format!(
                "output step must be positive, got {}",
                self.output_step
            )));
        }
        if self.refinement == 0 {
            return Err(Error::InvalidParameter(
                "refinement must be at least 1".into(),
            ));
        }
        Ok(())
    }
}

impl Default for SimulationParams {
    fn default() -> Self {
        SimulationParams {
            horizon: HORIZON,
            output_step: OUTPUT_STEP,
            refinement: REFINEMENT,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn roundtrip() {
        let params = EpiParams::default();
        let data = toml::to_string(&params).unwrap();
        let params_: EpiParams = toml::from_str(&data).unwrap();
        assert_eq!(params, params_);
    }

    #[test]
    fn population_validation() {
        assert!(PopulationParams::default().validate().is_ok());
        assert!(PopulationParams::new(0.0, 0.0).validate().is_err());
        assert!(PopulationParams::new(100.0, -1.0).validate().is_err());
        assert!(PopulationParams::new(100.0, 100.0).validate().is_err());
        assert!(PopulationParams::new(100.0, 99.0).validate().is_ok());
    }

    #[test]
    fn simulation_validation() {
        assert!(SimulationParams::default().validate().is_ok());
        assert!(SimulationParams::new(-1.0, 1.0).validate().is_err());
        assert!(SimulationParams::new(10.0, 0.0).validate().is_err());
        assert!(SimulationParams::new(10.0, 1.0)
            .with_refinement(0)
            .validate()
            .is_err());
    }

    #[test]
    fn sample_count_rounds_up() {
        assert_eq!(SimulationParams::new(100.0, 1.0).samples(), 100);
        assert_eq!(SimulationParams::new(10.5, 1.0).samples(), 11);
        assert_eq!(SimulationParams::new(1.0, 0.4).samples(), 3);
    }
}
