use ndarray::Array1;

use crate::epidemic::{EpiParams, PopulationParams, TransmissionPolicy};
use crate::error::{Error, Result};
use crate::models::{seird, seird_clinical, seird_extended, Compartments, ModelVariant};
use crate::prelude::{Real, State};

/// Tolerance on the mild/severe/fatal probability split.
const PROB_TOL: Real = 1.0e-9;

// Every variant lays out the Susceptible/Exposed/Infectious core in the
// first three entries; the pathways below only wire up what follows.
const S: usize = 0;
const E: usize = 1;
const I: usize = 2;

/// One outcome of an infection: a share of the infectious outflow routed
/// through a chain of sub-compartments into a terminal accumulator.
///
/// An empty chain feeds the accumulator straight from the infectious pool.
#[derive(Debug, Clone)]
pub(crate) struct Pathway {
    prob: Real,
    stages: Vec<Stage>,
    terminal: usize,
}

#[derive(Debug, Clone, Copy)]
struct Stage {
    index: usize,
    rate: Real,
}

impl Pathway {
    /// Share routed straight into a terminal accumulator.
    pub(crate) fn direct(prob: Real, terminal: impl Compartments) -> Pathway {
        Pathway {
            prob,
            stages: Vec::new(),
            terminal: terminal.index(),
        }
    }

    /// Share routed through `(compartment, duration)` stages before the
    /// terminal accumulator. Durations must already be validated.
    pub(crate) fn staged<C: Compartments>(prob: Real, stages: Vec<(C, Real)>, terminal: C) -> Pathway {
        Pathway {
            prob,
            stages: stages
                .into_iter()
                .map(|(compartment, duration)| Stage {
                    index: compartment.index(),
                    rate: 1.0 / duration,
                })
                .collect(),
            terminal: terminal.index(),
        }
    }
}

/// Which state-vector entries feed each output series.
#[derive(Debug, Clone)]
pub struct OutputMap {
    pub susceptible: usize,
    pub infectious: usize,
    /// Present for variants that model a hospital compartment.
    pub hospitalized: Option<usize>,
    /// Summed: some variants keep separate recovery accumulators.
    pub recovered: Vec<usize>,
    pub dead: usize,
}

/// Per-variant wiring of the shared dynamics engine.
#[derive(Debug, Clone)]
pub(crate) struct Layout {
    pub(crate) cardinality: usize,
    pub(crate) csv_header: &'static str,
    pub(crate) pathways: Vec<Pathway>,
    pub(crate) outputs: OutputMap,
}

/// A compartment model bound to its parameters and transmission policy.
///
/// All variants share this engine: the S/E/I core followed by the
/// variant's outcome pathways. The only nonlinear term is the mass-action
/// infection term `beta * I * S`; every other transfer is linear decay.
#[derive(Debug, Clone)]
pub struct CompartmentModel {
    variant: ModelVariant,
    layout: Layout,
    incubation_rate: Real,
    recovery_rate: Real,
    policy: TransmissionPolicy,
}

impl CompartmentModel {
    /// Build a model, validating every parameter the variant uses.
    pub fn new(
        variant: ModelVariant,
        params: &EpiParams,
        policy: TransmissionPolicy,
    ) -> Result<CompartmentModel> {
        let incubation = positive_duration("incubation_period", params.incubation_period())?;
        let infectious = positive_duration("infectious_period", params.infectious_period())?;
        let layout = match variant {
            ModelVariant::Seird => seird::layout(params)?,
            ModelVariant::SeirdExtended => seird_extended::layout(params)?,
            ModelVariant::SeirdClinical => seird_clinical::layout(params)?,
        };
        Ok(CompartmentModel {
            variant,
            layout,
            incubation_rate: 1.0 / incubation,
            recovery_rate: 1.0 / infectious,
            policy,
        })
    }

    pub fn variant(&self) -> ModelVariant {
        self.variant
    }

    /// Length of the state vector.
    pub fn cardinality(&self) -> usize {
        self.layout.cardinality
    }

    pub fn csv_header(&self) -> &'static str {
        self.layout.csv_header
    }

    pub fn outputs(&self) -> &OutputMap {
        &self.layout.outputs
    }

    pub fn policy(&self) -> &TransmissionPolicy {
        &self.policy
    }

    /// Initial state: everyone susceptible plus the infectious seed.
    ///
    /// The seed is normalized against the susceptible pool,
    /// `I0 / (N - I0)`, not the total population.
    pub fn initial_state(&self, pop: &PopulationParams) -> State {
        let mut x = Array1::zeros(self.layout.cardinality);
        x[S] = 1.0;
        x[I] = pop.initial_infections() / (pop.size() - pop.initial_infections());
        x
    }

    /// Time derivative of the state under the current policy. Pure: the
    /// input state is only read.
    pub fn derivative(&self, t: Real, x: &State) -> State {
        let beta = self.policy.beta(t);
        let a = self.incubation_rate;
        let gamma = self.recovery_rate;

        let mut dx = Array1::zeros(x.len());
        let infection = beta * x[I] * x[S];
        dx[S] = -infection;
        dx[E] = infection - a * x[E];
        dx[I] = a * x[E] - gamma * x[I];

        for pathway in &self.layout.pathways {
            let mut inflow = pathway.prob * gamma * x[I];
            for stage in &pathway.stages {
                dx[stage.index] += inflow - stage.rate * x[stage.index];
                inflow = stage.rate * x[stage.index];
            }
            dx[pathway.terminal] += inflow;
        }
        dx
    }
}

pub(crate) fn positive_duration(name: &str, value: Real) -> Result<Real> {
    if value > 0.0 && value.is_finite() {
        Ok(value)
    } else {
        Err(Error::InvalidParameter(format!(
            "{} must be strictly positive, got {}",
            name, value
        )))
    }
}

pub(crate) fn probability(name: &str, value: Real) -> Result<Real> {
    if (0.0..=1.0).contains(&value) {
        Ok(value)
    } else {
        Err(Error::InvalidParameter(format!(
            "{} must be a probability in [0, 1], got {}",
            name, value
        )))
    }
}

pub(crate) struct SeveritySplit {
    pub(crate) mild: Real,
    pub(crate) severe: Real,
    pub(crate) fatal: Real,
}

/// Three-way split of the infectious outflow. Mild is the residual, so the
/// checked constraint is that severe and fatal leave room for it.
pub(crate) fn severity_split(params: &EpiParams) -> Result<SeveritySplit> {
    let severe = probability("prob_severe", params.prob_severe())?;
    let fatal = probability("case_fatality_ratio", params.case_fatality_ratio())?;
    let mild = 1.0 - severe - fatal;
    if mild < -PROB_TOL {
        return Err(Error::InvalidParameter(format!(
            "mild/severe/fatal probabilities must sum to 1: prob_severe {} + case_fatality_ratio {} exceeds 1",
            severe, fatal
        )));
    }
    Ok(SeveritySplit {
        mild: mild.max(0.0),
        severe,
        fatal,
    })
}

#[cfg(test)]
mod tests {
    use assert_approx_eq::assert_approx_eq;

    use super::*;
    use crate::epidemic::InterventionSchedule;
    use crate::ode;

    const VARIANTS: [ModelVariant; 3] = [
        ModelVariant::Seird,
        ModelVariant::SeirdExtended,
        ModelVariant::SeirdClinical,
    ];

    fn model(variant: ModelVariant) -> CompartmentModel {
        let params = EpiParams::default();
        let policy = TransmissionPolicy::baseline(&params);
        CompartmentModel::new(variant, &params, policy).unwrap()
    }

    #[test]
    fn derivative_conserves_population() {
        for &variant in &VARIANTS {
            let model = model(variant);
            // Spread some mass over every compartment.
            let n = model.cardinality();
            let x = Array1::from_shape_fn(n, |i| 1.0 / (i + 1) as Real);
            for &t in &[0.0, 25.0, 200.0] {
                let dx = model.derivative(t, &x);
                assert_approx_eq!(dx.sum(), 0.0, 1.0e-12);
            }
        }
    }

    #[test]
    fn basic_variant_derivative_by_hand() {
        let mut params = EpiParams::default();
        params
            .set_r0(2.5)
            .set_incubation_period(5.0)
            .set_infectious_period(3.0)
            .set_case_fatality_ratio(0.02);
        let policy = TransmissionPolicy::baseline(&params);
        let model = CompartmentModel::new(ModelVariant::Seird, &params, policy).unwrap();

        let x = ndarray::array![0.9, 0.05, 0.04, 0.005, 0.005];
        let dx = model.derivative(0.0, &x);

        let beta = 2.5 / 3.0;
        let a = 1.0 / 5.0;
        let gamma = 1.0 / 3.0;
        assert_approx_eq!(dx[0], -beta * 0.04 * 0.9, 1.0e-12);
        assert_approx_eq!(dx[1], beta * 0.04 * 0.9 - a * 0.05, 1.0e-12);
        assert_approx_eq!(dx[2], a * 0.05 - gamma * 0.04, 1.0e-12);
        assert_approx_eq!(dx[3], 0.02 * gamma * 0.04, 1.0e-12);
        assert_approx_eq!(dx[4], 0.98 * gamma * 0.04, 1.0e-12);
    }

    #[test]
    fn initial_state_normalizes_against_the_susceptible_pool() {
        let pop = PopulationParams::new(1_000_000.0, 10.0);
        for &variant in &VARIANTS {
            let model = model(variant);
            let x = model.initial_state(&pop);
            assert_eq!(x.len(), variant.cardinality());
            assert_eq!(x[0], 1.0);
            assert_eq!(x[2], 10.0 / (1_000_000.0 - 10.0));
            assert_eq!(x.iter().filter(|&&v| v != 0.0).count(), 2);
        }
    }

    #[test]
    fn integration_conserves_total_mass() {
        // The conserved quantity is the initial total, 1 + I0 / (N - I0).
        let rk4 = ode::lookup("rk4").unwrap();
        let pop = PopulationParams::default();
        for &variant in &VARIANTS {
            let model = model(variant);
            let mut x = model.initial_state(&pop);
            let total = x.sum();
            let h = 0.025;
            for i in 0..400 {
                x = ode::step(rk4, |t, y, _| model.derivative(t, y), &x, i as Real * h, h);
                assert_approx_eq!(x.sum(), total, 1.0e-9);
            }
        }
    }

    #[test]
    fn negative_and_zero_durations_are_rejected() {
        let policy = TransmissionPolicy::baseline(&EpiParams::default());

        let mut params = EpiParams::default();
        params.set_incubation_period(0.0);
        assert!(CompartmentModel::new(ModelVariant::Seird, &params, policy).is_err());

        let mut params = EpiParams::default();
        params.set_death_period(-1.0);
        assert!(CompartmentModel::new(ModelVariant::SeirdExtended, &params, policy).is_err());

        let mut params = EpiParams::default();
        params.set_hospital_lag(0.0);
        assert!(CompartmentModel::new(ModelVariant::SeirdClinical, &params, policy).is_err());
    }

    #[test]
    fn variants_only_validate_what_they_use() {
        // The basic variant has no death sub-compartment, so a nonsensical
        // death period is not its problem.
        let mut params = EpiParams::default();
        params.set_death_period(0.0);
        let policy = TransmissionPolicy::baseline(&params);
        assert!(CompartmentModel::new(ModelVariant::Seird, &params, policy).is_ok());
    }

    #[test]
    fn probability_split_must_leave_room_for_mild() {
        let mut params = EpiParams::default();
        params.set_prob_severe(0.9).set_case_fatality_ratio(0.2);
        let policy = TransmissionPolicy::baseline(&params);
        for &variant in &[ModelVariant::SeirdExtended, ModelVariant::SeirdClinical] {
            assert!(CompartmentModel::new(variant, &params, policy).is_err());
        }
    }

    #[test]
    fn out_of_range_probabilities_are_rejected() {
        let policy = TransmissionPolicy::baseline(&EpiParams::default());

        let mut params = EpiParams::default();
        params.set_case_fatality_ratio(1.5);
        assert!(CompartmentModel::new(ModelVariant::Seird, &params, policy).is_err());

        let mut params = EpiParams::default();
        params.set_prob_severe(-0.1);
        assert!(CompartmentModel::new(ModelVariant::SeirdExtended, &params, policy).is_err());
    }

    #[test]
    fn policy_shapes_the_infection_term() {
        let params = EpiParams::default();
        let schedule = InterventionSchedule::new(10.0, 10.0, 0.0);
        let policy = TransmissionPolicy::new(&params, &schedule);
        let model = CompartmentModel::new(ModelVariant::Seird, &params, policy).unwrap();

        let x = ndarray::array![0.9, 0.0, 0.1, 0.0, 0.0];
        // Inside the window the amplitude is 0, so nobody gets infected.
        let dx = model.derivative(15.0, &x);
        assert_approx_eq!(dx[0], 0.0, 1.0e-12);
        // Before the window the baseline applies.
        let dx = model.derivative(5.0, &x);
        assert!(dx[0] < 0.0);
    }
}
