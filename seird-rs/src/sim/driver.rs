use serde::Serialize;

use crate::epidemic::{PopulationParams, SimulationParams};
use crate::models::CompartmentModel;
use crate::ode::{self, ButcherTableau};
use crate::prelude::Real;

/// Projection of a compartment model: one value per output step for each
/// tracked series, plus summary scalars taken from the terminal state.
/// Series are scaled to head counts, not fractions.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Prediction {
    pub infectious: Vec<Real>,
    /// Present for variants that model a hospital compartment.
    pub hospitalized: Option<Vec<Real>>,
    pub recovered: Vec<Real>,
    pub dead: Vec<Real>,
    /// Running total of everyone ever infected, `N * (1 - S)`.
    pub cumulative_infected: Vec<Real>,
    /// Death toll at the end of the horizon.
    pub total_deaths: Real,
    /// Cumulative infections at the end of the horizon.
    pub total_infected: Real,
}

impl Prediction {
    /// Number of output samples in each series.
    pub fn len(&self) -> usize {
        self.infectious.len()
    }

    pub fn is_empty(&self) -> bool {
        self.infectious.is_empty()
    }

    /// Output series as `(name, values)` columns, in a stable order.
    pub fn columns(&self) -> Vec<(&'static str, &[Real])> {
        let mut columns: Vec<(&'static str, &[Real])> =
            vec![("Infectious", self.infectious.as_slice())];
        if let Some(hospitalized) = &self.hospitalized {
            columns.push(("Hospitalized", hospitalized.as_slice()));
        }
        columns.push(("Recovered", self.recovered.as_slice()));
        columns.push(("Dead", self.dead.as_slice()));
        columns.push(("CumulativeInfected", self.cumulative_infected.as_slice()));
        columns
    }
}

/// Run the fine-stepped integration and sample at the coarse cadence.
///
/// The run takes `ceil(horizon / output_step) * refinement` fine steps of
/// size `output_step / refinement`. The state is recorded immediately
/// before the integration step that crosses each coarse boundary, so the
/// first sample is the initial state and the series length is exactly the
/// sample count, independent of the refinement.
pub fn simulate(
    model: &CompartmentModel,
    sim: &SimulationParams,
    pop: &PopulationParams,
    tableau: &ButcherTableau,
) -> Prediction {
    let samples = sim.samples();
    let refinement = sim.refinement() as usize;
    let h = sim.fine_step();
    let n = pop.size();
    let outputs = model.outputs();

    let mut prediction = Prediction {
        infectious: Vec::with_capacity(samples),
        hospitalized: outputs.hospitalized.map(|_| Vec::with_capacity(samples)),
        recovered: Vec::with_capacity(samples),
        dead: Vec::with_capacity(samples),
        cumulative_infected: Vec::with_capacity(samples),
        total_deaths: 0.0,
        total_infected: 0.0,
    };

    let mut x = model.initial_state(pop);
    let mut t = 0.0;
    let mut remaining = samples * refinement;

    while remaining > 0 {
        remaining -= 1;
        if (remaining + 1) % refinement == 0 {
            prediction.infectious.push(n * x[outputs.infectious]);
            if let (Some(series), Some(index)) =
                (prediction.hospitalized.as_mut(), outputs.hospitalized)
            {
                series.push(n * x[index]);
            }
            prediction
                .recovered
                .push(n * outputs.recovered.iter().map(|&i| x[i]).sum::<Real>());
            prediction.dead.push(n * x[outputs.dead]);
            prediction
                .cumulative_infected
                .push(n * (1.0 - x[outputs.susceptible]));
        }
        x = ode::step(tableau, |time, y, _| model.derivative(time, y), &x, t, h);
        t += h;
    }

    prediction.total_deaths = n * x[outputs.dead];
    prediction.total_infected = n * (1.0 - x[outputs.susceptible]);
    prediction
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::epidemic::{EpiParams, TransmissionPolicy};
    use crate::models::ModelVariant;
    use crate::ode::lookup;

    fn run(sim: SimulationParams) -> Prediction {
        let params = EpiParams::default();
        let policy = TransmissionPolicy::baseline(&params);
        let model = CompartmentModel::new(ModelVariant::Seird, &params, policy).unwrap();
        simulate(
            &model,
            &sim,
            &PopulationParams::default(),
            lookup("rk4").unwrap(),
        )
    }

    #[test]
    fn series_length_is_independent_of_refinement() {
        for &refinement in &[1, 7, 40] {
            let prediction = run(SimulationParams::new(10.0, 1.0).with_refinement(refinement));
            assert_eq!(prediction.len(), 10);
        }
        let prediction = run(SimulationParams::new(10.5, 1.0).with_refinement(4));
        assert_eq!(prediction.len(), 11);
    }

    #[test]
    fn first_sample_is_the_initial_state() {
        let prediction = run(SimulationParams::new(10.0, 1.0));
        let pop = PopulationParams::default();
        let seed = pop.initial_infections() / (pop.size() - pop.initial_infections());
        assert_eq!(prediction.infectious[0], pop.size() * seed);
        assert_eq!(prediction.cumulative_infected[0], 0.0);
        assert_eq!(prediction.dead[0], 0.0);
    }

    #[test]
    fn columns_follow_the_variant_shape() {
        let prediction = run(SimulationParams::new(5.0, 1.0));
        let names: Vec<_> = prediction.columns().iter().map(|&(name, _)| name).collect();
        assert_eq!(
            names,
            vec!["Infectious", "Recovered", "Dead", "CumulativeInfected"]
        );

        let params = EpiParams::default();
        let policy = TransmissionPolicy::baseline(&params);
        let model = CompartmentModel::new(ModelVariant::SeirdClinical, &params, policy).unwrap();
        let prediction = simulate(
            &model,
            &SimulationParams::new(5.0, 1.0),
            &PopulationParams::default(),
            lookup("rk4").unwrap(),
        );
        let names: Vec<_> = prediction.columns().iter().map(|&(name, _)| name).collect();
        assert_eq!(
            names,
            vec![
                "Infectious",
                "Hospitalized",
                "Recovered",
                "Dead",
                "CumulativeInfected"
            ]
        );
        assert_eq!(prediction.hospitalized.as_ref().unwrap().len(), 5);
    }
}
