use crate::epidemic::{
    EpiParams, InterventionSchedule, PopulationParams, SimulationParams, TransmissionPolicy,
};
use crate::error::Result;
use crate::models::{CompartmentModel, ModelVariant};
use crate::ode::tableau;
use crate::sim::{simulate, Prediction};

/// Scheme used when the caller does not pick one.
pub const DEFAULT_METHOD: &str = "rk4";

/// Project an epidemic by model name.
///
/// Unknown names degrade to the basic SEIRD variant with a logged
/// diagnostic; every other configuration problem is a hard error raised
/// before any integration starts.
pub fn predict(
    model: &str,
    params: &EpiParams,
    sim: &SimulationParams,
    pop: &PopulationParams,
    schedule: &InterventionSchedule,
) -> Result<Prediction> {
    predict_variant(ModelVariant::resolve(model), params, sim, pop, schedule)
}

/// Like [`predict`], with the variant already resolved.
pub fn predict_variant(
    variant: ModelVariant,
    params: &EpiParams,
    sim: &SimulationParams,
    pop: &PopulationParams,
    schedule: &InterventionSchedule,
) -> Result<Prediction> {
    predict_with_method(variant, DEFAULT_METHOD, params, sim, pop, schedule)
}

/// Like [`predict_variant`], with a caller-selected integration scheme.
pub fn predict_with_method(
    variant: ModelVariant,
    method: &str,
    params: &EpiParams,
    sim: &SimulationParams,
    pop: &PopulationParams,
    schedule: &InterventionSchedule,
) -> Result<Prediction> {
    pop.validate()?;
    sim.validate()?;
    let tableau = tableau::lookup(method)?;
    let policy = TransmissionPolicy::new(params, schedule);
    let model = CompartmentModel::new(variant, params, policy)?;
    Ok(simulate(&model, sim, pop, tableau))
}
