pub use crate::epidemic::*;
pub use crate::error::{Error, Result};
pub use crate::models::{CompartmentModel, Compartments, ModelVariant};
pub use crate::ode::{step, ButcherTableau};
pub use crate::predict::{predict, predict_variant, predict_with_method, DEFAULT_METHOD};
pub use crate::sim::*;

/// Base Real type used by this crate. Uses an alias to easily change precision
/// if necessary.
pub type Real = f64;

/// State vector of a compartment model, one entry per compartment. Entries
/// are population fractions.
pub type State = ndarray::Array1<Real>;

pub(crate) const INF: Real = Real::INFINITY;
