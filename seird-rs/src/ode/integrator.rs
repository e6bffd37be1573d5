use crate::ode::tableau::ButcherTableau;
use crate::prelude::{Real, State};

/// Advance `y` from time `t` by a single step of size `h` under the given
/// tableau.
///
/// The right-hand side is called as `f(stage_time, state, offset)` where
/// `offset = c_i * h` is the stage's distance from the step start. The
/// offset is handed through explicitly so time-dependent forcing terms
/// evaluate at the stage's true absolute time rather than at `t`. `f` must
/// be pure; every stage works on its own copy of the state and `y` itself
/// is only read.
pub fn step<F>(tableau: &ButcherTableau, f: F, y: &State, t: Real, h: Real) -> State
where
    F: Fn(Real, &State, Real) -> State,
{
    let stages = tableau.stages();
    let mut k: Vec<State> = Vec::with_capacity(stages);

    for stage in 0..stages {
        let offset = tableau.offset(stage) * h;
        let mut yi = y.clone();
        for (j, &a) in tableau.coeffs(stage).iter().enumerate() {
            if a != 0.0 {
                yi.scaled_add(h * a, &k[j]);
            }
        }
        k.push(f(t + offset, &yi, offset));
    }

    let mut next = y.clone();
    for (j, &b) in tableau.weights().iter().enumerate() {
        next.scaled_add(h * b, &k[j]);
    }
    next
}
