use std::collections::BTreeMap;
use std::sync::OnceLock;

use crate::error::{Error, Result};
use crate::prelude::Real;

/// Coefficient table of an explicit multistage Runge-Kutta scheme.
///
/// A tableau with `s` stages stores `s` rows. Row `r` (0-indexed,
/// `r < s - 1`) describes stage `r + 1` as `[c, a_0, ..., a_r]`: the stage
/// time fraction followed by the coefficients applied to the previous
/// stage derivatives. The last row holds the `s` output weights. Stage 0
/// is implicit: offset 0, no coefficients.
#[derive(Debug, Clone, PartialEq)]
pub struct ButcherTableau {
    name: String,
    order: u8,
    rows: Vec<Vec<Real>>,
}

impl ButcherTableau {
    /// Validate and build a tableau. The row-length invariant is checked
    /// here, before any integration work begins.
    pub fn new(name: impl Into<String>, order: u8, rows: Vec<Vec<Real>>) -> Result<ButcherTableau> {
        let name = name.into();
        let stages = rows.len();
        if stages == 0 {
            return Err(Error::MalformedTableau {
                name,
                reason: "tableau has no rows".into(),
            });
        }
        for (r, row) in rows.iter().enumerate().take(stages - 1) {
            if row.len() != r + 2 {
                return Err(Error::MalformedTableau {
                    name,
                    reason: format!(
                        "stage row {} has {} entries, expected {}",
                        r,
                        row.len(),
                        r + 2
                    ),
                });
            }
        }
        if rows[stages - 1].len() != stages {
            return Err(Error::MalformedTableau {
                name,
                reason: format!(
                    "weights row has {} entries, expected {}",
                    rows[stages - 1].len(),
                    stages
                ),
            });
        }
        Ok(ButcherTableau { name, order, rows })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Declared convergence order of the scheme.
    pub fn order(&self) -> u8 {
        self.order
    }

    /// Total number of stages.
    pub fn stages(&self) -> usize {
        self.rows.len()
    }

    /// Time fraction `c_i` of the given stage.
    pub fn offset(&self, stage: usize) -> Real {
        if stage == 0 {
            0.0
        } else {
            self.rows[stage - 1][0]
        }
    }

    /// Coefficients `a_{i,j}` (j < i) of the given stage.
    pub fn coeffs(&self, stage: usize) -> &[Real] {
        if stage == 0 {
            &[]
        } else {
            &self.rows[stage - 1][1..]
        }
    }

    /// Output weights `b`.
    pub fn weights(&self) -> &[Real] {
        &self.rows[self.rows.len() - 1]
    }
}

// Shorthand used only by the registry below; the public constructor is
// ButcherTableau::new.
fn table(name: &'static str, order: u8, rows: Vec<Vec<Real>>) -> (&'static str, ButcherTableau) {
    (
        name,
        ButcherTableau {
            name: name.into(),
            order,
            rows,
        },
    )
}

fn registry() -> &'static BTreeMap<&'static str, ButcherTableau> {
    static REGISTRY: OnceLock<BTreeMap<&'static str, ButcherTableau>> = OnceLock::new();
    REGISTRY.get_or_init(|| {
        // The kutta3 and simpson tables coincide; both names are kept
        // because callers know the scheme under either one.
        vec![
            table("euler", 1, vec![vec![1.0]]),
            table("midpoint", 2, vec![vec![0.5, 0.5], vec![0.0, 1.0]]),
            table("heun2", 2, vec![vec![1.0, 1.0], vec![0.5, 0.5]]),
            table(
                "ralston",
                2,
                vec![vec![2.0 / 3.0, 2.0 / 3.0], vec![0.25, 0.75]],
            ),
            table(
                "heun3",
                3,
                vec![
                    vec![1.0 / 3.0, 1.0 / 3.0],
                    vec![2.0 / 3.0, 0.0, 2.0 / 3.0],
                    vec![0.25, 0.0, 0.75],
                ],
            ),
            table(
                "kutta3",
                3,
                vec![
                    vec![0.5, 0.5],
                    vec![1.0, -1.0, 2.0],
                    vec![1.0 / 6.0, 2.0 / 3.0, 1.0 / 6.0],
                ],
            ),
            table(
                "simpson",
                3,
                vec![
                    vec![0.5, 0.5],
                    vec![1.0, -1.0, 2.0],
                    vec![1.0 / 6.0, 2.0 / 3.0, 1.0 / 6.0],
                ],
            ),
            table(
                "ssp33",
                3,
                vec![
                    vec![1.0, 1.0],
                    vec![0.5, 0.25, 0.25],
                    vec![1.0 / 6.0, 1.0 / 6.0, 2.0 / 3.0],
                ],
            ),
            table(
                "ssp43",
                3,
                vec![
                    vec![0.5, 0.5],
                    vec![1.0, 0.5, 0.5],
                    vec![0.5, 1.0 / 6.0, 1.0 / 6.0, 1.0 / 6.0],
                    vec![1.0 / 6.0, 1.0 / 6.0, 1.0 / 6.0, 0.5],
                ],
            ),
            table(
                "rk4",
                4,
                vec![
                    vec![0.5, 0.5],
                    vec![0.5, 0.0, 0.5],
                    vec![1.0, 0.0, 0.0, 1.0],
                    vec![1.0 / 6.0, 1.0 / 3.0, 1.0 / 3.0, 1.0 / 6.0],
                ],
            ),
            table(
                "rk38",
                4,
                vec![
                    vec![1.0 / 3.0, 1.0 / 3.0],
                    vec![2.0 / 3.0, -1.0 / 3.0, 1.0],
                    vec![1.0, 1.0, -1.0, 1.0],
                    vec![0.125, 0.375, 0.375, 0.125],
                ],
            ),
        ]
        .into_iter()
        .collect()
    })
}

/// Look up a registered scheme by name.
///
/// Unknown names are a configuration error, never a fallback to some other
/// scheme. New schemes are added by registering a tableau, not by touching
/// the stepper.
pub fn lookup(name: &str) -> Result<&'static ButcherTableau> {
    registry()
        .get(name)
        .ok_or_else(|| Error::UnknownTableau(name.into()))
}

/// Names of every registered scheme, in sorted order.
pub fn names() -> impl Iterator<Item = &'static str> {
    registry().keys().copied()
}
