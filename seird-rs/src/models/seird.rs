use super::dynamics::{probability, Layout, OutputMap, Pathway};
use super::Compartments;
use crate::epidemic::EpiParams;
use crate::error::Result;

/// Basic SEIRD: the infectious outflow splits directly into the fatal and
/// recovered accumulators at `cfr * gamma` and `(1 - cfr) * gamma`.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Seird {
    Susceptible,
    Exposed,
    Infectious,
    Fatal,
    Recovered,
}

impl Compartments for Seird {
    const CARDINALITY: usize = 5;
    const CSV_HEADER: &'static str = "S,E,I,F,R";

    fn index(self) -> usize {
        self as usize
    }
}

pub(crate) fn layout(params: &EpiParams) -> Result<Layout> {
    use Seird::*;

    let fatal = probability("case_fatality_ratio", params.case_fatality_ratio())?;
    Ok(Layout {
        cardinality: Seird::CARDINALITY,
        csv_header: Seird::CSV_HEADER,
        pathways: vec![
            Pathway::direct(fatal, Fatal),
            Pathway::direct(1.0 - fatal, Recovered),
        ],
        outputs: OutputMap {
            susceptible: Susceptible.index(),
            infectious: Infectious.index(),
            hospitalized: None,
            recovered: vec![Recovered.index()],
            dead: Fatal.index(),
        },
    })
}
