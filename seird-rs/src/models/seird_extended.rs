use super::dynamics::{positive_duration, severity_split, Layout, OutputMap, Pathway};
use super::Compartments;
use crate::epidemic::EpiParams;
use crate::error::Result;

/// Extended SEIRD with severity staging. Mild and severe cases keep their
/// own recovery accumulators; fatal cases drain into `Dead` after the
/// time-to-death lag.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SeirdExtended {
    Susceptible,
    Exposed,
    Infectious,
    Mild,
    Severe,
    SevereHospital,
    Fatal,
    RecoveredMild,
    RecoveredSevere,
    Dead,
}

impl Compartments for SeirdExtended {
    const CARDINALITY: usize = 10;
    const CSV_HEADER: &'static str = "S,E,I,M,SV,SH,F,RM,RS,D";

    fn index(self) -> usize {
        self as usize
    }
}

pub(crate) fn layout(params: &EpiParams) -> Result<Layout> {
    use SeirdExtended::*;

    let split = severity_split(params)?;
    let mild_recovery = positive_duration("mild_recovery_period", params.mild_recovery_period())?;
    let hospital_lag = positive_duration("hospital_lag", params.hospital_lag())?;
    let severe_recovery =
        positive_duration("severe_recovery_period", params.severe_recovery_period())?;
    let death_period = positive_duration("death_period", params.death_period())?;

    Ok(Layout {
        cardinality: SeirdExtended::CARDINALITY,
        csv_header: SeirdExtended::CSV_HEADER,
        pathways: vec![
            Pathway::staged(split.mild, vec![(Mild, mild_recovery)], RecoveredMild),
            Pathway::staged(
                split.severe,
                vec![(Severe, hospital_lag), (SevereHospital, severe_recovery)],
                RecoveredSevere,
            ),
            Pathway::staged(split.fatal, vec![(Fatal, death_period)], Dead),
        ],
        outputs: OutputMap {
            susceptible: Susceptible.index(),
            infectious: Infectious.index(),
            hospitalized: Some(SevereHospital.index()),
            recovered: vec![RecoveredMild.index(), RecoveredSevere.index()],
            dead: Dead.index(),
        },
    })
}
