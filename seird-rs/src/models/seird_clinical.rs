use super::dynamics::{positive_duration, severity_split, Layout, OutputMap, Pathway};
use super::Compartments;
use crate::epidemic::EpiParams;
use crate::error::Result;

/// Staged SEIRD with a single recovery accumulator and an explicit `Dead`
/// bucket; the variant that also reports the hospitalized census.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SeirdClinical {
    Susceptible,
    Exposed,
    Infectious,
    Mild,
    Severe,
    SevereHospital,
    Fatal,
    Recovered,
    Dead,
}

impl Compartments for SeirdClinical {
    const CARDINALITY: usize = 9;
    const CSV_HEADER: &'static str = "S,E,I,M,SV,SH,F,R,D";

    fn index(self) -> usize {
        self as usize
    }
}

pub(crate) fn layout(params: &EpiParams) -> Result<Layout> {
    use SeirdClinical::*;

    let split = severity_split(params)?;
    let mild_recovery = positive_duration("mild_recovery_period", params.mild_recovery_period())?;
    let hospital_lag = positive_duration("hospital_lag", params.hospital_lag())?;
    let severe_recovery =
        positive_duration("severe_recovery_period", params.severe_recovery_period())?;
    let death_period = positive_duration("death_period", params.death_period())?;

    Ok(Layout {
        cardinality: SeirdClinical::CARDINALITY,
        csv_header: SeirdClinical::CSV_HEADER,
        pathways: vec![
            Pathway::staged(split.mild, vec![(Mild, mild_recovery)], Recovered),
            Pathway::staged(
                split.severe,
                vec![(Severe, hospital_lag), (SevereHospital, severe_recovery)],
                Recovered,
            ),
            Pathway::staged(split.fatal, vec![(Fatal, death_period)], Dead),
        ],
        outputs: OutputMap {
            susceptible: Susceptible.index(),
            infectious: Infectious.index(),
            hospitalized: Some(SevereHospital.index()),
            recovered: vec![Recovered.index()],
            dead: Dead.index(),
        },
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn mild_and_severe_share_the_recovery_accumulator() {
        let layout = layout(&EpiParams::default()).unwrap();
        assert_eq!(
            layout.outputs.recovered,
            vec![SeirdClinical::Recovered.index()]
        );
        assert_eq!(layout.outputs.dead, SeirdClinical::Dead.index());
    }
}
