use std::fs;

use seird::{prelude::*, utils::plot_series};
use serde::{Deserialize, Serialize};

#[derive(Deserialize, Serialize, Debug, Clone)]
#[serde(default)]
pub struct Scenario {
    model: String,
    method: String,
    verbose: bool,
    params: EpiParams,
    population: PopulationParams,
    simulation: SimulationParams,
    intervention: InterventionSchedule,
}

impl Default for Scenario {
    fn default() -> Self {
        Scenario {
            model: "seird_clinical".into(),
            method: DEFAULT_METHOD.into(),
            verbose: false,
            params: Default::default(),
            population: Default::default(),
            simulation: Default::default(),
            intervention: InterventionSchedule::new(30.0, 60.0, 0.9),
        }
    }
}

pub fn main() {
    use simple_logger::SimpleLogger;
    SimpleLogger::new().init().unwrap();

    let scenario: Scenario = match fs::read_to_string("scenario.toml") {
        Ok(data) => toml::from_str(&data).unwrap(),
        Err(_) => Default::default(),
    };
    if scenario.verbose {
        println!("{:#?}", scenario);
    }

    let variant = ModelVariant::resolve(&scenario.model);
    let prediction = predict_with_method(
        variant,
        &scenario.method,
        &scenario.params,
        &scenario.simulation,
        &scenario.population,
        &scenario.intervention,
    )
    .unwrap();

    plot_series("Infectious", &prediction.infectious, 16);
    println!(
        "{}: total infected {:.0}, total deaths {:.0}",
        variant.name(),
        prediction.total_infected,
        prediction.total_deaths
    );

    write_csv(&prediction, "prediction.csv").unwrap();
}

fn write_csv(prediction: &Prediction, path: &str) -> csv::Result<()> {
    let columns = prediction.columns();
    let mut writer = csv::Writer::from_path(path)?;
    writer.write_record(columns.iter().map(|&(name, _)| name))?;
    for row in 0..prediction.len() {
        writer.write_record(columns.iter().map(|&(_, values)| values[row].to_string()))?;
    }
    writer.flush()?;
    Ok(())
}
