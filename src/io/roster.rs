use anyhow::Context;
use serde::Deserialize;

use crate::model::compartments::{Cohort, NUM_COHORTS};

#[derive(Debug, Deserialize)]
struct RosterRow {
    cohort: String,
    population: f64,
    infected: f64,
}

/// Load per-cohort populations and initially-infected counts from a CSV
/// file with columns: `cohort,population,infected`.
///
/// Every cohort label must appear exactly once; rows may come in any
/// order, the returned vectors are index-aligned to `Cohort::ALL`.
/// Negative counts are clamped to zero on load.
pub fn load_roster_csv(path: &str) -> anyhow::Result<(Vec<f64>, Vec<f64>)> {
    let mut rdr = csv::Reader::from_path(path)
        .with_context(|| format!("Failed to open roster CSV: {}", path))?;

    let mut rows: [Option<(f64, f64)>; NUM_COHORTS] = [None; NUM_COHORTS];
    for result in rdr.deserialize::<RosterRow>() {
        let row = result?;
        let cohort = Cohort::from_label(&row.cohort)
            .with_context(|| format!("Unknown cohort label '{}'", row.cohort))?;
        anyhow::ensure!(
            rows[cohort.index()].is_none(),
            "Duplicate cohort label '{}'",
            row.cohort
        );
        rows[cohort.index()] = Some((row.population.max(0.0), row.infected.max(0.0)));
    }

    let mut populations = Vec::with_capacity(NUM_COHORTS);
    let mut infections = Vec::with_capacity(NUM_COHORTS);
    for cohort in Cohort::ALL {
        let (population, infected) = rows[cohort.index()]
            .with_context(|| format!("Missing cohort '{}' in roster", cohort.label()))?;
        populations.push(population);
        infections.push(infected);
    }
    Ok((populations, infections))
}
