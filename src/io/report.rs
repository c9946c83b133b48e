use anyhow::Context;

use crate::model::compartments::Compartment;
use crate::model::projection::{Projection, ProjectionConfig};

/// Write a plain-text run report: `key=value` header lines, a blank
/// line, then one CSV row per simulated day with the facility-wide
/// occupancy of the headline compartments. Returns the report path.
pub fn write_projection_report(
    out_dir: impl AsRef<std::path::Path>,
    run_id: &str,
    cfg: &ProjectionConfig,
    projection: &Projection,
) -> anyhow::Result<std::path::PathBuf> {
    use std::io::Write;

    std::fs::create_dir_all(out_dir.as_ref()).context("create report dir failed")?;
    let path = out_dir.as_ref().join(format!("projection_{}.txt", run_id));
    let mut f = std::fs::File::create(&path)
        .with_context(|| format!("create report file failed (path={:?})", path))?;

    writeln!(f, "run_id={}", run_id)?;
    writeln!(f, "num_days={}", cfg.num_days)?;
    writeln!(f, "spread={}", cfg.spread.label())?;
    writeln!(f, "occupancy={:.4}", cfg.occupancy)?;
    writeln!(f, "dorm_fraction={:.4}", cfg.dorm_fraction)?;
    writeln!(f, "turnover={:.4}", cfg.turnover)?;
    writeln!(f, "start_date={}", cfg.start_date)?;
    writeln!(f)?;
    writeln!(
        f,
        "day,population,infectious,hospitalized,icu,fatalities,adjustment"
    )?;

    for day in 0..projection.grid.num_days() {
        writeln!(
            f,
            "{},{:.1},{:.3},{:.3},{:.3},{:.3},{:.1}",
            day,
            projection.total_population_by_day[day],
            projection.grid.facility_total(Compartment::Infectious, day),
            projection.grid.facility_total(Compartment::Hospitalized, day),
            projection.grid.facility_total(Compartment::Icu, day),
            projection.grid.facility_total(Compartment::Fatalities, day),
            projection.adjustments_by_day[day],
        )?;
    }

    Ok(path)
}
