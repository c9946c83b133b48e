use chrono::{Duration, NaiveDate};

use prisim::model::projection::{FacilityModel, PlannedRelease, ProjectionConfig};
use prisim::{Cohort, Compartment, SpreadIntensity, NUM_COHORTS};

// Same outbreak run twice, with and without a staged release schedule,
// to compare hospital demand.
fn main() -> anyhow::Result<()> {
    let start_date: NaiveDate = "2020-04-01".parse()?;

    let mut populations = vec![0.0; NUM_COHORTS];
    populations[Cohort::Age20To44.index()] = 900.0;
    populations[Cohort::Age45To54.index()] = 300.0;
    populations[Cohort::Age55To64.index()] = 160.0;
    populations[Cohort::Age65To74.index()] = 60.0;
    populations[Cohort::Staff.index()] = 340.0;

    let mut initial_infections = vec![0.0; NUM_COHORTS];
    initial_infections[Cohort::Age20To44.index()] = 15.0;

    let releases = vec![
        PlannedRelease {
            date: Some(start_date + Duration::days(7)),
            count: Some(120.0),
        },
        PlannedRelease {
            date: Some(start_date + Duration::days(14)),
            count: Some(80.0),
        },
        PlannedRelease {
            date: Some(start_date + Duration::days(28)),
            count: Some(60.0),
        },
        // missing date, skipped at resolution
        PlannedRelease {
            date: None,
            count: Some(40.0),
        },
    ];

    let baseline_cfg = ProjectionConfig {
        populations,
        initial_infections,
        num_days: 90,
        dorm_fraction: 0.6,
        occupancy: 0.97,
        spread: SpreadIntensity::High,
        turnover: 0.0,
        planned_releases: None,
        start_date,
    };
    let mut release_cfg = baseline_cfg.clone();
    release_cfg.planned_releases = Some(releases);

    let baseline = FacilityModel::new(baseline_cfg)?.project();
    let staged = FacilityModel::new(release_cfg)?.project();

    println!("day,adjustment,population,hosp_staged,hosp_baseline");
    for day in 0..staged.grid.num_days() {
        println!(
            "{},{:.0},{:.0},{:.1},{:.1}",
            day,
            staged.adjustments_by_day[day],
            staged.total_population_by_day[day],
            staged.grid.facility_total(Compartment::Hospitalized, day),
            baseline.grid.facility_total(Compartment::Hospitalized, day),
        );
    }

    let (_, staged_peak) = staged.peak(Compartment::Hospitalized);
    let (_, baseline_peak) = baseline.peak(Compartment::Hospitalized);
    println!();
    println!(
        "peak hospitalized: staged={:.1} baseline={:.1}",
        staged_peak, baseline_peak
    );

    Ok(())
}
