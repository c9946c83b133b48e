use chrono::NaiveDate;

use prisim::model::projection::{FacilityModel, ProjectionConfig};
use prisim::{Cohort, Compartment, SpreadIntensity, NUM_COHORTS};

fn main() -> anyhow::Result<()> {
    // Mid-size facility near full occupancy with cases already inside.
    let mut populations = vec![0.0; NUM_COHORTS];
    populations[Cohort::AgeUnknown.index()] = 12.0;
    populations[Cohort::Age0To19.index()] = 40.0;
    populations[Cohort::Age20To44.index()] = 780.0;
    populations[Cohort::Age45To54.index()] = 260.0;
    populations[Cohort::Age55To64.index()] = 140.0;
    populations[Cohort::Age65To74.index()] = 48.0;
    populations[Cohort::Age75To84.index()] = 14.0;
    populations[Cohort::Age85Plus.index()] = 4.0;
    populations[Cohort::Staff.index()] = 310.0;

    let mut initial_infections = vec![0.0; NUM_COHORTS];
    initial_infections[Cohort::Age20To44.index()] = 12.0;
    initial_infections[Cohort::Staff.index()] = 2.0;

    let start_date: NaiveDate = "2020-04-01".parse()?;

    let cfg = ProjectionConfig {
        populations,
        initial_infections,
        num_days: 120,
        dorm_fraction: 0.45,
        occupancy: 0.92,
        spread: SpreadIntensity::Moderate,
        turnover: 0.6, // annual churn typical of a jail, not a prison
        planned_releases: None,
        start_date,
    };

    let model = FacilityModel::new(cfg)?;
    let projection = model.project();

    println!("day,population,infectious,hospitalized,icu,fatalities");
    for day in 0..projection.grid.num_days() {
        println!(
            "{},{:.0},{:.1},{:.1},{:.1},{:.1}",
            day,
            projection.total_population_by_day[day],
            projection.grid.facility_total(Compartment::Infectious, day),
            projection.grid.facility_total(Compartment::Hospitalized, day),
            projection.grid.facility_total(Compartment::Icu, day),
            projection.grid.facility_total(Compartment::Fatalities, day),
        );
    }

    let (hosp_day, hosp_peak) = projection.peak(Compartment::Hospitalized);
    let (icu_day, icu_peak) = projection.peak(Compartment::Icu);
    println!();
    println!("peak_hospitalized={:.1} (day {})", hosp_peak, hosp_day);
    println!("peak_icu={:.1} (day {})", icu_peak, icu_day);

    Ok(())
}
