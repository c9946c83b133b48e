//! Projection driver: configuration, day-zero seeding, release-schedule
//! resolution and the day loop that fills the output grid.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::compartments::{Cohort, Compartment, NUM_COHORTS, NUM_COMPARTMENTS};
use super::rates::RateTable;
use super::step::{step_cohort, CompartmentVector, DayTotals, StepContext};
use crate::transmission::{occupancy_adjusted, SpreadIntensity};

/// One day's compartment counts for every cohort, rows indexed by
/// `Cohort::index()`. Replaced wholesale at the end of each simulated day.
pub type StateMatrix = [CompartmentVector; NUM_COHORTS];

/// Fraction of the annual turnover realized as same-period intake.
pub const TURNOVER_INTAKE_RATIO: f64 = 0.5;

// Share of a cohort's day-zero cases placed in each infection-stage
// compartment. The shares sum to 1; exposed seeding comes on top as
// cases * exposed_to_infectious.
const SEED_INFECTIOUS: f64 = 0.57;
const SEED_QUARANTINED: f64 = 0.253;
const SEED_HOSPITALIZED: f64 = 0.041;
const SEED_ICU: f64 = 0.012;
const SEED_HOSPITAL_RECOVERY: f64 = 0.004;
const SEED_RECOVERED_MILD: f64 = 0.074;
const SEED_RECOVERED_HOSPITALIZED: f64 = 0.045;
const SEED_FATALITIES: f64 = 0.001;

/// A scheduled future change to the facility headcount. Entries with a
/// missing date or a missing/zero count are tolerated and skipped.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PlannedRelease {
    pub date: Option<NaiveDate>,
    /// Headcount leaving on that date; positive counts reduce population.
    pub count: Option<f64>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProjectionConfig {
    // Per-cohort sequences, index-aligned to Cohort::ALL.
    pub populations: Vec<f64>,
    pub initial_infections: Vec<f64>,

    /// Number of days to project, day zero included.
    pub num_days: usize,

    // Facility parameters
    pub dorm_fraction: f64,
    pub occupancy: f64,
    pub spread: SpreadIntensity,
    /// Annual population turnover as a fraction of the standing population.
    pub turnover: f64,

    pub planned_releases: Option<Vec<PlannedRelease>>,
    /// Reference date against which release dates resolve to day offsets.
    pub start_date: NaiveDate,
}

impl ProjectionConfig {
    /// Shape validation only. Out-of-range values (negative populations,
    /// occupancy outside [0,1]) are the caller's responsibility.
    pub fn check(&self) -> anyhow::Result<()> {
        anyhow::ensure!(
            self.populations.len() == NUM_COHORTS,
            "populations.len != {NUM_COHORTS}"
        );
        anyhow::ensure!(
            self.initial_infections.len() == NUM_COHORTS,
            "initial_infections.len != {NUM_COHORTS}"
        );
        anyhow::ensure!(self.num_days >= 1, "num_days must be >= 1");
        Ok(())
    }
}

/// Apply the turnover intake adjustment to each cohort's starting
/// population. Staff head count is not subject to turnover.
pub fn turnover_adjusted(populations: &[f64], turnover: f64) -> Vec<f64> {
    Cohort::ALL
        .iter()
        .zip(populations)
        .map(|(cohort, pop)| {
            if cohort.is_staff() {
                *pop
            } else {
                pop + pop * (turnover * TURNOVER_INTAKE_RATIO)
            }
        })
        .collect()
}

fn resolve_releases(
    releases: &[PlannedRelease],
    reference: NaiveDate,
    num_days: usize,
) -> Vec<f64> {
    let mut adjustments = vec![0.0; num_days];
    for release in releases {
        let (date, count) = match (release.date, release.count) {
            (Some(date), Some(count)) if count != 0.0 => (date, count),
            _ => continue,
        };
        let offset = (date - reference).num_days();
        if offset < 0 || offset >= num_days as i64 {
            continue;
        }
        // Departures are recorded as negative population adjustments.
        adjustments[offset as usize] -= count;
    }
    adjustments
}

fn seed_cohort(population: f64, cases: f64, rates: &RateTable) -> CompartmentVector {
    let exposed = cases * rates.exposed_to_infectious;
    let mut row = [0.0; NUM_COMPARTMENTS];
    row[Compartment::Susceptible.index()] = population - cases - exposed;
    row[Compartment::Exposed.index()] = exposed;
    row[Compartment::Infectious.index()] = cases * SEED_INFECTIOUS;
    row[Compartment::Quarantined.index()] = cases * SEED_QUARANTINED;
    row[Compartment::Hospitalized.index()] = cases * SEED_HOSPITALIZED;
    row[Compartment::Icu.index()] = cases * SEED_ICU;
    row[Compartment::HospitalRecovery.index()] = cases * SEED_HOSPITAL_RECOVERY;
    row[Compartment::Fatalities.index()] = cases * SEED_FATALITIES;
    row[Compartment::RecoveredMild.index()] = cases * SEED_RECOVERED_MILD;
    row[Compartment::RecoveredHospitalized.index()] = cases * SEED_RECOVERED_HOSPITALIZED;
    row
}

fn day_totals(state: &StateMatrix, prior_population: f64) -> DayTotals {
    let mut infectious = 0.0;
    let mut susceptible_non_staff = 0.0;
    for cohort in Cohort::ALL {
        let row = &state[cohort.index()];
        infectious += row[Compartment::Infectious.index()];
        if !cohort.is_staff() {
            susceptible_non_staff += row[Compartment::Susceptible.index()];
        }
    }
    DayTotals {
        infectious,
        population: prior_population,
        susceptible_non_staff,
    }
}

/// Dense output accumulator addressable by (compartment, day, cohort),
/// stored as a flat buffer with computed offsets.
#[derive(Debug, Clone)]
pub struct ProjectionGrid {
    num_days: usize,
    values: Vec<f64>,
}

impl ProjectionGrid {
    fn new(num_days: usize) -> Self {
        Self {
            num_days,
            values: vec![0.0; NUM_COMPARTMENTS * num_days * NUM_COHORTS],
        }
    }

    fn offset(&self, compartment: Compartment, day: usize, cohort: Cohort) -> usize {
        (compartment.index() * self.num_days + day) * NUM_COHORTS + cohort.index()
    }

    pub fn num_days(&self) -> usize {
        self.num_days
    }

    pub fn get(&self, compartment: Compartment, day: usize, cohort: Cohort) -> f64 {
        self.values[self.offset(compartment, day, cohort)]
    }

    /// Facility-wide total for one compartment on one day.
    pub fn facility_total(&self, compartment: Compartment, day: usize) -> f64 {
        Cohort::ALL
            .iter()
            .map(|cohort| self.get(compartment, day, *cohort))
            .sum()
    }

    fn write_day(&mut self, day: usize, state: &StateMatrix) {
        for compartment in Compartment::ALL {
            for cohort in Cohort::ALL {
                let idx = self.offset(compartment, day, cohort);
                self.values[idx] = state[cohort.index()][compartment.index()];
            }
        }
    }
}

/// Completed projection: the grid plus the two per-day sequences.
#[derive(Debug, Clone)]
pub struct Projection {
    pub grid: ProjectionGrid,
    pub total_population_by_day: Vec<f64>,
    /// Resolved signed population change per day; index 0 is recorded but
    /// never applied, since day zero is seeded rather than stepped.
    pub adjustments_by_day: Vec<f64>,
}

impl Projection {
    /// Facility-wide daily totals for one compartment.
    pub fn daily_totals(&self, compartment: Compartment) -> Vec<f64> {
        (0..self.grid.num_days())
            .map(|day| self.grid.facility_total(compartment, day))
            .collect()
    }

    /// Day and value of the highest facility-wide total for one
    /// compartment. Ties resolve to the earliest day.
    pub fn peak(&self, compartment: Compartment) -> (usize, f64) {
        let mut peak_day = 0;
        let mut peak_value = self.grid.facility_total(compartment, 0);
        for day in 1..self.grid.num_days() {
            let value = self.grid.facility_total(compartment, day);
            if value > peak_value {
                peak_day = day;
                peak_value = value;
            }
        }
        (peak_day, peak_value)
    }
}

pub struct FacilityModel {
    pub cfg: ProjectionConfig,
}

impl FacilityModel {
    pub fn new(cfg: ProjectionConfig) -> anyhow::Result<Self> {
        cfg.check()?;
        Ok(Self { cfg })
    }

    /// Run the full projection. Pure computation, no I/O, no failure
    /// modes beyond the degenerate-arithmetic substitutions in the step.
    pub fn project(&self) -> Projection {
        let cfg = &self.cfg;
        let rates = RateTable::baseline();
        let transmission = occupancy_adjusted(cfg.spread, cfg.occupancy);
        let populations = turnover_adjusted(&cfg.populations, cfg.turnover);
        let releases = cfg.planned_releases.as_deref().unwrap_or(&[]);
        let adjustments = resolve_releases(releases, cfg.start_date, cfg.num_days);

        let mut grid = ProjectionGrid::new(cfg.num_days);
        let mut state: StateMatrix = [[0.0; NUM_COMPARTMENTS]; NUM_COHORTS];
        for cohort in Cohort::ALL {
            state[cohort.index()] = seed_cohort(
                populations[cohort.index()],
                cfg.initial_infections[cohort.index()],
                &rates,
            );
        }
        grid.write_day(0, &state);

        let mut total_population_by_day = Vec::with_capacity(cfg.num_days);
        total_population_by_day.push(populations.iter().sum());

        for day in 1..cfg.num_days {
            // Aggregates come from the finalized prior day; the population
            // denominator is the prior day's total, not this day's.
            let totals = day_totals(&state, total_population_by_day[day - 1]);
            let ctx = StepContext {
                rates: &rates,
                transmission,
                dorm_fraction: cfg.dorm_fraction,
                totals,
                adjustment: adjustments[day],
            };
            let mut next: StateMatrix = [[0.0; NUM_COMPARTMENTS]; NUM_COHORTS];
            for cohort in Cohort::ALL {
                next[cohort.index()] = step_cohort(&state[cohort.index()], cohort, &ctx);
            }
            state = next;
            grid.write_day(day, &state);
            total_population_by_day.push(total_population_by_day[day - 1] + adjustments[day]);
        }

        Projection {
            grid,
            total_population_by_day,
            adjustments_by_day: adjustments,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn turnover_boosts_every_cohort_except_staff() {
        let populations = vec![100.0; NUM_COHORTS];
        let adjusted = turnover_adjusted(&populations, 0.4);
        for cohort in Cohort::ALL {
            let expected = if cohort.is_staff() { 100.0 } else { 120.0 };
            assert_relative_eq!(adjusted[cohort.index()], expected, max_relative = 1e-12);
        }
    }

    #[test]
    fn zero_turnover_is_identity() {
        let populations: Vec<f64> = (0..NUM_COHORTS).map(|i| 50.0 * i as f64).collect();
        assert_eq!(turnover_adjusted(&populations, 0.0), populations);
    }

    #[test]
    fn release_resolution_places_and_accumulates() {
        let reference = date(2020, 4, 1);
        let releases = [
            PlannedRelease {
                date: Some(date(2020, 4, 4)),
                count: Some(50.0),
            },
            PlannedRelease {
                date: Some(date(2020, 4, 4)),
                count: Some(20.0),
            },
            PlannedRelease {
                date: Some(date(2020, 4, 8)),
                count: Some(10.0),
            },
        ];
        let adjustments = resolve_releases(&releases, reference, 10);
        assert_eq!(adjustments[3], -70.0);
        assert_eq!(adjustments[7], -10.0);
        assert_eq!(adjustments.iter().filter(|a| **a != 0.0).count(), 2);
    }

    #[test]
    fn release_resolution_drops_malformed_and_out_of_horizon() {
        let reference = date(2020, 4, 1);
        let releases = [
            // missing date
            PlannedRelease {
                date: None,
                count: Some(25.0),
            },
            // missing count
            PlannedRelease {
                date: Some(date(2020, 4, 2)),
                count: None,
            },
            // zero count
            PlannedRelease {
                date: Some(date(2020, 4, 2)),
                count: Some(0.0),
            },
            // before the reference date
            PlannedRelease {
                date: Some(date(2020, 3, 20)),
                count: Some(5.0),
            },
            // beyond the horizon
            PlannedRelease {
                date: Some(date(2020, 4, 30)),
                count: Some(5.0),
            },
        ];
        let adjustments = resolve_releases(&releases, reference, 10);
        assert!(adjustments.iter().all(|a| *a == 0.0));
    }

    #[test]
    fn seeding_splits_cases_and_conserves_population() {
        let rates = RateTable::baseline();
        let row = seed_cohort(1000.0, 100.0, &rates);
        let exposed = 100.0 * rates.exposed_to_infectious;
        assert_relative_eq!(
            row[Compartment::Susceptible.index()],
            1000.0 - 100.0 - exposed,
            max_relative = 1e-12
        );
        assert_relative_eq!(
            row[Compartment::Infectious.index()],
            57.0,
            max_relative = 1e-12
        );
        assert_relative_eq!(row.iter().sum::<f64>(), 1000.0, max_relative = 1e-12);
    }

    #[test]
    fn check_rejects_bad_shapes() {
        let mut cfg = ProjectionConfig {
            populations: vec![100.0; NUM_COHORTS],
            initial_infections: vec![0.0; NUM_COHORTS],
            num_days: 30,
            dorm_fraction: 0.3,
            occupancy: 1.0,
            spread: SpreadIntensity::Moderate,
            turnover: 0.0,
            planned_releases: None,
            start_date: date(2020, 4, 1),
        };
        assert!(cfg.check().is_ok());

        cfg.populations.pop();
        assert!(cfg.check().is_err());
        cfg.populations.push(100.0);

        cfg.initial_infections.push(0.0);
        assert!(cfg.check().is_err());
        cfg.initial_infections.pop();

        cfg.num_days = 0;
        assert!(cfg.check().is_err());
    }

    #[test]
    fn grid_round_trips_a_written_day() {
        let mut grid = ProjectionGrid::new(4);
        let mut state: StateMatrix = [[0.0; NUM_COMPARTMENTS]; NUM_COHORTS];
        state[Cohort::Age20To44.index()][Compartment::Hospitalized.index()] = 12.5;
        grid.write_day(2, &state);
        assert_eq!(
            grid.get(Compartment::Hospitalized, 2, Cohort::Age20To44),
            12.5
        );
        assert_eq!(grid.get(Compartment::Hospitalized, 1, Cohort::Age20To44), 0.0);
        assert_eq!(grid.facility_total(Compartment::Hospitalized, 2), 12.5);
    }

    #[test]
    fn peak_reports_earliest_day_on_ties() {
        let mut grid = ProjectionGrid::new(3);
        let mut state: StateMatrix = [[0.0; NUM_COMPARTMENTS]; NUM_COHORTS];
        state[Cohort::Staff.index()][Compartment::Icu.index()] = 4.0;
        grid.write_day(0, &state);
        grid.write_day(1, &state);
        let projection = Projection {
            grid,
            total_population_by_day: vec![4.0; 3],
            adjustments_by_day: vec![0.0; 3],
        };
        assert_eq!(projection.peak(Compartment::Icu), (0, 4.0));
    }
}
