//! Single-cohort daily transition.
//!
//! Advances one cohort's compartment vector by one day, given the
//! facility-wide aggregates computed from the previous day's finalized
//! matrix. Within a day, cohorts read only those aggregates and their
//! own prior-day row, so the driver may update them in any fixed order.

use log::warn;

use super::compartments::{Cohort, Compartment, NUM_COMPARTMENTS};
use super::rates::RateTable;
use crate::transmission::TransmissionRates;

/// One cohort's compartment counts for a single day, indexed by
/// `Compartment::index()`.
pub type CompartmentVector = [f64; NUM_COMPARTMENTS];

/// Facility-wide aggregates from the previous finalized day.
#[derive(Debug, Clone, Copy)]
pub struct DayTotals {
    /// Infectious individuals across all cohorts.
    pub infectious: f64,
    /// Total population across all cohorts and compartments.
    pub population: f64,
    /// Susceptible individuals across the non-staff cohorts; the pool
    /// over which a day's population adjustment is distributed.
    pub susceptible_non_staff: f64,
}

/// Per-day inputs shared by every cohort's transition.
#[derive(Debug, Clone, Copy)]
pub struct StepContext<'a> {
    pub rates: &'a RateTable,
    pub transmission: TransmissionRates,
    /// Share of the incarcerated population housed in dormitories.
    pub dorm_fraction: f64,
    pub totals: DayTotals,
    /// Signed population change scheduled for this day.
    pub adjustment: f64,
}

/// Compute the next day's compartment vector for one cohort.
///
/// Staff exposure uses the cell-housing intensity only and ignores the
/// population adjustment; non-staff cohorts first absorb their
/// proportional share of the adjustment into the susceptible pool, then
/// split exposure between the two housing types. A degenerate exposure
/// term (0/0 when the facility is empty, or overflow) is replaced with
/// zero so the projection always completes.
pub fn step_cohort(
    current: &CompartmentVector,
    cohort: Cohort,
    ctx: &StepContext,
) -> CompartmentVector {
    let rates = ctx.rates;
    let totals = ctx.totals;

    let mut susceptible = current[Compartment::Susceptible.index()];
    let new_exposures = if cohort.is_staff() {
        let beta = ctx.transmission.cells / rates.infectious_period;
        guard_finite(
            beta * totals.infectious * susceptible / totals.population,
            cohort,
        )
    } else {
        let share = if totals.susceptible_non_staff > 0.0 {
            susceptible / totals.susceptible_non_staff
        } else {
            0.0
        };
        susceptible += ctx.adjustment * share;

        let beta_cells = ctx.transmission.cells / rates.infectious_period;
        let beta_dorms = ctx.transmission.dorms / rates.infectious_period;
        let pressure = totals.infectious * susceptible / totals.population;
        guard_finite(
            beta_cells * (1.0 - ctx.dorm_fraction) * pressure
                + beta_dorms * ctx.dorm_fraction * pressure,
            cohort,
        )
    };

    let exposed = current[Compartment::Exposed.index()];
    let infectious = current[Compartment::Infectious.index()];
    let quarantined = current[Compartment::Quarantined.index()];
    let hospitalized = current[Compartment::Hospitalized.index()];
    let icu = current[Compartment::Icu.index()];
    let hospital_recovery = current[Compartment::HospitalRecovery.index()];

    let (rate_to_icu, rate_to_recovered, rate_to_fatality) =
        rates.hospitalized_exits(cohort.fatality_rate());

    // Per-day flows out of each compartment.
    let exposed_to_infectious = rates.exposed_to_infectious * exposed;
    let infectious_to_quarantined = rates.infectious_to_quarantined * infectious;
    let infectious_to_recovered = rates.infectious_to_recovered_mild * infectious;
    let quarantined_to_recovered = rates.quarantined_to_recovered_mild * quarantined;
    let quarantined_to_hospitalized = rates.quarantined_to_hospitalized * quarantined;
    let hospitalized_to_icu = rate_to_icu * hospitalized;
    let hospitalized_to_recovered = rate_to_recovered * hospitalized;
    let hospitalized_to_fatality = rate_to_fatality * hospitalized;
    let icu_to_fatality = rates.icu_to_fatality * icu;
    let icu_to_stepdown = rates.icu_to_hospital_recovery * icu;
    let stepdown_to_recovered = rates.hospital_recovery_to_recovered * hospital_recovery;

    let mut next = [0.0; NUM_COMPARTMENTS];
    // Susceptible is the only compartment whose delta is strictly
    // non-positive, so it alone can overshoot past zero and is clamped.
    next[Compartment::Susceptible.index()] = (susceptible - new_exposures).max(0.0);
    next[Compartment::Exposed.index()] = exposed + new_exposures - exposed_to_infectious;
    next[Compartment::Infectious.index()] =
        infectious + exposed_to_infectious - infectious_to_quarantined - infectious_to_recovered;
    next[Compartment::Quarantined.index()] =
        quarantined + infectious_to_quarantined - quarantined_to_recovered
            - quarantined_to_hospitalized;
    next[Compartment::Hospitalized.index()] = hospitalized + quarantined_to_hospitalized
        - hospitalized_to_icu
        - hospitalized_to_recovered
        - hospitalized_to_fatality;
    next[Compartment::Icu.index()] = icu + hospitalized_to_icu - icu_to_fatality - icu_to_stepdown;
    next[Compartment::HospitalRecovery.index()] =
        hospital_recovery + icu_to_stepdown - stepdown_to_recovered;
    next[Compartment::Fatalities.index()] = current[Compartment::Fatalities.index()]
        + hospitalized_to_fatality
        + icu_to_fatality;
    next[Compartment::RecoveredMild.index()] = current[Compartment::RecoveredMild.index()]
        + infectious_to_recovered
        + quarantined_to_recovered;
    next[Compartment::RecoveredHospitalized.index()] = current
        [Compartment::RecoveredHospitalized.index()]
        + hospitalized_to_recovered
        + stepdown_to_recovered;
    next
}

fn guard_finite(new_exposures: f64, cohort: Cohort) -> f64 {
    if new_exposures.is_finite() {
        new_exposures
    } else {
        warn!(
            "non-finite exposure term for cohort {} replaced with 0",
            cohort.label()
        );
        0.0
    }
}
