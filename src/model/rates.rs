//! Epidemiological transition rates.
//!
//! Each rate is (probability of taking that exit) / (mean days spent on
//! that path), so multiplying a compartment count by a rate gives a
//! per-day flow. Durations and probabilities are literature-derived
//! point estimates; the hospitalized exit is the only one whose
//! probabilities vary by cohort (through the cohort fatality rate).

/// Mean days from exposure to becoming infectious.
const D_INCUBATION: f64 = 2.0;
/// Mean infectious period; also the denominator turning a reproduction
/// number into a per-day transmission intensity.
const D_INFECTIOUS: f64 = 4.1;
/// Mean days an asymptomatic case stays infectious before clearing.
const D_ASYMPTOMATIC_CLEARANCE: f64 = 9.5;
/// Mean days from symptom onset to recovery for cases that stay mild.
const D_MILD_RECOVERY: f64 = 9.5;
/// Mean days from symptom onset to hospital admission.
const D_ONSET_TO_ADMISSION: f64 = 5.9;
/// Mean days from admission to ICU transfer.
const D_ADMISSION_TO_ICU: f64 = 2.5;
/// Mean days from admission to discharge for ward-only cases.
const D_ADMISSION_TO_RECOVERY: f64 = 8.6;
/// Mean days from admission to death for fatal ward cases.
const D_ADMISSION_TO_FATALITY: f64 = 10.4;
/// Mean days in ICU for fatal ICU cases.
const D_ICU_TO_FATALITY: f64 = 7.0;
/// Mean days in ICU before step-down for surviving ICU cases.
const D_ICU_TO_STEPDOWN: f64 = 11.0;
/// Mean days in step-down care before discharge.
const D_STEPDOWN_TO_DISCHARGE: f64 = 5.0;

/// Fraction of infections that develop symptoms and are quarantined.
const P_SYMPTOMATIC: f64 = 0.821;
/// Fraction of quarantined cases whose course stays mild.
const P_MILD: f64 = 0.926;
/// Fraction of ICU stays that end in death.
const P_ICU_FATALITY: f64 = 0.4;

/// Fraction of hospitalized cases transferred to ICU. Public because the
/// hospitalized exit split is 1 = icu + recovery + fatality, with the
/// recovery share derived per cohort as `1 - fatality_rate - ICU_FRACTION`.
pub const ICU_FRACTION: f64 = 0.26;

/// Fixed per-day transition rates between compartments.
#[derive(Debug, Clone)]
pub struct RateTable {
    /// exposed -> infectious
    pub exposed_to_infectious: f64,
    /// infectious -> quarantined (symptomatic share)
    pub infectious_to_quarantined: f64,
    /// infectious -> recovered-mild (asymptomatic share)
    pub infectious_to_recovered_mild: f64,
    /// quarantined -> recovered-mild (mild share)
    pub quarantined_to_recovered_mild: f64,
    /// quarantined -> hospitalized
    pub quarantined_to_hospitalized: f64,
    /// hospitalized -> ICU
    pub hospitalized_to_icu: f64,
    /// ICU -> fatalities
    pub icu_to_fatality: f64,
    /// ICU -> post-ICU step-down care
    pub icu_to_hospital_recovery: f64,
    /// step-down care -> recovered-hospitalized
    pub hospital_recovery_to_recovered: f64,
    /// Mean infectious period backing the force-of-infection term.
    pub infectious_period: f64,
}

impl RateTable {
    pub fn baseline() -> Self {
        Self {
            exposed_to_infectious: 1.0 / D_INCUBATION,
            infectious_to_quarantined: P_SYMPTOMATIC / D_INFECTIOUS,
            infectious_to_recovered_mild: (1.0 - P_SYMPTOMATIC) / D_ASYMPTOMATIC_CLEARANCE,
            quarantined_to_recovered_mild: P_MILD / D_MILD_RECOVERY,
            quarantined_to_hospitalized: (1.0 - P_MILD) / D_ONSET_TO_ADMISSION,
            hospitalized_to_icu: ICU_FRACTION / D_ADMISSION_TO_ICU,
            icu_to_fatality: P_ICU_FATALITY / D_ICU_TO_FATALITY,
            icu_to_hospital_recovery: (1.0 - P_ICU_FATALITY) / D_ICU_TO_STEPDOWN,
            hospital_recovery_to_recovered: 1.0 / D_STEPDOWN_TO_DISCHARGE,
            infectious_period: D_INFECTIOUS,
        }
    }

    /// Exit rates from the hospitalized compartment for a cohort with the
    /// given fatality rate: `(to_icu, to_recovered, to_fatality)`. The exit
    /// probabilities are `ICU_FRACTION`, `1 - fatality_rate - ICU_FRACTION`
    /// and `fatality_rate`.
    pub fn hospitalized_exits(&self, fatality_rate: f64) -> (f64, f64, f64) {
        (
            self.hospitalized_to_icu,
            (1.0 - fatality_rate - ICU_FRACTION) / D_ADMISSION_TO_RECOVERY,
            fatality_rate / D_ADMISSION_TO_FATALITY,
        )
    }
}
