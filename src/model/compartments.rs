/// Number of disease/outcome compartments tracked per cohort.
pub const NUM_COMPARTMENTS: usize = 10;

/// Number of population cohorts (eight age brackets plus staff).
pub const NUM_COHORTS: usize = 9;

/// Disease/outcome state of an individual. The variant order fixes the
/// storage index used by the daily matrix and the projection grid; it
/// carries no other meaning.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Compartment {
    Susceptible,
    Exposed,
    Infectious,
    /// Symptomatic and isolated from the general population.
    Quarantined,
    Hospitalized,
    Icu,
    /// Post-ICU step-down care before discharge.
    HospitalRecovery,
    Fatalities,
    RecoveredMild,
    RecoveredHospitalized,
}

impl Compartment {
    pub const ALL: [Compartment; NUM_COMPARTMENTS] = [
        Compartment::Susceptible,
        Compartment::Exposed,
        Compartment::Infectious,
        Compartment::Quarantined,
        Compartment::Hospitalized,
        Compartment::Icu,
        Compartment::HospitalRecovery,
        Compartment::Fatalities,
        Compartment::RecoveredMild,
        Compartment::RecoveredHospitalized,
    ];

    pub fn index(self) -> usize {
        self as usize
    }

    pub fn label(self) -> &'static str {
        match self {
            Compartment::Susceptible => "susceptible",
            Compartment::Exposed => "exposed",
            Compartment::Infectious => "infectious",
            Compartment::Quarantined => "quarantined",
            Compartment::Hospitalized => "hospitalized",
            Compartment::Icu => "icu",
            Compartment::HospitalRecovery => "hospital_recovery",
            Compartment::Fatalities => "fatalities",
            Compartment::RecoveredMild => "recovered_mild",
            Compartment::RecoveredHospitalized => "recovered_hospitalized",
        }
    }
}

/// Population partition: eight age brackets (including an unknown-age
/// bucket) plus facility staff. Input sequences are index-aligned with
/// `Cohort::ALL`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Cohort {
    AgeUnknown,
    Age0To19,
    Age20To44,
    Age45To54,
    Age55To64,
    Age65To74,
    Age75To84,
    Age85Plus,
    Staff,
}

impl Cohort {
    pub const ALL: [Cohort; NUM_COHORTS] = [
        Cohort::AgeUnknown,
        Cohort::Age0To19,
        Cohort::Age20To44,
        Cohort::Age45To54,
        Cohort::Age55To64,
        Cohort::Age65To74,
        Cohort::Age75To84,
        Cohort::Age85Plus,
        Cohort::Staff,
    ];

    pub fn index(self) -> usize {
        self as usize
    }

    pub fn is_staff(self) -> bool {
        matches!(self, Cohort::Staff)
    }

    /// Fraction of this cohort's hospitalized cases that die. Staff are
    /// assigned the unknown-age rate.
    pub fn fatality_rate(self) -> f64 {
        match self {
            Cohort::AgeUnknown => 0.026,
            Cohort::Age0To19 => 0.0,
            Cohort::Age20To44 => 0.0015,
            Cohort::Age45To54 => 0.0065,
            Cohort::Age55To64 => 0.02,
            Cohort::Age65To74 => 0.038,
            Cohort::Age75To84 => 0.074,
            Cohort::Age85Plus => 0.1885,
            Cohort::Staff => 0.026,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Cohort::AgeUnknown => "unknown",
            Cohort::Age0To19 => "0-19",
            Cohort::Age20To44 => "20-44",
            Cohort::Age45To54 => "45-54",
            Cohort::Age55To64 => "55-64",
            Cohort::Age65To74 => "65-74",
            Cohort::Age75To84 => "75-84",
            Cohort::Age85Plus => "85+",
            Cohort::Staff => "staff",
        }
    }

    pub fn from_label(label: &str) -> Option<Cohort> {
        Cohort::ALL.iter().copied().find(|c| c.label() == label)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn indices_are_contiguous() {
        for (i, c) in Compartment::ALL.iter().enumerate() {
            assert_eq!(c.index(), i);
        }
        for (i, g) in Cohort::ALL.iter().enumerate() {
            assert_eq!(g.index(), i);
        }
    }

    #[test]
    fn staff_share_the_unknown_age_fatality_rate() {
        assert_eq!(
            Cohort::Staff.fatality_rate(),
            Cohort::AgeUnknown.fatality_rate()
        );
    }

    #[test]
    fn labels_round_trip() {
        for g in Cohort::ALL {
            assert_eq!(Cohort::from_label(g.label()), Some(g));
        }
        assert_eq!(Cohort::from_label("90+"), None);
    }
}
