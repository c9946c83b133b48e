//! Occupancy-adjusted transmission intensities.
//!
//! Each spread level maps to base reproduction numbers for the two
//! housing types (shared cells vs dormitories). An under-occupied
//! facility has fewer effective contacts, so the base value is pulled
//! linearly toward a fixed floor as occupancy drops.

use serde::{Deserialize, Serialize};

/// Categorical spread level selecting the base reproduction numbers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SpreadIntensity {
    Low,
    Moderate,
    High,
}

impl SpreadIntensity {
    /// Base R0 for populations housed in shared cells.
    pub fn base_r0_cells(self) -> f64 {
        match self {
            SpreadIntensity::Low => 2.4,
            SpreadIntensity::Moderate => 3.0,
            SpreadIntensity::High => 3.7,
        }
    }

    /// Base R0 for populations housed in dormitories.
    pub fn base_r0_dorms(self) -> f64 {
        match self {
            SpreadIntensity::Low => 3.0,
            SpreadIntensity::Moderate => 5.0,
            SpreadIntensity::High => 7.0,
        }
    }

    /// Lowercase name, matching the serialized form.
    pub fn label(self) -> &'static str {
        match self {
            SpreadIntensity::Low => "low",
            SpreadIntensity::Moderate => "moderate",
            SpreadIntensity::High => "high",
        }
    }
}

/// R0 floor reached by cell housing at zero occupancy.
pub const R0_CELLS_FLOOR: f64 = 0.8;
/// R0 floor reached by dormitory housing at zero occupancy.
pub const R0_DORMS_FLOOR: f64 = 1.7;

/// Transmission intensities for the two housing types after the
/// occupancy adjustment.
#[derive(Debug, Clone, Copy)]
pub struct TransmissionRates {
    pub cells: f64,
    pub dorms: f64,
}

/// Adjust the base reproduction numbers for facility occupancy:
/// `base - (1 - occupancy) * (base - floor)`. At occupancy 1 this is the
/// base value, at occupancy 0 the floor. Occupancy outside [0,1] is not
/// rejected here; it simply extrapolates the line.
pub fn occupancy_adjusted(spread: SpreadIntensity, occupancy: f64) -> TransmissionRates {
    TransmissionRates {
        cells: toward_floor(spread.base_r0_cells(), R0_CELLS_FLOOR, occupancy),
        dorms: toward_floor(spread.base_r0_dorms(), R0_DORMS_FLOOR, occupancy),
    }
}

fn toward_floor(base: f64, floor: f64, occupancy: f64) -> f64 {
    base - (1.0 - occupancy) * (base - floor)
}
