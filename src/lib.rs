pub mod io;
pub mod model;
pub mod transmission;

pub use model::compartments::{Cohort, Compartment, NUM_COHORTS, NUM_COMPARTMENTS};
pub use model::projection::{
    FacilityModel, PlannedRelease, Projection, ProjectionConfig, ProjectionGrid,
};
pub use model::rates::RateTable;
pub use transmission::{SpreadIntensity, TransmissionRates};
