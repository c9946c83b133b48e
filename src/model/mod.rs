pub mod compartments;
pub mod projection;
pub mod rates;
pub mod step;
