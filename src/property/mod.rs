//! Property records, maintenance defaults, and loading

mod data;
pub mod discovery;
pub mod loader;

pub use data::{round2, MaintenanceCharge, Property};
pub use discovery::{properties_from_candidates, CandidateLayout, CandidateProperty};
pub use loader::{load_properties, load_properties_from_reader};
