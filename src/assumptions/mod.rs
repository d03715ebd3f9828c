//! Financial assumptions: interest, tenure, fees, occupancy tiers and rent defaults

mod settings;
pub mod loader;

pub use settings::{AirbnbOccupancy, GlobalSettings, RentalAssumption};
pub use loader::{load_settings, load_settings_or_default, DEFAULT_SETTINGS_PATH};
