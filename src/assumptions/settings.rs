//! Global financial assumptions shared by every property projection

use serde::{Deserialize, Serialize};

/// Default rent for a bedroom-type label
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RentalAssumption {
    /// Bedroom-type label, e.g. "2 Bedroom"
    #[serde(rename = "type")]
    pub bedroom_type: String,

    /// Monthly whole-unit rent
    pub rent: f64,
}

impl RentalAssumption {
    pub fn new(bedroom_type: impl Into<String>, rent: f64) -> Self {
        Self {
            bedroom_type: bedroom_type.into(),
            rent,
        }
    }

    fn matches(&self, bedroom_type: &str) -> bool {
        self.bedroom_type.trim().eq_ignore_ascii_case(bedroom_type.trim())
    }
}

/// Short-stay occupancy tiers, all in percent
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct AirbnbOccupancy {
    pub current: f64,
    pub best: f64,
    pub worst: f64,
}

impl Default for AirbnbOccupancy {
    fn default() -> Self {
        Self {
            current: 60.0,
            best: 80.0,
            worst: 40.0,
        }
    }
}

/// Process-wide assumptions. Every percentage is expressed in percent (4.5 = 4.5%).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct GlobalSettings {
    /// Annual mortgage interest rate
    pub interest_rate: f64,

    /// Loan tenure in years
    pub loan_tenure: f64,

    /// Co-living operator's cut of rental income
    pub management_fee_percent: f64,

    /// Maintenance and sinking fund per square foot per month
    pub maintenance_fee_psf: f64,

    /// Annual rate of the capped government loan scheme
    pub lppsa_interest_rate: f64,

    /// Short-stay operator's cut of nightly income
    pub airbnb_operator_fee: f64,

    pub airbnb_occupancy: AirbnbOccupancy,

    /// Ordered rent defaults; the first matching bedroom type wins
    pub rental_assumptions: Vec<RentalAssumption>,
}

impl Default for GlobalSettings {
    fn default() -> Self {
        Self {
            interest_rate: 4.5,
            loan_tenure: 35.0,
            management_fee_percent: 10.0,
            maintenance_fee_psf: 0.35,
            lppsa_interest_rate: 4.0,
            airbnb_operator_fee: 20.0,
            airbnb_occupancy: AirbnbOccupancy::default(),
            rental_assumptions: vec![
                RentalAssumption::new("Studio", 1500.0),
                RentalAssumption::new("1 Bedroom", 1800.0),
                RentalAssumption::new("2 Bedroom", 2200.0),
                RentalAssumption::new("3 Bedroom", 2800.0),
            ],
        }
    }
}

impl GlobalSettings {
    /// Default rent for a bedroom-type label (case-insensitive, surrounding whitespace ignored)
    pub fn rental_for(&self, bedroom_type: &str) -> Option<f64> {
        self.rental_assumptions
            .iter()
            .find(|assumption| assumption.matches(bedroom_type))
            .map(|assumption| assumption.rent)
    }

    /// Parse settings from a JSON document; missing keys take their defaults
    pub fn from_json_str(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }
}
