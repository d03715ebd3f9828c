//! Property data structures

use serde::{Deserialize, Serialize};

use crate::assumptions::GlobalSettings;

/// Round to two decimal places (cents)
pub fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

/// Monthly maintenance and sinking fund charge.
///
/// The value defaults to `size × fee_psf` and is recomputed whenever either
/// input changes, unless the user has typed in their own figure. A manual
/// figure sticks until [`MaintenanceCharge::clear_override`] is called.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MaintenanceCharge {
    value: f64,
    is_manually_overridden: bool,
}

impl MaintenanceCharge {
    /// Computed default for the given size and fee per square foot
    pub fn computed(size: f64, fee_psf: f64) -> Self {
        Self {
            value: round2(size * fee_psf),
            is_manually_overridden: false,
        }
    }

    /// A user-entered figure
    pub fn manual(value: f64) -> Self {
        Self {
            value,
            is_manually_overridden: true,
        }
    }

    pub fn value(&self) -> f64 {
        self.value
    }

    pub fn is_manually_overridden(&self) -> bool {
        self.is_manually_overridden
    }

    /// Recompute from dependencies; no-op while overridden
    pub fn recompute(&mut self, size: f64, fee_psf: f64) {
        if !self.is_manually_overridden {
            self.value = round2(size * fee_psf);
        }
    }

    pub fn override_with(&mut self, value: f64) {
        self.value = value;
        self.is_manually_overridden = true;
    }

    /// Drop the manual figure and go back to the computed default
    pub fn clear_override(&mut self, size: f64, fee_psf: f64) {
        self.is_manually_overridden = false;
        self.recompute(size, fee_psf);
    }
}

/// One unit or layout being evaluated
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Property {
    /// Unique identifier within a session
    pub id: u32,

    /// Development or project name
    pub name: String,

    /// Descriptive type, e.g. "Condominium" or "Serviced Apartment"
    #[serde(rename = "type")]
    pub property_type: String,

    /// Layout label, e.g. "2 Bedroom"; matched against rental assumptions
    pub bedrooms_type: String,

    /// Built-up size in square feet
    pub size: f64,

    /// Contractual (sale and purchase agreement) price
    pub spa_price: f64,

    /// Per-square-foot valuation price
    pub valuation_psf: f64,

    /// Per-square-foot net price after rebates and discounts
    pub net_psf: f64,

    pub whole_unit_rental: f64,
    pub co_living_rental: f64,
    pub airbnb_rental_per_night: f64,

    pub maintenance_sinking: MaintenanceCharge,
    pub wifi: f64,
}

impl Property {
    /// Create a property with zeroed money fields and a computed maintenance charge
    pub fn new(
        id: u32,
        name: impl Into<String>,
        bedrooms_type: impl Into<String>,
        size: f64,
        settings: &GlobalSettings,
    ) -> Self {
        Self {
            id,
            name: name.into(),
            property_type: String::new(),
            bedrooms_type: bedrooms_type.into(),
            size,
            spa_price: 0.0,
            valuation_psf: 0.0,
            net_psf: 0.0,
            whole_unit_rental: 0.0,
            co_living_rental: 0.0,
            airbnb_rental_per_night: 0.0,
            maintenance_sinking: MaintenanceCharge::computed(size, settings.maintenance_fee_psf),
            wifi: 0.0,
        }
    }

    /// Monthly maintenance and sinking fund charge currently in effect
    pub fn maintenance(&self) -> f64 {
        self.maintenance_sinking.value()
    }

    /// Change the size and refresh the maintenance default
    pub fn set_size(&mut self, size: f64, fee_psf: f64) {
        self.size = size;
        self.maintenance_sinking.recompute(size, fee_psf);
    }

    /// React to a change of the maintenance fee per square foot assumption
    pub fn apply_maintenance_fee_psf(&mut self, fee_psf: f64) {
        self.maintenance_sinking.recompute(self.size, fee_psf);
    }

    /// Direct edit of the maintenance charge
    pub fn set_maintenance(&mut self, value: f64) {
        self.maintenance_sinking.override_with(value);
    }

    /// Fill the whole-unit rent from the settings when none has been entered.
    /// Returns whether a default was applied.
    pub fn apply_rental_default(&mut self, settings: &GlobalSettings) -> bool {
        if self.whole_unit_rental > 0.0 {
            return false;
        }
        match settings.rental_for(&self.bedrooms_type) {
            Some(rent) => {
                self.whole_unit_rental = rent;
                true
            }
            None => false,
        }
    }

    /// Size × valuation PSF
    pub fn price_as_per_valuation(&self) -> f64 {
        self.size * self.valuation_psf
    }

    /// Size × net PSF
    pub fn net_price(&self) -> f64 {
        self.size * self.net_psf
    }
}
