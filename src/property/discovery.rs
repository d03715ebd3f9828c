//! Conversion of discovered comparable developments into properties.
//!
//! The discovery service returns one candidate per development with the
//! layouts it found; each layout becomes its own property row.

use serde::{Deserialize, Serialize};

use super::Property;
use crate::assumptions::GlobalSettings;

/// A layout found for a candidate development
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CandidateLayout {
    #[serde(rename = "type")]
    pub bedrooms_type: String,
    pub size: f64,
    #[serde(default)]
    pub price: Option<f64>,
}

/// A development suggested by the discovery service
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CandidateProperty {
    pub name: String,
    #[serde(default)]
    pub property_type: String,
    #[serde(default)]
    pub layouts: Vec<CandidateLayout>,
}

impl CandidateProperty {
    /// Expand into one property per layout, numbering ids from `first_id`.
    /// A layout price becomes the SPA price and both PSF figures.
    pub fn into_properties(self, first_id: u32, settings: &GlobalSettings) -> Vec<Property> {
        let name = self.name;
        let property_type = self.property_type;

        self.layouts
            .into_iter()
            .zip(first_id..)
            .map(|(layout, id)| {
                let mut property =
                    Property::new(id, name.clone(), layout.bedrooms_type, layout.size, settings);
                property.property_type = property_type.clone();

                if let Some(price) = layout.price.filter(|p| *p > 0.0) {
                    property.spa_price = price;
                    if layout.size > 0.0 {
                        property.valuation_psf = price / layout.size;
                        property.net_psf = price / layout.size;
                    }
                }

                property.apply_rental_default(settings);
                property
            })
            .collect()
    }
}

/// Expand a batch of candidates with consecutive ids
pub fn properties_from_candidates(
    candidates: Vec<CandidateProperty>,
    first_id: u32,
    settings: &GlobalSettings,
) -> Vec<Property> {
    let mut next_id = first_id;
    let mut properties = Vec::new();
    for candidate in candidates {
        let expanded = candidate.into_properties(next_id, settings);
        next_id += expanded.len() as u32;
        properties.extend(expanded);
    }
    properties
}
