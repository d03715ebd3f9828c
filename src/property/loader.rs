//! Load properties from a CSV file

use std::path::Path;

use csv::Reader;
use log::{debug, info};

use super::{MaintenanceCharge, Property};
use crate::assumptions::GlobalSettings;
use crate::error::{AnalysisError, AnalysisResult};

/// Raw CSV row. Money columns left blank default to zero; a blank
/// `maintenance_sinking` column means "use the computed default".
#[derive(Debug, serde::Deserialize)]
struct CsvRow {
    id: u32,
    #[serde(default)]
    name: String,
    #[serde(rename = "type", default)]
    property_type: String,
    #[serde(default)]
    bedrooms_type: String,
    size: f64,
    #[serde(default)]
    spa_price: Option<f64>,
    #[serde(default)]
    valuation_psf: Option<f64>,
    #[serde(default)]
    net_psf: Option<f64>,
    #[serde(default)]
    whole_unit_rental: Option<f64>,
    #[serde(default)]
    co_living_rental: Option<f64>,
    #[serde(default)]
    airbnb_rental_per_night: Option<f64>,
    #[serde(default)]
    maintenance_sinking: Option<f64>,
    #[serde(default)]
    wifi: Option<f64>,
}

impl CsvRow {
    fn into_property(self, settings: &GlobalSettings, line: u64) -> AnalysisResult<Property> {
        if !self.size.is_finite() || self.size < 0.0 {
            return Err(AnalysisError::InvalidRecord {
                line,
                reason: format!("size must be a non-negative number, got {}", self.size),
            });
        }

        let maintenance_sinking = match self.maintenance_sinking {
            Some(value) => MaintenanceCharge::manual(value),
            None => MaintenanceCharge::computed(self.size, settings.maintenance_fee_psf),
        };

        let mut property = Property {
            id: self.id,
            name: self.name,
            property_type: self.property_type,
            bedrooms_type: self.bedrooms_type,
            size: self.size,
            spa_price: self.spa_price.unwrap_or(0.0),
            valuation_psf: self.valuation_psf.unwrap_or(0.0),
            net_psf: self.net_psf.unwrap_or(0.0),
            whole_unit_rental: self.whole_unit_rental.unwrap_or(0.0),
            co_living_rental: self.co_living_rental.unwrap_or(0.0),
            airbnb_rental_per_night: self.airbnb_rental_per_night.unwrap_or(0.0),
            maintenance_sinking,
            wifi: self.wifi.unwrap_or(0.0),
        };

        if property.apply_rental_default(settings) {
            debug!(
                "Property {}: whole-unit rent defaulted to {} for {:?}",
                property.id, property.whole_unit_rental, property.bedrooms_type
            );
        }

        Ok(property)
    }
}

/// Load all properties from a CSV file
pub fn load_properties<P: AsRef<Path>>(
    path: P,
    settings: &GlobalSettings,
) -> AnalysisResult<Vec<Property>> {
    let path = path.as_ref();
    let file = std::fs::File::open(path)?;
    let properties = load_properties_from_reader(file, settings)?;
    info!("Loaded {} properties from {}", properties.len(), path.display());
    Ok(properties)
}

/// Load properties from any reader (e.g., string buffer, upload body)
pub fn load_properties_from_reader<R: std::io::Read>(
    reader: R,
    settings: &GlobalSettings,
) -> AnalysisResult<Vec<Property>> {
    let mut csv_reader = Reader::from_reader(reader);
    let mut properties = Vec::new();

    for result in csv_reader.deserialize() {
        let row: CsvRow = result?;
        let line = properties.len() as u64 + 2;
        properties.push(row.into_property(settings, line)?);
    }

    Ok(properties)
}
