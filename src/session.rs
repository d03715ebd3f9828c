//! Named snapshots of the working state (settings plus property table)

use std::fs;
use std::path::Path;

use chrono::{DateTime, Utc};
use log::info;
use serde::{Deserialize, Serialize};

use crate::assumptions::GlobalSettings;
use crate::error::AnalysisResult;
use crate::property::Property;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Session {
    pub name: String,
    pub saved_at: DateTime<Utc>,
    pub settings: GlobalSettings,
    pub properties: Vec<Property>,
}

impl Session {
    /// Snapshot the given state, stamped with the current time
    pub fn new(name: impl Into<String>, settings: GlobalSettings, properties: Vec<Property>) -> Self {
        Self {
            name: name.into(),
            saved_at: Utc::now(),
            settings,
            properties,
        }
    }

    pub fn to_json(&self) -> AnalysisResult<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    pub fn from_json(json: &str) -> AnalysisResult<Self> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn save<P: AsRef<Path>>(&self, path: P) -> AnalysisResult<()> {
        let path = path.as_ref();
        fs::write(path, self.to_json()?)?;
        info!(
            "Saved session {:?} ({} properties) to {}",
            self.name,
            self.properties.len(),
            path.display()
        );
        Ok(())
    }

    pub fn load<P: AsRef<Path>>(path: P) -> AnalysisResult<Self> {
        let path = path.as_ref();
        let session = Self::from_json(&fs::read_to_string(path)?)?;
        info!("Loaded session {:?} from {}", session.name, path.display());
        Ok(session)
    }
}
