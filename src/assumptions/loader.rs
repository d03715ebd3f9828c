//! JSON-based settings loader

use std::fs;
use std::path::Path;

use log::info;

use super::GlobalSettings;
use crate::error::AnalysisResult;

/// Default settings file looked up by the CLI
pub const DEFAULT_SETTINGS_PATH: &str = "settings.json";

/// Load settings from a JSON file
pub fn load_settings<P: AsRef<Path>>(path: P) -> AnalysisResult<GlobalSettings> {
    let path = path.as_ref();
    let json = fs::read_to_string(path)?;
    let settings = GlobalSettings::from_json_str(&json)?;
    info!(
        "Loaded settings from {} ({} rental assumptions)",
        path.display(),
        settings.rental_assumptions.len()
    );
    Ok(settings)
}

/// Load settings from a file if it exists, falling back to defaults otherwise
pub fn load_settings_or_default<P: AsRef<Path>>(path: P) -> AnalysisResult<GlobalSettings> {
    let path = path.as_ref();
    if path.exists() {
        load_settings(path)
    } else {
        info!("No settings file at {}, using defaults", path.display());
        Ok(GlobalSettings::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_missing_file_falls_back_to_defaults() {
        let settings = load_settings_or_default("does/not/exist/settings.json").unwrap();
        assert_eq!(settings, GlobalSettings::default());
    }

    #[test]
    fn test_load_settings_from_file() {
        let path = std::env::temp_dir().join(format!(
            "property_analyzer_settings_{}.json",
            std::process::id()
        ));
        {
            let mut file = fs::File::create(&path).unwrap();
            write!(file, r#"{{"loanTenure": 30, "lppsaInterestRate": 3.95}}"#).unwrap();
        }

        let settings = load_settings(&path).unwrap();
        fs::remove_file(&path).unwrap();

        assert_eq!(settings.loan_tenure, 30.0);
        assert_eq!(settings.lppsa_interest_rate, 3.95);
        assert_eq!(settings.interest_rate, 4.5);
    }

    #[test]
    fn test_malformed_file_is_an_error() {
        let path = std::env::temp_dir().join(format!(
            "property_analyzer_bad_settings_{}.json",
            std::process::id()
        ));
        fs::write(&path, "{ not json").unwrap();
        let result = load_settings(&path);
        fs::remove_file(&path).unwrap();
        assert!(result.is_err());
    }
}
