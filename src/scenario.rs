//! Scenario runner for projecting many properties or comparing income modes
//!
//! Holds one copy of the global settings and builds engines on demand, so a
//! whole table of properties can be re-projected after any input change.

use log::{debug, warn};
use rayon::prelude::*;

use crate::assumptions::GlobalSettings;
use crate::error::AnalysisResult;
use crate::projection::{IncomeMode, ProjectionConfig, ProjectionEngine, ProjectionResult};
use crate::property::Property;

/// Pre-loaded scenario runner for batch projections
///
/// # Example
/// ```
/// use property_analyzer::{GlobalSettings, Property, ScenarioRunner};
/// use property_analyzer::projection::ProjectionConfig;
///
/// let settings = GlobalSettings::default();
/// let mut property = Property::new(1, "Skyline Suites", "2 Bedroom", 900.0, &settings);
/// property.valuation_psf = 650.0;
/// property.net_psf = 600.0;
///
/// let runner = ScenarioRunner::new(settings);
/// let result = runner.run(&property, ProjectionConfig::default()).unwrap();
/// assert_eq!(result.net_price(), 540_000.0);
/// ```
#[derive(Debug, Clone)]
pub struct ScenarioRunner {
    settings: GlobalSettings,
}

impl ScenarioRunner {
    pub fn new(settings: GlobalSettings) -> Self {
        Self { settings }
    }

    /// Run a single projection with the given config
    pub fn run(&self, property: &Property, config: ProjectionConfig) -> AnalysisResult<ProjectionResult> {
        ProjectionEngine::new(self.settings.clone(), config).project_property(property)
    }

    /// Project every property in parallel; results keep the input order.
    /// Each property succeeds or fails on its own.
    pub fn run_batch(
        &self,
        properties: &[Property],
        config: ProjectionConfig,
    ) -> Vec<AnalysisResult<ProjectionResult>> {
        let engine = ProjectionEngine::new(self.settings.clone(), config);
        let results: Vec<_> = properties
            .par_iter()
            .map(|property| engine.project_property(property))
            .collect();

        let failed = results.iter().filter(|r| r.is_err()).count();
        if failed > 0 {
            warn!("{} of {} properties could not be projected", failed, properties.len());
        }
        debug!("Projected {} properties in {:?} mode", properties.len(), config.mode);
        results
    }

    /// All four income modes for one property, in `IncomeMode::ALL` order
    pub fn run_all_modes(
        &self,
        property: &Property,
        loan_percent_1: f64,
        loan_percent_2: f64,
    ) -> AnalysisResult<Vec<ProjectionResult>> {
        IncomeMode::ALL
            .iter()
            .map(|&mode| {
                self.run(
                    property,
                    ProjectionConfig::new(mode, loan_percent_1, loan_percent_2),
                )
            })
            .collect()
    }

    pub fn settings(&self) -> &GlobalSettings {
        &self.settings
    }

    /// Mutable access for what-if changes; maintenance defaults on the
    /// caller's properties are not refreshed automatically
    pub fn settings_mut(&mut self) -> &mut GlobalSettings {
        &mut self.settings
    }
}

impl Default for ScenarioRunner {
    fn default() -> Self {
        Self::new(GlobalSettings::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::AnalysisError;

    fn test_property(id: u32, size: f64) -> Property {
        let settings = GlobalSettings::default();
        let mut property = Property::new(id, "Skyline Suites", "2 Bedroom", size, &settings);
        property.spa_price = 500_000.0;
        property.valuation_psf = 550.0;
        property.net_psf = 500.0;
        property.whole_unit_rental = 2600.0;
        property.co_living_rental = 3400.0;
        property.airbnb_rental_per_night = 200.0;
        property
    }

    #[test]
    fn test_run_batch_keeps_order_and_isolates_failures() {
        let runner = ScenarioRunner::default();
        let properties = vec![
            test_property(1, 1000.0),
            test_property(2, 0.0),
            test_property(3, 800.0),
        ];

        let results = runner.run_batch(&properties, ProjectionConfig::default());
        assert_eq!(results.len(), 3);
        assert_eq!(results[0].as_ref().unwrap().property_id(), 1);
        assert!(matches!(results[1], Err(AnalysisError::InvalidInput { .. })));
        assert_eq!(results[2].as_ref().unwrap().property_id(), 3);
        assert_eq!(results[2].as_ref().unwrap().net_price(), 400_000.0);
    }

    #[test]
    fn test_run_all_modes() {
        let runner = ScenarioRunner::default();
        let results = runner.run_all_modes(&test_property(1, 1000.0), 90.0, 100.0).unwrap();

        let modes: Vec<IncomeMode> = results.iter().map(|r| r.mode()).collect();
        assert_eq!(modes, IncomeMode::ALL.to_vec());
        assert!(matches!(results[3], ProjectionResult::Airbnb(_)));

        // Same loans regardless of mode
        assert_eq!(results[0].loans(), results[3].loans());

        // Co-living pays the operator, self-managed does not
        assert!(results[2].headline_cashflow() > results[1].headline_cashflow());
    }

    #[test]
    fn test_settings_change_affects_installments() {
        let mut runner = ScenarioRunner::default();
        let property = test_property(1, 1000.0);
        let before = runner.run(&property, ProjectionConfig::default()).unwrap();

        runner.settings_mut().interest_rate = 6.0;
        let after = runner.run(&property, ProjectionConfig::default()).unwrap();

        assert!(after.loans().nett.installment() > before.loans().nett.installment());
        assert!(after.headline_cashflow() < before.headline_cashflow());
    }
}
