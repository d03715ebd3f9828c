//! Core projection engine: price bases, installment candidates and monthly cash flows

use serde::{Deserialize, Serialize};

use super::amortization::amortize;
use super::cashflows::{
    AirbnbCalculations, AirbnbScenario, IncomeMode, LoanCandidate, LoanCandidates, LoanKind,
    LoanScenario, PriceBases, ProjectionResult, StandardCalculations,
};
use crate::assumptions::GlobalSettings;
use crate::error::{AnalysisError, AnalysisResult};
use crate::property::Property;

/// Statutory ceiling on the government scheme's loan amount
pub const LPPSA_CAP: f64 = 750_000.0;

/// Nights per month used for short-stay income
pub const NIGHTS_PER_MONTH: f64 = 30.0;

/// Configuration for a projection run
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProjectionConfig {
    /// Income mode to project
    pub mode: IncomeMode,

    /// First loan as a percentage of the valuation price (0-100, not validated)
    pub loan_percent_1: f64,

    /// Second loan as a percentage of the valuation price
    pub loan_percent_2: f64,
}

impl ProjectionConfig {
    pub fn new(mode: IncomeMode, loan_percent_1: f64, loan_percent_2: f64) -> Self {
        Self {
            mode,
            loan_percent_1,
            loan_percent_2,
        }
    }

    /// Same loan percentages, different mode
    pub fn with_mode(self, mode: IncomeMode) -> Self {
        Self { mode, ..self }
    }
}

impl Default for ProjectionConfig {
    fn default() -> Self {
        Self {
            mode: IncomeMode::WholeUnit,
            loan_percent_1: 90.0,
            loan_percent_2: 100.0,
        }
    }
}

/// Main projection engine
#[derive(Debug, Clone)]
pub struct ProjectionEngine {
    settings: GlobalSettings,
    config: ProjectionConfig,
}

impl ProjectionEngine {
    /// Create a new projection engine with given settings and config
    pub fn new(settings: GlobalSettings, config: ProjectionConfig) -> Self {
        Self { settings, config }
    }

    pub fn settings(&self) -> &GlobalSettings {
        &self.settings
    }

    pub fn config(&self) -> &ProjectionConfig {
        &self.config
    }

    /// Run the projection for a single property.
    ///
    /// Fails with `InvalidInput` when the size is zero, negative or not a
    /// number, since every PSF-derived figure would otherwise be meaningless.
    pub fn project_property(&self, property: &Property) -> AnalysisResult<ProjectionResult> {
        validate_property(property)?;

        let prices = PriceBases {
            price_as_per_valuation: property.price_as_per_valuation(),
            net_price: property.net_price(),
        };
        let loans = self.loan_candidates(property, &prices);

        let result = match self.config.mode {
            IncomeMode::Airbnb => {
                ProjectionResult::Airbnb(self.airbnb_calculations(property, prices, loans))
            }
            mode => ProjectionResult::Standard(
                self.standard_calculations(property, mode, prices, loans),
            ),
        };

        Ok(result)
    }

    /// Installments against the net price, the two valuation percentages, and the capped scheme
    fn loan_candidates(&self, property: &Property, prices: &PriceBases) -> LoanCandidates {
        let rate = self.settings.interest_rate;
        let tenure = self.settings.loan_tenure;

        let candidate = |kind, loan_amount: f64, annual_rate_percent: f64| LoanCandidate {
            kind,
            loan_amount,
            annual_rate_percent,
            amortization: amortize(loan_amount, annual_rate_percent, tenure),
        };

        let loan1_amount = prices.price_as_per_valuation * self.config.loan_percent_1 / 100.0;
        let loan2_amount = prices.price_as_per_valuation * self.config.loan_percent_2 / 100.0;
        let lppsa_amount = property.spa_price.min(LPPSA_CAP);

        LoanCandidates {
            nett: candidate(LoanKind::Nett, prices.net_price, rate),
            loan1: candidate(LoanKind::Loan1, loan1_amount, rate),
            loan2: candidate(LoanKind::Loan2, loan2_amount, rate),
            lppsa: candidate(LoanKind::Lppsa, lppsa_amount, self.settings.lppsa_interest_rate),
        }
    }

    fn standard_calculations(
        &self,
        property: &Property,
        mode: IncomeMode,
        prices: PriceBases,
        loans: LoanCandidates,
    ) -> StandardCalculations {
        let rental_income = match mode {
            IncomeMode::WholeUnit => property.whole_unit_rental,
            _ => property.co_living_rental,
        };
        let management_fee = if mode == IncomeMode::CoLiving {
            rental_income * self.settings.management_fee_percent / 100.0
        } else {
            0.0
        };
        let other_expenses = match mode {
            IncomeMode::CoLiving | IncomeMode::SelfManage => property.wifi,
            _ => 0.0,
        };
        let total_expenses = property.maintenance() + management_fee + other_expenses;

        let scenario = |candidate: &LoanCandidate| {
            let commitment = candidate.installment();
            let total_commitment_monthly = commitment + total_expenses;
            let cashflow = rental_income - total_commitment_monthly;
            LoanScenario {
                loan_amount: candidate.loan_amount,
                commitment,
                total_commitment_monthly,
                cashflow,
                cashflow_excluding_principal: cashflow
                    + candidate.amortization.first_month_principal,
                cashback: candidate.loan_amount - prices.net_price,
            }
        };

        StandardCalculations {
            property_id: property.id,
            mode,
            prices,
            nett: LoanScenario {
                cashback: 0.0,
                ..scenario(&loans.nett)
            },
            loan1: scenario(&loans.loan1),
            loan2: scenario(&loans.loan2),
            lppsa: scenario(&loans.lppsa),
            loans,
            rental_income,
            management_fee,
            other_expenses,
            total_expenses,
        }
    }

    fn airbnb_calculations(
        &self,
        property: &Property,
        prices: PriceBases,
        loans: LoanCandidates,
    ) -> AirbnbCalculations {
        let fixed_expenses = property.maintenance() + property.wifi;
        let occupancy = self.settings.airbnb_occupancy;

        let tier = |occupancy_percent: f64| {
            let total_income =
                property.airbnb_rental_per_night * NIGHTS_PER_MONTH * occupancy_percent / 100.0;
            let operator_fee = total_income * self.settings.airbnb_operator_fee / 100.0;
            let cashflow = |candidate: &LoanCandidate| {
                total_income - candidate.installment() - fixed_expenses - operator_fee
            };

            AirbnbScenario {
                occupancy_percent,
                total_income,
                operator_fee,
                cashflow_nett: cashflow(&loans.nett),
                cashflow_loan1: cashflow(&loans.loan1),
                cashflow_loan2: cashflow(&loans.loan2),
                cashflow_lppsa: cashflow(&loans.lppsa),
            }
        };

        AirbnbCalculations {
            property_id: property.id,
            prices,
            fixed_expenses,
            total_commitment_at_nett: loans.nett.installment() + fixed_expenses,
            current: tier(occupancy.current),
            best: tier(occupancy.best),
            worst: tier(occupancy.worst),
            loans,
        }
    }
}

fn validate_property(property: &Property) -> AnalysisResult<()> {
    if property.size.is_finite() && property.size > 0.0 {
        Ok(())
    } else {
        Err(AnalysisError::InvalidInput {
            field: "size",
            value: property.size,
            reason: "must be a positive number of square feet",
        })
    }
}

/// Project one property without constructing an engine
pub fn project(
    property: &Property,
    settings: &GlobalSettings,
    mode: IncomeMode,
    loan_percent_1: f64,
    loan_percent_2: f64,
) -> AnalysisResult<ProjectionResult> {
    ProjectionEngine::new(
        settings.clone(),
        ProjectionConfig::new(mode, loan_percent_1, loan_percent_2),
    )
    .project_property(property)
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;

    fn test_settings() -> GlobalSettings {
        GlobalSettings {
            interest_rate: 4.5,
            loan_tenure: 35.0,
            ..Default::default()
        }
    }

    fn test_property() -> Property {
        let settings = test_settings();
        let mut property = Property::new(1, "Skyline Suites", "2 Bedroom", 1000.0, &settings);
        property.spa_price = 520_000.0;
        property.valuation_psf = 500.0;
        property.net_psf = 480.0;
        property.whole_unit_rental = 2500.0;
        property.co_living_rental = 3200.0;
        property.airbnb_rental_per_night = 220.0;
        property.set_maintenance(350.0);
        property.wifi = 0.0;
        property
    }

    fn standard(result: ProjectionResult) -> StandardCalculations {
        match result {
            ProjectionResult::Standard(calc) => calc,
            ProjectionResult::Airbnb(_) => panic!("expected standard calculations"),
        }
    }

    fn airbnb(result: ProjectionResult) -> AirbnbCalculations {
        match result {
            ProjectionResult::Airbnb(calc) => calc,
            ProjectionResult::Standard(_) => panic!("expected airbnb calculations"),
        }
    }

    #[test]
    fn test_whole_unit_nett_scenario() {
        let result = project(&test_property(), &test_settings(), IncomeMode::WholeUnit, 90.0, 100.0)
            .unwrap();
        assert_eq!(result.mode(), IncomeMode::WholeUnit);
        assert_eq!(result.net_price(), 480_000.0);

        let calc = standard(result);
        assert_eq!(calc.prices.price_as_per_valuation, 500_000.0);
        assert_eq!(calc.management_fee, 0.0);
        assert_eq!(calc.other_expenses, 0.0);
        assert_eq!(calc.total_expenses, 350.0);

        assert_abs_diff_eq!(calc.nett.commitment, 2271.63, epsilon = 0.01);
        assert_abs_diff_eq!(calc.nett.total_commitment_monthly, 2621.63, epsilon = 0.01);
        assert_abs_diff_eq!(calc.nett.cashflow, -121.63, epsilon = 0.01);
        assert_eq!(calc.nett.cashback, 0.0);

        let principal = calc.loans.nett.amortization.first_month_principal;
        assert_abs_diff_eq!(principal, 2271.63 - 1800.0, epsilon = 0.01);
        assert_abs_diff_eq!(
            calc.nett.cashflow_excluding_principal,
            calc.nett.cashflow + principal,
            epsilon = 1e-9
        );
    }

    #[test]
    fn test_cashback_sign_follows_loan_amount() {
        let calc = standard(
            project(&test_property(), &test_settings(), IncomeMode::WholeUnit, 90.0, 100.0).unwrap(),
        );

        // 90% of 500k is below the 480k net price, 100% is above
        assert_eq!(calc.loan1.loan_amount, 450_000.0);
        assert!(calc.loan1.cashback < 0.0);
        assert_abs_diff_eq!(calc.loan1.cashback, -30_000.0, epsilon = 1e-6);

        assert!(calc.loan2.cashback > 0.0);
        assert_abs_diff_eq!(calc.loan2.cashback, 20_000.0, epsilon = 1e-6);

        assert_abs_diff_eq!(calc.lppsa.cashback, 40_000.0, epsilon = 1e-6);
    }

    #[test]
    fn test_lppsa_principal_is_capped() {
        let mut property = test_property();
        property.spa_price = 900_000.0;
        let settings = test_settings();
        let calc = standard(
            project(&property, &settings, IncomeMode::WholeUnit, 90.0, 100.0).unwrap(),
        );

        assert_eq!(calc.loans.lppsa.loan_amount, LPPSA_CAP);
        assert_eq!(calc.loans.lppsa.annual_rate_percent, settings.lppsa_interest_rate);
        let expected = amortize(LPPSA_CAP, settings.lppsa_interest_rate, settings.loan_tenure);
        assert_eq!(calc.lppsa.commitment, expected.monthly_payment);
    }

    #[test]
    fn test_co_living_charges_management_fee_and_wifi() {
        let mut property = test_property();
        property.wifi = 100.0;
        let calc = standard(
            project(&property, &test_settings(), IncomeMode::CoLiving, 90.0, 100.0).unwrap(),
        );

        assert_eq!(calc.rental_income, 3200.0);
        assert_abs_diff_eq!(calc.management_fee, 320.0, epsilon = 1e-9);
        assert_eq!(calc.other_expenses, 100.0);
        assert_abs_diff_eq!(calc.total_expenses, 770.0, epsilon = 1e-9);
        assert_abs_diff_eq!(
            calc.loan2.cashflow,
            3200.0 - calc.loan2.commitment - 770.0,
            epsilon = 1e-9
        );
    }

    #[test]
    fn test_self_manage_uses_co_living_rent_without_fee() {
        let mut property = test_property();
        property.wifi = 100.0;
        let calc = standard(
            project(&property, &test_settings(), IncomeMode::SelfManage, 90.0, 100.0).unwrap(),
        );

        assert_eq!(calc.mode, IncomeMode::SelfManage);
        assert_eq!(calc.rental_income, 3200.0);
        assert_eq!(calc.management_fee, 0.0);
        assert_eq!(calc.total_expenses, 450.0);
    }

    #[test]
    fn test_airbnb_tiers() {
        let mut property = test_property();
        property.wifi = 120.0;
        let settings = test_settings();
        let calc = airbnb(
            project(&property, &settings, IncomeMode::Airbnb, 90.0, 100.0).unwrap(),
        );

        assert_eq!(calc.fixed_expenses, 470.0);
        assert_abs_diff_eq!(
            calc.total_commitment_at_nett,
            calc.loans.nett.installment() + 470.0,
            epsilon = 1e-9
        );

        // 220/night × 30 nights × 60% = 3960, operator takes 20%
        assert_abs_diff_eq!(calc.current.total_income, 3960.0, epsilon = 1e-9);
        assert_abs_diff_eq!(calc.current.operator_fee, 792.0, epsilon = 1e-9);
        assert_abs_diff_eq!(
            calc.current.cashflow_nett,
            3960.0 - calc.loans.nett.installment() - 470.0 - 792.0,
            epsilon = 1e-9
        );
        assert_abs_diff_eq!(
            calc.current.cashflow_lppsa,
            3960.0 - calc.loans.lppsa.installment() - 470.0 - 792.0,
            epsilon = 1e-9
        );

        assert!(calc.best.cashflow_nett > calc.current.cashflow_nett);
        assert!(calc.worst.cashflow_nett < calc.current.cashflow_nett);
        assert_eq!(calc.worst.occupancy_percent, settings.airbnb_occupancy.worst);
    }

    #[test]
    fn test_zero_size_is_rejected() {
        let mut property = test_property();
        property.size = 0.0;
        let err = project(&property, &test_settings(), IncomeMode::WholeUnit, 90.0, 100.0)
            .unwrap_err();
        assert!(matches!(err, AnalysisError::InvalidInput { field: "size", .. }));

        property.size = f64::NAN;
        assert!(project(&property, &test_settings(), IncomeMode::Airbnb, 90.0, 100.0).is_err());
    }

    #[test]
    fn test_missing_prices_mean_no_loan() {
        let settings = test_settings();
        let property = Property::new(5, "Bare", "Studio", 500.0, &settings);
        let calc = standard(
            project(&property, &settings, IncomeMode::WholeUnit, 90.0, 100.0).unwrap(),
        );

        assert!(calc.loans.iter().all(|loan| loan.amortization.is_zero()));
        assert_eq!(calc.nett.commitment, 0.0);
        assert_eq!(calc.nett.cashflow, -property.maintenance());
    }

    #[test]
    fn test_result_serializes_with_kind_tag() {
        let result = project(&test_property(), &test_settings(), IncomeMode::Airbnb, 90.0, 100.0)
            .unwrap();
        let json = serde_json::to_value(&result).unwrap();
        assert_eq!(json["kind"], "airbnb");
        assert!(json.get("current").is_some());

        let back: ProjectionResult = serde_json::from_value(json).unwrap();
        assert_eq!(back.mode(), IncomeMode::Airbnb);
        assert_eq!(back.property_id(), result.property_id());
    }
}
