//! Output structures for property projections

use serde::{Deserialize, Serialize};

use super::amortization::Amortization;

/// How the unit earns its income
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum IncomeMode {
    /// Whole unit let to a single tenant
    WholeUnit,
    /// Room-by-room letting through an operator who takes a management fee
    CoLiving,
    /// Room-by-room letting managed by the owner
    SelfManage,
    /// Short-stay letting
    Airbnb,
}

impl IncomeMode {
    pub const ALL: [IncomeMode; 4] = [
        IncomeMode::WholeUnit,
        IncomeMode::CoLiving,
        IncomeMode::SelfManage,
        IncomeMode::Airbnb,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            IncomeMode::WholeUnit => "wholeUnit",
            IncomeMode::CoLiving => "coLiving",
            IncomeMode::SelfManage => "selfManage",
            IncomeMode::Airbnb => "airbnb",
        }
    }
}

/// Which loan a figure belongs to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum LoanKind {
    /// Principal equal to the net price
    Nett,
    /// First percentage of the valuation price
    Loan1,
    /// Second percentage of the valuation price
    Loan2,
    /// Government scheme, principal capped at the statutory ceiling
    Lppsa,
}

/// One installment candidate
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LoanCandidate {
    pub kind: LoanKind,
    pub loan_amount: f64,
    pub annual_rate_percent: f64,
    pub amortization: Amortization,
}

impl LoanCandidate {
    pub fn installment(&self) -> f64 {
        self.amortization.monthly_payment
    }
}

/// The four installment candidates computed for every property
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LoanCandidates {
    pub nett: LoanCandidate,
    pub loan1: LoanCandidate,
    pub loan2: LoanCandidate,
    pub lppsa: LoanCandidate,
}

impl LoanCandidates {
    pub fn iter(&self) -> impl Iterator<Item = &LoanCandidate> {
        [&self.nett, &self.loan1, &self.loan2, &self.lppsa].into_iter()
    }
}

/// Monthly figures for one financing scenario under a rental income mode
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LoanScenario {
    pub loan_amount: f64,
    /// Bare monthly installment
    pub commitment: f64,
    /// Installment plus fixed carrying costs
    pub total_commitment_monthly: f64,
    pub cashflow: f64,
    /// Cashflow with the first month's principal repayment added back
    pub cashflow_excluding_principal: f64,
    /// Loan amount above (or below) the net price
    pub cashback: f64,
}

/// Price bases derived from size and the two PSF figures
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PriceBases {
    pub price_as_per_valuation: f64,
    pub net_price: f64,
}

/// Result for the whole-unit, co-living and self-managed modes
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StandardCalculations {
    pub property_id: u32,
    pub mode: IncomeMode,
    pub prices: PriceBases,
    pub loans: LoanCandidates,
    pub rental_income: f64,
    pub management_fee: f64,
    pub other_expenses: f64,
    pub total_expenses: f64,
    pub nett: LoanScenario,
    pub loan1: LoanScenario,
    pub loan2: LoanScenario,
    pub lppsa: LoanScenario,
}

impl StandardCalculations {
    pub fn scenario(&self, kind: LoanKind) -> &LoanScenario {
        match kind {
            LoanKind::Nett => &self.nett,
            LoanKind::Loan1 => &self.loan1,
            LoanKind::Loan2 => &self.loan2,
            LoanKind::Lppsa => &self.lppsa,
        }
    }
}

/// Short-stay figures for one occupancy tier
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AirbnbScenario {
    pub occupancy_percent: f64,
    pub total_income: f64,
    pub operator_fee: f64,
    pub cashflow_nett: f64,
    pub cashflow_loan1: f64,
    pub cashflow_loan2: f64,
    pub cashflow_lppsa: f64,
}

/// Result for the short-stay mode
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AirbnbCalculations {
    pub property_id: u32,
    pub prices: PriceBases,
    pub loans: LoanCandidates,
    /// Maintenance plus wifi
    pub fixed_expenses: f64,
    /// Nett installment plus fixed expenses, independent of occupancy
    pub total_commitment_at_nett: f64,
    pub current: AirbnbScenario,
    pub best: AirbnbScenario,
    pub worst: AirbnbScenario,
}

/// Either result shape, tagged by mode family
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "camelCase")]
pub enum ProjectionResult {
    Standard(StandardCalculations),
    Airbnb(AirbnbCalculations),
}

impl ProjectionResult {
    pub fn property_id(&self) -> u32 {
        match self {
            ProjectionResult::Standard(calc) => calc.property_id,
            ProjectionResult::Airbnb(calc) => calc.property_id,
        }
    }

    pub fn mode(&self) -> IncomeMode {
        match self {
            ProjectionResult::Standard(calc) => calc.mode,
            ProjectionResult::Airbnb(_) => IncomeMode::Airbnb,
        }
    }

    pub fn prices(&self) -> &PriceBases {
        match self {
            ProjectionResult::Standard(calc) => &calc.prices,
            ProjectionResult::Airbnb(calc) => &calc.prices,
        }
    }

    pub fn net_price(&self) -> f64 {
        self.prices().net_price
    }

    pub fn loans(&self) -> &LoanCandidates {
        match self {
            ProjectionResult::Standard(calc) => &calc.loans,
            ProjectionResult::Airbnb(calc) => &calc.loans,
        }
    }

    /// Monthly cashflow at the Nett loan (current occupancy for short-stay)
    pub fn headline_cashflow(&self) -> f64 {
        match self {
            ProjectionResult::Standard(calc) => calc.nett.cashflow,
            ProjectionResult::Airbnb(calc) => calc.current.cashflow_nett,
        }
    }
}
