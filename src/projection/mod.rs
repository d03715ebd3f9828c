//! Mortgage amortization and per-property cash-flow projections

mod amortization;
mod cashflows;
mod engine;

pub use amortization::{amortize, amortize_terms, Amortization, LoanTerms};
pub use cashflows::{
    AirbnbCalculations, AirbnbScenario, IncomeMode, LoanCandidate, LoanCandidates, LoanKind,
    LoanScenario, PriceBases, ProjectionResult, StandardCalculations,
};
pub use engine::{project, ProjectionConfig, ProjectionEngine, LPPSA_CAP, NIGHTS_PER_MONTH};
