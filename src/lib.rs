//! Property Analyzer - projection and market statistics engine for property investment research
//!
//! This library provides:
//! - Level-payment mortgage amortization
//! - Per-property cash-flow projections across four financing scenarios
//!   (net price, two loan-to-valuation percentages, capped LPPSA) and four
//!   income modes (whole unit, co-living, self-managed, short-stay)
//! - Grouped summary statistics over uploaded rental, asking-price,
//!   transaction and short-stay datasets
//! - Batch projection and session snapshots

pub mod error;
pub mod assumptions;
pub mod property;
pub mod projection;
pub mod aggregation;
pub mod scenario;
pub mod session;

// Re-export commonly used types
pub use error::{AnalysisError, AnalysisResult};
pub use assumptions::{GlobalSettings, RentalAssumption};
pub use property::{MaintenanceCharge, Property};
pub use projection::{amortize, project, IncomeMode, ProjectionEngine, ProjectionResult};
pub use aggregation::{summarize, DatasetSummary, RecordSet, SummaryKind};
pub use scenario::ScenarioRunner;
pub use session::Session;
