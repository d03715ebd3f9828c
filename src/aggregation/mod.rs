//! Grouping and summary statistics over uploaded market datasets
//!
//! Every dataset goes through the same steps: detect which columns play
//! which role, clean the numeric cells, group by development (and layout
//! when present), then reduce each group to summary statistics.

mod cleaning;
mod columns;
mod records;
pub mod stats;
mod summary;

pub use cleaning::clean_number;
pub use columns::{ColumnMapping, ColumnRole, RoleHint, RoleHints};
pub use records::{CellValue, Record, RecordSet};
pub use stats::{median, mode, quartiles, Mode, Quartiles, RangeStats};
pub use summary::{
    summarize, summarize_with, DatasetSummary, GroupSummary, StatisticsSelection, SummaryKind,
    SummaryRequest, UNSPECIFIED_LAYOUT,
};
