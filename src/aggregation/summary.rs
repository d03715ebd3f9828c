//! Grouped market summaries for uploaded datasets

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use super::cleaning::clean_number;
use super::columns::{
    ColumnMapping, ColumnRole, RoleHint, RoleHints, DEVELOPMENT_FRAGMENTS, LAYOUT_FRAGMENTS,
    OCCUPANCY_FRAGMENTS, SIZE_FRAGMENTS,
};
use super::records::{Record, RecordSet};
use super::stats::{self, Mode, Quartiles, RangeStats};
use crate::error::{AnalysisError, AnalysisResult};

/// Sub-key used when a row has no layout value
pub const UNSPECIFIED_LAYOUT: &str = "Unspecified";

/// The dataset shapes the application accepts
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum SummaryKind {
    RentalListings,
    AskingPrices,
    Transactions,
    AirbnbListings,
}

impl SummaryKind {
    pub const ALL: [SummaryKind; 4] = [
        SummaryKind::RentalListings,
        SummaryKind::AskingPrices,
        SummaryKind::Transactions,
        SummaryKind::AirbnbListings,
    ];

    pub fn role_hints(&self) -> RoleHints {
        let development = RoleHint::new(ColumnRole::Development, DEVELOPMENT_FRAGMENTS, true);
        let layout = RoleHint::new(ColumnRole::Layout, LAYOUT_FRAGMENTS, false);

        let hints = match self {
            SummaryKind::RentalListings => vec![
                development,
                layout,
                RoleHint::new(ColumnRole::Value, &["rent", "price", "amount"], true),
                RoleHint::new(ColumnRole::Size, SIZE_FRAGMENTS, true),
            ],
            SummaryKind::AskingPrices => vec![
                development,
                layout,
                RoleHint::new(
                    ColumnRole::Value,
                    &["asking", "price", "amount", "cost", "value"],
                    true,
                ),
                RoleHint::new(ColumnRole::Size, SIZE_FRAGMENTS, true),
            ],
            SummaryKind::Transactions => vec![
                development,
                layout,
                RoleHint::new(
                    ColumnRole::Value,
                    &["transaction price", "price", "consideration", "amount", "cost", "value"],
                    true,
                ),
                RoleHint::new(ColumnRole::Size, SIZE_FRAGMENTS, true),
            ],
            SummaryKind::AirbnbListings => vec![
                development,
                layout,
                // "Occupancy Rate" must not be taken for the nightly rate
                RoleHint::new(ColumnRole::Occupancy, OCCUPANCY_FRAGMENTS, true),
                RoleHint::new(ColumnRole::Value, &["nightly", "night", "adr", "price", "rate"], true),
                RoleHint::new(ColumnRole::Size, SIZE_FRAGMENTS, false),
            ],
        };
        RoleHints::new(hints)
    }

    pub fn statistics(&self) -> StatisticsSelection {
        match self {
            SummaryKind::RentalListings => StatisticsSelection {
                median: true,
                mode: true,
                quartiles: false,
            },
            SummaryKind::AskingPrices | SummaryKind::Transactions => StatisticsSelection {
                median: true,
                mode: false,
                quartiles: false,
            },
            SummaryKind::AirbnbListings => StatisticsSelection {
                median: true,
                mode: false,
                quartiles: true,
            },
        }
    }

    pub fn request(&self) -> SummaryRequest {
        SummaryRequest {
            hints: self.role_hints(),
            statistics: self.statistics(),
        }
    }
}

/// Which optional statistics to compute per group
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct StatisticsSelection {
    /// Median of the value column
    pub median: bool,
    /// Mode of the value column
    pub mode: bool,
    /// Quartiles of the occupancy column
    pub quartiles: bool,
}

/// Role hints plus the statistics to report
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SummaryRequest {
    pub hints: RoleHints,
    pub statistics: StatisticsSelection,
}

/// Statistics for one group (or sub-group)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GroupSummary {
    pub key: String,
    pub count: usize,
    pub value: RangeStats,
    /// Value per square foot, when a size column is present
    #[serde(skip_serializing_if = "Option::is_none")]
    pub psf: Option<RangeStats>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub median: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub mode: Option<Mode>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub occupancy: Option<RangeStats>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub quartiles: Option<Quartiles>,
    /// Per-layout breakdown, sorted by layout
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub sub_groups: Vec<GroupSummary>,
}

/// Full result of summarizing one dataset
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DatasetSummary {
    pub columns: ColumnMapping,
    pub total_records: usize,
    pub rows_used: usize,
    /// Groups sorted by development
    pub groups: Vec<GroupSummary>,
}

impl DatasetSummary {
    pub fn rows_excluded(&self) -> usize {
        self.total_records - self.rows_used
    }

    pub fn group(&self, key: &str) -> Option<&GroupSummary> {
        self.groups.iter().find(|g| g.key == key)
    }
}

/// A record that survived cleaning
#[derive(Debug, Clone)]
struct CleanRow {
    key: String,
    sub_key: Option<String>,
    value: f64,
    psf: Option<f64>,
    occupancy: Option<f64>,
}

/// Summarize a dataset of the given kind
pub fn summarize(records: &RecordSet, kind: SummaryKind) -> AnalysisResult<DatasetSummary> {
    summarize_with(records, &kind.request())
}

/// Summarize a dataset with explicit role hints and statistics
pub fn summarize_with(
    records: &RecordSet,
    request: &SummaryRequest,
) -> AnalysisResult<DatasetSummary> {
    if records.is_empty() {
        return Err(AnalysisError::EmptyInput);
    }

    let columns = request.hints.resolve(&records.columns)?;
    let mut missing: Vec<ColumnRole> = [ColumnRole::Development, ColumnRole::Value]
        .into_iter()
        .filter(|role| !columns.has(*role))
        .collect();
    if request.statistics.quartiles && !columns.has(ColumnRole::Occupancy) {
        missing.push(ColumnRole::Occupancy);
    }
    if !missing.is_empty() {
        return Err(AnalysisError::MissingColumns { roles: missing });
    }

    let rows: Vec<CleanRow> = records
        .records
        .iter()
        .filter_map(|record| clean_row(record, &columns, &request.hints))
        .collect();

    if rows.is_empty() {
        return Err(AnalysisError::NoValidRows {
            total: records.len(),
        });
    }

    let mut by_key: BTreeMap<&str, Vec<&CleanRow>> = BTreeMap::new();
    for row in &rows {
        by_key.entry(row.key.as_str()).or_default().push(row);
    }

    let two_level = columns.has(ColumnRole::Layout);
    let groups = by_key
        .into_iter()
        .map(|(key, group_rows)| {
            let mut summary = summarize_group(key, &group_rows, &request.statistics);
            if two_level {
                summary.sub_groups = summarize_sub_groups(&group_rows, &request.statistics);
            }
            summary
        })
        .collect();

    Ok(DatasetSummary {
        columns,
        total_records: records.len(),
        rows_used: rows.len(),
        groups,
    })
}

fn clean_row(record: &Record, columns: &ColumnMapping, hints: &RoleHints) -> Option<CleanRow> {
    let cell = |role: ColumnRole| columns.get(role).and_then(|column| record.get(column));

    let key = cell(ColumnRole::Development)?.as_text();
    if key.is_empty() {
        return None;
    }

    let value = clean_number(cell(ColumnRole::Value)?)?;

    let size = cell(ColumnRole::Size).and_then(clean_number);
    if size.is_some_and(|size| size <= 0.0) {
        return None;
    }
    if size.is_none() && hints.is_required(ColumnRole::Size) {
        return None;
    }

    let occupancy = cell(ColumnRole::Occupancy).and_then(clean_number);
    if occupancy.is_none() && hints.is_required(ColumnRole::Occupancy) {
        return None;
    }

    let sub_key = columns.get(ColumnRole::Layout).map(|_| {
        let text = cell(ColumnRole::Layout)
            .map(|value| value.as_text())
            .unwrap_or_default();
        if text.is_empty() {
            UNSPECIFIED_LAYOUT.to_string()
        } else {
            text
        }
    });

    Some(CleanRow {
        key,
        sub_key,
        value,
        psf: size.map(|size| value / size),
        occupancy,
    })
}

fn summarize_sub_groups(rows: &[&CleanRow], selection: &StatisticsSelection) -> Vec<GroupSummary> {
    let mut by_sub_key: BTreeMap<&str, Vec<&CleanRow>> = BTreeMap::new();
    for &row in rows {
        let sub_key = row.sub_key.as_deref().unwrap_or(UNSPECIFIED_LAYOUT);
        by_sub_key.entry(sub_key).or_default().push(row);
    }
    by_sub_key
        .into_iter()
        .map(|(sub_key, sub_rows)| summarize_group(sub_key, &sub_rows, selection))
        .collect()
}

fn summarize_group(key: &str, rows: &[&CleanRow], selection: &StatisticsSelection) -> GroupSummary {
    let values: Vec<f64> = rows.iter().map(|r| r.value).collect();
    let psfs: Vec<f64> = rows.iter().filter_map(|r| r.psf).collect();
    let occupancies: Vec<f64> = rows.iter().filter_map(|r| r.occupancy).collect();

    GroupSummary {
        key: key.to_string(),
        count: rows.len(),
        value: RangeStats::from_values(&values).unwrap_or(RangeStats {
            min: 0.0,
            max: 0.0,
            mean: 0.0,
        }),
        psf: RangeStats::from_values(&psfs),
        median: selection.median.then(|| stats::median(&values)).flatten(),
        mode: selection.mode.then(|| stats::mode(&values)).flatten(),
        occupancy: RangeStats::from_values(&occupancies),
        quartiles: selection
            .quartiles
            .then(|| stats::quartiles(&occupancies))
            .flatten(),
        sub_groups: Vec::new(),
    }
}
