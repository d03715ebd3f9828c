//! Column-role detection.
//!
//! Uploaded spreadsheets name their columns however they like. Each semantic
//! role carries an ordered list of name fragments; fragments are tried in
//! priority order and the first column (in column order) containing the
//! fragment, case-insensitively, wins. Column order is header order for CSV
//! uploads and sorted key order for JSON records. A column claimed by one
//! role is not offered to the roles resolved after it.

use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::{AnalysisError, AnalysisResult};

/// Semantic role a column can play in a summary
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum ColumnRole {
    /// Primary grouping key (development / project)
    Development,
    /// Secondary grouping key (bedroom type / layout)
    Layout,
    /// Measured amount (price / rent / nightly rate)
    Value,
    /// Divisor for per-square-foot figures
    Size,
    /// Short-stay occupancy rate
    Occupancy,
}

impl ColumnRole {
    pub fn label(&self) -> &'static str {
        match self {
            ColumnRole::Development => "Development",
            ColumnRole::Layout => "Bedroom type",
            ColumnRole::Value => "Price",
            ColumnRole::Size => "Size",
            ColumnRole::Occupancy => "Occupancy rate",
        }
    }

    /// Label plus examples of accepted column names, for end users
    pub fn describe(&self) -> String {
        let examples = match self {
            ColumnRole::Development => "development, project, property",
            ColumnRole::Layout => "bedroom, layout, type",
            ColumnRole::Value => "price, rent, asking",
            ColumnRole::Size => "size, sqft, built-up",
            ColumnRole::Occupancy => "occupancy",
        };
        format!("{} (e.g. {})", self.label(), examples)
    }
}

impl fmt::Display for ColumnRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// How to find one role among the column names
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RoleHint {
    pub role: ColumnRole,
    /// Lower-case name fragments in priority order
    pub fragments: Vec<String>,
    pub required: bool,
}

impl RoleHint {
    pub fn new(role: ColumnRole, fragments: &[&str], required: bool) -> Self {
        Self {
            role,
            fragments: fragments.iter().map(|f| f.to_lowercase()).collect(),
            required,
        }
    }

    /// First column matching any fragment, fragments tried in order
    pub fn resolve<'a>(&self, columns: &'a [String]) -> Option<&'a str> {
        self.resolve_unclaimed(columns, &[])
    }

    /// Same as `resolve`, ignoring columns in `claimed`
    pub fn resolve_unclaimed<'a>(&self, columns: &'a [String], claimed: &[&str]) -> Option<&'a str> {
        let lowered: Vec<String> = columns.iter().map(|c| c.to_lowercase()).collect();
        self.fragments.iter().find_map(|fragment| {
            lowered
                .iter()
                .zip(columns)
                .find(|(lower, column)| {
                    lower.contains(fragment.as_str()) && !claimed.contains(&column.as_str())
                })
                .map(|(_, column)| column.as_str())
        })
    }
}

/// Ordered role hints for one kind of summary
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RoleHints {
    pub hints: Vec<RoleHint>,
}

impl RoleHints {
    pub fn new(hints: Vec<RoleHint>) -> Self {
        Self { hints }
    }

    /// Resolve every role in hint order, each column going to at most one
    /// role. Fails with `MissingColumns` listing each unresolved required role.
    pub fn resolve(&self, columns: &[String]) -> AnalysisResult<ColumnMapping> {
        let mut resolved = BTreeMap::new();
        let mut claimed: Vec<&str> = Vec::new();
        let mut missing = Vec::new();

        for hint in &self.hints {
            match hint.resolve_unclaimed(columns, &claimed) {
                Some(column) => {
                    claimed.push(column);
                    resolved.insert(hint.role, column.to_string());
                }
                None if hint.required => missing.push(hint.role),
                None => {}
            }
        }

        if missing.is_empty() {
            Ok(ColumnMapping { resolved })
        } else {
            Err(AnalysisError::MissingColumns { roles: missing })
        }
    }

    pub fn is_required(&self, role: ColumnRole) -> bool {
        self.hints.iter().any(|h| h.role == role && h.required)
    }
}

/// Role → resolved column name
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ColumnMapping {
    pub resolved: BTreeMap<ColumnRole, String>,
}

impl ColumnMapping {
    pub fn get(&self, role: ColumnRole) -> Option<&str> {
        self.resolved.get(&role).map(String::as_str)
    }

    pub fn has(&self, role: ColumnRole) -> bool {
        self.resolved.contains_key(&role)
    }
}

pub(crate) const DEVELOPMENT_FRAGMENTS: &[&str] =
    &["development", "project", "property", "building", "condo", "name"];
pub(crate) const LAYOUT_FRAGMENTS: &[&str] = &["bedroom", "layout", "room", "type", "unit"];
pub(crate) const SIZE_FRAGMENTS: &[&str] =
    &["size", "sqft", "sq ft", "sq. ft", "built-up", "built up", "builtup", "area"];
pub(crate) const OCCUPANCY_FRAGMENTS: &[&str] = &["occupancy", "occupied"];

#[cfg(test)]
mod tests {
    use super::*;

    fn columns(names: &[&str]) -> Vec<String> {
        names.iter().map(|n| n.to_string()).collect()
    }

    #[test]
    fn test_fragment_priority_beats_column_order() {
        let hint = RoleHint::new(ColumnRole::Development, DEVELOPMENT_FRAGMENTS, true);
        let cols = columns(&["Agent Name", "Project", "Development Name"]);
        assert_eq!(hint.resolve(&cols), Some("Development Name"));
    }

    #[test]
    fn test_matching_is_case_insensitive_substring() {
        let hint = RoleHint::new(ColumnRole::Size, SIZE_FRAGMENTS, true);
        assert_eq!(hint.resolve(&columns(&["Unit", "BUILT-UP (SQFT)"])), Some("BUILT-UP (SQFT)"));
        assert_eq!(hint.resolve(&columns(&["Unit", "Price"])), None);
    }

    #[test]
    fn test_missing_columns_names_every_required_role() {
        let hints = RoleHints::new(vec![
            RoleHint::new(ColumnRole::Development, DEVELOPMENT_FRAGMENTS, true),
            RoleHint::new(ColumnRole::Layout, LAYOUT_FRAGMENTS, false),
            RoleHint::new(ColumnRole::Value, &["price"], true),
            RoleHint::new(ColumnRole::Size, SIZE_FRAGMENTS, true),
        ]);

        let err = hints.resolve(&columns(&["Remarks"])).unwrap_err();
        match err {
            AnalysisError::MissingColumns { roles } => {
                assert_eq!(
                    roles,
                    vec![ColumnRole::Development, ColumnRole::Value, ColumnRole::Size]
                );
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_column_goes_to_one_role_only() {
        let hints = RoleHints::new(vec![
            RoleHint::new(ColumnRole::Occupancy, OCCUPANCY_FRAGMENTS, true),
            RoleHint::new(ColumnRole::Value, &["nightly", "rate"], true),
        ]);
        let mapping = hints
            .resolve(&columns(&["Occupancy Rate", "Daily Rate"]))
            .unwrap();
        assert_eq!(mapping.get(ColumnRole::Occupancy), Some("Occupancy Rate"));
        assert_eq!(mapping.get(ColumnRole::Value), Some("Daily Rate"));

        // Nothing left for the second role
        let err = hints.resolve(&columns(&["Occupancy Rate"])).unwrap_err();
        assert!(matches!(
            err,
            AnalysisError::MissingColumns { roles } if roles == vec![ColumnRole::Value]
        ));
    }

    #[test]
    fn test_optional_roles_may_be_absent() {
        let hints = RoleHints::new(vec![
            RoleHint::new(ColumnRole::Development, DEVELOPMENT_FRAGMENTS, true),
            RoleHint::new(ColumnRole::Layout, LAYOUT_FRAGMENTS, false),
        ]);
        let mapping = hints.resolve(&columns(&["Project"])).unwrap();
        assert_eq!(mapping.get(ColumnRole::Development), Some("Project"));
        assert!(!mapping.has(ColumnRole::Layout));
        assert!(hints.is_required(ColumnRole::Development));
        assert!(!hints.is_required(ColumnRole::Layout));
    }
}
