//! Loosely typed field → value records as handed over by spreadsheet ingestion

use std::collections::BTreeMap;
use std::io::Read;

use serde::{Deserialize, Serialize};

use crate::error::AnalysisResult;

/// A single spreadsheet cell
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum CellValue {
    Number(f64),
    Text(String),
    Bool(bool),
    Empty,
}

impl CellValue {
    /// Text form used for grouping keys; numbers print without a trailing ".0"
    pub fn as_text(&self) -> String {
        match self {
            CellValue::Number(n) if n.fract() == 0.0 && n.abs() < 1e15 => format!("{}", *n as i64),
            CellValue::Number(n) => n.to_string(),
            CellValue::Text(s) => s.trim().to_string(),
            CellValue::Bool(b) => b.to_string(),
            CellValue::Empty => String::new(),
        }
    }

    pub fn is_empty(&self) -> bool {
        match self {
            CellValue::Empty => true,
            CellValue::Text(s) => s.trim().is_empty(),
            _ => false,
        }
    }
}

impl From<&str> for CellValue {
    fn from(value: &str) -> Self {
        if value.is_empty() {
            CellValue::Empty
        } else {
            CellValue::Text(value.to_string())
        }
    }
}

impl From<f64> for CellValue {
    fn from(value: f64) -> Self {
        CellValue::Number(value)
    }
}

/// One row, keyed by column name (iterates in sorted key order)
pub type Record = BTreeMap<String, CellValue>;

/// Records together with their column names: header order for CSV,
/// sorted key order for JSON
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RecordSet {
    pub columns: Vec<String>,
    pub records: Vec<Record>,
}

impl RecordSet {
    /// Build from records. Columns are collected in first-seen order across
    /// records, each record contributing its keys in sorted order; the source
    /// document's key order is not kept.
    pub fn from_records(records: Vec<Record>) -> Self {
        let mut columns: Vec<String> = Vec::new();
        for record in &records {
            for key in record.keys() {
                if !columns.iter().any(|c| c == key) {
                    columns.push(key.clone());
                }
            }
        }
        Self { columns, records }
    }

    /// Read a CSV upload, keeping the header order
    pub fn from_csv_reader<R: Read>(reader: R) -> AnalysisResult<Self> {
        let mut csv_reader = csv::ReaderBuilder::new().flexible(true).from_reader(reader);
        let columns: Vec<String> = csv_reader
            .headers()?
            .iter()
            .map(|h| h.trim().to_string())
            .collect();

        let mut records = Vec::new();
        for result in csv_reader.records() {
            let row = result?;
            let record: Record = columns
                .iter()
                .zip(row.iter())
                .map(|(column, cell)| (column.clone(), CellValue::from(cell)))
                .collect();
            records.push(record);
        }

        Ok(Self { columns, records })
    }

    /// Parse a JSON array of objects
    pub fn from_json_str(json: &str) -> AnalysisResult<Self> {
        let records: Vec<Record> = serde_json::from_str(json)?;
        Ok(Self::from_records(records))
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_csv_keeps_header_order() {
        let csv = "Project Name,Bedrooms,Monthly Rent,Built-up (sqft)\n\
                   Skyline,2,\"RM 2,500\",850\n\
                   Harbour,Studio,,450\n";
        let set = RecordSet::from_csv_reader(csv.as_bytes()).unwrap();
        assert_eq!(
            set.columns,
            vec!["Project Name", "Bedrooms", "Monthly Rent", "Built-up (sqft)"]
        );
        assert_eq!(set.len(), 2);
        assert_eq!(
            set.records[0]["Monthly Rent"],
            CellValue::Text("RM 2,500".to_string())
        );
        assert_eq!(set.records[1]["Monthly Rent"], CellValue::Empty);
    }

    #[test]
    fn test_json_records_are_loosely_typed() {
        let json = r#"[
            {"Development": "Skyline", "Price": 450000, "Size": "1,000", "Verified": true},
            {"Development": "Harbour", "Price": null, "Size": 800}
        ]"#;
        let set = RecordSet::from_json_str(json).unwrap();
        assert_eq!(set.len(), 2);
        assert_eq!(set.records[0]["Price"], CellValue::Number(450000.0));
        assert_eq!(set.records[0]["Verified"], CellValue::Bool(true));
        assert_eq!(set.records[1]["Price"], CellValue::Empty);
        assert!(set.columns.contains(&"Verified".to_string()));
    }

    #[test]
    fn test_json_columns_follow_key_order_not_document_order() {
        let json = r#"[
            {"Size": 800, "Project": "Skyline"},
            {"Price": 450000, "Project": "Harbour"}
        ]"#;
        let set = RecordSet::from_json_str(json).unwrap();
        assert_eq!(set.columns, vec!["Project", "Size", "Price"]);
    }

    #[test]
    fn test_cell_text_form() {
        assert_eq!(CellValue::Number(2.0).as_text(), "2");
        assert_eq!(CellValue::Number(2.5).as_text(), "2.5");
        assert_eq!(CellValue::Text("  Studio ".into()).as_text(), "Studio");
        assert!(CellValue::Text("   ".into()).is_empty());
    }
}
