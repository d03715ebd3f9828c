//! Numeric value cleaning for spreadsheet cells

use super::records::CellValue;

/// Symbols stripped before parsing
const STRIP_SYMBOLS: &[&str] = &["RM", "rm", "Rm", ",", "%"];

/// Parse a formatted number such as "RM 2,500" or "65%".
/// Returns `None` for blanks, text that is not a number, and non-finite values.
pub fn clean_number(value: &CellValue) -> Option<f64> {
    match value {
        CellValue::Number(n) if n.is_finite() => Some(*n),
        CellValue::Text(text) => clean_text(text),
        _ => None,
    }
}

fn clean_text(text: &str) -> Option<f64> {
    let mut cleaned = text.to_string();
    for symbol in STRIP_SYMBOLS {
        cleaned = cleaned.replace(symbol, "");
    }
    let cleaned: String = cleaned.chars().filter(|c| !c.is_whitespace()).collect();
    if cleaned.is_empty() {
        return None;
    }
    cleaned.parse::<f64>().ok().filter(|n| n.is_finite())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn text(s: &str) -> CellValue {
        CellValue::Text(s.to_string())
    }

    #[test]
    fn test_strips_currency_separators_and_percent() {
        assert_eq!(clean_number(&text("RM 2,500")), Some(2500.0));
        assert_eq!(clean_number(&text("RM1,234,567.50")), Some(1_234_567.5));
        assert_eq!(clean_number(&text("65%")), Some(65.0));
        assert_eq!(clean_number(&text(" 850 ")), Some(850.0));
        assert_eq!(clean_number(&CellValue::Number(12.5)), Some(12.5));
    }

    #[test]
    fn test_unparseable_values() {
        assert_eq!(clean_number(&text("")), None);
        assert_eq!(clean_number(&text("RM")), None);
        assert_eq!(clean_number(&text("call agent")), None);
        assert_eq!(clean_number(&text("NaN")), None);
        assert_eq!(clean_number(&CellValue::Number(f64::INFINITY)), None);
        assert_eq!(clean_number(&CellValue::Empty), None);
        assert_eq!(clean_number(&CellValue::Bool(true)), None);
    }
}
