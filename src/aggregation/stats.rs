//! Summary statistics: range, mean, median, mode and interpolated quartiles

use std::fmt;

use serde::{Deserialize, Serialize};

/// Minimum sample size for quartiles
pub const MIN_QUARTILE_SAMPLES: usize = 4;

/// Min, max and mean of a sample
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RangeStats {
    pub min: f64,
    pub max: f64,
    pub mean: f64,
}

impl RangeStats {
    /// `None` for an empty sample
    pub fn from_values(values: &[f64]) -> Option<Self> {
        if values.is_empty() {
            return None;
        }
        let min = values.iter().copied().fold(f64::INFINITY, f64::min);
        let max = values.iter().copied().fold(f64::NEG_INFINITY, f64::max);
        Some(Self {
            min,
            max,
            mean: mean(values),
        })
    }
}

/// Most frequent value(s) of a sample
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "values", rename_all = "camelCase")]
pub enum Mode {
    /// Every value occurs once
    NoMode,
    /// All values tied at the highest frequency, ascending
    Values(Vec<f64>),
}

impl fmt::Display for Mode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Mode::NoMode => f.write_str("N/A"),
            Mode::Values(values) => {
                let joined = values
                    .iter()
                    .map(|v| format_number(*v))
                    .collect::<Vec<_>>()
                    .join(", ");
                f.write_str(&joined)
            }
        }
    }
}

/// Occupancy quartiles: 25th, 50th and 75th percentiles
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Quartiles {
    pub worst: f64,
    pub current: f64,
    pub best: f64,
}

pub fn mean(values: &[f64]) -> f64 {
    if values.is_empty() {
        return 0.0;
    }
    values.iter().sum::<f64>() / values.len() as f64
}

fn sorted(values: &[f64]) -> Vec<f64> {
    let mut sorted = values.to_vec();
    sorted.sort_by(f64::total_cmp);
    sorted
}

/// Middle value; the average of the two middle values for even counts
pub fn median(values: &[f64]) -> Option<f64> {
    if values.is_empty() {
        return None;
    }
    let sorted = sorted(values);
    let mid = sorted.len() / 2;
    if sorted.len() % 2 == 0 {
        Some((sorted[mid - 1] + sorted[mid]) / 2.0)
    } else {
        Some(sorted[mid])
    }
}

/// Mode of a sample with more than one member, `None` otherwise.
/// Ties at the highest frequency are all reported.
pub fn mode(values: &[f64]) -> Option<Mode> {
    if values.len() <= 1 {
        return None;
    }

    let sorted = sorted(values);
    let mut runs: Vec<(f64, usize)> = Vec::new();
    for value in sorted {
        match runs.last_mut() {
            Some((last, count)) if *last == value => *count += 1,
            _ => runs.push((value, 1)),
        }
    }

    let max_frequency = runs.iter().map(|(_, count)| *count).max().unwrap_or(0);
    if max_frequency <= 1 {
        return Some(Mode::NoMode);
    }

    let values = runs
        .into_iter()
        .filter(|(_, count)| *count == max_frequency)
        .map(|(value, _)| value)
        .collect();
    Some(Mode::Values(values))
}

/// Linear-interpolation quantile of an ascending sample. `q` is clamped to
/// [0, 1]; NaN yields `None`.
pub fn quantile_sorted(sorted: &[f64], q: f64) -> Option<f64> {
    if sorted.is_empty() || q.is_nan() {
        return None;
    }
    let q = q.clamp(0.0, 1.0);
    let position = (sorted.len() - 1) as f64 * q;
    let lower = position.floor() as usize;
    let upper = position.ceil() as usize;
    let weight = position - lower as f64;
    Some(sorted[lower] + (sorted[upper] - sorted[lower]) * weight)
}

/// Quartiles of a sample with more than three members
pub fn quartiles(values: &[f64]) -> Option<Quartiles> {
    if values.len() < MIN_QUARTILE_SAMPLES {
        return None;
    }
    let sorted = sorted(values);
    Some(Quartiles {
        worst: quantile_sorted(&sorted, 0.25)?,
        current: quantile_sorted(&sorted, 0.5)?,
        best: quantile_sorted(&sorted, 0.75)?,
    })
}

/// Whole numbers print without decimals
fn format_number(value: f64) -> String {
    if value.fract() == 0.0 && value.abs() < 1e15 {
        format!("{}", value as i64)
    } else {
        value.to_string()
    }
}
