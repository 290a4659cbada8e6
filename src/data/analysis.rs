use serde::Serialize;
use thiserror::Error;

use super::loader::FormatError;
use super::model::{EmissionsTable, parse_value};

/// The requested year cannot be analyzed against this header.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum RangeError {
    #[error("{year} is outside the range {min}-{max}")]
    OutOfRange { year: i64, min: i64, max: i64 },
    #[error("{0} has no column in the data")]
    MissingYear(i64),
}

#[derive(Debug, Error)]
pub enum AnalysisError {
    #[error(transparent)]
    Range(#[from] RangeError),
    #[error(transparent)]
    Format(#[from] FormatError),
}

/// Min / max / mean over one year column.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct YearSummary {
    pub year: i64,
    pub min_country: String,
    pub min_value: f64,
    pub max_country: String,
    pub max_value: f64,
    /// Mean of all countries, rounded to 6 decimals (ties to even).
    pub average: f64,
    pub countries: usize,
}

/// Summarize the column for `year`.
///
/// On equal extremes the country that comes first in the file is reported.
pub fn analyze_year(table: &EmissionsTable, year: i64) -> Result<YearSummary, AnalysisError> {
    let years = table.parsed_years().map_err(|_| bad_year(table))?;
    let (min, max) = match (years.iter().min(), years.iter().max()) {
        (Some(&min), Some(&max)) => (min, max),
        _ => return Err(RangeError::MissingYear(year).into()),
    };
    if year < min || year > max {
        return Err(RangeError::OutOfRange { year, min, max }.into());
    }
    let col = years
        .iter()
        .position(|&y| y == year)
        .ok_or(RangeError::MissingYear(year))?;

    let mut lowest: Option<(&str, f64)> = None;
    let mut highest: Option<(&str, f64)> = None;
    let mut sum = 0.0;

    for row in table.rows() {
        let cell = &row.values[col];
        let value = parse_value(cell).ok_or_else(|| FormatError::BadCell {
            cell: cell.clone(),
            kind: "number",
        })?;
        if lowest.map_or(true, |(_, v)| value < v) {
            lowest = Some((row.name.as_str(), value));
        }
        if highest.map_or(true, |(_, v)| value > v) {
            highest = Some((row.name.as_str(), value));
        }
        sum += value;
    }

    let (Some((min_country, min_value)), Some((max_country, max_value))) = (lowest, highest)
    else {
        return Err(FormatError::TooShort.into());
    };

    Ok(YearSummary {
        year,
        min_country: min_country.to_string(),
        min_value,
        max_country: max_country.to_string(),
        max_value,
        average: round_to(sum / table.len() as f64, 6),
        countries: table.len(),
    })
}

fn bad_year(table: &EmissionsTable) -> FormatError {
    let cell = table
        .years()
        .iter()
        .find(|y| y.trim().parse::<i64>().is_err())
        .cloned()
        .unwrap_or_default();
    FormatError::BadCell { cell, kind: "year" }
}

/// Round to `decimals` places, ties to even.
///
/// Rounds the exact binary value through its decimal expansion, so
/// `10.0000005` (stored slightly above the half) goes up to `10.000001`.
pub fn round_to(value: f64, decimals: usize) -> f64 {
    format!("{value:.decimals$}").parse().unwrap_or(value)
}
