use std::collections::HashMap;
use std::num::ParseIntError;

use super::loader::FormatError;

// ---------------------------------------------------------------------------
// CountryRow – one row of the source file
// ---------------------------------------------------------------------------

/// One country's series, kept as the raw cell text of the source file.
///
/// Cells are parsed on demand so that a malformed value is reported by
/// [`EmissionsTable::validate`] instead of aborting the load.
#[derive(Debug, Clone, PartialEq)]
pub struct CountryRow {
    pub name: String,
    /// One cell per header year, positionally aligned.
    pub values: Vec<String>,
}

impl CountryRow {
    /// Parse every cell as `f64`.
    pub fn parsed_values(&self) -> Result<Vec<f64>, (usize, &str)> {
        self.values
            .iter()
            .enumerate()
            .map(|(i, v)| parse_value(v).ok_or((i, v.as_str())))
            .collect()
    }
}

// ---------------------------------------------------------------------------
// EmissionsTable – the complete loaded dataset
// ---------------------------------------------------------------------------

/// Header row plus an insertion-ordered country → series mapping.
///
/// Built once through [`EmissionsTable::from_rows`], which enforces unique
/// names and one value per year in every row, and never mutated afterwards.
#[derive(Debug, Clone, PartialEq)]
pub struct EmissionsTable {
    label: String,
    years: Vec<String>,
    rows: Vec<CountryRow>,
    index: HashMap<String, usize>,
}

impl EmissionsTable {
    /// Build a table from already split rows.
    ///
    /// Row positions in errors count the header as line 1.
    pub fn from_rows(
        label: String,
        years: Vec<String>,
        rows: Vec<CountryRow>,
    ) -> Result<Self, FormatError> {
        let mut index = HashMap::with_capacity(rows.len());
        for (i, row) in rows.iter().enumerate() {
            if row.values.len() != years.len() {
                return Err(FormatError::RaggedRow {
                    line: i as u64 + 2,
                    expected: years.len() + 1,
                    found: row.values.len() + 1,
                });
            }
            if index.insert(row.name.clone(), i).is_some() {
                return Err(FormatError::DuplicateCountry(row.name.clone()));
            }
        }
        Ok(EmissionsTable {
            label,
            years,
            rows,
            index,
        })
    }

    /// First cell of the header row, e.g. `CO2 per capita`.
    pub fn label(&self) -> &str {
        &self.label
    }

    /// Year cells of the header row (raw text).
    pub fn years(&self) -> &[String] {
        &self.years
    }

    /// Countries in file order.
    pub fn rows(&self) -> &[CountryRow] {
        &self.rows
    }

    pub fn country_names(&self) -> impl Iterator<Item = &str> {
        self.rows.iter().map(|r| r.name.as_str())
    }

    pub fn get(&self, country: &str) -> Option<&CountryRow> {
        self.index.get(country).map(|&i| &self.rows[i])
    }

    pub fn contains(&self, country: &str) -> bool {
        self.index.contains_key(country)
    }

    /// Number of countries.
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    /// Header years parsed as integers.
    pub fn parsed_years(&self) -> Result<Vec<i64>, ParseIntError> {
        self.years.iter().map(|y| y.trim().parse::<i64>()).collect()
    }

    /// Inclusive `(min, max)` of the header years, `None` for an empty header.
    pub fn year_bounds(&self) -> Result<Option<(i64, i64)>, ParseIntError> {
        let years = self.parsed_years()?;
        Ok(years
            .iter()
            .copied()
            .min()
            .zip(years.iter().copied().max()))
    }

    /// Check the table against the fixed layout: integer years, alphabetic
    /// country names (ignoring `-`, `'` and spaces) and float values.
    ///
    /// Stops at the first violation, scanning the header first and then the
    /// countries in file order.
    pub fn validate(&self) -> bool {
        if let Some(bad) = self.years.iter().find(|y| y.trim().parse::<i64>().is_err()) {
            log::warn!("Header cell '{bad}' is not an integer year");
            return false;
        }
        for row in &self.rows {
            if !is_country_name(&row.name) {
                log::warn!("Country name '{}' is not alphabetic", row.name);
                return false;
            }
            if let Err((col, cell)) = row.parsed_values() {
                log::warn!(
                    "{}: value '{cell}' for year {} is not a number",
                    row.name,
                    self.years.get(col).map(String::as_str).unwrap_or("?")
                );
                return false;
            }
        }
        true
    }
}

// ---------------------------------------------------------------------------
// Cell helpers
// ---------------------------------------------------------------------------

/// Parse a value cell, tolerating surrounding whitespace.
pub fn parse_value(cell: &str) -> Option<f64> {
    cell.trim().parse::<f64>().ok()
}

fn is_country_name(name: &str) -> bool {
    let mut letters = name.chars().filter(|c| !matches!(c, '-' | '\'' | ' ')).peekable();
    letters.peek().is_some() && letters.all(char::is_alphabetic)
}

// ---------------------------------------------------------------------------
// Country-name normalization
// ---------------------------------------------------------------------------

/// Bring free-form input to the naming convention of the data files:
/// title case, except for a lowercase `and` between words and a lowercase
/// `d'` prefix (`Cote d'Ivoire`, `Bosnia and Herzegovina`).
pub fn normalize_country_name(raw: &str) -> String {
    title_case(raw.trim())
        .replace(" And ", " and ")
        .replace("D'", "d'")
}

/// Capitalize the first letter of every run of letters and lowercase the rest.
/// Any non-letter (space, apostrophe, hyphen, digit) starts a new run.
fn title_case(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    let mut in_word = false;
    for c in s.chars() {
        if c.is_alphabetic() {
            if in_word {
                out.extend(c.to_lowercase());
            } else {
                out.extend(c.to_uppercase());
            }
            in_word = true;
        } else {
            out.push(c);
            in_word = false;
        }
    }
    out
}
