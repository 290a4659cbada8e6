use std::io::Read;
use std::path::{Path, PathBuf};

use thiserror::Error;

use super::model::{CountryRow, EmissionsTable};

// ---------------------------------------------------------------------------
// Errors
// ---------------------------------------------------------------------------

/// The input file does not have the expected header-plus-rows shape.
#[derive(Debug, Error)]
pub enum FormatError {
    #[error("cannot read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("malformed CSV: {0}")]
    Csv(#[from] csv::Error),
    #[error("the file is empty")]
    Empty,
    #[error("the file must have at least two rows of data")]
    TooShort,
    #[error("line {line}: expected {expected} cells, found {found}")]
    RaggedRow {
        line: u64,
        expected: usize,
        found: usize,
    },
    #[error("country '{0}' appears more than once")]
    DuplicateCountry(String),
    #[error("'{cell}' is not a valid {kind}")]
    BadCell { cell: String, kind: &'static str },
}

// ---------------------------------------------------------------------------
// Public entry-points
// ---------------------------------------------------------------------------

/// Load an emissions table from a CSV file.
pub fn load_file(path: &Path) -> Result<EmissionsTable, FormatError> {
    let file = std::fs::File::open(path).map_err(|source| FormatError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    let table = load_reader(file)?;
    log::info!(
        "Loaded {} countries x {} years from {}",
        table.len(),
        table.years().len(),
        path.display()
    );
    log::debug!("Countries: {:?}", table.country_names().collect::<Vec<_>>());
    Ok(table)
}

/// Parse an emissions table from any CSV source.
///
/// Layout:
/// ```text
/// CO2 per capita,2019,2020,2021
/// France,1.1,1.2,1.3
/// Germany,2.1,1.9,2.0
/// ```
pub fn load_reader<R: Read>(source: R) -> Result<EmissionsTable, FormatError> {
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .from_reader(source);

    let mut records = reader.records();

    let header = match records.next() {
        Some(record) => record?,
        None => return Err(FormatError::Empty),
    };
    let mut header_cells = header.iter().map(str::to_string);
    let label = header_cells.next().unwrap_or_default();
    let years: Vec<String> = header_cells.collect();
    let expected = header.len();

    let mut rows = Vec::new();
    for result in records {
        let record = result?;
        if record.len() != expected {
            return Err(FormatError::RaggedRow {
                line: record.position().map(|p| p.line()).unwrap_or(0),
                expected,
                found: record.len(),
            });
        }
        let mut cells = record.iter().map(str::to_string);
        let name = cells.next().unwrap_or_default();
        rows.push(CountryRow {
            name,
            values: cells.collect(),
        });
    }

    if rows.is_empty() {
        return Err(FormatError::TooShort);
    }

    EmissionsTable::from_rows(label, years, rows)
}

/// Append `.csv` unless the path already has that extension (any case).
/// Another extension is kept: `data.txt` becomes `data.txt.csv`.
pub fn csv_path(input: &Path) -> PathBuf {
    let is_csv = input
        .extension()
        .is_some_and(|ext| ext.eq_ignore_ascii_case("csv"));
    if is_csv {
        return input.to_path_buf();
    }
    let mut name = input.as_os_str().to_owned();
    name.push(".csv");
    PathBuf::from(name)
}
