/// Data layer: table model, loading, analysis, selection and extraction.
///
/// Architecture:
/// ```text
///   emissions .csv
///        │
///        ▼
///   ┌──────────┐
///   │  loader   │  parse file → EmissionsTable
///   └──────────┘
///        │
///        ▼
///   ┌────────────────┐
///   │ EmissionsTable  │  label, years, rows + name index
///   └────────────────┘
///        │
///        ├──▶ analysis   year column → min / max / mean
///        ├──▶ select     user input → normalized country names
///        └──▶ extract    header + chosen rows → <stem>_subset[_N].csv
/// ```

pub mod analysis;
pub mod extract;
pub mod loader;
pub mod model;
pub mod select;
