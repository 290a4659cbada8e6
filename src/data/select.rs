use std::collections::HashSet;
use std::fmt;

use thiserror::Error;

use super::model::{EmissionsTable, normalize_country_name};

// ---------------------------------------------------------------------------
// Arity: how many countries a call site wants
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Arity {
    /// Exactly `n` names.
    Exactly(usize),
    /// Between 1 and `n` names, inclusive.
    UpTo(usize),
}

impl Arity {
    pub fn accepts(self, count: usize) -> bool {
        match self {
            Arity::Exactly(n) => count == n,
            Arity::UpTo(n) => (1..=n).contains(&count),
        }
    }
}

impl fmt::Display for Arity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Arity::Exactly(n) => write!(f, "exactly {n}"),
            Arity::UpTo(n) => write!(f, "from 1 to {n}"),
        }
    }
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum SelectionError {
    #[error("you must enter {expected} countries, got {got}")]
    WrongCount { expected: Arity, got: usize },
    #[error("'{0}' was entered more than once")]
    Duplicate(String),
    #[error("unknown countries: {}", .0.join(", "))]
    Unknown(Vec<String>),
}

// ---------------------------------------------------------------------------
// Selection
// ---------------------------------------------------------------------------

/// Split a comma-separated input line into candidate names.
pub fn split_names(input: &str) -> Vec<&str> {
    input.split(',').collect()
}

/// Normalize `names` to the table's naming convention and check them against
/// `arity`, for duplicates and for membership, in that order.
///
/// The returned names keep the order in which they were supplied.
pub fn select_countries<S: AsRef<str>>(
    table: &EmissionsTable,
    names: &[S],
    arity: Arity,
) -> Result<Vec<String>, SelectionError> {
    if !arity.accepts(names.len()) {
        return Err(SelectionError::WrongCount {
            expected: arity,
            got: names.len(),
        });
    }

    let normalized: Vec<String> = names
        .iter()
        .map(|n| normalize_country_name(n.as_ref()))
        .collect();

    let mut seen = HashSet::with_capacity(normalized.len());
    if let Some(dup) = normalized.iter().find(|n| !seen.insert(n.as_str())) {
        return Err(SelectionError::Duplicate(dup.clone()));
    }

    let unknown: Vec<String> = normalized
        .iter()
        .filter(|n| !table.contains(n))
        .cloned()
        .collect();
    if !unknown.is_empty() {
        return Err(SelectionError::Unknown(unknown));
    }

    Ok(normalized)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::loader::load_reader;

    fn table() -> EmissionsTable {
        load_reader(
            "x,2019\nFrance,1\nGermany,2\nBosnia and Herzegovina,3\nCote d'Ivoire,4\n".as_bytes(),
        )
        .unwrap()
    }

    #[test]
    fn trims_and_title_cases() {
        let got = select_countries(&table(), &split_names(" france "), Arity::Exactly(1)).unwrap();
        assert_eq!(got, ["France"]);
    }

    #[test]
    fn keeps_supplied_order() {
        let got = select_countries(
            &table(),
            &split_names("germany, bosnia and herzegovina,COTE D'IVOIRE"),
            Arity::UpTo(3),
        )
        .unwrap();
        assert_eq!(got, ["Germany", "Bosnia and Herzegovina", "Cote d'Ivoire"]);
    }

    #[test]
    fn duplicate_after_normalization_is_rejected() {
        let err = select_countries(&table(), &split_names("france,France"), Arity::Exactly(2))
            .unwrap_err();
        assert_eq!(err, SelectionError::Duplicate("France".to_string()));
    }

    #[test]
    fn unknown_country_is_rejected() {
        let err = select_countries(&table(), &["Atlantis"], Arity::Exactly(1)).unwrap_err();
        assert_eq!(err, SelectionError::Unknown(vec!["Atlantis".to_string()]));
    }

    #[test]
    fn exact_count_is_enforced() {
        let err = select_countries(&table(), &split_names("france,germany"), Arity::Exactly(1))
            .unwrap_err();
        assert_eq!(
            err,
            SelectionError::WrongCount {
                expected: Arity::Exactly(1),
                got: 2
            }
        );
    }

    #[test]
    fn range_count_is_enforced() {
        let four = split_names("france,germany,cote d'ivoire,bosnia and herzegovina");
        assert!(matches!(
            select_countries(&table(), &four, Arity::UpTo(3)),
            Err(SelectionError::WrongCount { got: 4, .. })
        ));
        let none: [&str; 0] = [];
        assert!(matches!(
            select_countries(&table(), &none, Arity::UpTo(3)),
            Err(SelectionError::WrongCount { got: 0, .. })
        ));
    }

    #[test]
    fn arity_messages() {
        assert_eq!(Arity::Exactly(2).to_string(), "exactly 2");
        assert_eq!(Arity::UpTo(3).to_string(), "from 1 to 3");
    }
}
