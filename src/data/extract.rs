use std::path::{Path, PathBuf};

use anyhow::{Context, Result};

use super::model::EmissionsTable;

/// Header row followed by the rows of `countries`, in the given order.
///
/// Names that are not in the table are skipped; callers are expected to pass
/// the output of [`select_countries`](super::select::select_countries).
pub fn extract_subset<S: AsRef<str>>(table: &EmissionsTable, countries: &[S]) -> Vec<Vec<String>> {
    let mut rows = Vec::with_capacity(countries.len() + 1);

    let mut header = Vec::with_capacity(table.years().len() + 1);
    header.push(table.label().to_string());
    header.extend(table.years().iter().cloned());
    rows.push(header);

    for name in countries {
        let Some(row) = table.get(name.as_ref()) else {
            log::debug!("Skipping unknown country '{}'", name.as_ref());
            continue;
        };
        let mut out = Vec::with_capacity(row.values.len() + 1);
        out.push(row.name.clone());
        out.extend(row.values.iter().cloned());
        rows.push(out);
    }
    rows
}

/// Pick the output path for a subset of `source`.
///
/// `<stem>_subset.<ext>` is used when it is free or `overwrite` is set;
/// otherwise the first free `<stem>_subset_<n>.<ext>` counting from 1.
pub fn subset_path(source: &Path, overwrite: bool, exists: impl Fn(&Path) -> bool) -> PathBuf {
    let stem = source
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_default();
    let ext = source
        .extension()
        .map(|e| e.to_string_lossy().into_owned())
        .unwrap_or_else(|| "csv".to_string());

    let candidate = |suffix: String| source.with_file_name(format!("{stem}_subset{suffix}.{ext}"));

    let base = candidate(String::new());
    if overwrite || !exists(&base) {
        return base;
    }
    log::debug!("{} already exists", base.display());

    (1u32..)
        .map(|n| candidate(format!("_{n}")))
        .find(|p| !exists(p))
        .unwrap_or(base)
}

/// Write the subset of `countries` next to `source` and return the path used.
pub fn write_subset<S: AsRef<str>>(
    table: &EmissionsTable,
    countries: &[S],
    source: &Path,
    overwrite: bool,
) -> Result<PathBuf> {
    let path = subset_path(source, overwrite, Path::exists);
    let mut writer = csv::Writer::from_path(&path)
        .with_context(|| format!("creating {}", path.display()))?;
    let rows = extract_subset(table, countries);
    for row in &rows {
        writer
            .write_record(row)
            .with_context(|| format!("writing {}", path.display()))?;
    }
    writer.flush().context("flushing subset file")?;

    log::info!(
        "Extracted {} countries into {}",
        rows.len() - 1,
        path.display()
    );
    Ok(path)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::loader::{load_file, load_reader};
    use std::collections::HashSet;

    const SAMPLE: &str = "CO2 per capita,2019,2020,2021\n\
                          France,1.1,1.2,1.3\n\
                          Germany,2.1,1.9,2.0\n\
                          Spain,5,6,7\n";

    #[test]
    fn projects_header_and_requested_rows() {
        let table = load_reader(SAMPLE.as_bytes()).unwrap();
        let rows = extract_subset(&table, &["Spain", "France"]);
        assert_eq!(
            rows,
            vec![
                vec!["CO2 per capita", "2019", "2020", "2021"],
                vec!["Spain", "5", "6", "7"],
                vec!["France", "1.1", "1.2", "1.3"],
            ]
        );
    }

    #[test]
    fn unknown_names_are_left_out() {
        let table = load_reader(SAMPLE.as_bytes()).unwrap();
        let rows = extract_subset(&table, &["Atlantis", "Germany"]);
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[1][0], "Germany");
    }

    #[test]
    fn base_name_when_free() {
        let path = subset_path(Path::new("dir/data.csv"), false, |_| false);
        assert_eq!(path, Path::new("dir/data_subset.csv"));
    }

    #[test]
    fn first_free_numbered_name() {
        let taken: HashSet<PathBuf> = ["data_subset.csv", "data_subset_1.csv"]
            .iter()
            .map(PathBuf::from)
            .collect();
        let path = subset_path(Path::new("data.csv"), false, |p| taken.contains(p));
        assert_eq!(path, Path::new("data_subset_2.csv"));
    }

    #[test]
    fn overwrite_reuses_base_name() {
        let path = subset_path(Path::new("data.csv"), true, |_| true);
        assert_eq!(path, Path::new("data_subset.csv"));
    }

    #[test]
    fn third_extraction_gets_suffix_two() {
        let dir = tempfile::tempdir().unwrap();
        let source = dir.path().join("data.csv");
        std::fs::write(&source, SAMPLE).unwrap();
        let table = load_file(&source).unwrap();

        let names: Vec<PathBuf> = (0..3)
            .map(|_| write_subset(&table, &["France"], &source, false).unwrap())
            .collect();
        assert_eq!(names[0], dir.path().join("data_subset.csv"));
        assert_eq!(names[1], dir.path().join("data_subset_1.csv"));
        assert_eq!(names[2], dir.path().join("data_subset_2.csv"));
    }

    #[test]
    fn full_extraction_round_trips() {
        let dir = tempfile::tempdir().unwrap();
        let source = dir.path().join("data.csv");
        std::fs::write(&source, SAMPLE).unwrap();
        let table = load_file(&source).unwrap();

        let all: Vec<String> = table.country_names().map(str::to_string).collect();
        let out = write_subset(&table, &all, &source, false).unwrap();
        assert_eq!(load_file(&out).unwrap(), table);
    }

    #[test]
    fn label_with_comma_survives_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let source = dir.path().join("quoted.csv");
        std::fs::write(&source, "\"CO2, per capita\",2019\nFrance,1.5\n").unwrap();
        let table = load_file(&source).unwrap();

        let out = write_subset(&table, &["France"], &source, true).unwrap();
        assert_eq!(load_file(&out).unwrap().label(), "CO2, per capita");
    }
}
