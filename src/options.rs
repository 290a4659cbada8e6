use std::path::PathBuf;

use clap::Parser;

/// Analyze, plot and extract per-country emissions from a CSV file.
///
/// Logging is configured separately through `RUST_LOG`.
#[derive(Parser, Debug, Clone, Default, PartialEq, Eq)]
#[command(author, version, about)]
pub struct Options {
    /// Input CSV file; prompted for when absent. `.csv` is appended if missing.
    pub file: Option<PathBuf>,

    /// Reuse `<stem>_subset.csv` instead of picking a free numbered name.
    #[arg(long)]
    pub overwrite: bool,

    /// Skip the plot window at the end of the session.
    #[arg(long = "no-plot")]
    pub no_plot: bool,

    /// Print the year summary as JSON.
    #[arg(long)]
    pub json: bool,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_without_arguments() {
        let options = Options::try_parse_from(["emissions-viewer"]).unwrap();
        assert_eq!(options, Options::default());
        assert!(!options.no_plot);
    }

    #[test]
    fn reads_flags_and_file() {
        let options = Options::try_parse_from([
            "emissions-viewer",
            "--no-plot",
            "co2.csv",
            "--json",
            "--overwrite",
        ])
        .unwrap();
        assert_eq!(options.file, Some(PathBuf::from("co2.csv")));
        assert!(options.overwrite && options.json && options.no_plot);
    }

    #[test]
    fn rejects_unknown_flag_and_second_file() {
        assert!(Options::try_parse_from(["emissions-viewer", "--fast"]).is_err());
        assert!(Options::try_parse_from(["emissions-viewer", "a.csv", "b.csv"]).is_err());
    }
}
