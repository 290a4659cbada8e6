use std::io::{BufRead, ErrorKind, Write};
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};

use crate::data::analysis::{AnalysisError, YearSummary, analyze_year};
use crate::data::loader::{FormatError, csv_path, load_file};
use crate::data::model::EmissionsTable;
use crate::data::select::{Arity, select_countries, split_names};

// ---------------------------------------------------------------------------
// Line-oriented prompt loop
// ---------------------------------------------------------------------------

/// Asks questions on `output` and reads answers from `input`, repeating a
/// question until the answer is usable.
///
/// Every query returns `Ok(None)` once the input is exhausted.
pub struct Prompter<R, W> {
    input: R,
    output: W,
}

impl<R: BufRead, W: Write> Prompter<R, W> {
    pub fn new(input: R, output: W) -> Self {
        Self { input, output }
    }

    #[cfg(test)]
    pub fn into_output(self) -> W {
        self.output
    }

    /// Print a line for the user.
    pub fn say(&mut self, message: &str) -> Result<()> {
        writeln!(self.output, "{message}").context("writing to terminal")
    }

    fn ask(&mut self, prompt: &str) -> Result<Option<String>> {
        write!(self.output, "{prompt}").context("writing prompt")?;
        self.output.flush().context("flushing prompt")?;

        let mut line = String::new();
        let n = self.input.read_line(&mut line).context("reading answer")?;
        if n == 0 {
            return Ok(None);
        }
        Ok(Some(line.trim_end_matches(['\r', '\n']).to_string()))
    }

    /// Ask for a CSV file until one with a header and at least one data row
    /// loads. A missing `.csv` extension is added.
    pub fn table(&mut self, prompt: &str) -> Result<Option<(PathBuf, EmissionsTable)>> {
        while let Some(answer) = self.ask(prompt)? {
            let path = csv_path(Path::new(answer.trim()));
            match load_file(&path) {
                Ok(table) => return Ok(Some((path, table))),
                Err(FormatError::Io { source, .. }) if source.kind() == ErrorKind::NotFound => {
                    self.say(&format!(
                        "There is no such file as: {}. Try again.",
                        path.display()
                    ))?;
                }
                Err(FormatError::Empty | FormatError::TooShort) => {
                    self.say("The file must have at least two rows of data. Try again.")?;
                }
                Err(e) => {
                    log::debug!("rejected {}: {e}", path.display());
                    self.say(&format!("{e}. Try again."))?;
                }
            }
        }
        Ok(None)
    }

    /// Ask for a year until it can be analyzed, and return its summary.
    ///
    /// A malformed table is not something the user can fix by typing another
    /// year, so format errors are returned instead of re-prompting.
    pub fn year_summary(
        &mut self,
        prompt: &str,
        table: &EmissionsTable,
    ) -> Result<Option<YearSummary>> {
        while let Some(answer) = self.ask(prompt)? {
            let Ok(year) = answer.trim().parse::<i64>() else {
                self.say("You have not provided a year integer. Try again.")?;
                continue;
            };
            match analyze_year(table, year) {
                Ok(summary) => return Ok(Some(summary)),
                Err(AnalysisError::Range(e)) => self.say(&format!("{e}. Try again."))?,
                Err(AnalysisError::Format(e)) => {
                    return Err(e).with_context(|| format!("analyzing {year}"));
                }
            }
        }
        Ok(None)
    }

    /// Ask for comma-separated countries until the answer matches `arity` and
    /// names only known, distinct countries.
    pub fn countries(
        &mut self,
        prompt: &str,
        table: &EmissionsTable,
        arity: Arity,
    ) -> Result<Option<Vec<String>>> {
        while let Some(answer) = self.ask(prompt)? {
            match select_countries(table, &split_names(&answer), arity) {
                Ok(names) => return Ok(Some(names)),
                Err(e) => self.say(&format!("{e}. Try again."))?,
            }
        }
        Ok(None)
    }
}
