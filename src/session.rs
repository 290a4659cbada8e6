use std::io::{BufRead, Write};
use std::path::PathBuf;

use anyhow::{Context, Result};

use crate::data::analysis::YearSummary;
use crate::data::extract::write_subset;
use crate::data::loader::{csv_path, load_file};
use crate::data::model::EmissionsTable;
use crate::data::select::Arity;
use crate::options::Options;
use crate::prompt::Prompter;
use crate::ui::plot::Chart;

/// What an interactive session produced.
#[derive(Debug)]
pub struct Outcome {
    pub source: PathBuf,
    pub label: String,
    pub charts: Vec<Chart>,
    pub subset: Option<PathBuf>,
}

/// Run the terminal part of the session: load, validate, analyze one year,
/// pick countries for two charts and extract a subset.
///
/// Returns `None` if the input ends before a table is loaded. Running out of
/// input later keeps whatever was collected so far.
pub fn run<R: BufRead, W: Write>(
    prompter: &mut Prompter<R, W>,
    options: &Options,
) -> Result<Option<Outcome>> {
    let (source, table) = match &options.file {
        Some(file) => {
            let path = csv_path(file);
            let table = load_file(&path).with_context(|| format!("loading {}", path.display()))?;
            (path, table)
        }
        None => match prompter.table("Provide the name of the CSV file you wish to read data from: ")? {
            Some(loaded) => loaded,
            None => return Ok(None),
        },
    };
    prompter.say("All the data has been read.\n")?;

    let conforms = table.validate();
    prompter.say(&format!(
        "Is the file structured as expected? {}.",
        if conforms { "Yes" } else { "No" }
    ))?;

    let mut outcome = Outcome {
        source,
        label: table.label().to_string(),
        charts: Vec::new(),
        subset: None,
    };

    let bounds = match table.year_bounds() {
        Ok(Some(bounds)) => bounds,
        Ok(None) | Err(_) => {
            prompter.say("The header has no usable years; nothing to analyze.")?;
            return Ok(Some(outcome));
        }
    };
    let year_prompt = format!("Select a year to find statistics ({}-{}): ", bounds.0, bounds.1);
    let Some(summary) = prompter.year_summary(&year_prompt, &table)? else {
        return Ok(Some(outcome));
    };
    if options.json {
        prompter.say(&serde_json::to_string_pretty(&summary).context("encoding summary")?)?;
    } else {
        prompter.say(&describe(&summary))?;
    }

    let queries = [
        ("Select a country to visualize: ", Arity::Exactly(1)),
        (
            "Select two comma-separated countries for which you want to visualize data: ",
            Arity::Exactly(2),
        ),
    ];
    for (prompt, arity) in queries {
        let Some(countries) = prompter.countries(prompt, &table, arity)? else {
            return Ok(Some(outcome));
        };
        outcome.charts.push(chart(&table, &countries)?);
    }

    let Some(countries) = prompter.countries(
        "Select up to three comma-separated countries you want to extract data for: ",
        &table,
        Arity::UpTo(3),
    )?
    else {
        return Ok(Some(outcome));
    };
    let written = write_subset(&table, &countries, &outcome.source, options.overwrite)?;
    prompter.say(&format!(
        "\nData successfully extracted for {} and saved into the file: {}.",
        countries.join(", "),
        written.display()
    ))?;
    outcome.subset = Some(written);

    Ok(Some(outcome))
}

fn chart(table: &EmissionsTable, countries: &[String]) -> Result<Chart> {
    Chart::from_table(table, countries)
        .with_context(|| format!("plotting {}", countries.join(", ")))
}

/// Human-readable summary line.
pub fn describe(summary: &YearSummary) -> String {
    format!(
        "In {year}, countries with minimum and maximum CO2 emission levels were: \
         [{min}] and [{max}], respectively.\nAverage CO2 emissions in {year} were {avg}",
        year = summary.year,
        min = summary.min_country,
        max = summary.max_country,
        avg = summary.average,
    )
}
