use eframe::egui::{Color32, Ui};
use egui_plot::{GridMark, Legend, Line, Plot, PlotPoints};

use crate::color::generate_palette;
use crate::data::loader::FormatError;
use crate::data::model::{EmissionsTable, parse_value};

// ---------------------------------------------------------------------------
// Chart data
// ---------------------------------------------------------------------------

/// One country's line: (year, value) points.
#[derive(Debug, Clone)]
pub struct Series {
    pub country: String,
    pub points: Vec<[f64; 2]>,
}

/// Everything needed to draw one chart, detached from the table.
#[derive(Debug, Clone)]
pub struct Chart {
    pub title: String,
    pub y_label: String,
    pub series: Vec<Series>,
}

impl Chart {
    /// Build a chart for `countries`. Every year and value cell involved must
    /// be numeric.
    pub fn from_table(table: &EmissionsTable, countries: &[String]) -> Result<Self, FormatError> {
        let years = table
            .years()
            .iter()
            .map(|y| {
                y.trim().parse::<i64>().map(|y| y as f64).map_err(|_| FormatError::BadCell {
                    cell: y.clone(),
                    kind: "year",
                })
            })
            .collect::<Result<Vec<f64>, _>>()?;

        let mut series = Vec::with_capacity(countries.len());
        for country in countries {
            let Some(row) = table.get(country) else {
                continue;
            };
            let points = years
                .iter()
                .zip(&row.values)
                .map(|(&x, cell)| {
                    parse_value(cell).map(|y| [x, y]).ok_or_else(|| FormatError::BadCell {
                        cell: cell.clone(),
                        kind: "number",
                    })
                })
                .collect::<Result<Vec<_>, _>>()?;
            series.push(Series {
                country: row.name.clone(),
                points,
            });
        }

        Ok(Chart {
            title: "Year vs Emissions in Capita".to_string(),
            y_label: format!("Emissions in {}", countries.join(", ")),
            series,
        })
    }

    /// Line colour for each series, in series order.
    pub fn colors(&self, dark_mode: bool) -> Vec<Color32> {
        generate_palette(self.series.len(), dark_mode)
    }
}

// ---------------------------------------------------------------------------
// Rendering
// ---------------------------------------------------------------------------

/// Label only even years on the x axis.
fn even_year_label(mark: GridMark) -> String {
    let year = mark.value.round();
    if (mark.value - year).abs() < 1e-9 && year as i64 % 2 == 0 {
        format!("{}", year as i64)
    } else {
        String::new()
    }
}

/// Draw `chart` into the given area.
pub fn emissions_plot(ui: &mut Ui, chart: &Chart, id: usize) {
    ui.heading(&chart.title);

    let mut plot = Plot::new(("emissions_plot", id))
        .x_axis_label("Year")
        .y_axis_label(chart.y_label.clone())
        .x_axis_formatter(|mark, _range| even_year_label(mark))
        .y_axis_formatter(|mark, _range| format!("{:.2}", mark.value))
        .allow_boxed_zoom(true)
        .allow_drag(true)
        .allow_scroll(true)
        .allow_zoom(true);
    if chart.series.len() > 1 {
        plot = plot.legend(Legend::default());
    }

    let colors = chart.colors(ui.visuals().dark_mode);
    plot.show(ui, |plot_ui| {
        for (series, &color) in chart.series.iter().zip(&colors) {
            let points: PlotPoints = series.points.iter().copied().collect();
            plot_ui.line(
                Line::new(points)
                    .name(&series.country)
                    .color(color)
                    .width(1.5),
            );
        }
    });
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::loader::load_reader;

    #[test]
    fn builds_year_aligned_series() {
        let table = load_reader("x,2019,2020\nFrance,1.1,1.2\nGermany,2.1,1.9\n".as_bytes()).unwrap();
        let chart = Chart::from_table(&table, &["Germany".to_string(), "France".to_string()])
            .unwrap();
        assert_eq!(chart.y_label, "Emissions in Germany, France");
        assert_eq!(chart.series.len(), 2);
        assert_eq!(chart.series[0].country, "Germany");
        assert_eq!(chart.series[0].points, vec![[2019.0, 2.1], [2020.0, 1.9]]);
        let colors = chart.colors(true);
        assert_eq!(colors.len(), 2);
        assert_ne!(colors[0], colors[1]);
    }

    #[test]
    fn non_numeric_cell_is_rejected() {
        let table = load_reader("x,2019\nFrance,N/A\n".as_bytes()).unwrap();
        assert!(Chart::from_table(&table, &["France".to_string()]).is_err());
    }
}
