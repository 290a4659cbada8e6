mod app;
mod color;
mod data;
mod options;
mod prompt;
mod session;
mod ui;

use std::io;

use anyhow::{Result, anyhow};
use clap::Parser;
use app::EmissionsApp;
use eframe::egui;
use options::Options;
use prompt::Prompter;

fn main() -> Result<()> {
    env_logger::init();

    let options = Options::parse();
    let mut prompter = Prompter::new(io::stdin().lock(), io::stdout());

    let Some(outcome) = session::run(&mut prompter, &options)? else {
        log::info!("No input file given; exiting");
        return Ok(());
    };

    if options.no_plot || outcome.charts.is_empty() {
        return Ok(());
    }

    let native = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([1000.0, 700.0])
            .with_min_inner_size([600.0, 400.0]),
        ..Default::default()
    };
    let source = outcome.source.display().to_string();

    eframe::run_native(
        "Emissions Viewer",
        native,
        Box::new(move |_cc| {
            Ok(Box::new(EmissionsApp::new(
                outcome.label,
                source,
                outcome.charts,
            )))
        }),
    )
    .map_err(|e| anyhow!("plot window failed: {e}"))
}
