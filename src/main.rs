mod app;
mod chart;
mod color;
mod config;
mod data;
mod error;
mod pipeline;
mod state;
mod stats;
mod ui;

use std::io::Write;

use anyhow::{Context, Result};
use clap::Parser;

use chart::ChartSet;
use config::Cli;

fn main() -> Result<()> {
    let cli = Cli::parse();

    let default_level = if cli.verbose { "debug" } else { "info" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default_level))
        .init();

    let config = cli.resolve_config().context("loading configuration")?;
    let archive = match &cli.archive {
        Some(path) => path.clone(),
        None => ui::panels::pick_archive().context("no archive selected")?,
    };

    let mut charts = ChartSet::default();
    let report = {
        let stdout = std::io::stdout();
        let mut out = stdout.lock();
        let report = pipeline::run(&config, &archive, &mut out, &mut charts)
            .with_context(|| format!("analyzing {}", archive.display()))?;
        out.flush()?;
        report
    };

    if let Some(path) = &cli.export {
        charts
            .export_json(path)
            .with_context(|| format!("writing {}", path.display()))?;
    }

    if cli.no_display || charts.is_empty() {
        return Ok(());
    }
    app::show(report.dataset_name, charts)
        .map_err(|e| anyhow::anyhow!("chart window failed: {e}"))
}
