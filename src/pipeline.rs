use std::io::Write;
use std::path::Path;

use crate::chart::{Chart, ChartSink};
use crate::config::{AnalysisConfig, CategoricalPlan, BINNED_TOP_N};
use crate::data::binning::BucketScheme;
use crate::data::loader::load_archive_file;
use crate::data::model::{CellValue, Table, TableSet};
use crate::data::select::select_dataset;
use crate::error::Result;
use crate::stats::{histogram, CategoricalSummary, ContinuousSummary, HISTOGRAM_BINS};

const BANNER_WIDTH: usize = 60;

// ---------------------------------------------------------------------------
// Run report
// ---------------------------------------------------------------------------

/// What a run produced, besides the charts and console text.
#[derive(Debug, Clone, Default)]
pub struct RunReport {
    pub dataset_name: String,
    pub continuous: Option<ContinuousSummary>,
    pub categorical: Option<CategoricalSummary>,
    /// Bucket label per numeric value, present when binning ran.
    pub derived_categories: Option<Vec<Option<String>>>,
}

// ---------------------------------------------------------------------------
// Entry points
// ---------------------------------------------------------------------------

/// Load `archive`, select a dataset and run the configured visualizations.
///
/// Charts go to `sink`; the report text goes to `out`.
pub fn run(
    config: &AnalysisConfig,
    archive: &Path,
    out: &mut dyn Write,
    sink: &mut dyn ChartSink,
) -> Result<RunReport> {
    config.validate()?;
    let tables = load_archive_file(archive, &config.load_options())?;
    run_on_tables(config, &tables, out, sink)
}

/// Same as [`run`] for tables that are already loaded.
pub fn run_on_tables(
    config: &AnalysisConfig,
    tables: &TableSet,
    out: &mut dyn Write,
    sink: &mut dyn ChartSink,
) -> Result<RunReport> {
    let selection = select_dataset(tables)?;
    if selection.fallback {
        writeln!(out, "Using first dataset: {}", selection.name)?;
    } else {
        writeln!(out, "Using dataset: {}", selection.name)?;
    }
    let table = selection.table;

    let mut report = RunReport {
        dataset_name: selection.name.to_string(),
        ..RunReport::default()
    };

    if let Some(column) = &config.continuous_column {
        report.continuous = continuous_path(table, column, out, sink)?;
    }

    match config.categorical_plan(table) {
        CategoricalPlan::Binned { column } => {
            let top_n = config.top_n_categories.min(BINNED_TOP_N);
            if let Some((summary, derived)) = binned_path(table, &column, top_n, out, sink)? {
                report.categorical = Some(summary);
                report.derived_categories = Some(derived);
            }
        }
        CategoricalPlan::Column { column } => {
            report.categorical =
                categorical_path(table, &column, config.top_n_categories, out, sink)?;
        }
        CategoricalPlan::Skip => log::debug!("No categorical visualization configured"),
    }

    Ok(report)
}

// ---------------------------------------------------------------------------
// Column paths
// ---------------------------------------------------------------------------

fn continuous_path(
    table: &Table,
    column: &str,
    out: &mut dyn Write,
    sink: &mut dyn ChartSink,
) -> Result<Option<ContinuousSummary>> {
    match table.is_numeric(column) {
        None => {
            writeln!(
                out,
                "Warning: Continuous column '{column}' not found. Available columns: {:?}",
                table.column_names
            )?;
            Ok(None)
        }
        Some(false) => {
            writeln!(
                out,
                "Warning: '{column}' is not a numeric column. Skipping continuous visualization."
            )?;
            Ok(None)
        }
        Some(true) => {
            banner(out, "CONTINUOUS", column)?;
            let values = table.numeric_values(column).unwrap_or_default();
            visualize_continuous(&values, column, out, sink).map(Some)
        }
    }
}

fn binned_path(
    table: &Table,
    column: &str,
    top_n: usize,
    out: &mut dyn Write,
    sink: &mut dyn ChartSink,
) -> Result<Option<(CategoricalSummary, Vec<Option<String>>)>> {
    if table.is_numeric(column) != Some(true) {
        writeln!(out, "Cannot create categories from non-numeric column: {column}")?;
        return Ok(None);
    }
    let values = table.numeric_values(column).unwrap_or_default();
    let scheme = BucketScheme::population();
    let derived = scheme.bin(&values);
    let levels: Vec<&str> = scheme.buckets().iter().map(|b| b.label).collect();

    let name = format!("{column} (Population Size Categories)");
    banner(out, "CATEGORICAL", &name)?;
    let summary = visualize_categorical(&derived, &levels, &name, top_n, out, sink)?;
    Ok(Some((summary, derived)))
}

fn categorical_path(
    table: &Table,
    column: &str,
    top_n: usize,
    out: &mut dyn Write,
    sink: &mut dyn ChartSink,
) -> Result<Option<CategoricalSummary>> {
    let Some(cells) = table.column(column) else {
        writeln!(
            out,
            "Warning: Categorical column '{column}' not found. Available columns: {:?}",
            table.column_names
        )?;
        return Ok(None);
    };
    // A numeric column holding a float or a missing cell is a float column,
    // so its integers are labelled as floats too.
    let as_float = table.is_numeric(column) == Some(true)
        && cells
            .iter()
            .any(|c| matches!(c, CellValue::Float(_) | CellValue::Null));
    let series: Vec<Option<String>> = cells
        .iter()
        .map(|c| match c {
            CellValue::Null => None,
            CellValue::Integer(i) if as_float => Some(CellValue::Float(*i as f64).to_string()),
            other => Some(other.to_string()),
        })
        .collect();

    banner(out, "CATEGORICAL", column)?;
    visualize_categorical(&series, &[], column, top_n, out, sink).map(Some)
}

// ---------------------------------------------------------------------------
// Renderers
// ---------------------------------------------------------------------------

/// Histogram plus summary statistics of a numeric series.
pub fn visualize_continuous(
    values: &[f64],
    column: &str,
    out: &mut dyn Write,
    sink: &mut dyn ChartSink,
) -> Result<ContinuousSummary> {
    let summary = ContinuousSummary::compute(column, values);
    sink.render(Chart::Histogram {
        title: format!("Distribution of {column}"),
        x_label: column.to_string(),
        bins: histogram(values, HISTOGRAM_BINS),
    });
    write!(out, "{summary}")?;
    Ok(summary)
}

/// Frequency bar chart of the `top_n` most common values, plus a summary.
///
/// Every entry of `levels` is counted, including those that never occur.
pub fn visualize_categorical(
    series: &[Option<String>],
    levels: &[&str],
    column: &str,
    top_n: usize,
    out: &mut dyn Write,
    sink: &mut dyn ChartSink,
) -> Result<CategoricalSummary> {
    let summary = CategoricalSummary::compute(column, series, levels, top_n);
    sink.render(Chart::Bar {
        title: format!("Distribution of {column} (Top {})", summary.top.len()),
        x_label: column.to_string(),
        bars: summary.top.clone(),
    });
    write!(out, "{summary}")?;
    Ok(summary)
}

fn banner(out: &mut dyn Write, kind: &str, column: &str) -> std::io::Result<()> {
    let rule = "=".repeat(BANNER_WIDTH);
    log::info!("Visualizing {} variable '{column}'", kind.to_lowercase());
    writeln!(out, "\n{rule}")?;
    writeln!(out, "Visualizing {kind} variable: {column}")?;
    writeln!(out, "{rule}")
}
