use std::fs::File;
use std::io::BufWriter;
use std::path::Path;

use serde::Serialize;

use crate::error::Result;
use crate::stats::HistogramBin;

// ---------------------------------------------------------------------------
// Chart descriptions
// ---------------------------------------------------------------------------

/// A rendered chart, independent of the surface that displays it.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Chart {
    Histogram {
        title: String,
        x_label: String,
        bins: Vec<HistogramBin>,
    },
    Bar {
        title: String,
        x_label: String,
        /// `(category, frequency)` in display order.
        bars: Vec<(String, usize)>,
    },
}

impl Chart {
    pub fn title(&self) -> &str {
        match self {
            Chart::Histogram { title, .. } | Chart::Bar { title, .. } => title,
        }
    }

    pub fn x_label(&self) -> &str {
        match self {
            Chart::Histogram { x_label, .. } | Chart::Bar { x_label, .. } => x_label,
        }
    }

    pub fn y_label(&self) -> &str {
        "Frequency"
    }
}

// ---------------------------------------------------------------------------
// Sink
// ---------------------------------------------------------------------------

/// Receives charts as the pipeline produces them.
pub trait ChartSink {
    fn render(&mut self, chart: Chart);
}

/// Collects charts for the viewer window or a JSON export.
#[derive(Debug, Default)]
pub struct ChartSet {
    pub charts: Vec<Chart>,
}

impl ChartSink for ChartSet {
    fn render(&mut self, chart: Chart) {
        log::debug!("Rendered chart '{}'", chart.title());
        self.charts.push(chart);
    }
}

impl ChartSet {
    pub fn is_empty(&self) -> bool {
        self.charts.is_empty()
    }

    pub fn len(&self) -> usize {
        self.charts.len()
    }

    /// Write every chart as pretty-printed JSON.
    pub fn export_json(&self, path: &Path) -> Result<()> {
        let writer = BufWriter::new(File::create(path)?);
        serde_json::to_writer_pretty(writer, &self.charts)?;
        log::info!("Exported {} chart(s) to {}", self.len(), path.display());
        Ok(())
    }
}
