use std::path::{Path, PathBuf};

use clap::Parser;
use serde::{Deserialize, Serialize};

use crate::data::loader::LoadOptions;
use crate::data::model::Table;
use crate::error::{AnalysisError, Result};

/// Bar charts of population-size buckets never show more than this.
pub const BINNED_TOP_N: usize = 10;

// ---------------------------------------------------------------------------
// Analysis configuration
// ---------------------------------------------------------------------------

/// Which columns to visualize and how.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AnalysisConfig {
    /// Column shown as-is in a frequency bar chart.
    pub categorical_column: Option<String>,
    /// Numeric column shown as a histogram.
    pub continuous_column: Option<String>,
    /// Bucket `continuous_column_for_binning` into population-size
    /// categories instead of charting `categorical_column`.
    pub create_categorical_from_continuous: bool,
    pub continuous_column_for_binning: String,
    /// Cap on rendered categories.
    pub top_n_categories: usize,
    /// Header names every data entry must carry.
    pub required_columns: Vec<String>,
}

impl Default for AnalysisConfig {
    fn default() -> Self {
        Self {
            categorical_column: None,
            continuous_column: Some("2020".to_string()),
            create_categorical_from_continuous: true,
            continuous_column_for_binning: "2020".to_string(),
            top_n_categories: 30,
            required_columns: vec!["Country Name".to_string(), "Country Code".to_string()],
        }
    }
}

/// The categorical visualization a run performs.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CategoricalPlan {
    /// Bucket a numeric column into population-size categories.
    Binned { column: String },
    /// Chart an existing column's values directly.
    Column { column: String },
    Skip,
}

impl AnalysisConfig {
    /// Read a JSON config file; missing fields keep their defaults.
    pub fn from_json_file(path: &Path) -> Result<Self> {
        let text = std::fs::read_to_string(path)?;
        let config: AnalysisConfig = serde_json::from_str(&text)
            .map_err(|e| AnalysisError::InvalidConfig(format!("{}: {e}", path.display())))?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<()> {
        if self.top_n_categories == 0 {
            return Err(AnalysisError::InvalidConfig(
                "top_n_categories must be at least 1".to_string(),
            ));
        }
        Ok(())
    }

    pub fn load_options(&self) -> LoadOptions {
        LoadOptions {
            required_columns: self.required_columns.clone(),
        }
    }

    /// Binning wins when it is enabled and its column exists in `table`;
    /// otherwise the plain categorical column, if any.
    pub fn categorical_plan(&self, table: &Table) -> CategoricalPlan {
        if self.create_categorical_from_continuous {
            if table.has_column(&self.continuous_column_for_binning) {
                return CategoricalPlan::Binned {
                    column: self.continuous_column_for_binning.clone(),
                };
            }
            log::warn!(
                "Binning column '{}' not in dataset, binning skipped",
                self.continuous_column_for_binning
            );
        }
        match &self.categorical_column {
            Some(column) => CategoricalPlan::Column {
                column: column.clone(),
            },
            None => CategoricalPlan::Skip,
        }
    }
}

// ---------------------------------------------------------------------------
// Command line
// ---------------------------------------------------------------------------

#[derive(Parser, Debug)]
#[command(
    name = "worldbank-viz",
    version,
    about = "Histogram and bar chart of one column of a World Bank CSV archive"
)]
pub struct Cli {
    /// ZIP archive to analyze. A file dialog opens when omitted.
    pub archive: Option<PathBuf>,

    /// JSON file with analysis settings; flags below override it.
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Numeric column to draw as a histogram.
    #[arg(long)]
    pub continuous_column: Option<String>,

    /// Do not draw the histogram.
    #[arg(long, conflicts_with = "continuous_column")]
    pub no_continuous: bool,

    /// Column to draw as a frequency bar chart (used when binning is off).
    #[arg(long)]
    pub categorical_column: Option<String>,

    /// Numeric column to bucket into population-size categories.
    #[arg(long)]
    pub binning_column: Option<String>,

    /// Disable population-size bucketing.
    #[arg(long)]
    pub no_binning: bool,

    /// Maximum number of categories to draw.
    #[arg(long)]
    pub top_n: Option<usize>,

    /// Also write the charts as JSON to this file.
    #[arg(long)]
    pub export: Option<PathBuf>,

    /// Print the report without opening the chart window.
    #[arg(long)]
    pub no_display: bool,

    /// Verbose logging.
    #[arg(short, long)]
    pub verbose: bool,
}

impl Cli {
    /// Defaults, then the config file, then flags.
    pub fn resolve_config(&self) -> Result<AnalysisConfig> {
        let mut config = match &self.config {
            Some(path) => AnalysisConfig::from_json_file(path)?,
            None => AnalysisConfig::default(),
        };

        if let Some(col) = &self.continuous_column {
            config.continuous_column = Some(col.clone());
        }
        if self.no_continuous {
            config.continuous_column = None;
        }
        if let Some(col) = &self.categorical_column {
            config.categorical_column = Some(col.clone());
        }
        if let Some(col) = &self.binning_column {
            config.continuous_column_for_binning = col.clone();
            config.create_categorical_from_continuous = true;
        }
        if self.no_binning {
            config.create_categorical_from_continuous = false;
        }
        if let Some(n) = self.top_n {
            config.top_n_categories = n;
        }

        config.validate()?;
        Ok(config)
    }
}
