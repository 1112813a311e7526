use std::path::{Path, PathBuf};

use anyhow::{Context, Result};

use crate::chart::{legend_order, ChartExporter, ChartSpec, TableExporter, TableFormat};
use crate::config::{SurvivalPlotConfig, TimingPlotConfig};
use crate::data::loader::{load_survival, load_timing};
use crate::data::model::{Dataset, Table};
use crate::data::ratio::{survival_ratio, SURVIVAL_RATIO};
use crate::error::ParseError;

// ---------------------------------------------------------------------------
// Dataset → Table
// ---------------------------------------------------------------------------

/// The columns a timing chart draws, in the chart's series order.
pub fn timing_table(dataset: &Dataset, spec: &ChartSpec) -> Result<Table, ParseError> {
    Table::from_dataset(dataset, &spec.series_names())
}

/// `n` plus the derived survival ratio.
pub fn survival_table(dataset: &Dataset) -> Result<Table, ParseError> {
    let mut table = Table::new(dataset.n_values());
    table.push(SURVIVAL_RATIO, survival_ratio(dataset)?);
    Ok(table)
}

// ---------------------------------------------------------------------------
// Whole runs
// ---------------------------------------------------------------------------

/// Load the timing log and export its chart in every configured format.
pub fn run_timing(config: &TimingPlotConfig) -> Result<Vec<PathBuf>> {
    let dataset = load_timing(&config.input)
        .with_context(|| format!("loading {}", config.input.display()))?;
    let spec = ChartSpec::timing(config.y_scale);
    let table = timing_table(&dataset, &spec).context("building timing table")?;

    log::info!("Legend order: {}", legend_order(&table, &spec).join(", "));
    export_all(&table, &spec, &config.formats, &config.output_dir)
}

/// Load the broad-phase log and export the survival ratio chart.
pub fn run_survival(config: &SurvivalPlotConfig) -> Result<Vec<PathBuf>> {
    let dataset = load_survival(&config.input)
        .with_context(|| format!("loading {}", config.input.display()))?;
    let table = survival_table(&dataset).context("computing survival ratio")?;
    let spec = ChartSpec::survival();

    export_all(&table, &spec, &config.formats, &config.output_dir)
}

fn export_all(
    table: &Table,
    spec: &ChartSpec,
    formats: &[TableFormat],
    dir: &Path,
) -> Result<Vec<PathBuf>> {
    formats
        .iter()
        .map(|&format| {
            TableExporter::new(format)
                .export(table, spec, dir)
                .with_context(|| format!("exporting {}", spec.file_name(format.extension())))
        })
        .collect()
}
