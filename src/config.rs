use std::path::PathBuf;

use crate::chart::{AxisScale, TableFormat};

// ---------------------------------------------------------------------------
// Fixed program settings
// ---------------------------------------------------------------------------

/// Log written by the benchmark harness for a BVH leaf cut-off of 4.
pub const TIMING_LOG: &str = "benchmark_4.txt";
/// Broad-phase statistics for the same cut-off.
pub const SURVIVAL_LOG: &str = "benchmark_4_broad_effect.txt";

/// Settings of the timing comparison chart.
#[derive(Debug, Clone)]
pub struct TimingPlotConfig {
    pub input: PathBuf,
    pub output_dir: PathBuf,
    pub y_scale: AxisScale,
    pub formats: Vec<TableFormat>,
}

impl Default for TimingPlotConfig {
    fn default() -> Self {
        Self {
            input: PathBuf::from(TIMING_LOG),
            output_dir: PathBuf::from("."),
            y_scale: AxisScale::Log,
            formats: vec![TableFormat::Csv, TableFormat::Json],
        }
    }
}

/// Settings of the survival ratio chart.
#[derive(Debug, Clone)]
pub struct SurvivalPlotConfig {
    pub input: PathBuf,
    pub output_dir: PathBuf,
    pub formats: Vec<TableFormat>,
}

impl Default for SurvivalPlotConfig {
    fn default() -> Self {
        Self {
            input: PathBuf::from(SURVIVAL_LOG),
            output_dir: PathBuf::from("."),
            formats: vec![TableFormat::Csv, TableFormat::Json],
        }
    }
}
