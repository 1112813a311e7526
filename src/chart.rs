use std::cmp::Ordering;
use std::fs::File;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use arrow::array::{ArrayRef, Float64Array, UInt64Array};
use arrow::datatypes::{DataType, Field, Schema};
use arrow::record_batch::RecordBatch;
use parquet::arrow::ArrowWriter;
use serde::Serialize;

use crate::color::{self, ColorMap};
use crate::data::fields::TIMING_FIELDS;
use crate::data::model::Table;
use crate::data::ratio::SURVIVAL_RATIO;
use crate::error::ExportError;

// ---------------------------------------------------------------------------
// Chart description
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum AxisScale {
    Linear,
    Log,
}

impl AxisScale {
    /// Label used in output file names (`scale_log`, `scale_linear`).
    pub fn label(self) -> &'static str {
        match self {
            AxisScale::Linear => "linear",
            AxisScale::Log => "log",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum LineDash {
    Solid,
    Dashed,
}

/// How one series is drawn.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SeriesStyle {
    /// CSS colour name.
    pub color: String,
    pub dash: LineDash,
    pub width: f32,
}

impl SeriesStyle {
    pub fn new(color: &str, dash: LineDash, width: f32) -> Self {
        SeriesStyle {
            color: color.to_string(),
            dash,
            width,
        }
    }
}

/// Everything a renderer needs besides the data itself.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ChartSpec {
    pub title: String,
    pub x_label: String,
    pub y_label: String,
    pub y_scale: AxisScale,
    /// Series to draw, with their style, in drawing order.
    pub series: Vec<(String, SeriesStyle)>,
    /// Output file name without extension.
    pub file_stem: String,
}

impl ChartSpec {
    /// Timing comparison of the six collision-check methods.
    pub fn timing(y_scale: AxisScale) -> Self {
        let styles = [
            ("parallel_double", "blue", LineDash::Solid, 3.0),
            ("serial_double", "red", LineDash::Solid, 3.0),
            ("parallel_our_narrow", "green", LineDash::Solid, 3.0),
            ("parallel_parry_narrow", "purple", LineDash::Dashed, 2.0),
            ("serial_our_narrow", "orange", LineDash::Dashed, 2.0),
            ("serial_parry_narrow", "cyan", LineDash::Dashed, 2.0),
        ];
        debug_assert!(styles
            .iter()
            .all(|(name, ..)| TIMING_FIELDS.iter().any(|f| f.name == *name)));

        let title = match y_scale {
            AxisScale::Log => "Benchmark Comparisons (Logarithm Y-axis)",
            AxisScale::Linear => "Benchmark Comparisons (Linear Y-axis)",
        };

        ChartSpec {
            title: title.to_string(),
            x_label: "# Primitives".to_string(),
            y_label: "Time (ms)".to_string(),
            y_scale,
            series: styles
                .iter()
                .map(|&(name, color, dash, width)| {
                    (name.to_string(), SeriesStyle::new(color, dash, width))
                })
                .collect(),
            file_stem: format!("scale_{}", y_scale.label()),
        }
    }

    /// Survival ratio of broad-phase candidate pairs.
    pub fn survival() -> Self {
        ChartSpec {
            title: "Effect of Broad Phase".to_string(),
            x_label: "# Primitives".to_string(),
            y_label: "Survival Ratio".to_string(),
            y_scale: AxisScale::Linear,
            series: vec![(
                SURVIVAL_RATIO.to_string(),
                SeriesStyle::new("blue", LineDash::Solid, 3.0),
            )],
            file_stem: SURVIVAL_RATIO.to_string(),
        }
    }

    pub fn series_names(&self) -> Vec<&str> {
        self.series.iter().map(|(name, _)| name.as_str()).collect()
    }

    pub fn file_name(&self, extension: &str) -> String {
        format!("{}.{extension}", self.file_stem)
    }

    pub fn color_map(&self) -> ColorMap {
        ColorMap::new(
            self.series
                .iter()
                .map(|(name, style)| (name.as_str(), style.color.as_str())),
        )
    }
}

/// Series names ordered for the legend: by final value, largest first.
///
/// Ties keep drawing order; series absent from the table or without values
/// go last.
pub fn legend_order(table: &Table, spec: &ChartSpec) -> Vec<String> {
    let mut entries: Vec<(&str, Option<f64>)> = spec
        .series
        .iter()
        .map(|(name, _)| {
            let last = table
                .column(name)
                .and_then(|c| c.values.last().copied());
            (name.as_str(), last)
        })
        .collect();

    entries.sort_by(|(_, a), (_, b)| match (a, b) {
        (Some(a), Some(b)) => b.total_cmp(a),
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => Ordering::Equal,
    });

    entries.into_iter().map(|(name, _)| name.to_string()).collect()
}

// ---------------------------------------------------------------------------
// Exporters
// ---------------------------------------------------------------------------

/// Hands a finished table to whatever draws or stores the chart.
pub trait ChartExporter {
    /// Write the chart for `table` into `dir`, returning the written path.
    fn export(&self, table: &Table, spec: &ChartSpec, dir: &Path) -> Result<PathBuf, ExportError>;
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TableFormat {
    Csv,
    /// Table plus the full chart description.
    Json,
    Parquet,
}

impl TableFormat {
    pub fn extension(self) -> &'static str {
        match self {
            TableFormat::Csv => "csv",
            TableFormat::Json => "json",
            TableFormat::Parquet => "parquet",
        }
    }
}

/// Writes the chart's data in a tabular format for an external renderer.
#[derive(Debug, Clone, Copy)]
pub struct TableExporter {
    pub format: TableFormat,
}

impl TableExporter {
    pub fn new(format: TableFormat) -> Self {
        TableExporter { format }
    }
}

impl ChartExporter for TableExporter {
    fn export(&self, table: &Table, spec: &ChartSpec, dir: &Path) -> Result<PathBuf, ExportError> {
        check_lengths(table)?;
        let path = dir.join(spec.file_name(self.format.extension()));

        match self.format {
            TableFormat::Csv => write_csv(table, &path)?,
            TableFormat::Json => write_json(table, spec, &path)?,
            TableFormat::Parquet => write_parquet(table, &path)?,
        }

        log::info!(
            "Exported {} rows × {} columns to {}",
            table.len(),
            table.columns.len(),
            path.display()
        );
        Ok(path)
    }
}

fn check_lengths(table: &Table) -> Result<(), ExportError> {
    match table.columns.iter().find(|c| c.values.len() != table.x.len()) {
        Some(c) => Err(ExportError::RaggedColumn {
            column: c.name.clone(),
            expected: table.x.len(),
            actual: c.values.len(),
        }),
        None => Ok(()),
    }
}

fn io_error(path: &Path) -> impl FnOnce(std::io::Error) -> ExportError + '_ {
    move |source| ExportError::Io {
        path: path.to_path_buf(),
        source,
    }
}

// -- CSV --

fn write_csv(table: &Table, path: &Path) -> Result<(), ExportError> {
    let mut writer = csv::Writer::from_path(path)?;

    let mut header = vec![table.x_name.as_str()];
    header.extend(table.columns.iter().map(|c| c.name.as_str()));
    writer.write_record(&header)?;

    for (row, n) in table.x.iter().enumerate() {
        let mut record = vec![n.to_string()];
        record.extend(table.columns.iter().map(|c| c.values[row].to_string()));
        writer.write_record(&record)?;
    }

    writer.flush().map_err(io_error(path))?;
    Ok(())
}

// -- JSON --

#[derive(Serialize)]
struct SeriesEntry<'a> {
    name: &'a str,
    color: String,
    dash: LineDash,
    width: f32,
}

#[derive(Serialize)]
struct ChartDocument<'a> {
    title: &'a str,
    x_label: &'a str,
    y_label: &'a str,
    y_scale: AxisScale,
    series: Vec<SeriesEntry<'a>>,
    legend: Vec<String>,
    table: &'a Table,
}

fn write_json(table: &Table, spec: &ChartSpec, path: &Path) -> Result<(), ExportError> {
    let colors = spec.color_map();
    let doc = ChartDocument {
        title: &spec.title,
        x_label: &spec.x_label,
        y_label: &spec.y_label,
        y_scale: spec.y_scale,
        series: spec
            .series
            .iter()
            .map(|(name, style)| SeriesEntry {
                name,
                color: color::to_hex(colors.color_for(name)),
                dash: style.dash,
                width: style.width,
            })
            .collect(),
        legend: legend_order(table, spec),
        table,
    };

    let file = File::create(path).map_err(io_error(path))?;
    serde_json::to_writer_pretty(file, &doc)?;
    Ok(())
}

// -- Parquet --

fn write_parquet(table: &Table, path: &Path) -> Result<(), ExportError> {
    let mut fields = vec![Field::new(&table.x_name, DataType::UInt64, false)];
    let mut arrays: Vec<ArrayRef> = vec![Arc::new(UInt64Array::from(table.x.clone()))];
    for column in &table.columns {
        fields.push(Field::new(&column.name, DataType::Float64, false));
        arrays.push(Arc::new(Float64Array::from(column.values.clone())));
    }

    let schema = Arc::new(Schema::new(fields));
    let batch = RecordBatch::try_new(schema.clone(), arrays)?;

    let file = File::create(path).map_err(io_error(path))?;
    let mut writer = ArrowWriter::try_new(file, schema, None)?;
    writer.write(&batch)?;
    writer.close()?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn timing_table() -> Table {
        let mut table = Table::new(vec![10, 20]);
        table.push("parallel_double", vec![1.0, 4.0]);
        table.push("serial_double", vec![2.0, 40.0]);
        table.push("parallel_our_narrow", vec![0.5, 4.0]);
        table.push("parallel_parry_narrow", vec![0.5, 6.0]);
        table.push("serial_our_narrow", vec![3.0, 50.0]);
        table.push("serial_parry_narrow", vec![3.0, 45.0]);
        table
    }

    #[test]
    fn file_names() {
        assert_eq!(ChartSpec::timing(AxisScale::Log).file_name("csv"), "scale_log.csv");
        assert_eq!(
            ChartSpec::timing(AxisScale::Linear).file_name("json"),
            "scale_linear.json"
        );
        assert_eq!(ChartSpec::survival().file_name("parquet"), "survival_ratio.parquet");
    }

    #[test]
    fn legend_sorted_by_final_value() {
        let order = legend_order(&timing_table(), &ChartSpec::timing(AxisScale::Log));
        assert_eq!(
            order,
            vec![
                "serial_our_narrow",
                "serial_parry_narrow",
                "serial_double",
                "parallel_parry_narrow",
                "parallel_double",
                "parallel_our_narrow",
            ]
        );
    }

    #[test]
    fn legend_puts_absent_series_last() {
        let mut table = Table::new(vec![1]);
        table.push("serial_double", vec![1.0]);
        let order = legend_order(&table, &ChartSpec::timing(AxisScale::Log));
        assert_eq!(order[0], "serial_double");
        assert_eq!(order.len(), 6);
    }

    #[test]
    fn timing_styles() {
        let spec = ChartSpec::timing(AxisScale::Log);
        let (name, style) = &spec.series[3];
        assert_eq!(name, "parallel_parry_narrow");
        assert_eq!(style, &SeriesStyle::new("purple", LineDash::Dashed, 2.0));
        assert_eq!(spec.color_map().color_for("serial_double"), palette::Srgb::new(255, 0, 0));
    }

    #[test]
    fn csv_export() {
        let dir = tempfile::tempdir().unwrap();
        let mut table = Table::new(vec![10, 20]);
        table.push(SURVIVAL_RATIO, vec![0.5, 0.25]);

        let path = TableExporter::new(TableFormat::Csv)
            .export(&table, &ChartSpec::survival(), dir.path())
            .unwrap();
        assert_eq!(path, dir.path().join("survival_ratio.csv"));
        let text = std::fs::read_to_string(path).unwrap();
        assert_eq!(text, "n,survival_ratio\n10,0.5\n20,0.25\n");
    }

    #[test]
    fn json_export_carries_chart_description() {
        let dir = tempfile::tempdir().unwrap();
        let path = TableExporter::new(TableFormat::Json)
            .export(&timing_table(), &ChartSpec::timing(AxisScale::Log), dir.path())
            .unwrap();

        let doc: serde_json::Value =
            serde_json::from_str(&std::fs::read_to_string(path).unwrap()).unwrap();
        assert_eq!(doc["y_scale"], "log");
        assert_eq!(doc["legend"][0], "serial_our_narrow");
        assert_eq!(doc["series"][0]["color"], "#0000ff");
        assert_eq!(doc["series"][3]["dash"], "dashed");
        assert_eq!(doc["table"]["x"], serde_json::json!([10, 20]));
    }

    #[test]
    fn parquet_export() {
        use parquet::file::reader::{FileReader, SerializedFileReader};

        let dir = tempfile::tempdir().unwrap();
        let path = TableExporter::new(TableFormat::Parquet)
            .export(&timing_table(), &ChartSpec::timing(AxisScale::Log), dir.path())
            .unwrap();

        let reader = SerializedFileReader::new(File::open(path).unwrap()).unwrap();
        let meta = reader.metadata().file_metadata();
        assert_eq!(meta.num_rows(), 2);
        assert_eq!(meta.schema_descr().num_columns(), 7);
    }

    #[test]
    fn ragged_table_is_rejected() {
        let dir = tempfile::tempdir().unwrap();
        let mut table = Table::new(vec![10, 20]);
        table.push(SURVIVAL_RATIO, vec![0.5]);
        let err = TableExporter::new(TableFormat::Csv)
            .export(&table, &ChartSpec::survival(), dir.path())
            .unwrap_err();
        assert!(matches!(err, ExportError::RaggedColumn { expected: 2, actual: 1, .. }));
    }
}
