use serde::Serialize;

use super::fields::ValueKind;
use crate::error::ParseError;

// ---------------------------------------------------------------------------
// Group – one `n=` block of the log
// ---------------------------------------------------------------------------

/// One measurement group, opened by an `n=<count>` header.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Group {
    /// Primitive count of the run.
    pub n: u64,
    /// 1-based line number of the header.
    pub line: usize,
}

// ---------------------------------------------------------------------------
// MetricSeries – one named metric across all groups
// ---------------------------------------------------------------------------

/// The values of one metric, one slot per group.
///
/// Slot `i` belongs to `Dataset::groups()[i]`; `None` means the metric was
/// not present in that group, so a gap never shifts later values.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MetricSeries {
    pub name: String,
    pub kind: ValueKind,
    values: Vec<Option<f64>>,
}

impl MetricSeries {
    pub(crate) fn new(name: &str, kind: ValueKind, values: Vec<Option<f64>>) -> Self {
        MetricSeries {
            name: name.to_string(),
            kind,
            values,
        }
    }

    pub fn values(&self) -> &[Option<f64>] {
        &self.values
    }

    pub fn get(&self, group: usize) -> Option<f64> {
        self.values.get(group).copied().flatten()
    }

    /// Positions of the groups that have no value for this metric.
    pub fn missing_groups(&self) -> Vec<usize> {
        self.values
            .iter()
            .enumerate()
            .filter(|(_, v)| v.is_none())
            .map(|(i, _)| i)
            .collect()
    }

    pub fn is_complete(&self) -> bool {
        self.values.iter().all(Option::is_some)
    }

    /// Last recorded value, used to order chart legends.
    pub fn last_value(&self) -> Option<f64> {
        self.values.iter().rev().find_map(|v| *v)
    }
}

// ---------------------------------------------------------------------------
// Dataset – the parsed log
// ---------------------------------------------------------------------------

/// A parsed benchmark log: groups in order of appearance plus one series per
/// recognised field, in field-declaration order.
///
/// Only [`RecordBuilder`](super::builder::RecordBuilder) creates datasets;
/// there is no way to mutate one afterwards.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Dataset {
    groups: Vec<Group>,
    series: Vec<MetricSeries>,
}

impl Dataset {
    pub(crate) fn new(groups: Vec<Group>, series: Vec<MetricSeries>) -> Self {
        debug_assert!(series.iter().all(|s| s.values.len() == groups.len()));
        Dataset { groups, series }
    }

    pub fn groups(&self) -> &[Group] {
        &self.groups
    }

    /// The `n` values in order of first appearance in the log.
    pub fn n_values(&self) -> Vec<u64> {
        self.groups.iter().map(|g| g.n).collect()
    }

    pub fn series(&self) -> &[MetricSeries] {
        &self.series
    }

    pub fn series_by_name(&self, name: &str) -> Option<&MetricSeries> {
        self.series.iter().find(|s| s.name == name)
    }

    /// Series values with every slot filled, or the first gap as an error.
    pub fn dense(&self, name: &str) -> Result<Vec<f64>, ParseError> {
        let series = self
            .series_by_name(name)
            .ok_or_else(|| ParseError::UnknownSeries {
                field: name.to_string(),
            })?;

        series
            .values
            .iter()
            .zip(&self.groups)
            .map(|(v, g)| {
                v.ok_or_else(|| ParseError::MissingValue {
                    field: name.to_string(),
                    group: g.n,
                })
            })
            .collect()
    }

    /// Number of groups.
    pub fn len(&self) -> usize {
        self.groups.len()
    }

    /// Whether no group header was seen.
    pub fn is_empty(&self) -> bool {
        self.groups.is_empty()
    }
}

// ---------------------------------------------------------------------------
// Table – columns handed to a chart renderer
// ---------------------------------------------------------------------------

/// A named, dense column of a [`Table`].
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Column {
    pub name: String,
    pub values: Vec<f64>,
}

/// Chart-ready columns: the `n` axis plus equal-length value columns.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Table {
    pub x_name: String,
    pub x: Vec<u64>,
    pub columns: Vec<Column>,
}

impl Table {
    pub fn new(x: Vec<u64>) -> Self {
        Table {
            x_name: "n".to_string(),
            x,
            columns: Vec::new(),
        }
    }

    /// Dense columns for the named series of `dataset`, in the given order.
    pub fn from_dataset(dataset: &Dataset, names: &[&str]) -> Result<Self, ParseError> {
        let mut table = Table::new(dataset.n_values());
        for name in names {
            table.push(name, dataset.dense(name)?);
        }
        Ok(table)
    }

    /// Every series of `dataset`, in declaration order.
    pub fn from_all_series(dataset: &Dataset) -> Result<Self, ParseError> {
        let names: Vec<&str> = dataset.series().iter().map(|s| s.name.as_str()).collect();
        Self::from_dataset(dataset, &names)
    }

    /// Append a column. Callers keep it the same length as `x`; exporters
    /// check it again before writing.
    pub fn push(&mut self, name: &str, values: Vec<f64>) {
        self.columns.push(Column {
            name: name.to_string(),
            values,
        });
    }

    pub fn column(&self, name: &str) -> Option<&Column> {
        self.columns.iter().find(|c| c.name == name)
    }

    pub fn len(&self) -> usize {
        self.x.len()
    }

    pub fn is_empty(&self) -> bool {
        self.x.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> Dataset {
        Dataset::new(
            vec![Group { n: 10, line: 1 }, Group { n: 20, line: 3 }],
            vec![
                MetricSeries::new("a", ValueKind::Time, vec![Some(1.0), Some(2.0)]),
                MetricSeries::new("b", ValueKind::Time, vec![Some(3.0), None]),
            ],
        )
    }

    #[test]
    fn dense_complete_series() {
        assert_eq!(sample().dense("a").unwrap(), vec![1.0, 2.0]);
    }

    #[test]
    fn dense_reports_first_gap() {
        let err = sample().dense("b").unwrap_err();
        assert!(matches!(err, ParseError::MissingValue { group: 20, .. }));
    }

    #[test]
    fn dense_unknown_series() {
        assert!(matches!(
            sample().dense("zzz"),
            Err(ParseError::UnknownSeries { .. })
        ));
    }

    #[test]
    fn missing_groups_and_last_value() {
        let ds = sample();
        let b = ds.series_by_name("b").unwrap();
        assert_eq!(b.missing_groups(), vec![1]);
        assert!(!b.is_complete());
        assert_eq!(b.last_value(), Some(3.0));
        assert_eq!(b.get(1), None);
    }

    #[test]
    fn table_from_dataset() {
        let table = Table::from_dataset(&sample(), &["a"]).unwrap();
        assert_eq!(table.x, vec![10, 20]);
        assert_eq!(table.column("a").unwrap().values, vec![1.0, 2.0]);
        assert!(Table::from_all_series(&sample()).is_err());
    }
}
