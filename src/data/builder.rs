use std::collections::BTreeSet;

use super::fields::{FieldSet, LineKind, RepeatPolicy, ValueKind};
use super::model::{Dataset, Group, MetricSeries};
use super::units;
use crate::error::ParseError;

// ---------------------------------------------------------------------------
// RecordBuilder – classified lines → Dataset
// ---------------------------------------------------------------------------

/// Accumulates the lines of one log, in order, into a [`Dataset`].
///
/// Values are stored per group slot, so a metric that is absent from a group
/// leaves a visible gap instead of sliding later values forward.
pub struct RecordBuilder<'f> {
    fields: &'f FieldSet,
    groups: Vec<Group>,
    /// `columns[field][group]`
    columns: Vec<Vec<Option<f64>>>,
    /// Fields already recorded for the current group.
    recorded: BTreeSet<usize>,
}

impl<'f> RecordBuilder<'f> {
    pub fn new(fields: &'f FieldSet) -> Self {
        RecordBuilder {
            fields,
            groups: Vec::new(),
            columns: vec![Vec::new(); fields.fields().len()],
            recorded: BTreeSet::new(),
        }
    }

    /// Feed one raw line; `line_no` is 1-based and only used in errors.
    pub fn push_line(&mut self, line_no: usize, line: &str) -> Result<(), ParseError> {
        match self.fields.classify(line) {
            LineKind::GroupHeader(raw) => self.open_group(line_no, raw),
            LineKind::Metric { field, raw } => self.record(line_no, field, raw),
            LineKind::Unrecognized => Ok(()),
        }
    }

    fn open_group(&mut self, line_no: usize, raw: &str) -> Result<(), ParseError> {
        let n = raw.parse::<u64>().map_err(|_| ParseError::MalformedValue {
            line: line_no,
            group: self.current().map(|g| g.n),
            field: "n".to_string(),
            token: raw.to_string(),
        })?;

        if self.groups.iter().any(|g| g.n == n) {
            log::warn!("line {line_no}: n={n} repeats an earlier group; recording it separately");
        }

        self.groups.push(Group { n, line: line_no });
        for column in &mut self.columns {
            column.push(None);
        }
        self.recorded.clear();
        Ok(())
    }

    fn record(&mut self, line_no: usize, field: usize, raw: &str) -> Result<(), ParseError> {
        let fields = self.fields;
        let desc = fields.get(field);
        let group = match self.current() {
            Some(g) => *g,
            None => {
                return Err(ParseError::OrphanMetric {
                    line: line_no,
                    field: desc.name.to_string(),
                })
            }
        };

        if self.recorded.contains(&field) {
            return match desc.repeat {
                RepeatPolicy::KeepFirst => {
                    log::debug!(
                        "line {line_no}: ignoring repeated {} in n={}",
                        desc.name,
                        group.n
                    );
                    Ok(())
                }
                RepeatPolicy::Reject => Err(ParseError::DuplicateMetric {
                    line: line_no,
                    group: group.n,
                    field: desc.name.to_string(),
                }),
            };
        }

        let malformed = || ParseError::MalformedValue {
            line: line_no,
            group: Some(group.n),
            field: desc.name.to_string(),
            token: raw.to_string(),
        };
        let value = match desc.kind {
            ValueKind::Time => units::normalize(raw).map_err(|_| malformed())?,
            ValueKind::Count => raw.parse::<u64>().map_err(|_| malformed())? as f64,
        };

        let slot = self.groups.len() - 1;
        self.columns[field][slot] = Some(value);
        self.recorded.insert(field);
        Ok(())
    }

    fn current(&self) -> Option<&Group> {
        self.groups.last()
    }

    /// Close the log and hand out the finished dataset.
    pub fn finish(self) -> Dataset {
        let series: Vec<MetricSeries> = self
            .fields
            .fields()
            .iter()
            .zip(self.columns)
            .map(|(desc, values)| MetricSeries::new(desc.name, desc.kind, values))
            .collect();

        for s in &series {
            let missing = s.missing_groups();
            if !missing.is_empty() && missing.len() < self.groups.len() {
                log::warn!(
                    "series {} is missing {} of {} groups",
                    s.name,
                    missing.len(),
                    self.groups.len()
                );
            }
        }

        Dataset::new(self.groups, series)
    }
}

/// Parse a whole log held in memory.
pub fn parse_str(text: &str, fields: &FieldSet) -> Result<Dataset, ParseError> {
    let mut builder = RecordBuilder::new(fields);
    for (idx, line) in text.lines().enumerate() {
        builder.push_line(idx + 1, line)?;
    }
    Ok(builder.finish())
}
