use serde::Serialize;

// ---------------------------------------------------------------------------
// Field descriptors
// ---------------------------------------------------------------------------

/// Prefix of the line that opens a new measurement group.
pub const GROUP_PREFIX: &str = "n=";

/// How the raw token of a metric line is interpreted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ValueKind {
    /// A duration with an optional unit suffix, stored in milliseconds.
    Time,
    /// A plain non-negative integer counter.
    Count,
}

/// What happens when a field shows up twice inside one group.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RepeatPolicy {
    /// Keep the first value and discard the rest.
    KeepFirst,
    /// Treat the repeat as a fault.
    Reject,
}

/// One recognised metric: series name, line prefix (separator included)
/// and value kind.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldDescriptor {
    pub name: &'static str,
    pub prefix: &'static str,
    pub kind: ValueKind,
    pub repeat: RepeatPolicy,
}

impl FieldDescriptor {
    /// A time field whose line prefix is `<name>=`.
    pub const fn time(name: &'static str, prefix: &'static str) -> Self {
        FieldDescriptor {
            name,
            prefix,
            kind: ValueKind::Time,
            repeat: RepeatPolicy::Reject,
        }
    }

    pub const fn count(name: &'static str, prefix: &'static str) -> Self {
        FieldDescriptor {
            name,
            prefix,
            kind: ValueKind::Count,
            repeat: RepeatPolicy::Reject,
        }
    }

    pub const fn keep_first(mut self) -> Self {
        self.repeat = RepeatPolicy::KeepFirst;
        self
    }
}

/// Timing-variant fields, in the order their series are exported.
pub const TIMING_FIELDS: &[FieldDescriptor] = &[
    FieldDescriptor::time("serial_parry_narrow", "serial_parry_narrow="),
    FieldDescriptor::time("serial_our_narrow", "serial_our_narrow="),
    FieldDescriptor::time("parallel_parry_narrow", "parallel_parry_narrow="),
    FieldDescriptor::time("parallel_our_narrow", "parallel_our_narrow="),
    FieldDescriptor::time("serial_double", "serial_double="),
    FieldDescriptor::time("parallel_double", "parallel_double="),
];

/// Denominator counter of the survival ratio: candidate pairs out of the broad phase.
pub const PAIRS: &str = "pairs";
/// Numerator counter of the survival ratio. The harness may print it several
/// times per group; only the first one counts.
pub const PAIRS_TO_NARROW: &str = "pairs_to_narrow";

/// Ratio-variant fields.
pub const SURVIVAL_FIELDS: &[FieldDescriptor] = &[
    FieldDescriptor::count(PAIRS, "#pairs="),
    FieldDescriptor::count(PAIRS_TO_NARROW, "# pairs_to_narrow=").keep_first(),
];

// ---------------------------------------------------------------------------
// Line classification
// ---------------------------------------------------------------------------

/// Result of classifying one trimmed line.
#[derive(Debug, Clone, PartialEq)]
pub enum LineKind<'a> {
    /// `n=<raw>`; the integer is parsed by the record builder so it can
    /// report the line number on failure.
    GroupHeader(&'a str),
    /// A recognised metric. `field` indexes [`FieldSet::fields`].
    Metric { field: usize, raw: &'a str },
    Unrecognized,
}

/// An ordered set of recognised fields.
///
/// Declaration order fixes the column order of the dataset; matching runs
/// over a separate priority list sorted longest prefix first, so a prefix
/// that happens to start another one never captures its lines.
#[derive(Debug, Clone)]
pub struct FieldSet {
    fields: Vec<FieldDescriptor>,
    match_order: Vec<usize>,
}

impl FieldSet {
    pub fn new(fields: Vec<FieldDescriptor>) -> Self {
        let mut match_order: Vec<usize> = (0..fields.len()).collect();
        // Stable: equal-length prefixes keep declaration order.
        match_order.sort_by(|&a, &b| fields[b].prefix.len().cmp(&fields[a].prefix.len()));
        FieldSet {
            fields,
            match_order,
        }
    }

    pub fn timing() -> Self {
        Self::new(TIMING_FIELDS.to_vec())
    }

    pub fn survival() -> Self {
        Self::new(SURVIVAL_FIELDS.to_vec())
    }

    /// Fields in declaration order.
    pub fn fields(&self) -> &[FieldDescriptor] {
        &self.fields
    }

    pub fn get(&self, index: usize) -> &FieldDescriptor {
        &self.fields[index]
    }

    pub fn position(&self, name: &str) -> Option<usize> {
        self.fields.iter().position(|f| f.name == name)
    }

    /// Classify a single line of a benchmark log.
    pub fn classify<'a>(&self, line: &'a str) -> LineKind<'a> {
        let line = line.trim();

        if let Some(rest) = line.strip_prefix(GROUP_PREFIX) {
            return LineKind::GroupHeader(value_token(rest));
        }

        self.match_order
            .iter()
            .find_map(|&idx| {
                line.strip_prefix(self.fields[idx].prefix)
                    .map(|rest| LineKind::Metric {
                        field: idx,
                        raw: value_token(rest),
                    })
            })
            .unwrap_or(LineKind::Unrecognized)
    }
}

/// Text after the separator, up to an optional further `=`.
fn value_token(rest: &str) -> &str {
    rest.split('=').next().unwrap_or("").trim()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn group_header() {
        let fields = FieldSet::timing();
        assert_eq!(fields.classify("n=100"), LineKind::GroupHeader("100"));
        assert_eq!(fields.classify("  n=20\r"), LineKind::GroupHeader("20"));
    }

    #[test]
    fn timing_metric() {
        let fields = FieldSet::timing();
        let idx = fields.position("serial_double").unwrap();
        assert_eq!(
            fields.classify("serial_double=1.5ms"),
            LineKind::Metric {
                field: idx,
                raw: "1.5ms"
            }
        );
    }

    #[test]
    fn survival_counters() {
        let fields = FieldSet::survival();
        assert_eq!(
            fields.classify("#pairs=45"),
            LineKind::Metric { field: 0, raw: "45" }
        );
        assert_eq!(
            fields.classify("# pairs_to_narrow=12"),
            LineKind::Metric { field: 1, raw: "12" }
        );
    }

    #[test]
    fn unknown_lines_are_unrecognized() {
        let fields = FieldSet::timing();
        for line in ["", "hello", "serial_triple=3ms", "#pairs=3", "nn=3"] {
            assert_eq!(fields.classify(line), LineKind::Unrecognized, "{line:?}");
        }
    }

    #[test]
    fn key_must_be_followed_by_separator() {
        let fields = FieldSet::timing();
        assert_eq!(fields.classify("serial_double_extra=3ms"), LineKind::Unrecognized);
    }

    #[test]
    fn longer_prefix_wins() {
        let fields = FieldSet::new(vec![
            FieldDescriptor::count("pairs", "#pairs"),
            FieldDescriptor::count("pairs_narrow", "#pairs_narrow="),
        ]);
        assert_eq!(
            fields.classify("#pairs_narrow=4"),
            LineKind::Metric { field: 1, raw: "4" }
        );
        // Declaration order is still what the dataset sees.
        assert_eq!(fields.fields()[0].name, "pairs");
    }

    #[test]
    fn value_stops_at_second_separator() {
        let fields = FieldSet::timing();
        let idx = fields.position("parallel_double").unwrap();
        assert_eq!(
            fields.classify("parallel_double=3ms=junk"),
            LineKind::Metric { field: idx, raw: "3ms" }
        );
    }
}
