use std::path::Path;

use super::builder::parse_str;
use super::fields::FieldSet;
use super::model::Dataset;
use crate::error::ParseError;

// ---------------------------------------------------------------------------
// Public entry-points
// ---------------------------------------------------------------------------

/// Read a benchmark log and parse it with the given field set.
///
/// The file is read in full and closed before parsing starts.
pub fn load_file(path: &Path, fields: &FieldSet) -> Result<Dataset, ParseError> {
    let text = std::fs::read_to_string(path).map_err(|source| ParseError::MissingFile {
        path: path.to_path_buf(),
        source,
    })?;

    let dataset = parse_str(&text, fields)?;
    log::info!(
        "Loaded {} groups × {} series from {}",
        dataset.len(),
        dataset.series().len(),
        path.display()
    );
    Ok(dataset)
}

/// Timing log: `n=` headers followed by `<method>=<duration>` lines.
pub fn load_timing(path: &Path) -> Result<Dataset, ParseError> {
    load_file(path, &FieldSet::timing())
}

/// Broad-phase log: `n=`, `#pairs=` and `# pairs_to_narrow=` lines.
pub fn load_survival(path: &Path) -> Result<Dataset, ParseError> {
    load_file(path, &FieldSet::survival())
}
