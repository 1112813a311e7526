use thiserror::Error;

use super::fields::{PAIRS, PAIRS_TO_NARROW};
use super::model::Dataset;
use crate::error::ParseError;

/// Name of the derived survival-ratio column.
pub const SURVIVAL_RATIO: &str = "survival_ratio";

#[derive(Debug, Clone, PartialEq, Error)]
pub enum RatioError {
    #[error("{numerators} numerators but {denominators} denominators")]
    LengthMismatch {
        numerators: usize,
        denominators: usize,
    },
    #[error("zero denominator at position {index}")]
    DivisionByZero { index: usize },
}

/// Element-wise `numerators[i] / denominators[i]`, order preserved.
///
/// A zero denominator aborts the computation; no sentinel is produced.
pub fn ratios(numerators: &[f64], denominators: &[f64]) -> Result<Vec<f64>, RatioError> {
    if numerators.len() != denominators.len() {
        return Err(RatioError::LengthMismatch {
            numerators: numerators.len(),
            denominators: denominators.len(),
        });
    }

    numerators
        .iter()
        .zip(denominators)
        .enumerate()
        .map(|(index, (&num, &den))| {
            if den == 0.0 {
                Err(RatioError::DivisionByZero { index })
            } else {
                Ok(num / den)
            }
        })
        .collect()
}

/// Fraction of broad-phase candidate pairs that reach the narrow phase, per group.
pub fn survival_ratio(dataset: &Dataset) -> Result<Vec<f64>, ParseError> {
    let survivors = dataset.dense(PAIRS_TO_NARROW)?;
    let pairs = dataset.dense(PAIRS)?;

    ratios(&survivors, &pairs).map_err(|err| match err {
        RatioError::DivisionByZero { index } => ParseError::DivisionByZero {
            field: PAIRS.to_string(),
            group: dataset.groups()[index].n,
        },
        other => ParseError::Ratio(other),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::builder::parse_str;
    use crate::data::fields::FieldSet;

    #[test]
    fn pairwise_in_order() {
        assert_eq!(ratios(&[1.0, 3.0, 0.0], &[2.0, 4.0, 5.0]), Ok(vec![0.5, 0.75, 0.0]));
    }

    #[test]
    fn empty_input() {
        assert_eq!(ratios(&[], &[]), Ok(vec![]));
    }

    #[test]
    fn length_mismatch() {
        assert_eq!(
            ratios(&[1.0], &[1.0, 2.0]),
            Err(RatioError::LengthMismatch {
                numerators: 1,
                denominators: 2
            })
        );
    }

    #[test]
    fn zero_denominator() {
        assert_eq!(
            ratios(&[1.0, 1.0], &[1.0, 0.0]),
            Err(RatioError::DivisionByZero { index: 1 })
        );
    }

    #[test]
    fn bounded_when_numerators_do_not_exceed_denominators() {
        let den: Vec<f64> = (1..=50).map(|d| d as f64 * 7.0).collect();
        let num: Vec<f64> = den.iter().enumerate().map(|(i, d)| (d * i as f64 / 49.0).floor()).collect();
        for r in ratios(&num, &den).unwrap() {
            assert!((0.0..=1.0).contains(&r), "{r} out of range");
        }
    }

    #[test]
    fn survival_ratio_from_log() {
        let text = "n=10\n#pairs=40\n# pairs_to_narrow=10\n# pairs_to_narrow=30\nn=20\n#pairs=100\n# pairs_to_narrow=25\n";
        let ds = parse_str(text, &FieldSet::survival()).unwrap();
        assert_eq!(survival_ratio(&ds).unwrap(), vec![0.25, 0.25]);
    }

    #[test]
    fn survival_ratio_zero_pairs() {
        let text = "n=10\n#pairs=4\n# pairs_to_narrow=1\nn=20\n#pairs=0\n# pairs_to_narrow=0\n";
        let ds = parse_str(text, &FieldSet::survival()).unwrap();
        assert!(matches!(
            survival_ratio(&ds),
            Err(ParseError::DivisionByZero { group: 20, .. })
        ));
    }

    #[test]
    fn survival_ratio_missing_counter() {
        let text = "n=10\n#pairs=4\n";
        let ds = parse_str(text, &FieldSet::survival()).unwrap();
        assert!(matches!(
            survival_ratio(&ds),
            Err(ParseError::MissingValue { group: 10, .. })
        ));
    }
}
