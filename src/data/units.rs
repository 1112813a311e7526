use thiserror::Error;

// ---------------------------------------------------------------------------
// Time-unit precedence table
// ---------------------------------------------------------------------------

/// Unit suffixes and their conversion to milliseconds, in match order.
///
/// `s` is textually contained in every other entry, so the two-character
/// suffixes must be tried first. The benchmark harness writes
/// `Duration`'s `Debug` form, which uses `ns`, `µs`, `ms` and `s`.
pub const UNIT_SUFFIXES: &[(&str, Scale)] = &[
    ("\u{b5}s", Scale::Divide(1_000.0)), // micro sign
    ("\u{3bc}s", Scale::Divide(1_000.0)), // greek mu
    ("ns", Scale::Divide(1_000_000.0)),
    ("ms", Scale::Multiply(1.0)),
    ("s", Scale::Multiply(1_000.0)),
];

/// Conversion from a unit to milliseconds.
///
/// Sub-millisecond units divide so that `500µs` lands exactly on `0.5`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Scale {
    Divide(f64),
    Multiply(f64),
}

impl Scale {
    pub fn apply(self, value: f64) -> f64 {
        match self {
            Scale::Divide(d) => value / d,
            Scale::Multiply(m) => value * m,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Error)]
pub enum UnitError {
    #[error("'{token}' is not a time value")]
    Malformed { token: String },
}

/// Convert a time token such as `500µs`, `1.25ms`, `2s` or `7` to milliseconds.
///
/// A token without a recognised suffix is taken to be milliseconds already.
pub fn normalize(token: &str) -> Result<f64, UnitError> {
    let token = token.trim();
    let (numeral, scale) = UNIT_SUFFIXES
        .iter()
        .find_map(|&(suffix, scale)| token.strip_suffix(suffix).map(|rest| (rest, scale)))
        .unwrap_or((token, Scale::Multiply(1.0)));

    let value = numeral
        .trim()
        .parse::<f64>()
        .map_err(|_| UnitError::Malformed {
            token: token.to_string(),
        })?;

    if !value.is_finite() {
        return Err(UnitError::Malformed {
            token: token.to_string(),
        });
    }

    Ok(scale.apply(value))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn micro_seconds() {
        assert_eq!(normalize("500µs"), Ok(0.5));
        assert_eq!(normalize("500μs"), Ok(0.5));
    }

    #[test]
    fn milli_seconds() {
        assert_eq!(normalize("12ms"), Ok(12.0));
        assert_eq!(normalize("1.5ms"), Ok(1.5));
    }

    #[test]
    fn seconds() {
        assert_eq!(normalize("2s"), Ok(2000.0));
        assert_eq!(normalize("1.5s"), Ok(1500.0));
    }

    #[test]
    fn nanoseconds() {
        assert_eq!(normalize("250ns"), Ok(0.00025));
    }

    #[test]
    fn bare_numeral_is_milliseconds() {
        assert_eq!(normalize("7"), Ok(7.0));
        assert_eq!(normalize(" 7.25 "), Ok(7.25));
    }

    #[test]
    fn milliseconds_are_not_read_as_seconds() {
        // "12ms" ends in "s"; a seconds-first check would try to parse "12m".
        assert_eq!(normalize("12ms"), Ok(12.0));
    }

    #[test]
    fn malformed_tokens() {
        for token in ["", "ms", "abc", "12 parsecs", "1.2.3ms", "NaN", "inf"] {
            assert!(
                matches!(normalize(token), Err(UnitError::Malformed { .. })),
                "{token:?} should be rejected"
            );
        }
    }

    #[test]
    fn error_names_token() {
        let err = normalize("12xs").unwrap_err();
        assert_eq!(err.to_string(), "'12xs' is not a time value");
    }
}
