//! Lenient parsing of comma separated numbers.
//!
//! This is the boundary where raw text from a person becomes a numeric sequence. Malformed tokens
//! are dropped rather than failing the whole input; the engine itself only ever sees numbers.

use tracing::warn;

use crate::error::ParseWarning;

/// Numbers parsed from text, with the tokens that were dropped.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ParsedSeries {
    /// Parsed values, in input order.
    pub values: Vec<f64>,
    /// Tokens that were not numbers.
    pub dropped: Vec<ParseWarning>,
}

impl ParsedSeries {
    /// Whether every non-empty token was a number.
    pub fn is_clean(&self) -> bool {
        self.dropped.is_empty()
    }
}

/// Split `text` on commas and parse every token as a number.
///
/// Whitespace around tokens is ignored and empty tokens are skipped silently. Tokens that are not
/// numbers (including `NaN`) are dropped and reported in [`ParsedSeries::dropped`]. A token must
/// be a number as a whole: `"3abc"` is dropped, not read as `3`.
pub fn parse_series(text: &str) -> ParsedSeries {
    let mut parsed = ParsedSeries::default();

    for (position, token) in text.split(',').map(str::trim).enumerate() {
        if token.is_empty() {
            continue;
        }

        match token.parse::<f64>() {
            Ok(value) if !value.is_nan() => parsed.values.push(value),
            _ => {
                warn!(position, token, "Ignoring token that is not a number");
                parsed.dropped.push(ParseWarning {
                    position,
                    token: token.to_string(),
                });
            }
        }
    }

    parsed
}
