// Wed Jan 14 2026 - Alex

use crate::ingest::error::ParseError;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SubmissionLine {
    pub identifier: String,
    pub scores: Vec<i32>,
}

/// Splits one source line into an identifier and its scores.
///
/// Returns `Ok(None)` for blank lines. `line_number` is only used for
/// error reporting.
pub fn parse_line(line: &str, line_number: usize) -> Result<Option<SubmissionLine>, ParseError> {
    let mut tokens = line.split_whitespace();

    let identifier = match tokens.next() {
        Some(token) => token.to_string(),
        None => return Ok(None),
    };

    let scores = tokens
        .map(|token| {
            token.parse::<i32>().map_err(|_| ParseError::InvalidScore {
                line: line_number,
                token: token.to_string(),
            })
        })
        .collect::<Result<Vec<_>, _>>()?;

    Ok(Some(SubmissionLine { identifier, scores }))
}
