// Tue Jan 13 2026 - Alex

use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum StudentError {
    #[error("Student identifier is blank")]
    Blank,
    #[error("Student already registered: {0}")]
    Duplicate(String),
}

/// Reasons a submission is turned away. Variants are listed in the order
/// the registry checks them.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SubmissionError {
    #[error("Submission has no scores")]
    EmptyScores,
    #[error("Submission has no student identifier")]
    MissingIdentifier,
    #[error("Expected {expected} scores, got {actual}")]
    WrongLength { expected: usize, actual: usize },
    #[error("Unknown student: {0}")]
    UnknownStudent(String),
    #[error("Negative score {value} at test {index}")]
    NegativeScore { index: usize, value: i32 },
}
