use std::fmt::Display;

use sqlparser::parser::ParserError;

/// The two ways an analysis can fail. Everything else degrades to
/// literal text rendering or omission instead of erroring.
#[derive(Debug, Clone, PartialEq)]
pub enum AnalysisError {
    /// The external parser rejected the input; surfaced unchanged.
    Parse(ParserError),
    /// The top-level statement is not a SELECT.
    UnsupportedStatement,
}

impl Display for AnalysisError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            AnalysisError::Parse(err) => write!(f, "{}", err),
            AnalysisError::UnsupportedStatement => {
                write!(f, "Only SELECT statements are supported")
            }
        }
    }
}

impl std::error::Error for AnalysisError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            AnalysisError::Parse(err) => Some(err),
            AnalysisError::UnsupportedStatement => None,
        }
    }
}

impl From<ParserError> for AnalysisError {
    fn from(err: ParserError) -> Self {
        AnalysisError::Parse(err)
    }
}
