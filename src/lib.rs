pub mod analyzer;
pub use analyzer::{analyze, analyze_statement, AnalysisError, SqlAnalysis, TableKey, TableRef};

pub mod cli;
