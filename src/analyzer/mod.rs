pub mod sql_node;
pub use sql_node::*;

pub mod select_tree;
pub use select_tree::*;

pub mod table_ref;
pub use table_ref::*;

pub mod table_key;
pub use table_key::*;

pub mod analysis_error;
pub use analysis_error::*;

pub mod lowering;
pub use lowering::*;

pub mod classifier;
pub use classifier::*;

pub mod analysis_builder;
pub use analysis_builder::*;

pub mod sql_analysis;
pub use sql_analysis::*;

pub mod description;
pub use description::*;

pub mod report;

use sqlparser::ast::Statement;
use sqlparser::dialect::GenericDialect;
use sqlparser::parser::Parser;

/// Parses and analyzes one SQL SELECT statement.
///
/// Parsing is case-insensitive and lenient (GenericDialect). Only the
/// first statement of the input is analyzed.
pub fn analyze(sql: &str) -> Result<SqlAnalysis, AnalysisError> {
    tracing::debug!(len = sql.len(), "analyzing sql text");
    let statements = Parser::parse_sql(&GenericDialect {}, sql)?;
    let statement = statements.first().ok_or(AnalysisError::UnsupportedStatement)?;
    analyze_statement(statement)
}

/// Analyzes an already-parsed statement.
pub fn analyze_statement(statement: &Statement) -> Result<SqlAnalysis, AnalysisError> {
    let tree = lower_statement(statement)?;
    Ok(AnalysisBuilder::default().extract(&tree))
}
