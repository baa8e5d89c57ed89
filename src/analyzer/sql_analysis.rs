use indexmap::{IndexMap, IndexSet};
use serde::Serialize;

use crate::analyzer::{TableKey, TableRef};

/// Immutable snapshot of one analyzed SELECT statement.
///
/// Every sequence is in source/encounter order. Constructed once by the
/// analysis builder and never mutated afterwards.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SqlAnalysis {
    /// Tables in first-encounter order, deduplicated by identity.
    pub tables: Vec<TableRef>,
    /// Columns referenced per table identity; unqualified references
    /// land under [`TableKey::Unknown`].
    pub table_columns: IndexMap<TableKey, IndexSet<String>>,
    pub selected_columns: Vec<String>,
    pub where_conditions: Vec<String>,
    pub join_conditions: Vec<String>,
    pub group_by_columns: Vec<String>,
    pub order_by_columns: Vec<String>,
    pub having_condition: Option<String>,
    pub limit_value: Option<i64>,
    /// Deterministic English summary of the query.
    pub description: String,
}
