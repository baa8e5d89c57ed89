use crate::analyzer::SqlNode;

/// One SELECT-list entry: the lowered expression plus its alias, if any.
#[derive(Debug, Clone, PartialEq)]
pub struct SelectEntry {
    pub expr: SqlNode,
    pub alias: Option<String>,
}

/// One ORDER BY entry. `text` keeps the direction suffix exactly as the
/// parser renders the source (`name`, `name ASC`, `name DESC`).
#[derive(Debug, Clone, PartialEq)]
pub struct OrderItem {
    pub expr: SqlNode,
    pub text: String,
}

/// The clause-level view of one SELECT statement after lowering.
///
/// ORDER BY and LIMIT land here whether they were attached to the inner
/// SELECT or to the wrapping query node.
#[derive(Debug, Clone, PartialEq)]
pub struct SelectTree {
    pub from: Vec<SqlNode>,
    pub items: Vec<SelectEntry>,
    pub filter: Option<SqlNode>,
    pub group_by: Vec<SqlNode>,
    pub having: Option<SqlNode>,
    pub order_by: Vec<OrderItem>,
    pub limit: Option<SqlNode>,
}
