use std::fmt::Display;

use crate::analyzer::SelectTree;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum JoinKind {
    Inner,
    Left,
    Right,
    Full,
    Cross,
}

impl JoinKind {
    pub fn keyword(&self) -> &'static str {
        match self {
            JoinKind::Inner => "INNER JOIN",
            JoinKind::Left => "LEFT JOIN",
            JoinKind::Right => "RIGHT JOIN",
            JoinKind::Full => "FULL JOIN",
            JoinKind::Cross => "CROSS JOIN",
        }
    }
}

/// One node of the lowered SQL expression tree.
///
/// Every shape the analyzer recognizes has its own variant; anything the
/// lowering step does not recognize becomes `Opaque`, which carries only
/// its textual rendering and contributes no column references.
#[derive(Debug, Clone, PartialEq)]
pub enum SqlNode {
    /// Bare or qualified name, one entry per dotted part.
    Identifier(Vec<String>),
    /// Operator or function application. `text` is the full rendering,
    /// `args` are the operands the classifier recurses into.
    Call { text: String, args: Vec<SqlNode> },
    List(Vec<SqlNode>),
    Literal(String),
    /// `*` or `table.*`, carried verbatim.
    Wildcard(String),
    Aliased { expr: Box<SqlNode>, alias: String },
    /// Nested SELECT with its lowered clause tree.
    Subquery { tree: Box<SelectTree>, text: String },
    /// One join operation; `text` is the cumulative rendering of the
    /// join tree up to and including this node.
    Join {
        kind: JoinKind,
        left: Box<SqlNode>,
        right: Box<SqlNode>,
        condition: Option<Box<SqlNode>>,
        text: String,
    },
    Opaque(String),
}

impl Display for SqlNode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SqlNode::Identifier(parts) => write!(f, "{}", parts.join(".")),
            SqlNode::Call { text, .. } => write!(f, "{}", text),
            SqlNode::List(items) => {
                let rendered: Vec<String> = items.iter().map(|item| item.to_string()).collect();
                write!(f, "{}", rendered.join(", "))
            }
            SqlNode::Literal(text) => write!(f, "{}", text),
            SqlNode::Wildcard(text) => write!(f, "{}", text),
            SqlNode::Aliased { expr, alias } => write!(f, "{} AS {}", expr, alias),
            SqlNode::Subquery { text, .. } => write!(f, "({})", text),
            SqlNode::Join { text, .. } => write!(f, "{}", text),
            SqlNode::Opaque(text) => write!(f, "{}", text),
        }
    }
}
