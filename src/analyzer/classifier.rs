use crate::analyzer::{SqlNode, TableKey};

/// One column reference found in an expression tree.
#[derive(Debug, Clone, PartialEq)]
pub struct ColumnRef {
    pub table: TableKey,
    pub column: String,
}

/// Folds an expression tree into the column references it contains.
///
/// Structure-driven only: calls recurse into their operands no matter
/// what function or operator they are. Subqueries, literals, wildcards
/// and opaque nodes are leaves with zero references. Never fails.
pub fn classify_references(node: &SqlNode) -> Vec<ColumnRef> {
    let mut refs = Vec::new();
    collect(node, &mut refs);
    refs
}

fn collect(node: &SqlNode, refs: &mut Vec<ColumnRef>) {
    match node {
        SqlNode::Identifier(parts) => match parts.as_slice() {
            [column] => refs.push(ColumnRef {
                table: TableKey::Unknown,
                column: column.clone(),
            }),
            [table, column, ..] => refs.push(ColumnRef {
                table: TableKey::known(table),
                column: column.clone(),
            }),
            [] => {}
        },
        SqlNode::Call { args, .. } => {
            for arg in args {
                collect(arg, refs);
            }
        }
        SqlNode::List(items) => {
            for item in items {
                collect(item, refs);
            }
        }
        SqlNode::Aliased { expr, .. } => collect(expr, refs),
        // intentional leaves: no references
        SqlNode::Literal(_) => {}
        SqlNode::Wildcard(_) => {}
        SqlNode::Subquery { .. } => {}
        SqlNode::Join { .. } => {}
        SqlNode::Opaque(_) => {}
    }
}

#[cfg(test)]
mod tests {
    use crate::analyzer::{classify_references, SqlNode, TableKey};

    fn ident(parts: &[&str]) -> SqlNode {
        SqlNode::Identifier(parts.iter().map(|p| p.to_string()).collect())
    }

    #[test]
    pub fn test_qualified_identifier() {
        let refs = classify_references(&ident(&["u", "name"]));

        assert_eq!(refs.len(), 1);
        assert_eq!(refs[0].table, TableKey::known("u"));
        assert_eq!(refs[0].column, "name");
    }

    #[test]
    pub fn test_unqualified_identifier() {
        let refs = classify_references(&ident(&["name"]));

        assert_eq!(refs.len(), 1);
        assert_eq!(refs[0].table, TableKey::Unknown);
        assert_eq!(refs[0].column, "name");
    }

    #[test]
    pub fn test_call_recurses_into_operands() {
        let node = SqlNode::Call {
            text: "u.age > lower_bound".to_string(),
            args: vec![ident(&["u", "age"]), ident(&["lower_bound"])],
        };

        let refs = classify_references(&node);

        assert_eq!(refs.len(), 2);
        assert_eq!(refs[0].table, TableKey::known("u"));
        assert_eq!(refs[0].column, "age");
        assert_eq!(refs[1].table, TableKey::Unknown);
        assert_eq!(refs[1].column, "lower_bound");
    }

    #[test]
    pub fn test_nested_calls_and_lists() {
        let node = SqlNode::Call {
            text: "COALESCE(a.x, (1, b.y))".to_string(),
            args: vec![
                ident(&["a", "x"]),
                SqlNode::List(vec![SqlNode::Literal("1".to_string()), ident(&["b", "y"])]),
            ],
        };

        let refs = classify_references(&node);

        assert_eq!(refs.len(), 2);
        assert_eq!(refs[0].column, "x");
        assert_eq!(refs[1].column, "y");
    }

    #[test]
    pub fn test_leaves_yield_nothing() {
        assert!(classify_references(&SqlNode::Literal("42".to_string())).is_empty());
        assert!(classify_references(&SqlNode::Wildcard("*".to_string())).is_empty());
        assert!(classify_references(&SqlNode::Opaque("EXISTS (SELECT 1)".to_string())).is_empty());
    }
}
