use indexmap::{IndexMap, IndexSet};

use crate::analyzer::{
    classify_references, describe, SelectEntry, SelectTree, SqlAnalysis, SqlNode, TableKey,
    TableRef,
};

/// Accumulates one analysis while walking a lowered SELECT tree.
///
/// A builder is constructed fresh per analysis and consumed by
/// [`AnalysisBuilder::extract`]; nothing carries over between calls.
#[derive(Debug, Default)]
pub struct AnalysisBuilder {
    tables: Vec<TableRef>,
    seen_identities: IndexSet<String>,
    table_columns: IndexMap<TableKey, IndexSet<String>>,
    selected_columns: Vec<String>,
    where_conditions: Vec<String>,
    join_conditions: Vec<String>,
    group_by_columns: Vec<String>,
    order_by_columns: Vec<String>,
    having_condition: Option<String>,
    limit_value: Option<i64>,
}

impl AnalysisBuilder {
    pub fn extract(mut self, tree: &SelectTree) -> SqlAnalysis {
        self.walk_select(tree);
        self.finish()
    }

    /// Clause order matters: FROM first so tables are registered before
    /// any clause attributes columns to them.
    fn walk_select(&mut self, tree: &SelectTree) {
        for from_item in &tree.from {
            self.walk_from(from_item);
        }

        for item in &tree.items {
            self.process_item(item);
        }

        if let Some(filter) = &tree.filter {
            self.where_conditions.push(filter.to_string());
            self.classify_into_map(filter);
        }

        for group_item in &tree.group_by {
            self.group_by_columns.push(group_item.to_string());
            self.classify_into_map(group_item);
        }

        if let Some(having) = &tree.having {
            self.having_condition = Some(having.to_string());
            self.classify_into_map(having);
        }

        for order_item in &tree.order_by {
            self.order_by_columns.push(order_item.text.clone());
            self.classify_into_map(&order_item.expr);
        }

        if let Some(limit) = &tree.limit {
            // only a plain integer literal is kept; anything else is dropped
            if let Ok(value) = limit.to_string().parse::<i64>() {
                self.limit_value = Some(value);
            }
        }
    }

    fn walk_from(&mut self, node: &SqlNode) {
        match node {
            SqlNode::Join {
                left,
                right,
                condition,
                text,
                ..
            } => {
                self.walk_from(left);
                self.walk_from(right);
                if let Some(condition) = condition {
                    self.join_conditions.push(text.clone());
                    self.classify_into_map(condition);
                }
            }
            SqlNode::Aliased { expr, alias } => match expr.as_ref() {
                // a derived table folds into the same state; its alias is
                // not a table of its own
                SqlNode::Subquery { tree, .. } => self.walk_select(tree),
                other => {
                    self.add_table(TableRef::with_alias(other.to_string(), alias.clone()));
                }
            },
            SqlNode::Subquery { tree, .. } => self.walk_select(tree),
            SqlNode::Identifier(_) => self.add_table(TableRef::new(node.to_string())),
            // table functions and other unrecognized FROM items register
            // by their rendering
            other => self.add_table(TableRef::new(other.to_string())),
        }
    }

    fn add_table(&mut self, table: TableRef) {
        if self.seen_identities.insert(table.identity().to_string()) {
            self.table_columns
                .entry(TableKey::known(table.identity()))
                .or_default();
            self.tables.push(table);
        }
    }

    fn process_item(&mut self, entry: &SelectEntry) {
        match (&entry.alias, &entry.expr) {
            (Some(alias), expr) => {
                self.selected_columns.push(format!("{} AS {}", expr, alias));
                if let SqlNode::Identifier(parts) = expr {
                    self.register_qualified(parts);
                }
                self.classify_into_map(expr);
            }
            (None, SqlNode::Identifier(parts)) => {
                self.selected_columns.push(entry.expr.to_string());
                // a bare select item registers only its own qualification;
                // unqualified ones stay out of the unknown bucket
                self.register_qualified(parts);
            }
            (None, expr) => {
                self.selected_columns.push(expr.to_string());
                self.classify_into_map(expr);
            }
        }
    }

    fn register_qualified(&mut self, parts: &[String]) {
        if let [table, column, ..] = parts {
            self.table_columns
                .entry(TableKey::known(table))
                .or_default()
                .insert(column.clone());
        }
    }

    fn classify_into_map(&mut self, node: &SqlNode) {
        for reference in classify_references(node) {
            self.table_columns
                .entry(reference.table)
                .or_default()
                .insert(reference.column);
        }
    }

    fn finish(self) -> SqlAnalysis {
        let mut analysis = SqlAnalysis {
            tables: self.tables,
            table_columns: self.table_columns,
            selected_columns: self.selected_columns,
            where_conditions: self.where_conditions,
            join_conditions: self.join_conditions,
            group_by_columns: self.group_by_columns,
            order_by_columns: self.order_by_columns,
            having_condition: self.having_condition,
            limit_value: self.limit_value,
            description: String::new(),
        };
        analysis.description = describe(&analysis);
        analysis
    }
}

#[cfg(test)]
mod tests {
    use crate::analyzer::{analyze, AnalysisError, TableKey};

    #[test]
    pub fn test_simple_select() {
        let analysis = analyze("SELECT name FROM users").expect("Failed to analyze query");

        assert_eq!(analysis.tables.len(), 1);
        assert_eq!(analysis.tables[0].to_string(), "users");
        assert_eq!(analysis.selected_columns, vec!["name".to_string()]);
        assert!(analysis.where_conditions.is_empty());
        assert!(analysis.join_conditions.is_empty());
        assert_eq!(
            analysis.description,
            "This query retrieves the column name from the table users."
        );
    }

    #[test]
    pub fn test_join_query_with_aliases() {
        let analysis = analyze(
            "SELECT u.name, o.total FROM users u \
             INNER JOIN orders o ON u.id = o.user_id WHERE o.total > 100",
        )
        .expect("Failed to analyze query");

        let tables: Vec<String> = analysis.tables.iter().map(|t| t.to_string()).collect();
        assert_eq!(tables, vec!["users (alias: u)", "orders (alias: o)"]);

        assert_eq!(analysis.join_conditions.len(), 1);
        assert!(analysis.join_conditions[0].contains("u.id = o.user_id"));

        assert_eq!(analysis.where_conditions, vec!["o.total > 100".to_string()]);

        let u_columns = &analysis.table_columns[&TableKey::known("u")];
        assert!(u_columns.contains("name"));
        assert!(u_columns.contains("id"));

        let o_columns = &analysis.table_columns[&TableKey::known("o")];
        assert!(o_columns.contains("total"));
        assert!(o_columns.contains("user_id"));
    }

    #[test]
    pub fn test_insert_is_unsupported() {
        let result = analyze("INSERT INTO t VALUES (1)");
        assert_eq!(result, Err(AnalysisError::UnsupportedStatement));
    }

    #[test]
    pub fn test_select_star_with_limit() {
        let analysis = analyze("SELECT * FROM t LIMIT 10").expect("Failed to analyze query");

        assert_eq!(analysis.selected_columns, vec!["*".to_string()]);
        assert_eq!(analysis.limit_value, Some(10));
        assert!(analysis.description.contains("retrieves all columns"));
        assert!(analysis.description.contains("limited to 10 rows"));
    }

    #[test]
    pub fn test_join_chain_order_and_table_dedup() {
        let analysis = analyze(
            "SELECT * FROM a \
             INNER JOIN b ON a.x = b.x \
             LEFT JOIN c ON b.y = c.y \
             INNER JOIN a ON c.z = a.z",
        )
        .expect("Failed to analyze query");

        assert_eq!(analysis.join_conditions.len(), 3);
        assert!(analysis.join_conditions[0].contains("a.x = b.x"));
        assert!(analysis.join_conditions[1].contains("b.y = c.y"));
        assert!(analysis.join_conditions[2].contains("c.z = a.z"));

        // `a` re-encountered: deduplicated, first-encounter order kept
        let tables: Vec<String> = analysis.tables.iter().map(|t| t.to_string()).collect();
        assert_eq!(tables, vec!["a", "b", "c"]);
    }

    #[test]
    pub fn test_unknown_bucket_only_for_unqualified() {
        let analysis = analyze("SELECT id FROM t WHERE T.Age > 18 AND active")
            .expect("Failed to analyze query");

        // qualifier kept verbatim, case as written
        assert!(analysis.table_columns[&TableKey::known("T")].contains("Age"));
        assert!(analysis.table_columns[&TableKey::Unknown].contains("active"));
        // bare select item does not touch the unknown bucket
        assert!(!analysis.table_columns[&TableKey::Unknown].contains("id"));
    }

    #[test]
    pub fn test_no_residue_between_analyses() {
        let first = analyze(
            "SELECT department, COUNT(*) AS n FROM employees \
             WHERE salary > 1000 GROUP BY department \
             HAVING COUNT(*) > 5 ORDER BY n DESC LIMIT 3",
        )
        .expect("Failed to analyze first query");
        assert!(!first.where_conditions.is_empty());

        let second = analyze("SELECT name FROM users").expect("Failed to analyze second query");
        assert!(second.where_conditions.is_empty());
        assert!(second.join_conditions.is_empty());
        assert!(second.group_by_columns.is_empty());
        assert!(second.order_by_columns.is_empty());
        assert!(second.having_condition.is_none());
        assert!(second.limit_value.is_none());
    }

    #[test]
    pub fn test_analysis_is_idempotent() {
        let sql = "SELECT u.name, o.total FROM users u \
                   INNER JOIN orders o ON u.id = o.user_id \
                   GROUP BY u.name ORDER BY o.total DESC LIMIT 5";

        let first = analyze(sql).expect("Failed to analyze query");
        let second = analyze(sql).expect("Failed to analyze query");

        assert_eq!(first, second);
    }

    #[test]
    pub fn test_derived_table_folds_into_same_state() {
        let analysis = analyze(
            "SELECT total FROM (SELECT o.amount AS total FROM orders o WHERE o.paid) sub",
        )
        .expect("Failed to analyze query");

        let tables: Vec<String> = analysis.tables.iter().map(|t| t.to_string()).collect();
        assert_eq!(tables, vec!["orders (alias: o)"]);
        assert!(analysis.table_columns[&TableKey::known("o")].contains("amount"));
        // inner selected items come first: FROM is walked before the outer list
        assert_eq!(
            analysis.selected_columns,
            vec!["o.amount AS total".to_string(), "total".to_string()]
        );
    }

    #[test]
    pub fn test_non_literal_limit_is_dropped() {
        let analysis =
            analyze("SELECT name FROM users LIMIT 10 + 1").expect("Failed to analyze query");
        assert!(analysis.limit_value.is_none());

        let analysis =
            analyze("SELECT name FROM users").expect("Failed to analyze query");
        assert!(analysis.limit_value.is_none());
    }

    #[test]
    pub fn test_group_having_order_extraction() {
        let analysis = analyze(
            "SELECT department, AVG(salary) AS avg_salary FROM employees \
             GROUP BY department HAVING AVG(salary) > 50000 \
             ORDER BY avg_salary DESC",
        )
        .expect("Failed to analyze query");

        assert_eq!(analysis.group_by_columns, vec!["department".to_string()]);
        assert_eq!(
            analysis.having_condition.as_deref(),
            Some("AVG(salary) > 50000")
        );
        assert_eq!(analysis.order_by_columns, vec!["avg_salary DESC".to_string()]);
        assert!(analysis.table_columns[&TableKey::Unknown].contains("salary"));
    }
}
