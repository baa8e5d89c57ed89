use crate::analyzer::SqlAnalysis;

impl SqlAnalysis {
    /// Renders the analysis as a sectioned, line-oriented text report.
    ///
    /// DESCRIPTION, TABLES, TABLE-COLUMNS and SELECTED COLUMNS always
    /// appear; the remaining sections are omitted when empty. Tables
    /// with no referenced columns are skipped in TABLE-COLUMNS.
    pub fn to_formatted_string(&self) -> String {
        let mut out = String::new();

        out.push_str("=== SQL ANALYSIS ===\n\n");

        out.push_str("DESCRIPTION:\n");
        out.push_str(&format!("  {}\n\n", self.description));

        out.push_str("TABLES:\n");
        for table in &self.tables {
            out.push_str(&format!("  - {}\n", table));
        }
        out.push('\n');

        out.push_str("TABLE-COLUMNS:\n");
        for (table, columns) in &self.table_columns {
            if columns.is_empty() {
                continue;
            }
            out.push_str(&format!("  {}:\n", table));
            for column in columns {
                out.push_str(&format!("    - {}\n", column));
            }
        }
        out.push('\n');

        out.push_str("SELECTED COLUMNS:\n");
        for column in &self.selected_columns {
            out.push_str(&format!("  - {}\n", column));
        }
        out.push('\n');

        if !self.where_conditions.is_empty() {
            out.push_str("WHERE CONDITIONS:\n");
            for condition in &self.where_conditions {
                out.push_str(&format!("  - {}\n", condition));
            }
            out.push('\n');
        }

        if !self.join_conditions.is_empty() {
            out.push_str("JOIN CONDITIONS:\n");
            for join in &self.join_conditions {
                out.push_str(&format!("  - {}\n", join));
            }
            out.push('\n');
        }

        if !self.group_by_columns.is_empty() {
            out.push_str("GROUP BY:\n");
            for column in &self.group_by_columns {
                out.push_str(&format!("  - {}\n", column));
            }
            out.push('\n');
        }

        if let Some(having) = &self.having_condition {
            out.push_str("HAVING:\n");
            out.push_str(&format!("  - {}\n\n", having));
        }

        if !self.order_by_columns.is_empty() {
            out.push_str("ORDER BY:\n");
            for column in &self.order_by_columns {
                out.push_str(&format!("  - {}\n", column));
            }
            out.push('\n');
        }

        if let Some(limit) = self.limit_value {
            out.push_str("LIMIT:\n");
            out.push_str(&format!("  - {}\n\n", limit));
        }

        out
    }
}
