use crate::analyzer::SqlAnalysis;

/// Renders the deterministic English summary of an analysis.
///
/// Fragment order is a contract consumers match substrings against:
/// selection, tables, joins, filter, grouping, having, ordering, limit.
pub fn describe(analysis: &SqlAnalysis) -> String {
    let mut desc = String::from("This query ");

    let selected = &analysis.selected_columns;
    if selected.iter().any(|c| c == "*" || c.ends_with(".*")) {
        desc.push_str("retrieves all columns");
    } else if selected.len() == 1 {
        desc.push_str(&format!("retrieves the column {}", selected[0]));
    } else {
        let shown = selected.len().min(3);
        desc.push_str(&format!(
            "retrieves {} columns ({}",
            selected.len(),
            selected[..shown].join(", ")
        ));
        if selected.len() > 3 {
            desc.push_str(&format!(", and {} more", selected.len() - 3));
        }
        desc.push(')');
    }

    let tables = &analysis.tables;
    if tables.len() == 1 {
        desc.push_str(&format!(" from the table {}", tables[0]));
    } else if tables.len() > 1 {
        let listed: Vec<String> = tables.iter().map(|t| t.to_string()).collect();
        desc.push_str(&format!(" from {} tables ({})", tables.len(), listed.join(", ")));
    }

    let joins = &analysis.join_conditions;
    if !joins.is_empty() {
        desc.push_str(", joining tables");
        if joins.len() == 1 {
            desc.push_str(&format!(" on condition: {}", joins[0]));
        } else {
            desc.push_str(&format!(" using {} join conditions", joins.len()));
        }
    }

    let filters = &analysis.where_conditions;
    if !filters.is_empty() {
        desc.push_str(". The results are filtered");
        if filters.len() == 1 {
            desc.push_str(&format!(" where {}", filters[0]));
        } else {
            desc.push_str(&format!(" using {} conditions", filters.len()));
        }
    }

    if !analysis.group_by_columns.is_empty() {
        desc.push_str(&format!(
            ". Results are grouped by {}",
            analysis.group_by_columns.join(", ")
        ));
    }

    if let Some(having) = &analysis.having_condition {
        desc.push_str(&format!(", with groups filtered by {}", having));
    }

    if !analysis.order_by_columns.is_empty() {
        desc.push_str(&format!(
            ". Results are sorted by {}",
            analysis.order_by_columns.join(", ")
        ));
    }

    if let Some(limit) = analysis.limit_value {
        desc.push_str(&format!(", limited to {} rows", limit));
    }

    desc.push('.');
    desc
}
