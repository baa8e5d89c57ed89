use sqlparser::ast::{
    Expr, Function, FunctionArg, FunctionArgExpr, FunctionArguments, GroupByExpr, JoinConstraint,
    JoinOperator, LimitClause, OrderByKind, Query, Select, SelectItem, SetExpr, Statement,
    TableAlias, TableFactor, TableWithJoins, WindowType,
};

use crate::analyzer::{AnalysisError, JoinKind, OrderItem, SelectEntry, SelectTree, SqlNode};

/// Lowers a parsed statement into the analyzer's node tree.
///
/// The only failure is a top-level statement that is not a SELECT
/// (optionally wrapped in parentheses); every unrecognized expression
/// shape inside a SELECT degrades to `SqlNode::Opaque`.
pub fn lower_statement(statement: &Statement) -> Result<SelectTree, AnalysisError> {
    match statement {
        Statement::Query(query) => lower_query(query),
        _ => Err(AnalysisError::UnsupportedStatement),
    }
}

pub fn lower_query(query: &Query) -> Result<SelectTree, AnalysisError> {
    match query.body.as_ref() {
        SetExpr::Select(select) => Ok(lower_select(select, query)),
        SetExpr::Query(inner) => lower_query(inner),
        _ => Err(AnalysisError::UnsupportedStatement),
    }
}

/// ORDER BY and LIMIT/FETCH live on the wrapping query node; they are
/// folded into the same tree as the inner SELECT's clauses.
fn lower_select(select: &Select, query: &Query) -> SelectTree {
    let from = select.from.iter().map(lower_table_with_joins).collect();
    let items = select.projection.iter().map(lower_select_item).collect();
    let filter = select.selection.as_ref().map(lower_expr);
    let group_by = match &select.group_by {
        GroupByExpr::Expressions(exprs, _) => exprs.iter().map(lower_expr).collect(),
        GroupByExpr::All(_) => Vec::new(),
    };
    let having = select.having.as_ref().map(lower_expr);

    SelectTree {
        from,
        items,
        filter,
        group_by,
        having,
        order_by: lower_order_by(query),
        limit: lower_limit(query),
    }
}

fn lower_order_by(query: &Query) -> Vec<OrderItem> {
    let Some(order_by) = &query.order_by else {
        return Vec::new();
    };
    match &order_by.kind {
        OrderByKind::Expressions(exprs) => exprs
            .iter()
            .map(|entry| OrderItem {
                expr: lower_expr(&entry.expr),
                text: entry.to_string(),
            })
            .collect(),
        // ORDER BY ALL has no item list to report
        _ => Vec::new(),
    }
}

fn lower_limit(query: &Query) -> Option<SqlNode> {
    match &query.limit_clause {
        Some(LimitClause::LimitOffset { limit: Some(limit), .. }) => Some(lower_expr(limit)),
        Some(LimitClause::OffsetCommaLimit { limit, .. }) => Some(lower_expr(limit)),
        _ => query
            .fetch
            .as_ref()
            .and_then(|fetch| fetch.quantity.as_ref())
            .map(lower_expr),
    }
}

fn lower_select_item(item: &SelectItem) -> SelectEntry {
    match item {
        SelectItem::UnnamedExpr(expr) => SelectEntry {
            expr: lower_expr(expr),
            alias: None,
        },
        SelectItem::ExprWithAlias { expr, alias } => SelectEntry {
            expr: lower_expr(expr),
            alias: Some(alias.value.clone()),
        },
        SelectItem::Wildcard(_) => SelectEntry {
            expr: SqlNode::Wildcard("*".to_string()),
            alias: None,
        },
        // qualified wildcard: `t.*`
        other => SelectEntry {
            expr: SqlNode::Wildcard(other.to_string()),
            alias: None,
        },
    }
}

fn lower_table_with_joins(twj: &TableWithJoins) -> SqlNode {
    let mut node = lower_table_factor(&twj.relation);
    let mut text = twj.relation.to_string();

    for join in &twj.joins {
        let right = lower_table_factor(&join.relation);
        let (kind, on) = split_join_operator(&join.join_operator);
        text = match on {
            Some(condition) => format!(
                "{} {} {} ON {}",
                text,
                kind.keyword(),
                join.relation,
                condition
            ),
            None => format!("{} {} {}", text, kind.keyword(), join.relation),
        };
        node = SqlNode::Join {
            kind,
            left: Box::new(node),
            right: Box::new(right),
            condition: on.map(|condition| Box::new(lower_expr(condition))),
            text: text.clone(),
        };
    }

    node
}

fn split_join_operator(operator: &JoinOperator) -> (JoinKind, Option<&Expr>) {
    match operator {
        JoinOperator::Join(c) | JoinOperator::Inner(c) => (JoinKind::Inner, on_condition(c)),
        JoinOperator::Left(c) | JoinOperator::LeftOuter(c) => (JoinKind::Left, on_condition(c)),
        JoinOperator::Right(c) | JoinOperator::RightOuter(c) => (JoinKind::Right, on_condition(c)),
        JoinOperator::FullOuter(c) => (JoinKind::Full, on_condition(c)),
        _ => (JoinKind::Cross, None),
    }
}

fn on_condition(constraint: &JoinConstraint) -> Option<&Expr> {
    match constraint {
        JoinConstraint::On(expr) => Some(expr),
        // USING/NATURAL carry no expression to classify
        _ => None,
    }
}

fn lower_table_factor(factor: &TableFactor) -> SqlNode {
    match factor {
        TableFactor::Table { name, alias, .. } => {
            let base = SqlNode::Identifier(name.0.iter().map(|part| part.to_string()).collect());
            wrap_alias(base, alias)
        }
        TableFactor::Derived { subquery, alias, .. } => {
            let node = match lower_query(subquery) {
                Ok(tree) => SqlNode::Subquery {
                    tree: Box::new(tree),
                    text: subquery.to_string(),
                },
                Err(_) => SqlNode::Opaque(factor.to_string()),
            };
            wrap_alias(node, alias)
        }
        TableFactor::NestedJoin {
            table_with_joins,
            alias,
            ..
        } => wrap_alias(lower_table_with_joins(table_with_joins), alias),
        // table functions, UNNEST, etc. register by their rendering
        _ => SqlNode::Opaque(factor.to_string()),
    }
}

fn wrap_alias(node: SqlNode, alias: &Option<TableAlias>) -> SqlNode {
    match alias {
        Some(alias) => SqlNode::Aliased {
            expr: Box::new(node),
            alias: alias.name.value.clone(),
        },
        None => node,
    }
}

pub fn lower_expr(expr: &Expr) -> SqlNode {
    match expr {
        Expr::Identifier(ident) => SqlNode::Identifier(vec![ident.value.clone()]),
        Expr::CompoundIdentifier(parts) => {
            SqlNode::Identifier(parts.iter().map(|part| part.value.clone()).collect())
        }
        Expr::Wildcard(_) => SqlNode::Wildcard("*".to_string()),
        Expr::QualifiedWildcard(name, _) => SqlNode::Wildcard(format!("{}.*", name)),
        Expr::Value(_) => SqlNode::Literal(expr.to_string()),
        Expr::TypedString { .. } => SqlNode::Literal(expr.to_string()),
        Expr::BinaryOp { left, right, .. } => {
            call(expr, vec![lower_expr(left), lower_expr(right)])
        }
        Expr::UnaryOp { expr: operand, .. } => call(expr, vec![lower_expr(operand)]),
        Expr::Nested(inner) => call(expr, vec![lower_expr(inner)]),
        Expr::IsNull(inner) | Expr::IsNotNull(inner) => call(expr, vec![lower_expr(inner)]),
        Expr::Between {
            expr: operand,
            low,
            high,
            ..
        } => call(
            expr,
            vec![lower_expr(operand), lower_expr(low), lower_expr(high)],
        ),
        Expr::Like {
            expr: operand,
            pattern,
            ..
        }
        | Expr::ILike {
            expr: operand,
            pattern,
            ..
        }
        | Expr::SimilarTo {
            expr: operand,
            pattern,
            ..
        } => call(expr, vec![lower_expr(operand), lower_expr(pattern)]),
        Expr::InList {
            expr: operand,
            list,
            ..
        } => {
            let mut args = vec![lower_expr(operand)];
            args.extend(list.iter().map(lower_expr));
            call(expr, args)
        }
        // the subquery side is kept as text only; its references stay internal
        Expr::InSubquery { expr: operand, .. } => call(expr, vec![lower_expr(operand)]),
        Expr::Cast { expr: operand, .. } => call(expr, vec![lower_expr(operand)]),
        Expr::Case {
            operand,
            conditions,
            else_result,
            ..
        } => {
            let mut args = Vec::new();
            if let Some(operand) = operand {
                args.push(lower_expr(operand));
            }
            for when in conditions {
                args.push(lower_expr(&when.condition));
                args.push(lower_expr(&when.result));
            }
            if let Some(else_result) = else_result {
                args.push(lower_expr(else_result));
            }
            call(expr, args)
        }
        Expr::Tuple(items) => SqlNode::List(items.iter().map(lower_expr).collect()),
        Expr::Function(func) => lower_function(expr, func),
        Expr::Subquery(query) => match lower_query(query) {
            Ok(tree) => SqlNode::Subquery {
                tree: Box::new(tree),
                text: query.to_string(),
            },
            Err(_) => SqlNode::Opaque(expr.to_string()),
        },
        _ => SqlNode::Opaque(expr.to_string()),
    }
}

fn call(expr: &Expr, args: Vec<SqlNode>) -> SqlNode {
    SqlNode::Call {
        text: expr.to_string(),
        args,
    }
}

fn lower_function(expr: &Expr, func: &Function) -> SqlNode {
    let mut args = Vec::new();
    if let FunctionArguments::List(list) = &func.args {
        for arg in &list.args {
            match arg {
                FunctionArg::Unnamed(arg)
                | FunctionArg::Named { arg, .. }
                | FunctionArg::ExprNamed { arg, .. } => args.push(lower_function_arg(arg)),
            }
        }
    }
    // window specifications contribute references too
    if let Some(WindowType::WindowSpec(window)) = &func.over {
        args.extend(window.partition_by.iter().map(lower_expr));
        args.extend(window.order_by.iter().map(|entry| lower_expr(&entry.expr)));
    }

    SqlNode::Call {
        text: expr.to_string(),
        args,
    }
}

fn lower_function_arg(arg: &FunctionArgExpr) -> SqlNode {
    match arg {
        FunctionArgExpr::Expr(expr) => lower_expr(expr),
        FunctionArgExpr::QualifiedWildcard(name) => SqlNode::Wildcard(format!("{}.*", name)),
        FunctionArgExpr::Wildcard => SqlNode::Wildcard("*".to_string()),
    }
}
