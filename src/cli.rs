use std::error::Error;
use std::fs;
use std::path::{Path, PathBuf};

use clap::Parser;

use crate::analyzer::analyze;

#[derive(Parser, Debug)]
#[command(name = "sqlens")]
#[command(version, about = "Analyze SQL SELECT statements")]
pub struct Cli {
    /// Path to a file containing a single SELECT statement
    #[arg(required_unless_present = "examples")]
    pub file: Option<PathBuf>,

    /// Show the SQL query along with the full analysis
    #[arg(long)]
    pub verbose: bool,

    /// Only show the English description
    #[arg(long, short)]
    pub quiet: bool,

    /// Run the built-in examples
    #[arg(long)]
    pub examples: bool,
}

pub fn run(cli: &Cli) -> Result<(), Box<dyn Error>> {
    if cli.examples {
        run_examples();
        return Ok(());
    }

    let Some(file) = &cli.file else {
        return Err("missing file argument".into());
    };
    analyze_file(file, cli.verbose, cli.quiet)
}

/// Reads a SQL file and prints its analysis in the selected output mode.
pub fn analyze_file(path: &Path, verbose: bool, quiet: bool) -> Result<(), Box<dyn Error>> {
    let sql = fs::read_to_string(path).map_err(|err| format!("{}: {}", path.display(), err))?;
    let sql = sql.trim();
    if sql.is_empty() {
        return Err(format!("File is empty: {}", path.display()).into());
    }

    if !quiet {
        println!("Analyzing SQL from file: {}", path.display());
        println!("{}", "=".repeat(80));
        println!();
    }

    let analysis = analyze(sql)?;

    if verbose {
        println!("SQL QUERY:");
        println!("{}", sql);
        println!();
        println!("{}", "=".repeat(80));
        println!();
    }

    if quiet {
        println!("{}", analysis.description);
    } else {
        println!("{}", analysis.to_formatted_string());
    }

    Ok(())
}

const EXAMPLES: &[(&str, &str)] = &[
    (
        "Example 1: Simple SELECT",
        "SELECT id, name, email FROM users WHERE age > 18 ORDER BY name",
    ),
    (
        "Example 2: JOIN Query",
        "SELECT u.name, o.order_date, o.total FROM users u \
         INNER JOIN orders o ON u.id = o.user_id \
         WHERE o.total > 100 ORDER BY o.order_date DESC",
    ),
    (
        "Example 3: Aggregation Query",
        "SELECT department, COUNT(*) AS employee_count, AVG(salary) AS avg_salary \
         FROM employees \
         WHERE hire_date > '2020-01-01' \
         GROUP BY department \
         HAVING COUNT(*) > 5 \
         ORDER BY avg_salary DESC \
         LIMIT 10",
    ),
    (
        "Example 4: Multiple JOINs",
        "SELECT c.customer_name, p.product_name, oi.quantity, oi.price \
         FROM customers c \
         INNER JOIN orders o ON c.customer_id = o.customer_id \
         INNER JOIN order_items oi ON o.order_id = oi.order_id \
         INNER JOIN products p ON oi.product_id = p.product_id \
         WHERE o.order_date >= '2024-01-01' AND oi.quantity > 1",
    ),
    (
        "Example 5: Subquery",
        "SELECT name, salary FROM employees \
         WHERE salary > (SELECT AVG(salary) FROM employees) \
         ORDER BY salary DESC",
    ),
    (
        "Window 1: ROW_NUMBER Partitioning",
        "SELECT employee_id, department, salary, \
         ROW_NUMBER() OVER (PARTITION BY department ORDER BY salary DESC) AS dept_salary_rank \
         FROM employees WHERE employment_status = 'active' \
         ORDER BY department, salary DESC LIMIT 100",
    ),
    (
        "Window 2: RANK vs DENSE_RANK",
        "SELECT product_id, category, sales_amount, \
         RANK() OVER (PARTITION BY category ORDER BY sales_amount DESC) AS rank_with_gaps, \
         DENSE_RANK() OVER (PARTITION BY category ORDER BY sales_amount DESC) AS rank_no_gaps \
         FROM product_sales WHERE sales_amount > 0 \
         ORDER BY category, sales_amount DESC",
    ),
    (
        "Window 3: Running Totals",
        "SELECT order_date, customer_id, order_amount, \
         SUM(order_amount) OVER (PARTITION BY customer_id ORDER BY order_date \
         ROWS BETWEEN UNBOUNDED PRECEDING AND CURRENT ROW) AS running_total \
         FROM orders WHERE order_status = 'completed' \
         ORDER BY customer_id, order_date",
    ),
    (
        "Window 4: Moving Averages",
        "SELECT trade_date, stock_symbol, closing_price, \
         AVG(closing_price) OVER (PARTITION BY stock_symbol ORDER BY trade_date \
         ROWS BETWEEN 6 PRECEDING AND CURRENT ROW) AS ma_7day \
         FROM stock_prices WHERE trade_date >= '2023-01-01' \
         ORDER BY stock_symbol, trade_date DESC LIMIT 1000",
    ),
    (
        "Window 5: LEAD and LAG",
        "SELECT customer_id, transaction_date, transaction_amount, \
         LAG(transaction_amount, 1) OVER (PARTITION BY customer_id ORDER BY transaction_date) AS previous_amount, \
         LEAD(transaction_amount, 1) OVER (PARTITION BY customer_id ORDER BY transaction_date) AS next_amount \
         FROM transactions WHERE transaction_status = 'completed' \
         ORDER BY customer_id, transaction_date",
    ),
    (
        "Window 6: NTILE Quartiles",
        "SELECT customer_id, total_revenue, \
         NTILE(4) OVER (ORDER BY total_revenue DESC) AS revenue_quartile \
         FROM customer_summary WHERE account_status = 'active' \
         ORDER BY total_revenue DESC LIMIT 500",
    ),
    (
        "Window 7: FIRST_VALUE",
        "SELECT session_id, page_url, page_view_timestamp, \
         FIRST_VALUE(page_url) OVER (PARTITION BY session_id ORDER BY page_view_timestamp) AS entry_page, \
         COUNT(*) OVER (PARTITION BY session_id) AS pages_in_session \
         FROM page_views ORDER BY session_id, page_view_timestamp",
    ),
    (
        "Window 8: Top N Per Group",
        "SELECT category_name, product_name, total_sales, \
         ROW_NUMBER() OVER (PARTITION BY category_id ORDER BY total_sales DESC) AS sales_rank \
         FROM product_performance WHERE total_sales > 0",
    ),
];

/// Analyzes the built-in demonstration queries and prints each report.
pub fn run_examples() {
    for (title, sql) in EXAMPLES {
        println!();
        println!("{}", "=".repeat(80));
        println!("{}", title);
        println!("{}", "=".repeat(80));
        println!("SQL: {}", sql);
        println!();

        match analyze(sql) {
            Ok(analysis) => println!("{}", analysis.to_formatted_string()),
            Err(err) => eprintln!("Error analyzing SQL: {}", err),
        }
    }
}

#[cfg(test)]
mod tests {
    use std::io::Write;
    use std::path::Path;

    use crate::cli::analyze_file;

    #[test]
    pub fn test_analyze_file() {
        let mut file = tempfile::NamedTempFile::new().expect("Failed to create temp file");
        writeln!(file, "SELECT name FROM users").expect("Failed to write sql file");

        analyze_file(file.path(), false, true).expect("Failed to analyze file");
        analyze_file(file.path(), true, false).expect("Failed to analyze file");
    }

    #[test]
    pub fn test_missing_file_is_an_error() {
        let result = analyze_file(Path::new("does-not-exist.sql"), false, false);
        assert!(result.is_err());
    }

    #[test]
    pub fn test_empty_file_is_an_error() {
        let file = tempfile::NamedTempFile::new().expect("Failed to create temp file");
        let result = analyze_file(file.path(), false, false);
        assert!(result.is_err());
    }

    #[test]
    pub fn test_invalid_sql_is_an_error() {
        let mut file = tempfile::NamedTempFile::new().expect("Failed to create temp file");
        writeln!(file, "SELECT FROM WHERE").expect("Failed to write sql file");

        let result = analyze_file(file.path(), false, true);
        assert!(result.is_err());
    }

    #[test]
    pub fn test_all_examples_analyze() {
        for (title, sql) in super::EXAMPLES {
            crate::analyzer::analyze(sql)
                .unwrap_or_else(|err| panic!("example '{}' failed: {}", title, err));
        }
    }
}
