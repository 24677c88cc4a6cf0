// 🔎 Query Runner
// Executes literal SQL against the loaded table and prints the result

use crate::db::quote_ident;
use anyhow::{Context, Result};
use rusqlite::types::Value;
use rusqlite::Connection;
use std::fmt;

/// Rows returned by one query, with their column names
#[derive(Debug, Clone, PartialEq)]
pub struct QueryOutput {
    pub columns: Vec<String>,
    pub rows: Vec<Vec<Value>>,
}

impl QueryOutput {
    pub fn row_count(&self) -> usize {
        self.rows.len()
    }

    /// First column of the first row, for single-value queries like AVG
    pub fn scalar(&self) -> Option<&Value> {
        self.rows.first().and_then(|row| row.first())
    }
}

impl fmt::Display for QueryOutput {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let cells: Vec<Vec<String>> = self
            .rows
            .iter()
            .map(|row| row.iter().map(format_value).collect())
            .collect();

        let index_width = self.rows.len().saturating_sub(1).to_string().len();
        let widths: Vec<usize> = self
            .columns
            .iter()
            .enumerate()
            .map(|(i, name)| {
                cells
                    .iter()
                    .map(|row| row[i].len())
                    .chain(std::iter::once(name.len()))
                    .max()
                    .unwrap_or(0)
            })
            .collect();

        write!(f, "{:>w$}", "", w = index_width)?;
        for (name, width) in self.columns.iter().zip(&widths) {
            write!(f, "  {:>w$}", name, w = *width)?;
        }
        writeln!(f)?;

        for (index, row) in cells.iter().enumerate() {
            write!(f, "{:>w$}", index, w = index_width)?;
            for (cell, width) in row.iter().zip(&widths) {
                write!(f, "  {:>w$}", cell, w = *width)?;
            }
            writeln!(f)?;
        }

        Ok(())
    }
}

fn format_value(value: &Value) -> String {
    match value {
        Value::Null => "None".to_string(),
        Value::Integer(i) => i.to_string(),
        Value::Real(r) => format!("{:?}", r),
        Value::Text(s) => s.clone(),
        Value::Blob(b) => format!("<{} bytes>", b.len()),
    }
}

/// Execute a literal query. No parameters, errors propagate as-is.
pub fn run_query(conn: &Connection, sql: &str) -> Result<QueryOutput> {
    let mut stmt = conn
        .prepare(sql)
        .with_context(|| format!("Failed to prepare query: {}", sql))?;

    let columns: Vec<String> = stmt.column_names().iter().map(|c| c.to_string()).collect();
    let column_count = columns.len();

    let rows = stmt
        .query_map([], |row| {
            (0..column_count)
                .map(|i| row.get::<_, Value>(i))
                .collect::<Result<Vec<_>, _>>()
        })?
        .collect::<Result<Vec<_>, _>>()
        .with_context(|| format!("Failed to run query: {}", sql))?;

    Ok(QueryOutput { columns, rows })
}

/// The three report queries, in the order they run
pub fn standard_queries(table_name: &str) -> Vec<String> {
    let table = quote_ident(table_name);
    vec![
        format!("SELECT * FROM {}", table),
        format!("SELECT AVG(MarketCapGBP) FROM {}", table),
        format!("SELECT Name FROM {} LIMIT 5", table),
    ]
}

/// Print a statement followed by its result and a blank line
pub fn print_query(sql: &str, output: &QueryOutput) {
    println!("{}", sql);
    print!("{}", output);
    println!();
}
