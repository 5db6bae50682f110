//! Query result types for sloany.
//!
//! Defines the structures used to represent tabular results returned by the
//! SkyServer. Every row of one result shares the same ordered column list;
//! cells are kept as text exactly as the service returned them.

use std::sync::Arc;
use std::time::Duration;

/// Represents the result of executing a SkyServer query.
#[derive(Debug, Clone, Default)]
pub struct QueryResult {
    /// Column names, in the order the service returned them.
    pub columns: Arc<Vec<String>>,

    /// Rows of data, in the order the service returned them.
    pub rows: Vec<Row>,

    /// Time taken to execute the query.
    pub execution_time: Duration,

    /// Number of rows in the result.
    pub row_count: usize,
}

impl QueryResult {
    /// Creates a query result with the given columns and row cells.
    ///
    /// Each inner vector must have the same length as `columns`.
    pub fn with_data(columns: Vec<String>, cells: Vec<Vec<String>>) -> Self {
        let columns = Arc::new(columns);
        let rows: Vec<Row> = cells
            .into_iter()
            .map(|values| Row::new(Arc::clone(&columns), values))
            .collect();
        let row_count = rows.len();
        Self {
            columns,
            rows,
            execution_time: Duration::ZERO,
            row_count,
        }
    }

    /// Sets the execution time.
    pub fn with_execution_time(mut self, duration: Duration) -> Self {
        self.execution_time = duration;
        self
    }

    /// Returns true if the result set is empty.
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}

/// A single row of a query result.
///
/// The column header is shared between all rows of one result, so lookups by
/// name preserve the service's column ordering without copying it per row.
#[derive(Debug, Clone)]
pub struct Row {
    columns: Arc<Vec<String>>,
    values: Vec<String>,
}

impl Row {
    /// Creates a row over a shared column header.
    pub fn new(columns: Arc<Vec<String>>, values: Vec<String>) -> Self {
        Self { columns, values }
    }

    /// Returns the cell under the given column name, if the column exists.
    pub fn get(&self, name: &str) -> Option<&str> {
        let idx = self.columns.iter().position(|c| c == name)?;
        self.values.get(idx).map(String::as_str)
    }

    /// Returns the cells in column order.
    pub fn values(&self) -> &[String] {
        &self.values
    }

    /// Returns the shared column names in order.
    pub fn columns(&self) -> &[String] {
        &self.columns
    }
}
