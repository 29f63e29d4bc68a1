//! Tabular result set returned by the scrape engine.

use serde_json::Value;

/// An insertion-ordered JSON object.
pub type JsonMap = serde_json::Map<String, Value>;

/// The row/column structure the engine hands back — named columns in a
/// stable order, dense rows. Row order is preserved as returned.
#[derive(Debug, Clone, Default)]
pub struct JobTable {
    columns: Vec<String>,
    rows: Vec<Vec<Value>>,
}

impl JobTable {
    /// Build a table from explicit columns and dense rows. Short rows are
    /// padded with null, long rows truncated to the column count.
    pub fn new(columns: Vec<String>, rows: Vec<Vec<Value>>) -> Self {
        let width = columns.len();
        let rows = rows
            .into_iter()
            .map(|mut row| {
                row.resize(width, Value::Null);
                row
            })
            .collect();
        Self { columns, rows }
    }

    /// Build a table from a sequence of records. Column order is the order
    /// in which keys first appear across the records.
    pub fn from_records(records: Vec<JsonMap>) -> Self {
        let mut columns: Vec<String> = Vec::new();
        for record in &records {
            for key in record.keys() {
                if !columns.iter().any(|c| c == key) {
                    columns.push(key.clone());
                }
            }
        }

        let rows = records
            .into_iter()
            .map(|record| {
                columns
                    .iter()
                    .map(|column| record.get(column).cloned().unwrap_or(Value::Null))
                    .collect()
            })
            .collect();

        Self { columns, rows }
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Number of rows.
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn columns(&self) -> &[String] {
        &self.columns
    }

    pub fn has_column(&self, name: &str) -> bool {
        self.columns.iter().any(|c| c == name)
    }

    /// All values of a named column, in row order.
    pub fn column(&self, name: &str) -> Option<Vec<&Value>> {
        let index = self.columns.iter().position(|c| c == name)?;
        Some(self.rows.iter().map(|row| &row[index]).collect())
    }

    /// One mapping per row, field order following the column order.
    pub fn records(&self) -> Vec<JsonMap> {
        self.rows
            .iter()
            .map(|row| {
                self.columns
                    .iter()
                    .cloned()
                    .zip(row.iter().cloned())
                    .collect()
            })
            .collect()
    }
}
