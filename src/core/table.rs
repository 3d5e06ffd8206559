use serde::{Deserialize, Serialize};

use crate::core::value::Row;

/// Tabular preview of a dataset: the column list and its leading rows.
///
/// Independent of the selection and of any series; `total_rows` reports how
/// many rows the dataset had before truncation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TableView {
    pub columns: Vec<String>,
    pub rows: Vec<Row>,
    pub total_rows: usize,
}

impl TableView {
    #[must_use]
    pub fn is_truncated(&self) -> bool {
        self.rows.len() < self.total_rows
    }
}

#[must_use]
pub fn build_table(columns: &[String], rows: &[Row], row_cap: usize) -> TableView {
    TableView {
        columns: columns.to_vec(),
        rows: rows.iter().take(row_cap).cloned().collect(),
        total_rows: rows.len(),
    }
}
