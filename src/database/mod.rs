//! Database access
//!
//! `RecordStore` is the seam between the record engine and the storage
//! backend. Every table-addressed call takes a `&TableSpec`, so table and
//! column names only ever come from the specification registry. Each call is
//! one auto-committed statement.

use crate::error::Result;
use crate::schema::TableSpec;
use crate::values::{ColumnValue, ReferenceItem, RowSet, Value};
use async_trait::async_trait;

pub mod statements;

#[cfg(feature = "database")]
mod mysql;

#[cfg(feature = "database")]
pub use mysql::MySqlStore;

pub use statements::Statement;

/// Row order for a whole-table load
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum RowOrder {
    /// Storage order, as the table viewer shows it
    #[default]
    Natural,
    /// Primary key descending, as a record manager shows it
    KeyDescending,
}

/// Storage operations used by the managers, the viewer and the statistics screen
#[async_trait]
pub trait RecordStore: Send + Sync {
    /// Every row of a table
    async fn load_table(&self, spec: &TableSpec, order: RowOrder) -> Result<RowSet>;

    /// Rows whose concatenated column text contains `term`, ignoring case
    async fn search_table(&self, spec: &TableSpec, term: &str) -> Result<RowSet>;

    /// Insert one row, returning the affected row count
    async fn insert_row(&self, spec: &TableSpec, values: &[ColumnValue]) -> Result<u64>;

    /// Update the row keyed by `key`, returning the affected row count
    async fn update_row(&self, spec: &TableSpec, key: &Value, values: &[ColumnValue])
        -> Result<u64>;

    /// Delete the row keyed by `key`, returning the affected row count
    async fn delete_row(&self, spec: &TableSpec, key: &Value) -> Result<u64>;

    /// Run a foreign-key lookup projecting `id` and `label`
    async fn lookup_references(&self, lookup: &str) -> Result<Vec<ReferenceItem>>;

    async fn count_rows(&self, spec: &TableSpec) -> Result<i64>;
}
