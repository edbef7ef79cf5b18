//! In-memory `RecordStore` for integration tests
//!
//! Rows live in a mutex-guarded map keyed by table name. Generated keys count
//! up from 1 per table. Every call is counted so tests can assert that a
//! rejected action never reached the store.

#![allow(dead_code)]

use async_trait::async_trait;
use std::collections::{HashMap, HashSet};
use std::sync::Mutex;
use wayanad_dm::{
    ClientError, ColumnValue, RecordStore, ReferenceItem, Result, Row, RowOrder, RowSet,
    TableSpec, Value,
};

#[derive(Default)]
struct State {
    tables: HashMap<String, Vec<Row>>,
    next_key: HashMap<String, i64>,
    references: HashMap<String, Vec<ReferenceItem>>,
    failing_loads: HashSet<String>,
    failing_lookups: bool,
    reads: usize,
    writes: usize,
}

#[derive(Default)]
pub struct MemoryStore {
    state: Mutex<State>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a row directly, bypassing the counters
    pub fn seed(&self, spec: &TableSpec, row: Row) {
        let mut state = self.state.lock().unwrap();
        let row = normalise(spec, row);
        if let Some(Value::Int(key)) = row.get(spec.primary_key) {
            let next = state.next_key.entry(spec.table.to_string()).or_insert(1);
            *next = (*next).max(key + 1);
        }
        state
            .tables
            .entry(spec.table.to_string())
            .or_default()
            .push(row);
    }

    /// Result rows for a lookup query
    pub fn with_references(&self, lookup: &str, items: Vec<ReferenceItem>) {
        self.state
            .lock()
            .unwrap()
            .references
            .insert(lookup.to_string(), items);
    }

    pub fn fail_loads(&self, table: &str) {
        self.state
            .lock()
            .unwrap()
            .failing_loads
            .insert(table.to_string());
    }

    pub fn fail_lookups(&self) {
        self.state.lock().unwrap().failing_lookups = true;
    }

    pub fn rows(&self, table: &str) -> Vec<Row> {
        self.state
            .lock()
            .unwrap()
            .tables
            .get(table)
            .cloned()
            .unwrap_or_default()
    }

    pub fn reads(&self) -> usize {
        self.state.lock().unwrap().reads
    }

    pub fn writes(&self) -> usize {
        self.state.lock().unwrap().writes
    }
}

/// Every specification column present, in specification order
fn normalise(spec: &TableSpec, row: Row) -> Row {
    let mut out = Row::new();
    for column in spec.column_names() {
        out.push(column, row.get(column).cloned().unwrap_or(Value::Null));
    }
    out
}

fn row_set(spec: &TableSpec, rows: Vec<Row>) -> RowSet {
    RowSet::new(spec.column_names().map(str::to_string).collect(), rows)
}

fn key_of(row: &Row, spec: &TableSpec) -> i64 {
    match row.get(spec.primary_key) {
        Some(Value::Int(n)) => *n,
        Some(other) => other.to_string().parse().unwrap_or(0),
        None => 0,
    }
}

/// `CONCAT_WS('|', ...)` semantics: null columns are skipped
fn concatenated(row: &Row) -> String {
    row.values()
        .filter(|v| !v.is_null())
        .map(|v| v.to_string())
        .collect::<Vec<_>>()
        .join("|")
}

#[async_trait]
impl RecordStore for MemoryStore {
    async fn load_table(&self, spec: &TableSpec, order: RowOrder) -> Result<RowSet> {
        let mut state = self.state.lock().unwrap();
        state.reads += 1;
        if state.failing_loads.contains(spec.table) {
            return Err(ClientError::Store(format!(
                "Table 'wayanad_disaster.{}' doesn't exist",
                spec.table
            )));
        }
        let mut rows = state.tables.get(spec.table).cloned().unwrap_or_default();
        if order == RowOrder::KeyDescending {
            rows.sort_by_key(|r| std::cmp::Reverse(key_of(r, spec)));
        }
        Ok(row_set(spec, rows))
    }

    async fn search_table(&self, spec: &TableSpec, term: &str) -> Result<RowSet> {
        let mut state = self.state.lock().unwrap();
        state.reads += 1;
        let needle = term.to_lowercase();
        let rows = state
            .tables
            .get(spec.table)
            .map(|rows| {
                rows.iter()
                    .filter(|r| concatenated(r).to_lowercase().contains(&needle))
                    .cloned()
                    .collect()
            })
            .unwrap_or_default();
        Ok(row_set(spec, rows))
    }

    async fn insert_row(&self, spec: &TableSpec, values: &[ColumnValue]) -> Result<u64> {
        let mut state = self.state.lock().unwrap();
        state.writes += 1;

        let mut row = Row::new();
        for cv in values {
            row.push(cv.column, cv.value.clone());
        }
        if spec.key_generated {
            let next = state.next_key.entry(spec.table.to_string()).or_insert(1);
            row.push(spec.primary_key, *next);
            *next += 1;
        }
        let row = normalise(spec, row);

        let key = row.get(spec.primary_key).cloned().unwrap_or(Value::Null);
        let table = state.tables.entry(spec.table.to_string()).or_default();
        if table
            .iter()
            .any(|r| r.get(spec.primary_key).is_some_and(|k| k.same_text(&key)))
        {
            return Err(ClientError::Store(format!(
                "Duplicate entry '{}' for key 'PRIMARY'",
                key
            )));
        }
        table.push(row);
        Ok(1)
    }

    async fn update_row(
        &self,
        spec: &TableSpec,
        key: &Value,
        values: &[ColumnValue],
    ) -> Result<u64> {
        let mut state = self.state.lock().unwrap();
        state.writes += 1;
        let mut n = 0;
        if let Some(rows) = state.tables.get_mut(spec.table) {
            for row in rows
                .iter_mut()
                .filter(|r| r.get(spec.primary_key).is_some_and(|k| k.same_text(key)))
            {
                for cv in values {
                    row.push(cv.column, cv.value.clone());
                }
                n += 1;
            }
        }
        Ok(n)
    }

    async fn delete_row(&self, spec: &TableSpec, key: &Value) -> Result<u64> {
        let mut state = self.state.lock().unwrap();
        state.writes += 1;
        let Some(rows) = state.tables.get_mut(spec.table) else {
            return Ok(0);
        };
        let before = rows.len();
        rows.retain(|r| !r.get(spec.primary_key).is_some_and(|k| k.same_text(key)));
        Ok((before - rows.len()) as u64)
    }

    async fn lookup_references(&self, lookup: &str) -> Result<Vec<ReferenceItem>> {
        let mut state = self.state.lock().unwrap();
        state.reads += 1;
        if state.failing_lookups {
            return Err(ClientError::Store(
                "Communications link failure".to_string(),
            ));
        }
        Ok(state.references.get(lookup).cloned().unwrap_or_default())
    }

    async fn count_rows(&self, spec: &TableSpec) -> Result<i64> {
        let mut state = self.state.lock().unwrap();
        state.reads += 1;
        if state.failing_loads.contains(spec.table) {
            return Err(ClientError::Store("count failed".to_string()));
        }
        Ok(state.tables.get(spec.table).map_or(0, |rows| rows.len() as i64))
    }
}
