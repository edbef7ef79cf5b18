//! SQL text for the generic record operations (MySQL dialect)
//!
//! Identifiers are taken from a `TableSpec` and backtick-quoted; values are
//! always bound through `?` placeholders, never interpolated.

use super::RowOrder;
use crate::schema::TableSpec;
use crate::values::{ColumnValue, Value};

/// Statement text plus the values bound to its placeholders, in order
#[derive(Debug, Clone, PartialEq)]
pub struct Statement {
    pub sql: String,
    pub params: Vec<Value>,
}

impl Statement {
    fn new(sql: String, params: Vec<Value>) -> Self {
        Self { sql, params }
    }
}

/// Quote an identifier, doubling embedded backticks
pub fn quote_ident(name: &str) -> String {
    format!("`{}`", name.replace('`', "``"))
}

/// Escape `\`, `%` and `_` so `term` matches literally inside a LIKE pattern
pub fn escape_like(term: &str) -> String {
    let mut escaped = String::with_capacity(term.len());
    for c in term.chars() {
        if matches!(c, '\\' | '%' | '_') {
            escaped.push('\\');
        }
        escaped.push(c);
    }
    escaped
}

/// Contains-pattern bound to the search placeholder
pub fn contains_pattern(term: &str) -> String {
    format!("%{}%", escape_like(term))
}

pub fn select_all(spec: &TableSpec, order: RowOrder) -> Statement {
    let mut sql = format!("SELECT * FROM {}", quote_ident(spec.table));
    if order == RowOrder::KeyDescending {
        sql.push_str(&format!(" ORDER BY {} DESC", quote_ident(spec.primary_key)));
    }
    Statement::new(sql, Vec::new())
}

/// Case-insensitive substring search over every column, joined with `|`.
/// `CONCAT_WS` skips NULL columns instead of nulling the whole row.
pub fn search(spec: &TableSpec, term: &str) -> Statement {
    let columns: Vec<String> = spec.column_names().map(quote_ident).collect();
    let sql = format!(
        "SELECT * FROM {} WHERE LOWER(CONCAT_WS('|', {})) LIKE LOWER(?)",
        quote_ident(spec.table),
        columns.join(", ")
    );
    Statement::new(sql, vec![Value::Text(contains_pattern(term))])
}

pub fn insert(spec: &TableSpec, values: &[ColumnValue]) -> Statement {
    let columns: Vec<String> = values.iter().map(|cv| quote_ident(cv.column)).collect();
    let placeholders = vec!["?"; values.len()].join(", ");
    let sql = format!(
        "INSERT INTO {} ({}) VALUES ({})",
        quote_ident(spec.table),
        columns.join(", "),
        placeholders
    );
    Statement::new(sql, values.iter().map(|cv| cv.value.clone()).collect())
}

pub fn update(spec: &TableSpec, key: &Value, values: &[ColumnValue]) -> Statement {
    let sets: Vec<String> = values
        .iter()
        .map(|cv| format!("{} = ?", quote_ident(cv.column)))
        .collect();
    let sql = format!(
        "UPDATE {} SET {} WHERE {} = ?",
        quote_ident(spec.table),
        sets.join(", "),
        quote_ident(spec.primary_key)
    );
    let mut params: Vec<Value> = values.iter().map(|cv| cv.value.clone()).collect();
    params.push(key.clone());
    Statement::new(sql, params)
}

pub fn delete(spec: &TableSpec, key: &Value) -> Statement {
    let sql = format!(
        "DELETE FROM {} WHERE {} = ?",
        quote_ident(spec.table),
        quote_ident(spec.primary_key)
    );
    Statement::new(sql, vec![key.clone()])
}

pub fn count(spec: &TableSpec) -> Statement {
    Statement::new(
        format!("SELECT COUNT(*) FROM {}", quote_ident(spec.table)),
        Vec::new(),
    )
}
