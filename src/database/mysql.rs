//! MySQL implementation of `RecordStore`
//!
//! One connection per call, no pool and no transaction. The connection is
//! closed whether the statement succeeded or not.

use super::statements::{self, Statement};
use super::{RecordStore, RowOrder};
use crate::config::DatabaseConfig;
use crate::error::{ClientError, Result};
use crate::schema::TableSpec;
use crate::values::{ColumnValue, ReferenceItem, Row, RowSet, Value};
use async_trait::async_trait;
use sqlx::mysql::{MySqlArguments, MySqlRow};
use sqlx::{Connection, MySql, MySqlConnection, Row as _};
use tracing::{debug, info, warn};

type MySqlQuery<'q> = sqlx::query::Query<'q, MySql, MySqlArguments>;

pub struct MySqlStore {
    config: DatabaseConfig,
}

impl MySqlStore {
    pub fn new(config: DatabaseConfig) -> Self {
        info!("Using database: {}", config.masked_url());
        Self { config }
    }

    /// Open a connection and run `SELECT 1`
    pub async fn test_connection(&self) -> Result<()> {
        self.fetch_all(&Statement {
            sql: "SELECT 1".to_string(),
            params: Vec::new(),
        })
        .await
        .map(|_| ())
    }

    async fn connect(&self) -> Result<MySqlConnection> {
        MySqlConnection::connect(&self.config.database_url)
            .await
            .map_err(|e| {
                warn!("Failed to connect to database: {}", e);
                ClientError::Database(e)
            })
    }

    async fn release(conn: MySqlConnection) {
        if let Err(e) = conn.close().await {
            warn!("Failed to close database connection: {}", e);
        }
    }

    async fn fetch_all(&self, stmt: &Statement) -> Result<Vec<MySqlRow>> {
        debug!(sql = %stmt.sql, bind_count = stmt.params.len(), "executing SQL (query)");
        let mut conn = self.connect().await?;
        let result = bind_all(sqlx::query(&stmt.sql), &stmt.params)
            .fetch_all(&mut conn)
            .await;
        Self::release(conn).await;
        Ok(result?)
    }

    async fn execute(&self, stmt: &Statement) -> Result<u64> {
        debug!(sql = %stmt.sql, bind_count = stmt.params.len(), "executing SQL (non-query)");
        let mut conn = self.connect().await?;
        let result = bind_all(sqlx::query(&stmt.sql), &stmt.params)
            .execute(&mut conn)
            .await;
        Self::release(conn).await;
        let rows_affected = result?.rows_affected();
        debug!(rows_affected, "SQL rows affected");
        Ok(rows_affected)
    }

    async fn fetch_row_set(&self, spec: &TableSpec, stmt: &Statement) -> Result<RowSet> {
        let rows = self.fetch_all(stmt).await?;
        Ok(to_row_set(spec, &rows))
    }
}

#[async_trait]
impl RecordStore for MySqlStore {
    async fn load_table(&self, spec: &TableSpec, order: RowOrder) -> Result<RowSet> {
        self.fetch_row_set(spec, &statements::select_all(spec, order))
            .await
    }

    async fn search_table(&self, spec: &TableSpec, term: &str) -> Result<RowSet> {
        self.fetch_row_set(spec, &statements::search(spec, term))
            .await
    }

    async fn insert_row(&self, spec: &TableSpec, values: &[ColumnValue]) -> Result<u64> {
        self.execute(&statements::insert(spec, values)).await
    }

    async fn update_row(
        &self,
        spec: &TableSpec,
        key: &Value,
        values: &[ColumnValue],
    ) -> Result<u64> {
        self.execute(&statements::update(spec, key, values)).await
    }

    async fn delete_row(&self, spec: &TableSpec, key: &Value) -> Result<u64> {
        self.execute(&statements::delete(spec, key)).await
    }

    async fn lookup_references(&self, lookup: &str) -> Result<Vec<ReferenceItem>> {
        let rows = self
            .fetch_all(&Statement {
                sql: lookup.to_string(),
                params: Vec::new(),
            })
            .await?;
        rows.iter()
            .map(|row| {
                let id = column_value(row, "id")?;
                let label = column_value(row, "label")?;
                Ok(ReferenceItem::new(id, label.to_string()))
            })
            .collect()
    }

    async fn count_rows(&self, spec: &TableSpec) -> Result<i64> {
        let rows = self.fetch_all(&statements::count(spec)).await?;
        match rows.first() {
            Some(row) => Ok(row.try_get::<i64, _>(0)?),
            None => Ok(0),
        }
    }
}

fn bind_all<'q>(mut query: MySqlQuery<'q>, values: &[Value]) -> MySqlQuery<'q> {
    for value in values {
        query = bind_value(query, value);
    }
    query
}

fn bind_value<'q>(query: MySqlQuery<'q>, value: &Value) -> MySqlQuery<'q> {
    match value {
        Value::Null => query.bind(Option::<String>::None),
        Value::Bool(b) => query.bind(*b),
        Value::Int(n) => query.bind(*n),
        Value::UInt(n) => query.bind(*n),
        Value::Float(n) => query.bind(*n),
        Value::Decimal(d) => query.bind(*d),
        Value::Text(s) => query.bind(s.clone()),
        Value::Date(d) => query.bind(*d),
        Value::DateTime(dt) => query.bind(*dt),
        Value::Time(t) => query.bind(*t),
        Value::Bytes(b) => query.bind(b.clone()),
    }
}

fn column_value(row: &MySqlRow, name: &str) -> Result<Value> {
    use sqlx::Column;

    let index = row
        .columns()
        .iter()
        .position(|c| c.name().eq_ignore_ascii_case(name))
        .ok_or_else(|| ClientError::Store(format!("lookup result has no '{}' column", name)))?;
    Ok(decode_cell(row, index))
}

fn to_row_set(spec: &TableSpec, rows: &[MySqlRow]) -> RowSet {
    use sqlx::Column;

    let columns: Vec<String> = match rows.first() {
        Some(first) => first.columns().iter().map(|c| c.name().to_string()).collect(),
        None => spec.column_names().map(str::to_string).collect(),
    };

    let rows = rows
        .iter()
        .map(|row| {
            let mut out = Row::new();
            for (index, name) in columns.iter().enumerate() {
                out.push(name.clone(), decode_cell(row, index));
            }
            out
        })
        .collect();

    RowSet::new(columns, rows)
}

/// Decode one cell by its MySQL column type; undecodable cells become null
fn decode_cell(row: &MySqlRow, index: usize) -> Value {
    use sqlx::{Column, TypeInfo};

    let type_name = row.columns()[index].type_info().name();

    let value: Option<Value> = match type_name {
        "BOOLEAN" => row
            .try_get::<Option<bool>, _>(index)
            .ok()
            .flatten()
            .map(Value::Bool),
        "TINYINT" | "SMALLINT" | "INT" | "MEDIUMINT" | "BIGINT" => row
            .try_get::<Option<i64>, _>(index)
            .ok()
            .flatten()
            .map(Value::Int),
        t if t.ends_with("UNSIGNED") => row
            .try_get::<Option<u64>, _>(index)
            .ok()
            .flatten()
            .map(Value::UInt),
        "DECIMAL" => row
            .try_get::<Option<rust_decimal::Decimal>, _>(index)
            .ok()
            .flatten()
            .map(Value::Decimal),
        "FLOAT" => row
            .try_get::<Option<f32>, _>(index)
            .ok()
            .flatten()
            .map(|n| Value::Float(f64::from(n))),
        "DOUBLE" => row
            .try_get::<Option<f64>, _>(index)
            .ok()
            .flatten()
            .map(Value::Float),
        "DATE" => row
            .try_get::<Option<chrono::NaiveDate>, _>(index)
            .ok()
            .flatten()
            .map(Value::Date),
        "DATETIME" | "TIMESTAMP" => row
            .try_get::<Option<chrono::NaiveDateTime>, _>(index)
            .ok()
            .flatten()
            .map(Value::DateTime),
        "TIME" => row
            .try_get::<Option<chrono::NaiveTime>, _>(index)
            .ok()
            .flatten()
            .map(Value::Time),
        _ => row
            .try_get::<Option<String>, _>(index)
            .ok()
            .flatten()
            .map(Value::Text)
            .or_else(|| {
                row.try_get::<Option<Vec<u8>>, _>(index)
                    .ok()
                    .flatten()
                    .map(Value::Bytes)
            }),
    };

    value.unwrap_or(Value::Null)
}
