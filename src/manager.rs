//! Record manager: one per open table dialog
//!
//! Composes the form, the result grid and the four operations bound to a
//! table specification. Every successful write reloads the grid so the
//! operator sees persisted state rather than the in-memory edit.

use crate::database::{RecordStore, RowOrder};
use crate::error::{ClientError, InputError, Result};
use crate::form::RecordForm;
use crate::notice::Notice;
use crate::schema::TableSpec;
use crate::values::{RowSet, Value};
use tracing::{info, warn};

/// Result of a completed write
#[derive(Debug)]
pub struct ActionOutcome {
    pub rows_affected: u64,
    pub message: String,
    /// The write succeeded but reloading the grid afterwards did not
    pub reload_error: Option<ClientError>,
}

impl ActionOutcome {
    pub fn notices(&self) -> Vec<Notice> {
        let mut notices = vec![Notice::info(self.message.clone())];
        if let Some(e) = &self.reload_error {
            notices.push(Notice::failure("Load failed", e));
        }
        notices
    }
}

/// A confirmed-to-be-asked delete. Only `RecordManager::request_delete`
/// creates one, so no delete runs without a selection and a prompt.
#[derive(Debug, Clone, PartialEq)]
pub struct DeleteRequest {
    table: &'static str,
    key: Value,
    prompt: String,
}

impl DeleteRequest {
    pub fn prompt(&self) -> &str {
        &self.prompt
    }

    pub fn key(&self) -> &Value {
        &self.key
    }
}

pub struct RecordManager {
    spec: TableSpec,
    form: RecordForm,
    grid: RowSet,
    selected: Option<usize>,
}

impl RecordManager {
    /// Build the form, load reference lists and the first grid. Failures come
    /// back as notices; the manager opens regardless.
    pub async fn open(spec: TableSpec, store: &dyn RecordStore) -> (Self, Vec<Notice>) {
        let mut notices = Vec::new();
        if let Err(e) = spec.validate() {
            warn!("Invalid table specification: {}", e);
            notices.push(Notice::error(e.to_string()));
        }

        let mut manager = Self {
            form: RecordForm::build(&spec),
            spec,
            grid: RowSet::default(),
            selected: None,
        };

        notices.extend(manager.form.load_references(store).await);
        if let Err(e) = manager.refresh(store).await {
            notices.push(Notice::failure("Load failed", &e));
        }

        info!("Opened manager for {}", manager.spec.table);
        (manager, notices)
    }

    pub fn spec(&self) -> &TableSpec {
        &self.spec
    }

    pub fn form(&self) -> &RecordForm {
        &self.form
    }

    pub fn form_mut(&mut self) -> &mut RecordForm {
        &mut self.form
    }

    pub fn grid(&self) -> &RowSet {
        &self.grid
    }

    pub fn selected(&self) -> Option<usize> {
        self.selected
    }

    /// False for read-only tables: add, update and delete are inert
    pub fn can_mutate(&self) -> bool {
        !self.spec.read_only
    }

    /// Select a grid row and copy its values into the form
    pub fn select_row(&mut self, index: usize) {
        if let Some(row) = self.grid.rows.get(index) {
            self.form.fill_from_row(row);
            self.selected = Some(index);
        }
    }

    /// Reset the form and the selection; persisted data is untouched
    pub fn clear(&mut self) {
        self.form.clear();
        self.selected = None;
    }

    /// Reload the whole table, primary key descending
    pub async fn refresh(&mut self, store: &dyn RecordStore) -> Result<usize> {
        self.grid.clear();
        self.selected = None;
        self.grid = store
            .load_table(&self.spec, RowOrder::KeyDescending)
            .await
            .map_err(|e| {
                warn!("Load failed for {}: {}", self.spec.table, e);
                e
            })?;
        Ok(self.grid.len())
    }

    pub async fn insert(&mut self, store: &dyn RecordStore) -> Result<ActionOutcome> {
        self.ensure_mutable()?;
        let values = self.form.read_values(&self.spec.insertable_fields())?;
        let n = store.insert_row(&self.spec, &values).await?;
        info!("Inserted {} row(s) into {}", n, self.spec.table);
        Ok(self.finish(store, n, format!("Inserted {} row(s).", n)).await)
    }

    pub async fn update(&mut self, store: &dyn RecordStore) -> Result<ActionOutcome> {
        self.ensure_mutable()?;
        let key = self.selected_key("update")?;
        let values = self.form.read_values(&self.spec.updatable_fields())?;
        let n = store.update_row(&self.spec, &key, &values).await?;
        info!(
            "Updated {} row(s) in {} where {}={}",
            n, self.spec.table, self.spec.primary_key, key
        );
        Ok(self.finish(store, n, format!("Updated {} row(s).", n)).await)
    }

    /// First half of a delete: check the preconditions and build the
    /// confirmation prompt
    pub fn request_delete(&self) -> Result<DeleteRequest> {
        self.ensure_mutable()?;
        let key = self.selected_key("delete")?;
        let prompt = format!(
            "Delete {} where {}={} ?",
            self.spec.table, self.spec.primary_key, key
        );
        Ok(DeleteRequest {
            table: self.spec.table,
            key,
            prompt,
        })
    }

    /// Second half of a delete, once the operator has confirmed
    pub async fn delete(
        &mut self,
        store: &dyn RecordStore,
        request: DeleteRequest,
    ) -> Result<ActionOutcome> {
        self.ensure_mutable()?;
        if request.table != self.spec.table {
            return Err(InputError::NoRowSelected { action: "delete" }.into());
        }
        let n = store.delete_row(&self.spec, &request.key).await?;
        info!(
            "Deleted {} row(s) from {} where {}={}",
            n, self.spec.table, self.spec.primary_key, request.key
        );
        Ok(self.finish(store, n, format!("Deleted {} row(s).", n)).await)
    }

    fn ensure_mutable(&self) -> std::result::Result<(), InputError> {
        if self.can_mutate() {
            Ok(())
        } else {
            Err(InputError::ReadOnlyTable {
                table: self.spec.table,
            })
        }
    }

    fn selected_key(&self, action: &'static str) -> std::result::Result<Value, InputError> {
        let index = self.selected.ok_or(InputError::NoRowSelected { action })?;
        if self.grid.column_index(self.spec.primary_key).is_none() {
            return Err(InputError::MissingColumn {
                column: self.spec.primary_key,
            });
        }
        self.grid
            .cell(index, self.spec.primary_key)
            .cloned()
            .ok_or(InputError::NoRowSelected { action })
    }

    async fn finish(&mut self, store: &dyn RecordStore, n: u64, message: String) -> ActionOutcome {
        let reload_error = self.refresh(store).await.err();
        ActionOutcome {
            rows_affected: n,
            message,
            reload_error,
        }
    }
}
