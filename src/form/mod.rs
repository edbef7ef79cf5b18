//! Generic form model
//!
//! One input per field, in specification order, indexed by column name. The
//! form is owned by its record manager and dropped with it.

mod input;

pub use input::FieldInput;

use crate::database::RecordStore;
use crate::error::InputError;
use crate::notice::Notice;
use crate::schema::{FieldKind, FieldSpec, TableSpec};
use crate::values::{ColumnValue, Row};
use std::collections::HashMap;
use tracing::warn;

/// A field's specification together with its live input
#[derive(Debug, Clone, PartialEq)]
pub struct FormField {
    pub spec: FieldSpec,
    pub input: FieldInput,
    pub enabled: bool,
}

impl FormField {
    pub fn label(&self) -> String {
        self.spec.form_label()
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct RecordForm {
    fields: Vec<FormField>,
    index: HashMap<&'static str, usize>,
}

impl RecordForm {
    pub fn build(spec: &TableSpec) -> Self {
        let fields: Vec<FormField> = spec
            .fields
            .iter()
            .map(|field| FormField {
                spec: field.clone(),
                input: FieldInput::for_kind(&field.kind),
                enabled: spec.is_editable(field),
            })
            .collect();
        let index = fields
            .iter()
            .enumerate()
            .map(|(i, f)| (f.spec.name, i))
            .collect();
        Self { fields, index }
    }

    pub fn fields(&self) -> &[FormField] {
        &self.fields
    }

    pub fn fields_mut(&mut self) -> &mut [FormField] {
        &mut self.fields
    }

    pub fn field(&self, name: &str) -> Option<&FormField> {
        self.index.get(name).map(|&i| &self.fields[i])
    }

    pub fn field_mut(&mut self, name: &str) -> Option<&mut FormField> {
        match self.index.get(name) {
            Some(&i) => self.fields.get_mut(i),
            None => None,
        }
    }

    /// Copy a grid row into the inputs; columns absent from the row are skipped
    pub fn fill_from_row(&mut self, row: &Row) {
        for field in &mut self.fields {
            if let Some(value) = row.get(field.spec.name) {
                field.input.fill(value);
            }
        }
    }

    pub fn clear(&mut self) {
        for field in &mut self.fields {
            field.input.clear();
        }
    }

    /// Read the given fields in order. The first blank required field or
    /// malformed number stops the read.
    pub fn read_values(&self, fields: &[&FieldSpec]) -> Result<Vec<ColumnValue>, InputError> {
        fields
            .iter()
            .map(|spec| {
                let value = match self.field(spec.name) {
                    Some(field) => field.input.read(spec)?,
                    None => FieldInput::for_kind(&spec.kind).read(spec)?,
                };
                Ok(ColumnValue::new(spec.name, value))
            })
            .collect()
    }

    /// Populate every reference input from its lookup query. A failed lookup
    /// leaves that input empty and comes back as a notice.
    pub async fn load_references(&mut self, store: &dyn RecordStore) -> Vec<Notice> {
        let mut notices = Vec::new();
        for field in &mut self.fields {
            let FieldKind::Reference { lookup } = field.spec.kind else {
                continue;
            };
            match store.lookup_references(lookup).await {
                Ok(items) => field.input.set_items(items),
                Err(e) => {
                    warn!("FK load failed for {}: {}", field.spec.name, e);
                    field.input.set_load_error(e.to_string());
                    notices.push(Notice::error(format!("FK load failed: {}", e)));
                }
            }
        }
        notices
    }
}
