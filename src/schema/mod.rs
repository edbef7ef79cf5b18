//! Table and field specifications
//!
//! One `TableSpec` per entity drives the whole client: the form inputs, the
//! grid, and the SQL built for insert, update and delete. Specifications are
//! hand-authored static data and immutable once built.

mod registry;

pub use registry::{spec_by_name, Entity};

/// Input kind of a field, with the payload each kind needs
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FieldKind {
    Text,
    Integer,
    Decimal,
    Date,
    DateTime,
    /// Closed choice list
    Enum { choices: Vec<&'static str> },
    Boolean,
    /// Foreign key; the lookup query projects an `id` and a `label` column
    Reference { lookup: &'static str },
}

impl FieldKind {
    /// Enum kind from a comma-separated choice list
    pub fn enumeration(csv: &'static str) -> Self {
        FieldKind::Enum {
            choices: csv
                .split(',')
                .map(str::trim)
                .filter(|c| !c.is_empty())
                .collect(),
        }
    }

    pub fn reference(lookup: &'static str) -> Self {
        FieldKind::Reference { lookup }
    }

    /// Format hint shown next to free-text date inputs
    pub fn format_hint(&self) -> Option<&'static str> {
        match self {
            FieldKind::Date => Some("YYYY-MM-DD"),
            FieldKind::DateTime => Some("YYYY-MM-DD HH:MM:SS"),
            _ => None,
        }
    }
}

/// Metadata for one column
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldSpec {
    pub name: &'static str,
    pub label: &'static str,
    pub kind: FieldKind,
    pub nullable: bool,
    pub read_only: bool,
}

impl FieldSpec {
    pub fn new(name: &'static str, label: &'static str, kind: FieldKind, nullable: bool) -> Self {
        Self {
            name,
            label,
            kind,
            nullable,
            read_only: false,
        }
    }

    pub fn required(name: &'static str, label: &'static str, kind: FieldKind) -> Self {
        Self::new(name, label, kind, false)
    }

    pub fn optional(name: &'static str, label: &'static str, kind: FieldKind) -> Self {
        Self::new(name, label, kind, true)
    }

    /// Mark the field as display-only
    pub fn read_only(mut self) -> Self {
        self.read_only = true;
        self
    }

    /// Form label, with the optional marker for nullable fields
    pub fn form_label(&self) -> String {
        if self.nullable {
            format!("{} (opt)", self.label)
        } else {
            self.label.to_string()
        }
    }
}

/// Metadata for one table
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TableSpec {
    pub table: &'static str,
    pub primary_key: &'static str,
    /// Primary key is generated by the database (auto-increment)
    pub key_generated: bool,
    pub read_only: bool,
    pub fields: Vec<FieldSpec>,
}

impl TableSpec {
    pub fn new(table: &'static str, primary_key: &'static str, key_generated: bool) -> Self {
        Self {
            table,
            primary_key,
            key_generated,
            read_only: false,
            fields: Vec::new(),
        }
    }

    pub fn field(mut self, field: FieldSpec) -> Self {
        self.fields.push(field);
        self
    }

    pub fn read_only(mut self, read_only: bool) -> Self {
        self.read_only = read_only;
        self
    }

    pub fn get_field(&self, name: &str) -> Option<&FieldSpec> {
        self.fields.iter().find(|f| f.name == name)
    }

    pub fn column_names(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.fields.iter().map(|f| f.name)
    }

    /// Whether the input for `field` accepts edits
    pub fn is_editable(&self, field: &FieldSpec) -> bool {
        !field.read_only && !self.read_only
    }

    /// Fields bound by INSERT: everything writable except a generated key
    pub fn insertable_fields(&self) -> Vec<&FieldSpec> {
        self.fields
            .iter()
            .filter(|f| !f.read_only)
            .filter(|f| !(f.name == self.primary_key && self.key_generated))
            .collect()
    }

    /// Fields bound by UPDATE: everything writable except the key
    pub fn updatable_fields(&self) -> Vec<&FieldSpec> {
        self.fields
            .iter()
            .filter(|f| !f.read_only && f.name != self.primary_key)
            .collect()
    }

    /// Check the structural invariants of a hand-authored specification
    pub fn validate(&self) -> Result<(), SpecError> {
        let key_count = self
            .fields
            .iter()
            .filter(|f| f.name == self.primary_key)
            .count();
        if key_count != 1 {
            return Err(SpecError::PrimaryKey {
                table: self.table,
                count: key_count,
            });
        }

        for field in &self.fields {
            match &field.kind {
                FieldKind::Enum { choices } if choices.is_empty() => {
                    return Err(SpecError::EmptyChoices {
                        table: self.table,
                        field: field.name,
                    });
                }
                FieldKind::Reference { lookup } => {
                    let lowered = lookup.to_ascii_lowercase();
                    if !lowered.contains(" as id") || !lowered.contains(" as label") {
                        return Err(SpecError::LookupProjection {
                            table: self.table,
                            field: field.name,
                        });
                    }
                }
                _ => {}
            }
        }

        Ok(())
    }
}

/// Violations of the specification invariants
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum SpecError {
    #[error("{table}: primary key must appear exactly once in the field list, found {count}")]
    PrimaryKey { table: &'static str, count: usize },

    #[error("{table}.{field}: enum field has no choices")]
    EmptyChoices {
        table: &'static str,
        field: &'static str,
    },

    #[error("{table}.{field}: lookup query must project 'id' and 'label'")]
    LookupProjection {
        table: &'static str,
        field: &'static str,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    fn camp() -> TableSpec {
        TableSpec::new("Camp", "camp_id", true)
            .field(FieldSpec::optional("camp_id", "Camp ID (auto)", FieldKind::Integer).read_only())
            .field(FieldSpec::required("name", "Name", FieldKind::Text))
            .field(FieldSpec::optional("capacity", "Capacity", FieldKind::Integer))
            .field(
                FieldSpec::optional("current_occupancy", "Current Occupancy", FieldKind::Integer)
                    .read_only(),
            )
    }

    #[test]
    fn enumeration_trims_choices() {
        assert_eq!(
            FieldKind::enumeration("missing , found,identified"),
            FieldKind::Enum {
                choices: vec!["missing", "found", "identified"]
            }
        );
    }

    #[test]
    fn generated_key_and_read_only_fields_are_not_written() {
        let spec = camp();
        let insert: Vec<_> = spec.insertable_fields().iter().map(|f| f.name).collect();
        let update: Vec<_> = spec.updatable_fields().iter().map(|f| f.name).collect();
        assert_eq!(insert, vec!["name", "capacity"]);
        assert_eq!(update, vec!["name", "capacity"]);
    }

    #[test]
    fn manual_key_is_inserted_but_never_updated() {
        let spec = TableSpec::new("Person", "person_id", false)
            .field(FieldSpec::required("person_id", "Person ID", FieldKind::Integer))
            .field(FieldSpec::required("name", "Name", FieldKind::Text));
        let insert: Vec<_> = spec.insertable_fields().iter().map(|f| f.name).collect();
        let update: Vec<_> = spec.updatable_fields().iter().map(|f| f.name).collect();
        assert_eq!(insert, vec!["person_id", "name"]);
        assert_eq!(update, vec!["name"]);
    }

    #[test]
    fn validate_rejects_missing_or_duplicate_key() {
        let missing = TableSpec::new("Supply", "supply_id", true)
            .field(FieldSpec::required("name", "Name", FieldKind::Text));
        assert_eq!(
            missing.validate(),
            Err(SpecError::PrimaryKey {
                table: "Supply",
                count: 0
            })
        );

        let duplicated = camp().field(FieldSpec::optional("camp_id", "Again", FieldKind::Integer));
        assert!(matches!(
            duplicated.validate(),
            Err(SpecError::PrimaryKey { count: 2, .. })
        ));
    }

    #[test]
    fn validate_rejects_bad_enum_and_lookup() {
        let spec = camp().field(FieldSpec::optional("kind", "Kind", FieldKind::enumeration(" , ")));
        assert!(matches!(spec.validate(), Err(SpecError::EmptyChoices { .. })));

        let spec = camp().field(FieldSpec::required(
            "team_id",
            "Team",
            FieldKind::reference("SELECT team_id FROM RescueTeam"),
        ));
        assert!(matches!(
            spec.validate(),
            Err(SpecError::LookupProjection { .. })
        ));
    }

    #[test]
    fn form_label_marks_optional_fields() {
        let spec = camp();
        assert_eq!(spec.fields[1].form_label(), "Name");
        assert_eq!(spec.fields[2].form_label(), "Capacity (opt)");
    }

    #[test]
    fn read_only_table_disables_every_input() {
        let spec = camp().read_only(true);
        assert!(spec.fields.iter().all(|f| !spec.is_editable(f)));
        let spec = camp();
        assert!(spec.is_editable(&spec.fields[1]));
        assert!(!spec.is_editable(&spec.fields[0]));
    }
}
