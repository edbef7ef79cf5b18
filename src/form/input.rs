//! Live input state for one field

use crate::error::InputError;
use crate::schema::{FieldKind, FieldSpec};
use crate::values::{ReferenceItem, Value};
use rust_decimal::Decimal;

/// Input control state, one variant per widget family
#[derive(Debug, Clone, PartialEq)]
pub enum FieldInput {
    /// Free text; also used for numbers and dates
    Text {
        value: String,
        hint: Option<&'static str>,
    },
    /// Closed choice list, nothing selected initially
    Choice {
        options: Vec<&'static str>,
        selected: Option<usize>,
    },
    Toggle {
        checked: bool,
    },
    /// Searchable foreign-key choice
    Reference {
        items: Vec<ReferenceItem>,
        selected: Option<usize>,
        filter: String,
        load_error: Option<String>,
    },
}

impl FieldInput {
    pub fn for_kind(kind: &FieldKind) -> Self {
        match kind {
            FieldKind::Enum { choices } => FieldInput::Choice {
                options: choices.clone(),
                selected: None,
            },
            FieldKind::Boolean => FieldInput::Toggle { checked: false },
            FieldKind::Reference { .. } => FieldInput::Reference {
                items: Vec::new(),
                selected: None,
                filter: String::new(),
                load_error: None,
            },
            other => FieldInput::Text {
                value: String::new(),
                hint: other.format_hint(),
            },
        }
    }

    pub fn clear(&mut self) {
        match self {
            FieldInput::Text { value, .. } => value.clear(),
            FieldInput::Choice { selected, .. } => *selected = None,
            FieldInput::Toggle { checked } => *checked = false,
            FieldInput::Reference {
                selected, filter, ..
            } => {
                *selected = None;
                filter.clear();
            }
        }
    }

    /// Copy a stored value into the control. Choices match by exact text,
    /// references by identifier; no match leaves the control unselected.
    pub fn fill(&mut self, stored: &Value) {
        match self {
            FieldInput::Text { value, .. } => *value = stored.to_string(),
            FieldInput::Choice { options, selected } => {
                let text = stored.to_string();
                *selected = options.iter().position(|o| *o == text);
            }
            FieldInput::Toggle { checked } => *checked = stored.is_truthy(),
            FieldInput::Reference {
                items, selected, ..
            } => {
                *selected = if stored.is_null() {
                    None
                } else {
                    items.iter().position(|item| item.id.same_text(stored))
                };
            }
        }
    }

    /// Replace the reference items; the previous selection is dropped
    pub fn set_items(&mut self, loaded: Vec<ReferenceItem>) {
        if let FieldInput::Reference {
            items,
            selected,
            load_error,
            ..
        } = self
        {
            *items = loaded;
            *selected = None;
            *load_error = None;
        }
    }

    pub fn set_load_error(&mut self, message: String) {
        if let FieldInput::Reference {
            items,
            selected,
            load_error,
            ..
        } = self
        {
            items.clear();
            *selected = None;
            *load_error = Some(message);
        }
    }

    /// Reference items whose label contains the filter text, ignoring case
    pub fn filtered_items(&self) -> Vec<(usize, &ReferenceItem)> {
        match self {
            FieldInput::Reference { items, filter, .. } => {
                let needle = filter.trim().to_lowercase();
                items
                    .iter()
                    .enumerate()
                    .filter(|(_, item)| {
                        needle.is_empty() || item.label.to_lowercase().contains(&needle)
                    })
                    .collect()
            }
            _ => Vec::new(),
        }
    }

    /// Text shown for the current selection
    pub fn display_text(&self) -> String {
        match self {
            FieldInput::Text { value, .. } => value.clone(),
            FieldInput::Choice { options, selected } => selected
                .and_then(|i| options.get(i))
                .map(|o| o.to_string())
                .unwrap_or_default(),
            FieldInput::Toggle { checked } => checked.to_string(),
            FieldInput::Reference {
                items, selected, ..
            } => selected
                .and_then(|i| items.get(i))
                .map(|item| item.label.clone())
                .unwrap_or_default(),
        }
    }

    /// Parse the control into a bindable value. Blank text and an empty
    /// selection read as null; a toggle always has a value.
    pub fn read(&self, field: &FieldSpec) -> Result<Value, InputError> {
        let value = match self {
            FieldInput::Text { value, .. } => {
                let text = value.trim();
                if text.is_empty() {
                    Value::Null
                } else {
                    parse_text(field, text)?
                }
            }
            FieldInput::Choice { options, selected } => selected
                .and_then(|i| options.get(i))
                .map(|o| Value::Text(o.to_string()))
                .unwrap_or(Value::Null),
            FieldInput::Toggle { checked } => Value::Bool(*checked),
            FieldInput::Reference {
                items, selected, ..
            } => selected
                .and_then(|i| items.get(i))
                .map(|item| item.id.clone())
                .unwrap_or(Value::Null),
        };

        if value.is_null() && !field.nullable {
            return Err(InputError::RequiredField {
                label: field.label.to_string(),
            });
        }
        Ok(value)
    }
}

/// Dates and datetimes pass through as text for the database to judge
fn parse_text(field: &FieldSpec, text: &str) -> Result<Value, InputError> {
    let invalid = || InputError::InvalidNumber {
        label: field.label.to_string(),
        value: text.to_string(),
    };
    match field.kind {
        FieldKind::Integer => text.parse::<i64>().map(Value::Int).map_err(|_| invalid()),
        FieldKind::Decimal => text
            .parse::<Decimal>()
            .map(Value::Decimal)
            .map_err(|_| invalid()),
        _ => Ok(Value::Text(text.to_string())),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn field(kind: FieldKind, nullable: bool) -> FieldSpec {
        FieldSpec::new("col", "Column", kind, nullable)
    }

    fn teams() -> Vec<ReferenceItem> {
        vec![
            ReferenceItem::new(1i64, "1 - NDRF"),
            ReferenceItem::new(2i64, "2 - Fire and Rescue"),
        ]
    }

    #[test]
    fn text_input_carries_date_hint() {
        assert_eq!(
            FieldInput::for_kind(&FieldKind::DateTime),
            FieldInput::Text {
                value: String::new(),
                hint: Some("YYYY-MM-DD HH:MM:SS")
            }
        );
    }

    #[test]
    fn blank_text_reads_as_null_or_required() {
        let input = FieldInput::Text {
            value: "   ".to_string(),
            hint: None,
        };
        assert_eq!(input.read(&field(FieldKind::Text, true)), Ok(Value::Null));
        assert_eq!(
            input.read(&field(FieldKind::Text, false)),
            Err(InputError::RequiredField {
                label: "Column".to_string()
            })
        );
    }

    #[test]
    fn numbers_are_parsed_and_dates_pass_through() {
        let input = |v: &str| FieldInput::Text {
            value: v.to_string(),
            hint: None,
        };
        assert_eq!(
            input(" 42 ").read(&field(FieldKind::Integer, false)),
            Ok(Value::Int(42))
        );
        assert_eq!(
            input("1500.50").read(&field(FieldKind::Decimal, false)),
            Ok(Value::Decimal("1500.50".parse().unwrap()))
        );
        assert!(matches!(
            input("forty").read(&field(FieldKind::Integer, true)),
            Err(InputError::InvalidNumber { .. })
        ));
        assert_eq!(
            input("2024-13-45").read(&field(FieldKind::Date, true)),
            Ok(Value::from("2024-13-45"))
        );
    }

    #[test]
    fn choice_fill_matches_exact_text_only() {
        let mut input = FieldInput::for_kind(&FieldKind::enumeration("missing,found,identified"));
        input.fill(&Value::from("found"));
        assert_eq!(input.display_text(), "found");
        input.fill(&Value::from("Found"));
        assert_eq!(input.read(&field(FieldKind::Text, true)), Ok(Value::Null));
    }

    #[test]
    fn toggle_always_reads_a_value() {
        let mut input = FieldInput::for_kind(&FieldKind::Boolean);
        assert_eq!(input.read(&field(FieldKind::Boolean, false)), Ok(Value::Bool(false)));
        input.fill(&Value::Int(1));
        assert_eq!(input.read(&field(FieldKind::Boolean, false)), Ok(Value::Bool(true)));
    }

    #[test]
    fn reference_without_match_stays_unselected() {
        let mut input = FieldInput::for_kind(&FieldKind::reference("SELECT 1 AS id, 1 AS label"));
        input.set_items(teams());

        input.fill(&Value::Int(2));
        assert_eq!(input.display_text(), "2 - Fire and Rescue");
        assert_eq!(input.read(&field(FieldKind::Integer, false)), Ok(Value::Int(2)));

        input.fill(&Value::Int(99));
        assert_eq!(input.display_text(), "");
        assert_eq!(input.read(&field(FieldKind::Integer, true)), Ok(Value::Null));
    }

    #[test]
    fn reference_filter_ignores_case() {
        let mut input = FieldInput::for_kind(&FieldKind::reference("SELECT 1 AS id, 1 AS label"));
        input.set_items(teams());
        if let FieldInput::Reference { filter, .. } = &mut input {
            *filter = "ndrf".to_string();
        }
        let shown: Vec<_> = input.filtered_items().into_iter().map(|(i, _)| i).collect();
        assert_eq!(shown, vec![0]);
    }

    #[test]
    fn load_error_leaves_the_control_empty() {
        let mut input = FieldInput::for_kind(&FieldKind::reference("SELECT 1 AS id, 1 AS label"));
        input.set_items(teams());
        input.set_load_error("Table 'RescueTeam' doesn't exist".to_string());
        assert!(input.filtered_items().is_empty());
        assert!(matches!(
            input,
            FieldInput::Reference { load_error: Some(_), .. }
        ));
    }
}
