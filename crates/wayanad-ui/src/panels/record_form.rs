//! Form inputs for a record manager, one row per field

use egui::{ComboBox, RichText, TextEdit, Ui};
use wayanad_dm::{FieldInput, FormField, RecordForm};

const INPUT_WIDTH: f32 = 280.0;

pub fn record_form(ui: &mut Ui, table: &str, form: &mut RecordForm) {
    egui::Grid::new(("record_form", table))
        .num_columns(2)
        .spacing([12.0, 6.0])
        .striped(false)
        .show(ui, |ui| {
            for field in form.fields_mut() {
                ui.label(field.label());
                ui.add_enabled_ui(field.enabled, |ui| field_input(ui, table, field));
                ui.end_row();
            }
        });
}

fn field_input(ui: &mut Ui, table: &str, field: &mut FormField) {
    let salt = (table.to_string(), field.spec.name);
    let nullable = field.spec.nullable;

    // computed before the input is borrowed mutably below
    let shown = field.input.display_text();
    let visible: Vec<usize> = field
        .input
        .filtered_items()
        .into_iter()
        .map(|(i, _)| i)
        .collect();

    match &mut field.input {
        FieldInput::Text { value, hint } => {
            let mut edit = TextEdit::singleline(value).desired_width(INPUT_WIDTH);
            if let Some(hint) = hint {
                edit = edit.hint_text(*hint);
            }
            ui.add(edit);
        }
        FieldInput::Choice { options, selected } => {
            ComboBox::from_id_salt(salt)
                .width(INPUT_WIDTH)
                .selected_text(shown)
                .show_ui(ui, |ui| {
                    if nullable {
                        ui.selectable_value(selected, None, "");
                    }
                    for (i, option) in options.iter().enumerate() {
                        ui.selectable_value(selected, Some(i), *option);
                    }
                });
        }
        FieldInput::Toggle { checked } => {
            ui.checkbox(checked, "");
        }
        FieldInput::Reference {
            items,
            selected,
            filter,
            load_error,
        } => {
            ui.horizontal(|ui| {
                ComboBox::from_id_salt(salt)
                    .width(INPUT_WIDTH)
                    .selected_text(shown)
                    .show_ui(ui, |ui| {
                        ui.add(
                            TextEdit::singleline(filter)
                                .hint_text("Type to filter...")
                                .desired_width(INPUT_WIDTH - 16.0),
                        );
                        ui.separator();
                        egui::ScrollArea::vertical()
                            .max_height(220.0)
                            .show(ui, |ui| {
                                if nullable {
                                    ui.selectable_value(selected, None, "");
                                }
                                for i in &visible {
                                    if let Some(item) = items.get(*i) {
                                        ui.selectable_value(
                                            selected,
                                            Some(*i),
                                            item.label.as_str(),
                                        );
                                    }
                                }
                            });
                    });
                if let Some(error) = load_error {
                    ui.label(RichText::new(error.as_str()).color(egui::Color32::RED).small());
                }
            });
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use wayanad_dm::{Entity, ReferenceItem, Row, Value};

    #[test]
    fn every_table_form_renders_headless() {
        let ctx = egui::Context::default();
        for entity in Entity::DASHBOARD {
            let spec = entity.spec();
            let mut form = RecordForm::build(&spec);
            for field in form.fields_mut() {
                field
                    .input
                    .set_items(vec![ReferenceItem::new(1i64, "1 - seeded")]);
            }
            form.fill_from_row(&Row::new().with(spec.primary_key, Value::Int(1)));

            let _ = ctx.run(egui::RawInput::default(), |ctx| {
                egui::CentralPanel::default().show(ctx, |ui| {
                    record_form(ui, spec.table, &mut form);
                });
            });
        }
    }
}
