//! Result grid shared by the viewer and the manager windows

use egui::Ui;
use egui_extras::{Column, TableBuilder};
use wayanad_dm::RowSet;

const ROW_HEIGHT: f32 = 20.0;

/// Draw `rows` as a striped table. Returns the index of a clicked row.
pub fn record_grid(
    ui: &mut Ui,
    id: impl std::hash::Hash,
    rows: &RowSet,
    selected: Option<usize>,
) -> Option<usize> {
    let mut clicked = None;

    if rows.columns.is_empty() {
        ui.weak("No rows loaded");
        return None;
    }

    ui.push_id(id, |ui| {
        egui::ScrollArea::horizontal().show(ui, |ui| {
            TableBuilder::new(ui)
                .striped(true)
                .resizable(true)
                .sense(egui::Sense::click())
                .cell_layout(egui::Layout::left_to_right(egui::Align::Center))
                .columns(Column::auto().at_least(80.0).clip(true), rows.columns.len())
                .header(ROW_HEIGHT, |mut header| {
                    for column in &rows.columns {
                        header.col(|ui| {
                            ui.strong(column);
                        });
                    }
                })
                .body(|body| {
                    body.rows(ROW_HEIGHT, rows.len(), |mut row| {
                        let index = row.index();
                        row.set_selected(selected == Some(index));
                        for column in &rows.columns {
                            row.col(|ui| {
                                let text = rows
                                    .cell(index, column)
                                    .map(|v| v.to_string())
                                    .unwrap_or_default();
                                ui.add(egui::Label::new(text).selectable(false));
                            });
                        }
                        if row.response().clicked() {
                            clicked = Some(index);
                        }
                    });
                });
        });
    });

    clicked
}
