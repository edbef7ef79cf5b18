//! Table viewer screen

use super::record_grid;
use egui::{ComboBox, TextEdit, Ui};
use wayanad_dm::{Entity, TableViewer};

#[derive(Default)]
pub struct ViewerAction {
    pub load: bool,
    pub search: bool,
    /// Add, Update or Delete pressed: open the manager for this table
    pub open_manager: Option<Entity>,
    pub home: bool,
}

pub fn viewer_panel(ui: &mut Ui, viewer: &mut TableViewer) -> ViewerAction {
    let mut action = ViewerAction::default();

    ui.horizontal(|ui| {
        ui.label("Table:");
        ComboBox::from_id_salt("viewer_table")
            .width(200.0)
            .selected_text(viewer.entity.table_name())
            .show_ui(ui, |ui| {
                for entity in Entity::VIEWER {
                    ui.selectable_value(&mut viewer.entity, entity, entity.table_name());
                }
            });
        if ui.button("Load").clicked() {
            action.load = true;
        }

        ui.separator();

        let response = ui.add(
            TextEdit::singleline(&mut viewer.search_term)
                .hint_text("Search all columns")
                .desired_width(220.0),
        );
        let submitted = response.lost_focus() && ui.input(|i| i.key_pressed(egui::Key::Enter));
        if ui.button("Search").clicked() || submitted {
            action.search = true;
        }
    });

    ui.horizontal(|ui| {
        for label in ["Add", "Update", "Delete"] {
            if ui.button(label).clicked() {
                action.open_manager = Some(viewer.entity);
            }
        }
        ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
            if ui.button("Home").clicked() {
                action.home = true;
            }
        });
    });

    ui.separator();
    record_grid(ui, "viewer_grid", viewer.grid(), None);

    action
}
