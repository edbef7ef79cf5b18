//! Record manager window
//!
//! One window per opened table. Selection and Clear are handled here; the
//! actions that reach the database are returned to the app.

use crate::panels::{record_form, record_grid};
use egui::{Color32, RichText};
use wayanad_dm::{Entity, RecordManager};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ManagerAction {
    None,
    Insert,
    Update,
    Delete,
    Refresh,
}

pub struct ManagerWindow {
    pub entity: Entity,
    pub manager: RecordManager,
    open: bool,
}

impl ManagerWindow {
    pub fn new(entity: Entity, manager: RecordManager) -> Self {
        Self {
            entity,
            manager,
            open: true,
        }
    }

    pub fn is_open(&self) -> bool {
        self.open
    }

    pub fn show(&mut self) {
        self.open = true;
    }

    /// Draw the window; with `interactive` off the contents are shown but inert
    pub fn ui(&mut self, ctx: &egui::Context, interactive: bool) -> ManagerAction {
        if !self.open {
            return ManagerAction::None;
        }

        let mut action = ManagerAction::None;
        let mut open = self.open;
        let table = self.manager.spec().table;
        let can_mutate = self.manager.can_mutate();

        egui::Window::new(format!("Manage {}", table))
            .id(egui::Id::new(("manager", table)))
            .open(&mut open)
            .collapsible(true)
            .resizable(true)
            .default_width(900.0)
            .default_height(620.0)
            .show(ctx, |ui| {
                if !interactive {
                    ui.disable();
                }
                if !can_mutate {
                    ui.label(
                        RichText::new("Read-only: rows are written by database triggers")
                            .color(Color32::from_rgb(251, 191, 36)),
                    );
                }

                egui::ScrollArea::vertical()
                    .id_salt(("manager_form", table))
                    .max_height(280.0)
                    .show(ui, |ui| {
                        record_form(ui, table, self.manager.form_mut());
                    });

                ui.separator();
                ui.horizontal(|ui| {
                    ui.add_enabled_ui(can_mutate, |ui| {
                        if ui.button("Add").clicked() {
                            action = ManagerAction::Insert;
                        }
                        if ui.button("Update").clicked() {
                            action = ManagerAction::Update;
                        }
                        if ui.button("Delete").clicked() {
                            action = ManagerAction::Delete;
                        }
                    });
                    if ui.button("Clear").clicked() {
                        self.manager.clear();
                    }
                    if ui.button("Refresh").clicked() {
                        action = ManagerAction::Refresh;
                    }
                    ui.label(
                        RichText::new(format!("{} rows", self.manager.grid().len())).weak(),
                    );
                });
                ui.separator();

                let clicked = record_grid(
                    ui,
                    ("manager_grid", table),
                    self.manager.grid(),
                    self.manager.selected(),
                );
                if let Some(index) = clicked {
                    self.manager.select_row(index);
                }
            });

        self.open = open;
        action
    }
}
