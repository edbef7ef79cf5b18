//! Main dashboard: navigation buttons and one manager button per table

use egui::{RichText, Ui};
use wayanad_dm::Entity;

const COLUMNS: usize = 3;

/// Actions that can be triggered from the dashboard
#[derive(Default)]
pub struct DashboardAction {
    pub open_viewer: bool,
    pub open_statistics: bool,
    pub open_about: bool,
    /// Dashboard label of the manager to open
    pub open_manager: Option<String>,
}

pub fn dashboard(ui: &mut Ui) -> DashboardAction {
    let mut action = DashboardAction::default();

    ui.vertical_centered(|ui| {
        ui.add_space(12.0);
        ui.heading(RichText::new("Wayanad Disaster Management System").strong());
        ui.add_space(8.0);
    });

    ui.horizontal(|ui| {
        if ui.button("Table Viewer").clicked() {
            action.open_viewer = true;
        }
        if ui.button("Statistics").clicked() {
            action.open_statistics = true;
        }
        if ui.button("About").clicked() {
            action.open_about = true;
        }
    });

    ui.separator();
    ui.label(RichText::new("Record managers").strong());
    ui.add_space(4.0);

    egui::Grid::new("manager_buttons")
        .num_columns(COLUMNS)
        .spacing([8.0, 8.0])
        .show(ui, |ui| {
            for (i, entity) in Entity::DASHBOARD.into_iter().enumerate() {
                let label = entity.menu_label();
                let button = egui::Button::new(format!("Manage {}", label))
                    .min_size(egui::vec2(240.0, 32.0));
                if ui.add(button).clicked() {
                    action.open_manager = Some(label);
                }
                if (i + 1) % COLUMNS == 0 {
                    ui.end_row();
                }
            }
        });

    action
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn idle_dashboard_reports_no_action() {
        let ctx = egui::Context::default();
        let mut action = DashboardAction::default();
        let _ = ctx.run(egui::RawInput::default(), |ctx| {
            egui::CentralPanel::default().show(ctx, |ui| {
                action = dashboard(ui);
            });
        });
        assert!(!action.open_viewer && !action.open_statistics && !action.open_about);
        assert!(action.open_manager.is_none());
    }
}
