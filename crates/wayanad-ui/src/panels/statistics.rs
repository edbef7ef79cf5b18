//! Statistics screen: one tile per counted table

use egui::{Color32, RichText, Ui};
use wayanad_dm::StatTile;

/// Returns true when Back was pressed
pub fn statistics_panel(ui: &mut Ui, tiles: &[StatTile]) -> bool {
    let mut back = false;

    ui.horizontal(|ui| {
        ui.heading("Statistics");
        ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
            if ui.button("Back").clicked() {
                back = true;
            }
        });
    });
    ui.separator();

    egui::Grid::new("stat_tiles")
        .num_columns(3)
        .spacing([12.0, 12.0])
        .show(ui, |ui| {
            for (i, tile) in tiles.iter().enumerate() {
                egui::Frame::group(ui.style())
                    .inner_margin(12.0)
                    .show(ui, |ui| {
                        ui.set_min_size(egui::vec2(220.0, 80.0));
                        ui.vertical_centered(|ui| {
                            ui.label(RichText::new(tile.title).strong());
                            let value = RichText::new(tile.value_text()).size(28.0);
                            if tile.count.is_some() {
                                ui.label(value);
                            } else {
                                ui.label(value.color(Color32::RED));
                            }
                        });
                    });
                if (i + 1) % 3 == 0 {
                    ui.end_row();
                }
            }
        });

    back
}
