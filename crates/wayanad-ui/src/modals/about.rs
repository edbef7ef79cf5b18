use egui::RichText;

/// About window; clears `open` when dismissed
pub fn about_window(ctx: &egui::Context, open: &mut bool) {
    let mut close = false;
    egui::Window::new("About")
        .open(open)
        .collapsible(false)
        .resizable(false)
        .anchor(egui::Align2::CENTER_CENTER, [0.0, 0.0])
        .show(ctx, |ui| {
            ui.label(RichText::new("Wayanad Disaster Management System").strong());
            ui.label("Separate management windows for ALL tables (full CRUD).");
            ui.label("Triggers run inside MySQL (e.g., Supply_Audit; Camp occupancy).");
            ui.add_space(8.0);
            if ui.button("OK").clicked() {
                close = true;
            }
        });
    if close {
        *open = false;
    }
}
