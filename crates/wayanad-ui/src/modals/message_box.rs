//! Message box and delete confirmation

use egui::{Color32, RichText};
use std::collections::VecDeque;
use wayanad_dm::{DeleteRequest, Entity, Notice, NoticeLevel};

/// Queue of notices, shown one at a time
#[derive(Default)]
pub struct MessageBox {
    queue: VecDeque<Notice>,
    // front notice has been drawn in an earlier frame
    front_shown: bool,
}

impl MessageBox {
    pub fn push(&mut self, notice: Notice) {
        self.queue.push_back(notice);
    }

    pub fn extend(&mut self, notices: impl IntoIterator<Item = Notice>) {
        self.queue.extend(notices);
    }

    pub fn is_open(&self) -> bool {
        !self.queue.is_empty()
    }

    pub fn ui(&mut self, ctx: &egui::Context) {
        let Some(notice) = self.queue.front() else {
            return;
        };

        // Enter only dismisses a notice the user has already seen; the key
        // press that raised it may still be in this frame's input
        let enter_dismisses = self.front_shown;
        let mut dismissed = false;
        egui::Window::new(notice.level.to_string())
            .id(egui::Id::new("message_box"))
            .collapsible(false)
            .resizable(false)
            .anchor(egui::Align2::CENTER_CENTER, [0.0, 0.0])
            .show(ctx, |ui| {
                ui.set_min_width(320.0);
                let text = RichText::new(&notice.text);
                match notice.level {
                    NoticeLevel::Info => ui.label(text),
                    NoticeLevel::Error => ui.label(text.color(Color32::from_rgb(239, 68, 68))),
                };
                ui.add_space(8.0);
                ui.vertical_centered(|ui| {
                    let enter = enter_dismisses && ui.input(|i| i.key_pressed(egui::Key::Enter));
                    if ui.button("OK").clicked() || enter {
                        dismissed = true;
                    }
                });
            });

        if dismissed {
            self.queue.pop_front();
            self.front_shown = false;
        } else {
            self.front_shown = true;
        }
    }
}

/// Result from the delete confirmation
pub enum ConfirmResult {
    None,
    Confirmed {
        entity: Entity,
        request: DeleteRequest,
    },
    Cancelled,
}

/// Yes/No prompt guarding a delete
#[derive(Default)]
pub struct ConfirmDelete {
    pending: Option<(Entity, DeleteRequest)>,
}

impl ConfirmDelete {
    pub fn open(&mut self, entity: Entity, request: DeleteRequest) {
        self.pending = Some((entity, request));
    }

    pub fn is_open(&self) -> bool {
        self.pending.is_some()
    }

    pub fn ui(&mut self, ctx: &egui::Context) -> ConfirmResult {
        let Some((_, request)) = &self.pending else {
            return ConfirmResult::None;
        };

        let mut answer = None;
        egui::Window::new("Confirm")
            .id(egui::Id::new("confirm_delete"))
            .collapsible(false)
            .resizable(false)
            .anchor(egui::Align2::CENTER_CENTER, [0.0, 0.0])
            .show(ctx, |ui| {
                ui.label(request.prompt());
                ui.add_space(8.0);
                ui.horizontal(|ui| {
                    if ui.button("Yes").clicked() {
                        answer = Some(true);
                    }
                    if ui.button("No").clicked() {
                        answer = Some(false);
                    }
                });
            });

        match answer {
            Some(true) => match self.pending.take() {
                Some((entity, request)) => ConfirmResult::Confirmed { entity, request },
                None => ConfirmResult::None,
            },
            Some(false) => {
                self.pending = None;
                ConfirmResult::Cancelled
            }
            None => ConfirmResult::None,
        }
    }
}
