//! Wayanad DM application
//!
//! Screens: dashboard, table viewer, statistics. Manager windows float over
//! whichever screen is active. Every database call runs on the UI thread
//! through `block_on`, so the window is unresponsive while a query runs.

use crate::modals::{
    about_window, ConfirmDelete, ConfirmResult, ManagerAction, ManagerWindow, MessageBox,
};
use crate::panels::{dashboard, statistics_panel, viewer_panel};
use eframe::egui;
use std::sync::Arc;
use tokio::runtime::Runtime;
use tracing::info;
use wayanad_dm::{
    collect_stats, spec_by_name, ActionOutcome, DeleteRequest, Entity, Notice, RecordManager,
    RecordStore, Result, StatTile, TableViewer,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Screen {
    Dashboard,
    Viewer,
    Statistics,
}

/// Main application state
pub struct WayanadApp {
    store: Arc<dyn RecordStore>,
    runtime: Runtime,

    screen: Screen,
    viewer: TableViewer,
    stats: Vec<StatTile>,

    // Open manager windows, at most one per table
    managers: Vec<ManagerWindow>,

    // Modal dialogs
    messages: MessageBox,
    confirm: ConfirmDelete,
    about_open: bool,
}

impl WayanadApp {
    pub fn new(
        cc: &eframe::CreationContext<'_>,
        store: Arc<dyn RecordStore>,
        runtime: Runtime,
    ) -> Self {
        cc.egui_ctx.set_theme(egui::Theme::Dark);
        Self {
            store,
            runtime,
            screen: Screen::Dashboard,
            viewer: TableViewer::default(),
            stats: Vec::new(),
            managers: Vec::new(),
            messages: MessageBox::default(),
            confirm: ConfirmDelete::default(),
            about_open: false,
        }
    }

    /// Open (or re-show) the manager for a dashboard label or table name
    fn open_manager(&mut self, label: &str) {
        let spec = match spec_by_name(label) {
            Ok(spec) => spec,
            Err(e) => {
                self.messages.push(Notice::error(e.to_string()));
                return;
            }
        };
        let Some(entity) = Entity::from_label(label) else {
            return;
        };

        if let Some(window) = self.managers.iter_mut().find(|w| w.entity == entity) {
            window.show();
            return;
        }

        let store = Arc::clone(&self.store);
        let (manager, notices) = self
            .runtime
            .block_on(RecordManager::open(spec, store.as_ref()));
        self.messages.extend(notices);
        self.managers.push(ManagerWindow::new(entity, manager));
    }

    fn show_statistics(&mut self) {
        let store = Arc::clone(&self.store);
        self.stats = self.runtime.block_on(collect_stats(store.as_ref()));
        self.screen = Screen::Statistics;
    }

    fn run_manager_action(&mut self, index: usize, action: ManagerAction) {
        let store = Arc::clone(&self.store);
        let Some(window) = self.managers.get_mut(index) else {
            return;
        };
        let manager = &mut window.manager;

        match action {
            ManagerAction::None => {}
            ManagerAction::Refresh => {
                if let Err(e) = self.runtime.block_on(manager.refresh(store.as_ref())) {
                    self.messages.push(Notice::failure("Load failed", &e));
                }
            }
            ManagerAction::Insert => {
                let result = self.runtime.block_on(manager.insert(store.as_ref()));
                report(&mut self.messages, "Insert failed", result);
            }
            ManagerAction::Update => {
                let result = self.runtime.block_on(manager.update(store.as_ref()));
                report(&mut self.messages, "Update failed", result);
            }
            ManagerAction::Delete => match manager.request_delete() {
                Ok(request) => self.confirm.open(window.entity, request),
                Err(e) => self.messages.push(Notice::failure("Delete failed", &e)),
            },
        }
    }

    fn run_confirmed_delete(&mut self, entity: Entity, request: DeleteRequest) {
        let store = Arc::clone(&self.store);
        let Some(window) = self.managers.iter_mut().find(|w| w.entity == entity) else {
            return;
        };
        let result = self
            .runtime
            .block_on(window.manager.delete(store.as_ref(), request));
        report(&mut self.messages, "Delete failed", result);
    }

    fn viewer_screen(&mut self, ui: &mut egui::Ui) {
        let action = viewer_panel(ui, &mut self.viewer);
        let store = Arc::clone(&self.store);

        if action.load {
            match self.runtime.block_on(self.viewer.load(store.as_ref())) {
                Ok(message) => self.messages.push(Notice::info(message)),
                Err(e) => self.messages.push(Notice::failure("Error loading table", &e)),
            }
        }
        if action.search {
            match self.runtime.block_on(self.viewer.search(store.as_ref())) {
                Ok(message) => self.messages.push(Notice::info(message)),
                Err(e) => self.messages.push(Notice::failure("Search Error", &e)),
            }
        }
        if let Some(entity) = action.open_manager {
            self.open_manager(entity.table_name());
        }
        if action.home {
            self.screen = Screen::Dashboard;
        }
    }
}

fn report(messages: &mut MessageBox, prefix: &str, result: Result<ActionOutcome>) {
    match result {
        Ok(outcome) => messages.extend(outcome.notices()),
        Err(e) => messages.push(Notice::failure(prefix, &e)),
    }
}

impl eframe::App for WayanadApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        // a pending notice or confirmation blocks everything underneath it
        let modal_open = self.messages.is_open() || self.confirm.is_open();

        egui::CentralPanel::default().show(ctx, |ui| {
            if modal_open {
                ui.disable();
            }
            match self.screen {
                Screen::Dashboard => {
                    let action = dashboard(ui);
                    if action.open_viewer {
                        self.screen = Screen::Viewer;
                    }
                    if action.open_statistics {
                        self.show_statistics();
                    }
                    if action.open_about {
                        self.about_open = true;
                    }
                    if let Some(label) = action.open_manager {
                        self.open_manager(&label);
                    }
                }
                Screen::Viewer => self.viewer_screen(ui),
                Screen::Statistics => {
                    if statistics_panel(ui, &self.stats) {
                        self.screen = Screen::Dashboard;
                    }
                }
            }
        });

        let mut pending = Vec::new();
        for (index, window) in self.managers.iter_mut().enumerate() {
            let action = window.ui(ctx, !modal_open);
            if action != ManagerAction::None {
                pending.push((index, action));
            }
        }
        for (index, action) in pending {
            self.run_manager_action(index, action);
        }
        let before = self.managers.len();
        self.managers.retain(ManagerWindow::is_open);
        if self.managers.len() != before {
            info!("Closed {} manager window(s)", before - self.managers.len());
        }

        if let ConfirmResult::Confirmed { entity, request } = self.confirm.ui(ctx) {
            self.run_confirmed_delete(entity, request);
        }
        about_window(ctx, &mut self.about_open);
        self.messages.ui(ctx);
    }
}
