//! UI Panels
//!
//! Each panel is a function that takes &mut Ui plus the state it draws.
//! Panels report button presses through an action value; the app runs the
//! database work.

mod dashboard;
mod record_form;
mod record_grid;
mod statistics;
mod viewer;

pub use dashboard::{dashboard, DashboardAction};
pub use record_form::record_form;
pub use record_grid::record_grid;
pub use statistics::statistics_panel;
pub use viewer::{viewer_panel, ViewerAction};
