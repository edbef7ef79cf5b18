//! Modal Dialogs Module
//!
//! - Manager window: form, actions and grid for one table
//! - Message box and delete confirmation
//! - About

pub mod about;
pub mod manager_window;
pub mod message_box;

pub use about::about_window;
pub use manager_window::{ManagerAction, ManagerWindow};
pub use message_box::{ConfirmDelete, ConfirmResult, MessageBox};
