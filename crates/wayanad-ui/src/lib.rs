//! Wayanad DM desktop surface
//!
//! Renders the record engine with egui. Business rules live in `wayanad-dm`;
//! this crate only draws state and forwards button presses.

#![allow(clippy::too_many_arguments)]

pub mod app;
pub mod modals;
pub mod panels;

pub use app::WayanadApp;
