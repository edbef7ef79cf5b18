//! Wayanad DM - metadata-driven record engine
//!
//! The desktop client for the `wayanad_disaster` database is one generic
//! form-and-grid component driven by per-table specifications. This crate
//! holds everything except the widgets: the specification registry, the form
//! model, the record manager, the table viewer, the statistics counts and the
//! storage seam.
//!
//! ## Control flow
//! Entity -> TableSpec -> RecordManager (form + grid) -> statement -> reload
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! # #[cfg(feature = "database")]
//! # async fn run() -> wayanad_dm::Result<()> {
//! use wayanad_dm::{AppConfig, Entity, MySqlStore, RecordManager};
//!
//! let store = MySqlStore::new(AppConfig::from_env().database);
//! let (mut manager, notices) = RecordManager::open(Entity::Camp.spec(), &store).await;
//! for notice in notices {
//!     eprintln!("{}", notice);
//! }
//! manager.select_row(0);
//! let request = manager.request_delete()?;
//! println!("{}", request.prompt());
//! # Ok(())
//! # }
//! ```

// Core error handling
pub mod error;

// Configuration and operator messages
pub mod config;
pub mod notice;

// Specifications and values
pub mod schema;
pub mod values;

// Storage seam and SQL text
pub mod database;

// Form model, managers, viewer, statistics
pub mod form;
pub mod manager;
pub mod stats;
pub mod viewer;

pub use config::{mask_database_url, AppConfig, DatabaseConfig, WindowConfig};
pub use database::{RecordStore, RowOrder};
pub use error::{ClientError, InputError, Result};
pub use form::{FieldInput, FormField, RecordForm};
pub use manager::{ActionOutcome, DeleteRequest, RecordManager};
pub use notice::{Notice, NoticeLevel};
pub use schema::{spec_by_name, Entity, FieldKind, FieldSpec, SpecError, TableSpec};
pub use stats::{collect_stats, StatTile};
pub use values::{ColumnValue, ReferenceItem, Row, RowSet, Value};
pub use viewer::TableViewer;

#[cfg(feature = "database")]
pub use database::MySqlStore;
