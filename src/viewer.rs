//! Table viewer: whole-table load and substring search over any entity

use crate::database::{RecordStore, RowOrder};
use crate::error::{InputError, Result};
use crate::schema::Entity;
use crate::values::RowSet;
use tracing::{info, warn};

pub struct TableViewer {
    pub entity: Entity,
    pub search_term: String,
    grid: RowSet,
}

impl Default for TableViewer {
    fn default() -> Self {
        Self::new(Entity::VIEWER[0])
    }
}

impl TableViewer {
    pub fn new(entity: Entity) -> Self {
        Self {
            entity,
            search_term: String::new(),
            grid: RowSet::default(),
        }
    }

    pub fn grid(&self) -> &RowSet {
        &self.grid
    }

    /// Fetch every row of the chosen table
    pub async fn load(&mut self, store: &dyn RecordStore) -> Result<String> {
        self.grid.clear();
        let spec = self.entity.spec();
        self.grid = store
            .load_table(&spec, RowOrder::Natural)
            .await
            .map_err(|e| {
                warn!("Error loading table {}: {}", spec.table, e);
                e
            })?;
        info!("Loaded {} rows from {}", self.grid.len(), spec.table);
        Ok(format!("Loaded {} rows from {}", self.grid.len(), spec.table))
    }

    /// Case-insensitive substring search across every column. A blank term
    /// is rejected before any query runs.
    pub async fn search(&mut self, store: &dyn RecordStore) -> Result<String> {
        let term = self.search_term.trim().to_string();
        if term.is_empty() {
            return Err(InputError::EmptySearchTerm.into());
        }

        self.grid.clear();
        let spec = self.entity.spec();
        self.grid = store.search_table(&spec, &term).await.map_err(|e| {
            warn!("Search error on {}: {}", spec.table, e);
            e
        })?;
        info!(
            "Search for '{}' in {} found {} records",
            term,
            spec.table,
            self.grid.len()
        );
        Ok(format!("Found {} records.", self.grid.len()))
    }
}
