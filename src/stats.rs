//! Statistics screen: six row-count tiles

use crate::database::RecordStore;
use crate::schema::Entity;
use tracing::warn;

pub const TILES: [(&str, Entity); 6] = [
    ("Total Victims", Entity::Victim),
    ("Rescue Teams", Entity::RescueTeam),
    ("Relief Camps", Entity::Camp),
    ("Total Donations", Entity::Donation),
    ("Missing Persons", Entity::MissingPerson),
    ("Rehab Allocations", Entity::RehabAllocation),
];

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StatTile {
    pub title: &'static str,
    pub entity: Entity,
    /// `None` when the count failed
    pub count: Option<i64>,
}

impl StatTile {
    /// Tile body: the count, or `Error` when it could not be read
    pub fn value_text(&self) -> String {
        match self.count {
            Some(n) => n.to_string(),
            None => "Error".to_string(),
        }
    }
}

/// Count every tile's table; a failure only affects its own tile
pub async fn collect_stats(store: &dyn RecordStore) -> Vec<StatTile> {
    let mut tiles = Vec::with_capacity(TILES.len());
    for (title, entity) in TILES {
        let count = match store.count_rows(&entity.spec()).await {
            Ok(n) => Some(n),
            Err(e) => {
                warn!("Count failed for {}: {}", entity, e);
                None
            }
        };
        tiles.push(StatTile {
            title,
            entity,
            count,
        });
    }
    tiles
}
