//! Table viewer and statistics screen against the in-memory store

mod helpers;

use helpers::MemoryStore;
use wayanad_dm::{collect_stats, spec_by_name, Entity, InputError, Row, TableViewer, Value};

fn seed_teams(store: &MemoryStore) {
    let spec = Entity::RescueTeam.spec();
    store.seed(
        &spec,
        Row::new()
            .with("team_id", 1i64)
            .with("agency", "NDRF Battalion 4")
            .with("team_type", "ABC Search")
            .with("contact", Value::Null),
    );
    store.seed(
        &spec,
        Row::new()
            .with("team_id", 2i64)
            .with("agency", "Kerala Fire and Rescue")
            .with("team_type", "Water rescue")
            .with("contact", "0493-6202000"),
    );
}

#[tokio::test]
async fn load_reports_the_row_count() {
    let store = MemoryStore::new();
    seed_teams(&store);
    let mut viewer = TableViewer::new(Entity::RescueTeam);

    let message = viewer.load(&store).await.unwrap();
    assert_eq!(message, "Loaded 2 rows from RescueTeam");
    assert_eq!(
        viewer.grid().columns,
        vec!["team_id", "agency", "team_type", "contact"]
    );
}

#[tokio::test]
async fn search_ignores_case_and_skips_null_columns() {
    let store = MemoryStore::new();
    seed_teams(&store);
    let mut viewer = TableViewer::new(Entity::RescueTeam);
    viewer.search_term = "abc".to_string();

    let message = viewer.search(&store).await.unwrap();
    assert_eq!(message, "Found 1 records.");
    assert_eq!(viewer.grid().cell(0, "team_id"), Some(&Value::Int(1)));
}

#[tokio::test]
async fn blank_search_is_rejected_without_a_query() {
    let store = MemoryStore::new();
    seed_teams(&store);
    let mut viewer = TableViewer::new(Entity::RescueTeam);
    viewer.load(&store).await.unwrap();
    let reads = store.reads();

    for term in ["", "   "] {
        viewer.search_term = term.to_string();
        let err = viewer.search(&store).await.unwrap_err();
        assert_eq!(err.as_input(), Some(&InputError::EmptySearchTerm));
        assert_eq!(err.to_string(), "Enter a search term");
    }
    assert_eq!(store.reads(), reads);
}

#[tokio::test]
async fn failed_load_leaves_an_empty_grid() {
    let store = MemoryStore::new();
    seed_teams(&store);
    let mut viewer = TableViewer::new(Entity::RescueTeam);
    viewer.load(&store).await.unwrap();

    store.fail_loads("RescueTeam");
    assert!(viewer.load(&store).await.is_err());
    assert!(viewer.grid().is_empty());
    assert!(viewer.grid().columns.is_empty());
}

#[tokio::test]
async fn viewer_selection_resolves_to_a_manager_spec() {
    let viewer = TableViewer::default();
    assert_eq!(viewer.entity, Entity::Person);
    assert_eq!(
        spec_by_name(Entity::TransferErrorLog.table_name())
            .unwrap()
            .primary_key,
        "log_id"
    );
    assert_eq!(
        spec_by_name("Shelters").unwrap_err().to_string(),
        "Unknown manager: Shelters"
    );
}

#[tokio::test]
async fn statistics_count_each_tile_independently() {
    let store = MemoryStore::new();
    seed_teams(&store);
    store.fail_loads("Donation");

    let tiles = collect_stats(&store).await;
    let shown: Vec<_> = tiles
        .iter()
        .map(|t| (t.title, t.value_text()))
        .collect();
    assert_eq!(
        shown,
        vec![
            ("Total Victims", "0".to_string()),
            ("Rescue Teams", "2".to_string()),
            ("Relief Camps", "0".to_string()),
            ("Total Donations", "Error".to_string()),
            ("Missing Persons", "0".to_string()),
            ("Rehab Allocations", "0".to_string()),
        ]
    );
}
