//! Integration tests for sievr
//!
//! These tests drive complete listing sessions over a JSON dataset: open,
//! view, change filters, commit, and reopen through query memory.

use sievr::{
    commands::load_items,
    config::ListingConfig,
    listing::{FilterState, Item, SortDirection, SortSpec},
    memory::{FileQueryStore, MemoryQueryStore, QueryStore},
    pagination::WindowPosition,
    session::ListingSession,
};
use std::fs;
use tempfile::TempDir;

const DATASET: &str = r#"[
    {"id": 1, "title": "Async Rust", "tags": ["rust", "async"], "date": 1700000000, "views": 120},
    {"id": 2, "title": "CLI tools", "tags": ["rust", "cli"], "date": 1700100000, "views": 80},
    {"id": 3, "title": "Gardening", "tags": ["life"], "date": 1700200000, "views": 300},
    {"id": 4, "title": "Untagged note", "date": 1700300000},
    {"id": 5, "title": "Borrow checker", "tags": ["rust"], "date": 1700400000, "views": 45},
    {"id": 6, "title": "Compost", "tags": ["life", "garden"], "date": 1700500000, "views": 10},
    {"id": 7, "title": "Rust on embedded", "tags": ["rust", "embedded"], "date": 1700600000, "views": 230},
    {"id": 8, "title": "Zero cost", "tags": ["rust"], "date": 1700700000, "views": 99}
]"#;

/// Helper function to write the dataset to a temporary file and load it back
fn load_dataset(dir: &TempDir) -> Vec<Item> {
    let path = dir.path().join("posts.json");
    fs::write(&path, DATASET).unwrap();
    load_items(&path).unwrap()
}

fn ids(items: &[&Item]) -> Vec<u64> {
    items.iter().map(|item| item.id).collect()
}

#[test]
fn test_dataset_keeps_extra_fields() {
    let dir = TempDir::new().unwrap();
    let items = load_dataset(&dir);

    assert_eq!(items.len(), 8);
    assert_eq!(items[0].extra.get("views"), Some(&serde_json::json!(120)));
    assert_eq!(items[3].tags, None);
}

#[test]
fn test_full_session_flow_with_memory() {
    let dir = TempDir::new().unwrap();
    let items = load_dataset(&dir);
    let store = MemoryQueryStore::new();

    let mut session = ListingSession::builder()
        .route("/blog")
        .items(&items)
        .store(&store)
        .address_query("?ref=home")
        .build()
        .unwrap();

    // default sort: title descending, 6 per page
    let view = session.view();
    assert_eq!(view.total_filtered, 8);
    assert_eq!(ids(&view.items), vec![8, 4, 7, 3, 6, 2]);
    let controls = view.controls.unwrap();
    assert_eq!(controls.total_pages, 2);
    assert_eq!(controls.position(), WindowPosition::None);
    assert_eq!(controls.next(), None);

    let nav = session.toggle_tag("rust");
    assert_eq!(
        nav.location,
        "/blog?ref=home&sort=%7Etitle-descending%7E&tags=%7Erust%7E&page=1"
    );
    assert!(nav.changed);

    let view = session.view();
    assert_eq!(ids(&view.items), vec![8, 7, 2, 5, 1]);
    assert!(view.controls.is_none());
    let rust = view.tags.iter().find(|t| t.tag == "rust").unwrap();
    assert!(rust.active);
    drop(session);

    // navigating back with a bare address bar restores the filters
    let reopened = ListingSession::builder()
        .route("/blog")
        .items(&items)
        .store(&store)
        .build()
        .unwrap();
    assert_eq!(reopened.state().tags, vec!["rust".to_string()]);
    assert_eq!(reopened.view().total_filtered, 5);

    // another route is unaffected
    let other = ListingSession::builder()
        .route("/news")
        .items(&items)
        .store(&store)
        .build()
        .unwrap();
    assert!(other.state().tags.is_empty());
}

#[test]
fn test_sort_by_extra_numeric_field_then_search() {
    let dir = TempDir::new().unwrap();
    let items = load_dataset(&dir);
    let store = MemoryQueryStore::new();

    let mut config = ListingConfig::default();
    config.sort.keys.push("views".to_string());
    config.pagination.show = false;

    let mut session = ListingSession::builder()
        .route("/blog")
        .items(&items)
        .store(&store)
        .config(config)
        .build()
        .unwrap();

    session.set_sort(SortSpec::new("views", SortDirection::Ascending));
    // items without the field sort after every number
    assert_eq!(ids(&session.view().items), vec![6, 5, 2, 8, 1, 7, 3, 4]);

    session.set_search("Garden");
    // matches titles and tag lists, sort order is kept
    assert_eq!(ids(&session.view().items), vec![6, 3]);

    let options: Vec<String> = session.view().sort_options.iter().map(|o| o.value.clone()).collect();
    assert_eq!(
        options,
        vec![
            "date#descending",
            "date#ascending",
            "title#descending",
            "title#ascending",
            "views#descending",
            "views#ascending",
        ]
    );
}

#[test]
fn test_file_store_survives_restart() {
    let dir = TempDir::new().unwrap();
    let items = load_dataset(&dir);
    let store_path = dir.path().join("cache").join("queries.json");

    {
        let store = FileQueryStore::open(&store_path);
        let mut session = ListingSession::builder()
            .route("/blog")
            .items(&items)
            .store(&store)
            .build()
            .unwrap();
        let nav = session.set_page(2);
        assert_eq!(nav.location, "/blog?sort=%7Etitle-descending%7E&page=2");
    }

    let store = FileQueryStore::open(&store_path);
    let session = ListingSession::builder()
        .route("/blog")
        .items(&items)
        .store(&store)
        .build()
        .unwrap();

    let view = session.view();
    assert_eq!(view.page, 2);
    assert_eq!(ids(&view.items), vec![5, 1]);
    assert_eq!(view.controls.unwrap().window.page_range, vec![1, 2]);
}

#[test]
fn test_page_past_end_is_empty_but_not_no_results() {
    let dir = TempDir::new().unwrap();
    let items = load_dataset(&dir);
    let store = MemoryQueryStore::new();

    let session = ListingSession::builder()
        .route("/blog")
        .items(&items)
        .store(&store)
        .address_query("page=9")
        .build()
        .unwrap();

    let view = session.view();
    assert!(view.items.is_empty());
    assert_eq!(view.total_filtered, 8);
    assert!(!view.is_empty());
}

#[test]
fn test_malformed_query_falls_back_to_defaults() {
    let config = ListingConfig::default();
    let state = FilterState::from_query("sort=%7Eviews-sideways%7E&page=-3&tags=oops&utm=1", &config.sort);
    assert_eq!(state, FilterState::new(&config.sort));
}

#[test]
fn test_state_survives_encoding() {
    let config = ListingConfig::default();
    let mut state = FilterState::new(&config.sort);
    state.set_sort(SortSpec::new("date", SortDirection::Ascending));
    state.set_search("héllo wörld & more");
    state.set_tags(["rust", "c++"]);
    state.set_page(3);

    let query = state.encode_onto("ref=mail");
    assert!(query.starts_with("ref=mail&"));
    assert_eq!(FilterState::from_query(&query, &config.sort), state);
}

#[test]
fn test_store_noop_for_identical_query() {
    let dir = TempDir::new().unwrap();
    let items = load_dataset(&dir);
    let store = MemoryQueryStore::new();

    let mut session = ListingSession::builder()
        .route("/blog")
        .items(&items)
        .store(&store)
        .build()
        .unwrap();

    assert!(session.set_page(2).changed);
    assert!(!session.set_page(2).changed);
    assert_eq!(store.revision(), 1);
}
