use tabviz::ChartError;
use tabviz::api::{
    InMemoryVisualizationStore, JsonFileVisualizationStore, LIBRARY_CAPACITY, LIBRARY_STORAGE_KEY,
    SavedVisualization, VisualizationDraft, VisualizationLibrary, VisualizationStore,
};
use tabviz::core::{ChartKind, Selection};
use uuid::Uuid;

fn draft(title: &str) -> VisualizationDraft {
    VisualizationDraft {
        file_id: "file-1".to_owned(),
        file_name: "sales.csv".to_owned(),
        title: title.to_owned(),
        chart_type: ChartKind::Line,
        selected_columns: Selection::new("date", "amount"),
    }
}

#[test]
fn empty_store_lists_nothing() {
    let library = VisualizationLibrary::new(InMemoryVisualizationStore::default());
    assert!(library.list().expect("list").is_empty());
}

#[test]
fn saves_are_listed_newest_first() {
    let mut library = VisualizationLibrary::new(InMemoryVisualizationStore::default());
    let first = library.save(draft("first")).expect("save first");
    let second = library.save(draft("second")).expect("save second");

    let items = library.list().expect("list");
    assert_eq!(items.len(), 2);
    assert_eq!(items[0].id, second.id);
    assert_eq!(items[1].id, first.id);
    assert_ne!(first.id, second.id);
    assert_eq!(items[1].title, "first");
}

#[test]
fn library_keeps_only_newest_entries() {
    let mut library = VisualizationLibrary::new(InMemoryVisualizationStore::default());
    let mut ids = Vec::new();
    for i in 0..(LIBRARY_CAPACITY + 5) {
        ids.push(library.save(draft(&format!("chart {i}"))).expect("save").id);
    }

    let items = library.list().expect("list");
    assert_eq!(items.len(), LIBRARY_CAPACITY);
    assert_eq!(items[0].id, *ids.last().expect("ids"));
    assert_eq!(items[LIBRARY_CAPACITY - 1].id, ids[5]);
    assert!(matches!(
        library.get(ids[0]),
        Err(ChartError::VisualizationNotFound(_))
    ));
}

#[test]
fn get_and_remove_by_id() {
    let mut library = VisualizationLibrary::new(InMemoryVisualizationStore::default());
    let saved = library.save(draft("keep")).expect("save");

    let fetched = library.get(saved.id).expect("get");
    assert_eq!(fetched.selected_columns, Selection::new("date", "amount"));
    assert_eq!(fetched.chart_type, ChartKind::Line);

    assert!(!library.remove(Uuid::new_v4()).expect("remove unknown"));
    assert!(library.remove(saved.id).expect("remove saved"));
    assert!(library.list().expect("list").is_empty());
    assert!(matches!(
        library.get(saved.id),
        Err(ChartError::VisualizationNotFound(_))
    ));
}

#[test]
fn blank_title_is_derived_from_file_name() {
    let saved = SavedVisualization::from_draft(draft("  "));
    assert_eq!(saved.title, "sales.csv Visualization");
    assert_eq!(saved.aggregation, "sum");
    assert_eq!(saved.time_unit, "year");
    assert!(saved.filter.filter_col.is_empty());
}

#[test]
fn entries_serialize_with_camel_case_fields() {
    let saved = SavedVisualization::from_draft(draft("camel"));
    let value = serde_json::to_value(&saved).expect("to value");

    assert_eq!(value["fileId"], "file-1");
    assert_eq!(value["fileName"], "sales.csv");
    assert_eq!(value["chartType"], "line");
    assert_eq!(value["selectedColumns"]["x"], "date");
    assert_eq!(value["timeUnit"], "year");
    assert_eq!(value["filter"]["filterCol"], "");
    assert!(value["createdAt"].is_string());
    assert_eq!(value["id"], saved.id.to_string());
}

#[test]
fn corrupt_library_payload_is_reported() {
    let mut store = InMemoryVisualizationStore::default();
    store
        .set(LIBRARY_STORAGE_KEY, "{not json".to_owned())
        .expect("set");
    let library = VisualizationLibrary::new(store);
    assert!(matches!(library.list(), Err(ChartError::Json(_))));
}

#[test]
fn json_file_store_persists_across_reopen() {
    let dir = tempfile::tempdir().expect("tempdir");
    let saved = {
        let store = JsonFileVisualizationStore::open(dir.path()).expect("open");
        let mut library = VisualizationLibrary::new(store);
        library.save(draft("persisted")).expect("save")
    };

    let store = JsonFileVisualizationStore::open(dir.path()).expect("reopen");
    assert_eq!(store.list().expect("keys"), vec![LIBRARY_STORAGE_KEY]);
    let library = VisualizationLibrary::new(store);
    let fetched = library.get(saved.id).expect("get after reopen");
    assert_eq!(fetched.title, "persisted");
    assert_eq!(fetched.created_at, saved.created_at);
}

#[test]
fn json_file_store_rejects_path_like_keys() {
    let dir = tempfile::tempdir().expect("tempdir");
    let mut store = JsonFileVisualizationStore::open(dir.path().join("nested")).expect("open");

    assert!(matches!(
        store.set("../escape", "x".to_owned()),
        Err(ChartError::InvalidData(_))
    ));
    assert!(store.get("").is_err());
    assert_eq!(store.get("absent").expect("get"), None);
    store.remove("absent").expect("removing a missing key is fine");
}
