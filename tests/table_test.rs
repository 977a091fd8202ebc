use datagrid::{Column, TableStore};

fn single_row_store() -> TableStore {
    TableStore::from_parts(vec![Column::from_header("a")], vec![vec!["x".to_string()]])
}

#[test]
fn test_add_column_backfills_rows() {
    let mut store = single_row_store();

    let key = store.add_column();

    assert_eq!(key, "column_2");
    let keys: Vec<&str> = store.columns().iter().map(|c| c.key.as_str()).collect();
    assert_eq!(keys, vec!["a", "column_2"]);
    assert_eq!(store.rows()[0].id, 1);
    assert_eq!(store.get(0, "a"), Some("x"));
    assert_eq!(store.get(0, "column_2"), Some(""));
    assert!(store.is_consistent());
}

#[test]
fn test_add_row_uses_next_id_and_empty_values() {
    let mut store = single_row_store();
    store.add_column();

    let id = store.add_row();

    assert_eq!(id, 2);
    assert_eq!(store.rows()[1].values, vec!["", ""]);
}

#[test]
fn test_ids_are_not_reused_after_removal() {
    let mut store = TableStore::from_parts(
        vec![Column::from_header("a")],
        vec![vec!["1".into()], vec!["2".into()], vec!["3".into()]],
    );

    assert_eq!(store.remove_rows(&[3]), 1);
    let id = store.add_row();

    assert_eq!(id, 4);
    let ids: Vec<u64> = store.rows().iter().map(|r| r.id).collect();
    assert_eq!(ids, vec![1, 2, 4]);
}

#[test]
fn test_set_cell_out_of_range_is_noop() {
    let mut store = single_row_store();
    let before = store.clone();

    assert!(!store.set_cell(1, "a", "v"));
    assert!(!store.set_cell(0, "missing", "v"));
    assert!(!store.set_cell_at(0, 1, "v"));
    assert_eq!(store, before);

    assert!(store.set_cell(0, "a", " v "));
    assert_eq!(store.get(0, "a"), Some(" v "));
}

#[test]
fn test_placeholder_store() {
    let store = TableStore::with_placeholder();

    assert_eq!(store.column_count(), 3);
    assert_eq!(store.row_count(), 1);
    assert_eq!(store.columns()[0].key, "column1");
    assert_eq!(store.rows()[0].id, 1);
    assert!(store.rows()[0].values.iter().all(String::is_empty));
}

#[test]
fn test_to_arrays_puts_labels_first() {
    let mut store = single_row_store();
    store.add_column();

    let arrays = store.to_arrays();

    assert_eq!(arrays[0], vec!["a", "New column 2"]);
    assert_eq!(arrays[1], vec!["x", ""]);
}
