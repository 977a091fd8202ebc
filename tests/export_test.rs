use datagrid::downloader::{to_csv, to_tsv};
use datagrid::ingest::parse_table;
use datagrid::loader::{from_arrays, from_csv_path, from_tsv_path};
use datagrid::{GridError, TableStore};
use std::fs;

fn sample() -> TableStore {
    parse_table("city\tnote\nOslo\tcold, dark\nLima\tsays \"hola\"").unwrap()
}

#[test]
fn test_tsv_round_trips_through_ingestion() {
    let store = sample();

    let text = to_tsv(&store);

    assert_eq!(parse_table(&text).unwrap(), store);
}

#[test]
fn test_csv_quotes_special_values() {
    let csv = to_csv(&sample()).unwrap();

    assert_eq!(
        csv,
        "city,note\nOslo,\"cold, dark\"\nLima,\"says \"\"hola\"\"\"\n"
    );
}

#[test]
fn test_csv_file_round_trip() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("table.csv");
    let store = sample();

    fs::write(&path, to_csv(&store).unwrap()).unwrap();
    let loaded = from_csv_path(&path).unwrap();

    assert_eq!(loaded, store);
}

#[test]
fn test_tsv_file_load() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("table.tsv");
    fs::write(&path, "a\tb\n1\t2\n").unwrap();

    let store = from_tsv_path(&path).unwrap();

    assert_eq!(store.row_count(), 1);
    assert_eq!(store.get(0, "b"), Some("2"));
}

#[test]
fn test_from_arrays_uses_first_row_as_header() {
    let store = from_arrays(vec![
        vec![" x ".to_string(), "y".to_string()],
        vec!["1".to_string()],
    ])
    .unwrap();

    assert_eq!(store.columns()[0].key, "x");
    assert_eq!(store.rows()[0].values, vec!["1", ""]);
    assert_eq!(from_arrays(Vec::new()), Err(GridError::EmptyInput));
}

#[cfg(feature = "xlsx")]
mod xlsx {
    use super::*;
    use datagrid::downloader::{save_xlsx, to_xlsx};
    use datagrid::loader::{from_xlsx_bytes, from_xlsx_path};

    #[test]
    fn test_xlsx_round_trip() {
        let store = parse_table("name\tqty\nbolt\t12\nnut\t\nwasher\t3").unwrap();

        let bytes = to_xlsx(&store).unwrap();
        let loaded = from_xlsx_bytes(&bytes).unwrap();

        assert_eq!(loaded.columns(), store.columns());
        assert_eq!(loaded.rows(), store.rows());
    }

    #[test]
    fn test_xlsx_file_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("table_export.xlsx");
        let store = sample();

        save_xlsx(&store, &path).unwrap();
        let loaded = from_xlsx_path(&path).unwrap();

        assert_eq!(loaded, store);
    }

    #[test]
    fn test_garbage_is_an_import_error() {
        assert!(matches!(
            from_xlsx_bytes(b"not a workbook"),
            Err(GridError::Import(_))
        ));
    }
}
