use datagrid::{
    CellFormat, ColumnType, DataGrid, EditState, GridConfig, GridError, KeyInput, MemoryClipboard,
};

fn empty_grid() -> DataGrid {
    DataGrid::new(GridConfig {
        seed_placeholder: false,
        ..GridConfig::default()
    })
    .unwrap()
}

fn people_grid() -> DataGrid {
    let mut grid = empty_grid();
    grid.paste(
        "name\temail\tage\n\
         zoe\tzoe@example.com\t31\n\
         adam\tadam@example.com\t45\n\
         mia\tmia@example.com\t27\n\
         bob\tbob@example.com\t52\n\
         eve\teve@example.com\t38\n\
         liam\tliam@example.com\t19",
    )
    .unwrap();
    grid
}

// Helper function to check one cell by global row index and column key
fn assert_cell_value(grid: &DataGrid, row: usize, key: &str, expected: &str) {
    assert_eq!(grid.store().get(row, key), Some(expected), "cell ({}, {})", row, key);
}

#[test]
fn test_new_grid_starts_with_placeholder() {
    let grid = DataGrid::new(GridConfig::default()).unwrap();

    assert_eq!(grid.store().column_count(), 3);
    assert_eq!(grid.store().row_count(), 1);
    assert_eq!(grid.view().rows_per_page(), 5);
    assert!(!grid.history().can_undo());
}

#[test]
fn test_invalid_config_is_rejected() {
    let config = GridConfig {
        rows_per_page: 0,
        ..GridConfig::default()
    };
    assert!(matches!(DataGrid::new(config), Err(GridError::InvalidPageSize)));
}

#[test]
fn test_paste_resets_page_and_state() {
    let mut grid = people_grid();
    assert!(grid.next_page());
    grid.double_click(0, "name");
    grid.select_row(1);

    grid.paste("a\tb\n1\t2").unwrap();

    assert_eq!(grid.view().current_page(), 1);
    assert_eq!(grid.edit_state(), &EditState::Viewing);
    assert!(grid.selection().is_empty());
    assert_eq!(grid.store().row_count(), 1);
}

#[test]
fn test_empty_paste_keeps_previous_table() {
    let mut grid = people_grid();
    assert!(grid.next_page());
    let before = grid.store().clone();

    assert_eq!(grid.paste(""), Err(GridError::EmptyInput));

    assert_eq!(grid.store(), &before);
    assert_eq!(grid.view().current_page(), 2);
}

#[test]
fn test_edit_through_sorted_view_hits_the_right_row() {
    let mut grid = people_grid();
    grid.sort_click("name");

    let page = grid.page();
    let first = &page.rows[0];
    assert_eq!(first.row.values[0], "adam");
    let global = first.global_index;
    assert_eq!(global, 1);

    grid.double_click(global, "age");
    assert!(grid.change_cell(global, "age", "46").unwrap());

    assert_cell_value(&grid, 1, "age", "46");
    assert_cell_value(&grid, 0, "age", "31");
}

#[test]
fn test_change_cell_keeps_value_untrimmed() {
    let mut grid = people_grid();

    grid.change_cell(0, "name", " zoe ").unwrap();

    assert_cell_value(&grid, 0, "name", " zoe ");
}

#[test]
fn test_change_cell_out_of_range_is_noop() {
    let mut grid = people_grid();
    let before = grid.store().clone();

    assert_eq!(grid.change_cell(99, "name", "x"), Ok(false));
    assert_eq!(grid.change_cell(0, "nope", "x"), Ok(false));
    assert_eq!(grid.store(), &before);
}

#[test]
fn test_validation_failure_leaves_store_unchanged() {
    let mut grid = people_grid();
    grid.set_column_type("age", ColumnType::Number).unwrap();
    grid.set_column_type("email", ColumnType::Email).unwrap();
    let before = grid.store().clone();

    let err = grid.change_cell(0, "age", "thirty").unwrap_err();
    assert_eq!(err.to_string(), "Invalid input for column type: number");
    assert!(grid.change_cell(0, "email", "not-an-email").is_err());

    assert_eq!(grid.store(), &before);
    assert!(grid.change_cell(0, "age", "30").unwrap());
}

#[test]
fn test_set_type_on_unknown_column() {
    let mut grid = people_grid();

    assert_eq!(
        grid.set_column_type("height", ColumnType::Number),
        Err(GridError::UnknownColumn("height".to_string()))
    );
}

#[test]
fn test_paste_at_ends_editing() {
    let mut grid = people_grid();
    grid.double_click(0, "name");

    let outcome = grid.paste_at(0, "name", "a\tb\nc\td");

    assert_eq!(outcome.applied, 4);
    assert_eq!(grid.edit_state(), &EditState::Viewing);
    assert_cell_value(&grid, 1, "email", "d");
}

#[test]
fn test_select_all_toggles_current_page() {
    let mut grid = people_grid();

    grid.select_all();
    assert_eq!(grid.selection().ids(), &[1, 2, 3, 4, 5]);
    assert!(grid.all_selected());

    grid.select_all();
    assert!(grid.selection().is_empty());
    assert!(!grid.all_selected());

    grid.select_row(6);
    grid.select_row(2);
    grid.select_row(6);
    assert_eq!(grid.selection().ids(), &[2]);
}

#[test]
fn test_remove_selected_rows() {
    let mut grid = people_grid();
    grid.select_row(2);
    grid.select_row(4);

    assert_eq!(grid.remove_selected(), 2);

    assert_eq!(grid.store().row_count(), 4);
    assert!(grid.selection().is_empty());
    assert_eq!(grid.add_row(), 7);
}

#[test]
fn test_paging_through_the_grid() {
    let mut grid = people_grid();
    grid.set_page_size(4).unwrap();

    assert_eq!(grid.page().rows.len(), 4);
    assert!(grid.next_page());
    assert_eq!(grid.page().rows.len(), 2);
    assert!(!grid.next_page());

    grid.search("zoe");
    assert!(grid.page().rows.is_empty());
    assert!(grid.prev_page());
    assert_eq!(grid.page().rows.len(), 1);
}

#[test]
fn test_huge_page_size_after_paging_forward() {
    let mut grid = people_grid();
    grid.set_page_size(1).unwrap();
    assert!(grid.next_page());

    grid.set_page_size(usize::MAX / 2 + 1).unwrap();
    let page = grid.page();

    assert!(!page.has_next());
    assert!(page.has_prev());
    assert!(page.rows.is_empty());
    assert!(!grid.next_page());
    assert!(grid.prev_page());
    assert_eq!(grid.page().rows.len(), 6);
}

#[test]
fn test_undo_redo() {
    let mut grid = people_grid();
    grid.change_cell(0, "name", "zed").unwrap();
    grid.add_column();

    assert!(grid.undo());
    assert_eq!(grid.store().column_count(), 3);
    assert!(grid.undo());
    assert_cell_value(&grid, 0, "name", "zoe");

    assert!(grid.redo());
    assert_cell_value(&grid, 0, "name", "zed");

    grid.add_row();
    assert!(!grid.redo());
}

#[test]
fn test_undo_stops_at_oldest_snapshot() {
    let mut grid = empty_grid();

    assert!(!grid.undo());
    grid.add_column();
    assert!(grid.undo());
    assert_eq!(grid.store().column_count(), 0);
    assert!(!grid.undo());
}

#[test]
fn test_history_limit() {
    let mut grid = DataGrid::new(GridConfig {
        history_limit: 3,
        seed_placeholder: false,
        ..GridConfig::default()
    })
    .unwrap();
    for _ in 0..5 {
        grid.add_column();
    }

    assert!(grid.undo());
    assert!(grid.undo());
    assert!(!grid.undo());
    assert_eq!(grid.store().column_count(), 3);
}

#[test]
fn test_copy_and_paste_shortcuts() {
    let mut grid = people_grid();
    let mut clipboard = MemoryClipboard::new();

    // nothing focused
    assert!(!grid.handle_key(KeyInput::ctrl('c'), &mut clipboard));

    grid.double_click(0, "name");
    assert!(grid.handle_key(KeyInput::ctrl('c'), &mut clipboard));
    assert_eq!(clipboard.contents(), Some("zoe"));
    assert_eq!(grid.copied().unwrap().column, "name");

    grid.double_click(2, "name");
    assert!(grid.handle_key(KeyInput::ctrl('v'), &mut clipboard));
    assert_cell_value(&grid, 2, "name", "zoe");

    let plain = KeyInput {
        key: 'v',
        ctrl: false,
        meta: false,
    };
    assert!(!grid.handle_key(plain, &mut clipboard));
}

#[test]
fn test_denied_clipboard_falls_back_to_copied_value() {
    let mut grid = people_grid();
    let mut clipboard = MemoryClipboard::new();
    clipboard.deny();

    grid.double_click(1, "name");
    assert!(grid.copy(&mut clipboard).is_some());

    grid.double_click(3, "name");
    let cmd_v = KeyInput {
        key: 'v',
        ctrl: false,
        meta: true,
    };
    assert!(grid.handle_key(cmd_v, &mut clipboard));
    assert_cell_value(&grid, 3, "name", "adam");
}

#[test]
fn test_denied_clipboard_without_copy_is_ignored() {
    let mut grid = people_grid();
    let mut clipboard = MemoryClipboard::with_text("x");
    clipboard.deny();
    let before = grid.store().clone();

    grid.double_click(0, "name");
    assert!(!grid.handle_key(KeyInput::ctrl('v'), &mut clipboard));
    assert_eq!(grid.store(), &before);
}

#[test]
fn test_display_value_uses_column_format() {
    let mut grid = people_grid();
    grid.set_column_format("age", Some(CellFormat::Currency)).unwrap();

    assert_eq!(grid.display_value(0, "age").as_deref(), Some("$31.00"));
    assert_cell_value(&grid, 0, "age", "31");
}
