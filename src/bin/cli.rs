use datagrid::downloader::{save_xlsx, to_csv, to_tsv};
use datagrid::loader::{from_csv_path, from_tsv_path, from_xlsx_path};
use datagrid::{ColumnType, DataGrid, GridConfig, GridError};

use std::env;
use std::fs;
use std::io::{self, Write};
use std::path::Path;
use std::time::Instant;

fn print_help() {
    println!("Commands:");
    println!("  q: Quit");
    println!("  load <file>: Replace the table with a .tsv/.txt, .csv or .xlsx file");
    println!("  sort <key>: Sort by column (again to flip direction)");
    println!("  search <text>: Filter rows (empty to clear)");
    println!("  next / prev: Move between pages");
    println!("  size <n>: Rows per page");
    println!("  set <row> <key> <value>: Edit a cell by global row index");
    println!("  paste <row> <key> <file>: Paste a tab-separated block at a cell");
    println!("  addrow / addcol: Append an empty row / column");
    println!("  type <key> <text|number|email|date>: Declare a column type");
    println!("  select <id> / selectall / delete: Row selection");
    println!("  undo / redo");
    println!("  export <file>: Write .xlsx, .csv or .tsv");
}

fn display(grid: &DataGrid) {
    let store = grid.store();
    let page = grid.page();

    print!("{:<6}{:<6}", "#", "id");
    for column in store.columns() {
        print!("{:<16}", column.label);
    }
    println!();

    for vr in &page.rows {
        let mark = if grid.selection().contains(vr.row.id) { "*" } else { " " };
        print!("{:<6}{:<6}", format!("{}{}", mark, vr.global_index), vr.row.id);
        for column in store.columns() {
            let value = grid
                .display_value(vr.global_index, &column.key)
                .unwrap_or_default();
            print!("{:<16}", value);
        }
        println!();
    }

    let sort = match &grid.view().sort.key {
        Some(key) => format!("{} {:?}", key, grid.view().sort.direction),
        None => "none".to_string(),
    };
    println!(
        "page {} ({} rows match) | sort: {} | search: {:?}",
        page.current_page,
        page.filtered_len,
        sort,
        grid.view().search_term
    );
}

fn load(path: &str) -> Result<datagrid::TableStore, GridError> {
    match Path::new(path).extension().and_then(|e| e.to_str()) {
        Some("xlsx") => from_xlsx_path(path),
        Some("csv") => from_csv_path(path),
        _ => from_tsv_path(path),
    }
}

fn export(grid: &DataGrid, path: &str) -> Result<(), GridError> {
    let write = |text: String| fs::write(path, text).map_err(|e| GridError::Export(e.to_string()));
    match Path::new(path).extension().and_then(|e| e.to_str()) {
        Some("xlsx") => save_xlsx(grid.store(), path),
        Some("csv") => write(to_csv(grid.store())?),
        _ => write(to_tsv(grid.store())),
    }
}

fn status_of(result: Result<(), GridError>) -> String {
    match result {
        Ok(()) => String::from("ok"),
        Err(e) => e.to_string(),
    }
}

fn execute(grid: &mut DataGrid, command: &str) -> String {
    let mut parts = command.splitn(2, ' ');
    let verb = parts.next().unwrap_or_default();
    let rest = parts.next().unwrap_or_default().trim();

    match verb {
        "load" => status_of(load(rest).map(|store| grid.replace_store(store))),
        "sort" if !rest.is_empty() => {
            grid.sort_click(rest);
            String::from("ok")
        }
        "search" => {
            grid.search(rest);
            String::from("ok")
        }
        "next" => String::from(if grid.next_page() { "ok" } else { "last page" }),
        "prev" => String::from(if grid.prev_page() { "ok" } else { "first page" }),
        "size" => match rest.parse::<usize>() {
            Ok(n) => status_of(grid.set_page_size(n)),
            Err(_) => String::from("invalid page size"),
        },
        "set" => {
            let mut args = rest.splitn(3, ' ');
            let (Some(row), Some(key)) = (args.next(), args.next()) else {
                return String::from("usage: set <row> <key> <value>");
            };
            let value = args.next().unwrap_or_default();
            match row.parse::<usize>() {
                Ok(row) => match grid.change_cell(row, key, value) {
                    Ok(true) => String::from("ok"),
                    Ok(false) => String::from("out of range"),
                    Err(e) => e.to_string(),
                },
                Err(_) => String::from("invalid row"),
            }
        }
        "paste" => {
            let args: Vec<&str> = rest.splitn(3, ' ').collect();
            let [row, key, file] = args.as_slice() else {
                return String::from("usage: paste <row> <key> <file>");
            };
            let (Ok(row), Ok(text)) = (row.parse::<usize>(), fs::read_to_string(file)) else {
                return String::from("invalid row or unreadable file");
            };
            let outcome = grid.paste_at(row, key, &text);
            format!(
                "{} applied, {} skipped, {} rejected",
                outcome.applied, outcome.out_of_bounds, outcome.rejected
            )
        }
        "addrow" => format!("row {} added", grid.add_row()),
        "addcol" => format!("column {} added", grid.add_column()),
        "type" => {
            let mut args = rest.splitn(2, ' ');
            let (Some(key), Some(kind)) = (args.next(), args.next()) else {
                return String::from("usage: type <key> <kind>");
            };
            match kind.parse::<ColumnType>() {
                Ok(kind) => status_of(grid.set_column_type(key, kind)),
                Err(e) => e,
            }
        }
        "select" => match rest.parse::<u64>() {
            Ok(id) => {
                grid.select_row(id);
                String::from("ok")
            }
            Err(_) => String::from("invalid id"),
        },
        "selectall" => {
            grid.select_all();
            String::from("ok")
        }
        "delete" => format!("{} rows removed", grid.remove_selected()),
        "undo" => String::from(if grid.undo() { "ok" } else { "no undo" }),
        "redo" => String::from(if grid.redo() { "ok" } else { "no redo" }),
        "export" if !rest.is_empty() => status_of(export(grid, rest)),
        _ => String::from("invalid command"),
    }
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::init();

    let args: Vec<String> = env::args().collect();
    let mut grid = DataGrid::new(GridConfig::default())?;
    if let Some(path) = args.get(1) {
        grid.replace_store(load(path)?);
    }

    let mut start_time = Instant::now();
    let mut status = String::from("ok");
    loop {
        display(&grid);

        let elapsed_time = start_time.elapsed().as_secs_f64();
        print!("[{:.1}] ({}) > ", elapsed_time, status);
        io::stdout().flush()?;

        let mut command = String::new();
        if io::stdin().read_line(&mut command)? == 0 {
            break;
        }
        let command = command.trim();
        start_time = Instant::now();

        if command.is_empty() {
            status = String::from("invalid command");
            continue;
        }
        if command == "help" {
            print_help();
            continue;
        }
        if command == "q" {
            break;
        }

        status = execute(&mut grid, command);
    }

    Ok(())
}

