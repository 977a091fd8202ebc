use axum::{
    Json, Router,
    extract::{Multipart, State},
    http::{StatusCode, header},
    response::{IntoResponse, Response},
    routing::{get, post},
};
use clap::Parser;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use tokio::net::TcpListener;
use tower_http::cors::CorsLayer;

use crate::downloader;
use crate::edit::{EditState, PasteOutcome};
use crate::error::GridError;
use crate::grid::{DataGrid, GridConfig};
use crate::loader;
use crate::table::Column;
use crate::validation::ColumnType;
use crate::view::SortConfig;

/// Command line / environment configuration for the web server.
#[derive(Parser, Debug, Clone)]
#[command(name = "datagrid-web")]
#[command(about = "Serve the paste-driven data grid over a JSON API")]
pub struct ServerArgs {
    #[arg(long, env = "DATAGRID_HOST", default_value = "127.0.0.1")]
    pub host: String,

    #[arg(long, short = 'p', env = "DATAGRID_PORT", default_value_t = 3000)]
    pub port: u16,

    /// Overrides the configured page size
    #[arg(long, env = "DATAGRID_ROWS_PER_PAGE")]
    pub rows_per_page: Option<usize>,

    /// JSON file holding a grid configuration
    #[arg(long, short = 'c', env = "DATAGRID_CONFIG")]
    pub config: Option<PathBuf>,
}

impl ServerArgs {
    pub fn grid_config(&self) -> Result<GridConfig, GridError> {
        let mut config = match &self.config {
            Some(path) => GridConfig::from_json_file(path)?,
            None => GridConfig::default(),
        };
        if let Some(n) = self.rows_per_page {
            config.rows_per_page = n;
        }
        config.validate()?;
        Ok(config)
    }
}

pub struct AppState {
    grid: Mutex<DataGrid>,
}

impl AppState {
    pub fn new(grid: DataGrid) -> Self {
        AppState {
            grid: Mutex::new(grid),
        }
    }

    // Every mutation runs to completion under the lock, so a poisoned guard
    // still holds a consistent grid.
    fn grid(&self) -> MutexGuard<'_, DataGrid> {
        self.grid.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

#[derive(Serialize)]
struct ViewRowPayload {
    global_index: usize,
    id: u64,
    values: Vec<String>,
    display: Vec<String>,
    selected: bool,
}

#[derive(Serialize)]
pub struct ViewPayload {
    columns: Vec<Column>,
    rows: Vec<ViewRowPayload>,
    sort: SortConfig,
    search_term: String,
    current_page: usize,
    rows_per_page: usize,
    page_size_options: Vec<usize>,
    filtered_len: usize,
    has_next: bool,
    has_prev: bool,
    selected: Vec<u64>,
    all_selected: bool,
    editing: EditState,
    can_undo: bool,
    can_redo: bool,
}

impl ViewPayload {
    fn from_grid(grid: &DataGrid) -> Self {
        let page = grid.page();
        let columns = grid.store().columns().to_vec();
        let rows = page
            .rows
            .iter()
            .map(|vr| ViewRowPayload {
                global_index: vr.global_index,
                id: vr.row.id,
                values: vr.row.values.clone(),
                display: columns
                    .iter()
                    .zip(&vr.row.values)
                    .map(|(c, v)| c.format.map(|f| f.apply(v)).unwrap_or_else(|| v.clone()))
                    .collect(),
                selected: grid.selection().contains(vr.row.id),
            })
            .collect();
        ViewPayload {
            rows,
            sort: grid.view().sort.clone(),
            search_term: grid.view().search_term.clone(),
            current_page: page.current_page,
            rows_per_page: page.rows_per_page,
            page_size_options: grid.config().page_size_options.clone(),
            filtered_len: page.filtered_len,
            has_next: page.has_next(),
            has_prev: page.has_prev(),
            selected: grid.selection().ids().to_vec(),
            all_selected: grid.all_selected(),
            editing: grid.edit_state().clone(),
            can_undo: grid.history().can_undo(),
            can_redo: grid.history().can_redo(),
            columns,
        }
    }
}

#[derive(Serialize)]
pub struct ApiResponse {
    status: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    message: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    paste: Option<PasteOutcome>,
    view: ViewPayload,
}

impl ApiResponse {
    fn ok(grid: &DataGrid) -> Json<Self> {
        Json(ApiResponse {
            status: "ok".to_string(),
            message: None,
            paste: None,
            view: ViewPayload::from_grid(grid),
        })
    }
}

#[derive(Serialize)]
struct ErrorResponse {
    status: String,
    message: String,
}

pub struct ApiError(GridError);

impl From<GridError> for ApiError {
    fn from(e: GridError) -> Self {
        ApiError(e)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let code = match &self.0 {
            GridError::Validation { .. } => StatusCode::UNPROCESSABLE_ENTITY,
            GridError::UnknownColumn(_) => StatusCode::NOT_FOUND,
            GridError::EmptyInput
            | GridError::InvalidPageSize
            | GridError::Import(_)
            | GridError::Csv(_)
            | GridError::Config(_) => StatusCode::BAD_REQUEST,
            GridError::Clipboard(_) | GridError::Export(_) => StatusCode::INTERNAL_SERVER_ERROR,
        };
        log::warn!("request failed: {}", self.0);
        let body = ErrorResponse {
            status: "error".to_string(),
            message: self.0.to_string(),
        };
        (code, Json(body)).into_response()
    }
}

type ApiResult = Result<Json<ApiResponse>, ApiError>;

#[derive(Deserialize)]
struct PasteBody {
    text: String,
}

#[derive(Deserialize)]
struct CellTarget {
    row: usize,
    column: String,
}

#[derive(Deserialize)]
struct CellChange {
    row: usize,
    column: String,
    value: String,
}

#[derive(Deserialize)]
struct CellPaste {
    row: usize,
    column: String,
    text: String,
}

#[derive(Deserialize)]
struct ColumnBody {
    column: String,
}

#[derive(Deserialize)]
struct ColumnTypeBody {
    column: String,
    kind: ColumnType,
}

#[derive(Deserialize)]
struct RowBody {
    id: u64,
}

#[derive(Deserialize)]
struct SearchBody {
    term: String,
}

#[derive(Deserialize)]
struct PageSizeBody {
    rows_per_page: usize,
}

pub fn router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/api/view", get(get_view))
        .route("/api/paste", post(paste_table))
        .route("/api/cell/edit", post(begin_edit))
        .route("/api/cell/change", post(change_cell))
        .route("/api/cell/blur", post(blur_cell))
        .route("/api/cell/paste", post(paste_cells))
        .route("/api/sort", post(sort_column))
        .route("/api/search", post(search))
        .route("/api/page/size", post(set_page_size))
        .route("/api/page/next", post(next_page))
        .route("/api/page/prev", post(prev_page))
        .route("/api/select/row", post(select_row))
        .route("/api/select/all", post(select_all))
        .route("/api/select/delete", post(delete_selected))
        .route("/api/rows", post(add_row))
        .route("/api/columns", post(add_column))
        .route("/api/columns/type", post(set_column_type))
        .route("/api/undo", post(undo))
        .route("/api/redo", post(redo))
        .route("/api/export.xlsx", get(export_xlsx))
        .route("/api/export.csv", get(export_csv))
        .route("/api/import", post(import_workbook))
        .layer(CorsLayer::permissive())
        .with_state(state)
}

pub async fn run(args: ServerArgs) -> Result<(), Box<dyn std::error::Error>> {
    let grid = DataGrid::new(args.grid_config()?)?;
    let state = Arc::new(AppState::new(grid));
    let app = router(state);

    let addr = format!("{}:{}", args.host, args.port);
    let listener = TcpListener::bind(&addr).await?;
    log::info!("Listening on http://{}", addr);
    axum::serve(listener, app).await?;

    Ok(())
}

async fn get_view(State(state): State<Arc<AppState>>) -> Json<ApiResponse> {
    ApiResponse::ok(&state.grid())
}

async fn paste_table(State(state): State<Arc<AppState>>, Json(body): Json<PasteBody>) -> ApiResult {
    let mut grid = state.grid();
    grid.paste(&body.text)?;
    Ok(ApiResponse::ok(&grid))
}

async fn begin_edit(State(state): State<Arc<AppState>>, Json(body): Json<CellTarget>) -> ApiResult {
    let mut grid = state.grid();
    grid.double_click(body.row, &body.column);
    Ok(ApiResponse::ok(&grid))
}

async fn change_cell(State(state): State<Arc<AppState>>, Json(body): Json<CellChange>) -> ApiResult {
    let mut grid = state.grid();
    grid.change_cell(body.row, &body.column, &body.value)?;
    Ok(ApiResponse::ok(&grid))
}

async fn blur_cell(State(state): State<Arc<AppState>>) -> ApiResult {
    let mut grid = state.grid();
    grid.blur();
    Ok(ApiResponse::ok(&grid))
}

async fn paste_cells(State(state): State<Arc<AppState>>, Json(body): Json<CellPaste>) -> ApiResult {
    let mut grid = state.grid();
    let outcome = grid.paste_at(body.row, &body.column, &body.text);
    let mut response = ApiResponse::ok(&grid);
    response.paste = Some(outcome);
    Ok(response)
}

async fn sort_column(State(state): State<Arc<AppState>>, Json(body): Json<ColumnBody>) -> ApiResult {
    let mut grid = state.grid();
    grid.sort_click(&body.column);
    Ok(ApiResponse::ok(&grid))
}

async fn search(State(state): State<Arc<AppState>>, Json(body): Json<SearchBody>) -> ApiResult {
    let mut grid = state.grid();
    grid.search(&body.term);
    Ok(ApiResponse::ok(&grid))
}

async fn set_page_size(
    State(state): State<Arc<AppState>>,
    Json(body): Json<PageSizeBody>,
) -> ApiResult {
    let mut grid = state.grid();
    grid.set_page_size(body.rows_per_page)?;
    Ok(ApiResponse::ok(&grid))
}

async fn next_page(State(state): State<Arc<AppState>>) -> ApiResult {
    let mut grid = state.grid();
    grid.next_page();
    Ok(ApiResponse::ok(&grid))
}

async fn prev_page(State(state): State<Arc<AppState>>) -> ApiResult {
    let mut grid = state.grid();
    grid.prev_page();
    Ok(ApiResponse::ok(&grid))
}

async fn select_row(State(state): State<Arc<AppState>>, Json(body): Json<RowBody>) -> ApiResult {
    let mut grid = state.grid();
    grid.select_row(body.id);
    Ok(ApiResponse::ok(&grid))
}

async fn select_all(State(state): State<Arc<AppState>>) -> ApiResult {
    let mut grid = state.grid();
    grid.select_all();
    Ok(ApiResponse::ok(&grid))
}

async fn delete_selected(State(state): State<Arc<AppState>>) -> ApiResult {
    let mut grid = state.grid();
    grid.remove_selected();
    Ok(ApiResponse::ok(&grid))
}

async fn add_row(State(state): State<Arc<AppState>>) -> ApiResult {
    let mut grid = state.grid();
    grid.add_row();
    Ok(ApiResponse::ok(&grid))
}

async fn add_column(State(state): State<Arc<AppState>>) -> ApiResult {
    let mut grid = state.grid();
    grid.add_column();
    Ok(ApiResponse::ok(&grid))
}

async fn set_column_type(
    State(state): State<Arc<AppState>>,
    Json(body): Json<ColumnTypeBody>,
) -> ApiResult {
    let mut grid = state.grid();
    grid.set_column_type(&body.column, body.kind)?;
    Ok(ApiResponse::ok(&grid))
}

async fn undo(State(state): State<Arc<AppState>>) -> ApiResult {
    let mut grid = state.grid();
    grid.undo();
    Ok(ApiResponse::ok(&grid))
}

async fn redo(State(state): State<Arc<AppState>>) -> ApiResult {
    let mut grid = state.grid();
    grid.redo();
    Ok(ApiResponse::ok(&grid))
}

async fn export_xlsx(State(state): State<Arc<AppState>>) -> Result<Response, ApiError> {
    let bytes = downloader::to_xlsx(state.grid().store())?;
    Ok((
        [
            (
                header::CONTENT_TYPE,
                "application/vnd.openxmlformats-officedocument.spreadsheetml.sheet",
            ),
            (
                header::CONTENT_DISPOSITION,
                "attachment; filename=\"table_export.xlsx\"",
            ),
        ],
        bytes,
    )
        .into_response())
}

async fn export_csv(State(state): State<Arc<AppState>>) -> Result<Response, ApiError> {
    let csv = downloader::to_csv(state.grid().store())?;
    Ok(([(header::CONTENT_TYPE, "text/csv; charset=utf-8")], csv).into_response())
}

async fn import_workbook(State(state): State<Arc<AppState>>, mut multipart: Multipart) -> ApiResult {
    let mut file_data = Vec::new();

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| GridError::Import(e.to_string()))?
    {
        if field.name() == Some("workbook") {
            file_data = field
                .bytes()
                .await
                .map_err(|e| GridError::Import(e.to_string()))?
                .to_vec();
        }
    }

    if file_data.is_empty() {
        return Err(GridError::Import("No file data received".to_string()).into());
    }

    let store = loader::from_xlsx_bytes(&file_data)?;
    let mut grid = state.grid();
    grid.replace_store(store);
    Ok(ApiResponse::ok(&grid))
}
