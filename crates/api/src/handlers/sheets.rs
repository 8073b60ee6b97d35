//! Handlers for the `/sheets` resource.

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;
use scale_core::error::CoreError;
use scale_core::types::DbId;
use scale_db::models::sheet::{CreateSheet, ItemSheetFilter};
use scale_db::repositories::SheetRepo;

use crate::error::{AppError, AppResult};
use crate::response::DataResponse;
use crate::state::AppState;

/// GET /api/v1/sheets?item_id=1&kind=INPUT
///
/// Sheets of one kind recorded against an item, newest first.
pub async fn list_for_item(
    State(state): State<AppState>,
    Query(filter): Query<ItemSheetFilter>,
) -> AppResult<impl IntoResponse> {
    let sheets = SheetRepo::list_for_item(&state.pool, filter.item_id, filter.kind).await?;
    Ok(Json(DataResponse { data: sheets }))
}

/// POST /api/v1/sheets
///
/// Record a sheet. Supplying `parentSheetId` makes it an OUTPUT sheet.
pub async fn create(
    State(state): State<AppState>,
    Json(input): Json<CreateSheet>,
) -> AppResult<impl IntoResponse> {
    let sheet = SheetRepo::create(&state.pool, &input).await?;
    Ok((StatusCode::CREATED, Json(DataResponse { data: sheet })))
}

/// GET /api/v1/sheets/{id}
///
/// Sheet header plus recorded values.
pub async fn get_by_id(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<impl IntoResponse> {
    let sheet = SheetRepo::find_detail(&state.pool, id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound { entity: "Sheet", id }))?;
    Ok(Json(DataResponse { data: sheet }))
}

/// GET /api/v1/sheets/{id}/outputs
pub async fn list_outputs(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<impl IntoResponse> {
    SheetRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound { entity: "Sheet", id }))?;
    let outputs = SheetRepo::list_outputs(&state.pool, id).await?;
    Ok(Json(DataResponse { data: outputs }))
}
