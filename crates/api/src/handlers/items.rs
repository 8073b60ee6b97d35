//! Handlers for the `/items` resource.
//!
//! Items are read-only through the API.

use axum::extract::{Path, State};
use axum::response::IntoResponse;
use axum::Json;
use scale_core::error::CoreError;
use scale_core::types::DbId;
use scale_db::repositories::ItemRepo;

use crate::error::{AppError, AppResult};
use crate::response::DataResponse;
use crate::state::AppState;

/// GET /api/v1/items/tree
///
/// All active items folded into Part -> Serial -> Bridge.
pub async fn tree(State(state): State<AppState>) -> AppResult<impl IntoResponse> {
    let tree = ItemRepo::tree(&state.pool).await?;
    Ok(Json(DataResponse { data: tree }))
}

/// GET /api/v1/items/part-ids
pub async fn list_part_ids(State(state): State<AppState>) -> AppResult<impl IntoResponse> {
    let part_ids = ItemRepo::list_part_ids(&state.pool).await?;
    Ok(Json(DataResponse { data: part_ids }))
}

/// GET /api/v1/items/{id}
pub async fn get_by_id(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<impl IntoResponse> {
    let item = ItemRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound { entity: "Item", id }))?;
    Ok(Json(DataResponse { data: item }))
}
