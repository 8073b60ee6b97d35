//! Handlers for the `/types` resource.

use axum::extract::State;
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;
use scale_core::error::CoreError;
use scale_db::models::scale_type::CreateScaleType;
use scale_db::repositories::TypeRepo;

use crate::error::AppResult;
use crate::response::DataResponse;
use crate::state::AppState;

/// POST /api/v1/types
pub async fn create(
    State(state): State<AppState>,
    Json(input): Json<CreateScaleType>,
) -> AppResult<impl IntoResponse> {
    if input.name.trim().is_empty() {
        return Err(CoreError::Validation("name must not be empty".into()).into());
    }
    let created = TypeRepo::create(&state.pool, &input).await?;
    Ok((StatusCode::CREATED, Json(DataResponse { data: created })))
}
