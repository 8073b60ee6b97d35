//! Handlers for the `/part-template-mappings` resource.

use axum::extract::{Path, State};
use axum::response::IntoResponse;
use axum::Json;
use scale_db::models::part_template_mapping::UpsertPartTemplateMapping;
use scale_db::repositories::PartTemplateMappingRepo;

use crate::error::AppResult;
use crate::response::DataResponse;
use crate::state::AppState;

/// GET /api/v1/part-template-mappings
pub async fn list(State(state): State<AppState>) -> AppResult<impl IntoResponse> {
    let mappings = PartTemplateMappingRepo::list(&state.pool).await?;
    Ok(Json(DataResponse { data: mappings }))
}

/// GET /api/v1/part-template-mappings/{part_id}
///
/// A part without a mapping answers with two empty lists, not 404.
pub async fn get_for_part(
    State(state): State<AppState>,
    Path(part_id): Path<String>,
) -> AppResult<impl IntoResponse> {
    let templates = PartTemplateMappingRepo::get_for_part(&state.pool, &part_id).await?;
    Ok(Json(DataResponse { data: templates }))
}

/// PUT /api/v1/part-template-mappings/{part_id}
///
/// Replace both template lists for a part.
pub async fn upsert(
    State(state): State<AppState>,
    Path(part_id): Path<String>,
    Json(input): Json<UpsertPartTemplateMapping>,
) -> AppResult<impl IntoResponse> {
    let mapping = PartTemplateMappingRepo::upsert(&state.pool, &part_id, &input).await?;
    Ok(Json(DataResponse { data: mapping }))
}
