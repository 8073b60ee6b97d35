//! Handlers for the `/templates` resource.

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;
use scale_core::error::CoreError;
use scale_core::types::DbId;
use scale_db::models::template::{CreateTemplateVersion, SaveTemplateFields, TemplateFilter};
use scale_db::repositories::{FieldDefinitionRepo, TemplateRepo, TemplateVersionRepo};

use crate::error::{AppError, AppResult};
use crate::response::DataResponse;
use crate::state::AppState;

// ---------------------------------------------------------------------------
// Reads
// ---------------------------------------------------------------------------

/// GET /api/v1/templates?kind=INPUT
///
/// Every template version, grouped by code with the newest version first.
pub async fn list(
    State(state): State<AppState>,
    Query(filter): Query<TemplateFilter>,
) -> AppResult<impl IntoResponse> {
    let templates = TemplateRepo::list(&state.pool, filter.kind).await?;
    Ok(Json(DataResponse { data: templates }))
}

/// GET /api/v1/templates/codes/{code}
///
/// All versions of one code, newest first. An unknown code has no versions.
pub async fn list_versions(
    State(state): State<AppState>,
    Path(code): Path<String>,
) -> AppResult<impl IntoResponse> {
    let versions = TemplateRepo::list_versions(&state.pool, &code).await?;
    Ok(Json(DataResponse { data: versions }))
}

/// GET /api/v1/templates/{id}
pub async fn get_by_id(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<impl IntoResponse> {
    let template = TemplateRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Template",
            id,
        }))?;
    Ok(Json(DataResponse { data: template }))
}

/// GET /api/v1/templates/{id}/fields
///
/// The template's fields in display order.
pub async fn list_fields(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<impl IntoResponse> {
    TemplateRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Template",
            id,
        }))?;
    let fields = FieldDefinitionRepo::list_for_template(&state.pool, id).await?;
    Ok(Json(DataResponse { data: fields }))
}

// ---------------------------------------------------------------------------
// Versioning
// ---------------------------------------------------------------------------

/// POST /api/v1/templates/versions
///
/// Create the next version of a code, optionally copying a base template's
/// fields.
pub async fn create_version(
    State(state): State<AppState>,
    Json(input): Json<CreateTemplateVersion>,
) -> AppResult<impl IntoResponse> {
    if input.code.trim().is_empty() {
        return Err(CoreError::Validation("code must not be empty".into()).into());
    }
    let template = TemplateVersionRepo::create_version(&state.pool, &input).await?;
    Ok((StatusCode::CREATED, Json(DataResponse { data: template })))
}

/// POST /api/v1/templates/{id}/versions
///
/// Save an edited field list as a new version of the template's code. The
/// template at `{id}` itself is left untouched.
pub async fn save_fields(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
    Json(input): Json<SaveTemplateFields>,
) -> AppResult<impl IntoResponse> {
    let template =
        TemplateVersionRepo::save_fields_as_new_version(&state.pool, id, input.fields).await?;
    Ok((StatusCode::CREATED, Json(DataResponse { data: template })))
}
