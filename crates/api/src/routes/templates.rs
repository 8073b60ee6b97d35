//! Route definitions for the `/templates` resource.
//!
//! Templates are append-only: there is no PUT or DELETE. Editing a layout
//! posts a new version.

use axum::routing::{get, post};
use axum::Router;

use crate::handlers::templates;
use crate::state::AppState;

/// Routes mounted at `/templates`.
///
/// ```text
/// GET  /                                           -> list
/// POST /versions                                   -> create_version
/// GET  /codes/{code}                               -> list_versions
/// GET  /{id}                                       -> get_by_id
/// GET  /{id}/fields                                -> list_fields
/// POST /{id}/versions                              -> save_fields
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(templates::list))
        .route("/versions", post(templates::create_version))
        .route("/codes/{code}", get(templates::list_versions))
        .route("/{id}", get(templates::get_by_id))
        .route("/{id}/fields", get(templates::list_fields))
        .route("/{id}/versions", post(templates::save_fields))
}
