//! Route definitions for the `/sheets` resource.

use axum::routing::get;
use axum::Router;

use crate::handlers::sheets;
use crate::state::AppState;

/// Routes mounted at `/sheets`.
///
/// ```text
/// GET  /?item_id=&kind=                            -> list_for_item
/// POST /                                           -> create
/// GET  /{id}                                       -> get_by_id
/// GET  /{id}/outputs                               -> list_outputs
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(sheets::list_for_item).post(sheets::create))
        .route("/{id}", get(sheets::get_by_id))
        .route("/{id}/outputs", get(sheets::list_outputs))
}
