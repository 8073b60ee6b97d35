//! Route definitions for the `/items` resource.

use axum::routing::get;
use axum::Router;

use crate::handlers::items;
use crate::state::AppState;

/// Routes mounted at `/items`.
///
/// ```text
/// GET /tree                                        -> tree
/// GET /part-ids                                    -> list_part_ids
/// GET /{id}                                        -> get_by_id
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/tree", get(items::tree))
        .route("/part-ids", get(items::list_part_ids))
        .route("/{id}", get(items::get_by_id))
}
