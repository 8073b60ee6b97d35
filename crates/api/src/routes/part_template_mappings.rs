//! Route definitions for the `/part-template-mappings` resource.

use axum::routing::get;
use axum::Router;

use crate::handlers::part_template_mappings;
use crate::state::AppState;

/// Routes mounted at `/part-template-mappings`.
///
/// ```text
/// GET /                                            -> list
/// GET /{part_id}                                   -> get_for_part
/// PUT /{part_id}                                   -> upsert
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(part_template_mappings::list))
        .route(
            "/{part_id}",
            get(part_template_mappings::get_for_part).put(part_template_mappings::upsert),
        )
}
