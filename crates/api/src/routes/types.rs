//! Route definitions for the `/types` resource.

use axum::routing::post;
use axum::Router;

use crate::handlers::types;
use crate::state::AppState;

/// Routes mounted at `/types`.
///
/// ```text
/// POST /                                           -> create
/// ```
pub fn router() -> Router<AppState> {
    Router::new().route("/", post(types::create))
}
