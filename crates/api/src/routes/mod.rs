pub mod health;
pub mod items;
pub mod part_template_mappings;
pub mod sheets;
pub mod templates;
pub mod types;

use axum::Router;

use crate::state::AppState;

/// Build the `/api/v1` route tree.
///
/// Route hierarchy:
///
/// ```text
/// /items/tree                                      item hierarchy
/// /items/part-ids                                  distinct part ids
/// /items/{id}                                      single item
///
/// /templates                                       list (?kind=INPUT|OUTPUT)
/// /templates/versions                              create next version (POST)
/// /templates/codes/{code}                          all versions of a code
/// /templates/{id}                                  single template version
/// /templates/{id}/fields                           field layout
/// /templates/{id}/versions                         save fields as new version (POST)
///
/// /part-template-mappings                          list all
/// /part-template-mappings/{part_id}                get, replace (PUT)
///
/// /sheets                                          list (?item_id=&kind=), create (POST)
/// /sheets/{id}                                     sheet with values
/// /sheets/{id}/outputs                             output sheets of an input sheet
///
/// /types                                           create (POST)
/// ```
pub fn api_routes() -> Router<AppState> {
    Router::new()
        .nest("/items", items::router())
        .nest("/templates", templates::router())
        .nest("/part-template-mappings", part_template_mappings::router())
        .nest("/sheets", sheets::router())
        .nest("/types", types::router())
}
